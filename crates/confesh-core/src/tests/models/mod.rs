mod confession;
mod credentials;
mod identity;
mod new_confession;
