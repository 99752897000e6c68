pub mod confession;
pub mod credentials;
pub mod identity;
pub mod new_confession;
