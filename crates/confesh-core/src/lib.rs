pub mod error;
pub mod models;
pub mod validation;

pub use error::{Result, WallError};
pub use models::confession::Confession;
pub use models::credentials::Credentials;
pub use models::identity::Identity;
pub use models::new_confession::NewConfession;
pub use validation::validate_content;

/// Author label written for, and displayed on, anonymous confessions.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";
/// Author label used when a signed-in identity has no display name.
pub const DEFAULT_AUTHOR: &str = "User";
/// Author label used when a stored record carries no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[cfg(test)]
mod tests;
