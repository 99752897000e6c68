pub(crate) mod identity_hub;
pub(crate) mod identity_subscription;
pub(crate) mod session;

pub use identity_hub::{IdentityHub, IdentityListener};
pub use identity_subscription::IdentitySubscription;
pub use session::Session;
