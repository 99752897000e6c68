//! confesh-app
//!
//! Wall state, the actions a user can take on it, and a text rendering.

pub(crate) mod action_outcome;
pub(crate) mod controller;
pub(crate) mod edit_session;
pub(crate) mod notice;
pub(crate) mod view;

#[cfg(test)]
mod tests;

pub use action_outcome::ActionOutcome;
pub use controller::WallController;
pub use edit_session::EditSession;
pub use notice::Notice;
pub use view::render;

pub const EMPTY_WALL_TEXT: &str = "No confessions yet. Be the first to share!";
pub const LOADING_TEXT: &str = "Loading confessions...";
