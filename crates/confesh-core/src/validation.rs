use crate::{Result as WallResult, WallError};

/// Rejects content that is empty once surrounding whitespace is removed.
///
/// The content itself is stored as typed; trimming only decides emptiness.
#[track_caller]
pub fn validate_content(content: &str) -> WallResult<()> {
    if content.trim().is_empty() {
        return Err(WallError::validation("Confession cannot be empty"));
    }
    Ok(())
}
