use crate::{ANONYMOUS_AUTHOR, Identity, Result as WallResult, validate_content};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A confession that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConfession {
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_anonymous: bool,
    pub author: String,
    pub author_id: String,
}

impl NewConfession {
    /// Builds the record to insert, resolving the author label once.
    #[track_caller]
    pub fn new(content: String, is_anonymous: bool, identity: &Identity) -> WallResult<Self> {
        validate_content(&content)?;

        let author = if is_anonymous {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            identity.name_or_default().to_string()
        };

        Ok(Self {
            content,
            created_at: Utc::now(),
            is_anonymous,
            author,
            author_id: identity.id.clone(),
        })
    }
}
