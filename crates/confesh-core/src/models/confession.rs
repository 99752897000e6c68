use crate::{ANONYMOUS_AUTHOR, Identity, NewConfession};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confession {
    /// Assigned by the store; `None` before the first write.
    pub id: Option<String>,

    pub content: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,

    // Authorship, fixed at creation
    pub is_anonymous: bool,
    pub author: String,
    pub author_id: Option<String>,
}

impl Confession {
    /// Attaches the store-assigned id to a freshly inserted record.
    pub fn from_new(id: String, new: NewConfession) -> Self {
        Self {
            id: Some(id),
            content: new.content,
            created_at: new.created_at,
            updated_at: None,
            is_anonymous: new.is_anonymous,
            author: new.author,
            author_id: Some(new.author_id),
        }
    }

    /// Label shown next to the content.
    pub fn display_author(&self) -> &str {
        if self.is_anonymous {
            ANONYMOUS_AUTHOR
        } else {
            &self.author
        }
    }

    /// Whether `identity` owns this record and may be offered edit/delete.
    ///
    /// This only decides what the UI shows; the backend enforces access.
    pub fn is_owned_by(&self, identity: Option<&Identity>) -> bool {
        match (identity, self.author_id.as_deref()) {
            (Some(identity), Some(author_id)) => identity.id == author_id,
            _ => false,
        }
    }
}
