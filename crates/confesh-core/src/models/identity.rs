use crate::DEFAULT_AUTHOR;

use serde::{Deserialize, Serialize};

/// An authenticated principal as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id: id.into(),
            display_name,
        }
    }

    /// Display name, or the generic label when the provider has none.
    ///
    /// A whitespace-only name counts as none.
    pub fn name_or_default(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_AUTHOR,
        }
    }
}
