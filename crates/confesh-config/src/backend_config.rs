use crate::{
    BackendKind, ConfigError, ConfigErrorResult, DEFAULT_COLLECTION, DEFAULT_DATABASE,
    DEFAULT_FIRESTORE_URL, DEFAULT_IDENTITY_URL,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Web API key of the managed project (identity calls)
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub database: String,
    pub collection: String,
    pub firestore_url: String,
    pub identity_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            api_key: None,
            project_id: None,
            database: String::from(DEFAULT_DATABASE),
            collection: String::from(DEFAULT_COLLECTION),
            firestore_url: String::from(DEFAULT_FIRESTORE_URL),
            identity_url: String::from(DEFAULT_IDENTITY_URL),
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.collection.trim().is_empty() || self.collection.contains('/') {
            return Err(ConfigError::backend(
                "backend.collection must be a non-empty name without '/'",
            ));
        }

        if self.kind == BackendKind::Memory {
            return Ok(());
        }

        if self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(ConfigError::backend(
                "backend.api_key is required for the firebase backend",
            ));
        }

        if self
            .project_id
            .as_deref()
            .is_none_or(|p| p.trim().is_empty())
        {
            return Err(ConfigError::backend(
                "backend.project_id is required for the firebase backend",
            ));
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::backend("backend.database cannot be empty"));
        }

        for (name, url) in [
            ("backend.firestore_url", &self.firestore_url),
            ("backend.identity_url", &self.identity_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::backend(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        Ok(())
    }
}
