use crate::{ConfigError, ConfigErrorResult, DEFAULT_WALL_TITLE};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Heading printed above the wall.
    pub title: String,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            title: String::from(DEFAULT_WALL_TITLE),
        }
    }
}

impl WallConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::wall("wall.title cannot be empty"));
        }
        Ok(())
    }
}
