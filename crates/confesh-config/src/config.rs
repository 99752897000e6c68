use crate::{
    BackendConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, SESSION_FILENAME, WallConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub wall: WallConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. Check for CONFESH_CONFIG_DIR env var, else use ./.confesh/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply CONFESH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Same as [`Config::load`], but with an explicit config directory.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: CONFESH_CONFIG_DIR env var > ./.confesh/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Where the signed-in session is kept between runs.
    pub fn session_path(config_dir: &Path) -> PathBuf {
        config_dir.join(SESSION_FILENAME)
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.wall.validate()?;
        Ok(())
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  backend: {}", self.backend.kind);
        info!(
            "  project: {} (database {}, collection {})",
            self.backend.project_id.as_deref().unwrap_or("<unset>"),
            self.backend.database,
            self.backend.collection
        );
        info!(
            "  api_key: {}",
            if self.backend.api_key.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stderr")
        );
    }

    /// An unknown backend kind is an error; it picks which service gets the data.
    fn apply_env_overrides(&mut self) -> ConfigErrorResult<()> {
        // Backend
        if let Ok(val) = std::env::var("CONFESH_BACKEND_KIND") {
            self.backend.kind = val.parse().map_err(|_| {
                ConfigError::backend(format!(
                    "Invalid CONFESH_BACKEND_KIND '{val}' (expected firebase or memory)"
                ))
            })?;
        }
        Self::apply_env_option_string("CONFESH_API_KEY", &mut self.backend.api_key);
        Self::apply_env_option_string("CONFESH_PROJECT_ID", &mut self.backend.project_id);
        Self::apply_env_string("CONFESH_DATABASE", &mut self.backend.database);
        Self::apply_env_string("CONFESH_COLLECTION", &mut self.backend.collection);
        Self::apply_env_string("CONFESH_FIRESTORE_URL", &mut self.backend.firestore_url);
        Self::apply_env_string("CONFESH_IDENTITY_URL", &mut self.backend.identity_url);

        // Wall
        Self::apply_env_string("CONFESH_WALL_TITLE", &mut self.wall.title);

        // Logging
        Self::apply_env_parse("CONFESH_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CONFESH_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("CONFESH_LOG_FILE", &mut self.logging.file);

        Ok(())
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
