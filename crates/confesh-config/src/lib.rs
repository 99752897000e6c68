mod backend_config;
mod backend_kind;
mod config;
mod error;
mod log_level;
mod logging_config;
mod wall_config;

pub use backend_config::BackendConfig;
pub use backend_kind::BackendKind;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use wall_config::WallConfig;

pub const CONFIG_DIR_ENV: &str = "CONFESH_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".confesh";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const SESSION_FILENAME: &str = "session.json";

const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_DATABASE: &str = "(default)";
const DEFAULT_COLLECTION: &str = "confessions";
const DEFAULT_WALL_TITLE: &str = "HCDC CONFESH WALL";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
