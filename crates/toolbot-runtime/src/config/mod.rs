//! Configuration module for the Toolbot runtime.
//!
//! Provides figment-based configuration loading for logging and database
//! settings, merged from defaults, a TOML file, and `TOOLBOT_`-prefixed
//! environment variables.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config, load_config_from_file};
pub use schema::{DatabaseConfig, LogFormat, LogOutput, LoggingConfig, ToolbotConfig};
