//! # Toolbot Runtime
//!
//! Process-level glue for the Toolbot framework: configuration loading and
//! logging setup.
//!
//! This crate carries no dispatch or persistence logic of its own — it
//! wires the other layers together for a running process:
//!
//! ```rust,ignore
//! use toolbot_runtime::{config, logging};
//!
//! let config = config::load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! let resolver = config.database.resolver();
//! let db = resolver.resolve().await;
//! ```

pub mod config;
pub mod logging;

pub use config::{
    ConfigError, ConfigLoader, ConfigResult, DatabaseConfig, LogFormat, LogOutput, LoggingConfig,
    ToolbotConfig, load_config, load_config_from_file,
};
pub use logging::{LoggingBuilder, init_from_config};
