//! Configuration loader using figment.
//!
//! Sources are merged lowest-priority first:
//!
//! 1. Built-in defaults ([`ToolbotConfig::default`])
//! 2. Config file (`toolbot.toml` in the working directory, or an explicit
//!    path given via [`ConfigLoader::file`])
//! 3. Environment variables (`TOOLBOT_` prefix, `__` as the section
//!    separator: `TOOLBOT_DATABASE__URL` → `database.url`)
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbot_runtime::config::{ConfigLoader, load_config};
//!
//! // Default locations and environment
//! let config = load_config()?;
//!
//! // A specific file, ignoring the environment
//! let config = ConfigLoader::new()
//!     .file("./config/toolbot.toml")
//!     .without_env()
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
use figment::providers::{Env, Serialized};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::schema::ToolbotConfig;

/// Default config file name searched in the working directory.
#[cfg(feature = "toml-config")]
const DEFAULT_CONFIG_FILE: &str = "toolbot.toml";

/// Loads configuration from the default locations and the environment.
pub fn load_config() -> ConfigResult<ToolbotConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from a specific file plus the environment.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<ToolbotConfig> {
    ConfigLoader::new().file(path).load()
}

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: true,
        }
    }

    /// Sets a specific configuration file to load.
    ///
    /// Unlike the default search, a file set explicitly must exist.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<ToolbotConfig> {
        let figment = self.build_figment()?;
        let config: ToolbotConfig = figment.extract().map_err(ConfigError::from)?;

        debug!(
            logging_level = %config.logging.level,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(self) -> ConfigResult<Figment> {
        #[allow(unused_mut)]
        let mut figment = Figment::from(Serialized::defaults(ToolbotConfig::default()));

        #[cfg(feature = "toml-config")]
        {
            if let Some(path) = &self.config_file {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.clone()));
                }
                figment = figment.merge(Toml::file(path));
            } else {
                figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
            }
        }

        if self.load_env {
            figment = figment.merge(Env::prefixed("TOOLBOT_").split("__"));
        }

        Ok(figment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_sources() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::new().load().expect("defaults load");
            assert_eq!(config.logging.level, "info");
            assert_eq!(config.database.url, None);
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn file_values_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "toolbot.toml",
                r#"
                    [logging]
                    level = "debug"

                    [database]
                    url = "mongodb://file.example:27017/toolbot"
                "#,
            )?;

            let config = ConfigLoader::new().load().expect("config loads");
            assert_eq!(config.logging.level, "debug");
            assert_eq!(
                config.database.url.as_deref(),
                Some("mongodb://file.example:27017/toolbot")
            );
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn env_values_override_the_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "toolbot.toml",
                r#"
                    [database]
                    url = "mongodb://file.example:27017/toolbot"
                "#,
            )?;
            jail.set_env("TOOLBOT_DATABASE__URL", "mongodb://env.example:27017/toolbot");

            let config = ConfigLoader::new().load().expect("config loads");
            assert_eq!(
                config.database.url.as_deref(),
                Some("mongodb://env.example:27017/toolbot")
            );
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn missing_explicit_file_is_an_error() {
        figment::Jail::expect_with(|_jail| {
            let result = ConfigLoader::new().file("nope.toml").load();
            assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
            Ok(())
        });
    }
}
