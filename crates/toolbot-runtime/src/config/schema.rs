//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use toolbot_store::DatabaseResolver;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolbotConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============================================================================
// Logging
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file path, used when `output` is `file`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact single-line output.
    #[default]
    Compact,
    /// Full output with all fields.
    Full,
    /// Multi-line human-oriented output.
    Pretty,
    /// JSON output (requires the `json-log` feature).
    #[cfg(feature = "json-log")]
    Json,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// A log file (set `file_path`).
    File,
}

// ============================================================================
// Database
// ============================================================================

/// Database configuration.
///
/// When `url` is unset the resolver falls back to the `MONGO_URL`
/// environment variable and then to the local default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Explicit connection string, overriding the environment lookup.
    #[serde(default)]
    pub url: Option<String>,

    /// Bound on the connection attempt, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl DatabaseConfig {
    /// Builds a [`DatabaseResolver`] from this configuration.
    pub fn resolver(&self) -> DatabaseResolver {
        let resolver = match &self.url {
            Some(url) if !url.is_empty() => DatabaseResolver::with_url(url),
            _ => DatabaseResolver::new(),
        };
        resolver.connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ToolbotConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.logging.output, LogOutput::Stdout);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.connect_timeout_secs, 10);
    }

    #[test]
    fn explicit_database_url_feeds_the_resolver() {
        let config = DatabaseConfig {
            url: Some("mongodb://db.internal:27017/bot".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolver().url(), "mongodb://db.internal:27017/bot");
    }
}
