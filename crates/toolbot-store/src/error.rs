//! Error types for the Toolbot store crate.

use thiserror::Error;

/// Errors that can occur in database operations.
///
/// `Connect` is only ever seen inside the resolver, which absorbs it by
/// substituting the mock handle; callers of `resolve()` never observe it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection string could not be parsed.
    #[error("invalid connection string '{url}': {source}")]
    InvalidUrl {
        /// The offending connection string.
        url: String,
        /// Driver-level parse error.
        source: mongodb::error::Error,
    },

    /// The server could not be reached.
    #[error("failed to connect to '{url}': {source}")]
    Connect {
        /// The connection string that was attempted.
        url: String,
        /// Driver-level connection error.
        source: mongodb::error::Error,
    },

    /// A database operation failed on a live handle.
    #[error("database operation failed: {0}")]
    Operation(#[from] mongodb::error::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
