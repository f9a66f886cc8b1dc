//! Error types for the Toolbot core crate.

use thiserror::Error;

/// Errors that can occur while building events from webhook input.
#[derive(Debug, Clone, Error)]
pub enum EventError {
    /// Event deserialization failed.
    #[error("failed to parse event: {reason}")]
    Parse {
        /// Reason for failure.
        reason: String,
    },
}

/// Result type for event operations.
pub type EventResult<T> = Result<T, EventError>;
