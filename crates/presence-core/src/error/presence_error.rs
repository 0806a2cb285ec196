//! Presence errors - failures surfaced by presence set operations

use thiserror::Error;

/// Errors returned by presence set and ordered store operations
#[derive(Debug, Error)]
pub enum PresenceError {
    /// The ordered store could not be reached, ran out of connections or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store was reached but rejected the command
    #[error("Store command failed: {0}")]
    StoreCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PresenceError {
    /// Get an error code string for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::StoreCommand(_) => "STORE_COMMAND",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }

    /// Check if the error came from the store rather than the caller
    pub fn is_store(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::StoreCommand(_))
    }

    /// Check if retrying the same call later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

/// Result type for presence operations
pub type PresenceResult<T> = Result<T, PresenceError>;
