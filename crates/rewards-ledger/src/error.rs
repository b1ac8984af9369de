//! Persistence error types.

use rewards_core::error::RewardsError;
use thiserror::Error;

/// Errors from loading or saving ledger state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// State file is not valid JSON or does not match the expected layout.
    #[error("serialization: {0}")]
    Serialization(String),

    /// State file decoded but describes an invalid ledger.
    #[error(transparent)]
    Ledger(#[from] RewardsError),
}

impl From<std::io::Error> for StateError {
    fn from(e: std::io::Error) -> Self {
        StateError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self {
        StateError::Serialization(e.to_string())
    }
}
