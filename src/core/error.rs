//! Error types for regionscout.

use thiserror::Error;

/// Result type alias for regionscout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that escalate out of a reconciliation.
///
/// Per-region probe failures never show up here; they are folded into
/// verdicts. Only setup failures and aborts stop a whole run.
#[derive(Error, Debug)]
pub enum Error {
    // Setup errors
    #[error("Probe setup failed: {0}")]
    ProbeSetup(String),

    #[error("Location catalog unavailable: {0}")]
    Catalog(String),

    #[error("Reconciliation cancelled")]
    Cancelled,

    // Input errors
    #[error("Duplicate region code: {0}")]
    DuplicateRegion(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
