//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur in the store crate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored tags or embedding failed to decode.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected input (e.g. empty note content).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested note does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored row contains data the store cannot interpret.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Database file or directory could not be set up at startup.
    #[error("Store initialization failed: {0}")]
    Init(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
