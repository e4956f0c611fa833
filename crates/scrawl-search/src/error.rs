//! Error types for the search crate.

use thiserror::Error;

/// Errors from the embedding provider boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure, including timeouts and connection refusals.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    /// Provider answered successfully but with an empty vector.
    #[error("Provider returned an empty embedding")]
    EmptyEmbedding,

    /// Caller passed empty text.
    #[error("Cannot embed empty text")]
    EmptyInput,
}

/// Errors that can occur in the search crate.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Store access failed.
    #[error(transparent)]
    Store(#[from] scrawl_store::StoreError),

    /// Embedding provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
