//! Semantic search for scrawl.
//!
//! The [`SearchEngine`] ranks notes by cosine similarity of stored
//! embeddings against a query vector from an [`EmbeddingProvider`], and
//! silently degrades to the store's substring search whenever the provider
//! is absent, errors out, or finds nothing above the similarity threshold.

pub mod engine;
pub mod error;
pub mod provider;

pub use engine::{
    cosine_similarity, BackfillReport, SearchEngine, SearchHit, SearchResults, BACKFILL_DELAY,
    DEFAULT_SEARCH_LIMIT, SIMILARITY_THRESHOLD,
};
pub use error::{ProviderError, Result, SearchError};
pub use provider::{EmbeddingProvider, MockProvider, OllamaConfig, OllamaProvider, SharedProvider};
