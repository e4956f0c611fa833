//! Two-tier search and embedding backfill.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use scrawl_store::{Note, NoteStore};

use crate::error::{Result, SearchError};
use crate::provider::SharedProvider;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum cosine similarity for a semantic hit; results at or below this
/// are dropped.
pub const SIMILARITY_THRESHOLD: f32 = 0.3;

/// Result cap when the caller passes a zero limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Pause between provider calls during backfill, so a local inference
/// process is not flooded.
pub const BACKFILL_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on notes scanned by one backfill pass.
const BACKFILL_SCAN_LIMIT: i64 = 1000;

// ─────────────────────────────────────────────────────────────────────────────
// Result types
// ─────────────────────────────────────────────────────────────────────────────

/// A semantic search hit: a note plus its similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub note: Note,
    pub score: f32,
}

/// Search results, tagged with the tier that produced them.
///
/// Text-tier results carry no scores; they are ordered by recency only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchResults {
    Semantic(Vec<SearchHit>),
    Text(Vec<Note>),
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        match self {
            SearchResults::Semantic(hits) => hits.is_empty(),
            SearchResults::Text(notes) => notes.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResults::Semantic(hits) => hits.len(),
            SearchResults::Text(notes) => notes.len(),
        }
    }
}

/// Outcome of a batch embedding backfill.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BackfillReport {
    /// Embeddings generated and stored.
    pub generated: usize,
    /// Notes whose provider call or store write failed.
    pub failed: usize,
    /// Notes that already had an embedding.
    pub skipped: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Search Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Two-tier search over the note store.
///
/// Tier 1 ranks notes by cosine similarity of stored embeddings against the
/// query embedding. Tier 2 is the store's substring search, used whenever
/// the provider is unreachable, errors out, or tier 1 produces nothing:
/// a missing local embedding provider must degrade search, not break it.
pub struct SearchEngine {
    store: Arc<NoteStore>,
    provider: SharedProvider,
}

impl SearchEngine {
    /// Create a search engine over an injected store and provider.
    pub fn new(store: Arc<NoteStore>, provider: SharedProvider) -> Self {
        Self { store, provider }
    }

    /// Search notes, semantically when possible.
    ///
    /// Provider failures inside the semantic tier are swallowed here, and
    /// only here: the caller sees the text-tier results instead of an
    /// error. Store failures always surface.
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchResults> {
        let limit = if limit == 0 { DEFAULT_SEARCH_LIMIT } else { limit };

        if self.provider.is_available().await {
            match self.semantic(query, limit).await {
                Ok(hits) if !hits.is_empty() => return Ok(SearchResults::Semantic(hits)),
                Ok(_) => debug!("No semantic hits above threshold, using text search"),
                Err(SearchError::Provider(e)) => {
                    debug!("Semantic search unavailable ({}), using text search", e);
                }
                Err(e) => return Err(e),
            }
        } else {
            debug!("Embedding provider unreachable, using text search");
        }

        Ok(SearchResults::Text(self.store.search_text(query)?))
    }

    /// Tier 1: rank stored embeddings against the query embedding.
    async fn semantic(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let query_embedding = self.provider.embed(query).await?;
        let notes = self.store.list_with_embeddings()?;

        let mut hits = Vec::new();
        for note in notes {
            let Some(embedding) = note.embedding.as_deref() else {
                continue;
            };
            // Mismatched dimensionality yields similarity 0, which the
            // threshold excludes; such notes are skipped, never an error.
            let score = cosine_similarity(&query_embedding, embedding);
            if score > SIMILARITY_THRESHOLD {
                hits.push(SearchHit { note, score });
            }
        }

        // Stable sort: ties keep the store's fetch order.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }

    /// Generate and store an embedding for a single note.
    ///
    /// Unlike [`SearchEngine::search`], provider errors surface to the
    /// caller here.
    pub async fn embed_note(&self, id: i64) -> Result<()> {
        let note = self.store.get(id)?;
        let embedding = self.provider.embed(&note.content).await?;
        self.store.save_embedding(id, &embedding)?;
        Ok(())
    }

    /// Generate embeddings for every note that lacks one.
    ///
    /// Failures are counted per note and never abort the batch. The
    /// configured delay is inserted between provider calls.
    pub async fn backfill(&self, delay: Duration) -> Result<BackfillReport> {
        let notes = self.store.list_recent(BACKFILL_SCAN_LIMIT)?;
        let mut report = BackfillReport::default();

        for note in notes {
            if note.embedding.is_some() {
                report.skipped += 1;
                continue;
            }

            match self.provider.embed(&note.content).await {
                Ok(embedding) => match self.store.save_embedding(note.id, &embedding) {
                    Ok(()) => {
                        debug!("Generated embedding for note {}", note.id);
                        report.generated += 1;
                    }
                    Err(e) => {
                        warn!("Failed to save embedding for note {}: {}", note.id, e);
                        report.failed += 1;
                    }
                },
                Err(e) => {
                    warn!("Failed to generate embedding for note {}: {}", note.id, e);
                    report.failed += 1;
                }
            }

            tokio::time::sleep(delay).await;
        }

        Ok(report)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Similarity
// ─────────────────────────────────────────────────────────────────────────────

/// Calculate cosine similarity between two embeddings.
///
/// Defined as 0 when the vectors differ in length or either norm is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
