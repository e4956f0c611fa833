//! Note persistence for scrawl.
//!
//! Provides the [`NoteStore`], a SQLite-backed store for notes with a
//! three-state workflow status, derived tags, and optional embedding
//! vectors, plus the pure tag-extraction helper used at note creation.

pub mod error;
pub mod store;
pub mod tags;
pub mod types;

pub use error::{Result, StoreError};
pub use store::NoteStore;
pub use tags::parse_tags;
pub use types::{Note, Status, StoreStats};
