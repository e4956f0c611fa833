//! Embedding persistence operations.
//!
//! Embedding writes are deliberately not content edits: they never bump
//! `updated_at`, so generating embeddings does not reshuffle recency lists.

use rusqlite::params;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::types::Note;

use super::note_ops::NOTE_COLUMNS;
use super::NoteStore;

impl NoteStore {
    /// Store an embedding vector for a note, replacing any previous one.
    pub fn save_embedding(&self, id: i64, embedding: &[f32]) -> Result<()> {
        let embedding_json = serde_json::to_string(embedding)?;
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute(
            "UPDATE notes SET embedding = ?2 WHERE id = ?1",
            params![id, embedding_json],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(format!("note {id}")));
        }

        debug!("Stored {}-dim embedding for note {}", embedding.len(), id);
        Ok(())
    }

    /// List all notes with a present, non-empty embedding.
    pub fn list_with_embeddings(&self) -> Result<Vec<Note>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {NOTE_COLUMNS}
            FROM notes
            WHERE embedding IS NOT NULL AND embedding != ''
            ORDER BY id ASC
            "#
        ))?;

        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(Self::row_to_note(row)?);
        }
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> NoteStore {
        NoteStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_save_and_list_embeddings() {
        let store = create_test_store();

        let a = store.add("with vector", None, &[]).unwrap();
        store.add("without vector", None, &[]).unwrap();

        store.save_embedding(a.id, &[0.1, 0.2, 0.3]).unwrap();

        let embedded = store.list_with_embeddings().unwrap();
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0].id, a.id);
        assert_eq!(embedded[0].embedding.as_deref(), Some(&[0.1, 0.2, 0.3][..]));
    }

    #[test]
    fn test_save_embedding_overwrites() {
        let store = create_test_store();

        let note = store.add("note", None, &[]).unwrap();
        store.save_embedding(note.id, &[1.0, 0.0]).unwrap();
        store.save_embedding(note.id, &[0.0, 1.0]).unwrap();

        let embedded = store.list_with_embeddings().unwrap();
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0].embedding.as_deref(), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn test_save_embedding_missing_is_not_found() {
        let store = create_test_store();
        assert!(matches!(
            store.save_embedding(99, &[0.5]),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_save_embedding_does_not_bump_updated_at() {
        let store = create_test_store();

        let note = store.add("stable", None, &[]).unwrap();
        store.save_embedding(note.id, &[0.4, 0.6]).unwrap();

        let fetched = store.get(note.id).unwrap();
        assert_eq!(fetched.updated_at, note.updated_at);
    }
}
