//! Note CRUD, listing, and text search operations.

use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::types::{Note, Status};

use super::{NoteStore, DEFAULT_LIST_LIMIT};

/// Column list shared by every note query, in [`NoteStore::row_to_note`]
/// order.
pub(crate) const NOTE_COLUMNS: &str =
    "id, content, status, tags, embedding, created_at, updated_at";

impl NoteStore {
    /// Add a new note.
    ///
    /// Assigns a fresh id and identical created/updated timestamps. The
    /// status defaults to todo when not given.
    pub fn add(&self, content: &str, status: Option<Status>, tags: &[String]) -> Result<Note> {
        if content.trim().is_empty() {
            return Err(StoreError::Validation(
                "note content cannot be empty".to_string(),
            ));
        }

        let status = status.unwrap_or_default();
        let now = Utc::now();
        let tags_json = serde_json::to_string(tags)?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO notes (content, status, tags, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                content,
                status.as_str(),
                tags_json,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!("Inserted note {}", id);
        Ok(Note {
            id,
            content: content.to_string(),
            status,
            tags: tags.to_vec(),
            created_at: now,
            updated_at: now,
            embedding: None,
        })
    }

    /// Get a note by id.
    pub fn get(&self, id: i64) -> Result<Note> {
        let conn = self.conn.lock().unwrap();

        let mut stmt =
            conn.prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Self::row_to_note(row),
            None => Err(StoreError::NotFound(format!("note {id}"))),
        }
    }

    /// List the most recently updated notes.
    ///
    /// A non-positive limit is coerced to [`DEFAULT_LIST_LIMIT`]. The id
    /// tie-break keeps ordering deterministic when timestamps collide.
    pub fn list_recent(&self, limit: i64) -> Result<Vec<Note>> {
        let limit = if limit <= 0 { DEFAULT_LIST_LIMIT } else { limit };
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {NOTE_COLUMNS}
            FROM notes
            ORDER BY updated_at DESC, id DESC
            LIMIT ?1
            "#
        ))?;

        let mut rows = stmt.query(params![limit])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(Self::row_to_note(row)?);
        }
        Ok(notes)
    }

    /// Case-sensitive substring search over note content.
    ///
    /// Results are ordered by recency; there is no relevance scoring at
    /// this tier.
    pub fn search_text(&self, query: &str) -> Result<Vec<Note>> {
        let conn = self.conn.lock().unwrap();

        let pattern = format!("%{query}%");
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {NOTE_COLUMNS}
            FROM notes
            WHERE content LIKE ?1
            ORDER BY updated_at DESC, id DESC
            "#
        ))?;

        let mut rows = stmt.query(params![pattern])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(Self::row_to_note(row)?);
        }
        Ok(notes)
    }

    /// Replace a note's content, status, and tags in a single write.
    ///
    /// Bumps `updated_at`; `created_at` and the embedding are untouched.
    pub fn update(&self, id: i64, content: &str, status: Status, tags: &[String]) -> Result<()> {
        if content.trim().is_empty() {
            return Err(StoreError::Validation(
                "note content cannot be empty".to_string(),
            ));
        }

        let tags_json = serde_json::to_string(tags)?;
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute(
            r#"
            UPDATE notes
            SET content = ?2, status = ?3, tags = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
            params![
                id,
                content,
                status.as_str(),
                tags_json,
                Utc::now().to_rfc3339(),
            ],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(format!("note {id}")));
        }
        Ok(())
    }

    /// Change only a note's status.
    ///
    /// Used by the kanban board; content and tags are untouched, but the
    /// move still counts as an edit and bumps `updated_at`.
    pub fn update_status(&self, id: i64, status: Status) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute(
            "UPDATE notes SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), Utc::now().to_rfc3339()],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(format!("note {id}")));
        }

        debug!("Note {} moved to {}", id, status);
        Ok(())
    }

    /// Delete a note by id.
    ///
    /// Idempotent: deleting an absent id is not an error, and the return
    /// value reports whether a row was actually removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    /// List notes in one kanban column, oldest first.
    ///
    /// Ordered by creation time so that editing a note never reorders its
    /// column.
    pub fn list_by_status(&self, status: Status) -> Result<Vec<Note>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {NOTE_COLUMNS}
            FROM notes
            WHERE status = ?1
            ORDER BY created_at ASC, id ASC
            "#
        ))?;

        let mut rows = stmt.query(params![status.as_str()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(Self::row_to_note(row)?);
        }
        Ok(notes)
    }

    /// Convert a database row to a [`Note`].
    pub(crate) fn row_to_note(row: &rusqlite::Row) -> Result<Note> {
        let id: i64 = row.get(0)?;
        let content: String = row.get(1)?;
        let status_str: String = row.get(2)?;
        let tags_json: String = row.get(3)?;
        let embedding_json: Option<String> = row.get(4)?;
        let created_at_str: String = row.get(5)?;
        let updated_at_str: String = row.get(6)?;

        let status: Status = status_str.parse()?;
        let tags: Vec<String> = serde_json::from_str(&tags_json)?;
        let embedding: Option<Vec<f32>> = match embedding_json {
            Some(raw) if !raw.is_empty() => Some(serde_json::from_str(&raw)?),
            _ => None,
        };
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?
            .with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Note {
            id,
            content,
            status,
            tags,
            created_at,
            updated_at,
            embedding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> NoteStore {
        NoteStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_add_defaults() {
        let store = create_test_store();

        let tags = crate::parse_tags("Fix bug #urgent #backend");
        let note = store
            .add("Fix bug #urgent #backend", None, &tags)
            .unwrap();

        assert_eq!(note.status, Status::Todo);
        assert_eq!(note.tags, vec!["urgent", "backend"]);
        assert_eq!(note.created_at, note.updated_at);
        assert!(note.embedding.is_none());

        let fetched = store.get(note.id).unwrap();
        assert_eq!(fetched.content, "Fix bug #urgent #backend");
        assert_eq!(fetched.tags, vec!["urgent", "backend"]);
    }

    #[test]
    fn test_add_rejects_empty_content() {
        let store = create_test_store();

        assert!(matches!(
            store.add("", None, &[]),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add("   ", None, &[]),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.stats().unwrap().total, 0);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let store = create_test_store();

        let a = store.add("first", None, &[]).unwrap();
        let b = store.add("second", None, &[]).unwrap();
        let c = store.add("third", None, &[]).unwrap();
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = create_test_store();
        assert!(matches!(store.get(42), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_update_replaces_and_bumps_updated_at() {
        let store = create_test_store();

        let note = store.add("draft #wip", None, &["wip".into()]).unwrap();
        store
            .update(note.id, "final #done", Status::Doing, &["done".into()])
            .unwrap();

        let fetched = store.get(note.id).unwrap();
        assert_eq!(fetched.content, "final #done");
        assert_eq!(fetched.status, Status::Doing);
        assert_eq!(fetched.tags, vec!["done"]);
        assert_eq!(fetched.created_at, note.created_at);
        assert!(fetched.updated_at >= note.updated_at);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = create_test_store();
        assert!(matches!(
            store.update(7, "content", Status::Todo, &[]),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_rejects_empty_content() {
        let store = create_test_store();
        let note = store.add("keep me", None, &[]).unwrap();

        assert!(matches!(
            store.update(note.id, "", Status::Todo, &[]),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.get(note.id).unwrap().content, "keep me");
    }

    #[test]
    fn test_update_status_leaves_content_and_tags() {
        let store = create_test_store();

        let note = store.add("task #a", None, &["a".into()]).unwrap();
        store.update_status(note.id, Status::Doing).unwrap();

        let fetched = store.get(note.id).unwrap();
        assert_eq!(fetched.status, Status::Doing);
        assert_eq!(fetched.content, "task #a");
        assert_eq!(fetched.tags, vec!["a"]);
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = create_test_store();

        let note = store.add("short-lived", None, &[]).unwrap();
        assert!(store.delete(note.id).unwrap());
        assert!(matches!(store.get(note.id), Err(StoreError::NotFound(_))));

        // Deleting an absent id succeeds without removing anything.
        assert!(!store.delete(note.id).unwrap());
    }

    #[test]
    fn test_list_recent_orders_by_updated_at() {
        let store = create_test_store();

        let a = store.add("a", None, &[]).unwrap();
        let b = store.add("b", None, &[]).unwrap();
        let c = store.add("c", None, &[]).unwrap();

        // Editing the oldest note makes it the most recent.
        store.update(a.id, "a edited", Status::Todo, &[]).unwrap();

        let recent = store.list_recent(10).unwrap();
        let ids: Vec<i64> = recent.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a.id, c.id, b.id]);
    }

    #[test]
    fn test_list_recent_coerces_limit() {
        let store = create_test_store();
        for i in 0..15 {
            store.add(&format!("note {i}"), None, &[]).unwrap();
        }

        assert_eq!(store.list_recent(0).unwrap().len(), 10);
        assert_eq!(store.list_recent(-3).unwrap().len(), 10);
        assert_eq!(store.list_recent(5).unwrap().len(), 5);
    }

    #[test]
    fn test_search_text_is_substring_and_case_sensitive() {
        let store = create_test_store();

        store.add("Fix bug #urgent", None, &[]).unwrap();
        store.add("Team lunch", None, &[]).unwrap();
        store.add("BUGFIX followup", None, &[]).unwrap();

        let hits = store.search_text("bug").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Fix bug #urgent");

        assert!(store.search_text("picnic").unwrap().is_empty());
    }

    #[test]
    fn test_list_by_status_orders_by_created_at() {
        let store = create_test_store();

        let a = store.add("a", None, &[]).unwrap();
        let b = store.add("b", None, &[]).unwrap();
        let c = store.add("c", None, &[]).unwrap();

        // Editing must not reorder the kanban column.
        store.update(b.id, "b edited", Status::Todo, &[]).unwrap();

        let column = store.list_by_status(Status::Todo).unwrap();
        let ids: Vec<i64> = column.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);

        assert!(store.list_by_status(Status::Done).unwrap().is_empty());
    }
}
