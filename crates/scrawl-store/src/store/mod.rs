//! Note store implementation using SQLite.
//!
//! A single `notes` table holds all persisted state. The store is the sole
//! owner of that state; search and the kanban board only hold transient
//! views fetched through it.

mod embedding_ops;
mod note_ops;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::types::{Status, StoreStats};

// ─────────────────────────────────────────────────────────────────────────────
// Schema Version
// ─────────────────────────────────────────────────────────────────────────────

/// Current schema version for migrations.
const SCHEMA_VERSION: i32 = 1;

/// Default row cap for recency listings when the caller passes a
/// non-positive limit.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Note Store
// ─────────────────────────────────────────────────────────────────────────────

/// Note store backed by SQLite.
///
/// Uses WAL mode for better concurrent read performance. There is exactly
/// one writer per process; the connection mutex is the only lock.
pub struct NoteStore {
    /// The SQLite connection (wrapped in Mutex for thread safety).
    pub(crate) conn: Mutex<Connection>,
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore").finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Initialization
// ─────────────────────────────────────────────────────────────────────────────

impl NoteStore {
    /// Open or create a note store at the given path.
    ///
    /// Creates the parent directory and database file if they don't exist
    /// and ensures the schema is current. Any failure here is fatal for the
    /// process.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Init(format!(
                        "cannot create data directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )
        .map_err(|e| StoreError::Init(format!("cannot open {}: {e}", path.display())))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        info!("Note store opened at {:?}", path);
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        debug!("In-memory store created");
        Ok(store)
    }

    /// Initialize the database with schema and pragmas.
    fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        // Enable WAL mode for better concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        // SQLite LIKE is case-insensitive by default; text search here is
        // an exact-case substring match.
        conn.pragma_update(None, "case_sensitive_like", true)?;

        self.create_schema(&conn)?;

        Ok(())
    }

    /// Create the database schema.
    fn create_schema(&self, conn: &Connection) -> Result<()> {
        let current_version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap_or(0);

        if current_version >= SCHEMA_VERSION {
            debug!("Schema up to date (version {})", current_version);
            return Ok(());
        }

        conn.execute_batch(
            r#"
            -- Notes table: all persisted note state
            CREATE TABLE IF NOT EXISTS notes (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                content    TEXT NOT NULL,
                status     TEXT NOT NULL DEFAULT 'todo',
                tags       TEXT NOT NULL DEFAULT '[]',
                embedding  TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            -- Index for kanban column queries
            CREATE INDEX IF NOT EXISTS idx_notes_status
                ON notes(status);

            -- Index for recency ordering
            CREATE INDEX IF NOT EXISTS idx_notes_updated_at
                ON notes(updated_at);

            -- Index supporting substring search
            CREATE INDEX IF NOT EXISTS idx_notes_content
                ON notes(content);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        info!("Schema created (version {})", SCHEMA_VERSION);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

impl NoteStore {
    /// Get row counts per status plus the embedding coverage.
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn.lock().unwrap();

        let count_status = |status: Status| -> Result<usize> {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM notes WHERE status = ?1",
                [status.as_str()],
                |row| row.get(0),
            )?;
            Ok(n as usize)
        };

        let todo = count_status(Status::Todo)?;
        let doing = count_status(Status::Doing)?;
        let done = count_status(Status::Done)?;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        let with_embedding: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE embedding IS NOT NULL AND embedding != ''",
            [],
            |row| row.get(0),
        )?;

        Ok(StoreStats {
            total: total as usize,
            todo,
            doing,
            done,
            with_embedding: with_embedding as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let store = NoteStore::open_in_memory().unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.with_embedding, 0);
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notes.db");
        let store = NoteStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.stats().unwrap().total, 0);
    }

    #[test]
    fn test_reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.db");
        {
            let store = NoteStore::open(&path).unwrap();
            store.add("persisted", None, &[]).unwrap();
        }
        let store = NoteStore::open(&path).unwrap();
        assert_eq!(store.stats().unwrap().total, 1);
    }

    #[test]
    fn test_stats_counts_by_status() {
        let store = NoteStore::open_in_memory().unwrap();
        store.add("a", None, &[]).unwrap();
        store.add("b", Some(Status::Doing), &[]).unwrap();
        store.add("c", Some(Status::Done), &[]).unwrap();
        store.add("d", Some(Status::Done), &[]).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.doing, 1);
        assert_eq!(stats.done, 2);
    }
}
