//! Core note types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

/// Workflow status of a note.
///
/// Every note lives in exactly one of three kanban columns. The cycle is
/// closed: [`Status::advance`] walks todo → doing → done → todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    Doing,
    Done,
}

impl Status {
    /// All statuses in board order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    /// The canonical string form stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Advance to the next status in the workflow cycle.
    pub fn advance(self) -> Status {
        match self {
            Status::Todo => Status::Doing,
            Status::Doing => Status::Done,
            Status::Done => Status::Todo,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "doing" => Ok(Status::Doing),
            "done" => Ok(Status::Done),
            other => Err(StoreError::InvalidData(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Note
// ─────────────────────────────────────────────────────────────────────────────

/// A stored note.
///
/// Ids are assigned monotonically by the store and never reused. The
/// embedding is absent until generated; embedding writes do not count as
/// content edits and leave `updated_at` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Store statistics
// ─────────────────────────────────────────────────────────────────────────────

/// Row counts reported by [`crate::NoteStore::stats`].
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
    pub with_embedding: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cycle_is_closed() {
        for start in Status::ALL {
            let mut status = start;
            for _ in 0..3 {
                status = status.advance();
                assert!(Status::ALL.contains(&status));
            }
            // Three advances return to the original status.
            assert_eq!(status, start);
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert!("blocked".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_default_is_todo() {
        assert_eq!(Status::default(), Status::Todo);
    }
}
