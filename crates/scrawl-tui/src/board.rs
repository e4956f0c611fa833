//! Kanban board state machine.
//!
//! Holds the three status partitions and a 2-D cursor over them. All state
//! here is a transient view: every mutation persists through the store and
//! then reloads the partitions wholesale, so the board never drifts from
//! what is on disk by more than one explicit reload.

use std::sync::Arc;

use scrawl_store::{Note, NoteStore, Status};

/// Number of kanban columns (one per [`Status`]).
pub const COLUMN_COUNT: usize = Status::ALL.len();

/// Kanban board over the note store.
pub struct Board {
    store: Arc<NoteStore>,
    columns: [Vec<Note>; COLUMN_COUNT],
    /// Selected column index, always in `0..COLUMN_COUNT`.
    pub selected_column: usize,
    /// Selected row, clamped to the selected column's length.
    pub selected_row: usize,
    /// Storage error from the last move/refresh, shown on the next render.
    pub last_error: Option<String>,
    /// Set by the key handler to end the session loop.
    pub should_quit: bool,
}

impl Board {
    /// Create an empty board over an injected store.
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self {
            store,
            columns: Default::default(),
            selected_column: 0,
            selected_row: 0,
            last_error: None,
            should_quit: false,
        }
    }

    /// Load all three partitions from the store.
    ///
    /// Used at startup, where a storage failure is fatal for the session.
    pub fn load(&mut self) -> scrawl_store::Result<()> {
        for (idx, status) in Status::ALL.iter().enumerate() {
            self.columns[idx] = self.store.list_by_status(*status)?;
        }
        self.clamp_row();
        Ok(())
    }

    /// Reload all three partitions, capturing any failure for the next
    /// render instead of ending the session.
    pub fn refresh(&mut self) {
        self.last_error = None;
        if let Err(e) = self.load() {
            tracing::warn!("Board refresh failed: {}", e);
            self.last_error = Some(e.to_string());
        }
    }

    /// Notes in the given column.
    pub fn column(&self, idx: usize) -> &[Note] {
        &self.columns[idx]
    }

    /// The note under the cursor, if the selected column is non-empty.
    pub fn selected_note(&self) -> Option<&Note> {
        self.columns[self.selected_column].get(self.selected_row)
    }

    /// Move the cursor one column left; row selection resets.
    pub fn move_left(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.selected_row = 0;
        }
    }

    /// Move the cursor one column right; row selection resets.
    pub fn move_right(&mut self) {
        if self.selected_column < COLUMN_COUNT - 1 {
            self.selected_column += 1;
            self.selected_row = 0;
        }
    }

    /// Move the cursor up within the current column.
    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    /// Move the cursor down within the current column.
    pub fn move_down(&mut self) {
        let len = self.columns[self.selected_column].len();
        if len > 0 && self.selected_row < len - 1 {
            self.selected_row += 1;
        }
    }

    /// Advance the selected note to the next status in the cycle and
    /// reload the board.
    ///
    /// After the reload the cursor is re-clamped; it does not follow the
    /// moved note into its new column.
    pub fn advance_selected(&mut self) {
        let Some(note) = self.selected_note() else {
            return;
        };
        let id = note.id;
        let next = note.status.advance();

        self.last_error = None;
        if let Err(e) = self.store.update_status(id, next) {
            tracing::warn!("Failed to move note {}: {}", id, e);
            self.last_error = Some(e.to_string());
            return;
        }
        self.refresh();
    }

    /// Clamp the row cursor to the current column's bounds.
    fn clamp_row(&mut self) {
        let len = self.columns[self.selected_column].len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_notes() -> (Arc<NoteStore>, Board) {
        let store = Arc::new(NoteStore::open_in_memory().unwrap());
        store.add("todo one", None, &[]).unwrap();
        store.add("todo two", None, &[]).unwrap();
        store.add("doing one", Some(Status::Doing), &[]).unwrap();

        let mut board = Board::new(store.clone());
        board.load().unwrap();
        (store, board)
    }

    #[test]
    fn test_load_partitions() {
        let (_store, board) = board_with_notes();
        assert_eq!(board.column(0).len(), 2);
        assert_eq!(board.column(1).len(), 1);
        assert_eq!(board.column(2).len(), 0);
    }

    #[test]
    fn test_column_navigation_clamps_and_resets_row() {
        let (_store, mut board) = board_with_notes();

        board.move_left();
        assert_eq!(board.selected_column, 0);

        board.move_down();
        assert_eq!(board.selected_row, 1);

        board.move_right();
        assert_eq!(board.selected_column, 1);
        assert_eq!(board.selected_row, 0);

        board.move_right();
        board.move_right();
        assert_eq!(board.selected_column, 2);
    }

    #[test]
    fn test_row_navigation_clamps() {
        let (_store, mut board) = board_with_notes();

        board.move_up();
        assert_eq!(board.selected_row, 0);

        board.move_down();
        board.move_down();
        assert_eq!(board.selected_row, 1);

        // Empty column: the cursor stays put.
        board.move_right();
        board.move_right();
        board.move_down();
        assert_eq!(board.selected_row, 0);
        assert!(board.selected_note().is_none());
    }

    #[test]
    fn test_advance_cycles_through_all_statuses() {
        let store = Arc::new(NoteStore::open_in_memory().unwrap());
        let note = store.add("solo", None, &[]).unwrap();
        let mut board = Board::new(store.clone());
        board.load().unwrap();

        // todo -> doing
        board.advance_selected();
        assert_eq!(store.get(note.id).unwrap().status, Status::Doing);
        assert!(board.column(0).is_empty());
        assert_eq!(board.column(1).len(), 1);

        // doing -> done
        board.selected_column = 1;
        board.selected_row = 0;
        board.advance_selected();
        assert_eq!(store.get(note.id).unwrap().status, Status::Done);

        // done -> todo: three moves close the cycle.
        board.selected_column = 2;
        board.selected_row = 0;
        board.advance_selected();
        assert_eq!(store.get(note.id).unwrap().status, Status::Todo);
    }

    #[test]
    fn test_advance_on_empty_column_is_noop() {
        let (store, mut board) = board_with_notes();

        board.move_right();
        board.move_right();
        board.advance_selected();

        assert!(board.last_error.is_none());
        assert_eq!(store.stats().unwrap().done, 0);
    }

    #[test]
    fn test_cursor_reclamps_after_move() {
        let (_store, mut board) = board_with_notes();

        // Select the last todo note, then move it away; the column shrinks
        // under the cursor.
        board.move_down();
        assert_eq!(board.selected_row, 1);
        board.advance_selected();

        assert_eq!(board.column(0).len(), 1);
        assert_eq!(board.selected_row, 0);
    }

    #[test]
    fn test_refresh_picks_up_external_edits() {
        let (store, mut board) = board_with_notes();

        store.add("late arrival", None, &[]).unwrap();
        board.refresh();

        assert_eq!(board.column(0).len(), 3);
        assert!(board.last_error.is_none());
    }
}
