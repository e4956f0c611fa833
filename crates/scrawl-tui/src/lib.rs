//! Terminal kanban board for scrawl.
//!
//! A minimal, keyboard-driven board over the three workflow columns. The
//! session loop runs until the user quits; every move is persisted through
//! the store before the next input is accepted.

pub mod board;
pub mod events;
pub mod ui;

use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use scrawl_store::NoteStore;

pub use board::Board;
pub use events::{Event, EventHandler};

/// Terminal type alias for convenience.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Install a panic hook that restores the terminal before panicking.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Run the kanban board session loop until the user quits.
pub async fn run(store: Arc<NoteStore>) -> Result<()> {
    let mut board = Board::new(store);
    // A storage failure before the first render is fatal; afterwards,
    // failures surface through the footer instead.
    board.load()?;

    install_panic_hook();
    let mut terminal = init_terminal()?;
    let mut events = EventHandler::new();

    let result = session_loop(&mut board, &mut terminal, &mut events).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn session_loop(
    board: &mut Board,
    terminal: &mut Tui,
    events: &mut EventHandler,
) -> Result<()> {
    while !board.should_quit {
        terminal.draw(|frame| ui::render(frame, board))?;

        match events.next().await? {
            Event::Key(key) => handle_key(board, key),
            Event::Resize(_, _) | Event::Tick => {}
        }
    }
    Ok(())
}

/// Translate a key press into a board action.
fn handle_key(board: &mut Board, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => board.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            board.should_quit = true;
        }
        KeyCode::Left | KeyCode::Char('h') => board.move_left(),
        KeyCode::Right | KeyCode::Char('l') => board.move_right(),
        KeyCode::Up | KeyCode::Char('k') => board.move_up(),
        KeyCode::Down | KeyCode::Char('j') => board.move_down(),
        KeyCode::Enter | KeyCode::Char(' ') => board.advance_selected(),
        KeyCode::Char('r') => board.refresh(),
        _ => {}
    }
}
