//! Board rendering.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use scrawl_store::Status;

use crate::board::{Board, COLUMN_COUNT};

/// Header text for a column. Exhaustive over [`Status`]: a new status will
/// not compile until it gets a label.
fn column_label(status: Status) -> &'static str {
    match status {
        Status::Todo => "TODO",
        Status::Doing => "DOING",
        Status::Done => "DONE",
    }
}

/// Accent color for a column, keyed by status.
fn column_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Yellow,
        Status::Doing => Color::Cyan,
        Status::Done => Color::Green,
    }
}

/// Render the whole board.
pub fn render(frame: &mut Frame, board: &Board) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Min(5),    // Columns
        Constraint::Length(2), // Footer / error line
    ])
    .split(frame.area());

    render_title(frame, chunks[0]);
    render_columns(board, frame, chunks[1]);
    render_footer(board, frame, chunks[2]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        " scrawl board",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, area);
}

fn render_columns(board: &Board, frame: &mut Frame, area: Rect) {
    let chunks = Layout::horizontal([Constraint::Ratio(1, COLUMN_COUNT as u32); COLUMN_COUNT])
        .split(area);

    for (idx, status) in Status::ALL.iter().enumerate() {
        render_column(board, *status, idx, frame, chunks[idx]);
    }
}

fn render_column(board: &Board, status: Status, idx: usize, frame: &mut Frame, area: Rect) {
    let notes = board.column(idx);
    let selected = idx == board.selected_column;

    let border_style = if selected {
        Style::default().fg(column_color(status))
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ({}) ", column_label(status), notes.len()),
            Style::default()
                .fg(column_color(status))
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_rows = inner.height as usize;
    let mut lines = Vec::new();
    for (row, note) in notes.iter().enumerate() {
        if row + 1 == visible_rows && notes.len() > visible_rows {
            lines.push(Line::from(Span::styled(
                "…",
                Style::default().fg(Color::DarkGray),
            )));
            break;
        }

        let text = truncate(
            &format!("#{} {}", note.id, note.content),
            inner.width.saturating_sub(1) as usize,
        );
        let style = if selected && row == board.selected_row {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_footer(board: &Board, frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();

    if let Some(error) = &board.last_error {
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        " h/l move columns · j/k select · enter/space advance · r refresh · q quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn truncate(s: &str, max_width: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_width {
        s
    } else {
        let kept: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
