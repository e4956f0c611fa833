//! Command implementations for the scrawl CLI.

pub mod add;
pub mod board;
pub mod delete;
pub mod edit;
pub mod embed;
pub mod list;
pub mod search;
pub mod stats;
pub mod sync;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::Style;

use scrawl_config::ScrawlConfig;
use scrawl_search::{OllamaConfig, OllamaProvider, SharedProvider};
use scrawl_store::{Note, NoteStore, Status};

/// Shared context passed to all commands.
///
/// The store is opened once at startup and injected here; commands never
/// construct their own handles.
pub struct Context {
    pub store: Arc<NoteStore>,
    pub config: ScrawlConfig,
    pub json_output: bool,
    pub verbose: bool,
}

impl Context {
    /// Build the embedding provider from the effective configuration.
    pub fn provider(&self) -> Result<SharedProvider> {
        let config = OllamaConfig::default()
            .with_base_url(self.config.effective_base_url())
            .with_model(self.config.effective_model())
            .with_timeout(Duration::from_secs(self.config.embedding.timeout_secs));
        Ok(Arc::new(OllamaProvider::new(config)?))
    }
}

/// Accent style for a status, keyed exhaustively by the enum.
pub fn status_style(status: Status) -> Style {
    match status {
        Status::Todo => Style::new().yellow(),
        Status::Doing => Style::new().cyan(),
        Status::Done => Style::new().green(),
    }
}

/// Print a list of notes with status, age, and tags.
pub fn print_notes(notes: &[Note]) {
    let dim = Style::new().dim();

    for note in notes {
        let tags = if note.tags.is_empty() {
            String::new()
        } else {
            format!("  #{}", note.tags.join(" #"))
        };
        println!(
            "{} {:<5} {}{}  {}",
            dim.apply_to(format!("[{}]", note.id)),
            status_style(note.status).apply_to(note.status.as_str()),
            truncate(&note.content, 60),
            dim.apply_to(tags),
            dim.apply_to(format_relative_time(note.updated_at)),
        );
    }
}

/// Format a timestamp relative to now.
pub fn format_relative_time(t: DateTime<Utc>) -> String {
    let delta = Utc::now().signed_duration_since(t);

    if delta.num_seconds() < 60 {
        "just now".to_string()
    } else if delta.num_minutes() < 60 {
        format!("{}m ago", delta.num_minutes())
    } else if delta.num_hours() < 24 {
        format!("{}h ago", delta.num_hours())
    } else if delta.num_days() < 7 {
        format!("{}d ago", delta.num_days())
    } else {
        t.format("%b %e, %Y").to_string()
    }
}

/// Collapse newlines and cap display width.
pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_len {
        s
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now), "just now");
        assert_eq!(
            format_relative_time(now - ChronoDuration::minutes(5)),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(now - ChronoDuration::hours(3)),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(now - ChronoDuration::days(2)),
            "2d ago"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("multi\nline", 10), "multi line");
        assert_eq!(truncate("a very long line indeed", 10), "a very ...");
    }
}
