//! scrawl - terminal note-taking with a kanban workflow and semantic search.
//!
//! Main entry point for the scrawl CLI.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use scrawl_config::ScrawlConfig;
use scrawl_store::NoteStore;

mod commands;

use commands::{add, board, delete, edit, embed, list, search, stats, sync, Context};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// scrawl - terminal note-taking with a kanban workflow and semantic search
#[derive(Parser)]
#[command(name = "scrawl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new note
    #[command(alias = "a")]
    Add(add::AddArgs),

    /// List recent notes
    #[command(aliases = ["ls", "l"])]
    List(list::ListArgs),

    /// Search notes, semantically when possible
    #[command(alias = "s")]
    Search(search::SearchArgs),

    /// Edit a note's content
    Edit(edit::EditArgs),

    /// Delete a note
    #[command(aliases = ["del", "rm"])]
    Delete(delete::DeleteArgs),

    /// Generate embeddings for semantic search
    Embed(embed::EmbedArgs),

    /// Open the interactive kanban board
    #[command(aliases = ["kanban", "kb"])]
    Board(board::BoardArgs),

    /// Show store statistics
    Stats(stats::StatsArgs),

    /// Sync with external services (placeholder)
    Sync(sync::SyncArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the appender guard alive for the whole process.
    let _guard = init_tracing(cli.verbose);

    let config = ScrawlConfig::load()?;
    let db_path = config.effective_db_path();
    tracing::debug!("Using database at {}", db_path.display());

    // The store is constructed once and injected everywhere; a failure here
    // is fatal.
    let store = Arc::new(NoteStore::open(db_path)?);

    let ctx = Context {
        store,
        config,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Some(Commands::Add(args)) => add::run(args, &ctx).await,
        Some(Commands::List(args)) => list::run(args, &ctx).await,
        Some(Commands::Search(args)) => search::run(args, &ctx).await,
        Some(Commands::Edit(args)) => edit::run(args, &ctx).await,
        Some(Commands::Delete(args)) => delete::run(args, &ctx).await,
        Some(Commands::Embed(args)) => embed::run(args, &ctx).await,
        Some(Commands::Board(args)) => board::run(args, &ctx).await,
        Some(Commands::Stats(args)) => stats::run(args, &ctx).await,
        Some(Commands::Sync(args)) => sync::run(args, &ctx).await,
        // Bare invocation shows the most recent notes.
        None => list::run(list::ListArgs::default(), &ctx).await,
    }
}

/// Initialize tracing — console (human-readable, stderr) + rotating JSON file.
fn init_tracing(verbose: bool) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::prelude::*;

    let filter = if verbose {
        "scrawl=debug,scrawl_store=debug,scrawl_search=debug,scrawl_tui=debug,info"
    } else {
        "scrawl=warn,scrawl_store=warn,scrawl_search=warn,scrawl_tui=warn,warn"
    };

    let log_dir = dirs::data_dir()
        .map(|d| d.join("scrawl").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "scrawl.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "scrawl=debug,scrawl_store=debug,scrawl_search=debug,scrawl_tui=debug,info",
                )),
        )
        .init();

    guard
}
