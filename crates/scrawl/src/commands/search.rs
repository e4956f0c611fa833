//! Search command - two-tier note search.

use anyhow::Result;
use clap::Args;
use console::{style, Style};

use scrawl_search::{SearchEngine, SearchResults};

use super::{print_notes, status_style, truncate, Context};

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Maximum results to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,
}

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let engine = SearchEngine::new(ctx.store.clone(), ctx.provider()?);
    let results = engine.search(&args.query, args.limit).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    if results.is_empty() {
        println!("No notes found for \"{}\"", args.query);
        return Ok(());
    }

    match results {
        SearchResults::Semantic(hits) => {
            println!(
                "{} {}",
                style("Search Results").bold(),
                dim.apply_to("(semantic)")
            );
            println!("{}", dim.apply_to("─".repeat(50)));
            for hit in &hits {
                println!(
                    "{} {:<5} {}  {}",
                    dim.apply_to(format!("[{}]", hit.note.id)),
                    status_style(hit.note.status).apply_to(hit.note.status.as_str()),
                    truncate(&hit.note.content, 60),
                    dim.apply_to(format!("{:.2}", hit.score)),
                );
            }
        }
        SearchResults::Text(notes) => {
            println!(
                "{} {}",
                style("Search Results").bold(),
                dim.apply_to("(text)")
            );
            println!("{}", dim.apply_to("─".repeat(50)));
            print_notes(&notes);
        }
    }

    Ok(())
}
