//! List command - recent notes.

use anyhow::Result;
use clap::Args;
use console::{style, Style};

use super::{print_notes, Context};

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum notes to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: i64,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let notes = ctx.store.list_recent(args.limit)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    if notes.is_empty() {
        println!(
            "No notes yet. Add your first one with: {}",
            style("scrawl add \"Your note #tag\"").bold()
        );
        return Ok(());
    }

    println!("{}", style("Recent Notes").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    print_notes(&notes);

    Ok(())
}
