//! Add command - create a note.

use anyhow::Result;
use clap::Args;
use console::Style;

use scrawl_store::{parse_tags, Status};

use super::Context;

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Note content; words starting with # become tags
    pub content: String,

    /// Initial workflow status (todo, doing, done)
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<Status>,
}

fn parse_status(s: &str) -> Result<Status, String> {
    s.parse::<Status>().map_err(|e| e.to_string())
}

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let tags = parse_tags(&args.content);
    let note = ctx.store.add(&args.content, args.status, &tags)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        let green = Style::new().green();
        let dim = Style::new().dim();
        println!(
            "{} Note added: {}",
            green.apply_to("✓"),
            dim.apply_to(format!("[{}]", note.id))
        );
        if !note.tags.is_empty() {
            println!("{}", dim.apply_to(format!("Tags: {}", note.tags.join(", "))));
        }
    }

    Ok(())
}
