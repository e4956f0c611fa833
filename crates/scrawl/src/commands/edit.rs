//! Edit command - replace a note's content.

use anyhow::Result;
use clap::Args;
use console::Style;

use scrawl_store::parse_tags;

use super::Context;

/// Arguments for the edit command.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Note ID
    pub id: i64,

    /// New note content; tags are re-derived from it
    pub content: String,
}

/// Run the edit command.
pub async fn run(args: EditArgs, ctx: &Context) -> Result<()> {
    // Status is preserved across edits; only content and tags change.
    let note = ctx.store.get(args.id)?;
    let tags = parse_tags(&args.content);
    ctx.store.update(args.id, &args.content, note.status, &tags)?;

    if ctx.json_output {
        let updated = ctx.store.get(args.id)?;
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        let green = Style::new().green();
        println!("{} Note {} updated", green.apply_to("✓"), args.id);
    }

    Ok(())
}
