//! Stats command - store statistics.

use anyhow::Result;
use clap::Args;
use console::{style, Style};

use scrawl_store::Status;

use super::{status_style, Context};

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Run the stats command.
pub async fn run(_args: StatsArgs, ctx: &Context) -> Result<()> {
    let stats = ctx.store.stats()?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("{}", style("Store").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!("  notes      {}", stats.total);
    println!(
        "  {:<9}  {}",
        status_style(Status::Todo).apply_to("todo"),
        stats.todo
    );
    println!(
        "  {:<9}  {}",
        status_style(Status::Doing).apply_to("doing"),
        stats.doing
    );
    println!(
        "  {:<9}  {}",
        status_style(Status::Done).apply_to("done"),
        stats.done
    );
    println!("  embedded   {}", stats.with_embedding);

    Ok(())
}
