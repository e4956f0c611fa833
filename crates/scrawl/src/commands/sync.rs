//! Sync command - external sync placeholder.

use anyhow::Result;
use clap::Args;
use console::{style, Style};

use super::Context;

/// Arguments for the sync command.
#[derive(Args, Debug)]
pub struct SyncArgs {}

/// Run the sync command.
pub async fn run(_args: SyncArgs, _ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();

    println!("{}", style("Sync").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!("{}", dim.apply_to("Syncing with external services is not yet implemented."));

    Ok(())
}
