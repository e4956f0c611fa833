//! Board command - interactive kanban session.

use anyhow::Result;
use clap::Args;

use super::Context;

/// Arguments for the board command.
#[derive(Args, Debug)]
pub struct BoardArgs {}

/// Run the board command.
pub async fn run(_args: BoardArgs, ctx: &Context) -> Result<()> {
    scrawl_tui::run(ctx.store.clone()).await
}
