//! Embed command - generate embeddings for semantic search.

use anyhow::{bail, Result};
use clap::Args;
use console::Style;

use scrawl_search::{SearchEngine, BACKFILL_DELAY};

use super::Context;

/// Arguments for the embed command.
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Generate an embedding for a single note instead of all of them
    #[arg(short, long)]
    pub note: Option<i64>,
}

/// Run the embed command.
pub async fn run(args: EmbedArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();
    let green = Style::new().green();

    let provider = ctx.provider()?;
    if !provider.is_available().await {
        eprintln!(
            "Embedding provider is not reachable at {}",
            ctx.config.effective_base_url()
        );
        eprintln!(
            "{}",
            dim.apply_to(format!(
                "Start Ollama and pull the model: ollama pull {}",
                ctx.config.effective_model()
            ))
        );
        bail!("embedding provider unavailable");
    }

    let engine = SearchEngine::new(ctx.store.clone(), provider);

    match args.note {
        Some(id) => {
            engine.embed_note(id).await?;
            println!("{} Embedding generated for note {}", green.apply_to("✓"), id);
        }
        None => {
            println!("Generating embeddings for all notes without one...");
            let report = engine.backfill(BACKFILL_DELAY).await?;

            if ctx.json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} Backfill complete: {} generated, {} failed, {} already embedded",
                    green.apply_to("✓"),
                    report.generated,
                    report.failed,
                    report.skipped
                );
            }
        }
    }

    Ok(())
}
