//! Delete command - remove a note.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;
use console::Style;

use super::Context;

/// Arguments for the delete command.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Note ID
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Run the delete command.
pub async fn run(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();

    if ctx.verbose {
        if let Ok(note) = ctx.store.get(args.id) {
            println!("{}", dim.apply_to(&note.content));
        }
    }

    if !args.yes && !confirm(args.id)? {
        println!("{}", dim.apply_to("Deletion cancelled"));
        return Ok(());
    }

    // Deleting an unknown id is not an error; the store just reports that
    // nothing was removed.
    let removed = ctx.store.delete(args.id)?;

    if removed {
        let green = Style::new().green();
        println!("{} Note {} deleted", green.apply_to("✓"), args.id);
    } else {
        println!("{}", dim.apply_to(format!("No note with id {}", args.id)));
    }

    Ok(())
}

fn confirm(id: i64) -> Result<bool> {
    print!("Delete note {id}? This cannot be undone. (y/N): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
