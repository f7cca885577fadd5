//! Clean save data command
//!
//! Removes the files a run session leaves in the data directory:
//! - Run save (`run.json`)
//! - Battle history (`history.bin`)
//! - Debug log (`debug.log`)
//!
//! Safety: Always prompts for confirmation before deletion.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::dirs;

/// Clean save data, battle history and debug logs
#[derive(Parser, Debug)]
pub struct Clean {
    /// Custom data directory (defaults to SAVE_DATA_DIR or the platform location)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Clean only the run save
    #[arg(long)]
    pub save: bool,

    /// Clean only the battle history
    #[arg(long)]
    pub history: bool,

    /// Clean only the debug log
    #[arg(long)]
    pub logs: bool,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir.clone());

        // No flags means everything
        let all = !(self.save || self.history || self.logs);
        let candidates = [
            (self.save || all, "Run save", "run.json"),
            (self.history || all, "Battle history", "history.bin"),
            (self.logs || all, "Debug log", "debug.log"),
        ];

        let targets: Vec<(&str, PathBuf)> = candidates
            .into_iter()
            .filter(|(selected, _, _)| *selected)
            .map(|(_, label, file)| (label, data_dir.join(file)))
            .filter(|(_, path)| path.exists())
            .collect();

        if targets.is_empty() {
            println!("{}", style("Nothing to clean - no save data yet").dim());
            return Ok(());
        }

        println!("{}", style("Clean Run Data").yellow().bold());
        println!();
        println!("The following will be deleted:");
        for (label, path) in &targets {
            println!("  {} {}", style("->").cyan(), style(label).bold());
            println!("    {}", style(path.display()).dim());
        }
        println!();

        if !self.yes && !self.confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for (label, path) in targets {
            print!("Deleting {}... ", label);
            io::stdout().flush()?;

            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to delete: {}", path.display()))?;

            println!("{}", style("ok").green());
        }

        println!();
        println!("{}", style("Cleanup complete!").green().bold());

        Ok(())
    }

    /// Prompt user for confirmation
    fn confirm(&self) -> Result<bool> {
        print!("{} ", style("Proceed? [y/N]").yellow().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }
}
