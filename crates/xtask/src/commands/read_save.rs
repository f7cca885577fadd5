//! Read and inspect the run save
//!
//! Decodes `run.json` through the same path the game uses, so version and
//! content errors show up exactly as a player would hit them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_core::{RunSnapshot, RunState};
use runtime::{FileSaveRepository, SaveRepository};

use crate::dirs;

/// Read and inspect the run save
#[derive(Parser)]
pub struct ReadSave {
    /// Custom data directory (defaults to SAVE_DATA_DIR or the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (act, HP, gold, deck, relics)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format of the restored run
    Debug,
}

impl ReadSave {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir);
        let repository = FileSaveRepository::new(&data_dir)
            .with_context(|| format!("Failed to open save directory: {}", data_dir.display()))?;

        let Some(snapshot) = repository.load().context("Failed to load the run save")? else {
            println!(
                "{} {}",
                style("No save found in").dim(),
                data_dir.display()
            );
            return Ok(());
        };

        println!(
            "{} {}",
            style("Save File:").bold().cyan(),
            repository.path().display()
        );
        println!("{} {}", style("Version:").bold().cyan(), snapshot.version);
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&snapshot),
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&snapshot).context("Failed to serialize save")?;
                println!("{json}");
            }
            OutputFormat::Debug => {
                let run = RunState::restore(&snapshot).context("Save references unknown content")?;
                println!("{run:#?}");
            }
        }

        Ok(())
    }
}

fn print_summary(snapshot: &RunSnapshot) {
    println!("{}", style("=== Run Summary ===").bold().green());
    println!();

    println!("{}", style("Progress:").bold().yellow());
    println!("  Seed: {}", snapshot.seed);
    println!("  Act: {}/{}", snapshot.floor, snapshot.max_floor);
    println!(
        "  Current Node: {}",
        snapshot.current_node_id.as_deref().unwrap_or("-")
    );
    let completed = snapshot.map.iter().filter(|node| node.completed).count();
    println!("  Nodes Completed: {}/{}", completed, snapshot.map.len());
    let status = match (snapshot.is_over, snapshot.won) {
        (true, true) => "won",
        (true, false) => "lost",
        (false, _) => "in progress",
    };
    println!("  Status: {status}");
    println!();

    println!("{}", style("Player:").bold().yellow());
    println!(
        "  HP: {}/{}",
        snapshot.player.current_hp, snapshot.player.max_hp
    );
    println!("  Gold: {}", snapshot.gold);
    for (status, stacks) in &snapshot.player.statuses {
        println!("  {status}: {stacks}");
    }
    println!();

    println!(
        "{} ({})",
        style("Deck:").bold().yellow(),
        snapshot.deck.len()
    );
    for entry in &snapshot.deck {
        println!("  {} ({})", entry.id, entry.card_id);
    }
    println!();

    println!("{}", style("Relics:").bold().yellow());
    for relic in &snapshot.relics {
        println!("  {relic}");
    }
    if !snapshot.consumables.is_empty() {
        println!("{}", style("Consumables:").bold().yellow());
        for consumable in &snapshot.consumables {
            println!("  {consumable}");
        }
    }
}
