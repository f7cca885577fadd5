//! Read the battle history
//!
//! Lists every recorded battle, oldest first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::{FileHistoryRepository, HistoryRepository};

use crate::dirs;

/// Read the battle history
#[derive(Parser)]
pub struct ReadHistory {
    /// Custom data directory (defaults to SAVE_DATA_DIR or the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Only show the last N battles
    #[arg(short, long)]
    last: Option<usize>,

    /// Full JSON output
    #[arg(long)]
    json: bool,
}

impl ReadHistory {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir);
        let repository = FileHistoryRepository::new(&data_dir)
            .with_context(|| format!("Failed to open save directory: {}", data_dir.display()))?;
        let records = repository.load().context("Failed to read battle history")?;

        let skip = self
            .last
            .map_or(0, |last| records.len().saturating_sub(last));
        let shown = &records[skip..];

        if self.json {
            let json = serde_json::to_string_pretty(shown).context("Failed to serialize history")?;
            println!("{json}");
            return Ok(());
        }

        if shown.is_empty() {
            println!("{}", style("No battles recorded yet").dim());
            return Ok(());
        }

        for record in shown {
            let outcome = if record.won {
                style("won ").green()
            } else {
                style("lost").red()
            };
            let enemies: Vec<String> = record
                .enemies
                .iter()
                .map(|enemy| format!("{} {}/{}", enemy.name, enemy.remaining_hp, enemy.max_hp))
                .collect();
            println!(
                "seed {:>6} act {} {:<5} {:<6} {} in {:>2} turns, hp {}/{}, dealt {}, taken {}  [{}]",
                record.seed,
                record.floor,
                record.node_id,
                record.room_type.as_ref(),
                outcome,
                record.turns,
                record.player_hp,
                record.player_max_hp,
                record.stats.damage_dealt,
                record.stats.damage_taken,
                enemies.join(", ")
            );
        }
        println!();
        println!(
            "{} {} battles, {} won",
            style("Total:").bold().cyan(),
            records.len(),
            records.iter().filter(|record| record.won).count()
        );
        Ok(())
    }
}
