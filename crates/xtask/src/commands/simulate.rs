//! Headless seeded runs
//!
//! Plays whole runs with the greedy provider and prints one summary line per
//! seed. Optionally writes the action recording for later replay.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_core::GameConfig;
use runtime::{
    GreedyProvider, Persistence, Recording, RunSession, RuntimeConfig, SessionEvent, drive,
};

/// Play seeded runs headlessly
#[derive(Parser, Debug)]
pub struct Simulate {
    /// First seed to play
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Number of consecutive seeds to play
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: u64,

    /// Number of acts (defaults to RUN_MAX_FLOOR or 2)
    #[arg(long)]
    pub max_floor: Option<u32>,

    /// Rows per act map (defaults to RUN_MAP_ROWS or 15)
    #[arg(long)]
    pub map_rows: Option<u32>,

    /// Stop a run after this many actions
    #[arg(long, default_value_t = 20_000)]
    pub max_steps: usize,

    /// Write the recording of the first seed to this file
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Persist saves, history and debug log as configured by the environment
    #[arg(long)]
    pub persist: bool,

    /// Print the full event log of every run
    #[arg(short, long)]
    pub verbose: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let runtime_config = RuntimeConfig::from_env();
        let mut game_config = runtime_config.game_config.clone();
        if let Some(max_floor) = self.max_floor {
            game_config = GameConfig::with_max_floor(max_floor).map_rows(game_config.map_rows);
        }
        if let Some(rows) = self.map_rows {
            game_config = game_config.map_rows(rows);
        }

        let mut wins = 0u64;
        for seed in self.seed..self.seed.saturating_add(self.count) {
            let persistence = if self.persist {
                Persistence::from_config(&runtime_config)
                    .context("Failed to open the save directory")?
            } else {
                Persistence::disabled()
            };

            let mut session = RunSession::new(seed, &game_config, persistence);
            let steps = drive(&mut session, &mut GreedyProvider, self.max_steps)
                .with_context(|| format!("Run with seed {seed} rejected a greedy action"))?;

            if self.verbose {
                for event in session.log() {
                    println!("{event}");
                }
            }

            let run = session.run();
            if run.won {
                wins += 1;
            }
            let outcome = match (run.is_over, run.won) {
                (true, true) => style("won ").green().bold(),
                (true, false) => style("lost").red().bold(),
                (false, _) => style("open").yellow().bold(),
            };
            let battles = session
                .log()
                .iter()
                .filter(|event| matches!(event, SessionEvent::NodeEntered { room_type, .. } if room_type.is_combat()))
                .count();
            println!(
                "seed {:>6}  {}  act {} node {:<5}  hp {:>3}/{:<3}  gold {:>4}  deck {:>2}  battles {:>2}  steps {:>5}  {}",
                seed,
                outcome,
                run.floor,
                run.current_node.as_deref().unwrap_or("-"),
                run.player.current_hp,
                run.player.max_hp,
                run.gold,
                run.deck.len(),
                battles,
                steps,
                style(&session.digest()?[..16]).dim()
            );

            if seed == self.seed
                && let Some(path) = &self.record
            {
                let recording = Recording::from_session(&session)?;
                std::fs::write(path, recording.to_json()?)
                    .with_context(|| format!("Failed to write recording: {}", path.display()))?;
                println!("{} {}", style("Recording written to").dim(), path.display());
            }
        }

        if self.count > 1 {
            println!();
            println!(
                "{} {}/{} runs won",
                style("Summary:").bold().cyan(),
                wins,
                self.count
            );
        }
        Ok(())
    }
}
