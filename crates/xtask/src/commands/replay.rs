//! Replay a recorded action log
//!
//! Re-runs a recording through the current core and checks that the event
//! log digest still matches the one captured when it was recorded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::{Recording, SessionError, replay};

/// Replay a recorded action log and verify its digest
#[derive(Parser, Debug)]
pub struct Replay {
    /// Recording file written by `simulate --record`
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the replayed event log
    #[arg(short, long)]
    pub verbose: bool,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let raw = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read recording: {}", self.file.display()))?;
        let recording = Recording::from_json(&raw)
            .with_context(|| format!("Failed to decode recording: {}", self.file.display()))?;

        println!(
            "{} seed {}, {} actions",
            style("Replaying").bold().cyan(),
            recording.seed,
            recording.actions.len()
        );

        let session = replay(&recording).context("Replay rejected a recorded action")?;
        if self.verbose {
            for event in session.log() {
                println!("{event}");
            }
        }

        let actual = session.digest()?;
        match &recording.digest {
            Some(expected) if *expected != actual => {
                println!("{} digest mismatch", style("✗").red().bold());
                Err(SessionError::ReplayDiverged {
                    expected: expected.clone(),
                    actual,
                }
                .into())
            }
            Some(_) => {
                println!("{} digest matches {}", style("✓").green().bold(), actual);
                Ok(())
            }
            None => {
                println!("{} no digest recorded, replayed digest {}", style("?").yellow(), actual);
                Ok(())
            }
        }
    }
}
