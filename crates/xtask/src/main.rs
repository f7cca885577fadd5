//! Development tasks for the deckrun project
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, ReadHistory, ReadSave, Replay, Simulate};
use tracing_subscriber::EnvFilter;

/// Development tasks for the deckrun project
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for deckrun", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play seeded runs headlessly with the greedy provider
    Simulate(Simulate),

    /// Replay a recorded action log and verify its digest
    Replay(Replay),

    /// Read and inspect the run save
    ReadSave(ReadSave),

    /// Read the battle history
    ReadHistory(ReadHistory),

    /// Clean save data
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAVE_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Replay(cmd) => cmd.execute(),
        Command::ReadSave(cmd) => cmd.execute(),
        Command::ReadHistory(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
