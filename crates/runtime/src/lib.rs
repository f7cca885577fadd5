//! Run orchestration above the deterministic core.
//!
//! This crate drives a [`game_core::RunState`] through a whole run: it routes
//! player decisions to battles, rewards, shops, rest sites and events, keeps a
//! replayable action log, and writes saves, battle history and a debug log
//! through the repository contracts.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the run session, its event log and replay
//! - [`provider`] supplies decisions (interactive or automatic)
//! - [`repository`] provides the persistence contracts and adapters
//! - [`config`] loads runtime settings from the environment
pub mod config;
pub mod error;
pub mod provider;
pub mod repository;
pub mod session;

pub use config::{RuntimeConfig, default_save_dir};
pub use error::{Result, SessionError};
pub use provider::{ActionProvider, GreedyProvider, drive};
pub use repository::{
    BattleRecord, EnemySummary, FileHistoryRepository, FileLogSink, FileSaveRepository,
    HistoryRepository, InMemoryHistoryRepo, InMemoryLogSink, InMemorySaveRepo, LogSink,
    RepositoryError, SaveRepository,
};
pub use session::{
    Persistence, Recording, Room, RunSession, SessionAction, SessionEvent, digest, replay, verify,
};
