//! Repository layer for data that outlives a session.
//!
//! - The current run (one save slot, JSON)
//! - Battle history (append-only, length-prefixed bincode)
//! - A plain-text debug log
//!
//! Each contract has a file-backed implementation for real use and an
//! in-memory one for tests and headless tooling.

mod error;
mod file;
mod memory;
mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileHistoryRepository, FileLogSink, FileSaveRepository};
pub use memory::{InMemoryHistoryRepo, InMemoryLogSink, InMemorySaveRepo};
pub use record::{BattleRecord, EnemySummary};
pub use traits::{HistoryRepository, LogSink, SaveRepository};
