//! Repository contracts for persisting run data.
//!
//! The session only depends on these traits; where and how the data is stored
//! is up to the implementation.

use game_core::RunSnapshot;

use super::{BattleRecord, Result};

/// Holds at most one saved run.
pub trait SaveRepository: Send + Sync {
    /// Load the saved run, if any.
    ///
    /// A save from another version or with unknown content is an error, never
    /// silently treated as "no save".
    fn load(&self) -> Result<Option<RunSnapshot>>;

    /// Replace the saved run.
    fn save(&self, snapshot: &RunSnapshot) -> Result<()>;

    /// Delete the saved run.
    fn clear(&self) -> Result<()>;

    fn exists(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

/// Append-only list of finished battles.
pub trait HistoryRepository: Send + Sync {
    /// All records, oldest first.
    fn load(&self) -> Result<Vec<BattleRecord>>;

    fn append(&self, record: &BattleRecord) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Plain-text debug log.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

// Shared handles, so a caller can keep reading what a session writes.

impl<T: SaveRepository + ?Sized> SaveRepository for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<RunSnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &RunSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }
}

impl<T: HistoryRepository + ?Sized> HistoryRepository for std::sync::Arc<T> {
    fn load(&self) -> Result<Vec<BattleRecord>> {
        (**self).load()
    }

    fn append(&self, record: &BattleRecord) -> Result<()> {
        (**self).append(record)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

impl<T: LogSink + ?Sized> LogSink for std::sync::Arc<T> {
    fn write_line(&self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
