//! In-memory repository implementations for tests and headless runs.

use std::sync::RwLock;

use game_core::RunSnapshot;

use crate::repository::{
    BattleRecord, HistoryRepository, LogSink, RepositoryError, Result, SaveRepository,
};

/// In-memory save slot.
#[derive(Default)]
pub struct InMemorySaveRepo {
    slot: RwLock<Option<RunSnapshot>>,
}

impl InMemorySaveRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepo {
    fn load(&self) -> Result<Option<RunSnapshot>> {
        let slot = self.slot.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &RunSnapshot) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}

/// In-memory battle history.
#[derive(Default)]
pub struct InMemoryHistoryRepo {
    records: RwLock<Vec<BattleRecord>>,
}

impl InMemoryHistoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryRepository for InMemoryHistoryRepo {
    fn load(&self) -> Result<Vec<BattleRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn append(&self, record: &BattleRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.push(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.clear();
        Ok(())
    }
}

/// Collects debug log lines in memory.
#[derive(Default)]
pub struct InMemoryLogSink {
    lines: RwLock<Vec<String>>,
}

impl InMemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far. Empty if the lock was poisoned.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl LogSink for InMemoryLogSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut lines = self
            .lines
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        lines.push(line.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut lines = self
            .lines
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        lines.clear();
        Ok(())
    }
}
