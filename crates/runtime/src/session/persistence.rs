//! Best-effort persistence attached to a session.
//!
//! Writes never fail a session: errors are logged at `warn` and dropped, so a
//! full disk cannot end a run. Loading is the caller's business and surfaces
//! typed errors.

use std::time::{SystemTime, UNIX_EPOCH};

use game_core::RunSnapshot;

use crate::config::RuntimeConfig;
use crate::repository::{
    BattleRecord, FileHistoryRepository, FileLogSink, FileSaveRepository, HistoryRepository,
    LogSink, Result, SaveRepository,
};

/// Optional collaborators a session writes to.
#[derive(Default)]
pub struct Persistence {
    save: Option<Box<dyn SaveRepository>>,
    history: Option<Box<dyn HistoryRepository>>,
    log: Option<Box<dyn LogSink>>,
}

impl Persistence {
    /// No persistence at all; used by replays and tests.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// File-backed repositories under `config.save_dir`, as enabled.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let mut persistence = Self::disabled();
        if config.enable_persistence {
            persistence.save = Some(Box::new(FileSaveRepository::new(&config.save_dir)?));
        }
        if config.enable_history {
            persistence.history = Some(Box::new(FileHistoryRepository::new(&config.save_dir)?));
        }
        if config.debug_log {
            persistence.log = Some(Box::new(FileLogSink::new(&config.save_dir)?));
        }
        Ok(persistence)
    }

    #[must_use]
    pub fn with_save(mut self, repository: impl SaveRepository + 'static) -> Self {
        self.save = Some(Box::new(repository));
        self
    }

    #[must_use]
    pub fn with_history(mut self, repository: impl HistoryRepository + 'static) -> Self {
        self.history = Some(Box::new(repository));
        self
    }

    #[must_use]
    pub fn with_log(mut self, sink: impl LogSink + 'static) -> Self {
        self.log = Some(Box::new(sink));
        self
    }

    pub(crate) fn save(&self, snapshot: &RunSnapshot) {
        if let Some(repository) = &self.save
            && let Err(error) = repository.save(snapshot)
        {
            tracing::warn!(%error, "failed to write run save");
        }
    }

    pub(crate) fn record(&self, record: &BattleRecord) {
        if let Some(repository) = &self.history
            && let Err(error) = repository.append(record)
        {
            tracing::warn!(%error, "failed to append battle record");
        }
    }

    pub(crate) fn log(&self, line: &str) {
        if let Some(sink) = &self.log
            && let Err(error) = sink.write_line(line)
        {
            tracing::warn!(%error, "failed to write debug log");
        }
    }
}

/// Unix seconds, or 0 when the clock is before the epoch.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
