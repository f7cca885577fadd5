//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::RunSnapshot;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// Stores the current run as `run.json` in `base_dir`.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous save intact.
pub struct FileSaveRepository {
    path: PathBuf,
}

impl FileSaveRepository {
    pub const FILE_NAME: &'static str = "run.json";

    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(Self::FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveRepository for FileSaveRepository {
    fn load(&self) -> Result<Option<RunSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        let snapshot = RunSnapshot::from_json(&raw)?;

        tracing::debug!("Loaded run save from {}", self.path.display());

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &RunSnapshot) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let raw = snapshot
            .to_json()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, raw).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved run (floor {}, gold {}) to {}",
            snapshot.floor,
            snapshot.gold,
            self.path.display()
        );

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted run save");
        }
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}
