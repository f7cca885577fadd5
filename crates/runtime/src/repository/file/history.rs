//! Append-only battle history file.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::repository::{BattleRecord, HistoryRepository, RepositoryError, Result};

/// Battle history stored in one append-only file.
///
/// Each record is stored as:
/// ```text
/// [u32 length (little endian)][bincode serialized BattleRecord]
/// ```
pub struct FileHistoryRepository {
    path: PathBuf,
}

impl FileHistoryRepository {
    pub const FILE_NAME: &'static str = "history.bin";

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

/// Splits a history file into records, rejecting a truncated tail.
fn decode_frames(bytes: &[u8]) -> Result<Vec<BattleRecord>> {
    let mut records = Vec::new();
    let mut offset = 0usize;

    while offset < bytes.len() {
        let header = bytes.get(offset..offset + 4).ok_or_else(|| {
            RepositoryError::CorruptedData(format!("truncated length prefix at offset {offset}"))
        })?;
        let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let start = offset + 4;

        let body = bytes.get(start..start + len).ok_or_else(|| {
            RepositoryError::CorruptedData(format!(
                "record at offset {offset} expects {len} bytes, file has {}",
                bytes.len() - start
            ))
        })?;
        let record = bincode::deserialize(body)
            .map_err(|e| RepositoryError::CorruptedData(format!("record at offset {offset}: {e}")))?;

        records.push(record);
        offset = start + len;
    }

    Ok(records)
}

impl HistoryRepository for FileHistoryRepository {
    fn load(&self) -> Result<Vec<BattleRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        decode_frames(&bytes)
    }

    fn append(&self, record: &BattleRecord) -> Result<()> {
        let body =
            bincode::serialize(record).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let len = u32::try_from(body.len())
            .map_err(|_| RepositoryError::Serialization("record exceeds 4 GiB".to_string()))?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(RepositoryError::Io)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(&body)?;
        writer.flush()?;

        tracing::debug!(
            "Appended battle record (floor {}, node {}, won {})",
            record.floor,
            record.node_id,
            record.won
        );

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
        }
        Ok(())
    }
}
