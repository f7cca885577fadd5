//! Error types raised by repository implementations.

use game_core::{ErrorSeverity, GameError, LoadError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    /// The save decoded but could not be turned back into a run.
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Load(error) => error.severity(),
            Self::Io(_) | Self::Serialization(_) => ErrorSeverity::Recoverable,
            Self::LockPoisoned | Self::CorruptedData(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Serialization(_) => "REPOSITORY_SERIALIZATION",
            Self::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
            Self::Load(error) => error.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
