//! Unified error type surfaced by run sessions.
//!
//! Wraps run rule violations, save decoding failures and repository errors so
//! callers can bubble them up with consistent context.

use game_core::{ErrorSeverity, GameError, LoadError, RunError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The action does not apply to the room the player is in.
    #[error("{action} is not available while in {room}")]
    Unavailable {
        action: &'static str,
        room: &'static str,
    },

    #[error("choice {index} is out of range ({len} options)")]
    InvalidChoice { index: usize, len: usize },

    #[error("replay diverged: expected digest {expected}, got {actual}")]
    ReplayDiverged { expected: String, actual: String },

    #[error("failed to encode session data: {0}")]
    Encoding(String),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Run(error) => error.severity(),
            Self::Load(error) => error.severity(),
            Self::Repository(error) => error.severity(),
            Self::Unavailable { .. } | Self::InvalidChoice { .. } => ErrorSeverity::Validation,
            Self::ReplayDiverged { .. } | Self::Encoding(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Run(error) => error.error_code(),
            Self::Load(error) => error.error_code(),
            Self::Repository(error) => error.error_code(),
            Self::Unavailable { .. } => "SESSION_UNAVAILABLE",
            Self::InvalidChoice { .. } => "SESSION_INVALID_CHOICE",
            Self::ReplayDiverged { .. } => "SESSION_REPLAY_DIVERGED",
            Self::Encoding(_) => "SESSION_ENCODING",
        }
    }
}
