//! Recorded action logs and deterministic replay.
//!
//! A [`Recording`] is the seed, the run shape and the accepted actions of a
//! session. Replaying it through the same core must reproduce the event log
//! exactly; the SHA-256 digest of the log is what gets compared.

use game_core::GameConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Persistence, RunSession, SessionAction, SessionEvent};
use crate::error::{Result, SessionError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub seed: u64,
    pub max_floor: u32,
    pub map_rows: u32,
    pub actions: Vec<SessionAction>,
    /// Digest of the original event log, if it was captured.
    pub digest: Option<String>,
}

impl Recording {
    /// Captures a session that was started fresh, not resumed.
    pub fn from_session(session: &RunSession) -> Result<Self> {
        let run = session.run();
        Ok(Self {
            seed: run.seed,
            max_floor: run.max_floor,
            map_rows: run.map_rows,
            actions: session.actions().to_vec(),
            digest: Some(session.digest()?),
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::with_max_floor(self.max_floor).map_rows(self.map_rows)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SessionError::Encoding(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| SessionError::Encoding(e.to_string()))
    }
}

/// Replays a recording without persistence. Fails on the first action the
/// replayed session rejects.
pub fn replay(recording: &Recording) -> Result<RunSession> {
    let mut session = RunSession::new(
        recording.seed,
        &recording.game_config(),
        Persistence::disabled(),
    );
    for (step, action) in recording.actions.iter().enumerate() {
        session.apply(action.clone()).inspect_err(|error| {
            tracing::warn!(step, action = action.label(), %error, "replay rejected an action");
        })?;
    }
    Ok(session)
}

/// Replays a recording and checks its digest. Returns the replayed digest.
pub fn verify(recording: &Recording) -> Result<String> {
    let session = replay(recording)?;
    let actual = session.digest()?;
    match &recording.digest {
        Some(expected) if *expected != actual => Err(SessionError::ReplayDiverged {
            expected: expected.clone(),
            actual,
        }),
        _ => Ok(actual),
    }
}

/// Hex SHA-256 over the JSON encoding of each event, one per line.
pub fn digest(events: &[SessionEvent]) -> Result<String> {
    let mut hasher = Sha256::new();
    for event in events {
        let bytes = serde_json::to_vec(event).map_err(|e| SessionError::Encoding(e.to_string()))?;
        hasher.update(&bytes);
        hasher.update(b"\n");
    }
    Ok(hex::encode(hasher.finalize()))
}
