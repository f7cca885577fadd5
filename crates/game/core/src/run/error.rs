//! Run navigation and snapshot errors.

use crate::error::{ErrorSeverity, GameError};
use crate::ids::{CardId, ConsumableId};

/// Errors from operations on a [`RunState`](super::RunState).
///
/// None of these change the run: a failed operation leaves it exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunError {
    #[error("Run is already over")]
    RunOver,

    #[error("Map node {0} does not exist")]
    NodeNotFound(String),

    #[error("Map node {0} is not accessible")]
    NodeNotAccessible(String),

    #[error("Map node {0} is already completed")]
    NodeCompleted(String),

    /// The target is not connected to the current node.
    #[error("Map node {to} is not reachable from {from}")]
    NodeUnreachable { from: String, to: String },

    #[error("No map node is currently entered")]
    NoCurrentNode,

    #[error("Not enough gold (required: {required}, available: {available})")]
    NotEnoughGold { required: i32, available: i32 },

    #[error("Index {index} is out of range (len: {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("All {max} consumable slots are full")]
    NoConsumableSlot { max: usize },

    #[error("Card {0} has no upgraded version")]
    CardNotUpgradeable(CardId),

    #[error("Consumable {0} cannot be used outside of battle")]
    ConsumableNotUsable(ConsumableId),

    #[error("Shop item {index} is already sold")]
    AlreadySold { index: usize },

    #[error("The card removal service was already used")]
    RemovalUsed,
}

impl GameError for RunError {
    fn severity(&self) -> ErrorSeverity {
        use RunError::*;
        match self {
            // The player can pick something else
            NotEnoughGold { .. } | NoConsumableSlot { .. } | AlreadySold { .. } | RemovalUsed => {
                ErrorSeverity::Recoverable
            }

            RunOver
            | NodeNotFound(_)
            | NodeNotAccessible(_)
            | NodeCompleted(_)
            | NodeUnreachable { .. }
            | NoCurrentNode
            | InvalidIndex { .. }
            | CardNotUpgradeable(_)
            | ConsumableNotUsable(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use RunError::*;
        match self {
            RunOver => "RUN_OVER",
            NodeNotFound(_) => "RUN_NODE_NOT_FOUND",
            NodeNotAccessible(_) => "RUN_NODE_NOT_ACCESSIBLE",
            NodeCompleted(_) => "RUN_NODE_COMPLETED",
            NodeUnreachable { .. } => "RUN_NODE_UNREACHABLE",
            NoCurrentNode => "RUN_NO_CURRENT_NODE",
            NotEnoughGold { .. } => "RUN_NOT_ENOUGH_GOLD",
            InvalidIndex { .. } => "RUN_INVALID_INDEX",
            NoConsumableSlot { .. } => "RUN_NO_CONSUMABLE_SLOT",
            CardNotUpgradeable(_) => "RUN_CARD_NOT_UPGRADEABLE",
            ConsumableNotUsable(_) => "RUN_CONSUMABLE_NOT_USABLE",
            AlreadySold { .. } => "RUN_ALREADY_SOLD",
            RemovalUsed => "RUN_REMOVAL_USED",
        }
    }
}

/// Errors raised while rebuilding a run from a [`RunSnapshot`](super::RunSnapshot).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadError {
    /// Checked before any other field is decoded.
    #[error("Save version {found} is not supported (expected {expected})")]
    IncompatibleVersion { found: u32, expected: u32 },

    #[error("Unknown room type `{0}`")]
    InvalidRoomType(String),

    #[error("Unknown card `{0}`")]
    UnknownCard(String),

    #[error("Unknown relic `{0}`")]
    UnknownRelic(String),

    #[error("Unknown consumable `{0}`")]
    UnknownConsumable(String),

    #[error("Unknown status `{0}`")]
    UnknownStatus(String),

    #[error("Malformed save data: {0}")]
    Malformed(String),
}

impl GameError for LoadError {
    fn severity(&self) -> ErrorSeverity {
        use LoadError::*;
        match self {
            IncompatibleVersion { .. } => ErrorSeverity::Fatal,
            InvalidRoomType(_)
            | UnknownCard(_)
            | UnknownRelic(_)
            | UnknownConsumable(_)
            | UnknownStatus(_)
            | Malformed(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use LoadError::*;
        match self {
            IncompatibleVersion { .. } => "LOAD_INCOMPATIBLE_VERSION",
            InvalidRoomType(_) => "LOAD_INVALID_ROOM_TYPE",
            UnknownCard(_) => "LOAD_UNKNOWN_CARD",
            UnknownRelic(_) => "LOAD_UNKNOWN_RELIC",
            UnknownConsumable(_) => "LOAD_UNKNOWN_CONSUMABLE",
            UnknownStatus(_) => "LOAD_UNKNOWN_STATUS",
            Malformed(_) => "LOAD_MALFORMED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gold_shortage_is_recoverable() {
        let error = RunError::NotEnoughGold {
            required: 75,
            available: 10,
        };
        assert!(error.severity().is_recoverable());
        assert_eq!(error.error_code(), "RUN_NOT_ENOUGH_GOLD");
    }

    #[test]
    fn corrupted_saves_are_internal() {
        assert!(LoadError::UnknownCard("glitch".into()).severity().is_internal());
        assert_eq!(
            LoadError::IncompatibleVersion {
                found: 3,
                expected: 4
            }
            .severity(),
            ErrorSeverity::Fatal
        );
    }
}
