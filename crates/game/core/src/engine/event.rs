//! Battle event log entries.
//!
//! The log is the only output of a battle. Each entry carries the values a
//! consumer needs to render it, so nobody has to re-derive state from earlier
//! entries.
use std::fmt;

use crate::ids::{CardId, ConsumableId, EntityId, RelicId, StatusId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BattleEvent {
    BattleStarted,
    TurnStarted {
        turn: u32,
    },
    EnergyReset {
        amount: i32,
    },
    EnergyGained {
        amount: i32,
        current: i32,
    },
    BlockCleared {
        target: EntityId,
        amount: i32,
    },
    Drew {
        card_id: CardId,
    },
    /// The discard pile was shuffled into the empty draw pile.
    Shuffled {
        count: usize,
    },
    Played {
        card_id: CardId,
        cost: i32,
    },
    ConsumableUsed {
        consumable_id: ConsumableId,
    },
    /// `amount` reached HP; `blocked` was absorbed by block.
    DamageDealt {
        source: EntityId,
        target: EntityId,
        amount: i32,
        blocked: i32,
    },
    BlockGained {
        target: EntityId,
        amount: i32,
    },
    Healed {
        target: EntityId,
        amount: i32,
    },
    HandDiscarded {
        count: usize,
    },
    EnemyIntent {
        enemy: EntityId,
        label: String,
        damage: Option<i32>,
        hits: u32,
    },
    EnemyAction {
        enemy: EntityId,
        label: String,
    },
    TurnEnded {
        turn: u32,
    },
    EntityDied {
        entity: EntityId,
        name: String,
    },
    BattleWon,
    BattleLost,
    NotEnoughEnergy {
        required: i32,
        available: i32,
    },
    InvalidAction {
        reason: String,
    },
    /// `stacks` is the applied delta, not the resulting count.
    StatusApplied {
        target: EntityId,
        status: StatusId,
        stacks: i32,
    },
    StatusExpired {
        target: EntityId,
        status: StatusId,
    },
    MadnessReduced {
        from: i32,
        to: i32,
    },
    /// `level` is the threshold index (1 to 3); `threshold` the madness
    /// count it fired at.
    MadnessThreshold {
        level: u8,
        threshold: i32,
    },
    MadnessDiscard {
        card_id: CardId,
    },
    MadnessCleared {
        amount: i32,
    },
    /// Madness a relic kept from being applied.
    MadnessPrevented {
        relic_id: RelicId,
        amount: i32,
    },
    /// Top of the draw pile first.
    ForesightRevealed {
        card_ids: Vec<CardId>,
    },
    ForesightChosen {
        card_id: CardId,
        from_count: usize,
    },
    RewindCard {
        card_id: CardId,
    },
    IntentRewritten {
        enemy: EntityId,
        from: Option<String>,
        to: String,
    },
    ForesightPenaltyNextTurn {
        amount: u32,
    },
    FirstCardCostNextTurn {
        amount: i32,
    },
}

impl BattleEvent {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidAction {
            reason: reason.into(),
        }
    }

    /// True for events that mark an action as rejected.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidAction { .. } | Self::NotEnoughEnergy { .. })
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BattleStarted => write!(f, "battle started"),
            Self::TurnStarted { turn } => write!(f, "turn {turn} started"),
            Self::EnergyReset { amount } => write!(f, "energy reset to {amount}"),
            Self::EnergyGained { amount, current } => {
                write!(f, "gained {amount} energy ({current})")
            }
            Self::BlockCleared { target, amount } => write!(f, "{target} lost {amount} block"),
            Self::Drew { card_id } => write!(f, "drew {card_id}"),
            Self::Shuffled { count } => write!(f, "shuffled {count} cards into the draw pile"),
            Self::Played { card_id, cost } => write!(f, "played {card_id} ({cost})"),
            Self::ConsumableUsed { consumable_id } => write!(f, "used {consumable_id}"),
            Self::DamageDealt {
                source,
                target,
                amount,
                blocked,
            } => write!(f, "{source} hit {target} for {amount} ({blocked} blocked)"),
            Self::BlockGained { target, amount } => write!(f, "{target} gained {amount} block"),
            Self::Healed { target, amount } => write!(f, "{target} healed {amount}"),
            Self::HandDiscarded { count } => write!(f, "discarded {count} cards"),
            Self::EnemyIntent { enemy, label, .. } => write!(f, "{enemy} intends {label}"),
            Self::EnemyAction { enemy, label } => write!(f, "{enemy} uses {label}"),
            Self::TurnEnded { turn } => write!(f, "turn {turn} ended"),
            Self::EntityDied { name, .. } => write!(f, "{name} died"),
            Self::BattleWon => write!(f, "battle won"),
            Self::BattleLost => write!(f, "battle lost"),
            Self::NotEnoughEnergy {
                required,
                available,
            } => write!(f, "not enough energy ({available}/{required})"),
            Self::InvalidAction { reason } => write!(f, "invalid action: {reason}"),
            Self::StatusApplied {
                target,
                status,
                stacks,
            } => write!(f, "{target} {status} {stacks:+}"),
            Self::StatusExpired { target, status } => write!(f, "{target} {status} expired"),
            Self::MadnessReduced { from, to } => write!(f, "madness {from} -> {to}"),
            Self::MadnessThreshold { level, threshold } => {
                write!(f, "madness threshold {level} reached ({threshold})")
            }
            Self::MadnessDiscard { card_id } => write!(f, "madness discarded {card_id}"),
            Self::MadnessCleared { amount } => write!(f, "cleared {amount} madness"),
            Self::MadnessPrevented { relic_id, amount } => {
                write!(f, "{relic_id} prevented {amount} madness")
            }
            Self::ForesightRevealed { card_ids } => {
                write!(f, "foresaw ")?;
                for (index, card_id) in card_ids.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{card_id}")?;
                }
                Ok(())
            }
            Self::ForesightChosen {
                card_id,
                from_count,
            } => write!(f, "kept {card_id} of {from_count} foreseen cards"),
            Self::RewindCard { card_id } => write!(f, "rewound {card_id}"),
            Self::IntentRewritten { enemy, to, .. } => {
                write!(f, "{enemy} intent rewritten to {to}")
            }
            Self::ForesightPenaltyNextTurn { amount } => {
                write!(f, "foresight -{amount} next turn")
            }
            Self::FirstCardCostNextTurn { amount } => {
                write!(f, "first card next turn costs {amount:+}")
            }
        }
    }
}
