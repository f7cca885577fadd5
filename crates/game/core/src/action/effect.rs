//! Battle effect vocabulary.
//!
//! Effects are the only instructions content may emit. Cards, statuses, relics,
//! consumables and enemy moves all answer with a list of [`BattleEffect`]s and
//! the battle engine alone interprets them.

use crate::ids::StatusId;

/// Which combatant an effect refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    Player,
    /// Enemy by slot index in the battle.
    Enemy(usize),
}

/// A single instruction for the battle engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEffect {
    /// `base` passes through the source's outgoing and the target's incoming
    /// modifiers, then block.
    DealDamage {
        source: EffectTarget,
        target: EffectTarget,
        base: i32,
    },
    /// `base` passes through the target's block modifiers.
    GainBlock { target: EffectTarget, base: i32 },
    /// Player draws `count` cards.
    DrawCards { count: u32 },
    /// Player gains energy for this turn.
    GainEnergy { amount: i32 },
    /// Negative `stacks` reduce an existing status.
    ApplyStatus {
        target: EffectTarget,
        status: StatusId,
        stacks: i32,
    },
    Heal { target: EffectTarget, amount: i32 },
    /// Removes player madness. `amount == 0` clears all of it.
    ClearMadness { amount: i32 },
    /// Reveals the top `count` draw pile cards. The player keeps one of them
    /// and the rest go back on top in their original order.
    Foresight { count: u32 },
    /// Returns the `count` most recently discarded cards to the hand.
    Rewind { count: u32 },
    /// Replaces the announced intent of the enemy in `enemy`.
    RewriteIntent { enemy: usize, intent: RewrittenIntent },
    /// Player foresight counts are reduced by `amount` during the next turn.
    ForesightPenaltyNextTurn { amount: u32 },
    /// The first card the player plays next turn costs `amount` more.
    FirstCardCostNextTurn { amount: i32 },
    /// Discards `count` random cards from the hand.
    DiscardRandom { count: u32 },
    /// Damage of `per_foresight` for each foresight resolved this turn.
    DamagePerForesight {
        source: EffectTarget,
        target: EffectTarget,
        per_foresight: i32,
    },
}

/// What a rewritten enemy intent turns into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RewrittenIntent {
    Defend { block: i32 },
    Skip,
}

impl BattleEffect {
    pub fn damage(source: EffectTarget, target: EffectTarget, base: i32) -> Self {
        Self::DealDamage {
            source,
            target,
            base,
        }
    }

    pub fn block(target: EffectTarget, base: i32) -> Self {
        Self::GainBlock { target, base }
    }

    pub fn status(target: EffectTarget, status: StatusId, stacks: i32) -> Self {
        Self::ApplyStatus {
            target,
            status,
            stacks,
        }
    }
}
