//! Enemy decision making.
//!
//! Each enemy kind maps (its own state, the battle snapshot, the turn number,
//! its last executed intent category, the battle RNG) to an [`EnemyMove`]: an
//! announced intent plus the effects it will execute. Effects run through the
//! same resolution as player effects, so status interactions are symmetric.
//!
//! Policies draw at most one `next_int(100)` roll per decision and compare it
//! against cumulative thresholds. Threshold values and branch order are part of
//! seed compatibility.

use crate::action::{BattleEffect, EffectTarget, RewrittenIntent};
use crate::content::require_enemy;
use crate::ids::{EnemyId, StatusId};
use crate::rng::SeededRng;
use crate::state::BattleSnapshot;

/// Coarse kind of an intent, remembered between turns.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IntentCategory {
    Attack,
    Defend,
    Buff,
    Debuff,
    Mixed,
    Unknown,
}

/// An announced enemy action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyMove {
    pub category: IntentCategory,
    pub label: String,
    /// Base damage per hit, before modifiers.
    pub damage: Option<i32>,
    pub hits: u32,
    pub effects: Vec<BattleEffect>,
}

impl EnemyMove {
    pub fn new(category: IntentCategory, label: impl Into<String>) -> Self {
        Self {
            category,
            label: label.into(),
            damage: None,
            hits: 0,
            effects: Vec::new(),
        }
    }

    /// A move that does nothing. Used by entities with no enemy kind.
    pub fn idle() -> Self {
        Self::new(IntentCategory::Unknown, "...")
    }

    /// Adds one hit of `damage` from `source` to the player.
    #[must_use]
    pub fn hit(mut self, source: EffectTarget, damage: i32) -> Self {
        self.effects
            .push(BattleEffect::damage(source, EffectTarget::Player, damage));
        self.damage = Some(damage);
        self.hits += 1;
        self
    }

    #[must_use]
    pub fn block(mut self, target: EffectTarget, amount: i32) -> Self {
        self.effects.push(BattleEffect::block(target, amount));
        self
    }

    #[must_use]
    pub fn apply(mut self, target: EffectTarget, status: StatusId, stacks: i32) -> Self {
        self.effects
            .push(BattleEffect::status(target, status, stacks));
        self
    }

    #[must_use]
    pub fn heal(mut self, target: EffectTarget, amount: i32) -> Self {
        self.effects.push(BattleEffect::Heal { target, amount });
        self
    }

    /// Replacement move for an intent rewritten by the player.
    pub fn rewritten(intent: RewrittenIntent, me: EffectTarget) -> Self {
        match intent {
            RewrittenIntent::Defend { block } => {
                Self::new(IntentCategory::Defend, format!("Defend {block} (rewritten)")).block(me, block)
            }
            RewrittenIntent::Skip => Self::new(IntentCategory::Unknown, "Skip (rewritten)"),
        }
    }
}

/// Everything an enemy policy may look at.
pub struct AiContext<'a> {
    /// Slot of the deciding enemy.
    pub self_index: usize,
    pub snapshot: &'a BattleSnapshot,
    pub turn: u32,
    pub last_intent: Option<IntentCategory>,
}

impl AiContext<'_> {
    /// Effect target for the deciding enemy.
    pub fn me(&self) -> EffectTarget {
        EffectTarget::Enemy(self.self_index)
    }
}

/// Decides the next move of the enemy in `ctx.self_index`.
///
/// `enemy_id` of `None` yields [`EnemyMove::idle`]. An unknown enemy id is a
/// content bug and panics.
pub fn decide_intent(
    enemy_id: Option<&EnemyId>,
    ctx: &AiContext<'_>,
    rng: &mut SeededRng,
) -> EnemyMove {
    match enemy_id {
        Some(id) => require_enemy(id.as_str()).choose_move(ctx, rng),
        None => EnemyMove::idle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::STRENGTH;

    #[test]
    fn builder_tracks_hits_and_damage() {
        let me = EffectTarget::Enemy(0);
        let mv = EnemyMove::new(IntentCategory::Attack, "Slash 8×2")
            .hit(me, 8)
            .hit(me, 8);
        assert_eq!(mv.hits, 2);
        assert_eq!(mv.damage, Some(8));
        assert_eq!(mv.effects.len(), 2);
    }

    #[test]
    fn mixed_moves_keep_effect_order() {
        let me = EffectTarget::Enemy(1);
        let mv = EnemyMove::new(IntentCategory::Mixed, "Hold Fast")
            .block(me, 12)
            .apply(me, STRENGTH, 1);
        assert_eq!(mv.effects[0], BattleEffect::block(me, 12));
        assert_eq!(mv.effects[1], BattleEffect::status(me, STRENGTH, 1));
        assert_eq!(mv.damage, None);
    }

    #[test]
    fn rewritten_defend_only_blocks() {
        let me = EffectTarget::Enemy(2);
        let mv = EnemyMove::rewritten(RewrittenIntent::Defend { block: 10 }, me);
        assert_eq!(mv.category, IntentCategory::Defend);
        assert_eq!(mv.effects, vec![BattleEffect::block(me, 10)]);
        assert!(EnemyMove::rewritten(RewrittenIntent::Skip, me).effects.is_empty());
    }
}
