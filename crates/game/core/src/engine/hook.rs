//! Trigger hooks that react to named battle moments with extra effects.
//!
//! Relics are the hooks of a battle. Their effects are appended to the same
//! queue the triggering action uses, so ordering stays deterministic.

use crate::action::{BattleEffect, BattleTrigger};
use crate::content::{RelicDefinition, require_relic};
use crate::ids::RelicId;
use crate::state::BattleSnapshot;

/// A reaction to [`BattleTrigger`]s.
///
/// Hooks are executed in priority order (lower priority values execute first).
/// Hooks with equal priority keep the order they were registered in.
pub trait TriggerHook: Send + Sync {
    /// Returns the priority of this hook. Lower values execute first.
    /// Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn name(&self) -> &str;

    fn on_trigger(&self, trigger: &BattleTrigger, snapshot: &BattleSnapshot) -> Vec<BattleEffect>;
}

impl TriggerHook for RelicDefinition {
    fn name(&self) -> &str {
        self.name
    }

    fn on_trigger(&self, trigger: &BattleTrigger, snapshot: &BattleSnapshot) -> Vec<BattleEffect> {
        (self.on_trigger)(trigger, snapshot)
    }
}

/// Builds the hook chain for a set of owned relics.
pub fn relic_hooks(relics: &[RelicId]) -> Vec<&'static dyn TriggerHook> {
    let mut hooks: Vec<&'static dyn TriggerHook> = relics
        .iter()
        .map(|id| require_relic(id.as_str()) as &'static dyn TriggerHook)
        .collect();

    // Sort by priority (lower values first)
    hooks.sort_by_key(|hook| hook.priority());
    hooks
}

/// Collects the effects every hook emits for `trigger`, in hook order.
pub fn collect_effects(
    hooks: &[&'static dyn TriggerHook],
    trigger: &BattleTrigger,
    snapshot: &BattleSnapshot,
) -> Vec<BattleEffect> {
    hooks
        .iter()
        .flat_map(|hook| hook.on_trigger(trigger, snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EffectTarget;
    use crate::content::{BURNING_BLOOD, STRENGTH};
    use crate::state::Entity;

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot {
            turn: 1,
            player: Entity::player("Ironclad", 80, 60),
            enemies: Vec::new(),
            energy: 3,
        }
    }

    #[test]
    fn relic_hooks_keep_registration_order() {
        let hooks = relic_hooks(&[RelicId::from_static("vajra"), RelicId::from_static("war_banner")]);
        let effects = collect_effects(&hooks, &BattleTrigger::BattleStart, &snapshot());
        assert_eq!(
            effects,
            vec![
                BattleEffect::status(EffectTarget::Player, STRENGTH, 1),
                BattleEffect::status(EffectTarget::Player, STRENGTH, 2),
            ]
        );
    }

    #[test]
    fn burning_blood_only_reacts_to_victory() {
        let hooks = relic_hooks(&[BURNING_BLOOD]);
        assert!(collect_effects(&hooks, &BattleTrigger::BattleStart, &snapshot()).is_empty());
        assert!(
            collect_effects(&hooks, &BattleTrigger::BattleEnd { won: false }, &snapshot()).is_empty()
        );
        assert_eq!(
            collect_effects(&hooks, &BattleTrigger::BattleEnd { won: true }, &snapshot()),
            vec![BattleEffect::Heal {
                target: EffectTarget::Player,
                amount: 6
            }]
        );
    }
}
