use crate::action::EffectTarget;

use super::Entity;

/// Read-only copy of a battle, handed to content definitions.
///
/// Cards, statuses, relics and enemy policies decide what to do from a snapshot
/// and answer with effects; they never see live battle state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleSnapshot {
    pub turn: u32,
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub energy: i32,
}

impl BattleSnapshot {
    pub fn entity(&self, target: EffectTarget) -> Option<&Entity> {
        match target {
            EffectTarget::Player => Some(&self.player),
            EffectTarget::Enemy(index) => self.enemies.get(index),
        }
    }

    /// Living enemies with their slot index.
    pub fn living_enemies(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.enemies.iter().enumerate().filter(|(_, e)| e.is_alive())
    }

    /// Effect targets for every living enemy, in slot order.
    pub fn living_enemy_targets(&self) -> Vec<EffectTarget> {
        self.living_enemies()
            .map(|(index, _)| EffectTarget::Enemy(index))
            .collect()
    }
}
