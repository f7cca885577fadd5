use crate::ai::{EnemyMove, IntentCategory};
use crate::combat::{DamageOutcome, absorb};
use crate::ids::{EnemyId, EntityId};

use super::StatusContainer;

/// A combatant: the player or one enemy.
///
/// The player entity outlives battles (HP is written back to the run); enemy
/// entities exist for one battle only.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub max_hp: i32,
    /// Always within `0..=max_hp`.
    pub current_hp: i32,
    /// Never negative. Cleared for every combatant when a player turn starts.
    pub block: i32,
    pub statuses: StatusContainer,
    /// Enemy kind, `None` for the player.
    pub enemy_id: Option<EnemyId>,
    /// Move announced for the coming enemy turn.
    pub intent: Option<EnemyMove>,
    /// Category of the last move this enemy executed.
    pub last_intent: Option<IntentCategory>,
}

impl Entity {
    pub fn player(name: impl Into<String>, max_hp: i32, current_hp: i32) -> Self {
        Self {
            id: EntityId::PLAYER,
            name: name.into(),
            max_hp,
            current_hp: current_hp.clamp(0, max_hp),
            block: 0,
            statuses: StatusContainer::new(),
            enemy_id: None,
            intent: None,
            last_intent: None,
        }
    }

    pub fn enemy(id: EntityId, enemy_id: EnemyId, name: impl Into<String>, hp: i32) -> Self {
        Self {
            id,
            name: name.into(),
            max_hp: hp,
            current_hp: hp,
            block: 0,
            statuses: StatusContainer::new(),
            enemy_id: Some(enemy_id),
            intent: None,
            last_intent: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Applies already-modified damage: block absorbs first, the rest hits HP.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        let outcome = absorb(self.block, amount);
        self.block -= outcome.blocked;
        self.current_hp = (self.current_hp - outcome.amount).max(0);
        outcome
    }

    pub fn gain_block(&mut self, amount: i32) {
        self.block += amount.max(0);
    }

    /// Heals up to max HP and returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount.max(0)).min(self.max_hp);
        self.current_hp - before
    }

    /// Removes all block and returns how much was removed.
    pub fn clear_block(&mut self) -> i32 {
        std::mem::take(&mut self.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_absorbs_before_hp() {
        let mut entity = Entity::player("Test", 50, 50);
        entity.gain_block(5);
        let outcome = entity.take_damage(8);
        assert_eq!(outcome, DamageOutcome { amount: 3, blocked: 5 });
        assert_eq!(entity.block, 0);
        assert_eq!(entity.current_hp, 47);
    }

    #[test]
    fn hp_never_goes_negative() {
        let mut entity = Entity::player("Test", 10, 4);
        let outcome = entity.take_damage(9);
        assert_eq!(outcome.amount, 9);
        assert_eq!(entity.current_hp, 0);
        assert!(!entity.is_alive());
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut entity = Entity::player("Test", 80, 75);
        assert_eq!(entity.heal(20), 5);
        assert_eq!(entity.current_hp, 80);
    }
}
