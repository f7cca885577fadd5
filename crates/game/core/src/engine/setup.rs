//! Battle construction from run state and encounter tables.

use super::BattleEngine;
use crate::content::{require_enemy, select_encounter};
use crate::generate::RoomType;
use crate::ids::{ConsumableId, EnemyId, EntityId, RelicId};
use crate::rng::SeededRng;
use crate::state::{Card, Entity};

/// What the player brings into a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loadout {
    pub player: Entity,
    pub deck: Vec<Card>,
    pub relics: Vec<RelicId>,
    pub consumables: Vec<ConsumableId>,
}

/// Creates enemy entities, rolling each one's HP from `rng` in slot order.
///
/// Entity ids are the enemy kind, suffixed with the slot when the kind occurs
/// more than once.
pub fn spawn_enemies(ids: &[EnemyId], rng: &mut SeededRng) -> Vec<Entity> {
    ids.iter()
        .enumerate()
        .map(|(slot, enemy_id)| {
            let definition = require_enemy(enemy_id.as_str());
            let (low, high) = definition.hp_range();
            let hp = rng.range_inclusive(low, high);
            let duplicated = ids.iter().filter(|other| *other == enemy_id).count() > 1;
            let entity_id = if duplicated {
                EntityId::new(format!("{enemy_id}_{slot}"))
            } else {
                EntityId::new(enemy_id.as_str())
            };
            Entity::enemy(entity_id, enemy_id.clone(), definition.name(), hp)
        })
        .collect()
}

impl BattleEngine {
    /// Battle for a map node: the encounter, enemy HP, deck shuffle and every
    /// later roll come from one stream seeded with `seed`.
    pub fn for_encounter(loadout: Loadout, floor: u32, room: RoomType, seed: u64) -> Self {
        let mut rng = SeededRng::new(seed);
        let ids = select_encounter(floor, room, &mut rng);
        let enemies = spawn_enemies(&ids, &mut rng);
        Self::new(loadout, enemies, rng)
    }

    /// Battle against a fixed enemy list.
    pub fn for_enemies(loadout: Loadout, ids: &[EnemyId], seed: u64) -> Self {
        let mut rng = SeededRng::new(seed);
        let enemies = spawn_enemies(ids, &mut rng);
        Self::new(loadout, enemies, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_kinds_get_slot_suffixes() {
        let ids = [
            EnemyId::from_static("clockwork_sentinel"),
            EnemyId::from_static("clockwork_sentinel"),
        ];
        let enemies = spawn_enemies(&ids, &mut SeededRng::new(3));
        assert_eq!(enemies[0].id, "clockwork_sentinel_0");
        assert_eq!(enemies[1].id, "clockwork_sentinel_1");
    }

    #[test]
    fn hp_is_rolled_within_range() {
        for seed in 0..30 {
            let enemies = spawn_enemies(&[EnemyId::from_static("jaw_worm")], &mut SeededRng::new(seed));
            assert_eq!(enemies[0].id, "jaw_worm");
            assert!((40..=44).contains(&enemies[0].max_hp));
            assert_eq!(enemies[0].current_hp, enemies[0].max_hp);
        }
    }
}
