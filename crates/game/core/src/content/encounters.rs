//! Encounter pools per act.

use super::enemies::require_enemy;
use crate::generate::RoomType;
use crate::ids::EnemyId;
use crate::rng::SeededRng;

/// Enemy groups that can be met in one act.
#[derive(Debug)]
pub struct EncounterPool {
    pub weak: &'static [&'static [&'static str]],
    pub elite: &'static [&'static [&'static str]],
    pub boss: &'static [&'static [&'static str]],
}

static ACT_ONE: EncounterPool = EncounterPool {
    weak: &[
        &["jaw_worm"],
        &["cultist"],
        &["louse_green"],
        &["louse_red"],
        &["louse_green", "louse_red"],
        &["spore_beast"],
        &["slime_small_acid"],
    ],
    elite: &[&["stone_sentinel"], &["slime_medium_acid"]],
    boss: &[&["toxic_colossus"]],
};

static ACT_TWO: EncounterPool = EncounterPool {
    weak: &[
        &["shadow_stalker"],
        &["clockwork_sentinel"],
        &["shadow_stalker", "clockwork_sentinel"],
        &["clockwork_sentinel", "clockwork_sentinel"],
    ],
    elite: &[&["rune_guardian"], &["mad_prophet"], &["time_guardian"]],
    boss: &[&["chrono_watcher"]],
};

static ACT_THREE: EncounterPool = EncounterPool {
    weak: &[
        &["void_walker"],
        &["dream_parasite"],
        &["void_walker", "dream_parasite"],
        &["dream_parasite", "dream_parasite"],
        &["void_walker", "void_walker"],
    ],
    elite: &[&["cycle_guardian"]],
    boss: &[&["sequence_progenitor"]],
};

/// Pool for act `floor`. Acts past the last defined pool reuse it.
pub fn encounter_pool(floor: u32) -> &'static EncounterPool {
    match floor {
        0 | 1 => &ACT_ONE,
        2 => &ACT_TWO,
        _ => &ACT_THREE,
    }
}

/// Picks the enemy group for a fight in `room` on act `floor`.
///
/// Draws exactly one `next_int(count)` from the battle RNG. Rooms that are not
/// fights use the weak pool.
pub fn select_encounter(floor: u32, room: RoomType, rng: &mut SeededRng) -> Vec<EnemyId> {
    let pool = encounter_pool(floor);
    let groups = match room {
        RoomType::Elite => pool.elite,
        RoomType::Boss => pool.boss,
        _ => pool.weak,
    };
    let group = groups[rng.next_int(groups.len())];
    group.iter().map(|id| require_enemy(id).id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pooled_enemy_is_registered() {
        for floor in 1..=3 {
            let pool = encounter_pool(floor);
            for group in pool.weak.iter().chain(pool.elite).chain(pool.boss) {
                for id in *group {
                    require_enemy(id);
                }
            }
        }
    }

    #[test]
    fn boss_room_picks_the_act_boss() {
        let mut rng = SeededRng::new(5);
        assert_eq!(
            select_encounter(1, RoomType::Boss, &mut rng),
            vec![EnemyId::from_static("toxic_colossus")]
        );
        assert_eq!(
            select_encounter(2, RoomType::Boss, &mut rng),
            vec![EnemyId::from_static("chrono_watcher")]
        );
        assert_eq!(
            select_encounter(3, RoomType::Boss, &mut rng),
            vec![EnemyId::from_static("sequence_progenitor")]
        );
    }

    #[test]
    fn pools_hold_enemies_of_the_matching_tier() {
        use crate::content::EnemyTier;
        for floor in 1..=3 {
            let pool = encounter_pool(floor);
            for (groups, tier) in [
                (pool.weak, EnemyTier::Normal),
                (pool.elite, EnemyTier::Elite),
                (pool.boss, EnemyTier::Boss),
            ] {
                for id in groups.iter().flat_map(|group| group.iter()) {
                    assert_eq!(require_enemy(id).tier(), tier, "{id} on floor {floor}");
                }
            }
        }
        assert!(std::ptr::eq(encounter_pool(7), encounter_pool(3)));
    }
}
