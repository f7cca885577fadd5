//! Sub-seed derivation.
//!
//! Each subsystem mixes the run seed with its own context using distinct
//! multiplicative constants and a subsystem salt. Two subsystems at the same
//! node, or one subsystem at two nodes, therefore never share a stream.
//!
//! Every constant below is part of the save-compatibility contract: changing
//! one silently changes every map, encounter and offer for existing seeds.

use super::fnv1a64;
use crate::generate::{RelicDropSource, RoomType};

/// Seed for the battle fought at `node_id`.
///
/// Drives encounter selection, enemy HP, deck shuffles and enemy AI rolls.
pub fn battle_seed(run_seed: u64, floor: u32, node_id: &str) -> u64 {
    run_seed
        ^ fnv1a64(node_id)
        ^ u64::from(floor).wrapping_mul(1_000_000_000)
        ^ 0xBA77_EEED_0000_0000
}

/// Seed for the card reward offered after a fight.
pub fn reward_seed(run_seed: u64, floor: u32, row: u32, node_id: &str, room: RoomType) -> u64 {
    let room_salt = match room {
        RoomType::Battle => 0xB4A7_7E00_0000_0000,
        RoomType::Elite => 0xE11E_7E00_0000_0000,
        _ => 0xA11C_E000_0000_0000,
    };
    run_seed
        ^ u64::from(floor).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ u64::from(row).wrapping_mul(0xBF58_476D_1CE4_E5B9)
        ^ fnv1a64(node_id)
        ^ room_salt
}

/// Seed for the gold dropped by a fight.
pub fn gold_seed(run_seed: u64, floor: u32, row: u32, node_id: &str, room: RoomType) -> u64 {
    let room_salt = match room {
        RoomType::Battle => 0xB4A7_601D_0000_0000,
        RoomType::Elite => 0xE11E_601D_0000_0000,
        RoomType::Boss => 0xB055_601D_0000_0000,
        _ => 0xA11C_601D_0000_0000,
    };
    run_seed
        ^ u64::from(floor).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ u64::from(row).wrapping_mul(0x1656_67B1_9E37_79F9)
        ^ fnv1a64(node_id)
        ^ room_salt
        ^ 0x601D_C01D_0000_0000
}

/// Seed for a shop's inventory.
pub fn shop_seed(run_seed: u64, floor: u32, row: u32, node_id: &str) -> u64 {
    run_seed
        ^ u64::from(floor).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ u64::from(row).wrapping_mul(0xBF58_476D_1CE4_E5B9)
        ^ fnv1a64(node_id)
        ^ 0x5A0F_5EED_0000_0000
}

/// Seed for the event rolled at an event node, including its random outcomes.
pub fn event_seed(run_seed: u64, floor: u32, row: u32, node_id: &str) -> u64 {
    run_seed
        ^ u64::from(floor).wrapping_mul(0xA24B_AED4_963E_E407)
        ^ u64::from(row).wrapping_mul(0x9FB2_1C65_1E98_DF25)
        ^ fnv1a64(node_id)
        ^ 0xE7E7_E7E7_0000_0000
}

/// Seed for a relic dropped by an elite or boss.
pub fn relic_drop_seed(
    run_seed: u64,
    floor: u32,
    row: u32,
    node_id: &str,
    room: RoomType,
    source: RelicDropSource,
) -> u64 {
    let room_salt = match room {
        RoomType::Elite => 0xE11E_7E11_0000_0000,
        RoomType::Boss => 0xB055_0000_0000_0000,
        _ => 0xA11C_EE11_0000_0000,
    };
    let source_salt = match source {
        RelicDropSource::Elite => 0xE1E7_EE11_0000_0000,
        RelicDropSource::Boss => 0xB055_B055_0000_0000,
    };
    run_seed
        ^ u64::from(floor).wrapping_mul(0xD6E8_FEB8_6659_FD93)
        ^ u64::from(row).wrapping_mul(0x94D0_49BB_1331_11EB)
        ^ fnv1a64(node_id)
        ^ room_salt
        ^ source_salt
}

/// Seed for the map of act `floor`.
pub fn map_seed(run_seed: u64, floor: u32) -> u64 {
    run_seed
        ^ u64::from(floor).wrapping_mul(0xD1B5_4A32_D192_ED03)
        ^ fnv1a64("map")
        ^ 0x3A90_5EED_0000_0000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_seed_is_deterministic() {
        assert_eq!(battle_seed(123, 1, "3_1"), battle_seed(123, 1, "3_1"));
    }

    #[test]
    fn battle_seed_changes_with_node_and_floor() {
        let base = battle_seed(123, 1, "3_1");
        assert_ne!(base, battle_seed(123, 1, "3_2"));
        assert_ne!(base, battle_seed(123, 2, "3_1"));
    }

    #[test]
    fn subsystems_never_share_a_seed_at_the_same_node() {
        for seed in [0_u64, 1, 42, 0xDEAD_BEEF, u64::MAX] {
            let seeds = [
                battle_seed(seed, 1, "3_1"),
                reward_seed(seed, 1, 3, "3_1", RoomType::Battle),
                gold_seed(seed, 1, 3, "3_1", RoomType::Battle),
                shop_seed(seed, 1, 3, "3_1"),
                event_seed(seed, 1, 3, "3_1"),
                relic_drop_seed(seed, 1, 3, "3_1", RoomType::Elite, RelicDropSource::Elite),
                map_seed(seed, 1),
            ];
            for (i, a) in seeds.iter().enumerate() {
                for b in &seeds[i + 1..] {
                    assert_ne!(a, b, "seed {seed} produced colliding sub-seeds");
                }
            }
        }
    }

    #[test]
    fn room_type_salts_the_reward_seed() {
        assert_ne!(
            reward_seed(42, 1, 3, "3_1", RoomType::Battle),
            reward_seed(42, 1, 3, "3_1", RoomType::Elite)
        );
        assert_ne!(
            gold_seed(42, 1, 3, "3_1", RoomType::Elite),
            gold_seed(42, 1, 3, "3_1", RoomType::Boss)
        );
    }
}
