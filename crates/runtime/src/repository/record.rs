//! History entries written after every finished battle.

use game_core::{BattleEngine, BattleStats, RoomType, RunState};
use serde::{Deserialize, Serialize};

/// Remaining HP of one enemy at the end of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySummary {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    pub remaining_hp: i32,
}

/// One finished battle.
///
/// `recorded_at` is wall-clock metadata (unix seconds) and the only field
/// that differs between two replays of the same run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub seed: u64,
    pub floor: u32,
    pub node_id: String,
    pub room_type: RoomType,
    pub won: bool,
    pub turns: u32,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub enemies: Vec<EnemySummary>,
    pub stats: BattleStats,
    pub recorded_at: u64,
}

impl BattleRecord {
    /// Summarises a finished battle fought at the run's current node.
    pub fn from_battle(run: &RunState, engine: &BattleEngine, recorded_at: u64) -> Self {
        let state = engine.state();
        let (node_id, room_type) = run
            .current_node()
            .map(|node| (node.id.clone(), node.room_type))
            .unwrap_or_else(|| (String::new(), RoomType::Battle));

        Self {
            seed: run.seed,
            floor: run.floor,
            node_id,
            room_type,
            won: engine.outcome() == Some(true),
            turns: state.turn,
            player_hp: state.player.current_hp,
            player_max_hp: state.player.max_hp,
            enemies: state
                .enemies
                .iter()
                .map(|enemy| EnemySummary {
                    id: enemy.id.to_string(),
                    name: enemy.name.clone(),
                    max_hp: enemy.max_hp,
                    remaining_hp: enemy.current_hp,
                })
                .collect(),
            stats: engine.stats(),
            recorded_at,
        }
    }
}
