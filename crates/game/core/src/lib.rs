//! Deterministic card-battler rules shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical rules (content tables, battle engine,
//! run progression and generators) as pure APIs without I/O. Every random
//! decision is a function of the run seed and the context it is made in, so
//! the same seed and the same player inputs always produce the same event log.
//! Battle state is only mutated by [`engine::BattleEngine`]; run state only by
//! the operations on [`run::RunState`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod generate;
pub mod ids;
pub mod rng;
pub mod run;
pub mod state;

pub use action::{BattleEffect, BattleTrigger, EffectTarget, PlayerAction, RunEffect};
pub use ai::{AiContext, EnemyMove, IntentCategory, decide_intent};
pub use config::GameConfig;
pub use engine::{BattleEngine, BattleEvent, BattleStats, Loadout, PendingInput};
pub use error::{ErrorSeverity, GameError};
pub use generate::{
    CardRewardOffer, EventOffer, MapNode, RewardContext, RoomType, ShopInventory, generate_map,
};
pub use ids::{CardId, ConsumableId, EnemyId, EntityId, EventId, RelicId, StatusId};
pub use rng::SeededRng;
pub use run::{LoadError, RunError, RunSnapshot, RunState};
pub use state::{BattlePhase, BattleSnapshot, BattleState, Card, Entity, StatusContainer};
