//! Mutable combatant and battle state.
//!
//! Everything here is plain data. Mutation during a battle goes through the
//! battle engine's effect resolution; content definitions only ever see a
//! [`BattleSnapshot`].
mod battle;
mod card;
mod entity;
mod snapshot;
mod status;

pub use battle::{BattlePhase, BattleState};
pub use card::Card;
pub use entity::Entity;
pub use snapshot::BattleSnapshot;
pub use status::StatusContainer;
