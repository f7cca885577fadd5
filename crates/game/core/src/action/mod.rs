//! Instruction vocabulary shared by content, the battle engine and the run.
//!
//! - [`BattleEffect`] / [`EffectTarget`]: what content asks the engine to do
//! - [`BattleTrigger`]: when relics get to react
//! - [`PlayerAction`]: what the player asks the engine to do
//! - [`RunEffect`]: changes to the run outside of battle
mod effect;
mod player;
mod run_effect;
mod trigger;

pub use effect::{BattleEffect, EffectTarget, RewrittenIntent};
pub use player::PlayerAction;
pub use run_effect::RunEffect;
pub use trigger::BattleTrigger;
