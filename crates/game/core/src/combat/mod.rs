//! Combat math: the status modifier pipeline, damage and block.
mod damage;
mod modifiers;

pub use damage::{DamageOutcome, absorb, calculate_block, calculate_damage};
pub use modifiers::apply_modifiers;
