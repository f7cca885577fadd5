//! Run-level state between battles.
//!
//! A [`RunState`] owns everything that survives from one node to the next:
//! the act map, deck, relics, consumables, gold and the player's HP and
//! persistent statuses. Battles borrow a [`Loadout`](crate::engine::Loadout)
//! from it and write their result back once finished.
mod error;
mod shop;
mod snapshot;
mod state;

pub use error::{LoadError, RunError};
pub use snapshot::{DeckEntry, MapNodeSnapshot, PlayerSnapshot, RunSnapshot};
pub use state::RunState;
