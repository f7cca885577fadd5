//! Static content tables.
//!
//! Cards, statuses, relics, consumables, enemies and events are looked up by
//! id in immutable registries built on first use. Adding content means adding
//! a definition here; nothing else in the crate branches on specific ids
//! except the madness rules and the passive relics in the battle engine.
mod cards;
mod consumables;
mod encounters;
mod enemies;
mod events;
mod registry;
mod relics;
mod statuses;

pub use cards::{
    CardDefinition, CardPlay, CardRarity, CardTargeting, CardType, cards, get_card,
    require_card, rewardable_cards, starter_deck, upgradeable_indices,
};
pub use consumables::{
    ConsumableDefinition, ConsumableRarity, consumables, get_consumable, require_consumable,
};
pub use encounters::{EncounterPool, encounter_pool, select_encounter};
pub use enemies::{EnemyDefinition, EnemyTier, enemies, get_enemy, require_enemy};
pub use events::{EventDefinition, events, get_event, require_event};
pub use registry::Registry;
pub use relics::{
    BROKEN_WATCH, BURNING_BLOOD, MADNESS_MASK, MADNESS_MASK_THRESHOLD, PROPHET_NOTES, RelicDefinition,
    RelicRarity, SANITY_ANCHOR, SANITY_ANCHOR_OFFSET, get_relic, relics, require_relic,
};
pub use statuses::{
    DEXTERITY, FRAIL, MADNESS, ModifierKind, ModifierPhase, POISON, SEQUENCE_RESONANCE, STRENGTH,
    StatusDecay, StatusDefinition, VULNERABLE, WEAK, get_status, require_status, statuses,
};
