//! Consumable definitions.
//!
//! Consumables occupy one of a limited number of run slots and are spent on use.
//! Most only work inside a battle; a few also have an out-of-battle form
//! expressed as run effects.

use std::sync::OnceLock;

use super::Registry;
use super::statuses::STRENGTH;
use crate::action::{BattleEffect, EffectTarget, RunEffect};
use crate::ids::ConsumableId;
use crate::state::BattleSnapshot;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConsumableRarity {
    Common,
    Uncommon,
    Rare,
}

#[derive(Clone, Debug)]
pub struct ConsumableDefinition {
    pub id: ConsumableId,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: ConsumableRarity,
    pub in_battle: fn(&BattleSnapshot, Option<EffectTarget>) -> Vec<BattleEffect>,
    /// `None` when the consumable can only be used in battle.
    pub out_of_battle: Option<fn() -> Vec<RunEffect>>,
}

impl ConsumableDefinition {
    pub fn usable_outside_battle(&self) -> bool {
        self.out_of_battle.is_some()
    }
}

use EffectTarget::Player;

fn healing_potion(_: &BattleSnapshot, _: Option<EffectTarget>) -> Vec<BattleEffect> {
    vec![BattleEffect::Heal {
        target: Player,
        amount: 20,
    }]
}

fn healing_potion_outside() -> Vec<RunEffect> {
    vec![RunEffect::Heal { amount: 20 }]
}

fn block_potion(_: &BattleSnapshot, _: Option<EffectTarget>) -> Vec<BattleEffect> {
    vec![BattleEffect::block(Player, 12)]
}

fn strength_potion(_: &BattleSnapshot, _: Option<EffectTarget>) -> Vec<BattleEffect> {
    vec![BattleEffect::status(Player, STRENGTH, 2)]
}

fn purification_rune(_: &BattleSnapshot, _: Option<EffectTarget>) -> Vec<BattleEffect> {
    vec![BattleEffect::ClearMadness { amount: 0 }]
}

static DEFINITIONS: &[ConsumableDefinition] = &[
    ConsumableDefinition {
        id: ConsumableId::from_static("healing_potion"),
        name: "Healing Potion",
        description: "Heal 20 HP.",
        rarity: ConsumableRarity::Common,
        in_battle: healing_potion,
        out_of_battle: Some(healing_potion_outside),
    },
    ConsumableDefinition {
        id: ConsumableId::from_static("block_potion"),
        name: "Block Potion",
        description: "Gain 12 block.",
        rarity: ConsumableRarity::Common,
        in_battle: block_potion,
        out_of_battle: None,
    },
    ConsumableDefinition {
        id: ConsumableId::from_static("strength_potion"),
        name: "Strength Potion",
        description: "Gain 2 Strength.",
        rarity: ConsumableRarity::Uncommon,
        in_battle: strength_potion,
        out_of_battle: None,
    },
    ConsumableDefinition {
        id: ConsumableId::from_static("purification_rune"),
        name: "Purification Rune",
        description: "Remove all Madness.",
        rarity: ConsumableRarity::Uncommon,
        in_battle: purification_rune,
        out_of_battle: None,
    },
];

/// The consumable table.
pub fn consumables() -> &'static Registry<ConsumableId, ConsumableDefinition> {
    static REGISTRY: OnceLock<Registry<ConsumableId, ConsumableDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Registry::new(
            "consumable",
            DEFINITIONS.iter().map(|definition| (definition.id.clone(), definition)),
        )
    })
}

pub fn get_consumable(id: &str) -> Option<&'static ConsumableDefinition> {
    consumables().get(id)
}

/// Panics on an unknown id.
pub fn require_consumable(id: &str) -> &'static ConsumableDefinition {
    consumables().require(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_healing_potion_works_outside_battle() {
        let usable: Vec<&str> = consumables()
            .iter()
            .filter(|(_, c)| c.usable_outside_battle())
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(usable, vec!["healing_potion"]);
    }
}
