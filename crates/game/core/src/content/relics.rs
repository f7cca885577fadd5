//! Relic definitions.

use std::sync::OnceLock;

use super::Registry;
use super::cards::CardType;
use super::statuses::{DEXTERITY, MADNESS, POISON, STRENGTH};
use crate::action::{BattleEffect, BattleTrigger, EffectTarget};
use crate::ids::RelicId;
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
pub enum RelicRarity {
    Starter,
    Common,
    Uncommon,
    Rare,
    Boss,
}

/// Static description of a relic: a trigger reaction and nothing else.
#[derive(Clone, Debug)]
pub struct RelicDefinition {
    pub id: RelicId,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: RelicRarity,
    pub on_trigger: fn(&BattleTrigger, &BattleSnapshot) -> Vec<BattleEffect>,
}

use EffectTarget::Player;

fn burning_blood(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleEnd { won: true } => vec![BattleEffect::Heal {
            target: Player,
            amount: 6,
        }],
        _ => Vec::new(),
    }
}

fn vajra(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleStart => vec![BattleEffect::status(Player, STRENGTH, 1)],
        _ => Vec::new(),
    }
}

fn lantern(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleStart => vec![BattleEffect::GainEnergy { amount: 1 }],
        _ => Vec::new(),
    }
}

fn iron_bracer(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::CardPlayed {
            card_type: CardType::Attack,
            ..
        } => vec![BattleEffect::block(Player, 2)],
        _ => Vec::new(),
    }
}

fn feather_cloak(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleStart => vec![BattleEffect::status(Player, DEXTERITY, 1)],
        _ => Vec::new(),
    }
}

fn war_banner(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleStart => vec![BattleEffect::status(Player, STRENGTH, 2)],
        _ => Vec::new(),
    }
}

fn colossus_core(trigger: &BattleTrigger, snapshot: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleStart => snapshot
            .living_enemy_targets()
            .into_iter()
            .map(|target| BattleEffect::status(target, POISON, 3))
            .collect(),
        _ => Vec::new(),
    }
}

fn third_eye(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleStart => vec![BattleEffect::Foresight { count: 2 }],
        _ => Vec::new(),
    }
}

fn abyssal_eye(trigger: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    match trigger {
        BattleTrigger::BattleStart => vec![
            BattleEffect::Foresight { count: 3 },
            BattleEffect::status(Player, MADNESS, 1),
        ],
        _ => Vec::new(),
    }
}

/// Relics the battle engine checks by id instead of through a trigger.
fn passive(_: &BattleTrigger, _: &BattleSnapshot) -> Vec<BattleEffect> {
    Vec::new()
}

pub const BURNING_BLOOD: RelicId = RelicId::from_static("burning_blood");
/// The first foresight of each turn reveals one more card.
pub const BROKEN_WATCH: RelicId = RelicId::from_static("broken_watch");
/// Every madness threshold is raised by [`SANITY_ANCHOR_OFFSET`].
pub const SANITY_ANCHOR: RelicId = RelicId::from_static("sanity_anchor");
pub const SANITY_ANCHOR_OFFSET: i32 = 3;
/// The first card of a battle that rewrites an intent adds no madness.
pub const PROPHET_NOTES: RelicId = RelicId::from_static("prophet_notes");
/// Player attack damage is multiplied by 3/2 at [`MADNESS_MASK_THRESHOLD`]
/// madness or more.
pub const MADNESS_MASK: RelicId = RelicId::from_static("madness_mask");
pub const MADNESS_MASK_THRESHOLD: i32 = 6;

static DEFINITIONS: &[RelicDefinition] = &[
    RelicDefinition {
        id: BURNING_BLOOD,
        name: "Burning Blood",
        description: "At the end of a won battle, heal 6 HP.",
        rarity: RelicRarity::Starter,
        on_trigger: burning_blood,
    },
    RelicDefinition {
        id: RelicId::from_static("vajra"),
        name: "Vajra",
        description: "At the start of each battle, gain 1 Strength.",
        rarity: RelicRarity::Common,
        on_trigger: vajra,
    },
    RelicDefinition {
        id: RelicId::from_static("lantern"),
        name: "Lantern",
        description: "At the start of each battle, gain 1 energy.",
        rarity: RelicRarity::Common,
        on_trigger: lantern,
    },
    RelicDefinition {
        id: RelicId::from_static("iron_bracer"),
        name: "Iron Bracer",
        description: "Whenever you play an attack, gain 2 block.",
        rarity: RelicRarity::Common,
        on_trigger: iron_bracer,
    },
    RelicDefinition {
        id: RelicId::from_static("feather_cloak"),
        name: "Feather Cloak",
        description: "At the start of each battle, gain 1 Dexterity.",
        rarity: RelicRarity::Uncommon,
        on_trigger: feather_cloak,
    },
    RelicDefinition {
        id: RelicId::from_static("war_banner"),
        name: "War Banner",
        description: "At the start of each battle, gain 2 Strength.",
        rarity: RelicRarity::Rare,
        on_trigger: war_banner,
    },
    RelicDefinition {
        id: RelicId::from_static("colossus_core"),
        name: "Colossus Core",
        description: "At the start of each battle, apply 3 Poison to ALL enemies.",
        rarity: RelicRarity::Boss,
        on_trigger: colossus_core,
    },
    RelicDefinition {
        id: RelicId::from_static("third_eye"),
        name: "Third Eye",
        description: "At the start of each battle, Foresight 2.",
        rarity: RelicRarity::Common,
        on_trigger: third_eye,
    },
    RelicDefinition {
        id: BROKEN_WATCH,
        name: "Broken Watch",
        description: "Your first Foresight each turn reveals 1 more card.",
        rarity: RelicRarity::Common,
        on_trigger: passive,
    },
    RelicDefinition {
        id: SANITY_ANCHOR,
        name: "Sanity Anchor",
        description: "Every madness threshold is raised by 3.",
        rarity: RelicRarity::Uncommon,
        on_trigger: passive,
    },
    RelicDefinition {
        id: RelicId::from_static("abyssal_eye"),
        name: "Abyssal Eye",
        description: "At the start of each battle, Foresight 3 and gain 1 Madness.",
        rarity: RelicRarity::Uncommon,
        on_trigger: abyssal_eye,
    },
    RelicDefinition {
        id: PROPHET_NOTES,
        name: "Prophet's Notes",
        description: "The first time you rewrite an intent each battle, gain no Madness.",
        rarity: RelicRarity::Uncommon,
        on_trigger: passive,
    },
    RelicDefinition {
        id: MADNESS_MASK,
        name: "Madness Mask",
        description: "While you have 6 or more Madness, your attacks deal 50% more damage.",
        rarity: RelicRarity::Rare,
        on_trigger: passive,
    },
];

/// The relic table.
pub fn relics() -> &'static Registry<RelicId, RelicDefinition> {
    static REGISTRY: OnceLock<Registry<RelicId, RelicDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Registry::new(
            "relic",
            DEFINITIONS.iter().map(|definition| (definition.id.clone(), definition)),
        )
    })
}

pub fn get_relic(id: &str) -> Option<&'static RelicDefinition> {
    relics().get(id)
}

/// Panics on an unknown id.
pub fn require_relic(id: &str) -> &'static RelicDefinition {
    relics().require(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Entity;

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot {
            turn: 1,
            player: Entity::player("Test", 80, 80),
            enemies: vec![Entity::enemy("cultist".into(), "cultist".into(), "Cultist", 50)],
            energy: 3,
        }
    }

    #[test]
    fn burning_blood_heals_only_after_a_win() {
        let relic = require_relic("burning_blood");
        let snap = snapshot();
        assert!((relic.on_trigger)(&BattleTrigger::BattleEnd { won: false }, &snap).is_empty());
        assert_eq!(
            (relic.on_trigger)(&BattleTrigger::BattleEnd { won: true }, &snap),
            vec![BattleEffect::Heal { target: Player, amount: 6 }]
        );
    }

    #[test]
    fn iron_bracer_ignores_skills() {
        let relic = require_relic("iron_bracer");
        let snap = snapshot();
        let skill = BattleTrigger::CardPlayed {
            card_id: "defend".into(),
            card_type: CardType::Skill,
        };
        assert!((relic.on_trigger)(&skill, &snap).is_empty());
    }

    #[test]
    fn abyssal_eye_foresees_and_adds_madness_at_battle_start() {
        let relic = require_relic("abyssal_eye");
        assert_eq!(
            (relic.on_trigger)(&BattleTrigger::BattleStart, &snapshot()),
            vec![
                BattleEffect::Foresight { count: 3 },
                BattleEffect::status(Player, MADNESS, 1),
            ]
        );
        assert!((relic.on_trigger)(&BattleTrigger::TurnStart { turn: 2 }, &snapshot()).is_empty());
    }

    #[test]
    fn passive_relics_never_emit_effects() {
        for id in [BROKEN_WATCH, SANITY_ANCHOR, PROPHET_NOTES, MADNESS_MASK] {
            let relic = require_relic(id.as_str());
            assert!((relic.on_trigger)(&BattleTrigger::BattleStart, &snapshot()).is_empty());
        }
    }

    #[test]
    fn only_one_starter_relic() {
        let starters: Vec<_> = relics()
            .iter()
            .filter(|(_, r)| r.rarity == RelicRarity::Starter)
            .collect();
        assert_eq!(starters.len(), 1);
    }
}
