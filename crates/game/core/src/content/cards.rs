//! Card definitions.
//!
//! A card is a data descriptor plus a pure `play` function from a battle
//! snapshot to effects, in the same spirit as item definitions: no card can
//! touch battle state directly.

use std::sync::OnceLock;

use super::Registry;
use super::statuses::{DEXTERITY, MADNESS, POISON, SEQUENCE_RESONANCE, STRENGTH, VULNERABLE, WEAK};
use crate::action::{BattleEffect, EffectTarget, RewrittenIntent};
use crate::ids::CardId;
use crate::state::{BattleSnapshot, Card};

/// Card category. Drives statistics, relic triggers and where a played card goes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardType {
    Attack,
    Skill,
    /// Exhausted after play.
    Power,
}

impl CardType {
    /// Whether a played card of this type leaves the battle instead of being discarded.
    pub fn exhausts(self) -> bool {
        matches!(self, Self::Power)
    }
}

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
pub enum CardRarity {
    Starter,
    Common,
    Uncommon,
    Rare,
}

/// Whether playing the card requires choosing an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardTargeting {
    None,
    SingleEnemy,
}

/// Input to a card's `play` function.
pub struct CardPlay<'a> {
    pub snapshot: &'a BattleSnapshot,
    /// Validated living enemy for [`CardTargeting::SingleEnemy`] cards.
    pub target: Option<EffectTarget>,
}

impl CardPlay<'_> {
    fn enemy(&self) -> EffectTarget {
        self.target.unwrap_or(EffectTarget::Enemy(0))
    }
}

/// Static description of a card kind.
#[derive(Clone, Debug)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: &'static str,
    pub card_type: CardType,
    pub rarity: CardRarity,
    pub cost: i32,
    pub targeting: CardTargeting,
    pub rules_text: &'static str,
    /// Id of the upgraded variant, if this card can be upgraded.
    pub upgraded_id: Option<CardId>,
    /// True for `+` variants. Upgraded cards are never offered as rewards.
    pub is_upgraded: bool,
    pub play: fn(&CardPlay<'_>) -> Vec<BattleEffect>,
}

impl CardDefinition {
    pub fn effects(&self, snapshot: &BattleSnapshot, target: Option<EffectTarget>) -> Vec<BattleEffect> {
        (self.play)(&CardPlay { snapshot, target })
    }

    pub fn can_upgrade(&self) -> bool {
        self.upgraded_id.is_some()
    }
}

use BattleEffect as E;
use EffectTarget::Player;

fn strike(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::damage(Player, play.enemy(), 6)]
}

fn strike_plus(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::damage(Player, play.enemy(), 9)]
}

fn defend(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::block(Player, 5)]
}

fn defend_plus(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::block(Player, 8)]
}

fn bash(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    let target = play.enemy();
    vec![E::damage(Player, target, 8), E::status(target, VULNERABLE, 2)]
}

fn bash_plus(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    let target = play.enemy();
    vec![E::damage(Player, target, 10), E::status(target, VULNERABLE, 3)]
}

fn pommel_strike(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::damage(Player, play.enemy(), 9), E::DrawCards { count: 1 }]
}

fn shrug_it_off(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::block(Player, 8), E::DrawCards { count: 1 }]
}

fn inflame(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::status(Player, STRENGTH, 2)]
}

fn clothesline(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    let target = play.enemy();
    vec![E::damage(Player, target, 12), E::status(target, WEAK, 2)]
}

fn cleave(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    play.snapshot
        .living_enemy_targets()
        .into_iter()
        .map(|target| E::damage(Player, target, 4))
        .collect()
}

fn intimidate(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    play.snapshot
        .living_enemy_targets()
        .into_iter()
        .map(|target| E::status(target, WEAK, 2))
        .collect()
}

fn agile_stance(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::status(Player, DEXTERITY, 1)]
}

fn poisoned_strike(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    let target = play.enemy();
    vec![E::damage(Player, target, 5), E::status(target, POISON, 2)]
}

fn truth_whisper(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::damage(Player, play.enemy(), 5),
        E::Foresight { count: 1 },
        E::status(Player, MADNESS, 1),
    ]
}

fn truth_whisper_plus(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::damage(Player, play.enemy(), 7),
        E::Foresight { count: 2 },
        E::status(Player, MADNESS, 1),
    ]
}

fn spirit_sight(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::Foresight { count: 2 }, E::status(Player, MADNESS, 1)]
}

fn spirit_sight_plus(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::Foresight { count: 3 }, E::status(Player, MADNESS, 1)]
}

const FATE_REWRITE: RewrittenIntent = RewrittenIntent::Defend { block: 10 };

fn fate_rewrite(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    let EffectTarget::Enemy(enemy) = play.enemy() else {
        return Vec::new();
    };
    vec![
        E::RewriteIntent {
            enemy,
            intent: FATE_REWRITE,
        },
        E::status(Player, MADNESS, 2),
    ]
}

fn fate_rewrite_plus(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    let mut effects: Vec<BattleEffect> = play
        .snapshot
        .living_enemy_targets()
        .into_iter()
        .filter_map(|target| match target {
            EffectTarget::Enemy(enemy) => Some(E::RewriteIntent {
                enemy,
                intent: FATE_REWRITE,
            }),
            EffectTarget::Player => None,
        })
        .collect();
    effects.push(E::status(Player, MADNESS, 2));
    effects
}

fn time_shard(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::Rewind { count: 1 },
        E::DrawCards { count: 1 },
        E::status(Player, MADNESS, 1),
    ]
}

fn time_shard_plus(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::Rewind { count: 2 },
        E::DrawCards { count: 1 },
        E::status(Player, MADNESS, 1),
    ]
}

fn sequence_resonance(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::status(Player, SEQUENCE_RESONANCE, 1),
        E::status(Player, MADNESS, 1),
    ]
}

fn sequence_resonance_plus(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::status(Player, SEQUENCE_RESONANCE, 2),
        E::status(Player, MADNESS, 1),
    ]
}

fn prophecy_echo(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::DamagePerForesight {
            source: Player,
            target: play.enemy(),
            per_foresight: 3,
        },
        E::status(Player, MADNESS, 1),
    ]
}

fn prophecy_echo_plus(play: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![
        E::DamagePerForesight {
            source: Player,
            target: play.enemy(),
            per_foresight: 4,
        },
        E::status(Player, MADNESS, 1),
    ]
}

fn purification_ritual(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::ClearMadness { amount: 0 }, E::DiscardRandom { count: 1 }]
}

fn purification_ritual_plus(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::ClearMadness { amount: 0 }]
}

fn meditation(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::block(Player, 4), E::ClearMadness { amount: 2 }]
}

fn meditation_plus(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::block(Player, 6), E::ClearMadness { amount: 3 }]
}

fn sanity_burn(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::status(Player, STRENGTH, 2), E::status(Player, MADNESS, 3)]
}

fn sanity_burn_plus(_: &CardPlay<'_>) -> Vec<BattleEffect> {
    vec![E::status(Player, STRENGTH, 3), E::status(Player, MADNESS, 3)]
}

macro_rules! card {
    (
        $id:literal, $name:literal, $card_type:ident, $rarity:ident, cost $cost:literal,
        $targeting:ident, $text:literal, upgrade $upgrade:expr, upgraded $is_upgraded:literal, $play:path
    ) => {
        CardDefinition {
            id: CardId::from_static($id),
            name: $name,
            card_type: CardType::$card_type,
            rarity: CardRarity::$rarity,
            cost: $cost,
            targeting: CardTargeting::$targeting,
            rules_text: $text,
            upgraded_id: $upgrade,
            is_upgraded: $is_upgraded,
            play: $play,
        }
    };
}

const fn up(id: &'static str) -> Option<CardId> {
    Some(CardId::from_static(id))
}

static DEFINITIONS: &[CardDefinition] = &[
    // ===== starter =====
    card!("strike", "Strike", Attack, Starter, cost 1, SingleEnemy,
        "Deal 6 damage.", upgrade up("strike+"), upgraded false, strike),
    card!("strike+", "Strike+", Attack, Starter, cost 1, SingleEnemy,
        "Deal 9 damage.", upgrade None, upgraded true, strike_plus),
    card!("defend", "Defend", Skill, Starter, cost 1, None,
        "Gain 5 block.", upgrade up("defend+"), upgraded false, defend),
    card!("defend+", "Defend+", Skill, Starter, cost 1, None,
        "Gain 8 block.", upgrade None, upgraded true, defend_plus),
    card!("bash", "Bash", Attack, Starter, cost 2, SingleEnemy,
        "Deal 8 damage. Apply 2 Vulnerable.", upgrade up("bash+"), upgraded false, bash),
    card!("bash+", "Bash+", Attack, Starter, cost 2, SingleEnemy,
        "Deal 10 damage. Apply 3 Vulnerable.", upgrade None, upgraded true, bash_plus),
    // ===== common =====
    card!("pommel_strike", "Pommel Strike", Attack, Common, cost 1, SingleEnemy,
        "Deal 9 damage. Draw 1 card.", upgrade None, upgraded false, pommel_strike),
    card!("shrug_it_off", "Shrug It Off", Skill, Common, cost 1, None,
        "Gain 8 block. Draw 1 card.", upgrade None, upgraded false, shrug_it_off),
    card!("inflame", "Inflame", Power, Common, cost 1, None,
        "Gain 2 Strength.", upgrade None, upgraded false, inflame),
    card!("clothesline", "Clothesline", Attack, Common, cost 2, SingleEnemy,
        "Deal 12 damage. Apply 2 Weak.", upgrade None, upgraded false, clothesline),
    card!("cleave", "Cleave", Attack, Common, cost 1, None,
        "Deal 4 damage to ALL enemies.", upgrade None, upgraded false, cleave),
    card!("intimidate", "Intimidate", Skill, Common, cost 1, None,
        "Apply 2 Weak to ALL enemies.", upgrade None, upgraded false, intimidate),
    card!("agile_stance", "Agile Stance", Power, Common, cost 1, None,
        "Gain 1 Dexterity.", upgrade None, upgraded false, agile_stance),
    card!("poisoned_strike", "Poisoned Strike", Attack, Common, cost 1, SingleEnemy,
        "Deal 5 damage. Apply 2 Poison.", upgrade None, upgraded false, poisoned_strike),
    card!("truth_whisper", "Truth Whisper", Attack, Common, cost 1, SingleEnemy,
        "Deal 5 damage. Foresight 1. Gain 1 Madness.", upgrade up("truth_whisper+"), upgraded false, truth_whisper),
    card!("truth_whisper+", "Truth Whisper+", Attack, Common, cost 1, SingleEnemy,
        "Deal 7 damage. Foresight 2. Gain 1 Madness.", upgrade None, upgraded true, truth_whisper_plus),
    card!("spirit_sight", "Spirit Sight", Skill, Common, cost 0, None,
        "Foresight 2. Gain 1 Madness.", upgrade up("spirit_sight+"), upgraded false, spirit_sight),
    card!("spirit_sight+", "Spirit Sight+", Skill, Common, cost 0, None,
        "Foresight 3. Gain 1 Madness.", upgrade None, upgraded true, spirit_sight_plus),
    card!("meditation", "Meditation", Skill, Common, cost 1, None,
        "Gain 4 block. Remove 2 Madness.", upgrade up("meditation+"), upgraded false, meditation),
    card!("meditation+", "Meditation+", Skill, Common, cost 1, None,
        "Gain 6 block. Remove 3 Madness.", upgrade None, upgraded true, meditation_plus),
    card!("sanity_burn", "Sanity Burn", Skill, Common, cost 1, None,
        "Gain 2 Strength. Gain 3 Madness.", upgrade up("sanity_burn+"), upgraded false, sanity_burn),
    card!("sanity_burn+", "Sanity Burn+", Skill, Common, cost 1, None,
        "Gain 3 Strength. Gain 3 Madness.", upgrade None, upgraded true, sanity_burn_plus),
    // ===== uncommon =====
    card!("fate_rewrite", "Fate Rewrite", Skill, Uncommon, cost 1, SingleEnemy,
        "Rewrite the enemy's intent to Defend 10. Gain 2 Madness.",
        upgrade up("fate_rewrite+"), upgraded false, fate_rewrite),
    card!("fate_rewrite+", "Fate Rewrite+", Skill, Uncommon, cost 1, None,
        "Rewrite ALL enemy intents to Defend 10. Gain 2 Madness.",
        upgrade None, upgraded true, fate_rewrite_plus),
    card!("time_shard", "Time Shard", Skill, Uncommon, cost 1, None,
        "Rewind 1. Draw 1 card. Gain 1 Madness.", upgrade up("time_shard+"), upgraded false, time_shard),
    card!("time_shard+", "Time Shard+", Skill, Uncommon, cost 1, None,
        "Rewind 2. Draw 1 card. Gain 1 Madness.", upgrade None, upgraded true, time_shard_plus),
    card!("sequence_resonance", "Sequence Resonance", Power, Uncommon, cost 1, None,
        "Whenever you Foresee, gain 1 block. Gain 1 Madness.",
        upgrade up("sequence_resonance+"), upgraded false, sequence_resonance),
    card!("sequence_resonance+", "Sequence Resonance+", Power, Uncommon, cost 1, None,
        "Whenever you Foresee, gain 2 block. Gain 1 Madness.",
        upgrade None, upgraded true, sequence_resonance_plus),
    card!("prophecy_echo", "Prophecy Echo", Attack, Uncommon, cost 1, SingleEnemy,
        "Deal 3 damage for each Foresight this turn. Gain 1 Madness.",
        upgrade up("prophecy_echo+"), upgraded false, prophecy_echo),
    card!("prophecy_echo+", "Prophecy Echo+", Attack, Uncommon, cost 1, SingleEnemy,
        "Deal 4 damage for each Foresight this turn. Gain 1 Madness.",
        upgrade None, upgraded true, prophecy_echo_plus),
    card!("purification_ritual", "Purification Ritual", Skill, Uncommon, cost 1, None,
        "Remove ALL Madness. Discard 1 random card.",
        upgrade up("purification_ritual+"), upgraded false, purification_ritual),
    card!("purification_ritual+", "Purification Ritual+", Skill, Uncommon, cost 1, None,
        "Remove ALL Madness.", upgrade None, upgraded true, purification_ritual_plus),
];

/// The card table.
pub fn cards() -> &'static Registry<CardId, CardDefinition> {
    static REGISTRY: OnceLock<Registry<CardId, CardDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Registry::new(
            "card",
            DEFINITIONS.iter().map(|definition| (definition.id.clone(), definition)),
        )
    })
}

pub fn get_card(id: &str) -> Option<&'static CardDefinition> {
    cards().get(id)
}

/// Panics on an unknown id.
pub fn require_card(id: &str) -> &'static CardDefinition {
    cards().require(id)
}

/// Cards that may appear as rewards and in shops: non-starter, non-upgraded,
/// sorted by id.
pub fn rewardable_cards() -> Vec<CardId> {
    cards()
        .iter()
        .filter(|(_, definition)| definition.rarity != CardRarity::Starter && !definition.is_upgraded)
        .map(|(id, _)| id.clone())
        .collect()
}

/// Deck indices of cards that have an upgraded variant.
pub fn upgradeable_indices(deck: &[Card]) -> Vec<usize> {
    deck.iter()
        .enumerate()
        .filter(|(_, card)| require_card(card.card_id.as_str()).can_upgrade())
        .map(|(index, _)| index)
        .collect()
}

/// The deck every run starts with.
pub fn starter_deck() -> Vec<Card> {
    const LAYOUT: &[(&str, &str)] = &[
        ("strike_1", "strike"),
        ("strike_2", "strike"),
        ("strike_3", "strike"),
        ("strike_4", "strike"),
        ("defend_1", "defend"),
        ("defend_2", "defend"),
        ("defend_3", "defend"),
        ("defend_4", "defend"),
        ("bash_1", "bash"),
        ("shrug_it_off_1", "shrug_it_off"),
        ("inflame_1", "inflame"),
        ("clothesline_1", "clothesline"),
    ];
    LAYOUT
        .iter()
        .map(|(instance, card)| Card::new(*instance, require_card(card).id.clone()))
        .collect()
}
