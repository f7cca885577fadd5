//! Map event definitions.
//!
//! An event turns an [`EventContext`] plus the event RNG into an offer: a fixed
//! list of options whose effects are fully rolled at generation time, so the
//! player sees exact numbers and picking an option never draws randomness.

use std::sync::OnceLock;

use super::Registry;
use super::cards::{rewardable_cards, upgradeable_indices, require_card};
use super::relics::{BROKEN_WATCH, require_relic};
use super::statuses::MADNESS;
use crate::action::RunEffect;
use crate::generate::{EventContext, EventFollowUp, EventOffer, EventOption, available_relics};
use crate::ids::{CardId, EnemyId, EventId};
use crate::rng::SeededRng;

pub trait EventDefinition: Send + Sync {
    fn id(&self) -> EventId;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn options(&self, ctx: &EventContext, rng: &mut SeededRng) -> Vec<EventOption>;

    fn generate(&self, ctx: &EventContext, rng: &mut SeededRng) -> EventOffer {
        EventOffer {
            event_id: self.id(),
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            options: self.options(ctx, rng),
        }
    }
}

fn leave() -> EventOption {
    EventOption::new("Leave", Vec::new())
}

struct Scavenger;

impl EventDefinition for Scavenger {
    fn id(&self) -> EventId {
        EventId::from_static("scavenger")
    }
    fn name(&self) -> &'static str {
        "Scavenger"
    }
    fn description(&self) -> &'static str {
        "A torn satchel lies in the corner. Something inside clinks."
    }
    fn options(&self, _ctx: &EventContext, rng: &mut SeededRng) -> Vec<EventOption> {
        let small_gold = 30 + rng.next_int(21) as i32;
        let big_gold = 70 + rng.next_int(21) as i32;
        let damage = 6 + rng.next_int(5) as i32;
        vec![
            EventOption::new("Take the gold", vec![RunEffect::GainGold { amount: small_gold }])
                .preview(format!("Gain {small_gold} gold")),
            EventOption::new(
                "Dig deeper",
                vec![
                    RunEffect::TakeDamage { amount: damage },
                    RunEffect::GainGold { amount: big_gold },
                ],
            )
            .preview(format!("Lose {damage} HP, gain {big_gold} gold")),
            leave(),
        ]
    }
}

struct Altar;

impl Altar {
    const SACRIFICE_GOLD: i32 = 50;
    const PRAYER_HEAL: i32 = 10;
}

impl EventDefinition for Altar {
    fn id(&self) -> EventId {
        EventId::from_static("altar")
    }
    fn name(&self) -> &'static str {
        "Altar"
    }
    fn description(&self) -> &'static str {
        "An ancient altar stands by the road, humming faintly."
    }
    fn options(&self, ctx: &EventContext, rng: &mut SeededRng) -> Vec<EventOption> {
        let mut options = Vec::new();
        if ctx.gold >= Self::SACRIFICE_GOLD {
            let candidates = available_relics(&ctx.relic_ids);
            if let Some(picked) = rng.shuffled(&candidates).into_iter().next() {
                let name = require_relic(picked.as_str()).name;
                options.push(
                    EventOption::new(
                        format!("Offer {} gold", Self::SACRIFICE_GOLD),
                        vec![
                            RunEffect::LoseGold {
                                amount: Self::SACRIFICE_GOLD,
                            },
                            RunEffect::AddRelic { relic_id: picked },
                        ],
                    )
                    .preview(format!("Obtain relic: {name}")),
                );
            }
        }
        options.push(
            EventOption::new(
                "Pray",
                vec![RunEffect::Heal {
                    amount: Self::PRAYER_HEAL,
                }],
            )
            .preview(format!("Heal {} HP", Self::PRAYER_HEAL)),
        );
        options.push(leave());
        options
    }
}

struct Training;

impl EventDefinition for Training {
    fn id(&self) -> EventId {
        EventId::from_static("training")
    }
    fn name(&self) -> &'static str {
        "Training Ground"
    }
    fn description(&self) -> &'static str {
        "A quiet clearing, good for a short drill."
    }
    fn options(&self, ctx: &EventContext, rng: &mut SeededRng) -> Vec<EventOption> {
        let mut options = Vec::new();
        let upgradeable = upgradeable_indices(&ctx.deck);
        if !upgradeable.is_empty() {
            options.push(
                EventOption::new("Focused drill", Vec::new())
                    .preview("Upgrade 1 card")
                    .follow_up(EventFollowUp::ChooseUpgradeableCard {
                        indices: upgradeable,
                    }),
            );
        }
        let pool = rewardable_cards();
        if let Some(picked) = rng.shuffled(&pool).into_iter().next() {
            let name = require_card(picked.as_str()).name;
            options.push(
                EventOption::new("Learn a technique", vec![RunEffect::AddCard { card_id: picked }])
                    .preview(format!("Obtain: {name}")),
            );
        }
        options.push(leave());
        options
    }
}

struct MadProphetEncounter;

impl EventDefinition for MadProphetEncounter {
    fn id(&self) -> EventId {
        EventId::from_static("mad_prophet")
    }
    fn name(&self) -> &'static str {
        "The Mad Prophet"
    }
    fn description(&self) -> &'static str {
        "A ragged figure blocks the path, murmuring about the end of days."
    }
    fn options(&self, _ctx: &EventContext, _rng: &mut SeededRng) -> Vec<EventOption> {
        vec![
            EventOption::new(
                "Listen",
                vec![
                    RunEffect::AddCard {
                        card_id: CardId::from_static("truth_whisper"),
                    },
                    RunEffect::ApplyStatus {
                        status: MADNESS,
                        stacks: 4,
                    },
                ],
            )
            .preview("Obtain Truth Whisper, gain 4 Madness"),
            EventOption::new("Interrupt him", Vec::new())
                .preview("Fight the Mad Prophet")
                .follow_up(EventFollowUp::StartEliteBattle {
                    enemy_id: EnemyId::from_static("mad_prophet"),
                }),
            EventOption::new(
                "Pay him off",
                vec![
                    RunEffect::LoseGold { amount: 30 },
                    RunEffect::Heal { amount: 15 },
                    RunEffect::ApplyStatus {
                        status: MADNESS,
                        stacks: -2,
                    },
                ],
            )
            .preview("Lose 30 gold, heal 15 HP, remove 2 Madness"),
        ]
    }
}

struct SequenceChamber;

impl EventDefinition for SequenceChamber {
    fn id(&self) -> EventId {
        EventId::from_static("seer_sequence_chamber")
    }
    fn name(&self) -> &'static str {
        "Sequence Chamber"
    }
    fn description(&self) -> &'static str {
        "A hidden study full of dust. One book lies open on the desk, waiting for a reader."
    }
    fn options(&self, _ctx: &EventContext, _rng: &mut SeededRng) -> Vec<EventOption> {
        vec![
            EventOption::new(
                "Read the forbidden book",
                vec![
                    RunEffect::AddCard {
                        card_id: CardId::from_static("fate_rewrite"),
                    },
                    RunEffect::ApplyStatus {
                        status: MADNESS,
                        stacks: 3,
                    },
                ],
            )
            .preview("Obtain Fate Rewrite, gain 3 Madness"),
            EventOption::new(
                "Burn the pages",
                vec![
                    RunEffect::ApplyStatus {
                        status: MADNESS,
                        stacks: -3,
                    },
                    RunEffect::TakeDamage { amount: 10 },
                ],
            )
            .preview("Remove 3 Madness, lose 10 HP"),
            leave(),
        ]
    }
}

struct TimeRift;

impl EventDefinition for TimeRift {
    fn id(&self) -> EventId {
        EventId::from_static("seer_time_rift")
    }
    fn name(&self) -> &'static str {
        "Time Rift"
    }
    fn description(&self) -> &'static str {
        "A hairline crack hangs in the air. Through it you glimpse the past on one side and the future on the other."
    }
    fn options(&self, ctx: &EventContext, _rng: &mut SeededRng) -> Vec<EventOption> {
        let upgradeable = upgradeable_indices(&ctx.deck);
        let past = if upgradeable.is_empty() {
            EventOption::new("Peer into the past", Vec::new()).preview("You see nothing")
        } else {
            EventOption::new(
                "Peer into the past",
                vec![RunEffect::ApplyStatus {
                    status: MADNESS,
                    stacks: 2,
                }],
            )
            .preview("Upgrade 1 card, gain 2 Madness")
            .follow_up(EventFollowUp::ChooseUpgradeableCard {
                indices: upgradeable,
            })
        };
        let watch = require_relic(BROKEN_WATCH.as_str()).name;
        vec![
            past,
            EventOption::new(
                "Peer into the future",
                vec![
                    RunEffect::AddRelic {
                        relic_id: BROKEN_WATCH,
                    },
                    RunEffect::ApplyStatus {
                        status: MADNESS,
                        stacks: 2,
                    },
                ],
            )
            .preview(format!("Obtain {watch}, gain 2 Madness")),
            EventOption::new("Close your eyes", vec![RunEffect::Heal { amount: 10 }])
                .preview("Heal 10 HP"),
        ]
    }
}

// ============================================================================
// Registry
// ============================================================================

static DEFINITIONS: &[&dyn EventDefinition] = &[
    &Scavenger,
    &Altar,
    &Training,
    &MadProphetEncounter,
    &SequenceChamber,
    &TimeRift,
];

/// The event table.
pub fn events() -> &'static Registry<EventId, dyn EventDefinition> {
    static REGISTRY: OnceLock<Registry<EventId, dyn EventDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Registry::new(
            "event",
            DEFINITIONS.iter().map(|definition| (definition.id(), *definition)),
        )
    })
}

pub fn get_event(id: &str) -> Option<&'static dyn EventDefinition> {
    events().get(id)
}

/// Panics on an unknown id.
pub fn require_event(id: &str) -> &'static dyn EventDefinition {
    events().require(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::starter_deck;
    use crate::ids::RelicId;

    fn context(gold: i32) -> EventContext {
        EventContext {
            seed: 7,
            floor: 1,
            row: 4,
            node_id: "4_0".into(),
            player_max_hp: 80,
            player_current_hp: 60,
            gold,
            deck: starter_deck(),
            relic_ids: vec![RelicId::from_static("burning_blood")],
        }
    }

    #[test]
    fn scavenger_rolls_amounts_in_range() {
        for seed in 0..50 {
            let mut rng = SeededRng::new(seed);
            let offer = require_event("scavenger").generate(&context(0), &mut rng);
            assert_eq!(offer.options.len(), 3);
            match offer.options[0].effects[0] {
                RunEffect::GainGold { amount } => assert!((30..=50).contains(&amount)),
                ref other => panic!("unexpected effect {other:?}"),
            }
        }
    }

    #[test]
    fn altar_hides_sacrifice_when_poor() {
        let mut rng = SeededRng::new(1);
        let poor = require_event("altar").generate(&context(49), &mut rng);
        assert_eq!(poor.options.len(), 2);
        let mut rng = SeededRng::new(1);
        let rich = require_event("altar").generate(&context(50), &mut rng);
        assert_eq!(rich.options.len(), 3);
        assert!(matches!(
            rich.options[0].effects[1],
            RunEffect::AddRelic { ref relic_id } if relic_id != "burning_blood"
        ));
    }

    #[test]
    fn training_offers_upgrade_follow_up() {
        let mut rng = SeededRng::new(3);
        let offer = require_event("training").generate(&context(0), &mut rng);
        match &offer.options[0].follow_up {
            Some(EventFollowUp::ChooseUpgradeableCard { indices }) => {
                // strikes, defends and bash
                assert_eq!(indices.len(), 9);
            }
            other => panic!("unexpected follow-up {other:?}"),
        }
    }

    #[test]
    fn sequence_chamber_trades_madness_for_fate_rewrite() {
        let mut rng = SeededRng::new(5);
        let offer = require_event("seer_sequence_chamber").generate(&context(0), &mut rng);
        assert_eq!(offer.options.len(), 3);
        assert!(offer.options[0].effects.contains(&RunEffect::AddCard {
            card_id: CardId::from_static("fate_rewrite")
        }));
        assert!(offer.options[1].effects.contains(&RunEffect::TakeDamage { amount: 10 }));
        assert!(offer.options[2].effects.is_empty());
    }

    #[test]
    fn time_rift_past_needs_an_upgradeable_card() {
        let mut ctx = context(0);
        let mut rng = SeededRng::new(2);
        let offer = require_event("seer_time_rift").generate(&ctx, &mut rng);
        assert!(offer.options[0].follow_up.is_some());
        assert!(offer.options[1].effects.contains(&RunEffect::AddRelic {
            relic_id: BROKEN_WATCH
        }));

        ctx.deck.clear();
        let offer = require_event("seer_time_rift").generate(&ctx, &mut rng);
        assert!(offer.options[0].follow_up.is_none());
        assert!(offer.options[0].effects.is_empty());
        assert_eq!(offer.options[2].effects, vec![RunEffect::Heal { amount: 10 }]);
    }
}
