//! Session-level event log.

use std::fmt;

use game_core::{BattleEvent, CardId, ConsumableId, EventId, RelicId, RoomType};
use serde::{Deserialize, Serialize};

/// Everything observable that happens in a run, battle events included.
///
/// Two sessions fed the same seed and actions produce identical logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    RunStarted { seed: u64, floor: u32 },
    RunResumed { seed: u64, floor: u32 },
    NodeEntered { node_id: String, room_type: RoomType },
    Battle(BattleEvent),
    GoldGained { amount: i32 },
    RelicObtained { relic_id: RelicId },
    CardRewardOffered { choices: Vec<CardId> },
    CardAdded { instance_id: String, card_id: CardId },
    RewardSkipped,
    ShopOpened { cards: usize, relics: usize, consumables: usize },
    Purchased { item: String, price: i32 },
    CardRemoved { instance_id: String, card_id: CardId },
    Rested { healed: i32 },
    CardUpgraded { instance_id: String, card_id: CardId },
    EventOffered { event_id: EventId, name: String },
    EventOptionChosen { index: usize, label: String },
    ConsumableUsed { consumable_id: ConsumableId },
    NodeCompleted { node_id: String },
    ActAdvanced { floor: u32 },
    RunWon,
    RunLost,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunStarted { seed, floor } => write!(f, "run started (seed {seed}, act {floor})"),
            Self::RunResumed { seed, floor } => write!(f, "run resumed (seed {seed}, act {floor})"),
            Self::NodeEntered { node_id, room_type } => write!(f, "entered {node_id} ({room_type})"),
            Self::Battle(event) => write!(f, "  {event}"),
            Self::GoldGained { amount } => write!(f, "gained {amount} gold"),
            Self::RelicObtained { relic_id } => write!(f, "obtained relic {relic_id}"),
            Self::CardRewardOffered { choices } => {
                let names: Vec<&str> = choices.iter().map(CardId::as_str).collect();
                write!(f, "card reward: {}", names.join(", "))
            }
            Self::CardAdded { instance_id, .. } => write!(f, "added {instance_id} to the deck"),
            Self::RewardSkipped => write!(f, "skipped the card reward"),
            Self::ShopOpened {
                cards,
                relics,
                consumables,
            } => write!(
                f,
                "shop: {cards} cards, {relics} relics, {consumables} consumables"
            ),
            Self::Purchased { item, price } => write!(f, "bought {item} for {price} gold"),
            Self::CardRemoved { instance_id, .. } => write!(f, "removed {instance_id}"),
            Self::Rested { healed } => write!(f, "rested, healed {healed}"),
            Self::CardUpgraded {
                instance_id,
                card_id,
            } => write!(f, "upgraded {instance_id} to {card_id}"),
            Self::EventOffered { name, .. } => write!(f, "event: {name}"),
            Self::EventOptionChosen { label, .. } => write!(f, "chose \"{label}\""),
            Self::ConsumableUsed { consumable_id } => write!(f, "used {consumable_id}"),
            Self::NodeCompleted { node_id } => write!(f, "completed {node_id}"),
            Self::ActAdvanced { floor } => write!(f, "advanced to act {floor}"),
            Self::RunWon => write!(f, "run won"),
            Self::RunLost => write!(f, "run lost"),
        }
    }
}
