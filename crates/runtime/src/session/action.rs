//! Player inputs recorded by a session.

use serde::{Deserialize, Serialize};

/// One player decision. A session's action list plus its seed is enough to
/// reproduce the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionAction {
    /// Move onto a map node.
    SelectNode { node_id: String },

    PlayCard {
        hand_index: usize,
        target: Option<usize>,
    },

    /// Inside a battle this goes to the engine; elsewhere only consumables
    /// usable outside battle are accepted.
    UseConsumable { slot: usize, target: Option<usize> },

    EndTurn,

    /// Keep option `option` of the battle's pending foresight.
    ChooseForesight { option: usize },

    /// Take card `index` of the pending card reward.
    ChooseCard { index: usize },

    SkipReward,

    ChooseOption { index: usize },

    /// Pick entry `index` of an event's upgrade follow-up.
    ChooseUpgrade { index: usize },

    BuyCard { index: usize },
    BuyRelic { index: usize },
    BuyConsumable { index: usize },
    RemoveCard { deck_index: usize },

    Rest,

    /// Upgrade a card instead of resting.
    Upgrade { deck_index: usize },

    /// Leave a shop, rest site or event without (further) choices.
    Leave,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelectNode { .. } => "select node",
            Self::PlayCard { .. } => "play card",
            Self::UseConsumable { .. } => "use consumable",
            Self::EndTurn => "end turn",
            Self::ChooseForesight { .. } => "choose foresight",
            Self::ChooseCard { .. } => "choose card",
            Self::SkipReward => "skip reward",
            Self::ChooseOption { .. } => "choose option",
            Self::ChooseUpgrade { .. } => "choose upgrade",
            Self::BuyCard { .. } => "buy card",
            Self::BuyRelic { .. } => "buy relic",
            Self::BuyConsumable { .. } => "buy consumable",
            Self::RemoveCard { .. } => "remove card",
            Self::Rest => "rest",
            Self::Upgrade { .. } => "upgrade",
            Self::Leave => "leave",
        }
    }
}
