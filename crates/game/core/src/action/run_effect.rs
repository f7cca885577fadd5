use crate::ids::{CardId, ConsumableId, RelicId, StatusId};

/// Instructions applied to the run outside of battle, mostly by events.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunEffect {
    GainGold { amount: i32 },
    /// Gold is clamped at zero.
    LoseGold { amount: i32 },
    /// Clamped at max HP.
    Heal { amount: i32 },
    /// Reaching 0 HP ends the run as a loss.
    TakeDamage { amount: i32 },
    AddCard { card_id: CardId },
    /// No-op when the relic is already owned.
    AddRelic { relic_id: RelicId },
    /// Adds (or with negative stacks, removes) persistent player status stacks.
    ApplyStatus { status: StatusId, stacks: i32 },
    SetStatus { status: StatusId, stacks: i32 },
    /// Ignored when every consumable slot is full.
    AddConsumable { consumable_id: ConsumableId },
    /// Requires the card at `deck_index` to have an upgraded variant.
    UpgradeCard { deck_index: usize },
}
