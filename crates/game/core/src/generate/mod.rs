//! Deterministic content generators.
//!
//! Every generator derives its own sub-seed from a context value, builds a
//! candidate pool, shuffles it and takes a prefix. Generators never share an
//! RNG stream, so the order in which a caller asks for a reward, a shop or an
//! event does not change any of them.
mod event;
mod map;
mod relic_drop;
mod reward;
mod shop;

pub use event::{EventContext, EventFollowUp, EventOffer, EventOption, generate_event};
pub use map::{MapNode, RoomType, generate_map, node_id};
pub use relic_drop::{RelicDropSource, available_relics, generate_relic_drop};
pub use reward::{
    CardRewardOffer, RewardContext, card_reward_with, generate_card_reward, generate_gold_reward,
};
pub use shop::{ShopContext, ShopInventory, ShopOffer, generate_shop, pricing};
