//! Shop inventory generation and pricing.
use super::available_relics;
use crate::config::GameConfig;
use crate::content::{
    CardRarity, ConsumableRarity, RelicRarity, consumables, require_card, require_consumable,
    require_relic, rewardable_cards,
};
use crate::ids::{CardId, ConsumableId, RelicId};
use crate::rng::SeededRng;
use crate::rng::seed::shop_seed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopContext {
    pub seed: u64,
    pub floor: u32,
    pub row: u32,
    pub node_id: String,
    pub owned_relics: Vec<RelicId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopOffer<T> {
    pub item: T,
    pub price: i32,
    pub sold: bool,
}

impl<T> ShopOffer<T> {
    fn new(item: T, price: i32) -> Self {
        Self { item, price, sold: false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopInventory {
    pub cards: Vec<ShopOffer<CardId>>,
    pub relics: Vec<ShopOffer<RelicId>>,
    pub consumables: Vec<ShopOffer<ConsumableId>>,
    pub remove_card_price: i32,
    /// The card-removal service can be used once per visit.
    pub remove_used: bool,
}

pub mod pricing {
    use super::*;

    pub fn card(rarity: CardRarity) -> i32 {
        match rarity {
            CardRarity::Starter => 30,
            CardRarity::Common => 45,
            CardRarity::Uncommon => 75,
            CardRarity::Rare => 150,
        }
    }

    pub fn relic(rarity: RelicRarity) -> i32 {
        match rarity {
            RelicRarity::Starter | RelicRarity::Common => 150,
            RelicRarity::Uncommon => 250,
            RelicRarity::Rare => 300,
            RelicRarity::Boss => 400,
        }
    }

    pub fn consumable(rarity: ConsumableRarity) -> i32 {
        match rarity {
            ConsumableRarity::Common => 50,
            ConsumableRarity::Uncommon => 75,
            ConsumableRarity::Rare => 100,
        }
    }
}

/// Cards first, then relics, then consumables, all drawn from one shop stream.
pub fn generate_shop(ctx: &ShopContext) -> ShopInventory {
    let mut rng = SeededRng::new(shop_seed(ctx.seed, ctx.floor, ctx.row, &ctx.node_id));

    let cards = rng
        .shuffled(&rewardable_cards())
        .into_iter()
        .take(GameConfig::SHOP_CARD_OFFERS)
        .map(|id| {
            let price = pricing::card(require_card(id.as_str()).rarity);
            ShopOffer::new(id, price)
        })
        .collect();

    let relics = rng
        .shuffled(&available_relics(&ctx.owned_relics))
        .into_iter()
        .take(GameConfig::SHOP_RELIC_OFFERS)
        .map(|id| {
            let price = pricing::relic(require_relic(id.as_str()).rarity);
            ShopOffer::new(id, price)
        })
        .collect();

    let consumable_pool: Vec<ConsumableId> = consumables().ids().cloned().collect();
    let consumables = rng
        .shuffled(&consumable_pool)
        .into_iter()
        .take(GameConfig::SHOP_CONSUMABLE_OFFERS)
        .map(|id| {
            let price = pricing::consumable(require_consumable(id.as_str()).rarity);
            ShopOffer::new(id, price)
        })
        .collect();

    ShopInventory {
        cards,
        relics,
        consumables,
        remove_card_price: GameConfig::REMOVE_CARD_PRICE,
        remove_used: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BURNING_BLOOD;

    fn context(node_id: &str) -> ShopContext {
        ShopContext {
            seed: 42,
            floor: 1,
            row: 6,
            node_id: node_id.into(),
            owned_relics: vec![BURNING_BLOOD],
        }
    }

    #[test]
    fn inventory_has_expected_sizes() {
        let shop = generate_shop(&context("6_1"));
        assert_eq!(shop.cards.len(), 5);
        assert_eq!(shop.relics.len(), 3);
        assert_eq!(shop.consumables.len(), 3);
        assert_eq!(shop.remove_card_price, 75);
        assert!(!shop.remove_used);
    }

    #[test]
    fn inventory_is_reproducible() {
        assert_eq!(generate_shop(&context("6_1")), generate_shop(&context("6_1")));
    }

    #[test]
    fn owned_relics_are_never_offered() {
        for seed in 0..30 {
            let mut ctx = context("6_0");
            ctx.seed = seed;
            ctx.owned_relics.push(RelicId::from_static("vajra"));
            let shop = generate_shop(&ctx);
            assert!(shop.relics.iter().all(|offer| offer.item != "vajra" && offer.item != "burning_blood"));
        }
    }

    #[test]
    fn prices_follow_rarity() {
        let shop = generate_shop(&context("6_2"));
        for offer in &shop.cards {
            assert_eq!(offer.price, 45, "{} should be priced as common", offer.item);
        }
        assert_eq!(pricing::relic(RelicRarity::Boss), 400);
        assert_eq!(pricing::consumable(ConsumableRarity::Uncommon), 75);
    }
}
