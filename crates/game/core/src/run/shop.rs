//! Shop purchases against a generated [`ShopInventory`].
//!
//! Every purchase validates index, sold flag, gold and (for consumables) a
//! free slot before anything is changed.

use super::{RunError, RunState};
use crate::config::GameConfig;
use crate::generate::{ShopInventory, ShopOffer};
use crate::ids::{CardId, ConsumableId, RelicId};
use crate::state::Card;

fn offer_mut<T>(offers: &mut [ShopOffer<T>], index: usize) -> Result<&mut ShopOffer<T>, RunError> {
    let len = offers.len();
    let offer = offers
        .get_mut(index)
        .ok_or(RunError::InvalidIndex { index, len })?;
    if offer.sold {
        return Err(RunError::AlreadySold { index });
    }
    Ok(offer)
}

impl RunState {
    fn ensure_gold(&self, price: i32) -> Result<(), RunError> {
        if self.gold < price {
            return Err(RunError::NotEnoughGold {
                required: price,
                available: self.gold,
            });
        }
        Ok(())
    }

    pub fn buy_card(&mut self, shop: &mut ShopInventory, index: usize) -> Result<CardId, RunError> {
        let offer = offer_mut(&mut shop.cards, index)?;
        self.ensure_gold(offer.price)?;

        offer.sold = true;
        self.gold -= offer.price;
        let card_id = offer.item.clone();
        self.add_card(card_id.clone());
        Ok(card_id)
    }

    pub fn buy_relic(&mut self, shop: &mut ShopInventory, index: usize) -> Result<RelicId, RunError> {
        let offer = offer_mut(&mut shop.relics, index)?;
        self.ensure_gold(offer.price)?;

        offer.sold = true;
        self.gold -= offer.price;
        let relic_id = offer.item.clone();
        self.add_relic(relic_id.clone());
        Ok(relic_id)
    }

    pub fn buy_consumable(
        &mut self,
        shop: &mut ShopInventory,
        index: usize,
    ) -> Result<ConsumableId, RunError> {
        let offer = offer_mut(&mut shop.consumables, index)?;
        self.ensure_gold(offer.price)?;
        if self.consumables.len() >= GameConfig::MAX_CONSUMABLE_SLOTS {
            return Err(RunError::NoConsumableSlot {
                max: GameConfig::MAX_CONSUMABLE_SLOTS,
            });
        }

        offer.sold = true;
        self.gold -= offer.price;
        let consumable_id = offer.item.clone();
        self.add_consumable(consumable_id.clone())?;
        Ok(consumable_id)
    }

    /// Removes a deck card for the shop's removal price, once per visit.
    pub fn shop_remove_card(
        &mut self,
        shop: &mut ShopInventory,
        deck_index: usize,
    ) -> Result<Card, RunError> {
        if shop.remove_used {
            return Err(RunError::RemovalUsed);
        }
        if deck_index >= self.deck.len() {
            return Err(RunError::InvalidIndex {
                index: deck_index,
                len: self.deck.len(),
            });
        }
        self.ensure_gold(shop.remove_card_price)?;

        shop.remove_used = true;
        self.gold -= shop.remove_card_price;
        self.remove_card(deck_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{ShopContext, generate_shop};

    fn shop() -> ShopInventory {
        generate_shop(&ShopContext {
            seed: 42,
            floor: 1,
            row: 5,
            node_id: "5_1".into(),
            owned_relics: Vec::new(),
        })
    }

    #[test]
    fn buying_a_card_spends_gold_and_marks_it_sold() {
        let mut run = RunState::new(1, &GameConfig::new());
        let mut shop = shop();
        let price = shop.cards[0].price;

        let card_id = run.buy_card(&mut shop, 0).unwrap();

        assert_eq!(run.gold, GameConfig::STARTING_GOLD - price);
        assert_eq!(run.deck.last().unwrap().card_id, card_id);
        assert!(shop.cards[0].sold);
        assert_eq!(
            run.buy_card(&mut shop, 0),
            Err(RunError::AlreadySold { index: 0 })
        );
    }

    #[test]
    fn short_on_gold_changes_nothing() {
        let mut run = RunState::new(1, &GameConfig::new());
        run.gold = 10;
        let mut shop = shop();
        let before = run.clone();

        let error = run.buy_relic(&mut shop, 0).unwrap_err();

        assert!(matches!(error, RunError::NotEnoughGold { available: 10, .. }));
        assert_eq!(run, before);
        assert!(!shop.relics[0].sold);
    }

    #[test]
    fn full_belt_rejects_consumables() {
        let mut run = RunState::new(1, &GameConfig::new());
        run.gold = 500;
        for _ in 0..GameConfig::MAX_CONSUMABLE_SLOTS {
            run.add_consumable(ConsumableId::from_static("block_potion")).unwrap();
        }
        let mut shop = shop();

        assert_eq!(
            run.buy_consumable(&mut shop, 0),
            Err(RunError::NoConsumableSlot { max: 3 })
        );
        assert_eq!(run.gold, 500);
    }

    #[test]
    fn removal_is_offered_once() {
        let mut run = RunState::new(1, &GameConfig::new());
        run.gold = 200;
        let mut shop = shop();

        let removed = run.shop_remove_card(&mut shop, 0).unwrap();

        assert_eq!(removed.id, "strike_1");
        assert_eq!(run.deck.len(), 11);
        assert_eq!(run.gold, 125);
        assert_eq!(run.shop_remove_card(&mut shop, 0), Err(RunError::RemovalUsed));
    }
}
