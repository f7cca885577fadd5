//! Post-battle rewards: card choices and gold.
use super::RoomType;
use crate::config::GameConfig;
use crate::content::rewardable_cards;
use crate::ids::CardId;
use crate::rng::SeededRng;
use crate::rng::seed::{gold_seed, reward_seed};

/// Where a reward is being generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardContext {
    pub seed: u64,
    pub floor: u32,
    pub row: u32,
    pub node_id: String,
    pub room_type: RoomType,
}

impl RewardContext {
    pub fn new(seed: u64, floor: u32, row: u32, node_id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            seed,
            floor,
            row,
            node_id: node_id.into(),
            room_type,
        }
    }
}

/// Up to three distinct cards, one of which may be taken.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardRewardOffer {
    pub choices: Vec<CardId>,
    pub can_skip: bool,
}

pub fn generate_card_reward(ctx: &RewardContext) -> CardRewardOffer {
    let mut rng = SeededRng::new(reward_seed(ctx.seed, ctx.floor, ctx.row, &ctx.node_id, ctx.room_type));
    card_reward_with(&mut rng)
}

/// Same as [`generate_card_reward`] but drawing from a caller-owned stream.
pub fn card_reward_with(rng: &mut SeededRng) -> CardRewardOffer {
    let pool = rewardable_cards();
    let choices = rng
        .shuffled(&pool)
        .into_iter()
        .take(GameConfig::CARD_REWARD_CHOICES)
        .collect();
    CardRewardOffer {
        choices,
        can_skip: true,
    }
}

/// Gold dropped by a fight. Non-combat rooms drop nothing.
pub fn generate_gold_reward(ctx: &RewardContext) -> i32 {
    let mut rng = SeededRng::new(gold_seed(ctx.seed, ctx.floor, ctx.row, &ctx.node_id, ctx.room_type));
    let base = match ctx.room_type {
        RoomType::Battle => 10,
        RoomType::Elite => 25,
        RoomType::Boss => 100,
        _ => return 0,
    };
    base + rng.next_int(11) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CardRarity, require_card};

    fn context(node_id: &str, room_type: RoomType) -> RewardContext {
        RewardContext::new(42, 1, 3, node_id, room_type)
    }

    #[test]
    fn card_reward_is_reproducible() {
        let ctx = context("3_1", RoomType::Battle);
        let first = generate_card_reward(&ctx);
        assert_eq!(first, generate_card_reward(&ctx));
        assert_eq!(first.choices.len(), 3);
        assert!(first.can_skip);
    }

    #[test]
    fn card_reward_has_no_duplicates_or_starters() {
        for seed in 0..40 {
            let ctx = RewardContext::new(seed, 1, 3, "3_1", RoomType::Battle);
            let offer = generate_card_reward(&ctx);
            let mut ids = offer.choices.clone();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), offer.choices.len());
            for id in &offer.choices {
                let card = require_card(id.as_str());
                assert_ne!(card.rarity, CardRarity::Starter);
                assert!(!card.is_upgraded);
            }
        }
    }

    #[test]
    fn node_id_changes_the_offer() {
        let offers: Vec<_> = (0..6)
            .map(|column| generate_card_reward(&context(&format!("3_{column}"), RoomType::Battle)))
            .collect();
        assert!(offers.iter().any(|offer| *offer != offers[0]));
    }

    #[test]
    fn gold_ranges_follow_room_type() {
        for seed in 0..40 {
            let battle = generate_gold_reward(&RewardContext::new(seed, 1, 2, "2_0", RoomType::Battle));
            assert!((10..=20).contains(&battle));
            let elite = generate_gold_reward(&RewardContext::new(seed, 1, 6, "6_1", RoomType::Elite));
            assert!((25..=35).contains(&elite));
            let boss = generate_gold_reward(&RewardContext::new(seed, 1, 14, "14_0", RoomType::Boss));
            assert!((100..=110).contains(&boss));
        }
        assert_eq!(generate_gold_reward(&context("3_1", RoomType::Rest)), 0);
    }
}
