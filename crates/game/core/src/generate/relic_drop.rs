//! Relic pools and elite/boss relic drops.
use strum::{AsRefStr, Display, EnumString};

use super::RewardContext;
use crate::content::{RelicRarity, relics};
use crate::ids::RelicId;
use crate::rng::SeededRng;
use crate::rng::seed::relic_drop_seed;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelicDropSource {
    Elite,
    Boss,
}

impl RelicDropSource {
    /// Rarities eligible for this source, most preferred first.
    fn rarities(self) -> &'static [RelicRarity] {
        match self {
            Self::Elite => &[RelicRarity::Common, RelicRarity::Uncommon, RelicRarity::Rare],
            Self::Boss => &[
                RelicRarity::Boss,
                RelicRarity::Rare,
                RelicRarity::Uncommon,
                RelicRarity::Common,
            ],
        }
    }
}

/// Every non-starter relic not in `owned`, sorted by id.
pub fn available_relics(owned: &[RelicId]) -> Vec<RelicId> {
    relics()
        .iter()
        .filter(|(id, relic)| relic.rarity != RelicRarity::Starter && !owned.contains(*id))
        .map(|(id, _)| id.clone())
        .collect()
}

fn relics_of(rarity: RelicRarity, owned: &[RelicId]) -> impl Iterator<Item = RelicId> {
    relics()
        .iter()
        .filter(move |(id, relic)| relic.rarity == rarity && !owned.contains(*id))
        .map(|(id, _)| id.clone())
}

/// Rolls the relic dropped at the node described by `ctx`, if any remain.
pub fn generate_relic_drop(ctx: &RewardContext, source: RelicDropSource, owned: &[RelicId]) -> Option<RelicId> {
    let mut rng = SeededRng::new(relic_drop_seed(
        ctx.seed,
        ctx.floor,
        ctx.row,
        &ctx.node_id,
        ctx.room_type,
        source,
    ));

    let mut pool: Vec<RelicId> = source
        .rarities()
        .iter()
        .flat_map(|rarity| relics_of(*rarity, owned))
        .collect();
    if pool.is_empty() {
        pool = available_relics(owned);
    }

    rng.shuffled(&pool).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BURNING_BLOOD;
    use crate::generate::RoomType;

    fn elite_context(seed: u64) -> RewardContext {
        RewardContext::new(seed, 1, 7, "7_2", RoomType::Elite)
    }

    #[test]
    fn available_relics_skip_starters_and_owned() {
        let owned = vec![BURNING_BLOOD, RelicId::from_static("vajra")];
        let available = available_relics(&owned);
        assert!(!available.iter().any(|id| owned.contains(id)));
        assert_eq!(available.len(), relics().len() - 2);
        let mut sorted = available.clone();
        sorted.sort();
        assert_eq!(available, sorted);
    }

    #[test]
    fn elite_drop_never_offers_boss_relics() {
        for seed in 0..40 {
            let drop = generate_relic_drop(&elite_context(seed), RelicDropSource::Elite, &[BURNING_BLOOD])
                .expect("pool is not empty");
            assert_ne!(drop, "colossus_core");
        }
    }

    #[test]
    fn drop_is_reproducible() {
        let ctx = elite_context(11);
        assert_eq!(
            generate_relic_drop(&ctx, RelicDropSource::Elite, &[]),
            generate_relic_drop(&ctx, RelicDropSource::Elite, &[])
        );
    }

    #[test]
    fn nothing_drops_once_everything_is_owned() {
        let owned: Vec<RelicId> = relics().ids().cloned().collect();
        assert_eq!(generate_relic_drop(&elite_context(1), RelicDropSource::Boss, &owned), None);
    }
}
