/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of acts in a run. Beating the boss of the last act wins the run.
    pub max_floor: u32,

    /// Number of map rows per act, including the start row and the boss row.
    pub map_rows: u32,
}

impl GameConfig {
    // ===== battle rules =====
    pub const HAND_SIZE: usize = 5;
    pub const MAX_ENERGY: i32 = 3;
    pub const PLAYER_MAX_HP: i32 = 80;
    pub const PLAYER_NAME: &'static str = "Ironclad";

    // ===== run economy =====
    pub const STARTING_GOLD: i32 = 99;
    pub const MAX_CONSUMABLE_SLOTS: usize = 3;
    pub const CARD_REWARD_CHOICES: usize = 3;
    pub const SHOP_CARD_OFFERS: usize = 5;
    pub const SHOP_RELIC_OFFERS: usize = 3;
    pub const SHOP_CONSUMABLE_OFFERS: usize = 3;
    pub const REMOVE_CARD_PRICE: i32 = 75;
    /// Percentage of max HP restored by resting.
    pub const REST_HEAL_PERCENT: i32 = 30;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_FLOOR: u32 = 2;
    pub const DEFAULT_MAP_ROWS: u32 = 15;
    /// Below this the map cannot fit the start row, a battle row, a rest row and the boss.
    pub const MIN_MAP_ROWS: u32 = 4;

    pub fn new() -> Self {
        Self {
            max_floor: Self::DEFAULT_MAX_FLOOR,
            map_rows: Self::DEFAULT_MAP_ROWS,
        }
    }

    pub fn with_max_floor(max_floor: u32) -> Self {
        Self {
            max_floor: max_floor.max(1),
            ..Self::new()
        }
    }

    /// Overrides the map height, clamped to [`Self::MIN_MAP_ROWS`].
    #[must_use]
    pub fn map_rows(mut self, rows: u32) -> Self {
        self.map_rows = rows.max(Self::MIN_MAP_ROWS);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
