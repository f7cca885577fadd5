use crate::content::CardType;
use crate::ids::CardId;

/// Named points in a battle at which relics react.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleTrigger {
    BattleStart,
    BattleEnd { won: bool },
    TurnStart { turn: u32 },
    TurnEnd { turn: u32 },
    CardPlayed { card_id: CardId, card_type: CardType },
    CardDrawn { card_id: CardId },
    /// The player's damage reached an enemy's HP.
    DamageDealt { amount: i32 },
    /// The player lost HP to damage.
    DamageTaken { amount: i32 },
    /// The player gained block.
    BlockGained { amount: i32 },
    EnemyKilled,
}
