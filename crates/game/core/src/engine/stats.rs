use crate::content::CardType;

/// Running totals for one battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    pub cards_played: u32,
    pub attacks_played: u32,
    pub skills_played: u32,
    pub powers_played: u32,
    pub consumables_used: u32,
    /// HP damage dealt to enemies, after block.
    pub damage_dealt: i32,
    /// HP damage taken by the player, after block.
    pub damage_taken: i32,
    pub block_gained: i32,
}

impl BattleStats {
    pub fn record_card(&mut self, card_type: CardType) {
        self.cards_played += 1;
        match card_type {
            CardType::Attack => self.attacks_played += 1,
            CardType::Skill => self.skills_played += 1,
            CardType::Power => self.powers_played += 1,
        }
    }
}
