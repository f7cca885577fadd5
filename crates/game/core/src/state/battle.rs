use crate::action::EffectTarget;

use super::{BattleSnapshot, Card, Entity};

/// Turn state machine position.
///
/// `NotStarted → PlayerTurn ⇄ EnemyTurn → Won | Lost`
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattlePhase {
    #[default]
    NotStarted,
    PlayerTurn,
    EnemyTurn,
    Won,
    Lost,
}

impl BattlePhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Live state of one battle. Owned exclusively by the battle engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub turn: u32,
    pub phase: BattlePhase,
    pub energy: i32,
    pub max_energy: i32,
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub draw_pile: Vec<Card>,
    pub hand: Vec<Card>,
    pub discard_pile: Vec<Card>,
    /// Cards removed for the rest of the battle (played powers).
    pub exhaust_pile: Vec<Card>,
}

impl BattleState {
    pub fn new(player: Entity, enemies: Vec<Entity>, draw_pile: Vec<Card>, max_energy: i32) -> Self {
        Self {
            turn: 0,
            phase: BattlePhase::NotStarted,
            energy: 0,
            max_energy,
            player,
            enemies,
            draw_pile,
            hand: Vec::new(),
            discard_pile: Vec::new(),
            exhaust_pile: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            turn: self.turn,
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            energy: self.energy,
        }
    }

    pub fn entity(&self, target: EffectTarget) -> Option<&Entity> {
        match target {
            EffectTarget::Player => Some(&self.player),
            EffectTarget::Enemy(index) => self.enemies.get(index),
        }
    }

    pub fn entity_mut(&mut self, target: EffectTarget) -> Option<&mut Entity> {
        match target {
            EffectTarget::Player => Some(&mut self.player),
            EffectTarget::Enemy(index) => self.enemies.get_mut(index),
        }
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|enemy| !enemy.is_alive())
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}
