//! Battle state machine and effect resolution.
//!
//! The [`BattleEngine`] is the only writer of [`BattleState`]. Player input
//! enters through [`BattleEngine::apply`]; content answers with
//! [`BattleEffect`](crate::action::BattleEffect)s that are resolved through a
//! single FIFO queue; every observable outcome is appended to the event log.
//!
//! ```text
//! NotStarted -> PlayerTurn <-> EnemyTurn -> Won | Lost
//! ```
//!
//! Rejected input (bad index, bad target, not enough energy, wrong phase, an
//! unanswered foresight) never fails: it records an event and leaves the state
//! untouched.

mod event;
mod hook;
mod madness;
mod resolve;
mod seer;
mod setup;
mod stats;
mod turn;

pub use event::BattleEvent;
pub use hook::{TriggerHook, collect_effects, relic_hooks};
pub use seer::PendingInput;
pub use setup::{Loadout, spawn_enemies};
pub use stats::BattleStats;

use std::collections::VecDeque;

use crate::action::{BattleEffect, BattleTrigger, EffectTarget, PlayerAction};
use crate::content::{CardTargeting, require_card, require_consumable};
use crate::ids::{ConsumableId, RelicId};
use crate::rng::SeededRng;
use crate::state::{BattlePhase, BattleState};

/// Drives one battle from start to a terminal phase.
pub struct BattleEngine {
    state: BattleState,
    events: Vec<BattleEvent>,
    stats: BattleStats,
    rng: SeededRng,
    relics: Vec<RelicId>,
    hooks: Vec<&'static dyn TriggerHook>,
    /// Consumable slots; a used slot becomes `None` so indices stay stable.
    consumables: Vec<Option<ConsumableId>>,
    queue: VecDeque<BattleEffect>,
    /// Unanswered foresight choices, oldest first.
    pending: VecDeque<PendingInput>,
    seer: seer::SeerTurn,
    /// Set once prophet's notes has waived the madness of a rewrite.
    rewrite_madness_waived: bool,
}

impl BattleEngine {
    /// Creates a battle against `enemies`. The draw pile is shuffled from
    /// `rng`, which then keeps driving draws and enemy decisions.
    pub fn new(loadout: Loadout, enemies: Vec<crate::state::Entity>, mut rng: SeededRng) -> Self {
        let Loadout {
            player,
            deck,
            relics,
            consumables,
        } = loadout;
        let draw_pile = rng.shuffled(&deck);
        let hooks = relic_hooks(&relics);
        Self {
            state: BattleState::new(player, enemies, draw_pile, crate::config::GameConfig::MAX_ENERGY),
            events: Vec::new(),
            stats: BattleStats::default(),
            rng,
            relics,
            hooks,
            consumables: consumables.into_iter().map(Some).collect(),
            queue: VecDeque::new(),
            pending: VecDeque::new(),
            seer: seer::SeerTurn::default(),
            rewrite_madness_waived: false,
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Drains the event log, leaving it empty.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn stats(&self) -> BattleStats {
        self.stats
    }

    pub fn relics(&self) -> &[RelicId] {
        &self.relics
    }

    pub fn consumable_slots(&self) -> &[Option<ConsumableId>] {
        &self.consumables
    }

    /// Consumables not used during this battle, in slot order.
    pub fn remaining_consumables(&self) -> Vec<ConsumableId> {
        self.consumables.iter().flatten().cloned().collect()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// `Some(true)` once won, `Some(false)` once lost.
    pub fn outcome(&self) -> Option<bool> {
        match self.state.phase {
            BattlePhase::Won => Some(true),
            BattlePhase::Lost => Some(false),
            _ => None,
        }
    }

    /// Hand indices the player can currently afford. Empty while a choice is
    /// pending.
    pub fn playable_cards(&self) -> Vec<usize> {
        if self.state.phase != BattlePhase::PlayerTurn || !self.pending.is_empty() {
            return Vec::new();
        }
        self.state
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                self.effective_cost(require_card(card.card_id.as_str()).cost) <= self.state.energy
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Starts the battle: fires battle-start hooks and enters turn 1.
    ///
    /// Battle-start effects stay queued until turn 1 has reset energy and
    /// drawn, so energy granted at battle start is not lost to the reset.
    pub fn start(&mut self) {
        if self.state.phase != BattlePhase::NotStarted {
            self.emit(BattleEvent::invalid("battle already started"));
            return;
        }
        tracing::debug!(enemies = self.state.enemies.len(), "battle started");
        self.emit(BattleEvent::BattleStarted);
        self.fire(BattleTrigger::BattleStart);
        self.start_player_turn();
    }

    /// Applies one player action. Returns `false` when it was rejected.
    pub fn apply(&mut self, action: PlayerAction) -> bool {
        match action {
            PlayerAction::PlayCard { hand_index, target } => self.play_card(hand_index, target),
            PlayerAction::UseConsumable { slot, target } => self.use_consumable(slot, target),
            PlayerAction::EndTurn => self.end_turn(),
            PlayerAction::ChooseForesight { option } => self.choose_foresight(option),
        }
    }

    pub fn play_card(&mut self, hand_index: usize, target: Option<usize>) -> bool {
        if !self.accepting_input() {
            return false;
        }
        let Some(card) = self.state.hand.get(hand_index) else {
            self.emit(BattleEvent::invalid(format!("no card at hand index {hand_index}")));
            return false;
        };
        let definition = require_card(card.card_id.as_str());
        let cost = self.effective_cost(definition.cost);
        if cost > self.state.energy {
            self.emit(BattleEvent::NotEnoughEnergy {
                required: cost,
                available: self.state.energy,
            });
            return false;
        }
        let target = match definition.targeting {
            CardTargeting::None => None,
            CardTargeting::SingleEnemy => match self.resolve_enemy_target(target) {
                Some(target) => Some(target),
                None => return false,
            },
        };

        self.state.energy -= cost;
        self.seer.first_card_extra = 0;
        let card = self.state.hand.remove(hand_index);
        self.stats.record_card(definition.card_type);
        self.emit(BattleEvent::Played {
            card_id: card.card_id.clone(),
            cost,
        });

        let snapshot = self.state.snapshot();
        let mut effects = definition.effects(&snapshot, target);
        self.waive_rewrite_madness(&mut effects);
        self.queue.extend(effects);
        self.resolve_queue();

        if definition.card_type.exhausts() {
            self.state.exhaust_pile.push(card);
        } else {
            self.state.discard_pile.push(card);
        }

        if !self.is_over() {
            self.fire(BattleTrigger::CardPlayed {
                card_id: definition.id.clone(),
                card_type: definition.card_type,
            });
            self.resolve_queue();
        }
        true
    }

    pub fn use_consumable(&mut self, slot: usize, target: Option<usize>) -> bool {
        if !self.accepting_input() {
            return false;
        }
        let Some(Some(consumable_id)) = self.consumables.get(slot).cloned() else {
            self.emit(BattleEvent::invalid(format!("no consumable in slot {slot}")));
            return false;
        };
        let target = match target {
            Some(_) => match self.resolve_enemy_target(target) {
                Some(target) => Some(target),
                None => return false,
            },
            None => None,
        };

        let definition = require_consumable(consumable_id.as_str());
        self.consumables[slot] = None;
        self.stats.consumables_used += 1;
        self.emit(BattleEvent::ConsumableUsed { consumable_id });

        let snapshot = self.state.snapshot();
        self.queue.extend((definition.in_battle)(&snapshot, target));
        self.resolve_queue();
        true
    }

    pub fn end_turn(&mut self) -> bool {
        if !self.accepting_input() {
            return false;
        }
        self.end_player_turn();
        if !self.is_over() {
            self.run_enemy_turn();
        }
        if !self.is_over() {
            self.start_player_turn();
        }
        true
    }

    fn accepting_input(&mut self) -> bool {
        let reason = match self.state.phase {
            BattlePhase::PlayerTurn if self.pending.is_empty() => return true,
            BattlePhase::PlayerTurn => "a foresight choice is pending",
            BattlePhase::NotStarted => "battle has not started",
            BattlePhase::EnemyTurn => "not the player's turn",
            BattlePhase::Won | BattlePhase::Lost => "battle is over",
        };
        self.emit(BattleEvent::invalid(reason));
        false
    }

    /// Resolves an enemy slot for a targeted action. `None` falls back to the
    /// first living enemy. Emits `InvalidAction` and returns `None` when the
    /// slot is out of range or dead.
    fn resolve_enemy_target(&mut self, target: Option<usize>) -> Option<EffectTarget> {
        let index = match target {
            Some(index) => index,
            None => match self.state.enemies.iter().position(|enemy| enemy.is_alive()) {
                Some(index) => index,
                None => {
                    self.emit(BattleEvent::invalid("no living enemy to target"));
                    return None;
                }
            },
        };
        match self.state.enemies.get(index) {
            Some(enemy) if enemy.is_alive() => Some(EffectTarget::Enemy(index)),
            Some(_) => {
                self.emit(BattleEvent::invalid(format!("enemy {index} is already dead")));
                None
            }
            None => {
                self.emit(BattleEvent::invalid(format!("no enemy at index {index}")));
                None
            }
        }
    }

    fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}
