//! Turn flow: player turn entry and exit, the enemy turn, status upkeep.

use super::{BattleEngine, BattleEvent};
use crate::action::{BattleTrigger, EffectTarget};
use crate::ai::{AiContext, EnemyMove, decide_intent};
use crate::config::GameConfig;
use crate::content::{StatusDecay, require_status};
use crate::ids::StatusId;
use crate::state::BattlePhase;

impl BattleEngine {
    /// Enters the next player turn.
    ///
    /// Order: turn counter, block of every combatant (player first, then
    /// enemies in slot order), next-turn penalties, energy, draw, madness
    /// thresholds, queued effects (battle-start hooks on turn 1), turn-start
    /// hooks, then enemy intents for the coming enemy turn.
    pub(super) fn start_player_turn(&mut self) {
        self.state.turn += 1;
        self.state.phase = BattlePhase::PlayerTurn;
        let turn = self.state.turn;
        self.emit(BattleEvent::TurnStarted { turn });

        let targets = std::iter::once(EffectTarget::Player)
            .chain((0..self.state.enemies.len()).map(EffectTarget::Enemy))
            .collect::<Vec<_>>();
        for target in targets {
            let Some(entity) = self.state.entity_mut(target) else {
                continue;
            };
            let cleared = entity.clear_block();
            if cleared > 0 {
                let id = entity.id.clone();
                self.emit(BattleEvent::BlockCleared {
                    target: id,
                    amount: cleared,
                });
            }
        }
        self.seer = self.seer.next_turn();

        self.state.energy = self.state.max_energy;
        self.emit(BattleEvent::EnergyReset {
            amount: self.state.energy,
        });

        self.draw(GameConfig::HAND_SIZE);
        self.check_madness_thresholds();
        self.fire(BattleTrigger::TurnStart { turn });
        self.resolve_queue();
        if self.is_over() {
            return;
        }

        self.decide_intents();
    }

    fn decide_intents(&mut self) {
        for index in 0..self.state.enemies.len() {
            if !self.state.enemies[index].is_alive() {
                continue;
            }
            let intent = self.decide_for(index);
            self.emit(BattleEvent::EnemyIntent {
                enemy: self.state.enemies[index].id.clone(),
                label: intent.label.clone(),
                damage: intent.damage,
                hits: intent.hits,
            });
            self.state.enemies[index].intent = Some(intent);
        }
    }

    fn decide_for(&mut self, index: usize) -> EnemyMove {
        let snapshot = self.state.snapshot();
        let enemy = &self.state.enemies[index];
        let ctx = AiContext {
            self_index: index,
            snapshot: &snapshot,
            turn: self.state.turn,
            last_intent: enemy.last_intent,
        };
        decide_intent(enemy.enemy_id.as_ref(), &ctx, &mut self.rng)
    }

    /// Discards the hand and runs every player turn-end step.
    pub(super) fn end_player_turn(&mut self) {
        let turn = self.state.turn;
        let hand = std::mem::take(&mut self.state.hand);
        if !hand.is_empty() {
            self.emit(BattleEvent::HandDiscarded { count: hand.len() });
        }
        self.state.discard_pile.extend(hand);

        self.fire(BattleTrigger::TurnEnd { turn });
        self.resolve_queue();
        if self.is_over() {
            return;
        }

        self.end_of_turn_statuses(EffectTarget::Player);
        if self.is_over() {
            return;
        }
        self.reduce_madness();
        self.emit(BattleEvent::TurnEnded { turn });
    }

    /// Every living enemy, in slot order, executes its announced move and then
    /// ticks its own statuses. Enemy block survives until the next player turn
    /// starts.
    pub(super) fn run_enemy_turn(&mut self) {
        self.state.phase = BattlePhase::EnemyTurn;

        for index in 0..self.state.enemies.len() {
            if self.is_over() {
                return;
            }
            if !self.state.enemies[index].is_alive() {
                continue;
            }

            let intent = match self.state.enemies[index].intent.take() {
                Some(intent) => intent,
                None => self.decide_for(index),
            };
            self.emit(BattleEvent::EnemyAction {
                enemy: self.state.enemies[index].id.clone(),
                label: intent.label.clone(),
            });
            self.queue.extend(intent.effects);
            self.resolve_queue();
            self.state.enemies[index].last_intent = Some(intent.category);
            if self.is_over() {
                return;
            }

            self.end_of_turn_statuses(EffectTarget::Enemy(index));
        }
    }

    /// Runs turn-end reactions of `owner`'s statuses, then generic decay.
    fn end_of_turn_statuses(&mut self, owner: EffectTarget) {
        let Some(entity) = self.state.entity(owner).filter(|e| e.is_alive()) else {
            return;
        };
        let statuses: Vec<(StatusId, i32)> = entity
            .statuses
            .iter()
            .map(|(id, stacks)| (id.clone(), stacks))
            .collect();

        let snapshot = self.state.snapshot();
        for (id, stacks) in &statuses {
            let effects = require_status(id.as_str()).on_turn_end(owner, *stacks, &snapshot);
            self.queue.extend(effects);
        }
        self.resolve_queue();
        if self.is_over() {
            return;
        }

        for (id, _) in statuses {
            let StatusDecay::TurnEnd { decrease_by } = require_status(id.as_str()).decay() else {
                continue;
            };
            let Some(entity) = self.state.entity_mut(owner).filter(|e| e.is_alive()) else {
                return;
            };
            if !entity.statuses.contains(id.as_str()) {
                continue;
            }
            let remaining = entity.statuses.apply(&id, -decrease_by);
            let target = entity.id.clone();
            if remaining == 0 {
                self.emit(BattleEvent::StatusExpired { target, status: id });
            }
        }
    }
}
