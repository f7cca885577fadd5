//! Effect queue resolution and end-of-battle detection.

use super::{BattleEngine, BattleEvent, collect_effects};
use crate::action::{BattleEffect, BattleTrigger, EffectTarget};
use crate::combat::{calculate_block, calculate_damage};
use crate::content::{MADNESS, MADNESS_MASK, MADNESS_MASK_THRESHOLD, require_status};
use crate::state::BattlePhase;

impl BattleEngine {
    /// Appends every hook's reaction to `trigger` to the effect queue.
    pub(super) fn fire(&mut self, trigger: BattleTrigger) {
        let snapshot = self.state.snapshot();
        let effects = collect_effects(&self.hooks, &trigger, &snapshot);
        self.queue.extend(effects);
    }

    /// Executes queued effects in FIFO order. Effects queued while resolving
    /// run after everything already queued. A terminal phase drops the rest.
    pub(super) fn resolve_queue(&mut self) {
        while let Some(effect) = self.queue.pop_front() {
            if self.is_over() {
                self.queue.clear();
                break;
            }
            self.execute(effect);
        }
    }

    pub(super) fn execute(&mut self, effect: BattleEffect) {
        match effect {
            BattleEffect::DealDamage {
                source,
                target,
                base,
            } => self.deal_damage(source, target, base),
            BattleEffect::GainBlock { target, base } => {
                let Some(entity) = self.state.entity_mut(target).filter(|e| e.is_alive()) else {
                    return;
                };
                let amount = calculate_block(base, &entity.statuses);
                entity.gain_block(amount);
                let id = entity.id.clone();
                self.emit(BattleEvent::BlockGained { target: id, amount });
                if target == EffectTarget::Player {
                    self.stats.block_gained += amount;
                    if amount > 0 {
                        self.fire(BattleTrigger::BlockGained { amount });
                    }
                }
            }
            BattleEffect::DrawCards { count } => self.draw(count as usize),
            BattleEffect::GainEnergy { amount } => {
                if amount == 0 {
                    return;
                }
                self.state.energy = (self.state.energy + amount).max(0);
                self.emit(BattleEvent::EnergyGained {
                    amount,
                    current: self.state.energy,
                });
            }
            BattleEffect::ApplyStatus {
                target,
                status,
                stacks,
            } => {
                // Unknown statuses are content bugs.
                require_status(status.as_str());
                if stacks == 0 {
                    return;
                }
                let Some(entity) = self.state.entity_mut(target).filter(|e| e.is_alive()) else {
                    return;
                };
                let had = entity.statuses.contains(status.as_str());
                let after = entity.statuses.apply(&status, stacks);
                let id = entity.id.clone();
                if stacks < 0 && !had {
                    return;
                }
                self.emit(BattleEvent::StatusApplied {
                    target: id.clone(),
                    status: status.clone(),
                    stacks,
                });
                if had && after == 0 {
                    self.emit(BattleEvent::StatusExpired { target: id, status });
                }
            }
            BattleEffect::Heal { target, amount } => {
                let Some(entity) = self.state.entity_mut(target).filter(|e| e.is_alive()) else {
                    return;
                };
                let healed = entity.heal(amount);
                let id = entity.id.clone();
                if healed > 0 {
                    self.emit(BattleEvent::Healed {
                        target: id,
                        amount: healed,
                    });
                }
            }
            BattleEffect::ClearMadness { amount } => {
                let current = self.state.player.statuses.stacks(MADNESS.as_str());
                if current == 0 {
                    return;
                }
                let removed = if amount <= 0 { current } else { amount.min(current) };
                self.state.player.statuses.apply(&MADNESS, -removed);
                self.emit(BattleEvent::MadnessCleared { amount: removed });
            }
            BattleEffect::Foresight { count } => self.foresee(count),
            BattleEffect::Rewind { count } => self.rewind(count),
            BattleEffect::RewriteIntent { enemy, intent } => self.rewrite_intent(enemy, intent),
            BattleEffect::ForesightPenaltyNextTurn { amount } => {
                if amount == 0 {
                    return;
                }
                self.seer.next_foresight_penalty += amount;
                self.emit(BattleEvent::ForesightPenaltyNextTurn { amount });
            }
            BattleEffect::FirstCardCostNextTurn { amount } => {
                if amount == 0 {
                    return;
                }
                self.seer.next_first_card_extra += amount;
                self.emit(BattleEvent::FirstCardCostNextTurn { amount });
            }
            BattleEffect::DiscardRandom { count } => self.discard_random(count),
            BattleEffect::DamagePerForesight {
                source,
                target,
                per_foresight,
            } => {
                let base = per_foresight * self.seer.foresights as i32;
                self.deal_damage(source, target, base);
            }
        }
    }

    fn deal_damage(&mut self, source: EffectTarget, target: EffectTarget, base: i32) {
        let (Some(attacker), Some(defender)) = (self.state.entity(source), self.state.entity(target)) else {
            return;
        };
        // Poison is self-inflicted; otherwise a dead attacker deals nothing.
        if !defender.is_alive() || (source != target && !attacker.is_alive()) {
            return;
        }
        let mut amount = calculate_damage(base, &attacker.statuses, &defender.statuses);
        if source == EffectTarget::Player
            && matches!(target, EffectTarget::Enemy(_))
            && self.has_relic(&MADNESS_MASK)
            && attacker.statuses.stacks(MADNESS.as_str()) >= MADNESS_MASK_THRESHOLD
        {
            amount = amount * 3 / 2;
        }
        let source_id = attacker.id.clone();

        let Some(defender) = self.state.entity_mut(target) else {
            return;
        };
        let outcome = defender.take_damage(amount);
        let target_id = defender.id.clone();
        let name = defender.name.clone();
        let died = !defender.is_alive();

        match target {
            EffectTarget::Player => self.stats.damage_taken += outcome.amount,
            EffectTarget::Enemy(_) => self.stats.damage_dealt += outcome.amount,
        }
        self.emit(BattleEvent::DamageDealt {
            source: source_id,
            target: target_id.clone(),
            amount: outcome.amount,
            blocked: outcome.blocked,
        });
        if outcome.amount > 0 {
            match (source, target) {
                (_, EffectTarget::Player) => self.fire(BattleTrigger::DamageTaken {
                    amount: outcome.amount,
                }),
                (EffectTarget::Player, EffectTarget::Enemy(_)) => {
                    self.fire(BattleTrigger::DamageDealt {
                        amount: outcome.amount,
                    })
                }
                _ => {}
            }
        }

        if died {
            self.emit(BattleEvent::EntityDied {
                entity: target_id,
                name,
            });
            if let EffectTarget::Enemy(_) = target {
                self.fire(BattleTrigger::EnemyKilled);
            }
            self.check_battle_end();
        }
    }

    /// Moves the battle into a terminal phase when one side is dead.
    ///
    /// Battle-end hooks run immediately, bypassing the queue, so a victory heal
    /// still lands after the phase turned terminal.
    pub(super) fn check_battle_end(&mut self) {
        if self.is_over() {
            return;
        }
        let won = if !self.state.player.is_alive() {
            false
        } else if self.state.all_enemies_dead() {
            true
        } else {
            return;
        };

        self.queue.clear();
        self.pending.clear();
        if won {
            self.state.phase = BattlePhase::Won;
            self.emit(BattleEvent::BattleWon);
        } else {
            self.state.phase = BattlePhase::Lost;
            self.emit(BattleEvent::BattleLost);
        }
        tracing::debug!(won, turn = self.state.turn, "battle finished");

        let snapshot = self.state.snapshot();
        let effects = collect_effects(&self.hooks, &BattleTrigger::BattleEnd { won }, &snapshot);
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Draws up to `count` cards, reshuffling the discard pile into the draw
    /// pile when it runs out.
    pub(super) fn draw(&mut self, count: usize) {
        for _ in 0..count {
            if self.state.draw_pile.is_empty() {
                if self.state.discard_pile.is_empty() {
                    return;
                }
                let discard = std::mem::take(&mut self.state.discard_pile);
                let reshuffled = discard.len();
                self.state.draw_pile = self.rng.shuffled(&discard);
                self.emit(BattleEvent::Shuffled { count: reshuffled });
            }
            let Some(card) = self.state.draw_pile.pop() else {
                return;
            };
            let card_id = card.card_id.clone();
            self.emit(BattleEvent::Drew {
                card_id: card_id.clone(),
            });
            self.state.hand.push(card);
            self.fire(BattleTrigger::CardDrawn { card_id });
        }
    }
}
