//! Seer mechanics: foresight, rewind, intent rewrites and the next-turn
//! penalties some enemies inflict.
//!
//! Foresight does not suspend effect resolution. The revealed cards leave the
//! draw pile at once and wait as a [`PendingInput`]; the rest of the queue
//! keeps resolving and the player answers afterwards with
//! [`PlayerAction::ChooseForesight`](crate::action::PlayerAction::ChooseForesight).
//! Until every pending choice is answered, no other input is accepted.

use super::{BattleEngine, BattleEvent};
use crate::action::{BattleEffect, EffectTarget, RewrittenIntent};
use crate::ai::EnemyMove;
use crate::content::{BROKEN_WATCH, MADNESS, PROPHET_NOTES, require_status};
use crate::ids::StatusId;
use crate::state::Card;

/// A decision the battle waits for before it accepts other input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PendingInput {
    /// Cards revealed from the top of the draw pile, top card first. One of
    /// them goes to the hand.
    Foresight { options: Vec<Card>, from_count: usize },
}

/// Per-turn bookkeeping. The `next_*` values are promoted when the next
/// player turn starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct SeerTurn {
    /// Foresights this turn that revealed at least one card.
    pub foresights: u32,
    pub foresight_penalty: u32,
    pub next_foresight_penalty: u32,
    /// Extra cost of the next card played this turn; spent by the first play.
    pub first_card_extra: i32,
    pub next_first_card_extra: i32,
}

impl SeerTurn {
    pub fn next_turn(self) -> Self {
        Self {
            foresight_penalty: self.next_foresight_penalty,
            first_card_extra: self.next_first_card_extra,
            ..Self::default()
        }
    }
}

impl BattleEngine {
    /// The oldest unanswered choice, if any.
    pub fn pending_input(&self) -> Option<&PendingInput> {
        self.pending.front()
    }

    /// Keeps foresight option `option` of the oldest pending choice and puts
    /// the others back on top of the draw pile in their original order.
    pub fn choose_foresight(&mut self, option: usize) -> bool {
        let Some(PendingInput::Foresight { options, .. }) = self.pending.front() else {
            self.emit(BattleEvent::invalid("no foresight choice is pending"));
            return false;
        };
        if option >= options.len() {
            self.emit(BattleEvent::invalid(format!("no foresight option {option}")));
            return false;
        }
        let Some(PendingInput::Foresight {
            mut options,
            from_count,
        }) = self.pending.pop_front()
        else {
            return false;
        };

        let chosen = options.remove(option);
        self.state.draw_pile.extend(options.into_iter().rev());
        self.emit(BattleEvent::ForesightChosen {
            card_id: chosen.card_id.clone(),
            from_count,
        });
        self.state.hand.push(chosen);
        true
    }

    pub(super) fn has_relic(&self, id: &crate::ids::RelicId) -> bool {
        self.relics.contains(id)
    }

    /// Cost of playing a card with base cost `cost` right now.
    pub(super) fn effective_cost(&self, cost: i32) -> i32 {
        cost + self.seer.first_card_extra
    }

    pub(super) fn foresee(&mut self, count: u32) {
        let mut count = count as usize;
        if self.seer.foresights == 0 && self.has_relic(&BROKEN_WATCH) {
            count += 1;
        }
        let count = count
            .saturating_sub(self.seer.foresight_penalty as usize)
            .min(self.state.draw_pile.len());
        if count == 0 {
            return;
        }

        let top = self.state.draw_pile.len() - count;
        let mut options = self.state.draw_pile.split_off(top);
        options.reverse();
        self.seer.foresights += 1;
        tracing::trace!(count, pending = self.pending.len(), "foresight");
        self.emit(BattleEvent::ForesightRevealed {
            card_ids: options.iter().map(|card| card.card_id.clone()).collect(),
        });
        self.pending.push_back(PendingInput::Foresight {
            options,
            from_count: count,
        });

        let statuses: Vec<(StatusId, i32)> = self
            .state
            .player
            .statuses
            .iter()
            .map(|(id, stacks)| (id.clone(), stacks))
            .collect();
        let snapshot = self.state.snapshot();
        for (id, stacks) in statuses {
            let effects = require_status(id.as_str()).on_foresight(EffectTarget::Player, stacks, &snapshot);
            self.queue.extend(effects);
        }
    }

    /// Moves the `count` most recently discarded cards back to the hand.
    pub(super) fn rewind(&mut self, count: u32) {
        for _ in 0..count {
            let Some(card) = self.state.discard_pile.pop() else {
                return;
            };
            self.emit(BattleEvent::RewindCard {
                card_id: card.card_id.clone(),
            });
            self.state.hand.push(card);
        }
    }

    pub(super) fn rewrite_intent(&mut self, enemy: usize, intent: RewrittenIntent) {
        let Some(entity) = self.state.enemies.get_mut(enemy).filter(|e| e.is_alive()) else {
            return;
        };
        let replacement = EnemyMove::rewritten(intent, EffectTarget::Enemy(enemy));
        let from = entity.intent.as_ref().map(|mv| mv.label.clone());
        let to = replacement.label.clone();
        entity.intent = Some(replacement);
        let id = entity.id.clone();
        self.emit(BattleEvent::IntentRewritten { enemy: id, from, to });
    }

    pub(super) fn discard_random(&mut self, count: u32) {
        let mut discarded = 0;
        for _ in 0..count {
            if self.state.hand.is_empty() {
                break;
            }
            let index = self.rng.next_int(self.state.hand.len());
            let card = self.state.hand.remove(index);
            self.state.discard_pile.push(card);
            discarded += 1;
        }
        if discarded > 0 {
            self.emit(BattleEvent::HandDiscarded { count: discarded });
        }
    }

    /// Drops the player madness a card would add when it is the first card
    /// this battle to rewrite an intent and prophet's notes is owned.
    pub(super) fn waive_rewrite_madness(&mut self, effects: &mut Vec<BattleEffect>) {
        if self.rewrite_madness_waived || !self.has_relic(&PROPHET_NOTES) {
            return;
        }
        if !effects
            .iter()
            .any(|effect| matches!(effect, BattleEffect::RewriteIntent { .. }))
        {
            return;
        }
        self.rewrite_madness_waived = true;

        let mut prevented = 0;
        effects.retain(|effect| match effect {
            BattleEffect::ApplyStatus {
                target: EffectTarget::Player,
                status,
                stacks,
            } if *status == MADNESS && *stacks > 0 => {
                prevented += *stacks;
                false
            }
            _ => true,
        });
        if prevented > 0 {
            self.emit(BattleEvent::MadnessPrevented {
                relic_id: PROPHET_NOTES,
                amount: prevented,
            });
        }
    }
}
