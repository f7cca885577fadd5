//! Madness upkeep.
//!
//! Madness opts out of generic decay. Thresholds are read at player turn start
//! (after drawing) and the count drops by one at player turn end, so the read
//! at turn start always sees the value from before that turn's decrement.
//!
//! Sanity anchor raises every threshold by the same offset.

use super::{BattleEngine, BattleEvent};
use crate::action::{BattleEffect, EffectTarget};
use crate::content::{MADNESS, SANITY_ANCHOR, SANITY_ANCHOR_OFFSET, VULNERABLE, WEAK};

/// Discards one random card from hand.
pub const DISCARD_THRESHOLD: i32 = 3;
/// Applies 1 weak to the player.
pub const WEAK_THRESHOLD: i32 = 6;
/// Applies 2 vulnerable to the player.
pub const VULNERABLE_THRESHOLD: i32 = 10;

impl BattleEngine {
    /// Madness counts at which thresholds 1 to 3 fire in this battle.
    pub(super) fn madness_thresholds(&self) -> [i32; 3] {
        let offset = if self.has_relic(&SANITY_ANCHOR) {
            SANITY_ANCHOR_OFFSET
        } else {
            0
        };
        [DISCARD_THRESHOLD, WEAK_THRESHOLD, VULNERABLE_THRESHOLD].map(|threshold| threshold + offset)
    }

    pub(super) fn check_madness_thresholds(&mut self) {
        let madness = self.state.player.statuses.stacks(MADNESS.as_str());
        let [discard, weak, vulnerable] = self.madness_thresholds();

        if madness >= discard {
            self.emit(BattleEvent::MadnessThreshold {
                level: 1,
                threshold: discard,
            });
            if !self.state.hand.is_empty() {
                let index = self.rng.next_int(self.state.hand.len());
                let card = self.state.hand.remove(index);
                self.emit(BattleEvent::MadnessDiscard {
                    card_id: card.card_id.clone(),
                });
                self.state.discard_pile.push(card);
            }
        }
        if madness >= weak {
            self.emit(BattleEvent::MadnessThreshold {
                level: 2,
                threshold: weak,
            });
            self.queue
                .push_back(BattleEffect::status(EffectTarget::Player, WEAK, 1));
        }
        if madness >= vulnerable {
            self.emit(BattleEvent::MadnessThreshold {
                level: 3,
                threshold: vulnerable,
            });
            self.queue
                .push_back(BattleEffect::status(EffectTarget::Player, VULNERABLE, 2));
        }
    }

    pub(super) fn reduce_madness(&mut self) {
        let from = self.state.player.statuses.stacks(MADNESS.as_str());
        if from == 0 {
            return;
        }
        let to = self.state.player.statuses.apply(&MADNESS, -1);
        self.emit(BattleEvent::MadnessReduced { from, to });
    }
}
