//! Status definitions.
//!
//! A status declares which value computations it takes part in, at which
//! [`ModifierPhase`] and priority, and how it decays. The engine runs the
//! modifier pipeline ([`crate::combat`]) and the decay; definitions only
//! transform numbers and emit effects.

use std::sync::OnceLock;

use super::Registry;
use crate::action::{BattleEffect, EffectTarget};
use crate::ids::StatusId;
use crate::state::BattleSnapshot;

pub const STRENGTH: StatusId = StatusId::from_static("strength");
pub const DEXTERITY: StatusId = StatusId::from_static("dexterity");
pub const VULNERABLE: StatusId = StatusId::from_static("vulnerable");
pub const WEAK: StatusId = StatusId::from_static("weak");
pub const FRAIL: StatusId = StatusId::from_static("frail");
pub const POISON: StatusId = StatusId::from_static("poison");
pub const MADNESS: StatusId = StatusId::from_static("madness");
pub const SEQUENCE_RESONANCE: StatusId = StatusId::from_static("sequence_resonance");

/// Which value a modifier transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    OutgoingDamage,
    IncomingDamage,
    Block,
}

/// Modifier ordering phase. All `Add` modifiers run before any `Multiply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierPhase {
    Add = 0,
    Multiply = 1,
}

/// How a status loses stacks over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusDecay {
    /// Never decays automatically. The engine or content manages the count.
    None,
    /// Loses `decrease_by` stacks at each of its owner's turn ends.
    TurnEnd { decrease_by: i32 },
}

/// Behavior of one status kind. Every method except `id`/`name` defaults to
/// "does nothing".
pub trait StatusDefinition: Send + Sync {
    fn id(&self) -> StatusId;

    fn name(&self) -> &'static str;

    fn is_positive(&self) -> bool {
        false
    }

    fn decay(&self) -> StatusDecay {
        StatusDecay::None
    }

    /// Phase this status runs at for `kind`, or `None` if it does not modify it.
    fn modifier_phase(&self, _kind: ModifierKind) -> Option<ModifierPhase> {
        None
    }

    /// Tie-breaker within a phase. Lower runs first.
    fn priority(&self) -> i32 {
        0
    }

    fn modify_outgoing_damage(&self, value: i32, _stacks: i32) -> i32 {
        value
    }

    fn modify_incoming_damage(&self, value: i32, _stacks: i32) -> i32 {
        value
    }

    fn modify_block(&self, value: i32, _stacks: i32) -> i32 {
        value
    }

    /// Effects emitted at the owner's turn end, before decay.
    fn on_turn_end(
        &self,
        _owner: EffectTarget,
        _stacks: i32,
        _snapshot: &BattleSnapshot,
    ) -> Vec<BattleEffect> {
        Vec::new()
    }

    /// Effects emitted each time its owner resolves a foresight that revealed
    /// at least one card.
    fn on_foresight(
        &self,
        _owner: EffectTarget,
        _stacks: i32,
        _snapshot: &BattleSnapshot,
    ) -> Vec<BattleEffect> {
        Vec::new()
    }
}

// ============================================================================
// Buffs
// ============================================================================

struct Strength;

impl StatusDefinition for Strength {
    fn id(&self) -> StatusId {
        STRENGTH
    }
    fn name(&self) -> &'static str {
        "Strength"
    }
    fn is_positive(&self) -> bool {
        true
    }
    fn modifier_phase(&self, kind: ModifierKind) -> Option<ModifierPhase> {
        (kind == ModifierKind::OutgoingDamage).then_some(ModifierPhase::Add)
    }
    fn modify_outgoing_damage(&self, value: i32, stacks: i32) -> i32 {
        value + stacks
    }
}

struct Dexterity;

impl StatusDefinition for Dexterity {
    fn id(&self) -> StatusId {
        DEXTERITY
    }
    fn name(&self) -> &'static str {
        "Dexterity"
    }
    fn is_positive(&self) -> bool {
        true
    }
    fn modifier_phase(&self, kind: ModifierKind) -> Option<ModifierPhase> {
        (kind == ModifierKind::Block).then_some(ModifierPhase::Add)
    }
    fn modify_block(&self, value: i32, stacks: i32) -> i32 {
        value + stacks
    }
}

struct SequenceResonance;

impl StatusDefinition for SequenceResonance {
    fn id(&self) -> StatusId {
        SEQUENCE_RESONANCE
    }
    fn name(&self) -> &'static str {
        "Sequence Resonance"
    }
    fn is_positive(&self) -> bool {
        true
    }
    fn on_foresight(
        &self,
        owner: EffectTarget,
        stacks: i32,
        _snapshot: &BattleSnapshot,
    ) -> Vec<BattleEffect> {
        vec![BattleEffect::block(owner, stacks)]
    }
}

// ============================================================================
// Debuffs
// ============================================================================

struct Vulnerable;

impl StatusDefinition for Vulnerable {
    fn id(&self) -> StatusId {
        VULNERABLE
    }
    fn name(&self) -> &'static str {
        "Vulnerable"
    }
    fn decay(&self) -> StatusDecay {
        StatusDecay::TurnEnd { decrease_by: 1 }
    }
    fn modifier_phase(&self, kind: ModifierKind) -> Option<ModifierPhase> {
        (kind == ModifierKind::IncomingDamage).then_some(ModifierPhase::Multiply)
    }
    fn priority(&self) -> i32 {
        100
    }
    // +50%, truncated toward zero
    fn modify_incoming_damage(&self, value: i32, _stacks: i32) -> i32 {
        value * 150 / 100
    }
}

struct Weak;

impl StatusDefinition for Weak {
    fn id(&self) -> StatusId {
        WEAK
    }
    fn name(&self) -> &'static str {
        "Weak"
    }
    fn decay(&self) -> StatusDecay {
        StatusDecay::TurnEnd { decrease_by: 1 }
    }
    fn modifier_phase(&self, kind: ModifierKind) -> Option<ModifierPhase> {
        (kind == ModifierKind::OutgoingDamage).then_some(ModifierPhase::Multiply)
    }
    fn priority(&self) -> i32 {
        100
    }
    fn modify_outgoing_damage(&self, value: i32, _stacks: i32) -> i32 {
        value * 75 / 100
    }
}

struct Frail;

impl StatusDefinition for Frail {
    fn id(&self) -> StatusId {
        FRAIL
    }
    fn name(&self) -> &'static str {
        "Frail"
    }
    fn decay(&self) -> StatusDecay {
        StatusDecay::TurnEnd { decrease_by: 1 }
    }
    fn modifier_phase(&self, kind: ModifierKind) -> Option<ModifierPhase> {
        (kind == ModifierKind::Block).then_some(ModifierPhase::Multiply)
    }
    fn priority(&self) -> i32 {
        100
    }
    fn modify_block(&self, value: i32, _stacks: i32) -> i32 {
        value * 75 / 100
    }
}

struct Poison;

impl StatusDefinition for Poison {
    fn id(&self) -> StatusId {
        POISON
    }
    fn name(&self) -> &'static str {
        "Poison"
    }
    fn decay(&self) -> StatusDecay {
        StatusDecay::TurnEnd { decrease_by: 1 }
    }
    fn on_turn_end(
        &self,
        owner: EffectTarget,
        stacks: i32,
        _snapshot: &BattleSnapshot,
    ) -> Vec<BattleEffect> {
        vec![BattleEffect::damage(owner, owner, stacks)]
    }
}

/// Decays manually: the engine reduces it after the player's turn and checks
/// thresholds at the start of the next one, so the two never interleave.
struct Madness;

impl StatusDefinition for Madness {
    fn id(&self) -> StatusId {
        MADNESS
    }
    fn name(&self) -> &'static str {
        "Madness"
    }
}

// ============================================================================
// Registry
// ============================================================================

static DEFINITIONS: &[&dyn StatusDefinition] = &[
    &Strength,
    &Dexterity,
    &Vulnerable,
    &Weak,
    &Frail,
    &Poison,
    &Madness,
    &SequenceResonance,
];

/// The status table.
pub fn statuses() -> &'static Registry<StatusId, dyn StatusDefinition> {
    static REGISTRY: OnceLock<Registry<StatusId, dyn StatusDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Registry::new(
            "status",
            DEFINITIONS.iter().map(|definition| (definition.id(), *definition)),
        )
    })
}

pub fn get_status(id: &str) -> Option<&'static dyn StatusDefinition> {
    statuses().get(id)
}

/// Panics on an unknown id.
pub fn require_status(id: &str) -> &'static dyn StatusDefinition {
    statuses().require(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_constant_is_registered() {
        for id in [
            STRENGTH,
            DEXTERITY,
            VULNERABLE,
            WEAK,
            FRAIL,
            POISON,
            MADNESS,
            SEQUENCE_RESONANCE,
        ] {
            assert_eq!(require_status(id.as_str()).id(), id);
        }
    }

    #[test]
    fn madness_opts_out_of_generic_decay() {
        assert_eq!(require_status("madness").decay(), StatusDecay::None);
        assert_eq!(
            require_status("vulnerable").decay(),
            StatusDecay::TurnEnd { decrease_by: 1 }
        );
    }

    #[test]
    fn sequence_resonance_blocks_per_stack_on_foresight() {
        let snapshot = BattleSnapshot {
            turn: 1,
            player: crate::state::Entity::player("Seer", 70, 70),
            enemies: Vec::new(),
            energy: 3,
        };
        let resonance = require_status("sequence_resonance");
        assert_eq!(resonance.decay(), StatusDecay::None);
        assert_eq!(
            resonance.on_foresight(EffectTarget::Player, 2, &snapshot),
            vec![BattleEffect::block(EffectTarget::Player, 2)]
        );
        assert!(require_status("strength")
            .on_foresight(EffectTarget::Player, 2, &snapshot)
            .is_empty());
    }

    #[test]
    fn multipliers_truncate_toward_zero() {
        let vulnerable = require_status("vulnerable");
        assert_eq!(vulnerable.modify_incoming_damage(7, 1), 10);
        let weak = require_status("weak");
        assert_eq!(weak.modify_outgoing_damage(9, 1), 6);
    }

    #[test]
    #[should_panic(expected = "unknown status id")]
    fn require_unknown_status_panics() {
        require_status("ennui");
    }
}
