//! Damage and block calculation.

use crate::content::ModifierKind;
use crate::state::StatusContainer;

use super::apply_modifiers;

/// Result of damage landing on an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Damage that went through to HP (`max(0, damage - block)`).
    pub amount: i32,
    /// Damage absorbed by block (`min(damage, block)`).
    pub blocked: i32,
}

/// Splits `damage` between `block` and HP.
pub fn absorb(block: i32, damage: i32) -> DamageOutcome {
    let damage = damage.max(0);
    let blocked = damage.min(block.max(0));
    DamageOutcome {
        amount: damage - blocked,
        blocked,
    }
}

/// Final damage of an attack before block.
///
/// ```text
/// outgoing = fold(source modifiers, base)
/// incoming = fold(target modifiers, outgoing)
/// final    = max(0, incoming)
/// ```
pub fn calculate_damage(base: i32, source: &StatusContainer, target: &StatusContainer) -> i32 {
    let outgoing = apply_modifiers(ModifierKind::OutgoingDamage, source, base);
    apply_modifiers(ModifierKind::IncomingDamage, target, outgoing).max(0)
}

/// Final block gained from `base`.
pub fn calculate_block(base: i32, owner: &StatusContainer) -> i32 {
    apply_modifiers(ModifierKind::Block, owner, base).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DEXTERITY, FRAIL, STRENGTH, VULNERABLE, WEAK};

    #[test]
    fn absorb_splits_damage() {
        assert_eq!(absorb(5, 8), DamageOutcome { amount: 3, blocked: 5 });
        assert_eq!(absorb(10, 8), DamageOutcome { amount: 0, blocked: 8 });
        assert_eq!(absorb(0, 8), DamageOutcome { amount: 8, blocked: 0 });
        assert_eq!(absorb(4, -3), DamageOutcome::default());
    }

    #[test]
    fn attacker_then_defender_modifiers() {
        let mut attacker = StatusContainer::new();
        attacker.apply(&STRENGTH, 2);
        let mut defender = StatusContainer::new();
        defender.apply(&VULNERABLE, 1);
        // (6 + 2) * 1.5 = 12
        assert_eq!(calculate_damage(6, &attacker, &defender), 12);
    }

    #[test]
    fn weak_and_vulnerable_truncate_at_each_step() {
        let mut attacker = StatusContainer::new();
        attacker.apply(&WEAK, 1);
        let mut defender = StatusContainer::new();
        defender.apply(&VULNERABLE, 1);
        // 11 * 0.75 = 8 (8.25), 8 * 1.5 = 12
        assert_eq!(calculate_damage(11, &attacker, &defender), 12);
    }

    #[test]
    fn final_damage_is_never_negative() {
        let mut attacker = StatusContainer::new();
        attacker.set(&STRENGTH, 1);
        let defender = StatusContainer::new();
        assert_eq!(calculate_damage(0, &attacker, &defender), 1);
        assert_eq!(calculate_damage(-5, &attacker, &defender), 0);
    }

    #[test]
    fn block_uses_dexterity_then_frail() {
        let mut owner = StatusContainer::new();
        owner.apply(&FRAIL, 1);
        owner.apply(&DEXTERITY, 1);
        // (5 + 1) * 0.75 = 4
        assert_eq!(calculate_block(5, &owner), 4);
    }
}
