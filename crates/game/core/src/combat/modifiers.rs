//! Status modifier pipeline.
//!
//! Final damage and block values are computed by folding the base value through
//! every status on the relevant entity that declares a modifier for the
//! computation, sorted by (phase, priority). Statuses tied on both keep the
//! order they were applied in.

use crate::content::{ModifierKind, ModifierPhase, StatusDefinition, require_status};
use crate::state::StatusContainer;

/// Folds `base` through the modifiers of `statuses` for `kind`.
///
/// Each definition rounds its own step; the pipeline itself never rounds.
/// The result may be negative; callers clamp.
pub fn apply_modifiers(kind: ModifierKind, statuses: &StatusContainer, base: i32) -> i32 {
    let mut modifiers: Vec<(ModifierPhase, i32, &dyn StatusDefinition, i32)> = statuses
        .iter()
        .filter_map(|(id, stacks)| {
            let definition = require_status(id.as_str());
            definition
                .modifier_phase(kind)
                .map(|phase| (phase, definition.priority(), definition, stacks))
        })
        .collect();

    // Stable sort: equal keys keep application order
    modifiers.sort_by_key(|(phase, priority, _, _)| (*phase, *priority));

    modifiers
        .into_iter()
        .fold(base, |value, (_, _, definition, stacks)| match kind {
            ModifierKind::OutgoingDamage => definition.modify_outgoing_damage(value, stacks),
            ModifierKind::IncomingDamage => definition.modify_incoming_damage(value, stacks),
            ModifierKind::Block => definition.modify_block(value, stacks),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{STRENGTH, WEAK};

    #[test]
    fn add_runs_before_multiply_regardless_of_application_order() {
        let mut statuses = StatusContainer::new();
        statuses.apply(&WEAK, 1);
        statuses.apply(&STRENGTH, 2);
        // (6 + 2) * 0.75 = 6, not 6 * 0.75 + 2 = 6.5
        assert_eq!(apply_modifiers(ModifierKind::OutgoingDamage, &statuses, 6), 6);
        assert_eq!(apply_modifiers(ModifierKind::OutgoingDamage, &statuses, 10), 9);
    }

    #[test]
    fn statuses_without_a_modifier_for_the_kind_are_skipped() {
        let mut statuses = StatusContainer::new();
        statuses.apply(&STRENGTH, 3);
        assert_eq!(apply_modifiers(ModifierKind::Block, &statuses, 5), 5);
        assert_eq!(apply_modifiers(ModifierKind::IncomingDamage, &statuses, 5), 5);
    }
}
