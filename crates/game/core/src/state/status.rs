//! Per-entity status stacks.
//!
//! Stacks are kept in application order, which is also the order turn-end
//! effects and decay are processed in. A stored count is always positive:
//! any update that would leave zero or fewer stacks removes the entry.

use crate::ids::StatusId;

/// Ordered mapping from status id to a positive stack count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusContainer {
    entries: Vec<(StatusId, i32)>,
}

impl StatusContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stacks of `id`, or 0 when absent.
    pub fn stacks(&self, id: &str) -> i32 {
        self.entries
            .iter()
            .find(|(status, _)| status.as_str() == id)
            .map_or(0, |(_, stacks)| *stacks)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stacks(id) > 0
    }

    /// Adds `delta` stacks (which may be negative) and returns the new count.
    ///
    /// A status reaching zero or below is removed.
    pub fn apply(&mut self, id: &StatusId, delta: i32) -> i32 {
        let next = self.stacks(id.as_str()) + delta;
        self.set(id, next);
        next.max(0)
    }

    /// Sets the stacks of `id` directly. Values ≤ 0 remove the status.
    pub fn set(&mut self, id: &StatusId, stacks: i32) {
        let position = self.entries.iter().position(|(status, _)| status == id);
        match (position, stacks > 0) {
            (Some(index), true) => self.entries[index].1 = stacks,
            (Some(index), false) => {
                self.entries.remove(index);
            }
            (None, true) => self.entries.push((id.clone(), stacks)),
            (None, false) => {}
        }
    }

    /// Removes `id` and returns the stacks it had.
    pub fn remove(&mut self, id: &str) -> Option<i32> {
        let index = self.entries.iter().position(|(status, _)| status == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates statuses in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&StatusId, i32)> {
        self.entries.iter().map(|(id, stacks)| (id, *stacks))
    }

    /// Status ids in application order.
    pub fn ids(&self) -> Vec<StatusId> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(StatusId, i32)> for StatusContainer {
    fn from_iter<I: IntoIterator<Item = (StatusId, i32)>>(iter: I) -> Self {
        let mut container = Self::new();
        for (id, stacks) in iter {
            container.apply(&id, stacks);
        }
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &'static str) -> StatusId {
        StatusId::from_static(raw)
    }

    #[test]
    fn stacks_accumulate_and_vanish_at_zero() {
        let mut statuses = StatusContainer::new();
        assert_eq!(statuses.apply(&id("weak"), 2), 2);
        assert_eq!(statuses.apply(&id("weak"), 1), 3);
        assert_eq!(statuses.apply(&id("weak"), -3), 0);
        assert!(!statuses.contains("weak"));
        assert!(statuses.is_empty());
    }

    #[test]
    fn negative_delta_on_absent_status_stores_nothing() {
        let mut statuses = StatusContainer::new();
        assert_eq!(statuses.apply(&id("madness"), -2), 0);
        assert!(statuses.is_empty());
    }

    #[test]
    fn overshooting_negative_delta_removes_entry() {
        let mut statuses = StatusContainer::new();
        statuses.apply(&id("strength"), 2);
        statuses.apply(&id("strength"), -5);
        assert_eq!(statuses.stacks("strength"), 0);
        assert_eq!(statuses.len(), 0);
    }

    #[test]
    fn iteration_keeps_application_order() {
        let mut statuses = StatusContainer::new();
        statuses.apply(&id("poison"), 3);
        statuses.apply(&id("weak"), 1);
        statuses.apply(&id("poison"), 1);
        let order: Vec<_> = statuses.iter().map(|(id, n)| (id.as_str(), n)).collect();
        assert_eq!(order, vec![("poison", 4), ("weak", 1)]);
    }
}
