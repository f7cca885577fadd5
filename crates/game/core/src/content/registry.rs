use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Immutable id → definition table.
///
/// Tables are built once on first use and never mutated afterwards. Lookups by
/// an unknown id through [`Registry::require`] are content bugs and panic.
pub struct Registry<K, T: ?Sized + 'static> {
    kind: &'static str,
    entries: BTreeMap<K, &'static T>,
}

impl<K, T> Registry<K, T>
where
    K: Ord + Borrow<str>,
    T: ?Sized + 'static,
{
    /// Builds a table. A duplicate id is a content bug and panics.
    pub fn new(kind: &'static str, definitions: impl IntoIterator<Item = (K, &'static T)>) -> Self {
        let mut entries = BTreeMap::new();
        for (id, definition) in definitions {
            let key: &str = id.borrow();
            let key = key.to_owned();
            if entries.insert(id, definition).is_some() {
                panic!("duplicate {kind} id `{key}` in content table");
            }
        }
        Self { kind, entries }
    }

    pub fn get(&self, id: &str) -> Option<&'static T> {
        self.entries.get(id).copied()
    }

    /// Looks up `id`, panicking when the table has no such entry.
    pub fn require(&self, id: &str) -> &'static T {
        match self.get(id) {
            Some(definition) => definition,
            None => panic!("unknown {} id `{id}`", self.kind),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// All ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// All definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &'static T)> {
        self.entries.iter().map(|(id, definition)| (id, *definition))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CardId;

    static ONE: u32 = 1;
    static TWO: u32 = 2;

    #[test]
    fn lookup_and_sorted_ids() {
        let registry = Registry::new(
            "number",
            [(CardId::from_static("two"), &TWO), (CardId::from_static("one"), &ONE)],
        );
        assert_eq!(registry.get("one"), Some(&1));
        assert!(registry.get("three").is_none());
        let ids: Vec<&str> = registry.ids().map(CardId::as_str).collect();
        assert_eq!(ids, vec!["one", "two"]);
    }

    #[test]
    #[should_panic(expected = "unknown number id `three`")]
    fn require_panics_on_unknown_id() {
        let registry = Registry::new("number", [(CardId::from_static("one"), &ONE)]);
        registry.require("three");
    }

    #[test]
    #[should_panic(expected = "duplicate")]
    fn duplicate_ids_are_rejected() {
        Registry::new(
            "number",
            [(CardId::from_static("one"), &ONE), (CardId::from_static("one"), &TWO)],
        );
    }
}
