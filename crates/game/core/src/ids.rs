//! Strongly-typed string identifiers for content and combatants.
//!
//! Every registry key is a distinct newtype so a relic id can never be passed
//! where a card id is expected. Identifiers wrap a `Cow<'static, str>` which
//! lets content tables declare them as `const` while ids decoded from a save
//! file own their text.
use std::borrow::{Borrow, Cow};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Creates an identifier from a static string without allocating.
            pub const fn from_static(raw: &'static str) -> Self {
                Self(Cow::Borrowed(raw))
            }

            pub fn new(raw: impl Into<String>) -> Self {
                Self(Cow::Owned(raw.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::new(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_id!(
    /// Identifier of a card definition (`strike`, `bash+`).
    CardId
);
string_id!(
    /// Identifier of a status definition (`strength`, `madness`).
    StatusId
);
string_id!(
    /// Identifier of an enemy kind (`jaw_worm`).
    EnemyId
);
string_id!(
    /// Identifier of a relic definition (`burning_blood`).
    RelicId
);
string_id!(
    /// Identifier of a consumable definition (`healing_potion`).
    ConsumableId
);
string_id!(
    /// Identifier of a map event definition (`scavenger`).
    EventId
);
string_id!(
    /// Identifier of a combatant within a single battle.
    ///
    /// The player is always `player`; enemies use their kind id, suffixed with
    /// their slot when the same kind appears twice in one encounter.
    EntityId
);

impl EntityId {
    pub const PLAYER: EntityId = EntityId::from_static("player");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn borrowed_and_owned_ids_compare_equal() {
        const STRIKE: CardId = CardId::from_static("strike");
        assert_eq!(STRIKE, CardId::new(String::from("strike")));
        assert_eq!(STRIKE, "strike");
    }

    #[test]
    fn ids_can_be_looked_up_by_str() {
        let mut map = BTreeMap::new();
        map.insert(RelicId::from_static("vajra"), 1);
        assert_eq!(map.get("vajra"), Some(&1));
        assert_eq!(map.get("lantern"), None);
    }
}
