//! Versioned, string-keyed projection of a [`RunState`] for persistence.
//!
//! Ids are stored as plain strings so a save stays readable by older and
//! newer content tables; restoring validates every id against the registries
//! and reports the first unknown one as a [`LoadError`].

use std::str::FromStr;

use super::{LoadError, RunState};
use crate::config::GameConfig;
use crate::content::{get_card, get_consumable, get_relic, get_status};
use crate::generate::{MapNode, RoomType};
use crate::state::{Card, Entity, StatusContainer};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapNodeSnapshot {
    pub id: String,
    pub row: u32,
    pub column: u32,
    pub room_type: String,
    pub connections: Vec<String>,
    pub completed: bool,
    pub accessible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub max_hp: i32,
    pub current_hp: i32,
    /// Status stacks in the order they were first applied.
    pub statuses: Vec<(String, i32)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckEntry {
    /// Card instance id.
    pub id: String,
    pub card_id: String,
}

/// Save-file form of a run, taken only between nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSnapshot {
    pub version: u32,
    pub seed: u64,
    pub floor: u32,
    pub max_floor: u32,
    pub gold: i32,
    pub map: Vec<MapNodeSnapshot>,
    pub current_node_id: Option<String>,
    pub player: PlayerSnapshot,
    pub deck: Vec<DeckEntry>,
    pub relics: Vec<String>,
    pub consumables: Vec<String>,
    pub is_over: bool,
    pub won: bool,
}

impl RunSnapshot {
    pub const VERSION: u32 = 5;

    fn check_version(version: u32) -> Result<(), LoadError> {
        if version != Self::VERSION {
            return Err(LoadError::IncompatibleVersion {
                found: version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }
}

impl RunState {
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            version: RunSnapshot::VERSION,
            seed: self.seed,
            floor: self.floor,
            max_floor: self.max_floor,
            gold: self.gold,
            map: self
                .map
                .iter()
                .map(|node| MapNodeSnapshot {
                    id: node.id.clone(),
                    row: node.row,
                    column: node.column,
                    room_type: node.room_type.to_string(),
                    connections: node.connections.clone(),
                    completed: node.completed,
                    accessible: node.accessible,
                })
                .collect(),
            current_node_id: self.current_node.clone(),
            player: PlayerSnapshot {
                max_hp: self.player.max_hp,
                current_hp: self.player.current_hp,
                statuses: self
                    .player
                    .statuses
                    .iter()
                    .map(|(id, stacks)| (id.to_string(), stacks))
                    .collect(),
            },
            deck: self
                .deck
                .iter()
                .map(|card| DeckEntry {
                    id: card.id.clone(),
                    card_id: card.card_id.to_string(),
                })
                .collect(),
            relics: self.relics.iter().map(ToString::to_string).collect(),
            consumables: self.consumables.iter().map(ToString::to_string).collect(),
            is_over: self.is_over,
            won: self.won,
        }
    }

    /// Rebuilds a run, rejecting other versions before looking at any field.
    pub fn restore(snapshot: &RunSnapshot) -> Result<Self, LoadError> {
        RunSnapshot::check_version(snapshot.version)?;

        let map = snapshot
            .map
            .iter()
            .map(|node| {
                let room_type = RoomType::from_str(&node.room_type)
                    .map_err(|_| LoadError::InvalidRoomType(node.room_type.clone()))?;
                Ok(MapNode {
                    id: node.id.clone(),
                    row: node.row,
                    column: node.column,
                    room_type,
                    connections: node.connections.clone(),
                    completed: node.completed,
                    accessible: node.accessible,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        let mut statuses = StatusContainer::new();
        for (id, stacks) in &snapshot.player.statuses {
            let definition = get_status(id).ok_or_else(|| LoadError::UnknownStatus(id.clone()))?;
            if statuses.stacks(id) != 0 {
                return Err(LoadError::Malformed(format!("status {id} is listed twice")));
            }
            statuses.set(&definition.id(), *stacks);
        }

        let deck = snapshot
            .deck
            .iter()
            .map(|entry| {
                get_card(&entry.card_id)
                    .map(|definition| Card::new(entry.id.clone(), definition.id.clone()))
                    .ok_or_else(|| LoadError::UnknownCard(entry.card_id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let relics = snapshot
            .relics
            .iter()
            .map(|id| {
                get_relic(id)
                    .map(|definition| definition.id.clone())
                    .ok_or_else(|| LoadError::UnknownRelic(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let consumables = snapshot
            .consumables
            .iter()
            .map(|id| {
                get_consumable(id)
                    .map(|definition| definition.id.clone())
                    .ok_or_else(|| LoadError::UnknownConsumable(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(current) = &snapshot.current_node_id
            && !map.iter().any(|node| &node.id == current)
        {
            return Err(LoadError::Malformed(format!("current node {current} is not on the map")));
        }

        let map_rows = map
            .iter()
            .map(|node| node.row + 1)
            .max()
            .unwrap_or(GameConfig::DEFAULT_MAP_ROWS)
            .max(GameConfig::MIN_MAP_ROWS);

        let (max_hp, current_hp) = (snapshot.player.max_hp, snapshot.player.current_hp);
        if max_hp <= 0 {
            return Err(LoadError::Malformed(format!("max hp {max_hp} is not positive")));
        }
        if !(0..=max_hp).contains(&current_hp) {
            return Err(LoadError::Malformed(format!(
                "current hp {current_hp} is outside 0..={max_hp}"
            )));
        }
        if snapshot.gold < 0 {
            return Err(LoadError::Malformed(format!("gold {} is negative", snapshot.gold)));
        }

        let mut player = Entity::player(
            GameConfig::PLAYER_NAME,
            max_hp,
            current_hp,
        );
        player.statuses = statuses;

        Ok(Self {
            seed: snapshot.seed,
            floor: snapshot.floor,
            max_floor: snapshot.max_floor,
            map_rows,
            gold: snapshot.gold,
            player,
            deck,
            relics,
            consumables,
            map,
            current_node: snapshot.current_node_id.clone(),
            is_over: snapshot.is_over,
            won: snapshot.won,
        })
    }
}

// ============================================================================
// JSON codec
// ============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;

    #[derive(serde::Deserialize)]
    struct VersionHeader {
        version: u32,
    }

    impl RunSnapshot {
        pub fn to_json(&self) -> Result<String, LoadError> {
            serde_json::to_string_pretty(self).map_err(|error| LoadError::Malformed(error.to_string()))
        }

        /// Decodes a save, checking the version before the full decode.
        pub fn from_json(raw: &str) -> Result<Self, LoadError> {
            let header: VersionHeader =
                serde_json::from_str(raw).map_err(|error| LoadError::Malformed(error.to_string()))?;
            Self::check_version(header.version)?;
            serde_json::from_str(raw).map_err(|error| LoadError::Malformed(error.to_string()))
        }
    }

    impl RunState {
        pub fn to_json(&self) -> Result<String, LoadError> {
            self.snapshot().to_json()
        }

        pub fn from_json(raw: &str) -> Result<Self, LoadError> {
            Self::restore(&RunSnapshot::from_json(raw)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DEXTERITY, MADNESS};
    use crate::ids::{CardId, ConsumableId, RelicId};

    fn progressed_run() -> RunState {
        let mut run = RunState::new(99, &GameConfig::new());
        let first = run.accessible_nodes()[0].id.clone();
        run.enter_node(&first).unwrap();
        run.complete_current_node().unwrap();
        run.gold = 140;
        run.player.current_hp = 51;
        run.player.statuses.set(&MADNESS, 4);
        run.add_card(CardId::from_static("cleave"));
        run.add_relic(RelicId::from_static("vajra"));
        run.add_consumable(ConsumableId::from_static("healing_potion")).unwrap();
        run
    }

    #[test]
    fn snapshot_round_trip_is_identity() {
        let run = progressed_run();
        let restored = RunState::restore(&run.snapshot()).unwrap();
        assert_eq!(restored, run);
    }

    #[test]
    fn other_versions_are_rejected_first() {
        let mut snapshot = progressed_run().snapshot();
        snapshot.version = 3;
        snapshot.deck[0].card_id = "missing".into();
        assert_eq!(
            RunState::restore(&snapshot),
            Err(LoadError::IncompatibleVersion {
                found: 3,
                expected: 5
            })
        );
    }

    #[test]
    fn unknown_ids_are_typed_errors() {
        let base = progressed_run().snapshot();

        let mut snapshot = base.clone();
        snapshot.map[0].room_type = "casino".into();
        assert_eq!(
            RunState::restore(&snapshot),
            Err(LoadError::InvalidRoomType("casino".into()))
        );

        let mut snapshot = base.clone();
        snapshot.relics.push("cursed_idol".into());
        assert_eq!(
            RunState::restore(&snapshot),
            Err(LoadError::UnknownRelic("cursed_idol".into()))
        );

        let mut snapshot = base;
        snapshot.player.statuses.push(("hex".into(), 1));
        assert_eq!(
            RunState::restore(&snapshot),
            Err(LoadError::UnknownStatus("hex".into()))
        );
    }

    #[test]
    fn statuses_keep_their_application_order() {
        let mut run = progressed_run();
        run.player.statuses.set(&DEXTERITY, 2);

        let snapshot = run.snapshot();
        assert_eq!(
            snapshot.player.statuses,
            vec![("madness".to_string(), 4), ("dexterity".to_string(), 2)]
        );
        let restored = RunState::restore(&snapshot).unwrap();
        let order: Vec<_> = restored.player.statuses.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(order, ["madness", "dexterity"]);
    }

    #[test]
    fn duplicate_statuses_are_malformed() {
        let mut snapshot = progressed_run().snapshot();
        snapshot.player.statuses.push(("madness".into(), 1));
        assert!(matches!(RunState::restore(&snapshot), Err(LoadError::Malformed(_))));
    }

    #[test]
    fn impossible_player_numbers_are_malformed() {
        let base = progressed_run().snapshot();

        for (max_hp, current_hp, gold) in [(0, 0, 10), (-5, 0, 10), (80, 81, 10), (80, -1, 10), (80, 40, -1)] {
            let mut snapshot = base.clone();
            snapshot.player.max_hp = max_hp;
            snapshot.player.current_hp = current_hp;
            snapshot.gold = gold;
            assert!(
                matches!(RunState::restore(&snapshot), Err(LoadError::Malformed(_))),
                "max {max_hp} current {current_hp} gold {gold}"
            );
        }

        let mut snapshot = base;
        snapshot.player.current_hp = 0;
        snapshot.gold = 0;
        assert!(RunState::restore(&snapshot).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip() {
        let run = progressed_run();
        let raw = run.to_json().unwrap();
        assert_eq!(RunState::from_json(&raw).unwrap(), run);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_version_is_checked_before_fields() {
        let raw = r#"{ "version": 2, "seed": "not a number" }"#;
        assert_eq!(
            RunSnapshot::from_json(raw),
            Err(LoadError::IncompatibleVersion {
                found: 2,
                expected: 5
            })
        );
        assert!(matches!(
            RunSnapshot::from_json(r#"{ "version": 5 }"#),
            Err(LoadError::Malformed(_))
        ));
    }
}
