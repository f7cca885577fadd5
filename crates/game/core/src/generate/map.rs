//! Act map generation.
//!
//! A map is a layered DAG: row 0 holds the single start node, the last row the
//! single boss node, and every row in between two to four nodes. Connections
//! always point from a row to the next one.
use strum::{AsRefStr, Display, EnumString};

use crate::rng::SeededRng;

/// Kind of room behind a map node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoomType {
    Start,
    Battle,
    Elite,
    Rest,
    Shop,
    Event,
    Boss,
}

impl RoomType {
    pub fn is_combat(self) -> bool {
        matches!(self, Self::Battle | Self::Elite | Self::Boss)
    }
}

/// One location on the act map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapNode {
    /// `"{row}_{column}"`
    pub id: String,
    pub row: u32,
    pub column: u32,
    pub room_type: RoomType,
    /// Ids of next-row nodes reachable from here, sorted by column.
    pub connections: Vec<String>,
    pub completed: bool,
    pub accessible: bool,
}

impl MapNode {
    pub fn new(row: u32, column: u32, room_type: RoomType) -> Self {
        Self {
            id: node_id(row, column),
            row,
            column,
            room_type,
            connections: Vec::new(),
            completed: false,
            accessible: false,
        }
    }
}

pub fn node_id(row: u32, column: u32) -> String {
    format!("{row}_{column}")
}

/// Generates the map for one act. `rows` is clamped to at least 4.
///
/// Rows are produced top-down; each row first rolls its room types and then
/// wires itself to the previous row, all from one RNG stream.
pub fn generate_map(seed: u64, rows: u32) -> Vec<MapNode> {
    let rows = rows.max(4);
    let mut rng = SeededRng::new(seed);
    let mut layers: Vec<Vec<MapNode>> = Vec::with_capacity(rows as usize);

    for row in 0..rows {
        let count = if row == 0 || row == rows - 1 {
            1
        } else {
            2 + rng.next_int(3) as u32
        };
        let mut layer: Vec<MapNode> = (0..count)
            .map(|column| MapNode::new(row, column, roll_room(row, rows, &mut rng)))
            .collect();

        if let Some(previous) = layers.last_mut() {
            connect(previous, &layer, &mut rng);
        } else {
            for node in &mut layer {
                node.accessible = true;
            }
        }
        layers.push(layer);
    }

    layers.into_iter().flatten().collect()
}

fn roll_room(row: u32, rows: u32, rng: &mut SeededRng) -> RoomType {
    if row == 0 {
        return RoomType::Start;
    }
    if row == rows - 1 {
        return RoomType::Boss;
    }
    if row == 1 {
        return RoomType::Battle;
    }
    if row == rows - 2 {
        return RoomType::Rest;
    }

    let roll = rng.next_int(100);
    if row >= 4 {
        match roll {
            0..10 => RoomType::Elite,
            10..22 => RoomType::Rest,
            22..32 => RoomType::Shop,
            32..50 => RoomType::Event,
            _ => RoomType::Battle,
        }
    } else if roll < 25 {
        RoomType::Event
    } else {
        RoomType::Battle
    }
}

fn connect(previous: &mut [MapNode], current: &[MapNode], rng: &mut SeededRng) {
    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); previous.len()];
    let parents: Vec<usize> = (0..previous.len()).collect();

    for column in 0..current.len() {
        let wanted = if rng.next_int(100) < 70 { 1 } else { 2 };
        for parent in rng.shuffled(&parents).into_iter().take(wanted) {
            link(&mut edges[parent], column);
        }
    }

    for exits in &mut edges {
        if exits.is_empty() {
            let column = rng.next_int(current.len());
            link(exits, column);
        }
    }

    // Repair: every node below row 0 needs at least one way in.
    for column in 0..current.len() {
        if !edges.iter().any(|exits| exits.contains(&column)) {
            let parent = rng.next_int(previous.len());
            link(&mut edges[parent], column);
        }
    }

    for (node, mut exits) in previous.iter_mut().zip(edges) {
        exits.sort_unstable();
        node.connections = exits.into_iter().map(|column| current[column].id.clone()).collect();
    }
}

fn link(exits: &mut Vec<usize>, column: usize) {
    if !exits.contains(&column) {
        exits.push(column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn row(map: &[MapNode], row: u32) -> Vec<&MapNode> {
        map.iter().filter(|node| node.row == row).collect()
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_map(42, 15), generate_map(42, 15));
        assert_ne!(generate_map(42, 15), generate_map(43, 15));
    }

    #[test]
    fn fixed_rows_have_fixed_rooms() {
        for seed in 0..20 {
            let map = generate_map(seed, 15);
            let start = row(&map, 0);
            assert_eq!(start.len(), 1);
            assert_eq!(start[0].id, "0_0");
            assert_eq!(start[0].room_type, RoomType::Start);
            assert!(start[0].accessible);

            let boss = row(&map, 14);
            assert_eq!(boss.len(), 1);
            assert_eq!(boss[0].room_type, RoomType::Boss);
            assert!(boss[0].connections.is_empty());

            assert!(row(&map, 1).iter().all(|node| node.room_type == RoomType::Battle));
            assert!(row(&map, 13).iter().all(|node| node.room_type == RoomType::Rest));
            for node in row(&map, 2).into_iter().chain(row(&map, 3)) {
                assert!(matches!(node.room_type, RoomType::Battle | RoomType::Event));
            }
        }
    }

    #[test]
    fn middle_rows_have_two_to_four_nodes() {
        let map = generate_map(9, 15);
        for r in 1..14 {
            let count = row(&map, r).len();
            assert!((2..=4).contains(&count), "row {r} has {count} nodes");
        }
    }

    #[test]
    fn every_node_is_connected_both_ways() {
        for seed in 0..30 {
            let map = generate_map(seed, 15);
            let targets: HashSet<&str> = map
                .iter()
                .flat_map(|node| node.connections.iter().map(String::as_str))
                .collect();
            for node in &map {
                if node.row > 0 {
                    assert!(targets.contains(node.id.as_str()), "{} unreachable", node.id);
                }
                if node.room_type != RoomType::Boss {
                    assert!(!node.connections.is_empty(), "{} is a dead end", node.id);
                }
            }
        }
    }

    #[test]
    fn connections_point_to_the_next_row_in_column_order() {
        let map = generate_map(5, 15);
        for node in &map {
            let columns: Vec<u32> = node
                .connections
                .iter()
                .map(|id| {
                    let target = map.iter().find(|n| &n.id == id).expect("target exists");
                    assert_eq!(target.row, node.row + 1);
                    target.column
                })
                .collect();
            let mut sorted = columns.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(columns, sorted);
        }
    }

    #[test]
    fn room_type_parses_from_snake_case() {
        assert_eq!("elite".parse::<RoomType>(), Ok(RoomType::Elite));
        assert_eq!(RoomType::Shop.to_string(), "shop");
        assert!("tavern".parse::<RoomType>().is_err());
    }
}
