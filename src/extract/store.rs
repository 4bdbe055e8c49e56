use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use crate::codec::{HouseTile, TilePosition};

/// House id to its tiles, both in the order they were met in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    houses: IndexMap<u32, Vec<HouseTile>>,
    tiles: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tile to its house. Never replaces earlier tiles.
    pub fn insert(&mut self, tile: HouseTile) {
        self.houses.entry(tile.house_id).or_default().push(tile);
        self.tiles += 1;
    }

    pub fn house_count(&self) -> usize {
        self.houses.len()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    pub fn get(&self, house_id: u32) -> Option<&[HouseTile]> {
        self.houses.get(&house_id).map(Vec::as_slice)
    }

    /// Positions of one house, without ids.
    pub fn positions(&self, house_id: u32) -> Vec<TilePosition> {
        self.get(house_id)
            .map(|tiles| tiles.iter().map(|t| t.position).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[HouseTile])> {
        self.houses.iter().map(|(&id, tiles)| (id, tiles.as_slice()))
    }
}

struct Positions<'a>(&'a [HouseTile]);

impl Serialize for Positions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|t| &t.position))
    }
}

/// Serializes as `{ house_id: [{x, y, z}, ...] }`.
impl Serialize for RecordStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.houses.iter().map(|(id, tiles)| (id, Positions(tiles))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(house_id: u32, x: u32, y: u32, z: u8) -> HouseTile {
        HouseTile { house_id, position: TilePosition { x, y, z } }
    }

    #[test]
    fn test_insert_appends_per_house() {
        let mut store = RecordStore::new();
        store.insert(tile(7, 1, 1, 7));
        store.insert(tile(3, 5, 5, 6));
        store.insert(tile(7, 2, 1, 7));

        assert_eq!(store.house_count(), 2);
        assert_eq!(store.tile_count(), 3);
        assert_eq!(
            store.positions(7),
            vec![TilePosition { x: 1, y: 1, z: 7 }, TilePosition { x: 2, y: 1, z: 7 }]
        );
        let order: Vec<u32> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![7, 3]);
    }

    #[test]
    fn test_duplicate_positions_kept() {
        let mut store = RecordStore::new();
        store.insert(tile(1, 4, 4, 0));
        store.insert(tile(1, 4, 4, 0));
        assert_eq!(store.get(1).map(<[_]>::len), Some(2));
        assert!(store.get(2).is_none());
        assert!(store.positions(2).is_empty());
    }

    #[test]
    fn test_serialize_json() {
        let mut store = RecordStore::new();
        store.insert(tile(9, 0, 0, 0));
        store.insert(tile(5, 11, 22, 7));
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"9":[{"x":0,"y":0,"z":0}],"5":[{"x":11,"y":22,"z":7}]}"#);
    }
}
