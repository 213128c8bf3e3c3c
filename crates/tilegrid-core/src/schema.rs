//! Persisted tile and item schemas.
//!
//! On disk a schema is `{ "tilesSchema": [...], "itemsSchema": [...] }` where
//! every entry is `[row, col]` for a painted cell or `[]` for an empty one,
//! laid out row-major (`index = row * columns + col`).

use crate::cell::{Slot, SpriteCoord};
use crate::storage::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Corrupt schema under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
    #[error("Schema has {found} {layer} entries, expected {expected}")]
    LengthMismatch {
        layer: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid {layer} entry at index {index}: expected [] or [row, col]")]
    InvalidSlot { layer: &'static str, index: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaRepr {
    tiles_schema: Vec<Vec<u32>>,
    items_schema: Vec<Vec<u32>>,
}

fn slot_to_repr(slot: &Slot) -> Vec<u32> {
    match slot {
        Some(coord) => vec![coord.row, coord.col],
        None => Vec::new(),
    }
}

fn slots_from_repr(layer: &'static str, entries: Vec<Vec<u32>>) -> SchemaResult<Vec<Slot>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry.as_slice() {
            [] => Ok(None),
            [row, col] => Ok(Some(SpriteCoord::new(*row, *col))),
            _ => Err(SchemaError::InvalidSlot { layer, index }),
        })
        .collect()
}

/// Flat, row-major tile and item content of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    pub tiles: Vec<Slot>,
    pub items: Vec<Slot>,
}

impl Schema {
    /// Schema of `len` empty cells.
    pub fn empty(len: usize) -> Self {
        Self {
            tiles: vec![None; len],
            items: vec![None; len],
        }
    }

    /// True when no cell is painted on either layer.
    pub fn is_blank(&self) -> bool {
        self.tiles.iter().chain(&self.items).all(Option::is_none)
    }

    /// Check that both layers hold exactly `len` entries.
    pub fn validate_len(&self, len: usize) -> SchemaResult<()> {
        for (layer, found) in [("tile", self.tiles.len()), ("item", self.items.len())] {
            if found != len {
                return Err(SchemaError::LengthMismatch {
                    layer,
                    expected: len,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Serialize to the on-disk JSON shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SchemaRepr {
            tiles_schema: self.tiles.iter().map(slot_to_repr).collect(),
            items_schema: self.items.iter().map(slot_to_repr).collect(),
        })
    }

    /// Parse the on-disk JSON shape. `key` only labels errors.
    pub fn from_json(key: &str, json: &str) -> SchemaResult<Self> {
        let repr: SchemaRepr = serde_json::from_str(json).map_err(|e| SchemaError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            tiles: slots_from_repr("tile", repr.tiles_schema)?,
            items: slots_from_repr("item", repr.items_schema)?,
        })
    }

    /// Load the schema stored under `key` for a grid of `len` cells.
    ///
    /// Returns `Ok(None)` when nothing usable is stored yet: the key is absent,
    /// or either layer is empty. A stored document that fails to parse or has
    /// the wrong length is an error, never a partial grid.
    pub fn load(store: &dyn KeyValueStore, key: &str, len: usize) -> SchemaResult<Option<Self>> {
        let Some(json) = store.get(key)? else {
            log::debug!("No schema stored under '{}'", key);
            return Ok(None);
        };

        let schema = Self::from_json(key, &json)?;
        if schema.tiles.is_empty() || schema.items.is_empty() {
            log::debug!("Schema under '{}' is empty", key);
            return Ok(None);
        }

        schema.validate_len(len)?;
        Ok(Some(schema))
    }

    /// Store the schema under `key`.
    pub fn save(&self, store: &dyn KeyValueStore, key: &str) -> SchemaResult<()> {
        let json = self
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        store.set(key, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_json_shape() {
        let schema = Schema {
            tiles: vec![None, Some(SpriteCoord::new(0, 3))],
            items: vec![Some(SpriteCoord::new(1, 1)), None],
        };
        assert_eq!(
            schema.to_json().unwrap(),
            r#"{"tilesSchema":[[],[0,3]],"itemsSchema":[[1,1],[]]}"#
        );
    }

    #[test]
    fn test_from_json() {
        let schema = Schema::from_json("k", r#"{"tilesSchema":[[2,5],[]],"itemsSchema":[[],[]]}"#)
            .unwrap();
        assert_eq!(schema.tiles, vec![Some(SpriteCoord::new(2, 5)), None]);
        assert_eq!(schema.items, vec![None, None]);
    }

    #[test]
    fn test_malformed_json_is_corrupt() {
        let err = Schema::from_json("map", "{not json").unwrap_err();
        assert!(matches!(err, SchemaError::Corrupt { ref key, .. } if key == "map"));

        let err = Schema::from_json("map", r#"{"tilesSchema":[]}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Corrupt { .. }));
    }

    #[test]
    fn test_wrong_entry_shape_is_invalid() {
        let err = Schema::from_json("k", r#"{"tilesSchema":[[1]],"itemsSchema":[[]]}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSlot { layer: "tile", index: 0 }));
    }

    #[test]
    fn test_load_absent_key() {
        let store = MemoryStorage::new();
        assert!(Schema::load(&store, "map", 4).unwrap().is_none());
    }

    #[test]
    fn test_load_blank_document() {
        let store = MemoryStorage::new();
        store.set("map", r#"{"tilesSchema":[],"itemsSchema":[]}"#).unwrap();
        assert!(Schema::load(&store, "map", 4).unwrap().is_none());

        store.set("map", r#"{"tilesSchema":[],"itemsSchema":[[],[],[],[]]}"#).unwrap();
        assert!(Schema::load(&store, "map", 4).unwrap().is_none());
    }

    #[test]
    fn test_load_wrong_length() {
        let store = MemoryStorage::new();
        Schema::empty(3).save(&store, "map").unwrap();
        let err = Schema::load(&store, "map", 4).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::LengthMismatch { expected: 4, found: 3, .. }
        ));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStorage::new();
        let mut schema = Schema::empty(4);
        schema.tiles[2] = Some(SpriteCoord::new(1, 0));
        schema.save(&store, "map").unwrap();

        let loaded = Schema::load(&store, "map", 4).unwrap().unwrap();
        assert_eq!(loaded, schema);
    }
}
