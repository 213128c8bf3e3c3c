//! Cell arena for one grid.

use crate::cell::{Cell, CellId, Layer, Slot, SpriteCoord};
use crate::schema::{Schema, SchemaResult};

/// All cells of a `columns × rows` grid, stored row-major.
///
/// A cell's position in the arena is its schema index, so content read back
/// through [`Grid::to_schema`] always matches the cell it came from.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of unpainted cells.
    pub fn new(columns: u32, rows: u32) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| Cell::new(CellId::new(col, row))))
            .collect();
        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Resolve signed coordinates to a cell id, or `None` outside the grid.
    pub fn resolve(&self, col: i64, row: i64) -> Option<CellId> {
        let in_range = (0..i64::from(self.columns)).contains(&col)
            && (0..i64::from(self.rows)).contains(&row);
        // Both coordinates are in `0..u32::MAX` here.
        in_range.then(|| CellId::new(col as u32, row as u32))
    }

    pub fn contains(&self, id: CellId) -> bool {
        id.col < self.columns && id.row < self.rows
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        if !self.contains(id) {
            return None;
        }
        self.cells.get(id.index(self.columns))
    }

    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        if !self.contains(id) {
            return None;
        }
        let index = id.index(self.columns);
        self.cells.get_mut(index)
    }

    /// Look up a cell by its `"{col}-{row}"` string id.
    pub fn get_by_key(&self, key: &str) -> Option<&Cell> {
        key.parse().ok().and_then(|id| self.get(id))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Set one layer of a cell, returning whether anything changed.
    pub fn set_slot(&mut self, id: CellId, layer: Layer, slot: Slot) -> bool {
        self.get_mut(id)
            .map(|cell| cell.set_slot(layer, slot))
            .unwrap_or(false)
    }

    /// Replace every cell's content with the schema's.
    pub fn apply_schema(&mut self, schema: &Schema) -> SchemaResult<()> {
        schema.validate_len(self.cells.len())?;
        for (cell, (tile, item)) in self
            .cells
            .iter_mut()
            .zip(schema.tiles.iter().zip(schema.items.iter()))
        {
            cell.tile = *tile;
            cell.item = *item;
        }
        Ok(())
    }

    /// Snapshot every cell's content as a schema.
    pub fn to_schema(&self) -> Schema {
        Schema {
            tiles: self.cells.iter().map(|cell| cell.tile).collect(),
            items: self.cells.iter().map(|cell| cell.item).collect(),
        }
    }

    /// Paint every cell's tile with its own `(row, col)`, as a sprite-sheet palette.
    pub fn fill_with_own_coords(&mut self) {
        for cell in &mut self.cells {
            let id = cell.id();
            cell.tile = Some(SpriteCoord::new(id.row, id.col));
        }
    }

    /// Clear every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.tile = None;
            cell.item = None;
        }
    }
}
