//! Grid cells: identity, derived geometry and painted content.

use crate::collision::Quad;
use kurbo::{Point, Rect};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address of a sprite inside a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteCoord {
    pub row: u32,
    pub col: u32,
}

impl SpriteCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Painted content of one cell layer; `None` is an unpainted cell.
pub type Slot = Option<SpriteCoord>;

/// Which content layer of a cell an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    #[default]
    Tiles,
    Items,
}

impl Layer {
    /// Cycle to the other layer.
    pub fn next(self) -> Self {
        match self {
            Layer::Tiles => Layer::Items,
            Layer::Items => Layer::Tiles,
        }
    }
}

/// Error returned when a cell id string is not of the form `"{col}-{row}"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid cell id: {0}")]
pub struct ParseCellIdError(String);

/// Integer grid coordinate of a cell.
///
/// Ordered row-major so sets of ids iterate in the same order as the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub col: u32,
    pub row: u32,
}

impl CellId {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Flat schema index of this cell in a grid with `columns` columns.
    pub fn index(self, columns: u32) -> usize {
        self.row as usize * columns as usize + self.col as usize
    }
}

impl Ord for CellId {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for CellId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.col, self.row)
    }
}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (col, row) = s
            .split_once('-')
            .ok_or_else(|| ParseCellIdError(s.to_string()))?;
        let col = col.parse().map_err(|_| ParseCellIdError(s.to_string()))?;
        let row = row.parse().map_err(|_| ParseCellIdError(s.to_string()))?;
        Ok(Self { col, row })
    }
}

/// World-space geometry of a cell at a given edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    /// Edge length the geometry was computed for.
    pub size: f64,
    /// Top-left corner.
    pub position: Point,
    /// Center, floored to whole pixels.
    pub center: Point,
    /// Diamond through the midpoints of the four edges.
    pub collider: Quad,
}

impl CellGeometry {
    /// The cell's square.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.size,
            self.position.y + self.size,
        )
    }
}

/// Compute the geometry of the cell at `(col, row)` for cells of edge `size`.
///
/// The center is floored so that lines drawn through it land on whole pixels.
pub fn compute_geometry(col: u32, row: u32, size: f64) -> CellGeometry {
    let position = Point::new(f64::from(col) * size, f64::from(row) * size);
    let center = Point::new(
        (position.x + size / 2.0).floor(),
        (position.y + size / 2.0).floor(),
    );

    CellGeometry {
        size,
        position,
        center,
        collider: Quad {
            top: Point::new(center.x, position.y),
            right: Point::new(position.x + size, center.y),
            bottom: Point::new(center.x, position.y + size),
            left: Point::new(position.x, center.y),
        },
    }
}

/// A single grid cell.
///
/// Geometry is not stored: it depends on the current zoom and is derived on
/// demand with [`Cell::geometry`], so a cell can never hold a stale collider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    /// Sprite painted on the tile layer.
    pub tile: Slot,
    /// Sprite painted on the item layer.
    pub item: Slot,
}

impl Cell {
    /// Create an unpainted cell.
    pub fn new(id: CellId) -> Self {
        Self {
            id,
            tile: None,
            item: None,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// Geometry of this cell for cells of edge `size`.
    pub fn geometry(&self, size: f64) -> CellGeometry {
        compute_geometry(self.id.col, self.id.row, size)
    }

    /// Content of the given layer.
    pub fn slot(&self, layer: Layer) -> Slot {
        match layer {
            Layer::Tiles => self.tile,
            Layer::Items => self.item,
        }
    }

    /// Replace the content of the given layer, returning whether it changed.
    pub fn set_slot(&mut self, layer: Layer, slot: Slot) -> bool {
        let target = match layer {
            Layer::Tiles => &mut self.tile,
            Layer::Items => &mut self.item,
        };
        let changed = *target != slot;
        *target = slot;
        changed
    }
}
