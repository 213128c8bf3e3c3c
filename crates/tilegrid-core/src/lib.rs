//! Tilegrid Core Library
//!
//! Platform-agnostic engine for the tilegrid map editor: cells and their
//! colliders, the pan/zoom viewport, selection tools and schema persistence.

pub mod cell;
pub mod collision;
pub mod config;
pub mod editor;
pub mod grid;
pub mod input;
pub mod schema;
pub mod sprite;
pub mod storage;
pub mod tools;
pub mod viewport;

pub use cell::{Cell, CellGeometry, CellId, Layer, Slot, SpriteCoord};
pub use collision::{Quad, segment_intersect, segment_intersects_quad};
pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorContext, EditorError, EditorResult, EditorRole};
pub use grid::Grid;
pub use input::InputState;
pub use schema::{Schema, SchemaError};
pub use sprite::SpriteSheet;
pub use storage::{KeyValueStore, StorageError};
pub use tools::{ToolKind, ToolManager, ToolShape, compute_affected_cells};
pub use viewport::{Viewport, ZoomDirection};
