//! Sprite sheet addressing.

use crate::cell::SpriteCoord;
use crate::config::SheetSettings;
use kurbo::Rect;

/// A sprite sheet image cut into square sprites of `texture_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub texture_size: f64,
    pub columns: u32,
    pub rows: u32,
}

impl SpriteSheet {
    pub fn new(texture_size: f64, columns: u32, rows: u32) -> Self {
        Self {
            texture_size,
            columns,
            rows,
        }
    }

    /// Sheet layout for an image of the given settings.
    pub fn from_settings(settings: &SheetSettings) -> Self {
        Self::new(
            settings.texture_size,
            (settings.image_width / settings.texture_size).floor() as u32,
            (settings.image_height / settings.texture_size).floor() as u32,
        )
    }

    /// Whether the sheet holds a sprite at `coord`.
    pub fn contains(&self, coord: SpriteCoord) -> bool {
        coord.row < self.rows && coord.col < self.columns
    }

    /// Pixel rectangle of a sprite in the sheet image.
    pub fn source_rect(&self, coord: SpriteCoord) -> Rect {
        let t = self.texture_size;
        Rect::from_origin_size(
            (f64::from(coord.col) * t, f64::from(coord.row) * t),
            (t, t),
        )
    }
}
