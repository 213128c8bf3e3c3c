//! Colors and stroke widths of a rendered frame.

use peniko::Color;

/// Visual style of the grid and the selection overlay.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    /// Canvas clear color.
    pub background_color: Color,
    /// Cell outline color when grid lines are shown.
    pub grid_color: Color,
    pub grid_width: f64,
    /// Outline of the hovered cell.
    pub hover_color: Color,
    pub hover_width: f64,
    /// Raycast and area outline color.
    pub line_color: Color,
    pub line_width: f64,
    /// Raycast endpoint markers.
    pub point_color: Color,
    pub point_size: f64,
    /// Tint of cells a paint gesture will fill.
    pub paint_color: Color,
    /// Tint of cells an erase gesture will clear.
    pub erase_color: Color,
    /// Fill cell colliders, for debugging hit tests.
    pub show_colliders: bool,
    pub collider_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgba8(0, 0, 0, 0),
            grid_color: Color::from_rgba8(0, 0, 0, 255),
            grid_width: 2.0,
            hover_color: Color::from_rgba8(255, 255, 0, 255),
            hover_width: 4.0,
            line_color: Color::from_rgba8(255, 0, 0, 255),
            line_width: 4.0,
            point_color: Color::from_rgba8(0, 0, 255, 255),
            point_size: 6.0,
            paint_color: Color::from_rgba8(0, 0, 0, 128),
            erase_color: Color::from_rgba8(50, 50, 50, 179),
            show_colliders: false,
            collider_color: Color::from_rgba8(100, 100, 100, 102),
        }
    }
}

impl RenderStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw cell colliders under the selection overlay.
    pub fn with_colliders(mut self, show: bool) -> Self {
        self.show_colliders = show;
        self
    }
}
