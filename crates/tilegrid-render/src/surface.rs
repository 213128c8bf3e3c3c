//! Drawing surface abstraction.

use kurbo::{Line, Point, Rect, Size};
use peniko::Color;
use tilegrid_core::Quad;

/// A 2D drawing target. Every call takes screen-space coordinates.
pub trait Surface {
    /// Clear the whole canvas.
    fn clear(&mut self, size: Size, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blit the `source` region of the sprite sheet into `dest`.
    fn draw_image(&mut self, source: Rect, dest: Rect);

    fn draw_line(&mut self, line: Line, color: Color, width: f64);

    /// Fill a four-point polygon.
    fn fill_diamond(&mut self, quad: &Quad, color: Color);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
}

/// A recorded drawing call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear {
        size: Size,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Image {
        source: Rect,
        dest: Rect,
    },
    Line {
        line: Line,
        color: Color,
        width: f64,
    },
    Diamond {
        quad: Quad,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
}

/// Surface that records every call, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Destination rectangles of every image blit.
    pub fn image_dests(&self) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Image { dest, .. } => Some(*dest),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Size, color: Color) {
        self.commands.push(DrawCommand::Clear { size, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_image(&mut self, source: Rect, dest: Rect) {
        self.commands.push(DrawCommand::Image { source, dest });
    }

    fn draw_line(&mut self, line: Line, color: Color, width: f64) {
        self.commands.push(DrawCommand::Line { line, color, width });
    }

    fn fill_diamond(&mut self, quad: &Quad, color: Color) {
        self.commands.push(DrawCommand::Diamond { quad: *quad, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
