//! Viewport over a grid: pan, zoom, culling and screen↔cell mapping.

use crate::cell::{CellGeometry, CellId};
use crate::collision::Quad;
use crate::config::{EditorConfig, ZoomSettings};
use crate::grid::Grid;
use kurbo::{Point, Rect, Size, Vec2};
use std::ops::Range;

/// Direction of a zoom request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Larger cells.
    In,
    /// Smaller cells.
    Out,
}

/// Pan gesture in progress.
#[derive(Debug, Clone, Copy)]
struct PanGesture {
    /// Pointer position when the gesture began.
    origin: Point,
    /// Viewport offset when the gesture began.
    start_offset: Vec2,
}

/// Window onto a grid.
///
/// World space has the grid's top-left corner at the origin and cells of edge
/// [`scroll_size`](Self::scroll_size). Screen space is world space shifted by
/// the viewport offset: `screen = world - offset`.
#[derive(Debug, Clone)]
pub struct Viewport {
    grid: Grid,
    /// Nominal cell edge; zoom resets to this.
    cell_size: f64,
    /// World position of the viewport's top-left corner.
    offset: Vec2,
    /// Canvas size.
    size: Size,
    /// Current on-screen cell edge.
    scroll_size: f64,
    zoom: ZoomSettings,
    /// Last raw pointer position over the canvas.
    pointer: Option<Point>,
    hover: Option<CellId>,
    pan: Option<PanGesture>,
    show_grid: bool,
}

impl Viewport {
    /// Create a viewport over a fresh, unpainted grid.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            grid: Grid::new(config.columns, config.rows),
            cell_size: config.cell_size,
            offset: Vec2::ZERO,
            size: config.canvas_size(),
            scroll_size: config.cell_size,
            zoom: config.zoom,
            pointer: None,
            hover: None,
            pan: None,
            show_grid: true,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Visible world rectangle: offset as origin, canvas size as extent.
    pub fn position(&self) -> Rect {
        Rect::from_origin_size(self.offset.to_point(), self.size)
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.refresh_hover();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the canvas.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Current on-screen cell edge.
    pub fn scroll_size(&self) -> f64 {
        self.scroll_size
    }

    /// Nominal cell edge.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Size of the whole grid in world units at the current zoom.
    pub fn grid_extent(&self) -> Size {
        Size::new(
            f64::from(self.grid.columns()) * self.scroll_size,
            f64::from(self.grid.rows()) * self.scroll_size,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        world - self.offset
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen + self.offset
    }

    /// World geometry of a cell at the current zoom.
    pub fn cell_geometry(&self, id: CellId) -> CellGeometry {
        crate::cell::compute_geometry(id.col, id.row, self.scroll_size)
    }

    /// A cell's square in screen space.
    pub fn cell_screen_rect(&self, id: CellId) -> Rect {
        self.cell_geometry(id).bounds() - self.offset
    }

    /// A cell's center in screen space.
    pub fn cell_screen_center(&self, id: CellId) -> Point {
        self.world_to_screen(self.cell_geometry(id).center)
    }

    /// A cell's diamond collider in screen space.
    pub fn cell_screen_collider(&self, id: CellId) -> Quad {
        self.cell_geometry(id)
            .collider
            .offset_by(self.offset.x, self.offset.y)
    }

    /// Whether any part of the cell's square could overlap the canvas.
    pub fn is_cell_visible(&self, id: CellId) -> bool {
        let s = self.scroll_size;
        let x = f64::from(id.col) * s - self.offset.x;
        let y = f64::from(id.row) * s - self.offset.y;
        -s < x && x < self.size.width && -s < y && y < self.size.height
    }

    /// Index range along one axis that may hold visible cells.
    ///
    /// Widened by one on each side; callers filter with [`Self::is_cell_visible`].
    fn candidate_span(&self, offset: f64, extent: f64, count: u32) -> Range<u32> {
        let s = self.scroll_size;
        let lo = ((offset - s) / s).floor() as i64;
        let hi = ((offset + extent) / s).ceil() as i64 + 1;
        let clamp = |v: i64| v.clamp(0, i64::from(count)) as u32;
        clamp(lo)..clamp(hi)
    }

    /// Visible cells in row-major order.
    ///
    /// Cost is proportional to the number of visible cells, not the grid size.
    pub fn visible_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        let cols = self.candidate_span(self.offset.x, self.size.width, self.grid.columns());
        let rows = self.candidate_span(self.offset.y, self.size.height, self.grid.rows());
        rows.flat_map(move |row| cols.clone().map(move |col| CellId::new(col, row)))
            .filter(move |&id| self.is_cell_visible(id))
    }

    /// Resolve the cell under a screen point, or `None` outside the grid.
    pub fn resolve_cell(&self, screen: Point) -> Option<CellId> {
        let world = self.screen_to_world(screen);
        let col = (world.x / self.scroll_size).floor();
        let row = (world.y / self.scroll_size).floor();
        if !col.is_finite() || !row.is_finite() {
            return None;
        }
        self.grid.resolve(col as i64, row as i64)
    }

    /// Record a pointer sample and resolve the hovered cell.
    pub fn update_hover(&mut self, pointer: Point) -> Option<CellId> {
        self.pointer = Some(pointer);
        self.hover = self.resolve_cell(pointer);
        self.hover
    }

    /// Forget the pointer, e.g. when it leaves the canvas.
    pub fn clear_hover(&mut self) {
        self.pointer = None;
        self.hover = None;
    }

    /// Cell under the pointer.
    pub fn hover_cell(&self) -> Option<CellId> {
        self.hover
    }

    /// Raw pointer position of the last sample.
    pub fn hover_pos(&self) -> Option<Point> {
        self.pointer
    }

    fn refresh_hover(&mut self) {
        self.hover = self.pointer.and_then(|p| self.resolve_cell(p));
    }

    /// Start panning from a pointer position.
    pub fn begin_pan(&mut self, pointer: Point) {
        self.pan = Some(PanGesture {
            origin: pointer,
            start_offset: self.offset,
        });
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Move the pan gesture to a new pointer position.
    ///
    /// On each axis the offset becomes the gesture's start offset minus the
    /// pointer travel, unless that would move the viewport center past the
    /// grid's edge; then the axis keeps its current offset until the pointer
    /// comes back into range. Returns whether the offset changed.
    pub fn pan_to(&mut self, pointer: Point) -> bool {
        let Some(pan) = self.pan else {
            return false;
        };
        let extent = self.grid_extent();
        let candidate = pan.start_offset - (pointer - pan.origin);

        let accept = |value: f64, half_view: f64, limit: f64| {
            let center = value + half_view;
            (0.0..=limit).contains(&center)
        };

        let mut offset = self.offset;
        if accept(candidate.x, self.size.width / 2.0, extent.width) {
            offset.x = candidate.x;
        }
        if accept(candidate.y, self.size.height / 2.0, extent.height) {
            offset.y = candidate.y;
        }

        let changed = offset != self.offset;
        self.offset = offset;
        if changed {
            self.refresh_hover();
        }
        changed
    }

    /// Finish the pan gesture.
    pub fn end_pan(&mut self) {
        self.pan = None;
    }

    /// Step the zoom by one pitch, anchored on the hovered cell.
    ///
    /// Requests that would leave `[min, max]` are ignored. Returns whether the
    /// zoom changed.
    pub fn zoom(&mut self, direction: ZoomDirection) -> bool {
        let pitch = match direction {
            ZoomDirection::In => self.zoom.pitch,
            ZoomDirection::Out => -self.zoom.pitch,
        };
        let next = self.scroll_size + pitch;
        if next < self.zoom.min || next > self.zoom.max {
            return false;
        }
        self.scroll_size = next;

        // Keep the hovered cell under the cursor.
        if let Some(hover) = self.hover {
            self.offset.x += pitch * (f64::from(hover.col) + 0.5);
            self.offset.y += pitch * (f64::from(hover.row) + 0.5);
        }

        if let (Some(pan), Some(pointer)) = (self.pan.as_mut(), self.pointer) {
            pan.origin = pointer;
            pan.start_offset = self.offset;
        }
        self.refresh_hover();
        log::debug!("Zoom {:?}: cell size {}", direction, self.scroll_size);
        true
    }

    /// Place the grid's center at the canvas center.
    pub fn center_grid(&mut self) {
        let extent = self.grid_extent();
        self.offset = Vec2::new(
            (extent.width - self.size.width) / 2.0,
            (extent.height - self.size.height) / 2.0,
        );
        self.refresh_hover();
    }

    /// Reset zoom to the nominal cell size and center the grid.
    pub fn reset_zoom(&mut self) {
        self.scroll_size = self.cell_size;
        self.center_grid();
    }
}
