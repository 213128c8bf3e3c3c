//! Tool shapes and the cells they affect.

use super::ToolKind;
use crate::cell::CellId;
use crate::collision::{Quad, quad_inside_rect, segment_intersects_quad};
use crate::viewport::Viewport;
use kurbo::{Line, Point};
use std::collections::BTreeSet;

/// Screen-space shape of an active selection gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolShape {
    /// Raycast from the anchor-cell center to the current-cell center.
    Line(Line),
    /// Rectangle outline spanned by the two centers.
    OutArea(Quad),
    /// Filled rectangle spanned by the two centers.
    FillArea(Quad),
    /// Disc around the anchor-cell center reaching the current-cell center.
    Circle { center: Point, radius: f64 },
}

impl ToolShape {
    /// Build the shape of `kind` between two screen-space cell centers.
    pub fn new(kind: ToolKind, anchor: Point, current: Point) -> Self {
        match kind {
            ToolKind::Line => ToolShape::Line(Line::new(anchor, current)),
            ToolKind::OutArea => ToolShape::OutArea(Quad::from_corners(anchor, current)),
            ToolKind::FillArea => ToolShape::FillArea(Quad::from_corners(anchor, current)),
            ToolKind::Circle => ToolShape::Circle {
                center: anchor,
                radius: anchor.distance(current),
            },
        }
    }

    /// Whether a cell with the given screen-space collider and center is hit.
    pub fn hits(&self, collider: &Quad, center: Point) -> bool {
        match self {
            ToolShape::Line(raycast) => segment_intersects_quad(*raycast, collider),
            ToolShape::OutArea(rect) | ToolShape::FillArea(rect) => {
                rect.edges()
                    .into_iter()
                    .any(|edge| segment_intersects_quad(edge, collider))
                    || quad_inside_rect(collider, rect.bounding_box())
            }
            ToolShape::Circle { center: c, radius } => {
                let inside = |p: Point| p.distance(*c) <= *radius;
                inside(center) || collider.points().into_iter().any(inside)
            }
        }
    }
}

/// Every visible cell hit by `shape`, in row-major order.
pub fn compute_affected_cells(shape: &ToolShape, viewport: &Viewport) -> BTreeSet<CellId> {
    viewport
        .visible_cells()
        .filter(|&id| {
            let collider = viewport.cell_screen_collider(id);
            let center = viewport.cell_screen_center(id);
            shape.hits(&collider, center)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use kurbo::Vec2;

    fn viewport(columns: u32, rows: u32, width: f64, height: f64) -> Viewport {
        Viewport::new(&EditorConfig {
            cell_size: 100.0,
            columns,
            rows,
            canvas_width: width,
            canvas_height: height,
            ..EditorConfig::default()
        })
    }

    fn affected(vp: &Viewport, kind: ToolKind, anchor: CellId, current: CellId) -> Vec<CellId> {
        let shape = ToolShape::new(
            kind,
            vp.cell_screen_center(anchor),
            vp.cell_screen_center(current),
        );
        compute_affected_cells(&shape, vp).into_iter().collect()
    }

    fn ids(pairs: &[(u32, u32)]) -> Vec<CellId> {
        pairs.iter().map(|&(c, r)| CellId::new(c, r)).collect()
    }

    #[test]
    fn test_raycast_across_row() {
        let vp = viewport(4, 3, 800.0, 600.0);
        let cells = affected(&vp, ToolKind::Line, CellId::new(0, 0), CellId::new(3, 0));
        assert_eq!(cells, ids(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
    }

    #[test]
    fn test_raycast_is_direction_independent() {
        let vp = viewport(4, 3, 800.0, 600.0);
        let forward = affected(&vp, ToolKind::Line, CellId::new(0, 0), CellId::new(3, 2));
        let backward = affected(&vp, ToolKind::Line, CellId::new(3, 2), CellId::new(0, 0));
        assert_eq!(forward, backward);
        assert!(forward.contains(&CellId::new(0, 0)));
        assert!(forward.contains(&CellId::new(3, 2)));
    }

    #[test]
    fn test_zero_length_raycast_hits_nothing() {
        let vp = viewport(4, 3, 800.0, 600.0);
        assert!(affected(&vp, ToolKind::Line, CellId::new(1, 1), CellId::new(1, 1)).is_empty());
    }

    #[test]
    fn test_area_two_by_two() {
        let vp = viewport(4, 3, 800.0, 600.0);
        let cells = affected(&vp, ToolKind::OutArea, CellId::new(0, 0), CellId::new(1, 1));
        assert_eq!(cells, ids(&[(0, 0), (1, 0), (0, 1), (1, 1)]));
    }

    #[test]
    fn test_area_includes_enclosed_cells() {
        let vp = viewport(4, 3, 800.0, 600.0);
        let cells = affected(&vp, ToolKind::OutArea, CellId::new(0, 0), CellId::new(2, 2));
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&CellId::new(1, 1)));
        assert!(!cells.iter().any(|id| id.col == 3));
    }

    #[test]
    fn test_area_from_any_corner() {
        let vp = viewport(4, 3, 800.0, 600.0);
        let a = affected(&vp, ToolKind::OutArea, CellId::new(1, 1), CellId::new(0, 0));
        let b = affected(&vp, ToolKind::OutArea, CellId::new(0, 1), CellId::new(1, 0));
        assert_eq!(a, ids(&[(0, 0), (1, 0), (0, 1), (1, 1)]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_area_matches_area() {
        let vp = viewport(6, 4, 800.0, 600.0);
        let out = affected(&vp, ToolKind::OutArea, CellId::new(1, 0), CellId::new(4, 3));
        let fill = affected(&vp, ToolKind::FillArea, CellId::new(1, 0), CellId::new(4, 3));
        assert_eq!(out, fill);
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn test_circle() {
        let vp = viewport(4, 3, 800.0, 600.0);
        let cells = affected(&vp, ToolKind::Circle, CellId::new(1, 1), CellId::new(2, 1));
        assert_eq!(cells, ids(&[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]));
    }

    #[test]
    fn test_results_survive_panning() {
        let mut vp = viewport(4, 3, 800.0, 600.0);
        vp.set_offset(Vec2::new(30.0, -20.0));
        let line = affected(&vp, ToolKind::Line, CellId::new(0, 0), CellId::new(3, 0));
        assert_eq!(line, ids(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
        let area = affected(&vp, ToolKind::OutArea, CellId::new(0, 0), CellId::new(1, 1));
        assert_eq!(area, ids(&[(0, 0), (1, 0), (0, 1), (1, 1)]));
    }

    #[test]
    fn test_only_visible_cells_are_tested() {
        let vp = viewport(20, 1, 250.0, 100.0);
        let cells = affected(&vp, ToolKind::Line, CellId::new(0, 0), CellId::new(10, 0));
        assert_eq!(cells, ids(&[(0, 0), (1, 0), (2, 0)]));
    }
}
