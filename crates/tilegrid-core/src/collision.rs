//! Segment and quad intersection tests used by the selection tools.
//!
//! All functions are pure and work in whatever space their inputs share; the
//! tools feed them screen-space coordinates.

use kurbo::{Line, Point, Rect};

/// Scale of the truncation applied to intersection parameters.
const THOUSANDTH: f64 = 1000.0;

/// Four points joined in the order top, right, bottom, left.
///
/// Used both for a cell's diamond collider and for the corners of an
/// axis-aligned selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub top: Point,
    pub right: Point,
    pub bottom: Point,
    pub left: Point,
}

impl Quad {
    /// Quad whose corners are those of the rectangle spanned by `anchor` and
    /// `current`, taken as opposite corners.
    pub fn from_corners(anchor: Point, current: Point) -> Self {
        Self {
            top: anchor,
            right: Point::new(current.x, anchor.y),
            bottom: current,
            left: Point::new(anchor.x, current.y),
        }
    }

    pub fn points(&self) -> [Point; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// Edges in winding order: top→right, right→bottom, bottom→left, left→top.
    pub fn edges(&self) -> [Line; 4] {
        [
            Line::new(self.top, self.right),
            Line::new(self.right, self.bottom),
            Line::new(self.bottom, self.left),
            Line::new(self.left, self.top),
        ]
    }

    /// Smallest axis-aligned rectangle containing all four points.
    pub fn bounding_box(&self) -> Rect {
        let [a, b, c, d] = self.points();
        Rect::from_points(a, b).union_pt(c).union_pt(d)
    }

    /// Translate every point by `-offset`.
    pub fn offset_by(&self, dx: f64, dy: f64) -> Self {
        let shift = |p: Point| Point::new(p.x - dx, p.y - dy);
        Self {
            top: shift(self.top),
            right: shift(self.right),
            bottom: shift(self.bottom),
            left: shift(self.left),
        }
    }
}

/// Floor `value` to three decimal places.
///
/// Absorbs floating-point noise so that a segment ending exactly on another
/// still registers as touching it.
fn truncate_thousandth(value: f64) -> f64 {
    (value * THOUSANDTH).floor() / THOUSANDTH
}

/// Whether segments `a` and `b` intersect.
///
/// Parallel and collinear segments have a zero denominator and always report
/// `false`, even when they overlap.
pub fn segment_intersect(a: Line, b: Line) -> bool {
    let da = a.p1 - a.p0;
    let db = b.p1 - b.p0;
    let dc = a.p0 - b.p0;

    let denom = db.y * da.x - db.x * da.y;
    let num_a = da.x * dc.y - da.y * dc.x;
    let num_b = db.x * dc.y - db.y * dc.x;

    let t_a = truncate_thousandth(num_a / denom);
    let t_b = truncate_thousandth(num_b / denom);

    // NaN and infinities fail both range checks.
    (0.0..=1.0).contains(&t_a) && (0.0..=1.0).contains(&t_b)
}

/// Whether `segment` crosses any edge of `quad`.
pub fn segment_intersects_quad(segment: Line, quad: &Quad) -> bool {
    quad.edges()
        .into_iter()
        .any(|edge| segment_intersect(segment, edge))
}

/// Whether every point of `quad` lies inside `rect`, boundary included.
pub fn quad_inside_rect(quad: &Quad, rect: Rect) -> bool {
    let rect = rect.abs();
    quad.points()
        .iter()
        .all(|p| p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    fn diamond() -> Quad {
        Quad {
            top: Point::new(50.0, 0.0),
            right: Point::new(100.0, 50.0),
            bottom: Point::new(50.0, 100.0),
            left: Point::new(0.0, 50.0),
        }
    }

    #[test]
    fn test_crossing_segments() {
        assert!(segment_intersect(seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)));
    }

    #[test]
    fn test_disjoint_segments() {
        assert!(!segment_intersect(seg(0.0, 0.0, 10.0, 10.0), seg(20.0, 0.0, 30.0, -10.0)));
        assert!(!segment_intersect(seg(0.0, 0.0, 4.0, 4.0), seg(0.0, 10.0, 10.0, 0.0)));
    }

    #[test]
    fn test_touching_at_endpoint() {
        assert!(segment_intersect(seg(0.0, 0.0, 5.0, 5.0), seg(5.0, 5.0, 10.0, 0.0)));
        assert!(segment_intersect(seg(0.0, 5.0, 10.0, 5.0), seg(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_parallel_and_collinear_never_intersect() {
        assert!(!segment_intersect(seg(0.0, 0.0, 10.0, 0.0), seg(0.0, 1.0, 10.0, 1.0)));
        assert!(!segment_intersect(seg(0.0, 0.0, 10.0, 0.0), seg(5.0, 0.0, 15.0, 0.0)));
        assert!(!segment_intersect(seg(0.0, 0.0, 10.0, 0.0), seg(0.0, 0.0, 10.0, 0.0)));
    }

    #[test]
    fn test_zero_length_segment_never_intersects() {
        assert!(!segment_intersect(seg(5.0, 5.0, 5.0, 5.0), seg(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_symmetry() {
        let cases = [
            (seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)),
            (seg(0.0, 0.0, 5.0, 5.0), seg(5.0, 5.0, 10.0, 0.0)),
            (seg(0.0, 0.0, 4.0, 4.0), seg(0.0, 10.0, 10.0, 0.0)),
            (seg(50.0, 50.0, 350.0, 50.0), seg(50.0, 0.0, 100.0, 50.0)),
            (seg(1.3, 7.1, 9.9, -2.4), seg(0.2, 0.3, 8.8, 4.4)),
        ];
        for (a, b) in cases {
            assert_eq!(segment_intersect(a, b), segment_intersect(b, a));
        }
    }

    #[test]
    fn test_truncation_keeps_near_misses_out_and_boundaries_in() {
        assert_eq!(truncate_thousandth(1.0), 1.0);
        assert_eq!(truncate_thousandth(0.0), 0.0);
        assert_eq!(truncate_thousandth(0.99999), 0.999);
        assert_eq!(truncate_thousandth(1.0009), 1.0);
        assert_eq!(truncate_thousandth(-0.0001), -0.001);
    }

    #[test]
    fn test_segment_equal_to_quad_edge() {
        let quad = diamond();
        for edge in quad.edges() {
            assert!(segment_intersects_quad(edge, &quad));
        }
    }

    #[test]
    fn test_segment_through_quad() {
        assert!(segment_intersects_quad(seg(-10.0, 50.0, 110.0, 50.0), &diamond()));
    }

    #[test]
    fn test_segment_from_center_reaches_vertex() {
        assert!(segment_intersects_quad(seg(50.0, 50.0, 350.0, 50.0), &diamond()));
    }

    #[test]
    fn test_segment_inside_quad_misses_edges() {
        assert!(!segment_intersects_quad(seg(40.0, 50.0, 60.0, 50.0), &diamond()));
    }

    #[test]
    fn test_segment_outside_quad() {
        assert!(!segment_intersects_quad(seg(0.0, 0.0, 20.0, 0.0), &diamond()));
        assert!(!segment_intersects_quad(seg(0.0, 120.0, 100.0, 120.0), &diamond()));
    }

    #[test]
    fn test_quad_from_corners() {
        let quad = Quad::from_corners(Point::new(10.0, 20.0), Point::new(50.0, 80.0));
        assert_eq!(quad.right, Point::new(50.0, 20.0));
        assert_eq!(quad.left, Point::new(10.0, 80.0));
        assert_eq!(quad.bounding_box(), Rect::new(10.0, 20.0, 50.0, 80.0));
    }

    #[test]
    fn test_quad_inside_rect() {
        let quad = diamond();
        assert!(quad_inside_rect(&quad, Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(quad_inside_rect(&quad, Rect::new(100.0, 100.0, -10.0, -10.0)));
        assert!(!quad_inside_rect(&quad, Rect::new(0.0, 0.0, 99.0, 100.0)));
    }
}
