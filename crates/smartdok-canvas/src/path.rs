//! Path geometry owned by commands.
//!
//! A [`Path`] is a plain value. Bounded shapes build a fresh one from their
//! anchor and the current pointer on every draw; freehand strokes append to
//! theirs. Moving a command replaces its path with a translated copy.

use kurbo::{Affine, BezPath, PathEl, Shape};

use crate::coords::{Point, Rect};

/// Curve flattening tolerance in pixels.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Ordered sequence of move/line/curve/close elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    bez: BezPath,
}

/// One flattened subpath.
#[derive(Debug)]
struct Polyline {
    points: Vec<kurbo::Point>,
    closed: bool,
}

/// Path flattened to polylines, reused across many point queries.
#[derive(Debug)]
pub(crate) struct FlatPath {
    lines: Vec<Polyline>,
}

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path holding a single move-to; the start of a freehand stroke.
    pub fn starting_at(p: Point) -> Self {
        let mut path = Self::new();
        path.move_to(p);
        path
    }

    /// Closed polygon through `points`. Empty input yields an empty path.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::new();
        let Some((first, rest)) = points.split_first() else {
            return path;
        };
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close();
        path
    }

    /// Closed axis-aligned rectangle, wound from its origin corner.
    pub fn rect(rect: Rect) -> Self {
        Self::polygon(&[
            Point::new(rect.x, rect.y),
            Point::new(rect.x + rect.width, rect.y),
            Point::new(rect.x + rect.width, rect.y + rect.height),
            Point::new(rect.x, rect.y + rect.height),
        ])
    }

    /// Full, closed ellipse around `center`.
    pub fn ellipse(center: Point, radius_x: f32, radius_y: f32) -> Self {
        let ellipse = kurbo::Ellipse::new(
            center.to_kurbo(),
            (radius_x.abs() as f64, radius_y.abs() as f64),
            0.0,
        );
        Self { bez: ellipse.to_path(FLATTEN_TOLERANCE) }
    }

    #[inline]
    pub fn move_to(&mut self, p: Point) {
        self.bez.move_to(p.to_kurbo());
    }

    #[inline]
    pub fn line_to(&mut self, p: Point) {
        self.bez.line_to(p.to_kurbo());
    }

    #[inline]
    pub fn close(&mut self) {
        self.bez.close_path();
    }

    /// Rigidly translated copy.
    pub fn translated(&self, dx: f32, dy: f32) -> Path {
        self.transformed(Affine::translate((dx as f64, dy as f64)))
    }

    /// Copy mapped through `affine`.
    pub fn transformed(&self, affine: Affine) -> Path {
        let mut bez = self.bez.clone();
        bez.apply_affine(affine);
        Self { bez }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bez.elements().is_empty()
    }

    /// Number of drawn elements (everything except move-to).
    pub fn segment_count(&self) -> usize {
        self.bez
            .elements()
            .iter()
            .filter(|el| !matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        self.bez.elements()
    }

    /// First point of the path, if any.
    pub fn start(&self) -> Option<Point> {
        self.bez.elements().iter().find_map(|el| match el {
            PathEl::MoveTo(p) => Some(Point::from_kurbo(*p)),
            _ => None,
        })
    }

    /// Bounding box of the flattened geometry.
    pub fn bounds(&self) -> Option<Rect> {
        self.flatten().bounds()
    }

    /// Fill containment with the nonzero rule.
    ///
    /// Open subpaths are implicitly closed, matching canvas `isPointInPath`.
    pub fn contains(&self, p: Point) -> bool {
        self.flatten().contains(p)
    }

    /// Stroke containment: `p` lies within half of `line_width` of a drawn segment.
    ///
    /// Open subpaths are not closed; a lone move-to has no stroke.
    pub fn stroke_contains(&self, p: Point, line_width: f32) -> bool {
        self.flatten().stroke_contains(p, line_width)
    }

    pub(crate) fn flatten(&self) -> FlatPath {
        let mut out: Vec<Polyline> = Vec::new();
        self.bez.flatten(FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => out.push(Polyline { points: vec![p], closed: false }),
            PathEl::LineTo(p) => {
                // A line after close-path continues from the closed subpath's start.
                let reopen = match out.last() {
                    None => Some(p),
                    Some(line) if line.closed => line.points.first().copied(),
                    Some(_) => None,
                };
                if let Some(start) = reopen {
                    out.push(Polyline { points: vec![start, p], closed: false });
                } else if let Some(line) = out.last_mut() {
                    line.points.push(p);
                }
            }
            PathEl::ClosePath => {
                if let Some(line) = out.last_mut() {
                    line.closed = true;
                }
            }
            // flatten only emits move/line/close
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        FlatPath { lines: out }
    }
}

impl FlatPath {
    pub(crate) fn bounds(&self) -> Option<Rect> {
        let mut points = self.lines.iter().flat_map(|l| l.points.iter());
        let first = points.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Rect::from_edges(x0 as f32, y0 as f32, x1 as f32, y1 as f32))
    }

    pub(crate) fn contains(&self, p: Point) -> bool {
        let p = p.to_kurbo();
        let winding: i32 = self.lines.iter().map(|l| winding(&l.points, p)).sum();
        winding != 0
    }

    pub(crate) fn stroke_contains(&self, p: Point, line_width: f32) -> bool {
        if !(line_width > 0.0) {
            return false;
        }
        let p = p.to_kurbo();
        let half = line_width as f64 / 2.0;
        let limit = half * half;

        self.lines.iter().any(|line| {
            let pts = &line.points;
            let open_hit = pts.windows(2).any(|w| distance_sq(w[0], w[1], p) <= limit);
            let close_hit = line.closed
                && pts.len() > 1
                && distance_sq(pts[pts.len() - 1], pts[0], p) <= limit;
            open_hit || close_hit
        })
    }
}

/// Nonzero winding number of `p` against the closed polygon `pts`.
fn winding(pts: &[kurbo::Point], p: kurbo::Point) -> i32 {
    let n = pts.len();
    if n < 3 {
        return 0;
    }
    let mut w = 0;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                w += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            w -= 1;
        }
    }
    w
}

/// Squared distance from `p` to the segment `a`–`b`.
fn distance_sq(a: kurbo::Point, b: kurbo::Point, p: kurbo::Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    let t = if len_sq <= f64::EPSILON {
        0.0
    } else {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    };
    let nearest = a + ab * t;
    (p - nearest).hypot2()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Path {
        Path::rect(Rect::new(10.0, 10.0, 20.0, 20.0))
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn polygon_is_closed() {
        let path = square();
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
        // 3 line-to + close
        assert_eq!(path.segment_count(), 4);
    }

    #[test]
    fn empty_polygon_is_empty_path() {
        assert!(Path::polygon(&[]).is_empty());
    }

    #[test]
    fn freehand_segments_accumulate() {
        let mut path = Path::starting_at(Point::new(0.0, 0.0));
        assert_eq!(path.segment_count(), 0);
        path.line_to(Point::new(5.0, 5.0));
        path.line_to(Point::new(10.0, 5.0));
        assert_eq!(path.segment_count(), 2);
        assert_eq!(path.start(), Some(Point::new(0.0, 0.0)));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_not_exterior() {
        let path = square();
        assert!(path.contains(Point::new(20.0, 20.0)));
        assert!(!path.contains(Point::new(5.0, 20.0)));
        assert!(!path.contains(Point::new(20.0, 31.0)));
    }

    #[test]
    fn open_subpath_is_implicitly_closed_for_fill() {
        let mut path = Path::starting_at(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(10.0, 10.0));
        path.line_to(Point::new(0.0, 10.0));
        assert!(path.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn ellipse_contains_center() {
        let path = Path::ellipse(Point::new(30.0, 10.0), 20.0, 20.0);
        assert!(path.contains(Point::new(30.0, 10.0)));
        assert!(path.contains(Point::new(45.0, 10.0)));
        assert!(!path.contains(Point::new(51.0, 10.0)));
    }

    // ── stroke_contains ───────────────────────────────────────────────────

    #[test]
    fn stroke_hits_edges_only() {
        let path = square();
        assert!(path.stroke_contains(Point::new(10.0, 20.0), 2.0));
        assert!(path.stroke_contains(Point::new(20.0, 30.5), 2.0));
        assert!(!path.stroke_contains(Point::new(20.0, 20.0), 2.0));
    }

    #[test]
    fn closing_edge_counts_for_stroke_only_when_closed() {
        let mut open = Path::starting_at(Point::new(0.0, 0.0));
        open.line_to(Point::new(10.0, 0.0));
        open.line_to(Point::new(10.0, 10.0));
        // (5, 5) lies on the implicit closing diagonal
        assert!(!open.stroke_contains(Point::new(5.0, 5.0), 1.0));

        let mut closed = open.clone();
        closed.close();
        assert!(closed.stroke_contains(Point::new(5.0, 5.0), 1.0));
    }

    #[test]
    fn zero_width_or_lone_point_never_hits() {
        assert!(!square().stroke_contains(Point::new(10.0, 20.0), 0.0));
        let dot = Path::starting_at(Point::new(3.0, 3.0));
        assert!(!dot.stroke_contains(Point::new(3.0, 3.0), 4.0));
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn translated_moves_every_point() {
        let moved = square().translated(5.0, -3.0);
        assert_eq!(moved.bounds(), Some(Rect::new(15.0, 7.0, 20.0, 20.0)));
        assert_eq!(square().bounds(), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn scaled_path_queries_in_device_space() {
        let device = square().transformed(Affine::scale(2.0));
        assert!(device.contains(Point::new(40.0, 40.0)));
        assert!(!device.contains(Point::new(15.0, 15.0)));
    }
}
