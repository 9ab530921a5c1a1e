use super::Point;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// Width and height may be negative while a shape is being dragged out;
/// call [`normalized`](Self::normalized) before comparing extents.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning from `from` to `to` (either corner order).
    #[inline]
    pub fn from_points(from: Point, to: Point) -> Self {
        Self::new(from.x, from.y, to.x - from.x, to.y - from.y)
    }

    /// Rectangle from explicit edges.
    #[inline]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.normalized().x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.normalized().y
    }

    #[inline]
    pub fn right(self) -> f32 {
        let r = self.normalized();
        r.x + r.width
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        let r = self.normalized();
        r.y + r.height
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.x;
        let mut y = self.y;
        let mut w = self.width;
        let mut h = self.height;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max). Used for pixel coverage.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        let r = self.normalized();
        p.x >= r.x && p.y >= r.y && p.x < (r.x + r.width) && p.y < (r.y + r.height)
    }

    /// Closed containment: [min, max]. Used for hit boxes.
    #[inline]
    pub fn contains_inclusive(self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    #[inline]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_dragged_up_and_left() {
        let rect = Rect::from_points(Point::new(10.0, 10.0), Point::new(4.0, 7.0));
        assert_eq!(rect.normalized(), r(4.0, 7.0, 6.0, 3.0));
    }

    // ── edges ─────────────────────────────────────────────────────────────

    #[test]
    fn edges_follow_normalized_rect() {
        let rect = r(10.0, 10.0, -4.0, 5.0);
        assert_eq!(rect.left(), 6.0);
        assert_eq!(rect.right(), 10.0);
        assert_eq!(rect.top(), 10.0);
        assert_eq!(rect.bottom(), 15.0);
    }

    #[test]
    fn from_edges_round_trips() {
        let rect = Rect::from_edges(45.0, 50.0, 60.0, 65.0);
        assert_eq!(rect, r(45.0, 50.0, 15.0, 15.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Point::new(0.0, 0.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Point::new(10.0, 10.0)));
    }

    #[test]
    fn contains_inclusive_accepts_edges() {
        let rect = Rect::from_edges(45.0, 50.0, 60.0, 65.0);
        assert!(rect.contains_inclusive(Point::new(45.0, 50.0)));
        assert!(rect.contains_inclusive(Point::new(60.0, 65.0)));
        assert!(!rect.contains_inclusive(Point::new(44.0, 60.0)));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, -1.0, 1.0).is_empty());
    }
}
