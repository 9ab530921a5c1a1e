//! The six command variants and the pure geometry they rebuild from.
//!
//! Bounded shapes (rectangle, triangle, circle) rebuild their whole path from
//! the anchor and the current pointer on every `draw`; only the pencil grows
//! its path in place.

mod background;
mod circle;
mod pencil;
mod rectangle;
mod text;
mod triangle;

pub use background::Background;
pub use circle::Circle;
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use text::Text;
pub use triangle::Triangle;

use crate::coords::Point;
use crate::path::Path;
use crate::surface::RenderSurface;

// ── geometry ──────────────────────────────────────────────────────────────

/// Axis-aligned box from `from` to `to`, wound anchor-first and closed.
pub fn rectangle_path(from: Point, to: Point) -> Path {
    Path::polygon(&[
        from,
        Point::new(to.x, from.y),
        to,
        Point::new(from.x, to.y),
    ])
}

/// Apex x of a triangle anchored at `from_x` with its base reaching `x`.
///
/// The apex sits half the (floored) horizontal distance from the anchor,
/// on the side of the pointer.
pub fn triangle_apex_x(from_x: f32, x: f32) -> f32 {
    let half = ((x - from_x) / 2.0).floor().abs();
    if from_x < x { from_x + half } else { from_x - half }
}

/// Triangle with its base on the anchor's row and the apex on the pointer's.
pub fn triangle_path(from: Point, to: Point) -> Path {
    Path::polygon(&[
        from,
        Point::new(to.x, from.y),
        Point::new(triangle_apex_x(from.x, to.x), to.y),
    ])
}

/// Center and radius of a circle dragged horizontally from `from` to `x`.
///
/// The radius is the horizontal distance; the center sits that far from the
/// anchor toward the pointer, on the anchor's row.
pub fn circle_geometry(from: Point, x: f32) -> (Point, f32) {
    let radius = (from.x - x).abs();
    let cx = if from.x > x { from.x - radius } else { from.x + radius };
    (Point::new(cx, from.y), radius)
}

pub fn circle_path(from: Point, x: f32) -> Path {
    let (center, radius) = circle_geometry(from, x);
    Path::ellipse(center, radius, radius)
}

/// Closed shapes paint their outline, then fill it.
fn render_closed(path: &Path, surface: &mut dyn RenderSurface) {
    surface.stroke(path);
    surface.fill(path);
}
