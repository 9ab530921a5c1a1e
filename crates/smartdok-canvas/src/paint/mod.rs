//! Paint model used by style snapshots and surfaces.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - paint sources (solid, gradients)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, LinearGradient, SpreadMode};

use crate::coords::Point;

/// Error produced while parsing paint input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaintError {
    #[error("invalid css color: {0:?}")]
    InvalidColor(String),
}

/// Paint source for stroking or filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Parses a CSS color into a solid paint.
    pub fn css(s: &str) -> Result<Self, PaintError> {
        Color::from_css(s).map(Paint::Solid)
    }

    /// True for the fully transparent solid fill (`rgba(0, 0, 0, 0)`).
    ///
    /// Shapes filled with it behave as outlines when hit testing.
    #[inline]
    pub fn is_transparent_sentinel(&self) -> bool {
        matches!(self, Paint::Solid(c) if *c == Color::transparent())
    }

    /// Color this paint produces at `p`.
    #[inline]
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::LinearGradient(g) => g.sample(p),
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Color::black())
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_solid_transparent_is_the_sentinel() {
        assert!(Paint::css("rgba(0, 0, 0, 0)").unwrap().is_transparent_sentinel());
        assert!(!Paint::css("rgba(0, 0, 0, 0.5)").unwrap().is_transparent_sentinel());
        assert!(!Paint::default().is_transparent_sentinel());

        let g = LinearGradient::new(
            Point::zero(),
            Point::new(1.0, 0.0),
            vec![
                ColorStop::new(0.0, Color::transparent()),
                ColorStop::new(1.0, Color::transparent()),
            ],
            SpreadMode::Pad,
        );
        assert!(!Paint::LinearGradient(g).is_transparent_sentinel());
    }
}
