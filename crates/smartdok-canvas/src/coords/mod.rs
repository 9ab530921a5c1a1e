//! Coordinate and geometry types shared by commands and surfaces.
//!
//! Canonical space:
//! - Logical canvas pixels (before device-pixel-ratio scaling)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Surfaces map logical coordinates to raw pixels through their transform.

mod dimension;
mod point;
mod rect;

pub use dimension::Dimension;
pub use point::Point;
pub use rect::Rect;
