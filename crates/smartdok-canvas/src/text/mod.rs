//! Text measurement and glyph coverage.
//!
//! Fonts are loaded into a [`FontSystem`] (fontdue). Without a loaded font the
//! system falls back to a deterministic approximation so headless hosts and
//! tests still get stable metrics.

mod font_system;
mod metrics;

pub use font_system::{FontId, FontLoadError, FontSystem, GlyphBitmap};
pub use metrics::TextMetrics;
