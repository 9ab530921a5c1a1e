//! The 2D rendering surface commands draw onto.
//!
//! [`RenderSurface`] is the capability a host provides (a browser canvas
//! context, a software raster, a recorder). Geometric queries follow canvas
//! semantics: the path is mapped through the current transform, the query
//! point is taken in raw device pixels.
//!
//! Implementations:
//! - [`Canvas`] rasterizes into a premultiplied pixel buffer
//! - [`RecordingSurface`] records calls for inspection

mod canvas;
mod recording;
mod state;

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Affine;

use crate::coords::Rect;
use crate::paint::Paint;
use crate::path::Path;
use crate::style::{StyleSnapshot, TextBaseline};
use crate::text::TextMetrics;

pub use canvas::{Canvas, CanvasConfig};
pub use recording::{RecordingSurface, SurfaceOp};
pub use state::DrawState;

/// Shared handle to the surface all commands of a drawing render onto.
///
/// Commands run on the UI thread only; each borrow lasts a single paint or query.
pub type SurfaceHandle = Rc<RefCell<dyn RenderSurface>>;

/// Immediate-mode 2D drawing capability.
pub trait RenderSurface {
    // ── style state ───────────────────────────────────────────────────────

    /// Current ambient style.
    fn style(&self) -> StyleSnapshot;

    /// Replaces the ambient style wholesale.
    fn set_style(&mut self, style: &StyleSnapshot);

    /// Pushes style and transform onto the state stack.
    fn save(&mut self);

    /// Pops the most recently saved state. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn transform(&self) -> Affine;

    fn set_transform(&mut self, transform: Affine);

    fn set_stroke_style(&mut self, paint: Paint) {
        let mut style = self.style();
        style.stroke = paint;
        self.set_style(&style);
    }

    fn set_fill_style(&mut self, paint: Paint) {
        let mut style = self.style();
        style.fill = paint;
        self.set_style(&style);
    }

    fn set_line_width(&mut self, width: f32) {
        // canvas ignores non-positive and non-finite widths
        if width > 0.0 && width.is_finite() {
            let mut style = self.style();
            style.line_width = width;
            self.set_style(&style);
        }
    }

    fn set_font(&mut self, font: &str) {
        let mut style = self.style();
        style.font = font.to_string();
        self.set_style(&style);
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        let mut style = self.style();
        style.text_baseline = baseline;
        self.set_style(&style);
    }

    /// Post-multiplies the transform by a scale.
    fn scale(&mut self, sx: f32, sy: f32) {
        let t = self.transform() * Affine::scale_non_uniform(sx as f64, sy as f64);
        self.set_transform(t);
    }

    // ── painting ──────────────────────────────────────────────────────────

    fn stroke(&mut self, path: &Path);

    fn fill(&mut self, path: &Path);

    /// Fills `text` with its current baseline anchored at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    /// Resets every pixel inside `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect);

    // ── queries ───────────────────────────────────────────────────────────

    /// True when (`x`, `y`) in device pixels lies on the stroke of `path`.
    fn is_point_in_stroke(&self, path: &Path, x: f32, y: f32) -> bool;

    /// True when (`x`, `y`) in device pixels lies inside `path` (nonzero rule).
    fn is_point_in_path(&self, path: &Path, x: f32, y: f32) -> bool;

    /// Measures `text` with the current font and baseline.
    fn measure_text(&self, text: &str) -> TextMetrics;
}
