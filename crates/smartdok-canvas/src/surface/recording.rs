use kurbo::Affine;

use crate::coords::Rect;
use crate::path::Path;
use crate::style::StyleSnapshot;
use crate::text::{FontSystem, TextMetrics};

use super::state::StateStack;
use super::RenderSurface;

/// One recorded surface call. Painting ops carry the style in effect.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Save,
    Restore,
    SetStyle(StyleSnapshot),
    SetTransform(Affine),
    Stroke { path: Path, style: StyleSnapshot },
    Fill { path: Path, style: StyleSnapshot },
    FillText { text: String, x: f32, y: f32, style: StyleSnapshot },
    ClearRect(Rect),
    FillRect { rect: Rect, style: StyleSnapshot },
}

impl SurfaceOp {
    #[inline]
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            SurfaceOp::Stroke { .. }
                | SurfaceOp::Fill { .. }
                | SurfaceOp::FillText { .. }
                | SurfaceOp::FillRect { .. }
        )
    }
}

/// Surface that records every call instead of drawing.
///
/// State and geometric queries behave like a real canvas; text is measured
/// with the placeholder face unless fixed metrics are supplied.
#[derive(Default)]
pub struct RecordingSurface {
    state: StateStack,
    ops: Vec<SurfaceOp>,
    text_metrics: Option<TextMetrics>,
    fonts: FontSystem,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `measure_text` call returns `metrics`.
    pub fn with_text_metrics(metrics: TextMetrics) -> Self {
        Self { text_metrics: Some(metrics), ..Self::default() }
    }

    #[inline]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drains the recorded ops.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Recorded painting ops only (stroke, fill, text, rect fill).
    pub fn paint_ops(&self) -> impl Iterator<Item = &SurfaceOp> {
        self.ops.iter().filter(|op| op.is_paint())
    }

    fn painted_style(&self) -> StyleSnapshot {
        self.state.current.style.clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn style(&self) -> StyleSnapshot {
        self.state.current.style.clone()
    }

    fn set_style(&mut self, style: &StyleSnapshot) {
        self.state.current.style = style.clone();
        self.ops.push(SurfaceOp::SetStyle(style.clone()));
    }

    fn save(&mut self) {
        self.state.save();
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        self.state.restore();
        self.ops.push(SurfaceOp::Restore);
    }

    fn transform(&self) -> Affine {
        self.state.current.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.current.transform = transform;
        self.ops.push(SurfaceOp::SetTransform(transform));
    }

    fn stroke(&mut self, path: &Path) {
        let style = self.painted_style();
        self.ops.push(SurfaceOp::Stroke { path: path.clone(), style });
    }

    fn fill(&mut self, path: &Path) {
        let style = self.painted_style();
        self.ops.push(SurfaceOp::Fill { path: path.clone(), style });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let style = self.painted_style();
        self.ops.push(SurfaceOp::FillText { text: text.to_string(), x, y, style });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        let style = self.painted_style();
        self.ops.push(SurfaceOp::FillRect { rect, style });
    }

    fn is_point_in_stroke(&self, path: &Path, x: f32, y: f32) -> bool {
        self.state.current.hits_stroke(path, x, y)
    }

    fn is_point_in_path(&self, path: &Path, x: f32, y: f32) -> bool {
        self.state.current.hits_fill(path, x, y)
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        if let Some(metrics) = self.text_metrics {
            return metrics;
        }
        let style = &self.state.current.style;
        self.fonts.measure(text, style.font_size(), style.text_baseline)
    }
}
