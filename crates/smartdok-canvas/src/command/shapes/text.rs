use crate::command::{Command, CommandArgs, CommandCore, ShapeKind};
use crate::coords::{Point, Rect};
use crate::style::TextBaseline;
use crate::surface::RenderSurface;
use crate::text::TextMetrics;

/// A line of literal text hung from its anchor.
///
/// Metrics are measured once, at construction, with the surface's style at
/// that moment. Rendering always uses a top baseline.
pub struct Text {
    core: CommandCore,
    from: Point,
    text: String,
    metrics: TextMetrics,
}

impl Text {
    pub fn new(args: &CommandArgs) -> Self {
        let mut core = CommandCore::new(args);
        let text = args.text.clone().unwrap_or_default();
        let metrics = args.surface.borrow().measure_text(&text);
        core.style.text_baseline = TextBaseline::Top;
        log::debug!("text {:?} at ({}, {})", text, args.point.x, args.point.y);
        Self { core, from: args.point, text, metrics }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn anchor(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    /// Hit box edges as (left, top, right, bottom).
    fn edges(&self) -> (f32, f32, f32, f32) {
        let m = &self.metrics;
        (
            self.from.x - m.actual_bounding_box_left,
            self.from.y,
            self.from.x + m.actual_bounding_box_right,
            self.from.y + m.actual_bounding_box_ascent - m.actual_bounding_box_descent,
        )
    }

    /// Hit box in logical coordinates.
    pub fn bounds(&self) -> Rect {
        let (left, top, right, bottom) = self.edges();
        Rect::from_edges(left, top, right, bottom)
    }
}

impl Command for Text {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    /// Text has no incremental geometry; drawing just repaints it.
    fn draw(&mut self, _point: Point) {
        self.redraw();
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        surface.fill_text(&self.text, self.from.x, self.from.y);
    }

    /// Moves the anchor; the text has no path to translate.
    fn translate(&mut self, delta: Point) {
        self.from = self.from + delta;
    }

    /// Inclusive test against the measured box, in logical pixels.
    fn is_target(&self, point: Point) -> bool {
        if self.core.erased {
            return false;
        }
        let (left, top, right, bottom) = self.edges();
        point.x >= left && point.x <= right && point.y >= top && point.y <= bottom
    }
}
