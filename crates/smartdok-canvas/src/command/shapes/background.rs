use crate::command::{Command, CommandArgs, CommandCore, RenderOptions, ShapeKind};
use crate::coords::{Point, Rect};
use crate::error::CommandError;
use crate::surface::RenderSurface;

/// Fill covering the drawing from the origin to an extent.
///
/// Never selectable and never movable. Its redraw tells the host to repaint
/// only the foreground, which sits on top of it.
pub struct Background {
    core: CommandCore,
    to: Point,
}

impl Background {
    /// The anchor point in `args` is ignored; the extent starts empty.
    pub fn new(args: &CommandArgs) -> Self {
        log::debug!("background created");
        Self { core: CommandCore::new(args), to: Point::zero() }
    }

    /// Bottom-right corner of the filled area.
    #[inline]
    pub fn extent(&self) -> Point {
        self.to
    }

    fn area(&self) -> Rect {
        Rect::from_points(Point::zero(), self.to)
    }
}

impl Command for Background {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Background
    }

    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    fn draw(&mut self, point: Point) {
        self.to = point;
        self.redraw();
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        if self.core.erased {
            return;
        }
        let area = self.area();
        surface.clear_rect(area);
        surface.fill_rect(area);
    }

    /// Repaints the fill, then asks the host to repaint the foreground on top.
    fn redraw(&mut self) {
        self.core.erased = false;
        self.paint();
        self.core.request_render(RenderOptions::FOREGROUND_ONLY);
    }

    fn drag(&mut self, _point: Point) -> Result<(), CommandError> {
        Err(CommandError::NotSupported { operation: "drag", kind: ShapeKind::Background })
    }

    /// Repaints at a new extent without the redraw path: no host repaint
    /// and the erased flag is left alone.
    fn scale(&mut self, point: Point) -> Result<(), CommandError> {
        self.to = point;
        self.paint();
        Ok(())
    }

    fn is_target(&self, _point: Point) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::shapes::testing::Harness;
    use crate::surface::SurfaceOp;

    fn background(h: &Harness) -> Background {
        Background::new(&h.args(Point::new(7.0, 7.0)))
    }

    #[test]
    fn extent_starts_at_origin() {
        let h = Harness::new();
        assert_eq!(background(&h).extent(), Point::zero());
    }

    #[test]
    fn draw_clears_then_fills_to_extent() {
        let h = Harness::new();
        let mut bg = background(&h);
        bg.draw(Point::new(300.0, 150.0));

        let area = Rect::new(0.0, 0.0, 300.0, 150.0);
        let surface = h.surface.borrow();
        let rects: Vec<_> = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, SurfaceOp::ClearRect(_) | SurfaceOp::FillRect { .. }))
            .collect();
        assert!(matches!(rects.as_slice(), [SurfaceOp::ClearRect(r), SurfaceOp::FillRect { rect, .. }] if *r == area && *rect == area));
    }

    #[test]
    fn redraw_always_requests_foreground_only() {
        let h = Harness::new();
        let mut bg = background(&h);
        bg.draw(Point::new(10.0, 10.0));
        bg.erase(true);
        bg.redraw();
        assert_eq!(
            h.requests.borrow().as_slice(),
            &[RenderOptions::FOREGROUND_ONLY, RenderOptions::FOREGROUND_ONLY]
        );
    }

    #[test]
    fn drag_is_not_supported() {
        let h = Harness::new();
        let mut bg = background(&h);
        for p in [Point::new(1.0, 1.0), Point::new(2.0, 2.0)] {
            assert_eq!(
                bg.drag(p),
                Err(CommandError::NotSupported { operation: "drag", kind: ShapeKind::Background })
            );
        }
    }

    #[test]
    fn never_a_target() {
        let h = Harness::new();
        let mut bg = background(&h);
        bg.draw(Point::new(100.0, 100.0));
        assert!(!bg.is_target(Point::new(50.0, 50.0)));
        bg.erase(false);
        assert!(!bg.is_target(Point::new(50.0, 50.0)));
    }

    #[test]
    fn erased_background_renders_nothing() {
        let h = Harness::new();
        let mut bg = background(&h);
        bg.draw(Point::new(10.0, 10.0));
        bg.erase(false);
        h.surface.borrow_mut().clear_ops();

        bg.scale(Point::new(20.0, 20.0)).unwrap();
        assert!(bg.is_erased());
        assert_eq!(h.paint_count(), 0);
    }

    #[test]
    fn scale_repaints_without_callback() {
        let h = Harness::new();
        let mut bg = background(&h);
        bg.draw(Point::new(10.0, 10.0));
        let requests = h.render_count();
        h.surface.borrow_mut().clear_ops();

        bg.scale(Point::new(40.0, 30.0)).unwrap();
        assert_eq!(bg.extent(), Point::new(40.0, 30.0));
        assert_eq!(h.render_count(), requests);
        assert_eq!(h.paint_count(), 1);
    }
}
