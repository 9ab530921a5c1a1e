use crate::command::{Command, CommandArgs, CommandCore, ShapeKind};
use crate::coords::Point;
use crate::path::Path;

/// Freehand stroke. Its path only ever grows.
pub struct Pencil {
    core: CommandCore,
}

impl Pencil {
    pub fn new(args: &CommandArgs) -> Self {
        let mut core = CommandCore::new(args);
        core.path = Path::starting_at(args.point);
        log::debug!("pencil started at ({}, {})", args.point.x, args.point.y);
        Self { core }
    }

    /// Line segments drawn so far.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.core.path.segment_count()
    }
}

impl Command for Pencil {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Pencil
    }

    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    /// Appends a segment and paints the stroke so far; no full repaint.
    fn draw(&mut self, point: Point) {
        log::trace!("pencil to ({}, {})", point.x, point.y);
        self.core.path.line_to(point);
        self.paint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::shapes::testing::Harness;
    use crate::command::RenderOptions;
    use crate::coords::Rect;

    fn pencil(h: &Harness) -> Pencil {
        Pencil::new(&h.args(Point::new(0.0, 0.0)))
    }

    #[test]
    fn segments_strictly_increase() {
        let h = Harness::new();
        let mut p = pencil(&h);
        let mut last = p.segment_count();
        for i in 1..=5 {
            p.draw(Point::new(i as f32 * 3.0, i as f32));
            assert!(p.segment_count() > last);
            last = p.segment_count();
        }
        assert_eq!(last, 5);
        assert_eq!(p.path().start(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn draw_paints_without_full_repaint() {
        let h = Harness::new();
        let mut p = pencil(&h);
        p.draw(Point::new(10.0, 0.0));
        assert_eq!(h.paint_count(), 1);
        assert_eq!(h.render_count(), 0);
    }

    #[test]
    fn hit_test_uses_stroke() {
        let h = Harness::new();
        let mut p = pencil(&h);
        p.draw(Point::new(10.0, 0.0));
        p.draw(Point::new(10.0, 10.0));
        assert!(p.is_target(Point::new(5.0, 0.0)));
        // inside the implicit closure, but a pencil has no fill
        assert!(!p.is_target(Point::new(8.0, 3.0)));
    }

    #[test]
    fn erase_then_redraw_restores_visibility() {
        let h = Harness::new();
        let mut p = pencil(&h);
        p.draw(Point::new(10.0, 0.0));
        p.erase(false);
        assert!(p.is_erased());
        assert!(!p.is_target(Point::new(5.0, 0.0)));
        assert_eq!(h.requests.borrow().as_slice(), &[RenderOptions::FULL]);

        p.redraw();
        assert!(!p.is_erased());
        assert!(p.is_target(Point::new(5.0, 0.0)));
    }

    #[test]
    fn erase_can_skip_render() {
        let h = Harness::new();
        let mut p = pencil(&h);
        p.erase(true);
        assert!(p.is_erased());
        assert_eq!(h.render_count(), 0);
    }

    #[test]
    fn drag_arms_then_translates() {
        let h = Harness::new();
        let mut p = pencil(&h);
        p.draw(Point::new(10.0, 10.0));
        let before = p.path().bounds();

        p.drag(Point::new(100.0, 100.0)).unwrap();
        assert_eq!(p.path().bounds(), before);
        assert_eq!(h.render_count(), 0);

        p.drag(Point::new(103.0, 98.0)).unwrap();
        assert_eq!(p.path().bounds(), Some(Rect::from_edges(3.0, -2.0, 13.0, 8.0)));
        assert_eq!(h.render_count(), 1);

        // a fresh gesture arms again with zero delta
        p.on_mouse_up(Point::new(103.0, 98.0));
        p.drag(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(p.path().bounds(), Some(Rect::from_edges(3.0, -2.0, 13.0, 8.0)));
        assert_eq!(h.render_count(), 1);
    }

    #[test]
    fn scale_is_not_implemented() {
        let h = Harness::new();
        let mut p = pencil(&h);
        let err = p.scale(Point::new(1.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            crate::error::CommandError::NotImplemented { operation: "scale", kind: ShapeKind::Pencil }
        );
    }
}
