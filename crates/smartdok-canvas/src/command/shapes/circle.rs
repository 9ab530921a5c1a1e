use crate::command::{Command, CommandArgs, CommandCore, RenderOptions, ShapeKind};
use crate::coords::Point;
use crate::surface::RenderSurface;

use super::{circle_path, render_closed};

/// Circle sized by the horizontal distance from the anchor to the pointer.
pub struct Circle {
    core: CommandCore,
    from: Point,
}

impl Circle {
    pub fn new(args: &CommandArgs) -> Self {
        log::debug!("circle anchored at ({}, {})", args.point.x, args.point.y);
        Self { core: CommandCore::new(args), from: args.point }
    }
}

impl Command for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    /// Only the pointer's x matters; the circle stays on the anchor's row.
    fn draw(&mut self, point: Point) {
        self.core.path = circle_path(self.from, point.x);
        self.core.request_render(RenderOptions::FULL);
        self.paint();
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        render_closed(&self.core.path, surface);
    }

    fn is_target(&self, point: Point) -> bool {
        self.core.hit_outline_or_fill(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::shapes::testing::Harness;
    use crate::paint::{Color, Paint};

    #[test]
    fn circle_grows_toward_pointer() {
        let h = Harness::new();
        let mut circle = Circle::new(&h.args(Point::new(10.0, 10.0)));
        circle.draw(Point::new(-10.0, 55.0));
        let bounds = circle.path().bounds().unwrap();
        assert!((bounds.left() - -30.0).abs() < 0.01);
        assert!((bounds.right() - 10.0).abs() < 0.01);
        assert!((bounds.top() - -10.0).abs() < 0.01);
        assert!((bounds.bottom() - 30.0).abs() < 0.01);
    }

    #[test]
    fn transparent_fill_ignores_interior() {
        let h = Harness::new();
        h.surface.borrow_mut().set_fill_style(Paint::Solid(Color::transparent()));
        let mut circle = Circle::new(&h.args(Point::new(10.0, 10.0)));
        circle.draw(Point::new(30.0, 10.0));
        // center (30, 10), radius 20
        assert!(!circle.is_target(Point::new(30.0, 10.0)));
        assert!(circle.is_target(Point::new(50.0, 10.0)));
    }

    #[test]
    fn opaque_fill_hits_interior() {
        let h = Harness::new();
        let mut circle = Circle::new(&h.args(Point::new(10.0, 10.0)));
        circle.draw(Point::new(30.0, 10.0));
        assert!(circle.is_target(Point::new(30.0, 10.0)));
        assert!(!circle.is_target(Point::new(30.0, 40.0)));
    }

    #[test]
    fn device_pixel_ratio_adjusts_hit_point() {
        let h = Harness::new();
        h.surface.borrow_mut().scale(2.0, 2.0);
        let args = h.args(Point::new(10.0, 10.0)).with_device_pixel_ratio(2.0);
        let mut circle = Circle::new(&args);
        circle.draw(Point::new(30.0, 10.0));
        assert!(circle.is_target(Point::new(30.0, 10.0)));
        assert!(circle.is_target(Point::new(45.0, 10.0)));
        assert!(!circle.is_target(Point::new(52.0, 10.0)));
    }
}
