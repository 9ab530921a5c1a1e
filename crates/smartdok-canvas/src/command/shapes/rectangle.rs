use crate::command::{Command, CommandArgs, CommandCore, RenderOptions, ShapeKind};
use crate::coords::Point;
use crate::surface::RenderSurface;

use super::{rectangle_path, render_closed};

/// Axis-aligned box spanned from the anchor to the pointer.
pub struct Rectangle {
    core: CommandCore,
    from: Point,
}

impl Rectangle {
    pub fn new(args: &CommandArgs) -> Self {
        log::debug!("rectangle anchored at ({}, {})", args.point.x, args.point.y);
        Self { core: CommandCore::new(args), from: args.point }
    }
}

impl Command for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    /// Rebuilds the box, repaints the drawing underneath, then paints on top.
    fn draw(&mut self, point: Point) {
        self.core.path = rectangle_path(self.from, point);
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
