use crate::command::{Command, CommandArgs, CommandCore, RenderOptions, ShapeKind};
use crate::coords::Point;
use crate::surface::RenderSurface;

use super::{render_closed, triangle_path};

/// Triangle with its base on the anchor's row and its apex on the pointer's.
pub struct Triangle {
    core: CommandCore,
    from: Point,
}

impl Triangle {
    pub fn new(args: &CommandArgs) -> Self {
        log::debug!("triangle anchored at ({}, {})", args.point.x, args.point.y);
        Self { core: CommandCore::new(args), from: args.point }
    }
}

impl Command for Triangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn core(&self) -> &CommandCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CommandCore {
        &mut self.core
    }

    fn draw(&mut self, point: Point) {
        self.core.path = triangle_path(self.from, point);
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
