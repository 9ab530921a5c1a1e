use crate::coords::Point;
use crate::path::Path;
use crate::style::StyleSnapshot;
use crate::surface::SurfaceHandle;

use super::{CommandArgs, RenderFn, RenderOptions};

/// Progress of a move gesture.
///
/// `Idle --drag(p)--> Dragging(p)` arms without moving;
/// `Dragging(a) --drag(b)--> Dragging(b)` moves by `b - a`;
/// mouse-up returns to `Idle` from any state.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Point),
}

/// State shared by every command variant.
pub struct CommandCore {
    pub(crate) surface: SurfaceHandle,
    render: RenderFn,
    /// Style captured from the surface at construction.
    pub style: StyleSnapshot,
    pub path: Path,
    pub erased: bool,
    pub drag: DragState,
    pub device_pixel_ratio: Option<f32>,
}

impl CommandCore {
    /// Captures the surface's current style as the command's snapshot.
    pub fn new(args: &CommandArgs) -> Self {
        let style = args.surface.borrow().style();
        Self {
            surface: args.surface.clone(),
            render: args.render.clone(),
            style,
            path: Path::new(),
            erased: false,
            drag: DragState::Idle,
            device_pixel_ratio: args.device_pixel_ratio,
        }
    }

    /// Asks the host to repaint the drawing.
    ///
    /// Must not be called while the surface is borrowed.
    #[inline]
    pub fn request_render(&self, options: RenderOptions) {
        (self.render)(options);
    }

    /// Advances the drag state machine; returns the delta to apply, if any.
    pub fn drag_step(&mut self, point: Point) -> Option<Point> {
        match std::mem::replace(&mut self.drag, DragState::Dragging(point)) {
            DragState::Idle => {
                log::debug!("drag armed at ({}, {})", point.x, point.y);
                None
            }
            DragState::Dragging(previous) => Some(point - previous),
        }
    }

    #[inline]
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Maps a logical pointer position into the surface's device pixels.
    #[inline]
    pub fn device_point(&self, point: Point) -> Point {
        match self.device_pixel_ratio {
            Some(ratio) => point.scaled(ratio),
            None => point,
        }
    }

    /// Stroke containment of the path. Never a hit while erased.
    pub fn hit_stroke(&self, point: Point) -> bool {
        if self.erased {
            return false;
        }
        let p = self.device_point(point);
        self.surface.borrow().is_point_in_stroke(&self.path, p.x, p.y)
    }

    /// Fill containment of the path. Never a hit while erased.
    pub fn hit_fill(&self, point: Point) -> bool {
        if self.erased {
            return false;
        }
        let p = self.device_point(point);
        self.surface.borrow().is_point_in_path(&self.path, p.x, p.y)
    }

    /// Hit policy of closed shapes: a transparent fill makes the shape an
    /// outline, so only its stroke selects it.
    pub fn hit_outline_or_fill(&self, point: Point) -> bool {
        if self.style.fill.is_transparent_sentinel() {
            self.hit_stroke(point)
        } else {
            self.hit_fill(point)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::surface::{RecordingSurface, RenderSurface};

    fn core_with(ratio: Option<f32>) -> (CommandCore, Rc<Cell<usize>>) {
        let surface: SurfaceHandle = Rc::new(RefCell::new(RecordingSurface::new()));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let render: RenderFn = Rc::new(move |_: RenderOptions| counter.set(counter.get() + 1));
        let mut args = CommandArgs::new(surface, render, Point::zero());
        args.device_pixel_ratio = ratio;
        (CommandCore::new(&args), calls)
    }

    // ── drag state ────────────────────────────────────────────────────────

    #[test]
    fn first_step_arms_without_delta() {
        let (mut core, _) = core_with(None);
        assert_eq!(core.drag_step(Point::new(5.0, 5.0)), None);
        assert_eq!(core.drag, DragState::Dragging(Point::new(5.0, 5.0)));
        assert_eq!(core.drag_step(Point::new(8.0, 1.0)), Some(Point::new(3.0, -4.0)));
        assert_eq!(core.drag, DragState::Dragging(Point::new(8.0, 1.0)));
    }

    #[test]
    fn end_drag_rearms() {
        let (mut core, _) = core_with(None);
        core.drag_step(Point::new(1.0, 1.0));
        core.end_drag();
        core.end_drag();
        assert_eq!(core.drag_step(Point::new(9.0, 9.0)), None);
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn device_pixel_ratio_scales_query_point() {
        let (mut core, _) = core_with(Some(2.0));
        core.surface.borrow_mut().scale(2.0, 2.0);
        core.path = Path::rect(crate::coords::Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(core.device_point(Point::new(3.0, 4.0)), Point::new(6.0, 8.0));
        // logical (8, 8) is device (16, 16), inside the scaled square
        assert!(core.hit_fill(Point::new(8.0, 8.0)));
        assert!(!core.hit_fill(Point::new(12.0, 8.0)));
    }

    #[test]
    fn erased_core_never_hits() {
        let (mut core, _) = core_with(None);
        core.path = Path::rect(crate::coords::Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(core.hit_fill(Point::new(5.0, 5.0)));
        core.erased = true;
        assert!(!core.hit_fill(Point::new(5.0, 5.0)));
        assert!(!core.hit_stroke(Point::new(0.0, 5.0)));
    }

    #[test]
    fn request_render_invokes_callback() {
        let (core, calls) = core_with(None);
        core.request_render(RenderOptions::FULL);
        assert_eq!(calls.get(), 1);
    }
}
