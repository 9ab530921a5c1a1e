//! Drawing commands.
//!
//! A command is one shape on the drawing: it owns its path and the style it
//! was created with, and is driven by the host through [`Command`]:
//! - `draw` while the shape is being created (once per pointer move)
//! - `drag` to move it after creation
//! - `erase` / `redraw` for undo and redo
//! - `is_target` for selection
//!
//! Commands never know about each other. Whenever the whole drawing has to be
//! repainted they call the injected [`RenderFn`]; compositing order belongs to
//! the host.
//!
//! # Render callback contract
//!
//! - The callback is invoked synchronously, after the command has released
//!   its borrow of the surface.
//! - `RenderOptions { only_fg: true }` is sent only by the background command
//!   right after it repainted itself. The receiver must repaint foreground
//!   commands only and must not redraw the background, or the two would
//!   recurse forever.

mod base;
mod factory;
pub mod shapes;

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::coords::Point;
use crate::error::CommandError;
use crate::path::Path;
use crate::style::StyleSnapshot;
use crate::surface::{RenderSurface, SurfaceHandle};

pub use base::{CommandCore, DragState};
pub use factory::{create, create_named};

// ── ShapeKind ─────────────────────────────────────────────────────────────

/// The closed set of command variants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Pencil,
    Rectangle,
    Triangle,
    Circle,
    Text,
    Background,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Pencil,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Circle,
        ShapeKind::Text,
        ShapeKind::Background,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Pencil => "pencil",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Text => "text",
            ShapeKind::Background => "background",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CommandError::UnknownShapeKind(s.to_string()))
    }
}

// ── render callback ───────────────────────────────────────────────────────

/// Hint passed to the render callback.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderOptions {
    /// Repaint foreground commands only; the background is already current.
    pub only_fg: bool,
}

impl RenderOptions {
    pub const FULL: RenderOptions = RenderOptions { only_fg: false };
    pub const FOREGROUND_ONLY: RenderOptions = RenderOptions { only_fg: true };
}

/// Repaints the whole drawing. Supplied by the host, shared by every command.
pub type RenderFn = Rc<dyn Fn(RenderOptions)>;

// ── CommandArgs ───────────────────────────────────────────────────────────

/// Construction arguments shared by every variant.
///
/// ```rust,ignore
/// let args = CommandArgs::new(surface, render, Point::new(10.0, 10.0))
///     .with_text("hello")
///     .with_device_pixel_ratio(2.0);
/// let text = create(ShapeKind::Text, args);
/// ```
#[derive(Clone)]
pub struct CommandArgs {
    pub surface: SurfaceHandle,
    pub render: RenderFn,
    /// Anchor point in logical coordinates. Ignored by the background.
    pub point: Point,
    /// Literal content for text commands.
    pub text: Option<String>,
    /// Scale applied to hit-test points, which arrive in logical pixels
    /// while the surface's geometric queries work in device pixels.
    pub device_pixel_ratio: Option<f32>,
}

impl CommandArgs {
    pub fn new(surface: SurfaceHandle, render: RenderFn, point: Point) -> Self {
        Self { surface, render, point, text: None, device_pixel_ratio: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = Some(ratio);
        self
    }
}

// ── Command trait ─────────────────────────────────────────────────────────

/// The capability set every shape variant implements.
///
/// Variants hold a [`CommandCore`] and expose it through `core`/`core_mut`;
/// everything else has a default built on it, so a variant only overrides
/// what differs (path construction, hit policy, render compositing).
pub trait Command {
    fn kind(&self) -> ShapeKind;

    fn core(&self) -> &CommandCore;

    fn core_mut(&mut self) -> &mut CommandCore;

    /// Advances or redefines the shape from a new pointer position.
    fn draw(&mut self, point: Point);

    /// Paints the command's own geometry onto `surface`.
    ///
    /// Called by [`paint`](Self::paint) with the style snapshot already
    /// applied. The default strokes the path.
    fn render(&self, surface: &mut dyn RenderSurface) {
        surface.stroke(&self.core().path);
    }

    /// Renders with the captured style, bracketed by save/restore so the
    /// snapshot never leaks into the ambient surface state.
    fn paint(&self) {
        let core = self.core();
        let mut surface = core.surface.borrow_mut();
        surface.save();
        surface.set_style(&core.style);
        self.render(&mut *surface);
        surface.restore();
    }

    /// Makes the command visible again and repaints it.
    fn redraw(&mut self) {
        self.core_mut().erased = false;
        self.paint();
    }

    /// Hides the command. Unless `skip_render` is set, asks the host to
    /// repaint so the drawing appears without it.
    fn erase(&mut self, skip_render: bool) {
        let core = self.core_mut();
        core.erased = true;
        log::debug!("{} erased", self.kind());
        if !skip_render {
            self.core().request_render(RenderOptions::FULL);
        }
    }

    /// Relative move. The first call arms the gesture at `point` and changes
    /// nothing; each later call moves the shape by the distance from the
    /// previous point, repaints, and asks the host to repaint.
    fn drag(&mut self, point: Point) -> Result<(), CommandError> {
        let Some(delta) = self.core_mut().drag_step(point) else {
            return Ok(());
        };
        self.translate(delta);
        self.redraw();
        self.core().request_render(RenderOptions::FULL);
        Ok(())
    }

    /// Moves the geometry by `delta`. The default translates the path.
    fn translate(&mut self, delta: Point) {
        let core = self.core_mut();
        core.path = core.path.translated(delta.x, delta.y);
    }

    /// Resizes the command to a new extent.
    fn scale(&mut self, _point: Point) -> Result<(), CommandError> {
        Err(CommandError::NotImplemented { operation: "scale", kind: self.kind() })
    }

    /// True when `point` selects this command. The default tests the stroke.
    fn is_target(&self, point: Point) -> bool {
        self.core().hit_stroke(point)
    }

    #[inline]
    fn is_erased(&self) -> bool {
        self.core().erased
    }

    /// Ends any drag gesture in progress.
    fn on_mouse_up(&mut self, _point: Point) {
        self.core_mut().end_drag();
    }

    #[inline]
    fn path(&self) -> &Path {
        &self.core().path
    }

    #[inline]
    fn style(&self) -> &StyleSnapshot {
        &self.core().style
    }
}
