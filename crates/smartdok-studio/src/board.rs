//! Host side of the drawing: owns the commands, composites them onto the
//! raster and keeps the undo/redo history.
//!
//! Render requests from commands are not served on the spot: the callback
//! only records them and [`Board::flush`] repaints once the current event is
//! done. A full request wins over a foreground-only one.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use anyhow::Context;
use smartdok_canvas::coords::{Dimension, Point};
use smartdok_canvas::paint::{Color, Paint};
use smartdok_canvas::surface::{Canvas, CanvasConfig, RenderSurface, SurfaceHandle};
use smartdok_canvas::{
    create, CanvasMode, Command, CommandArgs, CommandError, CommandHandle, HistoryItem, RenderFn,
    RenderOptions, ShapeKind,
};

/// Upper bound on repaint passes per flush; a background pass asks for one more.
const MAX_FLUSH_PASSES: usize = 4;

/// Characters used by the ASCII preview, light to dark.
const SHADES: &[u8] = b".:-=+*#%@";

/// Repaint counters, for diagnostics.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RepaintStats {
    pub full: usize,
    pub foreground: usize,
    pub background_redraws: usize,
}

pub struct Board {
    canvas: Rc<RefCell<Canvas>>,
    surface: SurfaceHandle,
    render: RenderFn,
    pending: Rc<Cell<Option<RenderOptions>>>,
    size: Dimension,
    device_pixel_ratio: f32,

    backgrounds: Vec<CommandHandle>,
    commands: Vec<CommandHandle>,
    undo_stack: Vec<HistoryItem>,
    redo_stack: Vec<HistoryItem>,

    mode: CanvasMode,
    tool: ShapeKind,
    text: String,
    active: Option<CommandHandle>,
    stats: RepaintStats,
}

impl Board {
    pub fn new(config: CanvasConfig) -> anyhow::Result<Self> {
        let size = config.size;
        let device_pixel_ratio = config.device_pixel_ratio;
        let canvas = Canvas::with_config(config).context("creating raster canvas")?;
        let canvas = Rc::new(RefCell::new(canvas));
        let surface: SurfaceHandle = canvas.clone();

        let pending = Rc::new(Cell::new(None::<RenderOptions>));
        let requests = pending.clone();
        let render: RenderFn = Rc::new(move |options: RenderOptions| {
            let merged = match requests.get() {
                Some(previous) if !previous.only_fg => previous,
                _ => options,
            };
            requests.set(Some(merged));
        });

        log::info!("board {}x{} (ratio {})", size.width, size.height, device_pixel_ratio);
        Ok(Self {
            canvas,
            surface,
            render,
            pending,
            size,
            device_pixel_ratio,
            backgrounds: Vec::new(),
            commands: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            mode: CanvasMode::Draw,
            tool: ShapeKind::Pencil,
            text: String::new(),
            active: None,
            stats: RepaintStats::default(),
        })
    }

    // ── tools and ambient style ───────────────────────────────────────────

    pub fn set_mode(&mut self, mode: CanvasMode) {
        log::debug!("mode {}", mode);
        self.mode = mode;
    }

    /// Shape created by the next pointer-down in draw mode.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        self.tool = tool;
    }

    /// Content of the next text command.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_stroke(&mut self, paint: Paint) {
        self.surface.borrow_mut().set_stroke_style(paint);
    }

    pub fn set_fill(&mut self, paint: Paint) {
        self.surface.borrow_mut().set_fill_style(paint);
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.surface.borrow_mut().set_line_width(width);
    }

    pub fn set_font(&mut self, font: &str) {
        self.surface.borrow_mut().set_font(font);
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn canvas(&self) -> Ref<'_, Canvas> {
        self.canvas.borrow()
    }

    #[inline]
    pub fn commands(&self) -> &[CommandHandle] {
        &self.commands
    }

    #[inline]
    pub fn stats(&self) -> RepaintStats {
        self.stats
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Topmost visible command under `point`.
    pub fn target_at(&self, point: Point) -> Option<CommandHandle> {
        self.commands.iter().rev().find(|c| c.borrow().is_target(point)).cloned()
    }

    // ── background ────────────────────────────────────────────────────────

    /// Covers the whole board with `paint`. Earlier backgrounds stay in the
    /// history; the newest one that is not erased is the visible one.
    pub fn set_background(&mut self, paint: Paint) {
        let mut surface = self.surface.borrow_mut();
        surface.save();
        surface.set_fill_style(paint);
        drop(surface);

        let mut background = create(ShapeKind::Background, self.args(Point::zero()));

        self.surface.borrow_mut().restore();

        background.draw(Point::new(self.size.width, self.size.height));
        let handle = Rc::new(RefCell::new(background));
        self.backgrounds.push(handle.clone());
        self.push_history(HistoryItem::new(handle));
        self.flush();
    }

    /// Re-extends the visible background, e.g. after a resize.
    pub fn resize_background(&mut self, extent: Point) -> Result<(), CommandError> {
        if let Some(background) = self.visible_background() {
            background.borrow_mut().scale(extent)?;
            self.repaint_foreground();
        }
        Ok(())
    }

    fn visible_background(&self) -> Option<CommandHandle> {
        self.backgrounds.iter().rev().find(|b| !b.borrow().is_erased()).cloned()
    }

    // ── pointer input ─────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, point: Point) -> Result<(), CommandError> {
        match self.mode {
            CanvasMode::Draw => {
                let mut args = self.args(point);
                if self.tool == ShapeKind::Text {
                    args = args.with_text(self.text.clone());
                }
                let mut command = create(self.tool, args);
                if self.tool == ShapeKind::Text {
                    command.draw(point);
                }
                let handle = Rc::new(RefCell::new(command));
                self.commands.push(handle.clone());
                self.push_history(HistoryItem::new(handle.clone()));
                self.active = Some(handle);
            }
            CanvasMode::Move => {
                self.active = self.target_at(point);
                if let Some(active) = &self.active {
                    active.borrow_mut().drag(point)?;
                }
            }
            CanvasMode::Erase => {
                if let Some(target) = self.target_at(point) {
                    target.borrow_mut().erase(false);
                    let item = self.erase_item(target);
                    self.push_history(item);
                }
            }
        }
        self.flush();
        Ok(())
    }

    pub fn pointer_move(&mut self, point: Point) -> Result<(), CommandError> {
        let Some(active) = self.active.clone() else {
            return Ok(());
        };
        match self.mode {
            CanvasMode::Draw => active.borrow_mut().draw(point),
            CanvasMode::Move => active.borrow_mut().drag(point)?,
            CanvasMode::Erase => {}
        }
        self.flush();
        Ok(())
    }

    pub fn pointer_up(&mut self, point: Point) {
        if let Some(active) = self.active.take() {
            active.borrow_mut().on_mouse_up(point);
        }
        self.flush();
    }

    /// Convenience for a full press-drag-release gesture.
    pub fn stroke_through(&mut self, points: &[Point]) -> Result<(), CommandError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.pointer_down(*first)?;
        for p in rest {
            self.pointer_move(*p)?;
        }
        self.pointer_up(*rest.last().unwrap_or(first));
        Ok(())
    }

    // ── history ───────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let Some(item) = self.undo_stack.pop() else {
            return false;
        };
        item.undo();
        self.redo_stack.push(item);
        self.flush();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(item) = self.redo_stack.pop() else {
            return false;
        };
        item.redo();
        // a redrawn command paints on top; composite again for z-order
        (self.render)(RenderOptions::FULL);
        self.undo_stack.push(item);
        self.flush();
        true
    }

    fn push_history(&mut self, item: HistoryItem) {
        self.undo_stack.push(item);
        self.redo_stack.clear();
    }

    /// Undoing an erase brings the command back; redoing erases it again.
    fn erase_item(&self, command: CommandHandle) -> HistoryItem {
        let restore = command.clone();
        let render = self.render.clone();
        let erase = command.clone();
        HistoryItem::new(command)
            .with_undo(move || {
                restore.borrow_mut().redraw();
                render(RenderOptions::FULL);
            })
            .with_redo(move || erase.borrow_mut().erase(false))
    }

    // ── compositing ───────────────────────────────────────────────────────

    fn args(&self, point: Point) -> CommandArgs {
        CommandArgs::new(self.surface.clone(), self.render.clone(), point)
            .with_device_pixel_ratio(self.device_pixel_ratio)
    }

    /// Serves recorded render requests until none are left.
    pub fn flush(&mut self) {
        for _ in 0..MAX_FLUSH_PASSES {
            let Some(options) = self.pending.take() else {
                return;
            };
            if options.only_fg {
                self.repaint_foreground();
            } else {
                self.repaint_all();
            }
        }
        log::warn!("render requests still pending after {} passes", MAX_FLUSH_PASSES);
    }

    fn repaint_all(&mut self) {
        self.stats.full += 1;
        self.canvas.borrow_mut().clear();
        match self.visible_background() {
            // the background answers with a foreground-only request
            Some(background) => {
                self.stats.background_redraws += 1;
                background.borrow_mut().redraw();
            }
            None => self.repaint_foreground(),
        }
    }

    fn repaint_foreground(&mut self) {
        self.stats.foreground += 1;
        for command in &self.commands {
            let mut command = command.borrow_mut();
            if !command.is_erased() {
                command.redraw();
            }
        }
    }

    // ── preview ───────────────────────────────────────────────────────────

    /// Renders the raster as text, one character per device pixel.
    pub fn ascii_preview(&self) -> String {
        let canvas = self.canvas.borrow();
        let mut out = String::with_capacity((canvas.width() as usize + 1) * canvas.height() as usize);
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let shade = canvas.pixel(x, y).map(shade_of).unwrap_or(' ');
                out.push(shade);
            }
            out.push('\n');
        }
        out
    }
}

fn shade_of(color: Color) -> char {
    if color.is_transparent() {
        return ' ';
    }
    let [r, g, b, _] = color.to_srgb_u8();
    let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    let darkness = 1.0 - luma;
    let idx = (darkness * (SHADES.len() - 1) as f32).round() as usize;
    SHADES[idx.min(SHADES.len() - 1)] as char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(CanvasConfig {
            size: Dimension::new(40.0, 20.0),
            device_pixel_ratio: 1.0,
            font_bytes: None,
        })
        .unwrap()
    }

    fn drag_rect(board: &mut Board, from: Point, to: Point) {
        board.set_mode(CanvasMode::Draw);
        board.set_tool(ShapeKind::Rectangle);
        board.stroke_through(&[from, to]).unwrap();
    }

    // ── render contract ───────────────────────────────────────────────────

    #[test]
    fn background_redraw_triggers_foreground_pass_only() {
        let mut b = board();
        b.set_background(Paint::Solid(Color::white()));
        let stats = b.stats();
        assert_eq!(stats.full, 0);
        assert_eq!(stats.foreground, 1);
        assert_eq!(stats.background_redraws, 0);
    }

    #[test]
    fn full_repaint_redraws_background_once() {
        let mut b = board();
        b.set_background(Paint::Solid(Color::white()));
        drag_rect(&mut b, Point::new(2.0, 2.0), Point::new(10.0, 10.0));
        let stats = b.stats();
        // one full request from the rectangle's single draw
        assert_eq!(stats.full, 1);
        assert_eq!(stats.background_redraws, 1);
        assert_eq!(stats.foreground, 2);
    }

    #[test]
    fn composite_keeps_foreground_above_background() {
        let mut b = board();
        b.set_background(Paint::Solid(Color::white()));
        b.set_fill(Paint::Solid(Color::black()));
        drag_rect(&mut b, Point::new(2.0, 2.0), Point::new(10.0, 10.0));
        assert_eq!(b.canvas().pixel(5, 5), Some(Color::black()));
        assert_eq!(b.canvas().pixel(30, 15), Some(Color::white()));
    }

    // ── modes ─────────────────────────────────────────────────────────────

    #[test]
    fn move_mode_drags_topmost_target() {
        let mut b = board();
        drag_rect(&mut b, Point::new(2.0, 2.0), Point::new(10.0, 10.0));
        b.set_mode(CanvasMode::Move);
        b.stroke_through(&[Point::new(5.0, 5.0), Point::new(25.0, 7.0)]).unwrap();

        assert!(b.target_at(Point::new(5.0, 5.0)).is_none());
        assert!(b.target_at(Point::new(25.0, 7.0)).is_some());
        assert_eq!(b.canvas().pixel(5, 5), Some(Color::transparent()));
    }

    #[test]
    fn erase_mode_is_undoable() {
        let mut b = board();
        drag_rect(&mut b, Point::new(2.0, 2.0), Point::new(10.0, 10.0));
        b.set_mode(CanvasMode::Erase);
        b.pointer_down(Point::new(5.0, 5.0)).unwrap();
        b.pointer_up(Point::new(5.0, 5.0));
        assert_eq!(b.canvas().painted_pixels(), 0);

        assert!(b.undo());
        assert!(b.canvas().painted_pixels() > 0);
        assert!(b.redo());
        assert_eq!(b.canvas().painted_pixels(), 0);
    }

    #[test]
    fn undo_removes_last_shape() {
        let mut b = board();
        drag_rect(&mut b, Point::new(2.0, 2.0), Point::new(10.0, 10.0));
        assert!(b.undo());
        assert_eq!(b.canvas().painted_pixels(), 0);
        assert!(!b.undo());
        assert!(b.can_redo());
    }

    #[test]
    fn background_cannot_be_dragged() {
        let mut b = board();
        b.set_background(Paint::Solid(Color::white()));
        let background = b.visible_background().unwrap();
        let err = background.borrow_mut().drag(Point::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, CommandError::NotSupported { .. }));
    }

    #[test]
    fn preview_has_one_line_per_row() {
        let b = board();
        let preview = b.ascii_preview();
        assert_eq!(preview.lines().count(), 20);
        assert!(preview.lines().all(|l| l.len() == 40));
    }
}
