//! Types at the boundary with the host's undo/redo stack.
//!
//! The stack itself lives in the host; it stores [`HistoryItem`]s and calls
//! `undo`/`redo` on them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::command::Command;

/// Shared, mutable handle to a command held by both the drawing and its history.
pub type CommandHandle = Rc<RefCell<Box<dyn Command>>>;

/// Undo or redo action attached to a history item.
pub type HistoryThunk = Box<dyn Fn()>;

/// What pointer input currently does on the drawing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CanvasMode {
    #[default]
    Draw,
    Erase,
    Move,
}

impl fmt::Display for CanvasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CanvasMode::Draw => "draw",
            CanvasMode::Erase => "erase",
            CanvasMode::Move => "move",
        })
    }
}

impl FromStr for CanvasMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw" => Ok(CanvasMode::Draw),
            "erase" => Ok(CanvasMode::Erase),
            "move" => Ok(CanvasMode::Move),
            other => Err(format!("unknown canvas mode: {other:?}")),
        }
    }
}

/// One undoable step: a command plus optional custom undo/redo actions.
///
/// Without custom actions, undo erases the command and redo redraws it.
pub struct HistoryItem {
    pub command: CommandHandle,
    undo: Option<HistoryThunk>,
    redo: Option<HistoryThunk>,
}

impl HistoryItem {
    pub fn new(command: CommandHandle) -> Self {
        Self { command, undo: None, redo: None }
    }

    pub fn with_undo(mut self, f: impl Fn() + 'static) -> Self {
        self.undo = Some(Box::new(f));
        self
    }

    pub fn with_redo(mut self, f: impl Fn() + 'static) -> Self {
        self.redo = Some(Box::new(f));
        self
    }

    pub fn undo(&self) {
        match &self.undo {
            Some(f) => f(),
            None => self.command.borrow_mut().erase(false),
        }
    }

    pub fn redo(&self) {
        match &self.redo {
            Some(f) => f(),
            None => self.command.borrow_mut().redraw(),
        }
    }
}

impl fmt::Debug for HistoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryItem")
            .field("kind", &self.command.borrow().kind())
            .field("custom_undo", &self.undo.is_some())
            .field("custom_redo", &self.redo.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::command::shapes::testing::Harness;
    use crate::command::{create, ShapeKind};
    use crate::coords::Point;

    fn rectangle(h: &Harness) -> CommandHandle {
        let mut command = create(ShapeKind::Rectangle, h.args(Point::new(0.0, 0.0)));
        command.draw(Point::new(10.0, 10.0));
        Rc::new(RefCell::new(command))
    }

    #[test]
    fn default_undo_erases_and_redo_redraws() {
        let h = Harness::new();
        let item = HistoryItem::new(rectangle(&h));

        item.undo();
        assert!(item.command.borrow().is_erased());

        item.redo();
        assert!(!item.command.borrow().is_erased());
        assert!(item.command.borrow().is_target(Point::new(5.0, 5.0)));
    }

    #[test]
    fn custom_thunks_replace_defaults() {
        let h = Harness::new();
        let undone = Rc::new(Cell::new(false));
        let flag = undone.clone();
        let item = HistoryItem::new(rectangle(&h)).with_undo(move || flag.set(true));

        item.undo();
        assert!(undone.get());
        assert!(!item.command.borrow().is_erased());
    }

    #[test]
    fn mode_names_parse() {
        for mode in [CanvasMode::Draw, CanvasMode::Erase, CanvasMode::Move] {
            assert_eq!(mode.to_string().parse::<CanvasMode>(), Ok(mode));
        }
        assert!("paint".parse::<CanvasMode>().is_err());
    }
}
