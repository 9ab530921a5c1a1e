//! Smartdok canvas crate.
//!
//! Drawing commands (pencil, rectangle, triangle, circle, text, background)
//! over a 2D rendering surface, plus the pieces they stand on: geometry,
//! paint, style snapshots, paths, text measurement and two surfaces (a
//! software raster and a recorder).

pub mod command;
pub mod coords;
pub mod error;
pub mod history;
pub mod logging;
pub mod paint;
pub mod path;
pub mod style;
pub mod surface;
pub mod text;

pub use command::{create, create_named, Command, CommandArgs, RenderFn, RenderOptions, ShapeKind};
pub use error::CommandError;
pub use history::{CanvasMode, CommandHandle, HistoryItem};
