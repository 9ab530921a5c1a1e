use kurbo::Affine;

use crate::coords::Point;
use crate::path::{FlatPath, Path};
use crate::style::StyleSnapshot;

/// Everything `save`/`restore` brackets: style plus transform.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub style: StyleSnapshot,
    pub transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { style: StyleSnapshot::default(), transform: Affine::IDENTITY }
    }
}

impl DrawState {
    /// Uniform scale factor of the transform (device px per logical px).
    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.transform.determinant().abs().sqrt() as f32
    }

    /// Stroke width in device pixels.
    #[inline]
    pub fn device_line_width(&self) -> f32 {
        self.style.line_width * self.scale_factor()
    }

    /// Maps a logical point to device pixels.
    #[inline]
    pub fn to_device(&self, p: Point) -> Point {
        Point::from_kurbo(self.transform * p.to_kurbo())
    }

    pub(crate) fn device_path(&self, path: &Path) -> FlatPath {
        path.transformed(self.transform).flatten()
    }

    pub(crate) fn hits_stroke(&self, path: &Path, x: f32, y: f32) -> bool {
        self.device_path(path).stroke_contains(Point::new(x, y), self.device_line_width())
    }

    pub(crate) fn hits_fill(&self, path: &Path, x: f32, y: f32) -> bool {
        self.device_path(path).contains(Point::new(x, y))
    }
}

/// Current state plus the save/restore stack.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateStack {
    pub current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.current = state,
            None => log::warn!("restore() without matching save(); ignored"),
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}
