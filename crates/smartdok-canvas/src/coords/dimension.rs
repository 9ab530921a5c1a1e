/// Canvas size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}
