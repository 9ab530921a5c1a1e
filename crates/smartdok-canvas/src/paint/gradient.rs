use crate::coords::Point;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient in the same coordinate space as the path it paints.
///
/// Stops are expected sorted by `t`; [`LinearGradient::new`] sorts them.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point, mut stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { start, end, stops, spread }
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && self.start != self.end
    }

    /// Color at `p`, projected onto the start→end axis.
    ///
    /// Degenerate gradients paint their first stop (or nothing without stops).
    pub fn sample(&self, p: Point) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::transparent();
        };
        if !self.is_valid() {
            return first.color;
        }

        let axis = self.end - self.start;
        let rel = p - self.start;
        let t = (rel.x * axis.x + rel.y * axis.y) / (axis.x * axis.x + axis.y * axis.y);
        let t = match self.spread {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t.rem_euclid(1.0),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        };

        let mut prev = first;
        for stop in &self.stops {
            if t <= stop.t {
                let span = stop.t - prev.t;
                if span <= f32::EPSILON {
                    return stop.color;
                }
                return prev.color.lerp(stop.color, (t - prev.t) / span);
            }
            prev = stop;
        }
        prev.color
    }
}
