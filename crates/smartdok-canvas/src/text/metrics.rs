use crate::style::TextBaseline;

/// Measured extents of a text run, following canvas `TextMetrics` conventions.
///
/// All values are in pixels relative to the draw anchor:
/// - `actual_bounding_box_left` is positive when ink extends left of the anchor
/// - `actual_bounding_box_ascent` is positive when ink extends above the baseline
/// - `actual_bounding_box_descent` is positive when ink extends below the baseline
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub actual_bounding_box_left: f32,
    pub actual_bounding_box_right: f32,
    pub actual_bounding_box_ascent: f32,
    pub actual_bounding_box_descent: f32,
}

/// Ink extents relative to the pen origin on the alphabetic baseline (y-down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct InkBox {
    pub min_x: f32,
    pub max_x: f32,
    /// Height of ink above the alphabetic baseline.
    pub above: f32,
    /// Depth of ink below the alphabetic baseline.
    pub below: f32,
    pub advance: f32,
}

/// Em box of the font at a given size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct EmBox {
    pub ascent: f32,
    pub descent: f32,
}

impl EmBox {
    /// Approximate em box used when no font is loaded.
    pub fn approximate(size: f32) -> Self {
        Self { ascent: size * 0.8, descent: size * 0.2 }
    }

    /// Position of `baseline` below the alphabetic baseline.
    pub fn baseline_offset(self, baseline: TextBaseline) -> f32 {
        match baseline {
            TextBaseline::Top => -self.ascent,
            TextBaseline::Hanging => -self.ascent * 0.8,
            TextBaseline::Middle => (self.descent - self.ascent) / 2.0,
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Ideographic | TextBaseline::Bottom => self.descent,
        }
    }
}

impl TextMetrics {
    pub(crate) fn from_ink(ink: InkBox, em: EmBox, baseline: TextBaseline) -> Self {
        let offset = em.baseline_offset(baseline);
        Self {
            width: ink.advance,
            actual_bounding_box_left: -ink.min_x,
            actual_bounding_box_right: ink.max_x,
            actual_bounding_box_ascent: ink.above + offset,
            actual_bounding_box_descent: ink.below - offset,
        }
    }
}

/// Advance per character of the approximate face, in em.
pub(crate) const APPROX_ADVANCE: f32 = 0.6;
/// Ink height above the baseline of the approximate face, in em.
pub(crate) const APPROX_INK_HEIGHT: f32 = 0.7;

/// Ink box of `text` in the approximate face.
pub(crate) fn approximate_ink(text: &str, size: f32) -> InkBox {
    let advance = text.chars().count() as f32 * size * APPROX_ADVANCE;
    if text.trim().is_empty() {
        return InkBox { advance, ..InkBox::default() };
    }
    InkBox {
        min_x: 0.0,
        max_x: advance,
        above: size * APPROX_INK_HEIGHT,
        below: 0.0,
        advance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool { (a - b).abs() < 1e-4 }

    #[test]
    fn alphabetic_baseline_keeps_ink_extents() {
        let m = TextMetrics::from_ink(approximate_ink("ab", 10.0), EmBox::approximate(10.0), TextBaseline::Alphabetic);
        assert!(approx(m.width, 12.0));
        assert!(approx(m.actual_bounding_box_left, 0.0));
        assert!(approx(m.actual_bounding_box_right, 12.0));
        assert!(approx(m.actual_bounding_box_ascent, 7.0));
        assert!(approx(m.actual_bounding_box_descent, 0.0));
    }

    #[test]
    fn top_baseline_moves_ink_below_anchor() {
        let m = TextMetrics::from_ink(approximate_ink("ab", 10.0), EmBox::approximate(10.0), TextBaseline::Top);
        assert!(approx(m.actual_bounding_box_ascent, -1.0));
        assert!(approx(m.actual_bounding_box_descent, 8.0));
    }

    #[test]
    fn whitespace_has_advance_but_no_ink() {
        let ink = approximate_ink("  ", 10.0);
        assert!(approx(ink.advance, 12.0));
        assert_eq!(ink.max_x, 0.0);
        assert_eq!(ink.above, 0.0);
    }
}
