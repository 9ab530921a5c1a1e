//! Style snapshot captured by commands at construction.

use std::fmt;
use std::str::FromStr;

use crate::paint::{Color, Paint};

/// Vertical anchor used when drawing or measuring text.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

impl fmt::Display for TextBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TextBaseline::Top => "top",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Ideographic => "ideographic",
            TextBaseline::Bottom => "bottom",
        };
        f.write_str(s)
    }
}

impl FromStr for TextBaseline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(TextBaseline::Top),
            "hanging" => Ok(TextBaseline::Hanging),
            "middle" => Ok(TextBaseline::Middle),
            "alphabetic" => Ok(TextBaseline::Alphabetic),
            "ideographic" => Ok(TextBaseline::Ideographic),
            "bottom" => Ok(TextBaseline::Bottom),
            other => Err(format!("unknown text baseline: {other:?}")),
        }
    }
}

/// Drawing style a command renders with.
///
/// Captured once when the command is created and re-applied verbatim before
/// every render, so later changes to the surface (picking a new brush color
/// for the next shape) never alter how an existing shape repaints.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    pub stroke: Paint,
    pub fill: Paint,
    pub line_width: f32,
    /// CSS font shorthand, e.g. `"bold 16px sans-serif"`.
    pub font: String,
    pub text_baseline: TextBaseline,
}

impl StyleSnapshot {
    /// Pixel size parsed from [`font`](Self::font).
    #[inline]
    pub fn font_size(&self) -> f32 {
        font_size_px(&self.font)
    }
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            stroke: Paint::Solid(Color::black()),
            fill: Paint::Solid(Color::black()),
            line_width: 1.0,
            font: DEFAULT_FONT.to_string(),
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

pub const DEFAULT_FONT: &str = "10px sans-serif";

const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Extracts the pixel size from a CSS font shorthand.
///
/// Falls back to 10px when no `<n>px` token is present.
pub fn font_size_px(font: &str) -> f32 {
    font.split_whitespace()
        // "16px/1.2" carries a line height after the slash.
        .filter_map(|token| token.split('/').next())
        .filter_map(|token| token.strip_suffix("px"))
        .find_map(|n| n.parse::<f32>().ok())
        .filter(|size| *size > 0.0 && size.is_finite())
        .unwrap_or(DEFAULT_FONT_SIZE)
}
