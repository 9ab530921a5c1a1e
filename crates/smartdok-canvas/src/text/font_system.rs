use crate::style::TextBaseline;

use super::metrics::{self, EmBox, InkBox, TextMetrics};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Coverage bitmap of one glyph, positioned in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    /// Left edge in device pixels.
    pub x: i32,
    /// Top edge in device pixels.
    pub y: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// Owns the fonts a surface measures and draws text with.
///
/// The first loaded font is the primary face; CSS font families are not
/// matched, only the pixel size of the font shorthand is honored.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {:?}", id);
        Ok(id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    #[inline]
    fn primary(&self) -> Option<&fontdue::Font> {
        self.fonts.first()
    }

    /// Measures `text` at `size` pixels relative to `baseline`.
    #[must_use]
    pub fn measure(&self, text: &str, size: f32, baseline: TextBaseline) -> TextMetrics {
        let (ink, em) = self.ink_box(text, size);
        TextMetrics::from_ink(ink, em, baseline)
    }

    /// Coverage bitmaps for `text` drawn with its `baseline` at `origin` (device px).
    pub fn glyphs(
        &self,
        text: &str,
        size: f32,
        baseline: TextBaseline,
        origin: (f32, f32),
    ) -> Vec<GlyphBitmap> {
        let (_, em) = self.ink_box(text, size);
        let alphabetic_y = origin.1 - em.baseline_offset(baseline);
        let mut pen = origin.0;
        let mut out = Vec::new();

        match self.primary() {
            Some(font) => {
                for ch in text.chars() {
                    let (m, coverage) = font.rasterize(ch, size);
                    if m.width > 0 && m.height > 0 {
                        out.push(GlyphBitmap {
                            x: (pen + m.xmin as f32).round() as i32,
                            y: (alphabetic_y - (m.ymin as f32 + m.height as f32)).round() as i32,
                            width: m.width,
                            height: m.height,
                            coverage,
                        });
                    }
                    pen += m.advance_width;
                }
            }
            None => {
                // Placeholder face: one solid box per visible character.
                let advance = size * metrics::APPROX_ADVANCE;
                let ink_h = size * metrics::APPROX_INK_HEIGHT;
                for ch in text.chars() {
                    if !ch.is_whitespace() {
                        let width = (advance * 0.8).round().max(1.0) as usize;
                        let height = ink_h.round().max(1.0) as usize;
                        out.push(GlyphBitmap {
                            x: (pen + advance * 0.1).round() as i32,
                            y: (alphabetic_y - ink_h).round() as i32,
                            width,
                            height,
                            coverage: vec![u8::MAX; width * height],
                        });
                    }
                    pen += advance;
                }
            }
        }
        out
    }

    fn ink_box(&self, text: &str, size: f32) -> (InkBox, EmBox) {
        let Some(font) = self.primary() else {
            return (metrics::approximate_ink(text, size), EmBox::approximate(size));
        };

        let em = font
            .horizontal_line_metrics(size)
            .map(|lm| EmBox { ascent: lm.ascent, descent: -lm.descent })
            .unwrap_or_else(|| EmBox::approximate(size));

        let mut pen = 0.0f32;
        let mut ink: Option<InkBox> = None;
        for ch in text.chars() {
            let m = font.metrics(ch, size);
            if m.width > 0 && m.height > 0 {
                let glyph = InkBox {
                    min_x: pen + m.xmin as f32,
                    max_x: pen + m.xmin as f32 + m.width as f32,
                    above: m.ymin as f32 + m.height as f32,
                    below: -(m.ymin as f32),
                    advance: 0.0,
                };
                ink = Some(match ink {
                    None => glyph,
                    Some(acc) => InkBox {
                        min_x: acc.min_x.min(glyph.min_x),
                        max_x: acc.max_x.max(glyph.max_x),
                        above: acc.above.max(glyph.above),
                        below: acc.below.max(glyph.below),
                        advance: 0.0,
                    },
                });
            }
            pen += m.advance_width;
        }

        let ink = InkBox { advance: pen, ..ink.unwrap_or_default() };
        (ink, em)
    }
}
