use kurbo::Affine;

use crate::coords::{Dimension, Point, Rect};
use crate::paint::{Color, Paint};
use crate::path::{FlatPath, Path};
use crate::style::StyleSnapshot;
use crate::text::{FontLoadError, FontSystem, TextMetrics};

use super::state::StateStack;
use super::{DrawState, RenderSurface};

/// Glyph coverage at or above this value paints a pixel.
const GLYPH_COVERAGE_THRESHOLD: u8 = 128;

/// Construction settings for a [`Canvas`].
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Size in logical pixels.
    pub size: Dimension,
    /// Device pixels per logical pixel; the canvas is pre-scaled by it.
    pub device_pixel_ratio: f32,
    /// Optional TrueType/OpenType face for text. `None` draws placeholder glyphs.
    pub font_bytes: Option<Vec<u8>>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: Dimension::new(300.0, 150.0),
            device_pixel_ratio: 1.0,
            font_bytes: None,
        }
    }
}

/// Software raster surface.
///
/// Pixels are premultiplied colors, row-major, `width * height` in device
/// pixels. Coverage is hard-edged: a pixel is painted when its center lies
/// inside the fill or stroke, which is the same test the hit queries use.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    state: StateStack,
    fonts: FontSystem,
}

impl Canvas {
    /// Blank transparent canvas of `width` × `height` device pixels with an
    /// identity transform.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::transparent(); width as usize * height as usize],
            state: StateStack::default(),
            fonts: FontSystem::new(),
        }
    }

    /// Sizes the backing store for the device pixel ratio and scales the
    /// transform so drawing happens in logical coordinates.
    pub fn with_config(config: CanvasConfig) -> Result<Self, FontLoadError> {
        let ratio = if config.device_pixel_ratio > 0.0 && config.device_pixel_ratio.is_finite() {
            config.device_pixel_ratio
        } else {
            log::warn!("invalid device pixel ratio {}; using 1.0", config.device_pixel_ratio);
            1.0
        };

        if !config.size.is_valid() {
            log::warn!("degenerate canvas size {:?}", config.size);
        }
        let width = (config.size.width.max(0.0) * ratio).ceil() as u32;
        let height = (config.size.height.max(0.0) * ratio).ceil() as u32;
        let mut canvas = Self::new(width, height);
        canvas.scale(ratio, ratio);

        if let Some(bytes) = config.font_bytes.as_deref() {
            canvas.fonts.load_font(bytes)?;
        }

        log::debug!("canvas {}x{} px (ratio {})", width, height, ratio);
        Ok(canvas)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at device coordinates, `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Number of pixels with any coverage.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|c| !c.is_transparent()).count()
    }

    /// Wipes the whole backing store, ignoring the transform.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::transparent());
    }

    /// Fonts used by `fill_text` and `measure_text`.
    pub fn fonts_mut(&mut self) -> &mut FontSystem {
        &mut self.fonts
    }

    /// Depth of the save/restore stack.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    #[inline]
    fn current(&self) -> &DrawState {
        &self.state.current
    }

    /// Device pixel range covered by `bounds`, clamped to the canvas.
    fn pixel_span(&self, bounds: Rect, pad: f32) -> (u32, u32, u32, u32) {
        let clamp = |v: f32, max: u32| (v.max(0.0) as u32).min(max);
        (
            clamp((bounds.left() - pad).floor(), self.width),
            clamp((bounds.top() - pad).floor(), self.height),
            clamp((bounds.right() + pad).ceil() + 1.0, self.width),
            clamp((bounds.bottom() + pad).ceil() + 1.0, self.height),
        )
    }

    /// Paints every pixel in `bounds` whose center satisfies `inside`.
    fn cover(&mut self, bounds: Rect, pad: f32, paint: &Paint, inside: impl Fn(Point) -> bool) {
        let (x0, y0, x1, y1) = self.pixel_span(bounds, pad);
        let to_logical = self.current().transform.inverse();
        let width = self.width as usize;

        for py in y0..y1 {
            for px in x0..x1 {
                let center = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                if !inside(center) {
                    continue;
                }
                let color = paint.color_at(Point::from_kurbo(to_logical * center.to_kurbo()));
                let idx = py as usize * width + px as usize;
                self.pixels[idx] = color.over(self.pixels[idx]);
            }
        }
    }

    fn paint_flat(&mut self, flat: &FlatPath, paint: &Paint, stroke_width: Option<f32>) {
        let Some(bounds) = flat.bounds() else {
            return;
        };
        match stroke_width {
            Some(w) => self.cover(bounds, w / 2.0, paint, |p| flat.stroke_contains(p, w)),
            None => self.cover(bounds, 0.0, paint, |p| flat.contains(p)),
        }
    }
}

impl RenderSurface for Canvas {
    fn style(&self) -> StyleSnapshot {
        self.current().style.clone()
    }

    fn set_style(&mut self, style: &StyleSnapshot) {
        self.state.current.style = style.clone();
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn transform(&self) -> Affine {
        self.current().transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.current.transform = transform;
    }

    fn stroke(&mut self, path: &Path) {
        let flat = self.current().device_path(path);
        let width = self.current().device_line_width();
        let paint = self.current().style.stroke.clone();
        self.paint_flat(&flat, &paint, Some(width));
    }

    fn fill(&mut self, path: &Path) {
        let flat = self.current().device_path(path);
        let paint = self.current().style.fill.clone();
        self.paint_flat(&flat, &paint, None);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let state = self.current().clone();
        let origin = state.to_device(Point::new(x, y));
        let size = state.style.font_size() * state.scale_factor();
        let glyphs = self.fonts.glyphs(text, size, state.style.text_baseline, (origin.x, origin.y));
        let to_logical = state.transform.inverse();
        let width = self.width as i64;
        let height = self.height as i64;

        for glyph in glyphs {
            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    if glyph.coverage[row * glyph.width + col] < GLYPH_COVERAGE_THRESHOLD {
                        continue;
                    }
                    let px = glyph.x as i64 + col as i64;
                    let py = glyph.y as i64 + row as i64;
                    if px < 0 || py < 0 || px >= width || py >= height {
                        continue;
                    }
                    let center = kurbo::Point::new(px as f64 + 0.5, py as f64 + 0.5);
                    let color = state.style.fill.color_at(Point::from_kurbo(to_logical * center));
                    let idx = (py * width + px) as usize;
                    self.pixels[idx] = color.over(self.pixels[idx]);
                }
            }
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let flat = self.current().device_path(&Path::rect(rect));
        let Some(bounds) = flat.bounds() else {
            return;
        };
        let (x0, y0, x1, y1) = self.pixel_span(bounds, 0.0);
        let width = self.width as usize;
        for py in y0..y1 {
            for px in x0..x1 {
                if flat.contains(Point::new(px as f32 + 0.5, py as f32 + 0.5)) {
                    self.pixels[py as usize * width + px as usize] = Color::transparent();
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.fill(&Path::rect(rect));
    }

    fn is_point_in_stroke(&self, path: &Path, x: f32, y: f32) -> bool {
        self.current().hits_stroke(path, x, y)
    }

    fn is_point_in_path(&self, path: &Path, x: f32, y: f32) -> bool {
        self.current().hits_fill(path, x, y)
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        let style = &self.current().style;
        self.fonts.measure(text, style.font_size(), style.text_baseline)
    }
}
