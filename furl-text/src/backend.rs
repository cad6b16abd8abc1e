use furl_core::{Bitmap, FontRef, TextPaint};

/// Vertical font metrics at a given size, relative to the baseline.
///
/// `ascent` is negative (above the baseline), `descent` positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    pub fn new(ascent: f32, descent: f32) -> Self {
        Self { ascent, descent }
    }

    /// `descent - ascent`.
    pub fn line_height(&self) -> f32 {
        self.descent - self.ascent
    }

    /// Metrics scaled by `factor` (used when a texture is drawn scaled).
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            ascent: self.ascent * factor,
            descent: self.descent * factor,
        }
    }
}

/// Measures and rasterizes single lines of text.
///
/// Implementations must tolerate non-positive sizes and empty strings by
/// returning zero metrics/width and `None` bitmaps.
pub trait TextBackend {
    fn metrics(&mut self, font: &FontRef, size: f32) -> FontMetrics;

    /// Advance width of `text` laid out on one line.
    fn measure(&mut self, text: &str, font: &FontRef, size: f32) -> f32;

    /// Draw `text` into a fresh `width × height` bitmap with its baseline
    /// at `baseline` pixels from the top.
    fn rasterize(
        &mut self,
        text: &str,
        paint: &TextPaint,
        width: u32,
        height: u32,
        baseline: f32,
    ) -> Option<Bitmap>;
}

impl<B: TextBackend + ?Sized> TextBackend for Box<B> {
    fn metrics(&mut self, font: &FontRef, size: f32) -> FontMetrics {
        (**self).metrics(font, size)
    }

    fn measure(&mut self, text: &str, font: &FontRef, size: f32) -> f32 {
        (**self).measure(text, font, size)
    }

    fn rasterize(
        &mut self,
        text: &str,
        paint: &TextPaint,
        width: u32,
        height: u32,
        baseline: f32,
    ) -> Option<Bitmap> {
        (**self).rasterize(text, paint, width, height, baseline)
    }
}
