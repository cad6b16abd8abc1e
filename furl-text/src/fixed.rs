//! Deterministic backend: every character advances by a fixed fraction of
//! the font size and ascent/descent are fixed ratios of the size.
//!
//! Bold faces (weight ≥ 600) advance 20% wider so typeface switches are
//! observable. Rasterization fills the whole bitmap with the paint color.

use furl_core::{Bitmap, FontRef, TextPaint};

use crate::backend::{FontMetrics, TextBackend};

#[derive(Clone, Debug)]
pub struct FixedMetricsBackend {
    /// Advance per character as a fraction of the font size.
    pub advance: f32,
    /// Ascent as a (positive) fraction of the font size.
    pub ascent: f32,
    /// Descent as a fraction of the font size.
    pub descent: f32,
    measure_calls: usize,
    rasterize_calls: usize,
}

impl Default for FixedMetricsBackend {
    fn default() -> Self {
        Self::new(0.5, 0.75, 0.25)
    }
}

impl FixedMetricsBackend {
    pub fn new(advance: f32, ascent: f32, descent: f32) -> Self {
        Self {
            advance,
            ascent,
            descent,
            measure_calls: 0,
            rasterize_calls: 0,
        }
    }

    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    pub fn rasterize_calls(&self) -> usize {
        self.rasterize_calls
    }

    fn advance_for(&self, font: &FontRef) -> f32 {
        if font.is_bold() {
            self.advance * 1.2
        } else {
            self.advance
        }
    }
}

impl TextBackend for FixedMetricsBackend {
    fn metrics(&mut self, _font: &FontRef, size: f32) -> FontMetrics {
        if size <= 0.0 {
            return FontMetrics::default();
        }
        FontMetrics::new(-size * self.ascent, size * self.descent)
    }

    fn measure(&mut self, text: &str, font: &FontRef, size: f32) -> f32 {
        self.measure_calls += 1;
        if size <= 0.0 {
            return 0.0;
        }
        text.chars().count() as f32 * size * self.advance_for(font)
    }

    fn rasterize(
        &mut self,
        text: &str,
        paint: &TextPaint,
        width: u32,
        height: u32,
        _baseline: f32,
    ) -> Option<Bitmap> {
        if text.is_empty() || width == 0 || height == 0 {
            return None;
        }
        self.rasterize_calls += 1;
        let mut bitmap = Bitmap::new(width, height);
        bitmap.fill(paint.color);
        Some(bitmap)
    }
}

// ===================================================================
// Tests
// ===================================================================
