//! Text backend on `cosmic-text`.
//!
//! The backend owns a `FontSystem` (font discovery + shaping) and a
//! `SwashCache` (glyph rasterization). Every query shapes a single
//! unbounded line. Widths and metrics are memoized in LRU caches keyed by
//! (text, font, size) because the header engine re-measures the same
//! strings on every ellipsis pass.

use std::num::NonZeroUsize;

use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style as CStyle, SwashCache, Weight,
};
use furl_core::{Bitmap, Color, FontRef, TextPaint};
use log::{debug, warn};
use lru::LruCache;

use crate::backend::{FontMetrics, TextBackend};

/// cosmic-text wants an explicit line height; glyphs are placed against
/// the baseline so any value ≥ the font size works.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Probe string for vertical metrics.
const METRICS_PROBE: &str = "Hg";

/// Ratios used when no face could be found for a font.
const FALLBACK_ASCENT: f32 = 0.8;
const FALLBACK_DESCENT: f32 = 0.2;

const CACHE_CAPACITY: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    font: FontRef,
    size_bits: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MetricsKey {
    font: FontRef,
    size_bits: u32,
}

pub struct CosmicBackend {
    pub font_system: FontSystem,
    pub swash_cache: SwashCache,
    widths: LruCache<MeasureKey, f32>,
    metrics: LruCache<MetricsKey, FontMetrics>,
}

impl Default for CosmicBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmicBackend {
    /// Backend with system font discovery.
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new())
    }

    /// Backend over an existing font system (e.g. one with bundled fonts).
    pub fn with_font_system(font_system: FontSystem) -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            widths: LruCache::new(capacity),
            metrics: LruCache::new(capacity),
        }
    }

    pub fn cached_widths(&self) -> usize {
        self.widths.len()
    }

    /// Shape `text` as one unbounded line.
    fn shape(&mut self, text: &str, font: &FontRef, size: f32) -> Buffer {
        let metrics = Metrics::new(size, size * LINE_HEIGHT_FACTOR);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, attrs_for(font), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    fn face_metrics(&mut self, font: &FontRef, size: f32) -> FontMetrics {
        let buffer = self.shape(METRICS_PROBE, font, size);
        let font_id = buffer
            .layout_runs()
            .flat_map(|run| run.glyphs.iter())
            .map(|glyph| glyph.font_id)
            .next();

        let face = font_id.and_then(|id| self.font_system.get_font(id));
        match face {
            Some(face) => {
                let m = face.as_swash().metrics(&[]);
                let scale = size / m.units_per_em.max(1) as f32;
                FontMetrics::new(-m.ascent.abs() * scale, m.descent.abs() * scale)
            }
            None => {
                warn!(
                    "no face resolved for {:?}; using approximate metrics",
                    font.family
                );
                FontMetrics::new(-size * FALLBACK_ASCENT, size * FALLBACK_DESCENT)
            }
        }
    }
}

impl TextBackend for CosmicBackend {
    fn metrics(&mut self, font: &FontRef, size: f32) -> FontMetrics {
        if size <= 0.0 {
            return FontMetrics::default();
        }
        let key = MetricsKey {
            font: font.clone(),
            size_bits: size.to_bits(),
        };
        if let Some(m) = self.metrics.get(&key) {
            return *m;
        }
        let m = self.face_metrics(font, size);
        self.metrics.put(key, m);
        m
    }

    fn measure(&mut self, text: &str, font: &FontRef, size: f32) -> f32 {
        if text.is_empty() || size <= 0.0 {
            return 0.0;
        }
        let key = MeasureKey {
            text: text.to_owned(),
            font: font.clone(),
            size_bits: size.to_bits(),
        };
        if let Some(w) = self.widths.get(&key) {
            return *w;
        }
        let buffer = self.shape(text, font, size);
        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max);
        self.widths.put(key, width);
        width
    }

    fn rasterize(
        &mut self,
        text: &str,
        paint: &TextPaint,
        width: u32,
        height: u32,
        baseline: f32,
    ) -> Option<Bitmap> {
        if text.is_empty() || width == 0 || height == 0 || paint.size <= 0.0 {
            return None;
        }
        let buffer = self.shape(text, &paint.font, paint.size);
        let mut mask = CoverageMask::new(width, height);
        let mut glyph_count = 0usize;

        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((0.0, 0.0), 1.0);

                let image = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key);
                let image = match image {
                    Some(img) => img,
                    None => continue, // whitespace or missing glyph
                };

                let w = image.placement.width as i32;
                let h = image.placement.height as i32;
                if w == 0 || h == 0 {
                    continue;
                }

                let origin_x = physical.x + image.placement.left;
                let origin_y = baseline.round() as i32 + physical.y - image.placement.top;
                let pixel_count = (w * h) as usize;
                let is_rgba = image.data.len() >= pixel_count * 4;

                for row in 0..h {
                    for col in 0..w {
                        let idx = (row * w + col) as usize;
                        let coverage = if is_rgba {
                            image.data.get(idx * 4 + 3).copied()
                        } else {
                            image.data.get(idx).copied()
                        };
                        if let Some(coverage) = coverage {
                            mask.add(origin_x + col, origin_y + row, coverage);
                        }
                    }
                }
                glyph_count += 1;
            }
        }

        let mut bitmap = Bitmap::new(width, height);
        if paint.shadow.is_visible() {
            mask.blurred(paint.shadow.radius).composite(
                &mut bitmap,
                paint.shadow.color,
                paint.shadow.dx.round() as i32,
                paint.shadow.dy.round() as i32,
            );
        }
        mask.composite(&mut bitmap, paint.color, 0, 0);

        debug!(
            "rasterized {:?} at {}px into {}x{} ({} glyphs)",
            text, paint.size, width, height, glyph_count
        );
        Some(bitmap)
    }
}

/// Per-pixel glyph coverage of one line, composited once for the shadow
/// and once for the text.
#[derive(Clone, Debug, PartialEq)]
struct CoverageMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageMask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn get(&self, x: i32, y: i32) -> u8 {
        self.index(x, y)
            .and_then(|idx| self.data.get(idx).copied())
            .unwrap_or(0)
    }

    /// Overlapping glyphs keep the stronger coverage.
    fn add(&mut self, x: i32, y: i32, coverage: u8) {
        if let Some(cell) = self.index(x, y).and_then(|idx| self.data.get_mut(idx)) {
            *cell = (*cell).max(coverage);
        }
    }

    /// Separable box blur; coverage past the edges is dropped.
    fn blurred(&self, radius: f32) -> CoverageMask {
        let r = if radius.is_finite() {
            radius.round().clamp(0.0, 64.0) as i32
        } else {
            0
        };
        if r == 0 {
            return self.clone();
        }
        let taps = (2 * r + 1) as u32;
        let mut horizontal = CoverageMask::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let sum: u32 = (x - r..=x + r).map(|sx| self.get(sx, y) as u32).sum();
                horizontal.add(x, y, (sum / taps) as u8);
            }
        }
        let mut out = CoverageMask::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let sum: u32 = (y - r..=y + r).map(|sy| horizontal.get(x, sy) as u32).sum();
                out.add(x, y, (sum / taps) as u8);
            }
        }
        out
    }

    /// Blend `color` over `bitmap` with this mask shifted by (dx, dy).
    fn composite(&self, bitmap: &mut Bitmap, color: Color, dx: i32, dy: i32) {
        for y in 0..bitmap.height() as i32 {
            for x in 0..bitmap.width() as i32 {
                let coverage = self.get(x - dx, y - dy);
                if coverage > 0 {
                    bitmap.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }
}

/// Map a `FontRef` to cosmic-text attributes.
///
/// CSS-style chains use their first family; cosmic-text's own fallback
/// covers missing glyphs.
fn attrs_for(font: &FontRef) -> Attrs<'_> {
    let first = font
        .family
        .split(',')
        .next()
        .unwrap_or(&font.family)
        .trim()
        .trim_matches('"')
        .trim_matches('\'');
    let family = match first {
        "" | "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        concrete => Family::Name(concrete),
    };
    let style = if font.italic {
        CStyle::Italic
    } else {
        CStyle::Normal
    };
    Attrs::new().family(family).weight(Weight(font.weight)).style(style)
}

// ===================================================================
// Tests
// ===================================================================
