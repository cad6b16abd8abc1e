//! CPU-side RGBA8 bitmap.
//!
//! Holds pre-rasterized text for the texture fallback. Pixels are plain
//! `#[repr(C)]` structs so the buffer casts to bytes with `bytemuck` for
//! upload or dumping.

use bytemuck::{Pod, Zeroable};

use crate::color::Color;

/// One straight-alpha RGBA pixel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color> for Rgba8 {
    fn from(c: Color) -> Self {
        Self {
            r: c.red(),
            g: c.green(),
            b: c.blue(),
            a: c.alpha(),
        }
    }
}

/// Immutable-once-built pixel buffer, `width * height` pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes (4 per pixel).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(Rgba8::from(color));
    }

    /// Composite `color` at `coverage` (0–255) over the pixel at (x, y).
    ///
    /// Out-of-range coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        let Some(dst) = self.pixels.get_mut(idx) else {
            return;
        };

        let src_a = color.alpha() as u32 * coverage as u32 / 255;
        if src_a == 0 {
            return;
        }
        let dst_a = dst.a as u32;
        let out_a = src_a + dst_a * (255 - src_a) / 255;
        if out_a == 0 {
            return;
        }
        let mix = |s: u8, d: u8| {
            let s = s as u32 * src_a;
            let d = d as u32 * dst_a * (255 - src_a) / 255;
            ((s + d) / out_a) as u8
        };
        *dst = Rgba8 {
            r: mix(color.red(), dst.r),
            g: mix(color.green(), dst.g),
            b: mix(color.blue(), dst.b),
            a: out_a as u8,
        };
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_creation() {
        let bmp = Bitmap::new(4, 3);
        assert_eq!(bmp.width(), 4);
        assert_eq!(bmp.height(), 3);
        assert_eq!(bmp.pixels().len(), 12);
        assert_eq!(bmp.as_bytes().len(), 48);
        assert_eq!(bmp.covered_pixels(), 0);
    }

    #[test]
    fn test_fill_and_bytes() {
        let mut bmp = Bitmap::new(2, 1);
        bmp.fill(Color::argb(0x80, 0x10, 0x20, 0x30));
        assert_eq!(bmp.as_bytes(), &[0x10, 0x20, 0x30, 0x80, 0x10, 0x20, 0x30, 0x80]);
    }

    #[test]
    fn test_blend_full_coverage_replaces() {
        let mut bmp = Bitmap::new(2, 2);
        bmp.blend_pixel(1, 1, Color::rgb(255, 0, 0), 255);
        assert_eq!(bmp.pixel(1, 1), Some(Rgba8 { r: 255, g: 0, b: 0, a: 255 }));
        assert_eq!(bmp.pixel(0, 0), Some(Rgba8::default()));
        assert_eq!(bmp.covered_pixels(), 1);
    }

    #[test]
    fn test_blend_partial_coverage() {
        let mut bmp = Bitmap::new(1, 1);
        bmp.blend_pixel(0, 0, Color::WHITE, 128);
        let p = bmp.pixel(0, 0).unwrap();
        assert_eq!(p.a, 128);
        assert_eq!(p.r, 255);
    }

    #[test]
    fn test_blend_out_of_bounds_ignored() {
        let mut bmp = Bitmap::new(2, 2);
        bmp.blend_pixel(-1, 0, Color::WHITE, 255);
        bmp.blend_pixel(0, 2, Color::WHITE, 255);
        assert_eq!(bmp.covered_pixels(), 0);
        assert_eq!(bmp.pixel(5, 5), None);
    }
}
