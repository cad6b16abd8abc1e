use furl_core::{Bitmap, Color, PointF, RectF, TextPaint};

/// A 2D drawing context.
///
/// Text is positioned by its **baseline**: `draw_text(.., x, y, ..)` puts
/// the baseline at `y`, so glyphs extend from `y + ascent` (ascent is
/// negative) to `y + descent`. Bitmaps are positioned by their top-left
/// corner.
///
/// State (transform and clip) is a stack: `save` pushes and returns the
/// depth to hand back to `restore_to_count`.
pub trait Canvas {
    /// Push the current state. Returns the save count before the push.
    fn save(&mut self) -> usize;

    /// Pop states until the save count equals `count` (minimum 1).
    fn restore_to_count(&mut self, count: usize);

    fn translate(&mut self, dx: f32, dy: f32);

    /// Scale by (`sx`, `sy`) around the pivot (`px`, `py`).
    fn scale(&mut self, sx: f32, sy: f32, px: f32, py: f32);

    /// Intersect the clip with `rect` (in current coordinates).
    fn clip_rect(&mut self, rect: RectF);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &TextPaint);

    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32);

    /// Outline or fill used for debug overlays.
    fn draw_rect(&mut self, rect: RectF, color: Color);

    /// Whether text drawn under a scale transform renders correctly.
    ///
    /// Surfaces that return `false` get pre-rasterized bitmaps instead of
    /// scaled live text.
    fn can_scale_text(&self) -> bool {
        true
    }
}

/// Axis-aligned affine transform: scale then translate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub sx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        sx: 1.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn map_point(&self, x: f32, y: f32) -> PointF {
        PointF::new(self.sx * x + self.tx, self.sy * y + self.ty)
    }

    pub fn map_rect(&self, r: RectF) -> RectF {
        let a = self.map_point(r.left, r.top);
        let b = self.map_point(r.right, r.bottom);
        RectF::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// `self` followed-by-local `translate`.
    pub fn pre_translate(&self, dx: f32, dy: f32) -> Transform {
        Transform {
            tx: self.tx + self.sx * dx,
            ty: self.ty + self.sy * dy,
            ..*self
        }
    }

    /// `self` composed with a local scale about (`px`, `py`).
    pub fn pre_scale(&self, sx: f32, sy: f32, px: f32, py: f32) -> Transform {
        Transform {
            sx: self.sx * sx,
            sy: self.sy * sy,
            tx: self.tx + self.sx * px * (1.0 - sx),
            ty: self.ty + self.sy * py * (1.0 - sy),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

// ===================================================================
// Tests
// ===================================================================
