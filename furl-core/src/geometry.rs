use serde::{Deserialize, Serialize};

/// Linear interpolation between `start` and `end`, exact at `t == 0` and
/// `t == 1`.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// A point in float device pixels.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in integer device pixels (host view coordinates).
///
/// Edges are stored as-is; a rectangle with `right <= left` or
/// `bottom <= top` is empty but still valid.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Saturates instead of overflowing on extreme edges.
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// `true` if the rectangle has no positive area.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn center_x(&self) -> f32 {
        (self.left as f32 + self.right as f32) * 0.5
    }

    pub fn center_y(&self) -> f32 {
        (self.top as f32 + self.bottom as f32) * 0.5
    }

    pub fn to_f32(self) -> RectF {
        RectF {
            left: self.left as f32,
            top: self.top as f32,
            right: self.right as f32,
            bottom: self.bottom as f32,
        }
    }
}

/// Axis-aligned rectangle in float device pixels.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Edge-wise interpolation from `start` to `end`.
    pub fn lerp(start: &RectF, end: &RectF, t: f32) -> RectF {
        RectF {
            left: lerp(start.left, end.left, t),
            top: lerp(start.top, end.top, t),
            right: lerp(start.right, end.right, t),
            bottom: lerp(start.bottom, end.bottom, t),
        }
    }

    /// Intersection of two rectangles, empty (zero-sized at `self`'s
    /// origin) when they do not overlap.
    pub fn intersect(&self, other: &RectF) -> RectF {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        RectF { left, top, right, bottom }
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(10.0, 30.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 30.0, 1.0), 30.0);
        assert_eq!(lerp(10.0, 30.0, 0.5), 20.0);
    }

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10, 20, 110, 70);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 50);
        assert_eq!(r.center_x(), 60.0);
        assert_eq!(r.center_y(), 45.0);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_rect_extreme_edges_saturate() {
        let r = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(r.width(), i32::MAX);
        assert_eq!(r.height(), i32::MAX);
        assert!(!r.is_empty());
        let inverted = Rect::new(i32::MAX, 0, i32::MIN, 10);
        assert_eq!(inverted.width(), i32::MIN);
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_rect_degenerate_is_empty() {
        assert!(Rect::new(0, 0, 0, 40).is_empty());
        assert!(Rect::new(0, 0, 200, 0).is_empty());
        assert!(Rect::new(50, 0, 10, 40).is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn test_rectf_lerp() {
        let a = RectF::new(0.0, 0.0, 100.0, 100.0);
        let b = RectF::new(10.0, 20.0, 50.0, 40.0);
        let mid = RectF::lerp(&a, &b, 0.5);
        assert_eq!(mid, RectF::new(5.0, 10.0, 75.0, 70.0));
        assert_eq!(RectF::lerp(&a, &b, 1.0), b);
    }

    #[test]
    fn test_rectf_intersect_disjoint() {
        let a = RectF::new(0.0, 0.0, 10.0, 10.0);
        let b = RectF::new(20.0, 20.0, 30.0, 30.0);
        assert!(a.intersect(&b).is_empty());
        let c = RectF::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersect(&c), RectF::new(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_rect_serde() {
        let r = Rect::new(1, 2, 3, 4);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"left":1,"top":2,"right":3,"bottom":4}"#);
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
