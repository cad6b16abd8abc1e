use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::lerp;

/// Reference to a typeface: family (or CSS-style fallback chain), weight
/// and slant.
///
/// The default, `sans-serif` 400 upright, is what a slot falls back to
/// when no typeface was configured.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRef {
    pub family: String,
    #[serde(default = "default_weight")]
    pub weight: u16,
    #[serde(default)]
    pub italic: bool,
}

fn default_weight() -> u16 {
    400
}

impl Default for FontRef {
    fn default() -> Self {
        Self {
            family: String::from("sans-serif"),
            weight: 400,
            italic: false,
        }
    }
}

impl FontRef {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

/// Drop shadow behind a line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: Color,
}

impl Shadow {
    pub const NONE: Shadow = Shadow {
        radius: 0.0,
        dx: 0.0,
        dy: 0.0,
        color: Color::TRANSPARENT,
    };

    pub fn new(radius: f32, dx: f32, dy: f32, color: Color) -> Self {
        Self { radius, dx, dy, color }
    }

    /// Geometry interpolates linearly, color blends per channel.
    pub fn lerp(expanded: &Shadow, collapsed: &Shadow, t: f32) -> Shadow {
        Shadow {
            radius: lerp(expanded.radius, collapsed.radius, t),
            dx: lerp(expanded.dx, collapsed.dx, t),
            dy: lerp(expanded.dy, collapsed.dy, t),
            color: Color::blend(expanded.color, collapsed.color, t),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.radius > 0.0 && self.color.alpha() > 0
    }
}

/// Everything needed to draw one line of text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextPaint {
    pub font: FontRef,
    /// Font size in device pixels.
    pub size: f32,
    pub color: Color,
    pub shadow: Shadow,
}

// ===================================================================
// Tests
// ===================================================================
