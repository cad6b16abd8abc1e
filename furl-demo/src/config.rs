//! Demo configuration: one header described in JSON.
//!
//! Every field has a default, so `{}` is a valid config and a file only
//! needs the fields it changes.

use std::fs;
use std::path::Path;

use furl_core::{Color, ColorSource, Easing, Gravity, LayoutDirection, Rect, Shadow};
use furl_engine::EngineConfig;
use furl_text::FontStyle;
use serde::{Deserialize, Serialize};

use crate::DemoError;

/// Where text metrics come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsSource {
    /// cosmic-text shaping with families resolved against installed fonts.
    #[default]
    System,
    /// Fixed-ratio metrics; no font lookup.
    Fixed,
}

/// Style of one line at one end of the morph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub font_size: f32,
    /// CSS-style family chain, e.g. `"Inter, Roboto, sans-serif"`.
    pub family: String,
    pub weight: u16,
    pub italic: bool,
    pub color: ColorSource,
    pub shadow: Shadow,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            font_size: furl_engine::DEFAULT_FONT_SIZE,
            family: "sans-serif".into(),
            weight: 400,
            italic: false,
            color: ColorSource::Fixed(Color::BLACK),
            shadow: Shadow::NONE,
        }
    }
}

impl LineStyle {
    fn sized(font_size: f32, weight: u16, color: Color) -> Self {
        Self {
            font_size,
            weight,
            color: ColorSource::Fixed(color),
            ..Default::default()
        }
    }

    pub fn font_style(&self) -> FontStyle {
        if self.italic {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        }
    }
}

/// Expanded and collapsed styles of one line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub text: Option<String>,
    pub expanded: LineStyle,
    pub collapsed: LineStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub host_width: i32,
    pub host_height: i32,
    pub direction: LayoutDirection,

    pub expanded_bounds: Rect,
    pub collapsed_bounds: Rect,
    pub expanded_gravity: Gravity,
    pub collapsed_gravity: Gravity,

    pub title: LineConfig,
    pub subtitle: LineConfig,

    pub position_easing: Option<Easing>,
    pub size_easing: Option<Easing>,

    /// Frames in one expanded → collapsed sweep (at least 2).
    pub frames: u32,
    pub metrics: MetricsSource,
    /// `false` simulates a surface that needs the bitmap fallback.
    pub scaled_text: bool,
    pub engine: EngineConfig,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            host_width: 360,
            host_height: 160,
            direction: LayoutDirection::Ltr,
            expanded_bounds: Rect::new(16, 0, 344, 144),
            collapsed_bounds: Rect::new(72, 0, 344, 56),
            expanded_gravity: Gravity::START | Gravity::BOTTOM,
            collapsed_gravity: Gravity::START | Gravity::CENTER_VERTICAL,
            title: LineConfig {
                text: Some("Collapsing header".into()),
                expanded: LineStyle::sized(34.0, 400, Color::WHITE),
                collapsed: LineStyle::sized(20.0, 500, Color::WHITE),
            },
            subtitle: LineConfig {
                text: Some("Scroll to collapse".into()),
                expanded: LineStyle::sized(18.0, 400, Color::argb(0xB3, 0xFF, 0xFF, 0xFF)),
                collapsed: LineStyle::sized(14.0, 400, Color::argb(0xB3, 0xFF, 0xFF, 0xFF)),
            },
            position_easing: Some(Easing::FastOutSlowIn),
            size_easing: None,
            frames: 11,
            metrics: MetricsSource::System,
            scaled_text: true,
            engine: EngineConfig::default(),
        }
    }
}

impl HeaderConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DemoError> {
        let raw = fs::read_to_string(path)?;
        let config: HeaderConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DemoError> {
        if self.frames < 2 {
            return Err(DemoError::InvalidConfig(format!(
                "frames must be at least 2, got {}",
                self.frames
            )));
        }
        if self.host_width < 0 || self.host_height < 0 {
            return Err(DemoError::InvalidConfig(format!(
                "negative host size {}x{}",
                self.host_width, self.host_height
            )));
        }
        Ok(())
    }

    pub fn line(&self, slot: furl_engine::SlotId) -> &LineConfig {
        match slot {
            furl_engine::SlotId::Title => &self.title,
            furl_engine::SlotId::Subtitle => &self.subtitle,
        }
    }
}
