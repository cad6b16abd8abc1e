use furl_core::{Color, ColorSource, FontRef, PointF, Shadow};
use serde::{Deserialize, Serialize};

/// Default font size in device pixels for both endpoints.
pub const DEFAULT_FONT_SIZE: f32 = 15.0;

/// One of the two text lines a header draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Title,
    Subtitle,
}

impl SlotId {
    /// Draw order.
    pub const ALL: [SlotId; 2] = [SlotId::Title, SlotId::Subtitle];

    pub fn index(self) -> usize {
        match self {
            SlotId::Title => 0,
            SlotId::Subtitle => 1,
        }
    }
}

/// The expanded (fraction 0) or collapsed (fraction 1) end of the morph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Expanded,
    Collapsed,
}

impl Endpoint {
    pub const ALL: [Endpoint; 2] = [Endpoint::Expanded, Endpoint::Collapsed];

    pub fn index(self) -> usize {
        match self {
            Endpoint::Expanded => 0,
            Endpoint::Collapsed => 1,
        }
    }
}

/// Styling of one slot at one endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotStyle {
    pub font_size: f32,
    pub typeface: FontRef,
    pub color: ColorSource,
    pub shadow: Shadow,
}

impl Default for SlotStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            typeface: FontRef::default(),
            color: ColorSource::default(),
            shadow: Shadow::NONE,
        }
    }
}

/// Ellipsis inputs from the last pass; a slot is only re-ellipsized when
/// these change.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EllipsisKey {
    pub size_bits: u32,
    pub typeface: FontRef,
    pub available_bits: u32,
}

/// Per-slot state: configuration plus everything derived from it.
#[derive(Clone, Debug, Default)]
pub(crate) struct TextSlot {
    pub raw_text: Option<String>,
    pub display_text: Option<String>,
    pub styles: [SlotStyle; 2],

    // Base offsets
    pub anchors: [PointF; 2],
    pub widths: [f32; 2],

    // Current offsets
    pub font_size: f32,
    pub typeface: FontRef,
    pub scale: f32,
    pub draw_x: f32,
    pub draw_y: f32,
    pub color: Color,
    pub shadow: Shadow,
    pub available_width: f32,

    pub ellipsis_key: Option<EllipsisKey>,
}

impl TextSlot {
    pub fn new() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            scale: 1.0,
            color: Color::BLACK,
            ..Default::default()
        }
    }

    pub fn style(&self, endpoint: Endpoint) -> &SlotStyle {
        &self.styles[endpoint.index()]
    }

    pub fn style_mut(&mut self, endpoint: Endpoint) -> &mut SlotStyle {
        &mut self.styles[endpoint.index()]
    }

    pub fn has_text(&self) -> bool {
        self.raw_text.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn frame(&self) -> SlotFrame {
        SlotFrame {
            display_text: self.display_text.clone(),
            draw_x: self.draw_x,
            draw_y: self.draw_y,
            font_size: self.font_size,
            scale: self.scale,
            color: self.color,
            shadow: self.shadow,
            expanded_anchor: self.anchors[Endpoint::Expanded.index()],
            collapsed_anchor: self.anchors[Endpoint::Collapsed.index()],
            available_width: self.available_width,
        }
    }
}

/// Snapshot of where and how a slot draws at the current fraction.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotFrame {
    /// Ellipsized text, `None` when the slot has no text.
    pub display_text: Option<String>,
    pub draw_x: f32,
    /// Baseline.
    pub draw_y: f32,
    /// Size the paint is set to (one of the two endpoint sizes).
    pub font_size: f32,
    /// Canvas scale applied around (`draw_x`, `draw_y`).
    pub scale: f32,
    pub color: Color,
    pub shadow: Shadow,
    pub expanded_anchor: PointF,
    pub collapsed_anchor: PointF,
    pub available_width: f32,
}

impl SlotFrame {
    /// Apparent font size on screen.
    pub fn effective_size(&self) -> f32 {
        self.font_size * self.scale
    }
}
