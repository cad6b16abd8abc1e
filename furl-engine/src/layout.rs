//! Pure placement math: baselines, horizontal anchors and the size rule.
//!
//! Every function here is a function of its arguments only; the engine
//! feeds them measured metrics and stores the results.

use furl_core::{HorizontalAlign, Rect, VerticalAlign};

use crate::slot::Endpoint;

/// Two sizes closer than this are treated as equal.
pub const SIZE_EPSILON: f32 = 0.001;

#[inline]
pub fn is_close(a: f32, b: f32) -> bool {
    (a - b).abs() < SIZE_EPSILON
}

/// Vertical metrics and width of one measured line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Negative: distance above the baseline.
    pub ascent: f32,
    pub descent: f32,
    pub width: f32,
}

impl LineMetrics {
    pub fn new(ascent: f32, descent: f32, width: f32) -> Self {
        Self { ascent, descent, width }
    }

    pub fn height(&self) -> f32 {
        self.descent - self.ascent
    }
}

/// Left edge of a line of `width` inside `bounds`.
pub fn horizontal_anchor(bounds: &Rect, align: HorizontalAlign, width: f32) -> f32 {
    match align {
        HorizontalAlign::Left => bounds.left as f32,
        HorizontalAlign::Right => bounds.right as f32 - width,
        HorizontalAlign::Center => bounds.center_x() - width / 2.0,
    }
}

/// Baseline of a lone line inside `bounds`.
pub fn single_line_baseline(bounds: &Rect, align: VerticalAlign, line: &LineMetrics) -> f32 {
    match align {
        VerticalAlign::Top => bounds.top as f32 - line.ascent,
        VerticalAlign::Bottom => bounds.bottom as f32 + line.ascent,
        VerticalAlign::Center => {
            bounds.center_y() + line.height() / 2.0 - line.descent
        }
    }
}

/// Collapsed title/subtitle baselines.
///
/// The free vertical space is split into three equal gaps: above the
/// title, between the lines, and below the subtitle.
pub fn collapsed_pair_baselines(
    bounds: &Rect,
    title: &LineMetrics,
    subtitle: &LineMetrics,
) -> (f32, f32) {
    let top = bounds.top as f32;
    let offset = (bounds.height() as f32 - (title.height() + subtitle.height())) / 3.0;
    let title_y = top + offset - title.ascent;
    let subtitle_y = top + 2.0 * offset + title.height() - subtitle.ascent;
    (title_y, subtitle_y)
}

/// Expanded title/subtitle baselines: the two lines stacked with no gap,
/// the block placed by vertical gravity.
pub fn expanded_pair_baselines(
    bounds: &Rect,
    align: VerticalAlign,
    title: &LineMetrics,
    subtitle: &LineMetrics,
) -> (f32, f32) {
    match align {
        VerticalAlign::Top => {
            let top = bounds.top as f32;
            (top - title.ascent, top + title.height() - subtitle.ascent)
        }
        VerticalAlign::Center => {
            let block_top = bounds.center_y() - (title.height() + subtitle.height()) / 2.0;
            (
                block_top - title.ascent,
                block_top + title.height() - subtitle.ascent,
            )
        }
        VerticalAlign::Bottom => {
            let subtitle_y = bounds.bottom as f32 - subtitle.descent;
            let title_y = subtitle_y + subtitle.ascent - title.descent;
            (title_y, subtitle_y)
        }
    }
}

/// Width the expanded-size paint may fill while the header is animating.
///
/// Text drawn at the expanded size and scaled down must still fit the
/// collapsed bounds once scaled, so the width is capped at
/// `collapsed_width / ratio` when the scaled-down expanded width would
/// overflow them.
pub fn available_width(
    expanded_width: f32,
    collapsed_width: f32,
    expanded_size: f32,
    collapsed_size: f32,
) -> f32 {
    let ratio = collapsed_size / expanded_size;
    if !ratio.is_finite() || ratio <= 0.0 {
        return expanded_width;
    }
    let scaled_down = expanded_width * ratio;
    if scaled_down > collapsed_width {
        (collapsed_width / ratio).min(expanded_width)
    } else {
        expanded_width
    }
}

/// Outcome of the size rule for one interpolated size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeChoice {
    /// Whose size and typeface the paint uses.
    pub paint_endpoint: Endpoint,
    pub paint_size: f32,
    pub scale: f32,
    pub available_width: f32,
}

/// Decide paint size, scale and available width for `size`.
///
/// Close to the collapsed size the paint switches to the collapsed size
/// and typeface; everywhere else text is laid out at the expanded size and
/// scaled on the canvas.
pub fn choose_size(
    size: f32,
    expanded_size: f32,
    collapsed_size: f32,
    expanded_width: f32,
    collapsed_width: f32,
) -> SizeChoice {
    if is_close(size, collapsed_size) {
        return SizeChoice {
            paint_endpoint: Endpoint::Collapsed,
            paint_size: collapsed_size,
            scale: 1.0,
            available_width: collapsed_width,
        };
    }
    let scale = if is_close(size, expanded_size) || expanded_size == 0.0 {
        1.0
    } else {
        size / expanded_size
    };
    SizeChoice {
        paint_endpoint: Endpoint::Expanded,
        paint_size: expanded_size,
        scale,
        available_width: available_width(
            expanded_width,
            collapsed_width,
            expanded_size,
            collapsed_size,
        ),
    }
}

// ===================================================================
// Tests
// ===================================================================
