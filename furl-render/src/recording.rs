//! A `Canvas` that records what was drawn instead of rasterizing it.
//!
//! Every op is stored with its position already mapped to device space
//! plus the scale and clip in effect, so callers can assert on where text
//! ends up without a GPU. Hosts without a native text surface also use it
//! as a display list and replay the ops themselves.

use furl_core::{Bitmap, Color, PointF, RectF, TextPaint};
use log::warn;

use crate::canvas::{Canvas, Transform};

/// A single recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        /// Baseline origin as passed to `draw_text`.
        local: PointF,
        /// Baseline origin in device space.
        origin: PointF,
        /// Horizontal scale of the transform at draw time.
        scale: f32,
        paint: TextPaint,
        clip: Option<RectF>,
    },
    Bitmap {
        width: u32,
        height: u32,
        /// Top-left corner in device space.
        origin: PointF,
        scale: f32,
        clip: Option<RectF>,
    },
    Rect {
        rect: RectF,
        color: Color,
    },
}

/// Per-frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub text_draws: u32,
    pub bitmap_draws: u32,
    pub rect_draws: u32,
    /// Deepest save count reached.
    pub max_save_depth: usize,
}

#[derive(Clone, Copy, Debug, Default)]
struct State {
    transform: Transform,
    clip: Option<RectF>,
}

pub struct RecordingCanvas {
    state: State,
    stack: Vec<State>,
    ops: Vec<DrawOp>,
    stats: FrameStats,
    scaled_text: bool,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            state: State::default(),
            stack: Vec::new(),
            ops: Vec::new(),
            stats: FrameStats {
                max_save_depth: 1,
                ..Default::default()
            },
            scaled_text: true,
        }
    }

    /// Declare whether this surface renders scaled text correctly.
    pub fn with_scaled_text(mut self, supported: bool) -> Self {
        self.scaled_text = supported;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    pub fn save_count(&self) -> usize {
        self.stack.len() + 1
    }

    /// Text ops only, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Text { .. }))
    }

    /// Clear ops, stats and the state stack for the next frame.
    pub fn reset(&mut self) {
        self.state = State::default();
        self.stack.clear();
        self.ops.clear();
        self.stats = FrameStats {
            max_save_depth: 1,
            ..Default::default()
        };
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) -> usize {
        let count = self.save_count();
        self.stack.push(self.state);
        self.stats.max_save_depth = self.stats.max_save_depth.max(self.save_count());
        count
    }

    fn restore_to_count(&mut self, count: usize) {
        let target = count.max(1);
        if count == 0 {
            warn!("restore_to_count(0) clamped to 1");
        }
        if target > self.save_count() {
            warn!(
                "restore_to_count({target}) above current save count {}",
                self.save_count()
            );
            return;
        }
        while self.save_count() > target {
            if let Some(state) = self.stack.pop() {
                self.state = state;
            }
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.transform = self.state.transform.pre_translate(dx, dy);
    }

    fn scale(&mut self, sx: f32, sy: f32, px: f32, py: f32) {
        self.state.transform = self.state.transform.pre_scale(sx, sy, px, py);
    }

    fn clip_rect(&mut self, rect: RectF) {
        let device = self.state.transform.map_rect(rect);
        self.state.clip = Some(match self.state.clip {
            Some(clip) => clip.intersect(&device),
            None => device,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &TextPaint) {
        self.stats.text_draws += 1;
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            local: PointF::new(x, y),
            origin: self.state.transform.map_point(x, y),
            scale: self.state.transform.sx,
            paint: paint.clone(),
            clip: self.state.clip,
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32) {
        self.stats.bitmap_draws += 1;
        self.ops.push(DrawOp::Bitmap {
            width: bitmap.width(),
            height: bitmap.height(),
            origin: self.state.transform.map_point(x, y),
            scale: self.state.transform.sx,
            clip: self.state.clip,
        });
    }

    fn draw_rect(&mut self, rect: RectF, color: Color) {
        self.stats.rect_draws += 1;
        self.ops.push(DrawOp::Rect {
            rect: self.state.transform.map_rect(rect),
            color,
        });
    }

    fn can_scale_text(&self) -> bool {
        self.scaled_text
    }
}

// ===================================================================
// Tests
// ===================================================================
