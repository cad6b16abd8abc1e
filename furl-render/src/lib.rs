//! # furl-render
//!
//! The drawing-context seam between the header engine and whatever
//! actually puts pixels on screen.
//!
//! ## Architecture
//!
//! ```text
//!  CollapsingTextEngine::draw(&mut dyn Canvas)
//!       │  save / scale(sx, sy, px, py) / draw_text / draw_bitmap / restore
//!       ▼
//!  Canvas (trait)  ◀─── platform backends implement this
//!       │
//!       └── RecordingCanvas   display list in device space + FrameStats
//! ```
//!
//! - [`canvas`]: the `Canvas` trait and the affine `Transform` it tracks.
//! - [`recording`]: `RecordingCanvas`, `DrawOp`, `FrameStats`.

pub mod canvas;
pub mod recording;

pub use canvas::{Canvas, Transform};
pub use recording::{DrawOp, FrameStats, RecordingCanvas};
