//! # furl-engine
//!
//! Collapsing title/subtitle header text.
//!
//! A `CollapsingTextEngine` holds two text slots, each configured with an
//! expanded and a collapsed style, and two bounds rectangles. For any
//! expansion fraction in [0, 1] it works out where each line's baseline
//! sits, which size the paint uses and how much the canvas scales it, the
//! ellipsized text, and the blended color and shadow. `draw` replays that
//! onto any `furl_render::Canvas`.
//!
//! ## Crate modules
//!
//! - [`engine`]: `CollapsingTextEngine` with its mutators, layout passes, drawing
//! - [`layout`]: pure baseline/anchor/size math
//! - [`slot`]: `SlotId`, `Endpoint`, `SlotStyle`, `SlotFrame`
//! - [`texture`]: bitmap fallback for canvases that cannot scale text
//! - [`font_request`]: cancellation tokens for async typeface loads
//! - [`host`]: the `HostView` the engine repaints through
//! - [`config`]: `EngineConfig`

pub mod config;
pub mod engine;
pub mod font_request;
pub mod host;
pub mod layout;
pub mod slot;
pub mod texture;

pub use config::EngineConfig;
pub use engine::CollapsingTextEngine;
pub use font_request::{FontRequest, FontRequests};
pub use host::{HostView, StaticHost};
pub use layout::{LineMetrics, SizeChoice};
pub use slot::{Endpoint, SlotFrame, SlotId, SlotStyle, DEFAULT_FONT_SIZE};
pub use texture::{Texture, TextureFallbackCache};
