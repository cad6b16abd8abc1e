//! # furl-core
//!
//! Value types shared by every furl crate: geometry, colors and state
//! lists, gravity flags, fonts and paints, easing curves and CPU bitmaps.
//!
//! Nothing in here allocates per frame or talks to a platform; the text
//! backend (`furl-text`), the drawing surface (`furl-render`) and the
//! interpolation engine (`furl-engine`) all build on these types.
//!
//! - **`geometry`**: integer `Rect`, float `RectF`/`PointF`, `lerp`.
//! - **`color`**: packed ARGB `Color`, `ColorSource`, state flags, blending.
//! - **`gravity`**: alignment bitmask and its horizontal/vertical decoding.
//! - **`style`**: `FontRef`, `Shadow`, `TextPaint`.
//! - **`easing`**: interpolation curves for position and size.
//! - **`bitmap`**: RGBA8 pixel buffer used by the texture fallback.

pub mod bitmap;
pub mod color;
pub mod easing;
pub mod geometry;
pub mod gravity;
pub mod style;

pub use bitmap::{Bitmap, Rgba8};
pub use color::{Color, ColorSource, ParseColorError, StateFlag, StateSpec};
pub use easing::Easing;
pub use geometry::{lerp, PointF, Rect, RectF};
pub use gravity::{Gravity, HorizontalAlign, LayoutDirection, VerticalAlign};
pub use style::{FontRef, Shadow, TextPaint};
