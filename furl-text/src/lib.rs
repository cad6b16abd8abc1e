//! # furl-text
//!
//! Text measurement, ellipsis and rasterization for the furl header
//! engine, plus system typeface resolution.
//!
//! ## Architecture
//!
//! ```text
//! TextBackend (trait)
//!     ├── CosmicBackend        cosmic-text FontSystem + SwashCache, LRU width cache
//!     └── FixedMetricsBackend  deterministic metrics for tests and benches
//!     │
//!     ▼
//! ellipsize(text, font, size, available_width) ──► display text
//!
//! FontRegistry (font-kit) ── resolve("Inter, sans-serif") ──► FontRef | FontError
//! ```
//!
//! - **`backend`**: the `TextBackend` seam and `FontMetrics`.
//! - **`cosmic`**: production backend on `cosmic-text`.
//! - **`fixed`**: fixed-ratio metrics.
//! - **`ellipsis`**: end truncation against an available width.
//! - **`direction`**: first-strong text direction.
//! - **`fonts`**: system font discovery and CSS-style matching.

pub mod backend;
pub mod cosmic;
pub mod direction;
pub mod ellipsis;
pub mod fixed;
pub mod fonts;

pub use backend::{FontMetrics, TextBackend};
pub use cosmic::CosmicBackend;
pub use direction::text_direction;
pub use ellipsis::{ellipsize, ELLIPSIS};
pub use fixed::FixedMetricsBackend;
pub use fonts::{FontError, FontFace, FontRegistry, FontStyle};
