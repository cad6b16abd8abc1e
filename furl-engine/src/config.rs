use serde::{Deserialize, Serialize};

/// Runtime switches for a `CollapsingTextEngine`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Outline the interpolated bounds on every draw. Only honored when the
    /// crate is built with the `debug-draw` feature.
    pub debug_bounds: bool,
}

#[cfg(feature = "debug-draw")]
pub(crate) mod debug {
    use std::sync::OnceLock;

    use furl_core::Color;

    /// Paint for the bounds overlay.
    #[derive(Debug)]
    pub(crate) struct DebugPaint {
        pub fill: Color,
    }

    pub(crate) fn debug_paint() -> &'static DebugPaint {
        static PAINT: OnceLock<DebugPaint> = OnceLock::new();
        PAINT.get_or_init(|| {
            log::debug!("building debug bounds paint");
            DebugPaint {
                fill: Color::argb(0x40, 0xFF, 0x00, 0xFF),
            }
        })
    }
}
