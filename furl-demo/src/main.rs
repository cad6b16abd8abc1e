//! furl demo: sweeps a collapsing header from expanded to collapsed.
//!
//! Reads a `HeaderConfig` JSON file (or uses the built-in header when no
//! path is given), resolves its typefaces against the installed fonts,
//! draws every frame onto a `RecordingCanvas` and logs where each line
//! lands. Run with `RUST_LOG=info` to see the frames.
//!
//! ```text
//! furl-demo [config.json]
//! ```

mod config;
mod state;

use furl_text::FontError;
use log::info;
use thiserror::Error;

use config::HeaderConfig;
use state::DemoState;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("font resolution failed: {0}")]
    Font(#[from] FontError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

fn main() -> Result<(), DemoError> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading header config from {path}");
            HeaderConfig::load(&path)?
        }
        None => {
            info!("No config given, using the built-in header");
            HeaderConfig::default()
        }
    };

    let mut state = DemoState::new(&config)?;
    let summary = state.sweep(config.frames);
    info!("Done: {} frames drawn", summary.frames);
    Ok(())
}
