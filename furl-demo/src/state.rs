//! Demo state: the host, the engine and the canvas a sweep draws into.

use std::rc::Rc;

use furl_core::FontRef;
use furl_engine::{CollapsingTextEngine, Endpoint, SlotId, StaticHost};
use furl_render::{DrawOp, FrameStats, RecordingCanvas};
use furl_text::{CosmicBackend, FixedMetricsBackend, FontRegistry, TextBackend};
use log::{debug, info};

use crate::config::{HeaderConfig, LineStyle, MetricsSource};
use crate::DemoError;

/// Totals over one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub frames: u32,
    pub text_draws: u32,
    pub bitmap_draws: u32,
    pub rect_draws: u32,
}

pub struct DemoState {
    pub host: Rc<StaticHost>,
    pub engine: CollapsingTextEngine<Box<dyn TextBackend>>,
    pub canvas: RecordingCanvas,
}

impl DemoState {
    pub fn new(config: &HeaderConfig) -> Result<Self, DemoError> {
        let registry = match config.metrics {
            MetricsSource::System => Some(FontRegistry::discover()),
            MetricsSource::Fixed => None,
        };
        Self::with_registry(config, registry.as_ref())
    }

    /// Build against an explicit registry; `None` maps family chains to
    /// `FontRef`s verbatim.
    pub fn with_registry(
        config: &HeaderConfig,
        registry: Option<&FontRegistry>,
    ) -> Result<Self, DemoError> {
        let host = Rc::new(
            StaticHost::new(config.host_width, config.host_height)
                .with_direction(config.direction),
        );
        let backend: Box<dyn TextBackend> = match config.metrics {
            MetricsSource::System => Box::new(CosmicBackend::new()),
            MetricsSource::Fixed => Box::new(FixedMetricsBackend::default()),
        };

        let mut engine = CollapsingTextEngine::with_config(&host, backend, config.engine);
        engine.set_expanded_bounds(config.expanded_bounds);
        engine.set_collapsed_bounds(config.collapsed_bounds);
        engine.set_gravity(Endpoint::Expanded, config.expanded_gravity);
        engine.set_gravity(Endpoint::Collapsed, config.collapsed_gravity);
        engine.set_position_easing(config.position_easing);
        engine.set_size_easing(config.size_easing);

        // Typefaces arrive the way an async loader would deliver them:
        // tokens first, results afterwards.
        let mut pending = Vec::new();
        for slot in SlotId::ALL {
            let line = config.line(slot);
            engine.set_text(slot, line.text.as_deref());
            for endpoint in Endpoint::ALL {
                let style = style_for(&line.expanded, &line.collapsed, endpoint);
                engine.set_font_size(slot, endpoint, style.font_size);
                engine.set_color(slot, endpoint, style.color.clone());
                engine.set_shadow(slot, endpoint, style.shadow);
                pending.push((engine.request_font(slot, endpoint), style));
            }
        }
        for (request, style) in pending {
            let font = match registry {
                Some(registry) => registry.resolve(&style.family, style.weight, style.font_style())?,
                None => FontRef::new(style.family.as_str())
                    .with_weight(style.weight)
                    .with_italic(style.italic),
            };
            debug!("{:?}/{:?} typeface {:?}", request.slot, request.endpoint, font);
            engine.apply_font(request, font);
        }

        Ok(Self {
            host,
            engine,
            canvas: RecordingCanvas::new().with_scaled_text(config.scaled_text),
        })
    }

    /// Draw one frame at `fraction` into a fresh display list.
    pub fn render_frame(&mut self, fraction: f32) -> FrameStats {
        self.canvas.reset();
        self.engine.set_expansion_fraction(fraction);
        self.engine.draw(&mut self.canvas);
        self.canvas.stats()
    }

    /// Expanded → collapsed in `frames` evenly spaced steps.
    pub fn sweep(&mut self, frames: u32) -> SweepSummary {
        let mut summary = SweepSummary::default();
        let last = frames.saturating_sub(1).max(1) as f32;
        for i in 0..frames {
            let fraction = i as f32 / last;
            let stats = self.render_frame(fraction);
            self.log_frame(fraction);
            summary.frames += 1;
            summary.text_draws += stats.text_draws;
            summary.bitmap_draws += stats.bitmap_draws;
            summary.rect_draws += stats.rect_draws;
        }
        info!(
            "sweep: {} frames, {} text / {} bitmap / {} rect draws, {} repaint requests",
            summary.frames,
            summary.text_draws,
            summary.bitmap_draws,
            summary.rect_draws,
            self.host.repaint_count()
        );
        summary
    }

    fn log_frame(&self, fraction: f32) {
        for op in self.canvas.ops() {
            match op {
                DrawOp::Text { text, origin, scale, paint, .. } => info!(
                    "{fraction:.2}  text {text:?} at ({:.1}, {:.1}) x{scale:.3} size {} color {}",
                    origin.x, origin.y, paint.size, paint.color
                ),
                DrawOp::Bitmap { width, height, origin, scale, .. } => info!(
                    "{fraction:.2}  bitmap {width}x{height} at ({:.1}, {:.1}) x{scale:.3}",
                    origin.x, origin.y
                ),
                DrawOp::Rect { rect, .. } => debug!("{fraction:.2}  bounds {rect:?}"),
            }
        }
    }
}

fn style_for(expanded: &LineStyle, collapsed: &LineStyle, endpoint: Endpoint) -> LineStyle {
    match endpoint {
        Endpoint::Expanded => expanded.clone(),
        Endpoint::Collapsed => collapsed.clone(),
    }
}
