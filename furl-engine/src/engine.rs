//! The collapsing header engine.
//!
//! ## Pipeline
//!
//! ```text
//!  mutator (text, bounds, size, color, typeface, gravity, shadow, easing)
//!       │  equal value → return
//!       ▼
//!  invalidate: clear textures, mark base dirty
//!       │  host has a size? ──no──▶ wait for the next fraction change / draw
//!       ▼
//!  base offsets    measure each slot at both endpoint sizes, place anchors
//!       │
//!       ▼
//!  current offsets lerp anchors + bounds, pick paint size/scale, ellipsize,
//!       │          blend color and shadow, request a repaint
//!       ▼
//!  draw(&mut dyn Canvas)
//! ```

use std::rc::{Rc, Weak};

use furl_core::{
    lerp, Color, ColorSource, Easing, FontRef, Gravity, LayoutDirection, PointF, Rect, RectF,
    Shadow, StateFlag, TextPaint,
};
use furl_render::Canvas;
use furl_text::{ellipsize, text_direction, TextBackend};
use log::{debug, trace};

use crate::config::EngineConfig;
use crate::font_request::{FontRequest, FontRequests};
use crate::host::HostView;
use crate::layout::{self, LineMetrics};
use crate::slot::{EllipsisKey, Endpoint, SlotFrame, SlotId, TextSlot};
use crate::texture::{Texture, TextureFallbackCache};

/// Interpolates a title and a subtitle between an expanded and a collapsed
/// layout as a function of one fraction in [0, 1].
///
/// # Usage
///
/// ```ignore
/// let host = Rc::new(StaticHost::new(360, 160));
/// let mut engine = CollapsingTextEngine::new(&host, CosmicBackend::new());
/// engine.set_expanded_bounds(Rect::new(16, 0, 344, 140));
/// engine.set_collapsed_bounds(Rect::new(72, 0, 344, 56));
/// engine.set_text(SlotId::Title, Some("Inbox"));
/// engine.set_expansion_fraction(scroll_fraction);
/// engine.draw(&mut canvas);
/// ```
pub struct CollapsingTextEngine<B: TextBackend> {
    host: Weak<dyn HostView>,
    backend: B,
    config: EngineConfig,

    slots: [TextSlot; 2],
    /// Indexed by `Endpoint::index`.
    bounds: [Rect; 2],
    gravity: [Gravity; 2],

    fraction: f32,
    current_bounds: RectF,
    position_easing: Option<Easing>,
    size_easing: Option<Easing>,
    drawable_state: Option<Vec<StateFlag>>,

    textures: TextureFallbackCache,
    font_requests: FontRequests,

    base_dirty: bool,
    can_draw: bool,
}

impl<B: TextBackend> CollapsingTextEngine<B> {
    pub fn new<H: HostView + 'static>(host: &Rc<H>, backend: B) -> Self {
        Self::with_config(host, backend, EngineConfig::default())
    }

    pub fn with_config<H: HostView + 'static>(
        host: &Rc<H>,
        backend: B,
        config: EngineConfig,
    ) -> Self {
        let host: Weak<dyn HostView> = Rc::downgrade(host) as Weak<H>;
        Self {
            host,
            backend,
            config,
            slots: [TextSlot::new(), TextSlot::new()],
            bounds: [Rect::default(); 2],
            gravity: [
                Gravity::START | Gravity::BOTTOM,
                Gravity::START | Gravity::CENTER_VERTICAL,
            ],
            fraction: 0.0,
            current_bounds: RectF::default(),
            position_easing: None,
            size_easing: None,
            drawable_state: None,
            textures: TextureFallbackCache::new(),
            font_requests: FontRequests::default(),
            base_dirty: true,
            can_draw: false,
        }
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the text backend. Call `recalculate` afterwards
    /// if the change affects metrics.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        if self.config == config {
            return;
        }
        self.config = config;
        self.request_repaint();
    }

    pub fn text(&self, slot: SlotId) -> Option<&str> {
        self.slots[slot.index()].raw_text.as_deref()
    }

    pub fn bounds(&self, endpoint: Endpoint) -> Rect {
        self.bounds[endpoint.index()]
    }

    pub fn expanded_bounds(&self) -> Rect {
        self.bounds(Endpoint::Expanded)
    }

    pub fn collapsed_bounds(&self) -> Rect {
        self.bounds(Endpoint::Collapsed)
    }

    pub fn font_size(&self, slot: SlotId, endpoint: Endpoint) -> f32 {
        self.slots[slot.index()].style(endpoint).font_size
    }

    pub fn color(&self, slot: SlotId, endpoint: Endpoint) -> &ColorSource {
        &self.slots[slot.index()].style(endpoint).color
    }

    pub fn typeface(&self, slot: SlotId, endpoint: Endpoint) -> &FontRef {
        &self.slots[slot.index()].style(endpoint).typeface
    }

    pub fn shadow(&self, slot: SlotId, endpoint: Endpoint) -> Shadow {
        self.slots[slot.index()].style(endpoint).shadow
    }

    pub fn gravity(&self, endpoint: Endpoint) -> Gravity {
        self.gravity[endpoint.index()]
    }

    pub fn position_easing(&self) -> Option<Easing> {
        self.position_easing
    }

    pub fn size_easing(&self) -> Option<Easing> {
        self.size_easing
    }

    pub fn expansion_fraction(&self) -> f32 {
        self.fraction
    }

    pub fn drawable_state(&self) -> Option<&[StateFlag]> {
        self.drawable_state.as_deref()
    }

    pub fn current_bounds(&self) -> RectF {
        self.current_bounds
    }

    /// Resolved (title, subtitle) colors at the current fraction.
    pub fn current_colors(&self) -> (Color, Color) {
        (
            self.slots[SlotId::Title.index()].color,
            self.slots[SlotId::Subtitle.index()].color,
        )
    }

    pub fn slot_frame(&self, slot: SlotId) -> SlotFrame {
        self.slots[slot.index()].frame()
    }

    pub fn textures(&self) -> &TextureFallbackCache {
        &self.textures
    }

    /// Both bounds are non-empty.
    pub fn can_draw(&self) -> bool {
        self.can_draw
    }

    /// Base offsets are stale and will be recomputed before the next
    /// fraction change or draw.
    pub fn needs_layout(&self) -> bool {
        self.base_dirty
    }

    // ---------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------

    pub fn set_text(&mut self, slot: SlotId, text: Option<&str>) {
        let s = &mut self.slots[slot.index()];
        if s.raw_text.as_deref() == text {
            return;
        }
        s.raw_text = text.map(str::to_owned);
        s.display_text = None;
        s.ellipsis_key = None;
        self.invalidate();
    }

    pub fn set_bounds(&mut self, endpoint: Endpoint, bounds: Rect) {
        if self.bounds[endpoint.index()] == bounds {
            return;
        }
        self.bounds[endpoint.index()] = bounds;
        self.can_draw = self.bounds.iter().all(|b| !b.is_empty());
        self.invalidate();
    }

    pub fn set_expanded_bounds(&mut self, bounds: Rect) {
        self.set_bounds(Endpoint::Expanded, bounds);
    }

    pub fn set_collapsed_bounds(&mut self, bounds: Rect) {
        self.set_bounds(Endpoint::Collapsed, bounds);
    }

    pub fn set_font_size(&mut self, slot: SlotId, endpoint: Endpoint, size: f32) {
        let style = self.slots[slot.index()].style_mut(endpoint);
        if style.font_size == size {
            return;
        }
        style.font_size = size;
        self.invalidate();
    }

    pub fn set_color(&mut self, slot: SlotId, endpoint: Endpoint, color: impl Into<ColorSource>) {
        let color = color.into();
        let style = self.slots[slot.index()].style_mut(endpoint);
        if style.color == color {
            return;
        }
        style.color = color;
        self.invalidate();
    }

    /// Set the typeface; `None` restores the default `sans-serif` face.
    ///
    /// Cancels any outstanding `FontRequest` for the same slot and
    /// endpoint, even when the face is unchanged.
    pub fn set_typeface(&mut self, slot: SlotId, endpoint: Endpoint, typeface: Option<FontRef>) {
        self.font_requests.cancel(slot, endpoint);
        let typeface = typeface.unwrap_or_default();
        let style = self.slots[slot.index()].style_mut(endpoint);
        if style.typeface == typeface {
            return;
        }
        style.typeface = typeface;
        self.invalidate();
    }

    pub fn set_gravity(&mut self, endpoint: Endpoint, gravity: Gravity) {
        if self.gravity[endpoint.index()] == gravity {
            return;
        }
        self.gravity[endpoint.index()] = gravity;
        self.invalidate();
    }

    pub fn set_shadow(&mut self, slot: SlotId, endpoint: Endpoint, shadow: Shadow) {
        let style = self.slots[slot.index()].style_mut(endpoint);
        if style.shadow == shadow {
            return;
        }
        style.shadow = shadow;
        self.invalidate();
    }

    /// Curve applied to the fraction for positions and bounds. `None` is
    /// linear.
    pub fn set_position_easing(&mut self, easing: Option<Easing>) {
        if self.position_easing == easing {
            return;
        }
        self.position_easing = easing;
        self.invalidate();
    }

    /// Curve applied to the fraction for the font size. `None` is linear.
    pub fn set_size_easing(&mut self, easing: Option<Easing>) {
        if self.size_easing == easing {
            return;
        }
        self.size_easing = easing;
        self.invalidate();
    }

    /// Move the header to `fraction`, clamped to [0, 1]. NaN is ignored.
    pub fn set_expansion_fraction(&mut self, fraction: f32) {
        if fraction.is_nan() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction == self.fraction {
            return;
        }
        self.fraction = fraction;
        if self.base_dirty {
            self.calculate_base_offsets();
        } else {
            self.calculate_current_offsets();
        }
    }

    /// Record the host's drawable state.
    ///
    /// Returns `true` (after recalculating) when a text color depends on
    /// the state, so the host knows to repaint.
    pub fn set_drawable_state(&mut self, states: &[StateFlag]) -> bool {
        self.drawable_state = Some(states.to_vec());
        let stateful = self
            .slots
            .iter()
            .flat_map(|slot| slot.styles.iter())
            .any(|style| style.color.is_stateful());
        if stateful {
            self.request_layout();
        }
        stateful
    }

    /// Recompute base and current offsets now if the host has a size,
    /// otherwise before the next fraction change or draw.
    pub fn recalculate(&mut self) {
        for slot in &mut self.slots {
            slot.ellipsis_key = None;
        }
        self.request_layout();
    }

    // ---------------------------------------------------------------
    // Font requests
    // ---------------------------------------------------------------

    /// Start an asynchronous typeface load for (slot, endpoint).
    pub fn request_font(&mut self, slot: SlotId, endpoint: Endpoint) -> FontRequest {
        self.font_requests.issue(slot, endpoint)
    }

    /// Deliver a loaded typeface. Returns `false` and changes nothing when
    /// the request was superseded.
    pub fn apply_font(&mut self, request: FontRequest, font: FontRef) -> bool {
        if !self.font_requests.is_current(&request) {
            debug!(
                "dropping stale font {:?} for {:?}/{:?} (generation {})",
                font.family,
                request.slot,
                request.endpoint,
                request.generation()
            );
            return false;
        }
        self.set_typeface(request.slot, request.endpoint, Some(font));
        true
    }

    // ---------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        if !self.can_draw {
            return;
        }
        if self.base_dirty {
            self.calculate_base_offsets();
        }

        let save_count = canvas.save();

        #[cfg(feature = "debug-draw")]
        if self.config.debug_bounds {
            canvas.draw_rect(self.current_bounds, crate::config::debug::debug_paint().fill);
        }

        for slot in SlotId::ALL {
            self.draw_slot(slot, canvas);
        }

        canvas.restore_to_count(save_count);
    }

    fn draw_slot(&mut self, id: SlotId, canvas: &mut dyn Canvas) {
        let slot = &self.slots[id.index()];
        let text = match slot.display_text.as_deref() {
            Some(text) if !text.is_empty() => text.to_owned(),
            _ => return,
        };
        let (x, y, scale) = (slot.draw_x, slot.draw_y, slot.scale);
        let paint = TextPaint {
            font: slot.typeface.clone(),
            size: slot.font_size,
            color: slot.color,
            shadow: slot.shadow,
        };

        let texture = if !canvas.can_scale_text() && scale != 1.0 {
            self.ensure_texture(id)
        } else {
            None
        };

        let save_count = canvas.save();
        match texture {
            Some(texture) => {
                // Bitmaps are placed by their top edge.
                let y = y + texture.metrics.scaled(scale).ascent;
                canvas.scale(scale, scale, x, y);
                canvas.draw_bitmap(&texture.bitmap, x, y);
            }
            None => {
                if scale != 1.0 {
                    canvas.scale(scale, scale, x, y);
                }
                canvas.draw_text(&text, x, y, &paint);
            }
        }
        canvas.restore_to_count(save_count);
    }

    /// Cached texture for `id`, rasterized at the expanded size on a miss.
    fn ensure_texture(&mut self, id: SlotId) -> Option<Rc<Texture>> {
        if let Some(texture) = self.textures.get(id) {
            return Some(texture);
        }
        if self.bounds[Endpoint::Expanded.index()].is_empty() {
            return None;
        }

        let slot = &self.slots[id.index()];
        let text = slot.display_text.as_deref().filter(|t| !t.is_empty())?;
        let style = slot.style(Endpoint::Expanded);
        let paint = TextPaint {
            font: style.typeface.clone(),
            size: style.font_size,
            color: style.color.resolve(self.drawable_state.as_deref()),
            shadow: style.shadow,
        };

        let metrics = self.backend.metrics(&paint.font, paint.size);
        let width = self.backend.measure(text, &paint.font, paint.size).round();
        let height = metrics.line_height().round();
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        let bitmap = self.backend.rasterize(
            text,
            &paint,
            width as u32,
            height as u32,
            height - metrics.descent,
        )?;
        debug!("{:?} texture {}x{} at {}px", id, width, height, paint.size);

        Some(self.textures.insert(
            id,
            Texture {
                bitmap,
                metrics,
            },
        ))
    }

    // ---------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------

    fn invalidate(&mut self) {
        self.textures.clear();
        self.request_layout();
    }

    fn request_layout(&mut self) {
        self.base_dirty = true;
        if self.host_has_size() {
            self.calculate_base_offsets();
        }
    }

    fn host_has_size(&self) -> bool {
        self.host
            .upgrade()
            .is_some_and(|host| matches!(host.size(), (w, h) if w > 0 && h > 0))
    }

    fn host_direction(&self) -> LayoutDirection {
        self.host
            .upgrade()
            .map_or(LayoutDirection::Ltr, |host| host.layout_direction())
    }

    fn request_repaint(&self) {
        if let Some(host) = self.host.upgrade() {
            host.request_repaint();
        }
    }

    fn calculate_base_offsets(&mut self) {
        let direction = self.host_direction();

        // [slot][endpoint]
        let mut lines = [[LineMetrics::default(); 2]; 2];
        for id in SlotId::ALL {
            for endpoint in [Endpoint::Collapsed, Endpoint::Expanded] {
                let size = self.slots[id.index()].style(endpoint).font_size;
                self.calculate_using_size(id, size);
                lines[id.index()][endpoint.index()] = self.measure_current(id);
            }
        }

        let paired = self.slots[SlotId::Subtitle.index()].has_text();
        for endpoint in Endpoint::ALL {
            let e = endpoint.index();
            let bounds = self.bounds[e];
            let gravity = self.gravity[e];
            let title = &lines[SlotId::Title.index()][e];
            let subtitle = &lines[SlotId::Subtitle.index()][e];

            let (title_y, subtitle_y) = match (paired, endpoint) {
                (true, Endpoint::Collapsed) => {
                    layout::collapsed_pair_baselines(&bounds, title, subtitle)
                }
                (true, Endpoint::Expanded) => {
                    layout::expanded_pair_baselines(&bounds, gravity.vertical(), title, subtitle)
                }
                (false, _) => (
                    layout::single_line_baseline(&bounds, gravity.vertical(), title),
                    layout::single_line_baseline(&bounds, gravity.vertical(), subtitle),
                ),
            };

            for (id, y) in [(SlotId::Title, title_y), (SlotId::Subtitle, subtitle_y)] {
                let slot = &mut self.slots[id.index()];
                let line = &lines[id.index()][e];
                let slot_direction = slot
                    .raw_text
                    .as_deref()
                    .map_or(direction, |text| text_direction(text, direction));
                let x = layout::horizontal_anchor(
                    &bounds,
                    gravity.horizontal(slot_direction),
                    line.width,
                );
                slot.anchors[e] = PointF::new(x, y);
                slot.widths[e] = line.width;
            }
        }

        self.textures.clear();
        self.base_dirty = false;
        debug!(
            "base offsets: title {:?} -> {:?}, subtitle {:?} -> {:?}",
            self.slots[0].anchors[0],
            self.slots[0].anchors[1],
            self.slots[1].anchors[0],
            self.slots[1].anchors[1],
        );

        self.calculate_current_offsets();
    }

    fn calculate_current_offsets(&mut self) {
        let fraction = self.fraction;
        let position = Easing::apply_opt(self.position_easing, fraction);
        let size_t = Easing::apply_opt(self.size_easing, fraction);

        self.current_bounds = RectF::lerp(
            &self.bounds[Endpoint::Expanded.index()].to_f32(),
            &self.bounds[Endpoint::Collapsed.index()].to_f32(),
            position,
        );

        for id in SlotId::ALL {
            let slot = &mut self.slots[id.index()];
            let [expanded, collapsed] = slot.anchors;
            slot.draw_x = lerp(expanded.x, collapsed.x, position);
            slot.draw_y = lerp(expanded.y, collapsed.y, position);
            let size = lerp(
                slot.style(Endpoint::Expanded).font_size,
                slot.style(Endpoint::Collapsed).font_size,
                size_t,
            );

            self.calculate_using_size(id, size);

            let states = self.drawable_state.as_deref();
            let slot = &mut self.slots[id.index()];
            let [expanded, collapsed] = &slot.styles;
            slot.color = current_color(&expanded.color, &collapsed.color, states, fraction);
            slot.shadow = Shadow::lerp(&expanded.shadow, &collapsed.shadow, fraction);
        }

        trace!(
            "fraction {fraction}: title ({}, {}) x{}, subtitle ({}, {}) x{}",
            self.slots[0].draw_x,
            self.slots[0].draw_y,
            self.slots[0].scale,
            self.slots[1].draw_x,
            self.slots[1].draw_y,
            self.slots[1].scale,
        );

        self.request_repaint();
    }

    /// Apply the size rule for `size` to slot `id`: paint size, typeface,
    /// scale, available width and the ellipsized display text.
    fn calculate_using_size(&mut self, id: SlotId, size: f32) {
        let expanded_width = self.bounds[Endpoint::Expanded.index()].width() as f32;
        let collapsed_width = self.bounds[Endpoint::Collapsed.index()].width() as f32;

        let slot = &mut self.slots[id.index()];
        let choice = layout::choose_size(
            size,
            slot.style(Endpoint::Expanded).font_size,
            slot.style(Endpoint::Collapsed).font_size,
            expanded_width,
            collapsed_width,
        );
        let typeface = slot.style(choice.paint_endpoint).typeface.clone();

        let key = EllipsisKey {
            size_bits: choice.paint_size.to_bits(),
            typeface: typeface.clone(),
            available_bits: choice.available_width.to_bits(),
        };
        if slot.ellipsis_key.as_ref() != Some(&key) {
            slot.display_text = slot.raw_text.as_deref().map(|text| {
                ellipsize(
                    &mut self.backend,
                    text,
                    &typeface,
                    choice.paint_size,
                    choice.available_width,
                )
            });
            slot.ellipsis_key = Some(key);
        }

        slot.font_size = choice.paint_size;
        slot.scale = choice.scale;
        slot.available_width = choice.available_width;
        slot.typeface = typeface;
    }

    /// Metrics and width of slot `id` as its paint is currently set.
    fn measure_current(&mut self, id: SlotId) -> LineMetrics {
        let slot = &self.slots[id.index()];
        let metrics = self.backend.metrics(&slot.typeface, slot.font_size);
        let width = match slot.display_text.as_deref() {
            Some(text) => self.backend.measure(text, &slot.typeface, slot.font_size),
            None => 0.0,
        };
        LineMetrics::new(metrics.ascent, metrics.descent, width)
    }
}

/// Identical sources resolve directly; anything else blends the two
/// resolved colors by the raw fraction.
fn current_color(
    expanded: &ColorSource,
    collapsed: &ColorSource,
    states: Option<&[StateFlag]>,
    fraction: f32,
) -> Color {
    if expanded == collapsed {
        expanded.resolve(states)
    } else {
        Color::blend(expanded.resolve(states), collapsed.resolve(states), fraction)
    }
}

// ===================================================================
// Tests
// ===================================================================
