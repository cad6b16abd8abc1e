//! End-to-end header scenarios on the deterministic text backend.
//!
//! `FixedMetricsBackend::default()` gives every character an advance of
//! half the font size, ascent `-0.75 * size` and descent `0.25 * size`,
//! so a line is exactly `size` pixels tall.

use std::rc::Rc;

use furl_core::{
    Color, ColorSource, Easing, FontRef, Gravity, LayoutDirection, Rect, RectF, Shadow, StateFlag,
    StateSpec,
};
use furl_engine::{CollapsingTextEngine, Endpoint, SlotId, StaticHost};
use furl_render::{DrawOp, RecordingCanvas};
use furl_text::FixedMetricsBackend;

type Engine = CollapsingTextEngine<FixedMetricsBackend>;

fn header(expanded: Rect, collapsed: Rect) -> (Rc<StaticHost>, Engine) {
    let host = Rc::new(StaticHost::new(400, 200));
    let mut engine = CollapsingTextEngine::new(&host, FixedMetricsBackend::default());
    engine.set_expanded_bounds(expanded);
    engine.set_collapsed_bounds(collapsed);
    (host, engine)
}

fn sizes(engine: &mut Engine, slot: SlotId, expanded: f32, collapsed: f32) {
    engine.set_font_size(slot, Endpoint::Expanded, expanded);
    engine.set_font_size(slot, Endpoint::Collapsed, collapsed);
}

#[test]
fn test_title_only_collapsed_bottom() {
    let (_host, mut engine) = header(Rect::new(0, 0, 200, 100), Rect::new(0, 0, 200, 40));
    engine.set_gravity(Endpoint::Collapsed, Gravity::BOTTOM);
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    engine.set_text(SlotId::Title, Some("Title"));
    engine.set_expansion_fraction(1.0);

    let frame = engine.slot_frame(SlotId::Title);
    assert_eq!(frame.draw_y, 25.0);
    assert_eq!(frame.draw_x, 0.0);
    assert_eq!(frame.font_size, 20.0);
}

#[test]
fn test_two_line_collapsed_partition() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 120), Rect::new(0, 0, 300, 60));
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    sizes(&mut engine, SlotId::Subtitle, 16.0, 10.0);
    engine.set_text(SlotId::Title, Some("Title"));
    engine.set_text(SlotId::Subtitle, Some("Subtitle"));
    engine.set_expansion_fraction(1.0);

    // offset = (60 - (20 + 10)) / 3 = 10
    assert_eq!(engine.slot_frame(SlotId::Title).draw_y, 25.0);
    assert_eq!(engine.slot_frame(SlotId::Subtitle).draw_y, 47.5);
}

#[test]
fn test_two_line_expanded_bottom_stack() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 120), Rect::new(0, 0, 300, 60));
    sizes(&mut engine, SlotId::Title, 32.0, 20.0);
    sizes(&mut engine, SlotId::Subtitle, 16.0, 10.0);
    engine.set_text(SlotId::Title, Some("Title"));
    engine.set_text(SlotId::Subtitle, Some("Subtitle"));

    // Subtitle glyph box ends on the bottom edge, title box directly above.
    let subtitle = engine.slot_frame(SlotId::Subtitle);
    let title = engine.slot_frame(SlotId::Title);
    assert_eq!(subtitle.draw_y, 120.0 - 4.0);
    assert_eq!(title.draw_y + 8.0, subtitle.draw_y - 12.0);
}

#[test]
fn test_width_cap_not_applied_at_equality() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 100, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 10.0);
    engine.set_text(SlotId::Title, Some("Header"));
    engine.set_expansion_fraction(0.5);

    assert_eq!(engine.slot_frame(SlotId::Title).available_width, 300.0);
}

#[test]
fn test_width_cap_applied_and_text_ellipsized() {
    let (_host, mut engine) = header(Rect::new(0, 0, 400, 100), Rect::new(0, 0, 100, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 10.0);
    let long = "abcdefghij".repeat(4);
    engine.set_text(SlotId::Title, Some(&long));
    engine.set_expansion_fraction(0.5);

    let frame = engine.slot_frame(SlotId::Title);
    assert!((frame.available_width - 300.0).abs() < 1e-3, "{}", frame.available_width);
    assert_eq!(frame.font_size, 30.0);

    let shown = frame.display_text.expect("display text");
    assert!(shown.ends_with('\u{2026}'));
    // 15px per character at size 30.
    assert!(shown.chars().count() as f32 * 15.0 <= frame.available_width);
}

#[test]
fn test_endpoints_are_exact() {
    let (_host, mut engine) = header(Rect::new(16, 40, 360, 140), Rect::new(72, 0, 360, 56));
    sizes(&mut engine, SlotId::Title, 34.0, 20.0);
    sizes(&mut engine, SlotId::Subtitle, 18.0, 14.0);
    engine.set_position_easing(Some(Easing::FastOutSlowIn));
    engine.set_size_easing(Some(Easing::AccelerateDecelerate));
    engine.set_text(SlotId::Title, Some("Library"));
    engine.set_text(SlotId::Subtitle, Some("128 albums"));

    engine.set_expansion_fraction(1.0);
    engine.set_expansion_fraction(0.0);
    for slot in SlotId::ALL {
        let frame = engine.slot_frame(slot);
        assert_eq!(frame.draw_x, frame.expanded_anchor.x);
        assert_eq!(frame.draw_y, frame.expanded_anchor.y);
        assert_eq!(frame.scale, 1.0);
        assert_eq!(frame.font_size, engine.font_size(slot, Endpoint::Expanded));
    }
    assert_eq!(engine.current_bounds(), RectF::new(16.0, 40.0, 360.0, 140.0));

    engine.set_expansion_fraction(1.0);
    for slot in SlotId::ALL {
        let frame = engine.slot_frame(slot);
        assert_eq!(frame.draw_x, frame.collapsed_anchor.x);
        assert_eq!(frame.draw_y, frame.collapsed_anchor.y);
        assert_eq!(frame.scale, 1.0);
        assert_eq!(frame.font_size, engine.font_size(slot, Endpoint::Collapsed));
    }
    assert_eq!(engine.current_bounds(), RectF::new(72.0, 0.0, 360.0, 56.0));
}

#[test]
fn test_midway_scales_expanded_paint() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    engine.set_text(SlotId::Title, Some("Title"));
    engine.set_expansion_fraction(0.5);

    let frame = engine.slot_frame(SlotId::Title);
    assert_eq!(frame.font_size, 30.0);
    assert!((frame.scale - 25.0 / 30.0).abs() < 1e-6);
    assert!((frame.effective_size() - 25.0).abs() < 1e-4);
}

#[test]
fn test_fraction_round_trip() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    engine.set_expansion_fraction(0.3);
    assert_eq!(engine.expansion_fraction(), 0.3);
}

#[test]
fn test_color_blend_is_monotonic_and_exact_at_ends() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    engine.set_text(SlotId::Title, Some("Fade"));
    engine.set_color(SlotId::Title, Endpoint::Expanded, Color::rgb(0, 40, 200));
    engine.set_color(SlotId::Title, Endpoint::Collapsed, Color::rgb(255, 140, 0));

    let mut previous: Option<Color> = None;
    for step in 0..=20 {
        engine.set_expansion_fraction(step as f32 / 20.0);
        let (title, _) = engine.current_colors();
        if let Some(prev) = previous {
            assert!(title.red() >= prev.red());
            assert!(title.green() >= prev.green());
            assert!(title.blue() <= prev.blue());
        }
        previous = Some(title);
    }
    assert_eq!(engine.current_colors().0, Color::rgb(255, 140, 0));
    engine.set_expansion_fraction(0.0);
    assert_eq!(engine.current_colors().0, Color::rgb(0, 40, 200));
}

#[test]
fn test_shadow_interpolates() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    engine.set_text(SlotId::Title, Some("Shadow"));
    engine.set_shadow(SlotId::Title, Endpoint::Expanded, Shadow::new(4.0, 0.0, 2.0, Color::BLACK));
    engine.set_shadow(SlotId::Title, Endpoint::Collapsed, Shadow::NONE);
    engine.set_expansion_fraction(0.5);

    let shadow = engine.slot_frame(SlotId::Title).shadow;
    assert_eq!(shadow.radius, 2.0);
    assert_eq!(shadow.dy, 1.0);
    assert_eq!(shadow.color.alpha(), 128);
}

#[test]
fn test_identical_setters_keep_texture() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    engine.set_text(SlotId::Title, Some("Keep"));
    engine.set_expansion_fraction(0.5);

    let mut canvas = RecordingCanvas::new().with_scaled_text(false);
    engine.draw(&mut canvas);
    assert!(engine.textures().contains(SlotId::Title));
    let clears = engine.textures().clear_count();

    engine.set_text(SlotId::Title, Some("Keep"));
    engine.set_expanded_bounds(Rect::new(0, 0, 300, 100));
    engine.set_collapsed_bounds(Rect::new(0, 0, 300, 40));
    engine.set_font_size(SlotId::Title, Endpoint::Expanded, 30.0);
    engine.set_gravity(Endpoint::Expanded, Gravity::START | Gravity::BOTTOM);

    assert!(engine.textures().contains(SlotId::Title));
    assert_eq!(engine.textures().clear_count(), clears);
}

fn textured_engine() -> (Rc<StaticHost>, Engine) {
    let (host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    engine.set_text(SlotId::Title, Some("Texture"));
    engine.set_expansion_fraction(0.5);
    engine.draw(&mut RecordingCanvas::new().with_scaled_text(false));
    assert!(engine.textures().contains(SlotId::Title));
    (host, engine)
}

#[test]
fn test_set_text_clears_texture() {
    let (_host, mut engine) = textured_engine();
    engine.set_text(SlotId::Title, Some("Changed"));
    assert!(engine.textures().is_empty());
}

#[test]
fn test_set_bounds_clears_texture() {
    let (_host, mut engine) = textured_engine();
    engine.set_collapsed_bounds(Rect::new(0, 0, 280, 40));
    assert!(engine.textures().is_empty());
}

#[test]
fn test_set_typeface_clears_texture() {
    let (_host, mut engine) = textured_engine();
    engine.set_typeface(
        SlotId::Title,
        Endpoint::Expanded,
        Some(FontRef::new("serif").with_weight(700)),
    );
    assert!(engine.textures().is_empty());
}

#[test]
fn test_texture_drawn_when_canvas_cannot_scale_text() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    engine.set_text(SlotId::Title, Some("Bitmap"));
    engine.set_expansion_fraction(0.5);

    let mut canvas = RecordingCanvas::new().with_scaled_text(false);
    engine.draw(&mut canvas);
    engine.draw(&mut canvas);

    let bitmaps: Vec<_> = canvas
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Bitmap { width, height, scale, .. } => Some((*width, *height, *scale)),
            _ => None,
        })
        .collect();
    // 6 characters at 15px, line height 30.
    assert_eq!(bitmaps.len(), 2);
    assert_eq!(bitmaps[0].0, 90);
    assert_eq!(bitmaps[0].1, 30);
    assert!((bitmaps[0].2 - 25.0 / 30.0).abs() < 1e-6);
    // Rasterized once, reused on the second frame.
    assert_eq!(engine.backend().rasterize_calls(), 1);
    assert_eq!(canvas.stats().text_draws, 0);
}

#[test]
fn test_no_texture_at_rest() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    engine.set_text(SlotId::Title, Some("Rest"));

    let mut canvas = RecordingCanvas::new().with_scaled_text(false);
    engine.draw(&mut canvas);
    assert_eq!(canvas.stats().text_draws, 1);
    assert_eq!(canvas.stats().bitmap_draws, 0);
    assert!(engine.textures().is_empty());
}

#[test]
fn test_scaled_text_drawn_around_baseline_origin() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    sizes(&mut engine, SlotId::Title, 30.0, 20.0);
    sizes(&mut engine, SlotId::Subtitle, 16.0, 12.0);
    engine.set_text(SlotId::Title, Some("Title"));
    engine.set_text(SlotId::Subtitle, Some("Subtitle"));
    engine.set_expansion_fraction(0.5);

    let mut canvas = RecordingCanvas::new();
    engine.draw(&mut canvas);

    let texts: Vec<_> = canvas.texts().cloned().collect();
    assert_eq!(texts.len(), 2);
    for (op, slot) in texts.iter().zip(SlotId::ALL) {
        let frame = engine.slot_frame(slot);
        match op {
            DrawOp::Text { text, origin, scale, paint, .. } => {
                assert_eq!(Some(text.as_str()), frame.display_text.as_deref());
                // Scaling pivots on the draw point, so it maps to itself.
                assert!((origin.x - frame.draw_x).abs() < 1e-3);
                assert!((origin.y - frame.draw_y).abs() < 1e-3);
                assert_eq!(*scale, frame.scale);
                assert_eq!(paint.size, frame.font_size);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
    assert_eq!(canvas.save_count(), 1);
    assert!(canvas.stats().max_save_depth >= 3);
}

#[test]
fn test_draw_skipped_for_empty_bounds_or_text() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 0, 40));
    engine.set_text(SlotId::Title, Some("Hidden"));
    let mut canvas = RecordingCanvas::new();
    engine.draw(&mut canvas);
    assert!(!engine.can_draw());
    assert!(canvas.ops().is_empty());

    engine.set_collapsed_bounds(Rect::new(0, 0, 300, 40));
    engine.set_text(SlotId::Title, None);
    engine.draw(&mut canvas);
    assert!(canvas.ops().is_empty());
    assert_eq!(canvas.stats().max_save_depth, 2);
}

#[test]
fn test_stateful_color_follows_drawable_state() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    engine.set_text(SlotId::Title, Some("State"));
    assert!(!engine.set_drawable_state(&[StateFlag::Enabled]));

    let pressed_red = ColorSource::Stateful {
        entries: vec![(StateSpec::new(&[StateFlag::Pressed], &[]), Color::rgb(255, 0, 0))],
        default: Color::BLACK,
    };
    engine.set_color(SlotId::Title, Endpoint::Expanded, pressed_red.clone());
    engine.set_color(SlotId::Title, Endpoint::Collapsed, pressed_red);

    assert!(engine.set_drawable_state(&[StateFlag::Enabled, StateFlag::Pressed]));
    assert_eq!(engine.current_colors().0, Color::rgb(255, 0, 0));

    assert!(engine.set_drawable_state(&[StateFlag::Enabled]));
    assert_eq!(engine.current_colors().0, Color::BLACK);
}

#[test]
fn test_stale_font_request_is_dropped() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    let bold = FontRef::new("sans-serif").with_weight(700);
    let serif = FontRef::new("serif");

    let stale = engine.request_font(SlotId::Title, Endpoint::Expanded);
    engine.set_typeface(SlotId::Title, Endpoint::Expanded, Some(bold.clone()));
    assert!(!engine.apply_font(stale, serif.clone()));
    assert_eq!(engine.typeface(SlotId::Title, Endpoint::Expanded), &bold);

    let first = engine.request_font(SlotId::Title, Endpoint::Expanded);
    let second = engine.request_font(SlotId::Title, Endpoint::Expanded);
    assert!(!engine.apply_font(first, FontRef::default()));
    assert!(engine.apply_font(second, serif.clone()));
    assert_eq!(engine.typeface(SlotId::Title, Endpoint::Expanded), &serif);

    // Equal typeface still cancels.
    let pending = engine.request_font(SlotId::Title, Endpoint::Expanded);
    engine.set_typeface(SlotId::Title, Endpoint::Expanded, Some(serif));
    assert!(!engine.apply_font(pending, bold));
}

#[test]
fn test_typeface_none_restores_default() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    engine.set_typeface(SlotId::Subtitle, Endpoint::Collapsed, Some(FontRef::new("monospace")));
    engine.set_typeface(SlotId::Subtitle, Endpoint::Collapsed, None);
    assert_eq!(engine.typeface(SlotId::Subtitle, Endpoint::Collapsed), &FontRef::default());
}

#[test]
fn test_start_gravity_follows_text_direction() {
    let host = Rc::new(StaticHost::new(400, 200).with_direction(LayoutDirection::Rtl));
    let mut engine = CollapsingTextEngine::new(&host, FixedMetricsBackend::default());
    engine.set_expanded_bounds(Rect::new(0, 0, 300, 100));
    engine.set_collapsed_bounds(Rect::new(0, 0, 300, 40));
    sizes(&mut engine, SlotId::Title, 20.0, 16.0);

    // Strong LTR text stays on the left even in an RTL host.
    engine.set_text(SlotId::Title, Some("Hello"));
    assert_eq!(engine.slot_frame(SlotId::Title).draw_x, 0.0);

    // Hebrew: 4 characters at 10px, START resolves to the right edge.
    engine.set_text(SlotId::Title, Some("\u{5E9}\u{5DC}\u{5D5}\u{5DD}"));
    assert_eq!(engine.slot_frame(SlotId::Title).draw_x, 260.0);

    // No strong characters: the host direction decides.
    engine.set_text(SlotId::Title, Some("1234"));
    assert_eq!(engine.slot_frame(SlotId::Title).draw_x, 260.0);
}

#[test]
fn test_center_gravity_centers_each_line() {
    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    engine.set_gravity(Endpoint::Expanded, Gravity::CENTER);
    sizes(&mut engine, SlotId::Title, 20.0, 16.0);
    engine.set_text(SlotId::Title, Some("Centered"));

    let frame = engine.slot_frame(SlotId::Title);
    // 8 characters at 10px.
    assert_eq!(frame.draw_x, 150.0 - 40.0);
    // Glyph box [y - 15, y + 5] centered on 50.
    assert_eq!(frame.draw_y, 55.0);
}

#[cfg(feature = "debug-draw")]
#[test]
fn test_debug_bounds_overlay() {
    use furl_engine::EngineConfig;

    let (_host, mut engine) = header(Rect::new(0, 0, 300, 100), Rect::new(0, 0, 300, 40));
    engine.set_config(EngineConfig { debug_bounds: true });
    engine.set_expansion_fraction(0.5);

    let mut canvas = RecordingCanvas::new();
    engine.draw(&mut canvas);
    match canvas.ops().first() {
        Some(DrawOp::Rect { rect, .. }) => {
            assert_eq!(*rect, RectF::new(0.0, 0.0, 300.0, 70.0));
        }
        other => panic!("expected debug rect, got {other:?}"),
    }
}
