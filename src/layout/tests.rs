use super::*;

use crate::button::{ButtonKind::*, Capabilities};
use crate::config::{ThemeConfig, ThemePreset};
use crate::types::Rect;

fn engine() -> LayoutEngine {
    LayoutEngine::new(ThemeConfig::preset(ThemePreset::Themed))
}

fn spec(codes: &str) -> ButtonSpec {
    ButtonSpec::parse(codes).expect("bad button spec")
}

fn area(r: Rect) -> i64 {
    r.size.width as i64 * r.size.height as i64
}

#[test_log::test]
fn test_three_right_buttons_scenario() {
    let engine = engine();
    let cfg = engine.config().clone();
    let state = WindowState::new(800, 600);

    let geom = engine.compute_geometry(&state, &ButtonSpec::empty(), &spec("IAX"), 12);

    assert_eq!(geom.title_bar_height, cfg.min_title_height.max(15));
    assert_eq!(geom.right_group.kinds().collect::<Vec<_>>(), vec![Minimize, Maximize, Close]);
    assert!(geom.left_group.is_empty());
    assert_eq!(geom.caption_rect.left(), cfg.border_width);
    assert_eq!(geom.caption_rect.right(), geom.right_group.origin.x);
    assert_eq!(geom.caption_rect.size.height, geom.title_bar_height);

    // the right group ends exactly at the right border
    assert_eq!(geom.right_group.rect().right(), geom.frame_rect.right() - cfg.border_width);
}

#[test]
fn test_minimal_preset_title_floor() {
    let engine = LayoutEngine::new(ThemeConfig::preset(ThemePreset::Minimal));

    assert_eq!(engine.title_bar_height(12), 16);
    assert_eq!(engine.title_bar_height(20), 25);
}

#[test]
fn test_uncloseable_window_drops_close() {
    let engine = engine();
    let cfg = engine.config().clone();
    let mut state = WindowState::new(800, 600);
    let right = spec("IAX");

    let before = engine.compute_geometry(&state, &ButtonSpec::empty(), &right, 12);

    state.set_capability(Capabilities::CLOSEABLE, false);
    let after = engine.compute_geometry(&state, &ButtonSpec::empty(), &right, 12);

    assert_eq!(after.right_group.kinds().collect::<Vec<_>>(), vec![Minimize, Maximize]);

    // the caption edge moves by exactly one button and one gap
    let shift = after.caption_rect.right() - before.caption_rect.right();
    assert_eq!(shift, after.button_size + cfg.button_spacing);
    assert_eq!(after.caption_rect.left(), before.caption_rect.left());
}

#[test]
fn test_maximize_invalidates_whole_frame() {
    let engine = engine();
    let mut state = WindowState::new(800, 600);
    let right = spec("IAX");

    let old = engine.compute_geometry(&state, &ButtonSpec::empty(), &right, 12);
    state.is_maximized = true;
    let new = engine.compute_geometry(&state, &ButtonSpec::empty(), &right, 12);

    assert_ne!(old.border_bottom, new.border_bottom);

    let damage = LayoutEngine::invalidate(&old, &new);
    assert!(damage.is_full());
    assert_eq!(&damage[..], &[new.frame_rect]);
}

#[test]
fn test_capability_change_invalidates_group_and_caption() {
    let engine = engine();
    let left = spec("MS");
    let right = spec("IAX");
    let mut state = WindowState::new(640, 480);

    let old = engine.compute_geometry(&state, &left, &right, 12);
    state.set_capability(Capabilities::MINIMIZEABLE, false);
    let new = engine.compute_geometry(&state, &left, &right, 12);

    let damage = LayoutEngine::invalidate(&old, &new);

    assert!(!damage.is_full());
    assert!(!damage.is_empty());

    let covers = |r: Rect| damage.iter().any(|d| d.contains(&r));
    assert!(covers(old.right_group.rect()));
    assert!(covers(new.right_group.rect()));
    assert!(covers(old.caption_rect.union(new.caption_rect)));

    // the left group did not move
    assert!(!damage.iter().any(|d| d.overlaps_with(new.left_group.rect())));
    // nothing outside the title bar
    assert!(damage.iter().all(|d| new.title_rect().contains(d)));
}

#[test]
fn test_identical_geometry_has_no_damage() {
    let engine = engine();
    let state = WindowState::new(300, 200);

    let a = engine.compute_geometry(&state, &spec("M"), &spec("X"), 10);
    let b = engine.compute_geometry(&state, &spec("M"), &spec("X"), 10);

    assert_eq!(a, b);
    assert!(LayoutEngine::invalidate(&a, &b).is_empty());
}

#[test]
fn test_caption_never_negative() {
    let engine = engine();
    let left = spec("MS_HFB");
    let right = spec("LIAX");

    for width in (0..400).step_by(7) {
        for font in [1, 8, 12, 30] {
            let state = WindowState::new(width, 100);
            let geom = engine.compute_geometry(&state, &left, &right, font);

            let caption = geom.caption_rect;
            let lg = geom.left_group.rect();
            let rg = geom.right_group.rect();

            assert!(caption.size.width >= 0);
            assert_eq!(caption.left(), lg.right());
            assert_eq!(caption.right(), rg.left());
            assert!(!lg.overlaps_with(rg), "groups overlap at width {width}");
            assert!(!caption.overlaps_with(lg));
            assert!(!caption.overlaps_with(rg));
        }
    }
}

#[test]
fn test_title_height_monotonic() {
    let engine = engine();
    let mut last = 0;

    for font in 1..300 {
        let height = engine.title_bar_height(font);
        assert!(height >= last, "title height dropped at font {font}");
        assert!(height >= engine.config().min_title_height);
        last = height;
    }
}

#[test]
fn test_compute_is_idempotent() {
    let engine = engine();
    let mut state = WindowState::new(1024, 768).with_caption("terminal");
    state.is_shaded = true;
    state.set_capability(Capabilities::SHADEABLE, false);

    let left = spec("MSH");
    let right = spec("L_IAX");

    let a = engine.compute_geometry(&state, &left, &right, 17);
    let b = engine.compute_geometry(&state, &left, &right, 17);

    assert_eq!(a, b);
}

#[test]
fn test_maximized_bottom_border_not_larger() {
    for preset in [ThemePreset::Minimal, ThemePreset::Themed] {
        let engine = LayoutEngine::new(ThemeConfig::preset(preset));
        let mut state = WindowState::new(500, 500);

        let normal = engine.compute_geometry(&state, &ButtonSpec::empty(), &ButtonSpec::empty(), 12);
        state.is_maximized = true;
        let maximized = engine.compute_geometry(&state, &ButtonSpec::empty(), &ButtonSpec::empty(), 12);

        assert!(maximized.border_bottom <= normal.border_bottom);
        assert_eq!(maximized.border_bottom, maximized.border_left);
        assert!(maximized.grab_handles.is_none());
    }
}

#[test]
fn test_grab_handles_partition_bottom_border() {
    let engine = engine();

    for width in [0, 1, 10, 47, 48, 49, 100, 800] {
        let state = WindowState::new(width, 100);
        let geom = engine.compute_geometry(&state, &ButtonSpec::empty(), &spec("X"), 12);

        let GrabHandles { left, center, right } = geom.grab_handles.expect("no grab handles");
        let bottom = geom.bottom_rect();

        assert_eq!(left.left(), bottom.left());
        assert_eq!(left.right(), center.left());
        assert_eq!(center.right(), right.left());
        assert_eq!(right.right(), bottom.right());

        for handle in [left, center, right] {
            assert_eq!(handle.top(), bottom.top());
            assert_eq!(handle.size.height, geom.border_bottom);
            assert!(handle.size.width >= 0);
        }
    }
}

#[test]
fn test_shaded_collapses_client() {
    let engine = engine();
    let mut state = WindowState::new(400, 300);
    state.is_shaded = true;

    let geom = engine.compute_geometry(&state, &ButtonSpec::empty(), &spec("X"), 12);

    assert_eq!(geom.frame_rect.size.height, geom.title_bar_height + geom.border_bottom);
    assert_eq!(geom.client_rect().size.height, 0);
}

#[test]
fn test_strips_tile_frame() {
    let engine = engine();
    let state = WindowState::new(320, 240);
    let geom = engine.compute_geometry(&state, &spec("M"), &spec("IAX"), 14);

    let strips = geom.decoration_strips();
    let client = geom.client_rect();

    let total: i64 = strips.iter().map(|r| area(*r)).sum::<i64>() + area(client);
    assert_eq!(total, area(geom.frame_rect));

    for (i, a) in strips.iter().enumerate() {
        assert!(!a.overlaps_with(client));
        for b in strips.iter().skip(i + 1) {
            assert!(!a.overlaps_with(*b));
        }
    }
}

#[test]
fn test_shaded_strips_cover_frame() {
    let engine = engine();
    let mut state = WindowState::new(320, 240);
    state.is_shaded = true;

    let geom = engine.compute_geometry(&state, &ButtonSpec::empty(), &spec("X"), 12);

    assert_eq!(geom.decoration_strips(), vec![geom.frame_rect]);
}

#[test]
fn test_huge_window_does_not_overflow() {
    let engine = engine();
    let state = WindowState::new(i32::MAX, i32::MAX);

    let geom = engine.compute_geometry(&state, &spec("MS"), &spec("IAX"), 12);

    assert_eq!(geom.frame_rect.size.width, i32::MAX);
    assert_eq!(geom.frame_rect.size.height, i32::MAX);
    assert!(geom.caption_rect.size.width >= 0);

    for button in geom.buttons() {
        assert!(geom.frame_rect.contains(&button.rect));
    }
}

#[test]
fn test_crowded_title_stays_inside_frame() {
    let engine = engine();
    let left = spec("MS_HFB");
    let right = spec("LIAX");

    for width in [0, 5, 20, 60] {
        let state = WindowState::new(width, 100);
        let geom = engine.compute_geometry(&state, &left, &right, 12);

        // the right group is pushed out rather than over the left group
        assert!(geom.right_group.rect().right() > geom.frame_rect.right());

        for kind in geom.right_group.kinds() {
            let rect = geom.button_rect(kind).expect("visible button has no rect");
            assert!(geom.frame_rect.contains(&rect) || rect.is_empty());
        }

        let past_edge = Pos::new(geom.frame_rect.right(), geom.right_group.origin.y);
        assert!(geom.button_at(past_edge).is_none());

        // the group shrinks but stays pushed out
        let mut uncloseable = state.clone();
        uncloseable.set_capability(Capabilities::CLOSEABLE, false);
        let new = engine.compute_geometry(&uncloseable, &left, &right, 12);

        let damage = LayoutEngine::invalidate(&geom, &new);
        assert!(!damage.is_full());
        assert!(damage.iter().all(|r| new.frame_rect.contains(r)));
    }
}

#[test]
fn test_spacer_takes_spacer_width() {
    let engine = engine();
    let cfg = engine.config().clone();
    let state = WindowState::new(400, 100);

    let geom = engine.compute_geometry(&state, &spec("M_S"), &ButtonSpec::empty(), 12);
    let widths: Vec<_> = geom.left_group.buttons.iter().map(|b| b.rect.size.width).collect();

    assert_eq!(widths, vec![geom.button_size, cfg.spacer_width, geom.button_size]);
    assert_eq!(
        geom.left_group.size.width,
        2 * geom.button_size + cfg.spacer_width + 2 * cfg.button_spacing
    );
}

#[test]
fn test_button_hit_testing() {
    let engine = engine();
    let state = WindowState::new(400, 100);
    let geom = engine.compute_geometry(&state, &spec("M_"), &spec("IAX"), 12);

    let close = geom.button_rect(Close).expect("no close button");
    let hit = geom.button_at(close.point).expect("nothing hit");
    assert_eq!(hit.kind, Close);

    let spacer = geom.left_group.buttons[1].rect;
    assert_eq!(geom.left_group.buttons[1].kind, Spacer);
    assert!(geom.button_at(spacer.point).is_none());

    assert!(geom.button_at(geom.caption_rect.point).is_none());
}

#[test]
fn test_buttons_centered_vertically() {
    let engine = engine();
    let state = WindowState::new(400, 100);
    let geom = engine.compute_geometry(&state, &ButtonSpec::empty(), &spec("X"), 40);

    let close = geom.button_rect(Close).expect("no close button");
    let above = close.top();
    let below = geom.title_bar_height - close.bottom();

    assert!((above - below).abs() <= 1);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "font height must be positive")]
fn test_zero_font_height_is_fatal_in_debug() {
    engine().title_bar_height(0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "must not be negative")]
fn test_negative_width_is_fatal_in_debug() {
    let state = WindowState::new(-1, 100);
    engine().compute_geometry(&state, &ButtonSpec::empty(), &ButtonSpec::empty(), 12);
}

#[cfg(not(debug_assertions))]
#[test]
fn test_bad_inputs_clamped_in_release() {
    let engine = engine();
    let state = WindowState::new(-5, -5);

    let geom = engine.compute_geometry(&state, &ButtonSpec::empty(), &ButtonSpec::empty(), 0);

    assert_eq!(geom.title_bar_height, engine.title_bar_height(1));
    assert_eq!(geom.client_rect().size.width, 0);
    assert_eq!(geom.client_rect().size.height, 0);
}
