//! Dataset markers, camera notifications, and style-reload behavior.

use strikemap_choreo_core::{
    historical_timeline, CameraEvent, Config, CoreEvent, Engine, Inputs, Side, SideConfig,
};
use strikemap_test_fixtures::{raw_records, rows_from_json, FixedCamera, MockRenderer};

fn engine_with_records() -> Engine {
    let mut e = Engine::new(Config::default());
    e.load_timeline(historical_timeline());
    e.load_records(raw_records());
    e
}

#[test]
fn load_builds_side_bases_plus_one_marker_per_valid_record() {
    let mut e = engine_with_records();
    let cam = FixedCamera::default();
    let mut r = MockRenderer::new();

    // The fixture has nine rows, one with a malformed coordinate.
    assert_eq!(e.records().len(), 8);

    e.notify_camera(CameraEvent::Load, &cam, &mut r);
    assert_eq!(r.markers_live(), 2 + 8);
}

#[test]
fn dropped_row_is_reported_once_as_record_skipped() {
    let mut e = engine_with_records();
    let cam = FixedCamera::default();
    let mut r = MockRenderer::new();

    // The malformed fixture row sits at index 8; the host hears about it on
    // the first tick after the load, and only there.
    let out = e.update(0.0, Inputs::default(), &cam, &mut r);
    assert_eq!(out.events, vec![CoreEvent::RecordSkipped { index: 8 }]);
    let out = e.update(16.0, Inputs::default(), &cam, &mut r);
    assert!(out.is_empty());
}

#[test]
fn default_side_knob_flips_unmatched_records() {
    // Country and target match no side keyword, so classification falls to
    // the configured default.
    let raw = r#"[{
        "lat": "20.5000°N",
        "lng": "38.5000°E",
        "country": "International waters",
        "target": "Unflagged vessel",
        "description": "No keyword matches either side list"
    }]"#;
    let rows = rows_from_json(raw).expect("rows should parse");

    let mut e = Engine::new(Config::default());
    e.load_records(&rows);
    assert_eq!(e.records()[0].side, Side::IranAligned);

    let mut e = Engine::new(Config::default()).with_side_config(SideConfig {
        default_side: Side::UsAligned,
        ..SideConfig::default()
    });
    e.load_records(&rows);
    assert_eq!(e.records()[0].side, Side::UsAligned);
}

#[test]
fn style_reload_rebuilds_markers_without_duplication() {
    let mut e = engine_with_records();
    let cam = FixedCamera::default();
    let mut r = MockRenderer::new();

    e.notify_camera(CameraEvent::Load, &cam, &mut r);
    let live = r.markers_live();
    e.notify_camera(
        CameraEvent::StyleReloaded {
            style_key: "darkmatter".to_string(),
        },
        &cam,
        &mut r,
    );
    assert_eq!(r.markers_live(), live);
    assert_eq!(e.style_key(), "darkmatter");
}

#[test]
fn camera_change_repositions_every_subscribed_overlay() {
    let mut e = engine_with_records();
    let cam = FixedCamera::default();
    let mut r = MockRenderer::new();

    e.notify_camera(CameraEvent::Load, &cam, &mut r);
    let live = r.live_count();
    let moved_before = r.moved;
    e.notify_camera(CameraEvent::CameraChange, &cam, &mut r);
    assert_eq!(r.moved - moved_before, live);

    // A zoomed camera puts every marker somewhere new.
    let zoomed = FixedCamera { scale: 20.0 };
    e.notify_camera(CameraEvent::CameraChange, &zoomed, &mut r);
    for (_, v) in r.live() {
        assert!(v.moves >= 2);
    }
}

#[test]
fn set_style_signals_sprite_inversion_for_dark_basemaps() {
    let mut e = engine_with_records();
    let cam = FixedCamera::default();
    let mut r = MockRenderer::new();

    // Drain the load-time record report before asserting exact event sets.
    e.update(0.0, Inputs::default(), &cam, &mut r);

    let inputs = Inputs {
        commands: vec![strikemap_choreo_core::Command::SetStyle {
            key: "darkmatter".to_string(),
        }],
    };
    let out = e.update(16.0, inputs, &cam, &mut r);
    assert_eq!(
        out.events,
        vec![CoreEvent::StyleChanged {
            key: "darkmatter".to_string(),
            invert_sprites: true,
        }]
    );

    let inputs = Inputs {
        commands: vec![strikemap_choreo_core::Command::SetStyle {
            key: "satellite".to_string(),
        }],
    };
    let out = e.update(32.0, inputs, &cam, &mut r);
    assert_eq!(
        out.events,
        vec![CoreEvent::StyleChanged {
            key: "satellite".to_string(),
            invert_sprites: false,
        }]
    );
}

#[test]
fn markers_survive_scrubs_but_choreography_visuals_do_not() {
    let mut e = engine_with_records();
    let cam = FixedCamera::default();
    let mut r = MockRenderer::new();

    e.notify_camera(CameraEvent::Load, &cam, &mut r);
    let markers = r.markers_live();

    e.update(0.0, Inputs::jump_to(3), &cam, &mut r);
    assert_eq!(r.circles_live(), 3);
    e.update(100.0, Inputs::jump_to(1), &cam, &mut r);
    assert_eq!(r.circles_live(), 0);
    assert_eq!(r.markers_live(), markers);
}
