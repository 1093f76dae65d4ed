//! Settings Tests
//!
//! Tests for:
//! - Reference defaults
//! - Partial JSON overrides
//! - Renderer settings derived from mascot settings

use glam::Vec3;
use howl::animation::Smoothing;
use howl::config::MascotSettings;
use howl::input::PointerMode;
use howl::HowlError;

#[test]
fn defaults_match_reference_scene() {
    let s = MascotSettings::default();
    assert_eq!(s.container_id, "canvas-container");
    assert_eq!(s.camera.fov, 50.0);
    assert_eq!(s.camera.position, Vec3::new(0.0, 0.5, 5.0));
    assert_eq!(s.lights.ambient.intensity, 0.6);
    assert_eq!(s.lights.key.position, Vec3::new(5.0, 5.0, 5.0));
    assert_eq!(s.lights.rim.color, 0xff5722);
    assert_eq!(s.lights.rim.position, Vec3::new(-5.0, 5.0, 0.0));
    assert_eq!(s.pointer_mode, PointerMode::Unclamped);
    assert_eq!(s.clear_color, [0.0; 4]);
    assert_eq!(s.msaa_samples, 4);
}

#[test]
fn empty_json_is_default() {
    let s = MascotSettings::from_json("{}").expect("valid json");
    assert_eq!(s, MascotSettings::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let s = MascotSettings::from_json(
        r#"{
            "container_id": "hero",
            "pointer_mode": "clamped",
            "camera": { "fov": 35.0 },
            "animation": { "smoothing": { "kind": "time_normalized", "rate": 4.0 } },
            "wolf": { "head_radius": 1.5 }
        }"#,
    )
    .expect("valid json");

    assert_eq!(s.container_id, "hero");
    assert_eq!(s.pointer_mode, PointerMode::Clamped);
    assert_eq!(s.camera.fov, 35.0);
    assert_eq!(s.camera.near, 0.1);
    assert_eq!(s.animation.smoothing, Smoothing::TimeNormalized { rate: 4.0 });
    assert_eq!(s.animation.yaw_scale, 0.6);
    assert_eq!(s.wolf.head_radius, 1.5);
    assert_eq!(s.wolf.eye_segments, 16);
}

#[test]
fn malformed_json_is_an_error() {
    let err = MascotSettings::from_json("{ container_id: }").expect_err("invalid json");
    assert!(matches!(err, HowlError::SettingsError(_)));
}

#[test]
fn renderer_settings_carry_clear_color_and_vsync() {
    let s = MascotSettings::from_json(r#"{ "clear_color": [0.1, 0.2, 0.3, 1.0], "vsync": false }"#).expect("valid json");
    let r = s.renderer_settings();
    assert!(!r.vsync);
    assert_eq!(r.clear_color, wgpu::Color { r: 0.1, g: 0.2, b: 0.3, a: 1.0 });
    assert!(!r.wants_transparency());
}

#[test]
fn default_renderer_is_transparent() {
    assert!(MascotSettings::default().renderer_settings().wants_transparency());
}

#[test]
fn antialiasing_is_on_by_default() {
    let r = MascotSettings::default().renderer_settings();
    assert_eq!(r.msaa_samples, 4);
    assert!(r.is_multisampled());
}

#[test]
fn msaa_override_reaches_renderer_settings() {
    let off = MascotSettings::from_json(r#"{ "msaa_samples": 1 }"#).expect("valid json");
    assert!(!off.renderer_settings().is_multisampled());

    let zero = MascotSettings::from_json(r#"{ "msaa_samples": 0 }"#).expect("valid json");
    assert_eq!(zero.renderer_settings().sample_count(), 1);
}
