// Host-side tests for the orbit camera and input mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}
mod input {
    include!("../src/input.rs");
}

use camera::OrbitCamera;
use constants::*;
use glam::{Vec2, Vec3, Vec4};
use input::*;

fn start_camera() -> OrbitCamera {
    OrbitCamera::looking_at(CAMERA_START_EYE, Vec3::ZERO, 16.0 / 9.0)
}

#[test]
fn camera_starts_at_configured_eye() {
    let cam = start_camera();
    assert!((cam.eye() - CAMERA_START_EYE).length() < 1e-4);
    assert!((cam.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    assert_eq!(cam.znear, 0.1);
    assert_eq!(cam.zfar, 1000.0);
}

#[test]
fn target_projects_to_screen_center() {
    let cam = start_camera();
    let clip = cam.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn orbit_keeps_distance_and_clamps_pitch() {
    let mut cam = start_camera();
    let d = cam.distance;
    cam.orbit(200.0, 0.0);
    assert!(((cam.eye() - cam.target).length() - d).abs() < 1e-4);
    cam.orbit(0.0, 100_000.0);
    assert_eq!(cam.pitch, CAMERA_PITCH_LIMIT);
    cam.orbit(0.0, -100_000.0);
    assert_eq!(cam.pitch, -CAMERA_PITCH_LIMIT);
}

#[test]
fn zoom_is_clamped() {
    let mut cam = start_camera();
    let before = cam.distance;
    cam.zoom(-100.0);
    assert!(cam.distance < before);
    for _ in 0..100 {
        cam.zoom(-900.0);
    }
    assert_eq!(cam.distance, CAMERA_MIN_DISTANCE);
    for _ in 0..100 {
        cam.zoom(5000.0);
    }
    assert_eq!(cam.distance, CAMERA_MAX_DISTANCE);
}

#[test]
fn viewport_sets_aspect_and_tolerates_zero() {
    let mut cam = start_camera();
    cam.set_viewport(800, 400);
    assert_eq!(cam.aspect, 2.0);
    cam.set_viewport(0, 0);
    assert_eq!(cam.aspect, 1.0);
}

#[test]
fn keys_map_to_commands() {
    assert_eq!(command_for_key("r"), Some(SceneCommand::Rebuild));
    assert_eq!(command_for_key("R"), Some(SceneCommand::Rebuild));
    assert_eq!(command_for_key("t"), Some(SceneCommand::CycleTurtle));
    assert_eq!(command_for_key("p"), Some(SceneCommand::ToggleStepMode));
    assert_eq!(command_for_key("H"), Some(SceneCommand::ToggleOverlay));
    assert_eq!(command_for_key("Enter"), Some(SceneCommand::ToggleFullscreen));
    assert_eq!(command_for_key("Escape"), Some(SceneCommand::ExitFullscreen));
    assert_eq!(command_for_key("x"), None);
    assert_eq!(command_for_key(" "), None);
}

#[test]
fn drag_reports_deltas_for_owning_pointer_only() {
    let mut drag = DragState::default();
    assert_eq!(drag.drag_to(1, Vec2::new(5.0, 5.0)), None);

    drag.begin(1, Vec2::new(10.0, 10.0));
    assert_eq!(drag.drag_to(2, Vec2::new(50.0, 50.0)), None);
    assert_eq!(drag.drag_to(1, Vec2::new(13.0, 6.0)), Some(Vec2::new(3.0, -4.0)));
    assert_eq!(drag.drag_to(1, Vec2::new(13.0, 7.0)), Some(Vec2::new(0.0, 1.0)));

    assert!(!drag.end(2));
    assert!(drag.end(1));
    assert!(!drag.active);
    assert_eq!(drag.drag_to(1, Vec2::new(20.0, 20.0)), None);
}
