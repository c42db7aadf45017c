// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_limits_are_consistent() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_MIN_DISTANCE < CAMERA_MAX_DISTANCE);
    let start = CAMERA_START_EYE.length();
    assert!(start > CAMERA_MIN_DISTANCE && start < CAMERA_MAX_DISTANCE);
    assert!(CAMERA_PITCH_LIMIT < std::f32::consts::FRAC_PI_2);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn snap_window_fits_in_period() {
    // The snap fires in the first whole second of each window.
    assert!(SNAP_PERIOD_SECS > 1.0);
    assert_eq!(SNAP_PERIOD_SECS.fract(), 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn physics_constants_are_sane() {
    assert!(GRAVITY > 0.0);
    assert!(BOUNCE_RESTITUTION > 0.0 && BOUNCE_RESTITUTION < 1.0);
    assert!(CONTACT_DAMPING > 0.0 && CONTACT_DAMPING < 1.0);
    assert!(FIXED_STEP_SECS <= MAX_MEASURED_STEP_SECS);
    // Figure starts above the ground and the creature hovers above it too.
    assert!(FIGURE_START[1] > GROUND_HEIGHT);
    assert!(CREATURE_BASE_HEIGHT - CREATURE_BOB_AMPLITUDE > WATER_LEVEL);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ambience_sweeps_stay_audible() {
    assert!(DRONE_BASE_HZ - DRONE_DEPTH_HZ > 20.0);
    assert!(DRONE_BASE_GAIN - DRONE_GAIN_DEPTH > 0.0);
    assert!(CHORUS_LOW_BASE_HZ - CHORUS_LOW_DEPTH_HZ > 20.0);
    assert!(CHORUS_HIGH_BASE_HZ + CHORUS_HIGH_DEPTH_HZ < CHORUS_CUTOFF_HZ);
    assert!(DRONE_BASE_HZ + DRONE_DEPTH_HZ < DRONE_CUTOFF_HZ);
    assert_eq!(AMBIENCE_INTERVAL_MS, 50);
}

#[test]
fn light_colors_are_distinct() {
    assert_ne!(POINT_LIGHTS[0].0, POINT_LIGHTS[1].0);
    assert_eq!(POINT_LIGHTS[0].1.y, POINT_LIGHTS[1].1.y);
    assert!(POINT_RANGE > 0.0 && POINT_INTENSITY > 0.0);
}
