// Host-side tests for URL query configuration.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod schedule {
        include!("../src/core/schedule.rs");
    }
    pub mod ambience {
        include!("../src/core/ambience.rs");
    }
    pub mod animator {
        include!("../src/core/animator.rs");
    }
    pub mod config {
        include!("../src/core/config.rs");
    }
}

use crate::core::ambience::AmbiencePreset;
use crate::core::animator::PhysicsStep;
use crate::core::config::*;

#[test]
fn empty_query_gives_defaults() {
    assert_eq!(SceneConfig::from_query(""), SceneConfig::default());
    assert_eq!(SceneConfig::from_query("?"), SceneConfig::default());
    let c = SceneConfig::default();
    assert_eq!(c.turtle, TurtleVariant::Procedural);
    assert_eq!(c.ambience, AmbiencePreset::Drone);
    assert_eq!(c.physics_step, PhysicsStep::Fixed);
    assert_eq!(c.seed, None);
    assert_eq!(c.debris_count, DEFAULT_DEBRIS_COUNT);
    assert_eq!(c.log_level, log::Level::Info);
}

#[test]
fn full_query_is_applied() {
    let c = SceneConfig::from_query(
        "?turtle=box&ambience=chorus&step=measured&seed=42&debris=12&distortion=1.25&log=debug",
    );
    assert_eq!(c.turtle, TurtleVariant::Boxy);
    assert_eq!(c.ambience, AmbiencePreset::Chorus);
    assert_eq!(c.physics_step, PhysicsStep::Measured);
    assert_eq!(c.seed, Some(42));
    assert_eq!(c.debris_count, 12);
    assert_eq!(c.distortion_scale, 1.25);
    assert_eq!(c.log_level, log::Level::Debug);
}

#[test]
fn audio_is_an_alias_for_ambience() {
    let c = SceneConfig::from_query("audio=B");
    assert_eq!(c.ambience, AmbiencePreset::Chorus);
}

#[test]
fn out_of_range_numbers_are_clamped() {
    let c = SceneConfig::from_query("debris=100000&distortion=9");
    assert_eq!(c.debris_count, MAX_DEBRIS_COUNT);
    assert_eq!(c.distortion_scale, MAX_DISTORTION_SCALE);
    let c = SceneConfig::from_query("distortion=-3");
    assert_eq!(c.distortion_scale, 0.0);
}

#[test]
fn bad_values_and_unknown_keys_keep_defaults() {
    let c = SceneConfig::from_query("turtle=dragon&seed=abc&debris=-1&distortion=NaN&log=loud&foo=1&bare");
    assert_eq!(c, SceneConfig::default());
}

#[test]
fn later_keys_override_earlier_ones() {
    let c = SceneConfig::from_query("turtle=box&turtle=rigged");
    assert_eq!(c.turtle, TurtleVariant::Rigged);
}

#[test]
fn apply_reports_whether_key_was_understood() {
    let mut c = SceneConfig::default();
    assert!(c.apply("seed", "7"));
    assert!(!c.apply("seed", "seven"));
    assert!(!c.apply("colour", "red"));
    assert_eq!(c.seed, Some(7));
}

#[test]
fn turtle_variants_cycle_through_all_three() {
    let start = TurtleVariant::Procedural;
    let cycle = [start.next(), start.next().next(), start.next().next().next()];
    assert_eq!(
        cycle,
        [TurtleVariant::Rigged, TurtleVariant::Boxy, TurtleVariant::Procedural]
    );
    for v in cycle {
        assert_eq!(TurtleVariant::parse(v.name()), Some(v));
    }
    assert_eq!(TurtleVariant::parse("gltf"), Some(TurtleVariant::Rigged));
    assert_eq!(TurtleVariant::parse("face"), Some(TurtleVariant::Procedural));
}
