// Host-side tests for the ambience presets and modulator loop.
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
}

use crate::core::ambience::*;
use crate::core::constants::*;
use crate::core::schedule::{Cadence, Clock, ManualClock};
use std::time::Duration;

#[test]
fn drone_starts_at_base_values() {
    let p = params_at(AmbiencePreset::Drone, 0.0);
    assert_eq!(p.frequencies_hz.as_slice(), &[DRONE_BASE_HZ]);
    assert_eq!(p.gain, DRONE_BASE_GAIN);
}

#[test]
fn drone_stays_within_sweep() {
    for i in 0..5000 {
        let p = params_at(AmbiencePreset::Drone, i as f64 * 0.37);
        let f = p.frequencies_hz[0];
        assert!((80.0 - 1e-3..=120.0 + 1e-3).contains(&f), "freq {}", f);
        assert!((0.05 - 1e-6..=0.15 + 1e-6).contains(&p.gain), "gain {}", p.gain);
    }
}

#[test]
fn chorus_starts_at_expected_pair() {
    let p = params_at(AmbiencePreset::Chorus, 0.0);
    assert_eq!(p.frequencies_hz.as_slice(), &[300.0, 550.0]);
    assert_eq!(p.gain, CHORUS_GAIN);
}

#[test]
fn chorus_voices_stay_in_band_with_constant_gain() {
    for i in 0..5000 {
        let p = params_at(AmbiencePreset::Chorus, i as f64 * 0.21);
        let (lo, hi) = (p.frequencies_hz[0], p.frequencies_hz[1]);
        assert!((200.0 - 1e-3..=400.0 + 1e-3).contains(&lo), "low {}", lo);
        assert!((250.0 - 1e-3..=550.0 + 1e-3).contains(&hi), "high {}", hi);
        assert_eq!(p.gain, CHORUS_GAIN);
    }
}

#[test]
fn preset_shape_matches_oscillator_count() {
    for preset in [AmbiencePreset::Drone, AmbiencePreset::Chorus] {
        let p = params_at(preset, 12.5);
        assert_eq!(p.frequencies_hz.len(), preset.oscillator_count());
        assert!(preset.cutoff_hz() > 0.0);
    }
    assert_eq!(AmbiencePreset::Drone.cutoff_hz(), 400.0);
    assert_eq!(AmbiencePreset::Chorus.cutoff_hz(), 1200.0);
}

#[test]
fn preset_parse_accepts_aliases() {
    assert_eq!(AmbiencePreset::default(), AmbiencePreset::Drone);
    assert_eq!(AmbiencePreset::parse("ambient"), Some(AmbiencePreset::Drone));
    assert_eq!(AmbiencePreset::parse("A"), Some(AmbiencePreset::Drone));
    assert_eq!(AmbiencePreset::parse("singing"), Some(AmbiencePreset::Chorus));
    assert_eq!(AmbiencePreset::parse("b"), Some(AmbiencePreset::Chorus));
    assert_eq!(AmbiencePreset::parse("techno"), None);
}

#[test]
fn modulator_ticks_every_fifty_ms() {
    let m = AmbienceModulator::new(AmbiencePreset::Chorus);
    assert_eq!(m.cadence(), Cadence::Interval(Duration::from_millis(50)));
    assert_eq!(m.cadence().interval_ms(), Some(50));
    assert_eq!(m.preset(), AmbiencePreset::Chorus);
}

#[test]
fn modulator_is_silent_until_started() {
    let mut m = AmbienceModulator::new(AmbiencePreset::Drone);
    assert!(!m.is_running());
    assert!(m.poll(1.0).is_none());
}

#[test]
fn modulator_values_follow_absolute_audio_time() {
    let clock = ManualClock::new(4.0);
    let mut m = AmbienceModulator::new(AmbiencePreset::Drone);
    assert!(m.start(clock.now_secs()));
    for _ in 0..20 {
        clock.advance(0.05);
        let now = clock.now_secs();
        let p = m.poll(now).expect("running modulator ticks");
        assert_eq!(p, params_at(AmbiencePreset::Drone, now));
    }
}

#[test]
fn cancelled_modulator_stops_producing() {
    let mut m = AmbienceModulator::new(AmbiencePreset::Chorus);
    m.start(0.0);
    assert!(m.poll(0.05).is_some());
    assert!(m.cancel());
    assert!(!m.is_running());
    assert!(m.poll(0.10).is_none());
    assert!(m.poll(0.15).is_none());
}
