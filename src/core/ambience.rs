use super::constants::*;
use super::schedule::{Cadence, Ticker};
use smallvec::{smallvec, SmallVec};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmbiencePreset {
    /// Single low sine drifting around 100 Hz with a breathing gain.
    #[default]
    Drone,
    /// Two "singing" oscillators at a constant level.
    Chorus,
}

impl AmbiencePreset {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "drone" | "ambient" | "a" | "A" => Some(AmbiencePreset::Drone),
            "chorus" | "singing" | "b" | "B" => Some(AmbiencePreset::Chorus),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AmbiencePreset::Drone => "drone",
            AmbiencePreset::Chorus => "chorus",
        }
    }

    pub fn oscillator_count(self) -> usize {
        match self {
            AmbiencePreset::Drone => 1,
            AmbiencePreset::Chorus => 2,
        }
    }

    pub fn cutoff_hz(self) -> f32 {
        match self {
            AmbiencePreset::Drone => DRONE_CUTOFF_HZ,
            AmbiencePreset::Chorus => CHORUS_CUTOFF_HZ,
        }
    }
}

/// Target values for one ambience tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioParams {
    pub frequencies_hz: SmallVec<[f32; 2]>,
    pub gain: f32,
}

/// Oscillator frequencies and shared gain at audio time `t`.
pub fn params_at(preset: AmbiencePreset, t: f64) -> AudioParams {
    match preset {
        AmbiencePreset::Drone => AudioParams {
            frequencies_hz: smallvec![
                DRONE_BASE_HZ + (t * DRONE_LFO_RATE).sin() as f32 * DRONE_DEPTH_HZ
            ],
            gain: DRONE_BASE_GAIN + (t * DRONE_LFO_RATE * 0.5).sin() as f32 * DRONE_GAIN_DEPTH,
        },
        AmbiencePreset::Chorus => AudioParams {
            frequencies_hz: smallvec![
                CHORUS_LOW_BASE_HZ + (t * CHORUS_LOW_RATE).sin() as f32 * CHORUS_LOW_DEPTH_HZ,
                CHORUS_HIGH_BASE_HZ + (t * CHORUS_HIGH_RATE).cos() as f32 * CHORUS_HIGH_DEPTH_HZ,
            ],
            gain: CHORUS_GAIN,
        },
    }
}

/// The ambience loop: a preset plus the ticker gating its updates.
pub struct AmbienceModulator {
    preset: AmbiencePreset,
    ticker: Ticker,
}

impl AmbienceModulator {
    pub fn new(preset: AmbiencePreset) -> Self {
        Self {
            preset,
            ticker: Ticker::new(Cadence::Interval(Duration::from_millis(
                AMBIENCE_INTERVAL_MS,
            ))),
        }
    }

    pub fn preset(&self) -> AmbiencePreset {
        self.preset
    }

    pub fn cadence(&self) -> Cadence {
        self.ticker.cadence()
    }

    pub fn start(&mut self, audio_time: f64) -> bool {
        self.ticker.start(audio_time)
    }

    pub fn cancel(&mut self) -> bool {
        self.ticker.cancel()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Parameters for this tick, or `None` once cancelled.
    ///
    /// The values depend on absolute audio time, not on how many ticks ran.
    pub fn poll(&mut self, audio_time: f64) -> Option<AudioParams> {
        self.ticker.tick(audio_time)?;
        Some(params_at(self.preset, audio_time))
    }
}
