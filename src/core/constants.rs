// Animation, physics and ambience tuning constants.
// Rates are in radians per second, lengths in world units, times in seconds.

// Creature hover and sway
pub const CREATURE_BASE_HEIGHT: f32 = 2.0;
pub const CREATURE_BOB_AMPLITUDE: f32 = 0.5;
pub const CREATURE_YAW_RATE: f64 = 0.5;
pub const CREATURE_YAW_AMPLITUDE: f32 = 0.3;
pub const CREATURE_ROLL_RATE: f64 = 0.7;
pub const CREATURE_ROLL_AMPLITUDE: f32 = 0.1;

// Face wobble relative to the body
pub const FACE_YAW_RATE: f64 = 0.3;
pub const FACE_PITCH_RATE: f64 = 0.4;
pub const FACE_WOBBLE_AMPLITUDE: f32 = 0.1;

// Snap (teleport) event
pub const SNAP_PERIOD_SECS: f64 = 3.0; // one snap per window of this length
pub const SNAP_RANGE: f32 = 10.0; // creature x/z land in [-RANGE/2, RANGE/2)

// Impulse kicked into the figure on every snap
pub const IMPULSE_UP_SPEED: f32 = 5.0;
pub const IMPULSE_SIDE_RANGE: f32 = 3.0; // vx in [-1.5, 1.5)
pub const IMPULSE_SPIN_RANGE: f32 = 10.0; // spin in [-5, 5)

// Rag-doll integration
pub const GRAVITY: f32 = 9.8;
pub const FIXED_STEP_SECS: f32 = 0.016;
pub const MAX_MEASURED_STEP_SECS: f32 = 0.1; // clamp for tab-switch stalls
pub const GROUND_HEIGHT: f32 = 1.0;
pub const BOUNCE_RESTITUTION: f32 = 0.5;
pub const CONTACT_DAMPING: f32 = 0.8;

// Initial placements
pub const FIGURE_START: [f32; 3] = [2.0, 3.0, 0.0];

// Ambience loop
pub const AMBIENCE_INTERVAL_MS: u64 = 50;

// Drone preset (single sine through a low-pass)
pub const DRONE_BASE_HZ: f32 = 100.0;
pub const DRONE_DEPTH_HZ: f32 = 20.0;
pub const DRONE_LFO_RATE: f64 = 0.1;
pub const DRONE_BASE_GAIN: f32 = 0.1;
pub const DRONE_GAIN_DEPTH: f32 = 0.05;
pub const DRONE_CUTOFF_HZ: f32 = 400.0;

// Chorus preset (two "singing" oscillators sharing a gain)
pub const CHORUS_LOW_BASE_HZ: f32 = 300.0;
pub const CHORUS_LOW_DEPTH_HZ: f32 = 100.0;
pub const CHORUS_LOW_RATE: f64 = 0.5;
pub const CHORUS_HIGH_BASE_HZ: f32 = 400.0;
pub const CHORUS_HIGH_DEPTH_HZ: f32 = 150.0;
pub const CHORUS_HIGH_RATE: f64 = 0.3;
pub const CHORUS_GAIN: f32 = 0.15;
pub const CHORUS_CUTOFF_HZ: f32 = 1200.0;
