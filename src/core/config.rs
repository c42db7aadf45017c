use super::ambience::AmbiencePreset;
use super::animator::PhysicsStep;

pub const DEFAULT_DEBRIS_COUNT: usize = 50;
pub const MAX_DEBRIS_COUNT: usize = 500;
pub const DEFAULT_DISTORTION_SCALE: f32 = 0.5;
pub const MAX_DISTORTION_SCALE: f32 = 2.0;

/// Alternative ways of building the creature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurtleVariant {
    /// Sphere body, shell dome and the humanoid face.
    #[default]
    Procedural,
    /// Authored model with a looping swim clip on its root node.
    Rigged,
    /// Box body and head, nothing else.
    Boxy,
}

impl TurtleVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "procedural" | "face" => Some(TurtleVariant::Procedural),
            "rigged" | "model" | "gltf" => Some(TurtleVariant::Rigged),
            "boxy" | "box" => Some(TurtleVariant::Boxy),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            TurtleVariant::Procedural => TurtleVariant::Rigged,
            TurtleVariant::Rigged => TurtleVariant::Boxy,
            TurtleVariant::Boxy => TurtleVariant::Procedural,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TurtleVariant::Procedural => "procedural",
            TurtleVariant::Rigged => "rigged",
            TurtleVariant::Boxy => "boxy",
        }
    }
}

/// Startup choices for one page lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub turtle: TurtleVariant,
    pub ambience: AmbiencePreset,
    pub physics_step: PhysicsStep,
    /// Fixed RNG seed; `None` draws a fresh one per scene.
    pub seed: Option<u64>,
    pub debris_count: usize,
    pub distortion_scale: f32,
    pub log_level: log::Level,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            turtle: TurtleVariant::default(),
            ambience: AmbiencePreset::default(),
            physics_step: PhysicsStep::default(),
            seed: None,
            debris_count: DEFAULT_DEBRIS_COUNT,
            distortion_scale: DEFAULT_DISTORTION_SCALE,
            log_level: log::Level::Info,
        }
    }
}

impl SceneConfig {
    /// Read settings from a URL query such as `?turtle=box&seed=7`.
    ///
    /// Unknown keys and bad values are logged and leave the default in place.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if !config.apply(key, value) {
                log::warn!("[config] ignoring {}={:?}", key, value);
            }
        }
        config
    }

    /// Apply one `key=value` setting. Returns false if it was not understood.
    pub fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "turtle" => TurtleVariant::parse(value)
                .map(|v| self.turtle = v)
                .is_some(),
            "ambience" | "audio" => AmbiencePreset::parse(value)
                .map(|v| self.ambience = v)
                .is_some(),
            "step" => PhysicsStep::parse(value)
                .map(|v| self.physics_step = v)
                .is_some(),
            "seed" => value.parse::<u64>().map(|v| self.seed = Some(v)).is_ok(),
            "debris" => value
                .parse::<usize>()
                .map(|v| self.debris_count = v.min(MAX_DEBRIS_COUNT))
                .is_ok(),
            "distortion" => match value.parse::<f32>() {
                Ok(v) if v.is_finite() => {
                    self.distortion_scale = v.clamp(0.0, MAX_DISTORTION_SCALE);
                    true
                }
                _ => false,
            },
            "log" => value
                .parse::<log::Level>()
                .map(|v| self.log_level = v)
                .is_ok(),
            _ => false,
        }
    }
}
