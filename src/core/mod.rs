pub mod ambience;
pub mod animator;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod model;
pub mod schedule;
pub mod slot;

pub use ambience::*;
pub use animator::*;
pub use config::*;
pub use model::*;
pub use schedule::*;
pub use slot::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static WATER_WGSL: &str = include_str!("../../shaders/water.wgsl");
