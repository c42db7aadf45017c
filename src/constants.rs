use glam::Vec3;

// Shared visual tuning constants used by the web frontend.

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_EYE: Vec3 = Vec3::new(0.0, 5.0, 10.0);
pub const CAMERA_MIN_DISTANCE: f32 = 2.0;
pub const CAMERA_MAX_DISTANCE: f32 = 60.0;
pub const CAMERA_PITCH_LIMIT: f32 = 1.45; // radians, keeps the eye off the poles
pub const ORBIT_RADIANS_PER_PX: f32 = 0.005;
pub const ZOOM_PER_WHEEL_UNIT: f32 = 0.001; // fractional distance change per deltaY

// Background
pub const CLEAR_COLOR: u32 = 0x001133;

// Ambient fill
pub const AMBIENT_COLOR: u32 = 0x6644ff;
pub const AMBIENT_INTENSITY: f32 = 2.0;

// Directional "moon" light
pub const MOON_COLOR: u32 = 0xff3366;
pub const MOON_INTENSITY: f32 = 3.0;
pub const MOON_POSITION: Vec3 = Vec3::new(5.0, 10.0, 2.0);

// Coloured point lights either side of the creature
pub const POINT_LIGHTS: [(u32, Vec3); 2] = [
    (0x00ffff, Vec3::new(-5.0, 5.0, 0.0)), // cyan
    (0xff00ff, Vec3::new(5.0, 5.0, 0.0)),  // magenta
];
pub const POINT_INTENSITY: f32 = 2.0;
pub const POINT_RANGE: f32 = 10.0;

// Scales light intensities into the shader's lighting range
pub const LIGHT_EXPOSURE: f32 = 0.3;

// Water plane height
pub const WATER_LEVEL: f32 = 0.0;
