use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_NEAR,
    CAMERA_PITCH_LIMIT, ORBIT_RADIANS_PER_PX, ZOOM_PER_WHEEL_UNIT,
};
use glam::{Mat4, Vec3};

/// Perspective camera orbiting a target point.
///
/// Position is kept as spherical coordinates around `target` so pointer
/// drags map directly onto yaw/pitch and the wheel onto distance.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn looking_at(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset
            .length()
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
        Self {
            target,
            distance,
            yaw,
            pitch,
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOV_Y_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Rotate around the target by a pointer drag in pixels.
    pub fn orbit(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * ORBIT_RADIANS_PER_PX;
        self.pitch = (self.pitch + dy_px * ORBIT_RADIANS_PER_PX)
            .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
    }

    /// Dolly in (negative) or out (positive) by a wheel delta.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let factor = (1.0 + wheel_delta * ZOOM_PER_WHEEL_UNIT).max(0.1);
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
