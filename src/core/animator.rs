use super::constants::*;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;

/// Position, Euler rotation (XYZ order) and scale of one animated node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

/// Linear and angular velocity of the rag-doll figure.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RagdollState {
    pub velocity: Vec3,
    pub angular_velocity: f32,
}

/// How the rag-doll integration step is sized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhysicsStep {
    /// Always advance by `FIXED_STEP_SECS`, whatever the display rate.
    #[default]
    Fixed,
    /// Advance by the measured time between frames.
    Measured,
}

impl PhysicsStep {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" | "Fixed" => Some(PhysicsStep::Fixed),
            "measured" | "Measured" => Some(PhysicsStep::Measured),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PhysicsStep::Fixed => PhysicsStep::Measured,
            PhysicsStep::Measured => PhysicsStep::Fixed,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PhysicsStep::Fixed => "fixed",
            PhysicsStep::Measured => "measured",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreaturePose {
    pub height: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Closed-form hover and sway of the creature at time `t`.
#[inline]
pub fn creature_pose(t: f64) -> CreaturePose {
    CreaturePose {
        height: CREATURE_BASE_HEIGHT + t.sin() as f32 * CREATURE_BOB_AMPLITUDE,
        yaw: (t * CREATURE_YAW_RATE).sin() as f32 * CREATURE_YAW_AMPLITUDE,
        roll: (t * CREATURE_ROLL_RATE).sin() as f32 * CREATURE_ROLL_AMPLITUDE,
    }
}

/// Rotation of the face group relative to the body.
#[inline]
pub fn face_wobble(t: f64) -> Vec3 {
    Vec3::new(
        (t * FACE_PITCH_RATE).cos() as f32 * FACE_WOBBLE_AMPLITUDE,
        (t * FACE_YAW_RATE).sin() as f32 * FACE_WOBBLE_AMPLITUDE,
        0.0,
    )
}

/// Whole-second bucket within the snap window; snaps happen in bucket 0.
#[inline]
pub fn snap_bucket(t: f64) -> u64 {
    t.floor().rem_euclid(SNAP_PERIOD_SECS) as u64
}

/// One semi-implicit Euler step of the figure. Returns true on ground contact.
pub fn step_ragdoll(figure: &mut Transform, ragdoll: &mut RagdollState, dt: f32) -> bool {
    ragdoll.velocity.y -= GRAVITY * dt;
    figure.position.x += ragdoll.velocity.x * dt;
    figure.position.y += ragdoll.velocity.y * dt;
    figure.rotation.z += ragdoll.angular_velocity * dt;

    if figure.position.y < GROUND_HEIGHT {
        figure.position.y = GROUND_HEIGHT;
        ragdoll.velocity.y = ragdoll.velocity.y.abs() * BOUNCE_RESTITUTION;
        ragdoll.velocity.x *= CONTACT_DAMPING;
        ragdoll.angular_velocity *= CONTACT_DAMPING;
        return true;
    }
    false
}

/// Emitted on the frame a snap fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapEvent {
    pub creature_x: f32,
    pub creature_z: f32,
    pub figure_velocity: Vec3,
    pub spin: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub snap: Option<SnapEvent>,
    pub contact: bool,
    pub dt: f32,
}

pub struct SceneAnimator<R: Rng = StdRng> {
    pub creature: Transform,
    pub face_rotation: Vec3,
    pub figure: Transform,
    pub ragdoll: RagdollState,
    has_snapped: bool,
    step: PhysicsStep,
    last_time: Option<f64>,
    rng: R,
}

impl SceneAnimator<StdRng> {
    pub fn new(seed: u64, step: PhysicsStep) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), step)
    }
}

impl<R: Rng> SceneAnimator<R> {
    pub fn with_rng(rng: R, step: PhysicsStep) -> Self {
        Self {
            creature: Transform::at(Vec3::new(0.0, CREATURE_BASE_HEIGHT, 0.0)),
            face_rotation: Vec3::ZERO,
            figure: Transform::at(Vec3::from_array(FIGURE_START)),
            ragdoll: RagdollState::default(),
            has_snapped: false,
            step,
            last_time: None,
            rng,
        }
    }

    pub fn has_snapped(&self) -> bool {
        self.has_snapped
    }

    pub fn step_mode(&self) -> PhysicsStep {
        self.step
    }

    pub fn set_step_mode(&mut self, step: PhysicsStep) {
        self.step = step;
    }

    /// Advance everything to absolute time `t` (seconds since start).
    pub fn update(&mut self, t: f64) -> FrameUpdate {
        let snap = self.update_snap(t);

        let pose = creature_pose(t);
        self.creature.rotation.y = pose.yaw;
        self.creature.position.y = pose.height;
        self.creature.rotation.z = pose.roll;
        self.face_rotation = face_wobble(t);

        let dt = self.physics_dt(t);
        let contact = step_ragdoll(&mut self.figure, &mut self.ragdoll, dt);
        FrameUpdate { snap, contact, dt }
    }

    fn update_snap(&mut self, t: f64) -> Option<SnapEvent> {
        if snap_bucket(t) != 0 {
            self.has_snapped = false;
            return None;
        }
        if self.has_snapped {
            return None;
        }
        self.has_snapped = true;

        let creature_x = (self.rng.gen::<f32>() - 0.5) * SNAP_RANGE;
        let creature_z = (self.rng.gen::<f32>() - 0.5) * SNAP_RANGE;
        self.creature.position.x = creature_x;
        self.creature.position.z = creature_z;

        self.ragdoll.velocity.y = IMPULSE_UP_SPEED;
        self.ragdoll.velocity.x = (self.rng.gen::<f32>() - 0.5) * IMPULSE_SIDE_RANGE;
        self.ragdoll.angular_velocity = (self.rng.gen::<f32>() - 0.5) * IMPULSE_SPIN_RANGE;

        Some(SnapEvent {
            creature_x,
            creature_z,
            figure_velocity: self.ragdoll.velocity,
            spin: self.ragdoll.angular_velocity,
        })
    }

    fn physics_dt(&mut self, t: f64) -> f32 {
        let prev = self.last_time.replace(t);
        match (self.step, prev) {
            (PhysicsStep::Measured, Some(p)) => ((t - p) as f32).clamp(0.0, MAX_MEASURED_STEP_SECS),
            _ => FIXED_STEP_SECS,
        }
    }
}
