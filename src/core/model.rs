use super::animator::{SceneAnimator, Transform};
use super::config::{SceneConfig, TurtleVariant};
use super::geometry::{self, MeshData};
use fnv::FnvHashMap;
use glam::{Mat4, Vec2, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, PI};

// Face group sits at the front of the body
pub const FACE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 1.8);

// Debris scatter volume
pub const DEBRIS_SPREAD_XZ: f32 = 40.0;
pub const DEBRIS_SPREAD_Y: f32 = 10.0;

// Water surface
pub const WATER_SIZE: f32 = 100.0;
pub const WATER_SEGMENTS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Meshes shared between parts, interned by name.
#[derive(Default)]
pub struct MeshLibrary {
    meshes: Vec<MeshData>,
    by_name: FnvHashMap<&'static str, MeshId>,
}

impl MeshLibrary {
    /// Return the mesh registered under `name`, building it on first use.
    pub fn intern(&mut self, name: &'static str, build: impl FnOnce() -> MeshData) -> MeshId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = MeshId(self.meshes.len());
        self.meshes.push(build());
        self.by_name.insert(name, id);
        id
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }
}

/// Node a part is attached to; each group gets one world matrix per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    World,
    Creature,
    Face,
    Figure,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub specular: [f32; 3],
    pub shininess: f32,
}

#[inline]
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

impl Material {
    pub fn phong(color: u32, shininess: f32) -> Self {
        Self {
            color: rgb(color),
            opacity: 1.0,
            specular: rgb(0x111111),
            shininess,
        }
    }

    pub fn with_specular(mut self, specular: u32) -> Self {
        self.specular = rgb(specular);
        self
    }

    pub fn translucent(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Flat colour with no highlight.
    pub fn matte(color: u32) -> Self {
        Self {
            color: rgb(color),
            opacity: 1.0,
            specular: [0.0; 3],
            shininess: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Part {
    pub mesh: MeshId,
    pub group: Group,
    pub local: Mat4,
    pub material: Material,
}

/// Parts in draw order: opaque first, then translucent, each run keeping its
/// build order.
pub fn draw_order(parts: &[Part]) -> Vec<Part> {
    let mut ordered = parts.to_vec();
    ordered.sort_by_key(|p| p.material.is_translucent());
    ordered
}

/// Looping keyframe track of Euler rotations, sampled linearly.
#[derive(Clone, Debug, PartialEq)]
pub struct SwimClip {
    times: SmallVec<[f32; 8]>,
    rotations: SmallVec<[Vec3; 8]>,
}

impl SwimClip {
    /// Keys must be sorted by time.
    pub fn new(keys: &[(f32, Vec3)]) -> Self {
        Self {
            times: keys.iter().map(|k| k.0).collect(),
            rotations: keys.iter().map(|k| k.1).collect(),
        }
    }

    /// Gentle pitch-and-roll stroke, two seconds long.
    pub fn swim() -> Self {
        Self::new(&[
            (0.0, Vec3::ZERO),
            (0.5, Vec3::new(0.08, 0.0, 0.12)),
            (1.0, Vec3::ZERO),
            (1.5, Vec3::new(-0.08, 0.0, -0.12)),
            (2.0, Vec3::ZERO),
        ])
    }

    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn sample(&self, t: f64) -> Vec3 {
        let Some(first) = self.rotations.first() else {
            return Vec3::ZERO;
        };
        let duration = self.duration();
        if duration <= 0.0 || self.times.len() < 2 {
            return *first;
        }
        let local = t.rem_euclid(duration as f64) as f32;
        let next = self.times.partition_point(|&k| k <= local).min(self.times.len() - 1);
        let prev = next.saturating_sub(1);
        let span = self.times[next] - self.times[prev];
        if span <= 0.0 {
            return self.rotations[prev];
        }
        let alpha = ((local - self.times[prev]) / span).clamp(0.0, 1.0);
        self.rotations[prev].lerp(self.rotations[next], alpha)
    }
}

/// Everything the renderer needs to draw one scene.
pub struct SceneModel {
    pub library: MeshLibrary,
    pub parts: Vec<Part>,
    pub water: MeshId,
    pub variant: TurtleVariant,
    pub swim: Option<SwimClip>,
}

struct Builder {
    library: MeshLibrary,
    parts: Vec<Part>,
}

impl Builder {
    fn add(&mut self, mesh: MeshId, group: Group, local: Transform, material: Material) {
        self.add_matrix(mesh, group, local.matrix(), material);
    }

    fn add_matrix(&mut self, mesh: MeshId, group: Group, local: Mat4, material: Material) {
        self.parts.push(Part {
            mesh,
            group,
            local,
            material,
        });
    }
}

pub fn build_scene_model<R: Rng>(config: &SceneConfig, rng: &mut R) -> SceneModel {
    let mut b = Builder {
        library: MeshLibrary::default(),
        parts: Vec::new(),
    };
    match config.turtle {
        TurtleVariant::Procedural => build_procedural_turtle(&mut b),
        TurtleVariant::Rigged => build_rigged_turtle(&mut b),
        TurtleVariant::Boxy => build_boxy_turtle(&mut b),
    }
    build_stick_figure(&mut b);
    scatter_debris(&mut b, config.debris_count, rng);
    let water = b
        .library
        .intern("water", || geometry::plane(WATER_SIZE, WATER_SIZE, WATER_SEGMENTS));

    SceneModel {
        library: b.library,
        parts: b.parts,
        water,
        variant: config.turtle,
        swim: (config.turtle == TurtleVariant::Rigged).then(SwimClip::swim),
    }
}

fn build_procedural_turtle(b: &mut Builder) {
    let body = b.library.intern("turtle_body", || geometry::sphere(1.5, 32, 32));
    b.add(
        body,
        Group::Creature,
        Transform::default().with_scale(Vec3::new(1.0, 0.4, 1.2)),
        Material::phong(0x00ff66, 100.0).with_specular(0x66ff00),
    );

    let face = b.library.intern("face", || geometry::sphere(0.4, 32, 32));
    b.add(face, Group::Face, Transform::default(), Material::phong(0xffe0bd, 50.0));

    let eye = b.library.intern("eye", || geometry::sphere(0.08, 16, 16));
    let iris = b.library.intern("iris", || geometry::sphere(0.04, 8, 8));
    for side in [-1.0_f32, 1.0] {
        b.add(
            eye,
            Group::Face,
            Transform::at(Vec3::new(0.15 * side, 0.1, 0.35)),
            Material::phong(0xffffff, 30.0),
        );
        b.add(
            iris,
            Group::Face,
            Transform::at(Vec3::new(0.15 * side, 0.1, 0.38)),
            Material::phong(0x000000, 30.0),
        );
    }

    let mouth = b.library.intern("mouth", || {
        geometry::curve_shape(
            Vec2::new(-0.15, -0.1),
            Vec2::new(0.0, -0.2),
            Vec2::new(0.15, -0.1),
            16,
        )
    });
    b.add(
        mouth,
        Group::Face,
        Transform::at(Vec3::new(0.0, 0.0, 0.35)),
        Material::matte(0x000000),
    );

    let shell_mesh = b
        .library
        .intern("shell", || geometry::sphere_section(1.2, 32, 32, 0.0, FRAC_PI_2));
    let shell = Transform::at(Vec3::new(0.0, 0.3, 0.0)).with_rotation(Vec3::new(PI, 0.0, 0.0));
    b.add(
        shell_mesh,
        Group::Creature,
        shell,
        Material::phong(0xff3366, 80.0).with_specular(0xff00ff),
    );

    // Pattern ring hangs off the shell, so it inherits the shell flip.
    let pattern = b.library.intern("shell_pattern", || geometry::torus(0.8, 0.1, 16, 6));
    let pattern_local = Transform::at(Vec3::new(0.0, 0.4, 0.0))
        .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
        .matrix();
    b.add_matrix(
        pattern,
        Group::Creature,
        shell.matrix() * pattern_local,
        Material::phong(0xff99cc, 30.0),
    );
}

fn build_rigged_turtle(b: &mut Builder) {
    let skin = Material::phong(0x3f8f5a, 40.0);
    let body = b.library.intern("rig_body", || geometry::sphere(1.4, 24, 16));
    b.add(
        body,
        Group::Creature,
        Transform::default().with_scale(Vec3::new(1.0, 0.35, 1.25)),
        skin,
    );
    let shell = b
        .library
        .intern("rig_shell", || geometry::sphere_section(1.25, 24, 12, 0.0, FRAC_PI_2));
    b.add(
        shell,
        Group::Creature,
        Transform::at(Vec3::new(0.0, 0.1, 0.0)).with_scale(Vec3::new(1.0, 0.7, 1.15)),
        Material::phong(0x6b4f2a, 60.0).with_specular(0x332211),
    );
    let head = b.library.intern("rig_head", || geometry::sphere(0.45, 16, 12));
    b.add(head, Group::Face, Transform::default(), skin);

    let flipper = b.library.intern("rig_flipper", || geometry::sphere(0.5, 12, 8));
    for (x, z, yaw) in [
        (-1.3, 0.8, 0.6_f32),
        (1.3, 0.8, -0.6),
        (-1.1, -1.2, -0.4),
        (1.1, -1.2, 0.4),
    ] {
        b.add(
            flipper,
            Group::Creature,
            Transform::at(Vec3::new(x, -0.1, z))
                .with_rotation(Vec3::new(0.0, yaw, 0.0))
                .with_scale(Vec3::new(1.0, 0.15, 0.5)),
            skin,
        );
    }
}

fn build_boxy_turtle(b: &mut Builder) {
    let body = b.library.intern("box_body", || geometry::cuboid(3.0, 0.6, 3.6));
    b.add(body, Group::Creature, Transform::default(), Material::phong(0x00ff66, 60.0));
    let shell = b.library.intern("box_shell", || geometry::cuboid(2.2, 0.8, 2.6));
    b.add(
        shell,
        Group::Creature,
        Transform::at(Vec3::new(0.0, 0.6, 0.0)),
        Material::phong(0xff3366, 60.0),
    );
    let head = b.library.intern("box_head", || geometry::cuboid(0.8, 0.8, 0.8));
    b.add(head, Group::Face, Transform::default(), Material::phong(0xffe0bd, 50.0));
}

fn build_stick_figure(b: &mut Builder) {
    let material = Material::phong(0xffffff, 30.0);
    let torso = b.library.intern("stick_torso", || geometry::cylinder(0.05, 0.05, 1.0, 8));
    let head = b.library.intern("stick_head", || geometry::sphere(0.15, 16, 16));
    let limb = b.library.intern("stick_limb", || geometry::cylinder(0.03, 0.03, 0.6, 8));

    b.add(torso, Group::Figure, Transform::at(Vec3::new(0.0, 0.5, 0.0)), material);
    b.add(head, Group::Figure, Transform::at(Vec3::new(0.0, 1.0, 0.0)), material);
    for (pos, roll) in [
        (Vec3::new(-0.3, 0.8, 0.0), FRAC_PI_2),
        (Vec3::new(0.3, 0.8, 0.0), -FRAC_PI_2),
        (Vec3::new(-0.2, 0.3, 0.0), FRAC_PI_6),
        (Vec3::new(0.2, 0.3, 0.0), -FRAC_PI_6),
    ] {
        b.add(
            limb,
            Group::Figure,
            Transform::at(pos).with_rotation(Vec3::new(0.0, 0.0, roll)),
            material,
        );
    }
}

fn scatter_debris<R: Rng>(b: &mut Builder, count: usize, rng: &mut R) {
    if count == 0 {
        return;
    }
    let shard = b.library.intern("debris", || geometry::tetrahedron(0.2));
    let material = Material::phong(0x445566, 100.0).translucent(0.6);
    for _ in 0..count {
        let position = Vec3::new(
            (rng.gen::<f32>() - 0.5) * DEBRIS_SPREAD_XZ,
            rng.gen::<f32>() * DEBRIS_SPREAD_Y,
            (rng.gen::<f32>() - 0.5) * DEBRIS_SPREAD_XZ,
        );
        let rotation = Vec3::new(
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
        );
        b.add(shard, Group::World, Transform::at(position).with_rotation(rotation), material);
    }
}

/// World matrices of the animated groups for one frame.
#[derive(Clone, Copy, Debug)]
pub struct GroupPoses {
    pub creature: Mat4,
    pub face: Mat4,
    pub figure: Mat4,
}

impl GroupPoses {
    pub fn from_animator<R: Rng>(animator: &SceneAnimator<R>, model: &SceneModel, t: f64) -> Self {
        let mut creature = animator.creature;
        if let Some(clip) = &model.swim {
            creature.rotation += clip.sample(t);
        }
        let creature = creature.matrix();
        let face = creature
            * Transform::at(FACE_OFFSET)
                .with_rotation(animator.face_rotation)
                .matrix();
        Self {
            creature,
            face,
            figure: animator.figure.matrix(),
        }
    }

    pub fn matrix(&self, group: Group) -> Mat4 {
        match group {
            Group::World => Mat4::IDENTITY,
            Group::Creature => self.creature,
            Group::Face => self.face,
            Group::Figure => self.figure,
        }
    }

    pub fn world(&self, part: &Part) -> Mat4 {
        self.matrix(part.group) * part.local
    }
}
