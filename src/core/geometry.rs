use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.try_normalize().unwrap_or(Vec3::Y).to_array(),
        });
        index
    }

    pub fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Full UV sphere.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    sphere_section(radius, width_segments, height_segments, 0.0, PI)
}

/// UV sphere swept over polar angles `[theta_start, theta_start + theta_length]`.
///
/// A `theta_length` of `PI / 2` from zero gives the upper dome used for the
/// shell.
pub fn sphere_section(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    theta_start: f32,
    theta_length: f32,
) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let theta_end = (theta_start + theta_length).min(PI);
    let mut mesh = MeshData::with_capacity(
        ((ws + 1) * (hs + 1)) as usize,
        (ws * hs * 6) as usize,
    );

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let theta = theta_start + v * theta_length;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * TAU;
            let p = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            mesh.push(p, p);
        }
    }

    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 || theta_start > 0.0 {
                mesh.triangle(a, b, d);
            }
            if iy != hs - 1 || theta_end < PI {
                mesh.triangle(b, c, d);
            }
        }
    }
    mesh
}

/// Capped cylinder (or cone frustum) centred on the origin along Y.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> MeshData {
    let rs = radial_segments.max(3);
    let half = height * 0.5;
    let slope = if height.abs() > f32::EPSILON {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    let mut mesh = MeshData::with_capacity((rs as usize + 1) * 4 + 2, rs as usize * 12);

    // Side wall: two rings
    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for ix in 0..=rs {
            let theta = ix as f32 / rs as f32 * TAU;
            let (s, c) = theta.sin_cos();
            mesh.push(Vec3::new(r * s, y, r * c), Vec3::new(s, slope, c));
        }
    }
    let row = rs + 1;
    for ix in 0..rs {
        let a = ix;
        let b = row + ix;
        let c = row + ix + 1;
        let d = ix + 1;
        mesh.triangle(a, b, d);
        mesh.triangle(b, c, d);
    }

    for (y, r, up) in [(half, radius_top, 1.0_f32), (-half, radius_bottom, -1.0)] {
        if r <= 0.0 {
            continue;
        }
        let normal = Vec3::new(0.0, up, 0.0);
        let center = mesh.push(Vec3::new(0.0, y, 0.0), normal);
        let first = mesh.vertices.len() as u32;
        for ix in 0..=rs {
            let theta = ix as f32 / rs as f32 * TAU;
            let (s, c) = theta.sin_cos();
            mesh.push(Vec3::new(r * s, y, r * c), normal);
        }
        for ix in 0..rs {
            if up > 0.0 {
                mesh.triangle(first + ix, first + ix + 1, center);
            } else {
                mesh.triangle(first + ix + 1, first + ix, center);
            }
        }
    }
    mesh
}

/// Torus in the XY plane: ring radius `radius`, tube radius `tube`.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let rs = radial_segments.max(3);
    let ts = tubular_segments.max(3);
    let mut mesh = MeshData::with_capacity(
        ((rs + 1) * (ts + 1)) as usize,
        (rs * ts * 6) as usize,
    );
    for j in 0..=rs {
        let v = j as f32 / rs as f32 * TAU;
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * TAU;
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push(p, p - center);
        }
    }
    let row = ts + 1;
    for j in 1..=rs {
        for i in 1..=ts {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.triangle(a, b, d);
            mesh.triangle(b, c, d);
        }
    }
    mesh
}

/// Regular tetrahedron with flat-shaded faces.
pub fn tetrahedron(radius: f32) -> MeshData {
    let corners = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ]
    .map(|c| c.normalize() * radius);
    let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

    let mut mesh = MeshData::with_capacity(12, 12);
    for [i, j, k] in faces {
        let (a, b, c) = (corners[i], corners[j], corners[k]);
        let mut normal = (b - a).cross(c - a);
        if normal.dot(a + b + c) < 0.0 {
            normal = -normal;
        }
        let ia = mesh.push(a, normal);
        let ib = mesh.push(b, normal);
        let ic = mesh.push(c, normal);
        mesh.triangle(ia, ib, ic);
    }
    mesh
}

/// Axis-aligned box centred on the origin.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;
    let mut mesh = MeshData::with_capacity(24, 36);
    let faces = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let center = n * h;
        let du = u * h;
        let dv = v * h;
        let i0 = mesh.push(center - du - dv, n);
        let i1 = mesh.push(center + du - dv, n);
        let i2 = mesh.push(center + du + dv, n);
        let i3 = mesh.push(center - du + dv, n);
        mesh.triangle(i0, i1, i2);
        mesh.triangle(i0, i2, i3);
    }
    mesh
}

/// Flat grid in the XZ plane facing +Y, centred on the origin.
pub fn plane(width: f32, depth: f32, segments: u32) -> MeshData {
    let s = segments.max(1);
    let row = s + 1;
    let mut mesh = MeshData::with_capacity((row * row) as usize, (s * s * 6) as usize);
    for iz in 0..=s {
        let z = (iz as f32 / s as f32 - 0.5) * depth;
        for ix in 0..=s {
            let x = (ix as f32 / s as f32 - 0.5) * width;
            mesh.push(Vec3::new(x, 0.0, z), Vec3::Y);
        }
    }
    for iz in 0..s {
        for ix in 0..s {
            let a = iz * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            mesh.triangle(a, c, b);
            mesh.triangle(b, c, d);
        }
    }
    mesh
}

#[inline]
fn quadratic(p0: Vec2, ctrl: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let s = 1.0 - t;
    p0 * (s * s) + ctrl * (2.0 * s * t) + p1 * (t * t)
}

/// Filled region between a quadratic curve and its chord, facing +Z.
pub fn curve_shape(p0: Vec2, ctrl: Vec2, p1: Vec2, samples: u32) -> MeshData {
    let n = samples.max(2);
    let mut mesh = MeshData::with_capacity(n as usize + 1, n as usize * 3);
    let normal = Vec3::Z;
    for i in 0..=n {
        let p = quadratic(p0, ctrl, p1, i as f32 / n as f32);
        mesh.push(p.extend(0.0), normal);
    }
    // Fan from the start point; the first triangle would be degenerate.
    for i in 1..n {
        mesh.triangle(0, i, i + 1);
    }
    mesh
}
