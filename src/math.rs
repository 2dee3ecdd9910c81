use crate::error::ViewerError;
use std::ops::{Mul, Sub};

/// A 3-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero or non-finite vector
    pub fn normalized(self) -> Option<Vec3> {
        let d = self.length();
        if d == 0.0 || !d.is_finite() {
            return None;
        }
        Some(Vec3::new(self.x / d, self.y / d, self.z / d))
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

/// A rotation axis, guaranteed non-zero and finite.
///
/// Keeps the vector as given; [`Axis::direction`] is the normalized form used
/// by [`Mat4::rotate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    vector: Vec3,
    direction: Vec3,
}

impl Axis {
    pub const Y: Axis = Axis {
        vector: Vec3::Y,
        direction: Vec3::Y,
    };

    pub fn new(vector: Vec3) -> Option<Axis> {
        vector
            .normalized()
            .map(|direction| Axis { vector, direction })
    }

    /// The axis as originally supplied (not normalized)
    pub fn vector(&self) -> Vec3 {
        self.vector
    }

    /// The unit-length axis
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

impl TryFrom<Vec3> for Axis {
    type Error = ViewerError;

    fn try_from(vector: Vec3) -> Result<Self, Self::Error> {
        Axis::new(vector).ok_or(ViewerError::DegenerateAxis)
    }
}

/// A 4x4 transform stored column-major: cell `column * 4 + row`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    cells: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cells: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const fn from_cols_array(cells: [f32; 16]) -> Self {
        Mat4 { cells }
    }

    /// Perspective projection.
    ///
    /// `fov` is the angle whose cotangent scales X; Y is scaled by the same
    /// cotangent times `aspect_ratio`. The W row picks up +Z, so the camera
    /// looks down +Z.
    ///
    /// Callers must ensure `z_far != z_near` and that `fov` is not a multiple
    /// of pi; [`ViewerConfig::validate`](crate::config::ViewerConfig::validate)
    /// checks both for configured values.
    pub fn frustum(fov: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let cot = 1.0 / fov.tan();
        let depth = z_far - z_near;
        let mut cells = [0.0; 16];
        cells[0] = cot;
        cells[5] = aspect_ratio * cot;
        cells[10] = (z_far + z_near) / depth;
        cells[11] = 1.0;
        cells[14] = -2.0 * z_far * z_near / depth;
        Mat4 { cells }
    }

    pub fn translate(dx: f32, dy: f32, dz: f32) -> Self {
        let mut m = Mat4::IDENTITY;
        m.cells[12] = dx;
        m.cells[13] = dy;
        m.cells[14] = dz;
        m
    }

    /// Rotation by `angle` radians around `axis`.
    ///
    /// Positive angles turn counter-clockwise when viewed from the tip of the
    /// axis in the left-handed, +Z-forward space that [`Mat4::frustum`]
    /// projects.
    pub fn rotate(axis: Axis, angle: f32) -> Self {
        let Vec3 { x, y, z } = axis.direction();
        let (s, c) = angle.sin_cos();
        let m = 1.0 - c;

        Mat4 {
            cells: [
                m * x * x + c,
                m * x * y - z * s,
                m * z * x + y * s,
                0.0,
                m * x * y + z * s,
                m * y * y + c,
                m * y * z - x * s,
                0.0,
                m * z * x - y * s,
                m * y * z + x * s,
                m * z * z + c,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    /// Matrix product `a * b`: applying the result to a column vector equals
    /// applying `b` first, then `a`.
    pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
        let mut result = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                result[col * 4 + row] = (0..4)
                    .map(|i| a.cells[i * 4 + row] * b.cells[col * 4 + i])
                    .sum();
            }
        }
        Mat4 { cells: result }
    }

    pub fn transpose(&self) -> Mat4 {
        let mut cells = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                cells[row * 4 + col] = self.cells[col * 4 + row];
            }
        }
        Mat4 { cells }
    }

    /// Cell at `row`, `col`
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[col * 4 + row]
    }

    /// The 16 cells in column-major order, ready to hand to a renderer
    pub fn as_array(&self) -> &[f32; 16] {
        &self.cells
    }

    /// Applies the transform to a homogeneous column vector
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|i| self.cells[i * 4 + row] * v[i]).sum();
        }
        out
    }

    /// Applies the upper-left 3x3 block, ignoring translation
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let [x, y, z, _] = self.transform([v.x, v.y, v.z, 0.0]);
        Vec3::new(x, y, z)
    }

    /// Determinant of the upper-left 3x3 block
    pub fn determinant3(&self) -> f32 {
        let m = |r, c| self.get(r, c);
        m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1))
            - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
            + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::multiply(&self, &rhs)
    }
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f32; 2], b: &[f32; 2], c: &[f32; 2]) -> f32 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalized().unwrap_or_default()
}

/// Calculates the light intensity for a surface normal facing a light direction
pub fn calculate_light_intensity(normal: Vec3, light_dir: Vec3) -> f32 {
    let light_dir = light_dir.normalized().unwrap_or(Vec3::Z);
    normal.dot(light_dir).max(0.1) // Ensure a minimum ambient light
}

/// Applies lighting to a color
pub fn apply_lighting(color: [f32; 3], intensity: f32) -> [u8; 3] {
    color.map(|channel| (channel * intensity * 255.0).clamp(0.0, 255.0) as u8)
}
