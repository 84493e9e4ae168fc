//! 4x4 matrix for rigid 3D transformations
//!
//! Matrices are stored as four [`Vec4`] columns (column-major). Column `i` is
//! the image of basis vector `i`, so the translation lives in column 3.
//!
//! Composition reads right to left: `a * b` applies `b` first, then `a`.

use std::fmt;
use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use crate::{Quat, Vec4};

/// 4x4 matrix (column-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Create a matrix from its four columns
    #[inline]
    pub const fn new(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    /// Columns as nested arrays, `m[col][row]`
    #[inline]
    pub fn to_cols_array(self) -> [[f32; 4]; 4] {
        bytemuck::cast(self)
    }

    /// Get a column vector
    #[inline]
    pub fn column(&self, col: usize) -> Vec4 {
        self.cols[col]
    }

    /// Translation by `t` (t.w is ignored)
    pub fn translate(t: Vec4) -> Self {
        Self::new(Vec4::X, Vec4::Y, Vec4::Z, Vec4::point(t.x, t.y, t.z))
    }

    /// Rotation about the X axis
    pub fn rotate_x(radians: f32) -> Self {
        plane_rotation(radians, 1, 2)
    }

    /// Rotation about the Y axis
    pub fn rotate_y(radians: f32) -> Self {
        plane_rotation(radians, 2, 0)
    }

    /// Rotation about the Z axis
    pub fn rotate_z(radians: f32) -> Self {
        plane_rotation(radians, 0, 1)
    }

    /// Rotation of `radians` about `axis`
    ///
    /// `axis` must be unit length. It goes through a unit quaternion
    /// (see [`Quat::from_axis_angle`]) and [`Mat4::from_quat`].
    pub fn rotate(axis: Vec4, radians: f32) -> Self {
        Self::from_quat(Quat::from_axis_angle(axis, radians))
    }

    /// Rotation about `axis` followed by translation by `t`
    pub fn transform(axis: Vec4, radians: f32, t: Vec4) -> Self {
        Self::from_rotation_translation(Quat::from_axis_angle(axis, radians), t)
    }

    /// Rotation matrix of a unit quaternion
    ///
    /// Broadcasts each imaginary lane against the whole quaternion, giving
    /// three 4-wide products (12 multiplies, 3 of them unused) instead of
    /// the 9 scalar products the formula strictly needs:
    ///
    /// ```text
    /// col0 = (1-2(jj+kk), 2(ij+kr),   2(ik-jr))
    /// col1 = (2(ij-kr),   1-2(ii+kk), 2(jk+ir))
    /// col2 = (2(ik+jr),   2(jk-ir),   1-2(ii+jj))
    /// ```
    pub fn from_quat(q: Quat) -> Self {
        let lanes: Vec4 = bytemuck::cast(q);

        // (ir, ii, ij, ik)
        let m1 = lanes * q.i;
        // (jr, _, jj, jk)
        let m2 = lanes * q.j;
        // (kr, _, _, kk)
        let m3 = lanes * q.k;

        Self::new(
            Vec4::direction(
                1.0 - 2.0 * (m2.z + m3.w),
                2.0 * (m1.z + m3.x),
                2.0 * (m1.w - m2.x),
            ),
            Vec4::direction(
                2.0 * (m1.z - m3.x),
                1.0 - 2.0 * (m1.y + m3.w),
                2.0 * (m2.w + m1.x),
            ),
            Vec4::direction(
                2.0 * (m1.w + m2.x),
                2.0 * (m2.w - m1.x),
                1.0 - 2.0 * (m1.y + m2.z),
            ),
            Vec4::W,
        )
    }

    /// Rotation by unit quaternion `q` followed by translation by `t`
    pub fn from_rotation_translation(q: Quat, t: Vec4) -> Self {
        let mut m = Self::from_quat(q);
        m.cols[3] = Vec4::point(t.x, t.y, t.z);
        m
    }
}

/// Rotation in the plane spanned by basis axes `p1` and `p2`
///
/// Turns `p1` towards `p2` by `angle` radians.
fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let (sn, cs) = angle.sin_cos();

    let mut m = Mat4::IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

impl Index<usize> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn index(&self, col: usize) -> &Vec4 {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, col: usize) -> &mut Vec4 {
        &mut self.cols[col]
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "col 1: {}\ncol 2: {}\ncol 3: {}\ncol 4: {}",
            self.cols[0], self.cols[1], self.cols[2], self.cols[3]
        )
    }
}

impl std::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;

    /// Transform a vector: `Σ column[j] * v[j]`
    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;

    /// Multiply two matrices: applies `other` first, then `self`
    #[inline]
    fn mul(self, other: Self) -> Self {
        Self {
            cols: other.cols.map(|c| self * c),
        }
    }
}

impl std::ops::Mul<f32> for Mat4 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self {
            cols: self.cols.map(|c| c * s),
        }
    }
}

impl std::ops::Mul<Mat4> for f32 {
    type Output = Mat4;
    #[inline]
    fn mul(self, m: Mat4) -> Mat4 {
        m * self
    }
}

impl std::ops::Div<f32> for Mat4 {
    type Output = Self;
    #[inline]
    fn div(self, s: f32) -> Self {
        (1.0 / s) * self
    }
}

impl std::ops::Add for Mat4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        let a = self.cols;
        let b = other.cols;
        Self::new(a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3])
    }
}

impl std::ops::Sub for Mat4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        let a = self.cols;
        let b = other.cols;
        Self::new(a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3])
    }
}
