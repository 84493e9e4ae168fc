//! Quaternion for representing 3D rotations
//!
//! Lane layout is `(real, i, j, k)`. A unit quaternion is a rotation, but
//! unit norm is never enforced: call [`Quat::normalize`] where it matters.
//!
//! A 3D vector is embedded as the pure quaternion `(0, x, y, z)`; its w lane
//! is dropped on the way in and restored from the input on the way out.

use std::fmt;
use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use crate::Vec4;

/// Quaternion `real + i*i + j*j + k*k`
///
/// The default value is all-zero, not the identity. Use [`Quat::IDENTITY`]
/// (or `Quat::from(1.0)`) for "no rotation".
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Quat {
    /// Real (scalar) component
    pub real: f32,
    /// i imaginary unit
    pub i: f32,
    /// j imaginary unit
    pub j: f32,
    /// k imaginary unit
    pub k: f32,
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { real: 1.0, i: 0.0, j: 0.0, k: 0.0 };

    /// All-zero quaternion
    pub const ZERO: Self = Self { real: 0.0, i: 0.0, j: 0.0, k: 0.0 };

    /// Create a new quaternion from its four lanes
    #[inline]
    pub const fn new(real: f32, i: f32, j: f32, k: f32) -> Self {
        Self { real, i, j, k }
    }

    /// Create a rotation of `radians` about `axis`
    ///
    /// `axis` must already be unit length; it is not normalized here.
    /// The result is `(cos(θ/2), sin(θ/2)*axis.x, sin(θ/2)*axis.y, sin(θ/2)*axis.z)`.
    pub fn from_axis_angle(axis: Vec4, radians: f32) -> Self {
        let half = radians * 0.5;
        let (sin_h, cos_h) = half.sin_cos();
        let lanes = Vec4::new(cos_h, sin_h, sin_h, sin_h)
            .component_mul(Vec4::new(1.0, axis.x, axis.y, axis.z));
        Self::from_lanes(lanes)
    }

    #[inline]
    fn from_lanes(v: Vec4) -> Self {
        bytemuck::cast(v)
    }

    #[inline]
    fn lanes(self) -> Vec4 {
        bytemuck::cast(self)
    }

    /// Conjugate: negate the imaginary lanes
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.real, -self.i, -self.j, -self.k)
    }

    /// Sum of squares of all four lanes
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.lanes().magnitude_squared()
    }

    /// Norm (length) of the quaternion
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Multiplicative inverse: `conjugate / norm²`
    ///
    /// For a unit quaternion this equals the conjugate.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.norm_squared()
    }

    /// Scale to unit norm
    ///
    /// No zero guard: a zero quaternion comes back as NaNs.
    #[inline]
    pub fn normalize(&self) -> Self {
        *self / self.norm()
    }

    /// Rotate `v` with the sandwich product `q * v * q⁻¹`
    ///
    /// The real lane of the product is discarded and w is copied from `v`,
    /// so points stay points and directions stay directions. This uses the
    /// algebraic inverse rather than the conjugate, so a non-unit quaternion
    /// still yields a pure rotation (the scale cancels).
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let q = *self * (Quat::from(v) * self.inverse());
        Vec4::new(q.i, q.j, q.k, v.w)
    }

    /// Rotate `v`, then add `t` if `v` is a point
    ///
    /// Directions (`v.w == 0`) are only rotated.
    pub fn transform_and_translate(&self, v: Vec4, t: Vec4) -> Vec4 {
        if v.w == 0.0 {
            self.transform(v)
        } else {
            t + self.transform(v)
        }
    }
}

impl From<Vec4> for Quat {
    /// Embed `v` as the pure quaternion `(0, v.x, v.y, v.z)`
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }
}

impl From<f32> for Quat {
    /// Real-only quaternion `(s, 0, 0, 0)`
    #[inline]
    fn from(s: f32) -> Self {
        Self::new(s, 0.0, 0.0, 0.0)
    }
}

impl Index<usize> for Quat {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &bytemuck::cast_ref::<Self, [f32; 4]>(self)[i]
    }
}

impl IndexMut<usize> for Quat {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut bytemuck::cast_mut::<Self, [f32; 4]>(self)[i]
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a: {:.6} b: {:.6} c: {:.6} d: {:.6}",
            self.real, self.i, self.j, self.k
        )
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;

    /// Hamilton product
    ///
    /// Each lane of `self` is broadcast against all four lanes of `other`;
    /// the sixteen partial products are then summed with the sign pattern
    /// of the quaternion multiplication table.
    fn mul(self, other: Self) -> Self {
        let b = other.lanes();

        // a1*(a2, b2, c2, d2), b1*(...), c1*(...), d1*(...)
        let p1 = b * self.real;
        let p2 = b * self.i;
        let p3 = b * self.j;
        let p4 = b * self.k;

        let v1 = Vec4::new(p1.x, p1.y, p1.z, p1.w);
        let v2 = Vec4::new(-p2.y, p2.x, -p2.w, p2.z);
        let v3 = Vec4::new(-p3.z, p3.w, p3.x, -p3.y);
        let v4 = Vec4::new(-p4.w, -p4.z, p4.y, p4.x);

        Self::from_lanes(v1 + v2 + v3 + v4)
    }
}

impl std::ops::Mul<f32> for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::from_lanes(self.lanes() * s)
    }
}

impl std::ops::Mul<Quat> for f32 {
    type Output = Quat;
    #[inline]
    fn mul(self, q: Quat) -> Quat {
        q * self
    }
}

impl std::ops::Div<f32> for Quat {
    type Output = Self;
    #[inline]
    fn div(self, s: f32) -> Self {
        (1.0 / s) * self
    }
}

impl std::ops::Add for Quat {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() + other.lanes())
    }
}

impl std::ops::Sub for Quat {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() - other.lanes())
    }
}

impl std::ops::Neg for Quat {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::from_lanes(-self.lanes())
    }
}
