//! Dual quaternion for rigid transformations
//!
//! A dual quaternion `real + ε·dual` encodes a rotation and a translation in
//! one composable value. For rotation `r` (unit) and translation `t`:
//!
//! `real = r`, `dual = 0.5 * t * r` (with `t` embedded as a pure quaternion)
//!
//! That relationship only holds for values built with
//! [`DualQuat::from_rotation_translation`] or composed from such values with
//! `*`. Sums, differences and scalar multiples are plain dual-quaternion
//! algebra and are generally not rigid transforms any more.

use std::fmt;
use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use crate::{Mat4, Quat, Vec4};

/// Dual quaternion `(real, dual)`
///
/// The default value is all-zero; [`DualQuat::IDENTITY`] is the identity
/// transform.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DualQuat {
    /// Rotation part
    pub real: Quat,
    /// Translation-encoding part
    pub dual: Quat,
}

impl DualQuat {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        real: Quat::IDENTITY,
        dual: Quat::ZERO,
    };

    /// Create a dual quaternion from its two parts
    #[inline]
    pub const fn new(real: Quat, dual: Quat) -> Self {
        Self { real, dual }
    }

    /// Rigid transform: rotate by `r`, then translate by `t`
    pub fn from_rotation_translation(r: Quat, t: Vec4) -> Self {
        Self::new(r, 0.5 * (Quat::from(t) * r))
    }

    /// Rigid transform that only translates by `t`
    pub fn from_translation(t: Vec4) -> Self {
        Self::from_rotation_translation(Quat::IDENTITY, t)
    }

    /// Conjugate both parts
    pub fn conjugate(&self) -> Self {
        Self::new(self.real.conjugate(), self.dual.conjugate())
    }

    /// Combined quaternion and dual conjugate: `(real*, -dual*)`
    ///
    /// This is the right-hand factor of the point sandwich product.
    pub fn dual_conjugate(&self) -> Self {
        Self::new(self.real.conjugate(), -self.dual.conjugate())
    }

    /// Multiplicative inverse
    ///
    /// `(r⁻¹, -(r⁻¹ * (d * r⁻¹)))` where `r⁻¹` is the quaternion inverse
    /// of the real part.
    pub fn inverse(&self) -> Self {
        let real_inv = self.real.inverse();
        Self::new(real_inv, -(real_inv * (self.dual * real_inv)))
    }

    /// Translation encoded by a rigid dual quaternion: `2 * dual * real*`
    ///
    /// Returned as a direction (w = 0).
    pub fn translation(&self) -> Vec4 {
        let t = 2.0 * (self.dual * self.real.conjugate());
        Vec4::direction(t.i, t.j, t.k)
    }

    /// Apply the rigid transform to `v`
    ///
    /// Points are rotated and translated; directions (`v.w == 0`) are only
    /// rotated. The result is read from the imaginary lanes of the dual part
    /// of `d * (1 + ε·v) * d̄`, with w copied from `v`.
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let d = if v.w == 0.0 {
            Self::from(self.real)
        } else {
            *self
        };
        let result = d * (Self::from(v) * d.dual_conjugate());
        Vec4::new(result.dual.i, result.dual.j, result.dual.k, v.w)
    }

    /// 4x4 matrix of a rigid dual quaternion
    ///
    /// The rotation block uses the squared-diagonal form
    /// (`ww + xx - yy - zz` etc.), which agrees with [`Mat4::from_quat`] for
    /// a unit real part. Column 3 is [`DualQuat::translation`].
    pub fn to_matrix(&self) -> Mat4 {
        let q = self.real;
        let lanes: Vec4 = bytemuck::cast(q);

        // (ww, wx, wy, wz)
        let p1 = lanes * q.real;
        // (xw, xx, xy, xz)
        let p2 = lanes * q.i;
        // (yw, yx, yy, yz)
        let p3 = lanes * q.j;
        // (zw, zx, zy, zz)
        let p4 = lanes * q.k;

        let t = self.translation();

        Mat4::new(
            Vec4::direction(
                p1.x + p2.y - p3.z - p4.w,
                2.0 * (p2.z + p1.w),
                2.0 * (p2.w - p1.z),
            ),
            Vec4::direction(
                2.0 * (p2.z - p1.w),
                p1.x - p2.y + p3.z - p4.w,
                2.0 * (p3.w + p1.y),
            ),
            Vec4::direction(
                2.0 * (p2.w + p1.z),
                2.0 * (p3.w - p1.y),
                p1.x - p2.y - p3.z + p4.w,
            ),
            Vec4::point(t.x, t.y, t.z),
        )
    }
}

impl From<Quat> for DualQuat {
    /// Rotation-only dual quaternion `(q, 0)`
    #[inline]
    fn from(q: Quat) -> Self {
        Self::new(q, Quat::ZERO)
    }
}

impl From<Vec4> for DualQuat {
    /// Embed `v` as `(1, v)`: identity real part, `v` as a pure dual part
    ///
    /// This is the point embedding used by [`DualQuat::transform`]. There is
    /// no ½ factor, so as a transform it translates by `2 * v`; use
    /// [`DualQuat::from_translation`] for a translation.
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::new(Quat::IDENTITY, Quat::from(v))
    }
}

impl Index<usize> for DualQuat {
    type Output = Quat;
    #[inline]
    fn index(&self, i: usize) -> &Quat {
        &bytemuck::cast_ref::<Self, [Quat; 2]>(self)[i]
    }
}

impl IndexMut<usize> for DualQuat {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Quat {
        &mut bytemuck::cast_mut::<Self, [Quat; 2]>(self)[i]
    }
}

impl fmt::Display for DualQuat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "non-dual: {}\ndual: {}", self.real, self.dual)
    }
}

impl std::ops::Mul for DualQuat {
    type Output = Self;

    /// Compose two transforms: applies `other` first, then `self`
    ///
    /// `(a + εb)(c + εd) = ac + ε(ad + bc)`
    #[inline]
    fn mul(self, other: Self) -> Self {
        let ac = self.real * other.real;
        let ad = self.real * other.dual;
        let bc = self.dual * other.real;
        Self::new(ac, ad + bc)
    }
}

impl std::ops::Mul<f32> for DualQuat {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.real * s, self.dual * s)
    }
}

impl std::ops::Mul<DualQuat> for f32 {
    type Output = DualQuat;
    #[inline]
    fn mul(self, d: DualQuat) -> DualQuat {
        DualQuat::new(self * d.real, self * d.dual)
    }
}

impl std::ops::Add for DualQuat {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.real + other.real, self.dual + other.dual)
    }
}

impl std::ops::Sub for DualQuat {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.real - other.real, self.dual - other.dual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn quat_approx_eq(a: Quat, b: Quat) -> bool {
        approx_eq(a.real, b.real) && approx_eq(a.i, b.i) && approx_eq(a.j, b.j) && approx_eq(a.k, b.k)
    }

    fn dq_approx_eq(a: DualQuat, b: DualQuat) -> bool {
        quat_approx_eq(a.real, b.real) && quat_approx_eq(a.dual, b.dual)
    }

    fn sample() -> DualQuat {
        DualQuat::from_rotation_translation(
            Quat::from_axis_angle(Vec4::direction(0.0, 0.6, 0.8), 1.2),
            Vec4::direction(3.0, -1.0, 2.0),
        )
    }

    #[test]
    fn test_default_is_zero() {
        let d = DualQuat::default();
        assert_eq!(d.real, Quat::ZERO);
        assert_eq!(d.dual, Quat::ZERO);
    }

    #[test]
    fn test_index() {
        let d = sample();
        assert_eq!(d[0], d.real);
        assert_eq!(d[1], d.dual);
    }

    #[test]
    fn test_from_rotation_translation_invariant() {
        let r = Quat::from_axis_angle(Vec4::Y, 0.4);
        let t = Vec4::direction(1.0, 2.0, 3.0);
        let d = DualQuat::from_rotation_translation(r, t);
        assert_eq!(d.real, r);
        assert!(quat_approx_eq(d.dual, (Quat::from(t) * r) * 0.5));
    }

    #[test]
    fn test_from_vector_embedding() {
        let d = DualQuat::from(Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(d.real, Quat::IDENTITY);
        assert_eq!(d.dual, Quat::new(0.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_quat_is_rotation_only() {
        let r = Quat::from_axis_angle(Vec4::Z, 0.3);
        let d = DualQuat::from(r);
        assert_eq!(d.real, r);
        assert_eq!(d.dual, Quat::ZERO);
    }

    #[test]
    fn test_identity_is_noop() {
        let d = sample();
        assert!(dq_approx_eq(DualQuat::IDENTITY * d, d));
        assert!(dq_approx_eq(d * DualQuat::IDENTITY, d));

        let identity = DualQuat::new(Quat::from(1.0), Quat::from(0.0));
        assert_eq!(identity, DualQuat::IDENTITY);
    }

    #[test]
    fn test_translation_only() {
        let d = DualQuat::from_translation(Vec4::direction(3.0, 4.0, 5.0));
        let p = d.transform(Vec4::point(1.0, 1.0, 1.0));
        assert!(vec_approx_eq(p, Vec4::point(4.0, 5.0, 6.0)), "got {:?}", p);
    }

    #[test]
    fn test_rotation_then_translation() {
        let d = DualQuat::from_rotation_translation(
            Quat::from_axis_angle(Vec4::Z, FRAC_PI_2),
            Vec4::direction(10.0, 0.0, 0.0),
        );
        let p = d.transform(Vec4::point(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(p, Vec4::point(10.0, 1.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let d = DualQuat::from_rotation_translation(
            Quat::from_axis_angle(Vec4::Z, FRAC_PI_2),
            Vec4::direction(10.0, 20.0, 30.0),
        );
        let v = d.transform(Vec4::direction(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(v, Vec4::direction(0.0, 1.0, 0.0)), "got {:?}", v);
    }

    #[test]
    fn test_transform_matches_quat_and_translation() {
        let r = Quat::from_axis_angle(Vec4::direction(0.0, 0.6, 0.8), 1.2);
        let t = Vec4::direction(3.0, -1.0, 2.0);
        let d = DualQuat::from_rotation_translation(r, t);
        for v in [Vec4::point(1.0, 2.0, 3.0), Vec4::point(-4.0, 0.5, 0.0), Vec4::direction(0.0, 1.0, -1.0)] {
            let expected = r.transform_and_translate(v, t);
            let actual = d.transform(v);
            assert!(vec_approx_eq(actual, expected), "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn test_composition_order() {
        let t = DualQuat::from_translation(Vec4::direction(1.0, 0.0, 0.0));
        let r = DualQuat::from(Quat::from_axis_angle(Vec4::Z, FRAC_PI_2));
        let origin = Vec4::point(0.0, 0.0, 0.0);

        assert!(vec_approx_eq((r * t).transform(origin), Vec4::point(0.0, 1.0, 0.0)));
        assert!(vec_approx_eq((t * r).transform(origin), Vec4::point(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_inverse() {
        let d = sample();
        let p = Vec4::point(1.0, 2.0, 3.0);
        let back = d.inverse().transform(d.transform(p));
        assert!(vec_approx_eq(back, p), "got {:?}", back);
        assert!(dq_approx_eq(d * d.inverse(), DualQuat::IDENTITY));
    }

    #[test]
    fn test_conjugates() {
        let d = sample();
        let c = d.conjugate();
        assert_eq!(c.real, d.real.conjugate());
        assert_eq!(c.dual, d.dual.conjugate());

        let dc = d.dual_conjugate();
        assert_eq!(dc.real, d.real.conjugate());
        assert_eq!(dc.dual, -d.dual.conjugate());
    }

    #[test]
    fn test_translation_round_trip() {
        let t = Vec4::direction(5.0, -3.0, 1.0);
        let d = DualQuat::from_rotation_translation(Quat::from_axis_angle(Vec4::Y, FRAC_PI_2), t);
        assert!(vec_approx_eq(d.translation(), t), "got {:?}", d.translation());
    }

    #[test]
    fn test_to_matrix_matches_transform() {
        let d = sample();
        let m = d.to_matrix();
        assert!(vec_approx_eq(m[3], Vec4::point(3.0, -1.0, 2.0)));
        for v in [Vec4::point(1.0, 2.0, 3.0), Vec4::direction(0.0, 1.0, -1.0)] {
            assert!(vec_approx_eq(m * v, d.transform(v)), "{:?} vs {:?}", m * v, d.transform(v));
        }
    }

    #[test]
    fn test_to_matrix_rotation_block_matches_from_quat() {
        let d = sample();
        let a = d.to_matrix();
        let b = Mat4::from_quat(d.real);
        for i in 0..3 {
            assert!(vec_approx_eq(a[i], b[i]), "column {}: {:?} vs {:?}", i, a[i], b[i]);
        }
    }

    #[test]
    fn test_scalar_and_additive_ops() {
        let d = sample();
        assert_eq!(d * 2.0, 2.0 * d);
        assert_eq!(d + d, d * 2.0);
        assert_eq!(d - d, DualQuat::default());
    }

    #[test]
    fn test_display() {
        let s = DualQuat::IDENTITY.to_string();
        assert_eq!(
            s,
            "non-dual: a: 1.000000 b: 0.000000 c: 0.000000 d: 0.000000\n\
             dual: a: 0.000000 b: 0.000000 c: 0.000000 d: 0.000000"
        );
    }
}
