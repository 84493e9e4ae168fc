//! Rigid Transform Mathematics Library
//!
//! This crate provides four interchangeable ways of composing rotations and
//! translations in 3D space. Composing the same sequence of transforms with
//! any of them yields the same result, up to float rounding.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4-lane vector; w = 1 marks a point, w = 0 a direction
//! - [`Mat4`] - 4x4 column-major matrix
//! - [`Quat`] - quaternion for rotations
//! - [`DualQuat`] - dual quaternion for rotation + translation in one value
//!
//! All types are small `Copy` values; every operation returns a new value.
//!
//! ## Example
//!
//! ```
//! use rigid4_math::{DualQuat, Mat4, Quat, Vec4};
//! use std::f32::consts::FRAC_PI_2;
//!
//! let t = Vec4::direction(1.0, 2.0, 3.0);
//! let m = Mat4::translate(t) * Mat4::rotate_z(FRAC_PI_2);
//! let d = DualQuat::from_rotation_translation(Quat::from_axis_angle(Vec4::Z, FRAC_PI_2), t);
//!
//! let p = Vec4::point(1.0, 0.0, 0.0);
//! let a = m * p;
//! let b = d.transform(p);
//! assert!((a - b).magnitude() < 1e-5);
//! ```

mod vec4;
mod quat;
pub mod mat4;
pub mod dual_quat;

pub use vec4::Vec4;
pub use quat::Quat;
pub use mat4::Mat4;
pub use dual_quat::DualQuat;
