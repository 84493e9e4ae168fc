//! Transform chains
//!
//! A chain is a sequence of [`Step`]s composed into a single transform. The
//! same steps can be composed three ways, one per [`Chain`]; each way ends by
//! building a 4x4 matrix so the results are directly comparable.

use std::fmt;

use rigid4_math::{DualQuat, Mat4, Quat, Vec4};
use serde::{Deserialize, Serialize};

/// One transform in a chain
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Translate by a vector (w ignored)
    Translate(Vec4),
    /// Rotate about the X axis
    RotateX(f32),
    /// Rotate about the Y axis
    RotateY(f32),
    /// Rotate about the Z axis
    RotateZ(f32),
    /// Rotate about a unit axis
    Rotate { axis: Vec4, radians: f32 },
    /// Rotate about a unit axis, then translate
    RotateTranslate {
        axis: Vec4,
        radians: f32,
        translation: Vec4,
    },
}

impl Step {
    /// The rotation part of this step as a unit quaternion, if any
    fn rotation(&self) -> Option<Quat> {
        match *self {
            Step::Translate(_) => None,
            Step::RotateX(radians) => Some(Quat::from_axis_angle(Vec4::X, radians)),
            Step::RotateY(radians) => Some(Quat::from_axis_angle(Vec4::Y, radians)),
            Step::RotateZ(radians) => Some(Quat::from_axis_angle(Vec4::Z, radians)),
            Step::Rotate { axis, radians } | Step::RotateTranslate { axis, radians, .. } => {
                Some(Quat::from_axis_angle(axis, radians))
            }
        }
    }

    /// The translation part of this step, if any
    fn translation(&self) -> Option<Vec4> {
        match *self {
            Step::Translate(t) | Step::RotateTranslate { translation: t, .. } => Some(t),
            _ => None,
        }
    }
}

/// The reference sequence:
///
/// 1. translate (3, 4, 5)
/// 2. rotate 30° about Y
/// 3. rotate 20° about Z
/// 4. rotate 25° about X
/// 5. translate (-7, -9, -3)
/// 6. rotate 99° about (1/√2, 1/√2, 0), then translate (0, 4, -1)
/// 7. rotate 12° about (-1/√3, -1/√3, 1/√3)
pub fn reference_steps() -> Vec<Step> {
    let c = 1.0 / 2.0f32.sqrt();
    let d = 1.0 / 3.0f32.sqrt();

    vec![
        Step::Translate(Vec4::direction(3.0, 4.0, 5.0)),
        Step::RotateY(30.0f32.to_radians()),
        Step::RotateZ(20.0f32.to_radians()),
        Step::RotateX(25.0f32.to_radians()),
        Step::Translate(Vec4::direction(-7.0, -9.0, -3.0)),
        Step::RotateTranslate {
            axis: Vec4::direction(c, c, 0.0),
            radians: 99.0f32.to_radians(),
            translation: Vec4::direction(0.0, 4.0, -1.0),
        },
        Step::Rotate {
            axis: Vec4::direction(-d, -d, d),
            radians: 12.0f32.to_radians(),
        },
    ]
}

/// Compose steps by matrix concatenation
pub fn compose_matrix(steps: &[Step]) -> Mat4 {
    steps.iter().fold(Mat4::IDENTITY, |m, step| {
        let next = match *step {
            Step::Translate(t) => Mat4::translate(t),
            Step::RotateX(radians) => Mat4::rotate_x(radians),
            Step::RotateY(radians) => Mat4::rotate_y(radians),
            Step::RotateZ(radians) => Mat4::rotate_z(radians),
            Step::Rotate { axis, radians } => Mat4::rotate(axis, radians),
            Step::RotateTranslate { axis, radians, translation } => {
                Mat4::transform(axis, radians, translation)
            }
        };
        next * m
    })
}

/// Compose steps as a rotation quaternion plus a tracked translation
///
/// Every rotation is applied to the accumulated translation as well as
/// folded into the quaternion; every translation is added to it.
pub fn compose_quat_and_vec(steps: &[Step]) -> (Quat, Vec4) {
    let mut q = Quat::IDENTITY;
    let mut t = Vec4::ZERO;

    for step in steps {
        if let Some(r) = step.rotation() {
            q = r * q;
            t = r.transform(t);
        }
        if let Some(offset) = step.translation() {
            t = t + Vec4::direction(offset.x, offset.y, offset.z);
        }
    }

    (q, t)
}

/// Compose steps as a single dual quaternion
pub fn compose_dual_quat(steps: &[Step]) -> DualQuat {
    steps.iter().fold(DualQuat::IDENTITY, |d, step| {
        let next = match (step.rotation(), step.translation()) {
            (Some(r), Some(t)) => DualQuat::from_rotation_translation(r, t),
            (Some(r), None) => DualQuat::from(r),
            (None, Some(t)) => DualQuat::from_translation(t),
            (None, None) => DualQuat::IDENTITY,
        };
        next * d
    })
}

/// Which representation a chain is composed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    /// Matrix concatenation
    Matrix,
    /// Quaternion rotation plus a translation vector
    QuatAndVec,
    /// Dual quaternion composition
    DualQuat,
}

impl Chain {
    /// All chains, in reporting order
    pub const ALL: [Chain; 3] = [Chain::Matrix, Chain::QuatAndVec, Chain::DualQuat];

    /// Compose `steps` in this representation and build the resulting matrix
    pub fn run(self, steps: &[Step]) -> Mat4 {
        match self {
            Chain::Matrix => compose_matrix(steps),
            Chain::QuatAndVec => {
                let (q, t) = compose_quat_and_vec(steps);
                Mat4::from_rotation_translation(q, t)
            }
            Chain::DualQuat => compose_dual_quat(steps).to_matrix(),
        }
    }

    /// Human-readable description used in reports
    pub fn description(self) -> &'static str {
        match self {
            Chain::Matrix => "Concatenating Matrix transforms",
            Chain::QuatAndVec => "Concatenating quaternion and translation vectors",
            Chain::DualQuat => "Concatenating dual quaternions",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chain::Matrix => "matrix",
            Chain::QuatAndVec => "quat_and_vec",
            Chain::DualQuat => "dual_quat",
        };
        f.write_str(name)
    }
}
