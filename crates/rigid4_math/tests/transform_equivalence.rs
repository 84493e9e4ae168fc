//! Cross-representation tests
//!
//! The same chain of rotations and translations is composed three ways
//! (matrix concatenation, quaternion plus tracked translation, dual
//! quaternion) and every composed transform must move points identically.

use rigid4_math::{DualQuat, Mat4, Quat, Vec4};

const TOLERANCE: f32 = 1e-4;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

// Rounding error scales with the whole vector, not with each lane.
fn assert_vec_close(a: Vec4, b: Vec4, what: &str) {
    let scale = a.magnitude().max(b.magnitude()).max(1.0);
    assert!(
        (a - b).to_array().iter().all(|d| d.abs() <= TOLERANCE * scale),
        "{}: {:?} vs {:?}",
        what,
        a,
        b
    );
}

fn deg(d: f32) -> f32 {
    d.to_radians()
}

fn axis_99() -> Vec4 {
    let c = 1.0 / 2.0f32.sqrt();
    Vec4::direction(c, c, 0.0)
}

fn axis_12() -> Vec4 {
    let d = 1.0 / 3.0f32.sqrt();
    Vec4::direction(-d, -d, d)
}

// translate (3,4,5); rotate 30° about Y; rotate 20° about Z; rotate 25° about X;
// translate (-7,-9,-3); rotate 99° about (1/√2, 1/√2, 0); translate (0,4,-1);
// rotate 12° about (-1/√3, -1/√3, 1/√3)

fn compose_matrix() -> Mat4 {
    let mut m = Mat4::translate(Vec4::direction(3.0, 4.0, 5.0));
    m = Mat4::rotate_y(deg(30.0)) * m;
    m = Mat4::rotate_z(deg(20.0)) * m;
    m = Mat4::rotate_x(deg(25.0)) * m;
    m = Mat4::translate(Vec4::direction(-7.0, -9.0, -3.0)) * m;
    m = Mat4::transform(axis_99(), deg(99.0), Vec4::direction(0.0, 4.0, -1.0)) * m;
    Mat4::rotate(axis_12(), deg(12.0)) * m
}

fn compose_quat_and_vec() -> (Quat, Vec4) {
    let mut q = Quat::IDENTITY;
    let mut t = Vec4::direction(3.0, 4.0, 5.0);

    let rotations_then_offsets = [
        (Quat::from_axis_angle(Vec4::Y, deg(30.0)), Vec4::ZERO),
        (Quat::from_axis_angle(Vec4::Z, deg(20.0)), Vec4::ZERO),
        (Quat::from_axis_angle(Vec4::X, deg(25.0)), Vec4::direction(-7.0, -9.0, -3.0)),
        (Quat::from_axis_angle(axis_99(), deg(99.0)), Vec4::direction(0.0, 4.0, -1.0)),
        (Quat::from_axis_angle(axis_12(), deg(12.0)), Vec4::ZERO),
    ];

    for (r, offset) in rotations_then_offsets {
        q = r * q;
        t = r.transform(t) + offset;
    }

    (q, t)
}

fn compose_dual_quat() -> DualQuat {
    let mut d = DualQuat::from_rotation_translation(Quat::from(1.0), Vec4::direction(3.0, 4.0, 5.0));
    d = DualQuat::from(Quat::from_axis_angle(Vec4::Y, deg(30.0))) * d;
    d = DualQuat::from(Quat::from_axis_angle(Vec4::Z, deg(20.0))) * d;
    d = DualQuat::from(Quat::from_axis_angle(Vec4::X, deg(25.0))) * d;
    d = DualQuat::from_translation(Vec4::direction(-7.0, -9.0, -3.0)) * d;
    d = DualQuat::from(Quat::from_axis_angle(axis_99(), deg(99.0))) * d;
    d = DualQuat::from_translation(Vec4::direction(0.0, 4.0, -1.0)) * d;
    DualQuat::from(Quat::from_axis_angle(axis_12(), deg(12.0))) * d
}

fn probe_points() -> Vec<Vec4> {
    vec![
        Vec4::point(0.0, 0.0, 0.0),
        Vec4::point(1.0, 2.0, 3.0),
        Vec4::point(-5.0, 0.5, 10.0),
        Vec4::point(12.0, -8.0, 7.25),
        Vec4::direction(0.0, 1.0, 0.0),
        Vec4::direction(-3.0, 2.0, 1.0),
    ]
}

#[test]
fn three_chains_move_points_identically() {
    let m = compose_matrix();
    let (q, t) = compose_quat_and_vec();
    let d = compose_dual_quat();

    for p in probe_points() {
        let by_matrix = m * p;
        let by_quat = q.transform_and_translate(p, t);
        let by_dual = d.transform(p);

        assert_vec_close(by_quat, by_matrix, "quat+vec vs matrix");
        assert_vec_close(by_dual, by_matrix, "dual quat vs matrix");
    }
}

#[test]
fn chains_preserve_homogeneous_marker() {
    let m = compose_matrix();
    let (q, t) = compose_quat_and_vec();
    let d = compose_dual_quat();

    for p in probe_points() {
        assert_eq!((m * p).w, p.w);
        assert_eq!(q.transform_and_translate(p, t).w, p.w);
        assert_eq!(d.transform(p).w, p.w);
    }
}

#[test]
fn composed_matrices_agree() {
    let m = compose_matrix();
    let (q, t) = compose_quat_and_vec();
    let from_quat = Mat4::from_rotation_translation(q, t);
    let from_dual = compose_dual_quat().to_matrix();

    for i in 0..4 {
        assert_vec_close(from_quat[i], m[i], "quat+vec matrix column");
        assert_vec_close(from_dual[i], m[i], "dual quat matrix column");
    }
}

#[test]
fn dual_quat_recovers_tracked_translation() {
    let (q, t) = compose_quat_and_vec();
    let d = compose_dual_quat();

    assert_vec_close(d.translation(), t, "translation");
    let r = d.real;
    assert!(close(r.real, q.real) && close(r.i, q.i) && close(r.j, q.j) && close(r.k, q.k),
        "rotation: {:?} vs {:?}", r, q);
}

#[test]
fn composed_rotation_is_unit() {
    let (q, _) = compose_quat_and_vec();
    assert!(close(q.norm(), 1.0), "norm {}", q.norm());
    assert!(close(compose_dual_quat().real.norm(), 1.0));
}

#[test]
fn inverse_chain_returns_to_start() {
    let d = compose_dual_quat();
    let inv = d.inverse();
    for p in probe_points() {
        assert_vec_close(inv.transform(d.transform(p)), p, "round trip");
    }
}
