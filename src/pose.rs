//! Conversions between the homogeneous matrix, the isometry and the flat 7 component pose
//! `[x, y, z, qx, qy, qz, qw]` (quaternion with the scalar last, as used by pybullet and
//! in the test case files).

extern crate nalgebra as na;

use na::{Isometry3, Matrix3, Matrix4, Quaternion, Rotation3, Translation3, UnitQuaternion};

/// Position followed by the orientation quaternion `[x, y, z, qx, qy, qz, qw]`.
pub type Pose7 = [f64; 7];

pub fn pose7_from_isometry(isometry: &Isometry3<f64>) -> Pose7 {
    let t = isometry.translation.vector;
    let q = isometry.rotation.quaternion();
    [t.x, t.y, t.z, q.i, q.j, q.k, q.w]
}

/// The quaternion is normalized, so a slightly denormalized input still gives a rigid transform.
pub fn isometry_from_pose7(pose: &Pose7) -> Isometry3<f64> {
    let translation = Translation3::new(pose[0], pose[1], pose[2]);
    let rotation = UnitQuaternion::from_quaternion(Quaternion::new(
        pose[6], // w
        pose[3], // x
        pose[4], // y
        pose[5], // z
    ));
    Isometry3::from_parts(translation, rotation)
}

/// Isometry from a homogeneous transform. The rotation block is taken as is (no
/// orthonormalization), matching the drift tolerated along the chain.
pub fn isometry_from_matrix(m: &Matrix4<f64>) -> Isometry3<f64> {
    let rotation: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation));
    Isometry3::from_parts(Translation3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]), rotation)
}

pub fn matrix_to_pose7(m: &Matrix4<f64>) -> Pose7 {
    pose7_from_isometry(&isometry_from_matrix(m))
}

pub fn pose7_to_matrix(pose: &Pose7) -> Matrix4<f64> {
    isometry_from_pose7(pose).to_homogeneous()
}

/// Euclidean distance between two flat poses. `q` and `-q` are the same orientation,
/// so the sign giving the smaller distance is used.
pub fn pose7_distance(a: &Pose7, b: &Pose7) -> f64 {
    let squared = |flip: f64| -> f64 {
        (0..7).map(|i| {
            let sign = if i < 3 { 1.0 } else { flip };
            let d = a[i] * sign - b[i];
            d * d
        }).sum()
    };
    squared(1.0).min(squared(-1.0)).sqrt()
}
