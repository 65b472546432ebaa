//! Homogeneous transforms of the modified (Craig) DH chain.
//!
//! The chain is composed from a single per-joint primitive. Two explicit queries are
//! provided: the transform through the first `k` joints (base to frame `k`) and the
//! transform between frames `i` and `j` of the chain. Frame `k` is the frame after
//! joint `k - 1`, so frame 0 is the robot base and frame 7 the flange.

extern crate nalgebra as na;

use na::{Matrix4, Vector3};
use crate::kinematic_traits::DOF;
use crate::kinematics_error::KinematicsError;
use crate::parameters::dh_kinematics::DhParameter;

/// Transform of a single joint, from the previous frame to the frame of this joint:
/// `Rot_x(alpha) * Trans_x(a) * Rot_z(theta) * Trans_z(d)`.
pub fn joint_transform(theta: f64, dh: &DhParameter) -> Matrix4<f64> {
    let (sin_th, cos_th) = theta.sin_cos();
    let (sin_al, cos_al) = dh.alpha.sin_cos();

    Matrix4::new(
        cos_th, -sin_th, 0.0, dh.a,
        sin_th * cos_al, cos_th * cos_al, -sin_al, -dh.d * sin_al,
        sin_th * sin_al, cos_th * sin_al, cos_al, dh.d * cos_al,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Transform from the base to frame `k`, the product of the first `k` joint transforms.
/// Zero joints give identity. Joints at index `k` and above are not read.
///
/// # Panics
/// If `k` exceeds the number of joints.
pub fn transform_through(k: usize, qs: &[f64; DOF], dh: &[DhParameter; DOF]) -> Matrix4<f64> {
    transform_between(0, k, qs, dh)
}

/// Transform from frame `from` to frame `to` (`from <= to`), the product of joint
/// transforms `from .. to`. Equal frames give identity.
///
/// # Panics
/// If `from > to` or `to` exceeds the number of joints.
pub fn transform_between(from: usize, to: usize, qs: &[f64; DOF], dh: &[DhParameter; DOF]) -> Matrix4<f64> {
    assert!(from <= to && to <= DOF, "Invalid joint range {}..{} for {} joints", from, to, DOF);
    chain_product(from, to, qs, dh)
}

/// Same as [transform_through] but reports a joint count above 7 as an error.
pub fn try_transform_through(k: usize, qs: &[f64; DOF], dh: &[DhParameter; DOF])
                             -> Result<Matrix4<f64>, KinematicsError> {
    try_transform_between(0, k, qs, dh)
}

/// Same as [transform_between] but returns an error instead of panicking:
/// `DimensionMismatch` if `to` exceeds the number of joints and `InvalidParameter`
/// if `from > to`.
pub fn try_transform_between(from: usize, to: usize, qs: &[f64; DOF], dh: &[DhParameter; DOF])
                             -> Result<Matrix4<f64>, KinematicsError> {
    if to > DOF {
        return Err(KinematicsError::DimensionMismatch { what: "joint range", expected: DOF, found: to });
    }
    if from > to {
        return Err(KinematicsError::InvalidParameter(format!(
            "reversed joint range {}..{}", from, to
        )));
    }
    Ok(chain_product(from, to, qs, dh))
}

fn chain_product(from: usize, to: usize, qs: &[f64; DOF], dh: &[DhParameter; DOF]) -> Matrix4<f64> {
    (from..to).fold(Matrix4::identity(), |t, i| t * joint_transform(qs[i], &dh[i]))
}

/// All cumulative frames from the base (index 0, identity) to the flange (index 7),
/// computed in one pass. Entry `k` equals `transform_through(k, ..)`.
pub fn joint_frames(qs: &[f64; DOF], dh: &[DhParameter; DOF]) -> [Matrix4<f64>; DOF + 1] {
    let mut frames = [Matrix4::identity(); DOF + 1];
    for i in 0..DOF {
        frames[i + 1] = frames[i] * joint_transform(qs[i], &dh[i]);
    }
    frames
}

/// Origin of the frame (translation column).
#[inline]
pub fn origin(t: &Matrix4<f64>) -> Vector3<f64> {
    Vector3::new(t[(0, 3)], t[(1, 3)], t[(2, 3)])
}

/// Direction of the frame z axis (third column of the rotation block).
#[inline]
pub fn z_axis(t: &Matrix4<f64>) -> Vector3<f64> {
    Vector3::new(t[(0, 2)], t[(1, 2)], t[(2, 2)])
}
