//! Core types and the forward kinematics trait

extern crate nalgebra as na;

use na::Isometry3;
use crate::jacobian::Jacobian;

/// Number of revolute joints of the supported arms.
pub const DOF: usize = 7;

/// Pose is used a pose of the robot flange or TCP. It contains both Cartesian position and
/// rotation quaternion.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(0.088, 0.0, 0.963);
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -std::f64::consts::FRAC_PI_4);
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Joint angles in radians, one per revolute joint.
pub type Joints = [f64; DOF];

/// All joints at zero.
pub const JOINTS_AT_ZERO: Joints = [0.0; DOF];

pub trait Kinematics: Send + Sync {
    /// Pose of the end effector, including the fixed end effector frame correction
    /// of the model.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Poses of the frames after each joint (joint 1 to joint 7), in world coordinates.
    /// The last pose is the flange before the end effector correction.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; DOF];

    /// Geometric Jacobian for the given joint angles.
    fn jacobian(&self, qs: &Joints) -> Jacobian;
}
