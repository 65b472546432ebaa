//! Geometric Jacobian of the DH chain, and its finite difference counterpart

extern crate nalgebra as na;

use na::{Isometry3, SMatrix, SVector, Vector3, Vector6};
use rayon::prelude::*;
use crate::kinematic_traits::{Joints, Kinematics, DOF};
use crate::parameters::dh_kinematics::DhParameter;
use crate::transform::{joint_frames, origin, z_axis};

/// Jacobian matrix with rows for linear (x, y, z) and angular (x, y, z) velocities and
/// one column per joint.
pub type JacobianMatrix = SMatrix<f64, 6, DOF>;

/// Struct representing the Jacobian matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jacobian {
    /// A 6x7 matrix representing the Jacobian
    ///
    /// The Jacobian matrix maps the joint velocities to the end-effector velocities.
    /// Each column corresponds to a joint, and each row corresponds to a degree of freedom
    /// of the end-effector (linear and angular velocities).
    matrix: JacobianMatrix,
}

impl Jacobian {
    /// Computes the geometric Jacobian of the chain standing on the given base.
    pub fn new(qs: &Joints, dh: &[DhParameter; DOF], base: &Isometry3<f64>) -> Self {
        Self { matrix: geometric_jacobian(qs, dh, base) }
    }

    pub fn from_matrix(matrix: JacobianMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &JacobianMatrix {
        &self.matrix
    }

    /// Rows 0 to 2, linear velocity per joint.
    pub fn linear(&self) -> SMatrix<f64, 3, DOF> {
        self.matrix.fixed_rows::<3>(0).into_owned()
    }

    /// Rows 3 to 5, angular velocity per joint.
    pub fn angular(&self) -> SMatrix<f64, 3, DOF> {
        self.matrix.fixed_rows::<3>(3).into_owned()
    }

    /// Row major copy, linear xyz rows first.
    pub fn to_rows(&self) -> [[f64; DOF]; 6] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.matrix[(r, c)]))
    }

    /// Frobenius norm of the difference between two Jacobians.
    pub fn distance(&self, other: &JacobianMatrix) -> f64 {
        (self.matrix - other).norm()
    }

    /// End effector twist (linear, angular) for the given joint velocities.
    pub fn twist(&self, joint_velocities: &Joints) -> Twist {
        let qd = SVector::<f64, DOF>::from_column_slice(joint_velocities);
        let v = self.matrix * qd;
        Twist {
            linear: Vector3::new(v[0], v[1], v[2]),
            angular: Vector3::new(v[3], v[4], v[5]),
        }
    }
}

/// Linear and angular velocity of the end effector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Twist {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
}

/// Function to compute the geometric Jacobian for revolute joints.
///
/// For every joint `i`, `z` is the joint axis in world coordinates and `p` is the lever
/// arm from the origin of the joint frame to the flange origin. In the modified convention
/// the frame of joint `i` is `base * T(0..=i)` and its z axis is the rotation axis.
/// The linear column is `z × p`, the angular column is `z`.
///
/// # Arguments
///
/// * `qs` - joint angles (radians)
/// * `dh` - DH table of the robot
/// * `base` - transform from the world to the robot base
///
/// # Returns
///
/// A 6x7 matrix representing the Jacobian
pub fn geometric_jacobian(qs: &Joints, dh: &[DhParameter; DOF], base: &Isometry3<f64>) -> JacobianMatrix {
    let base = base.to_homogeneous();
    let frames = joint_frames(qs, dh).map(|frame| base * frame);
    let flange = origin(&frames[DOF]);

    let mut jacobian = JacobianMatrix::zeros();
    for i in 0..DOF {
        let joint_frame = &frames[i + 1];
        let z = z_axis(joint_frame);
        let p = flange - origin(joint_frame);
        jacobian.fixed_view_mut::<3, 1>(0, i).copy_from(&z.cross(&p));
        jacobian.fixed_view_mut::<3, 1>(3, i).copy_from(&z);
    }
    jacobian
}

/// Jacobian by central differences of the end effector pose. Works for any
/// [Kinematics] and serves as a cross-check of the geometric Jacobian. Each column
/// holds the position rate and the rotation vector rate (world frame) of one joint.
///
/// # Arguments
///
/// * `robot` - the robot implementing the Kinematics trait
/// * `joints` - joint configuration to differentiate at
/// * `epsilon` - joint step, radians
pub fn numeric_jacobian(robot: &impl Kinematics, joints: &Joints, epsilon: f64) -> JacobianMatrix {
    let pose_with_step = |joint: usize, step: f64| {
        let mut qs = *joints;
        qs[joint] += step;
        robot.forward(&qs)
    };

    let columns: Vec<Vector6<f64>> = (0..DOF).into_par_iter().map(|joint| {
        let ahead = pose_with_step(joint, epsilon);
        let behind = pose_with_step(joint, -epsilon);
        let span = 2.0 * epsilon;
        let linear = (ahead.translation.vector - behind.translation.vector) / span;
        let angular = (ahead.rotation * behind.rotation.inverse()).scaled_axis() / span;
        Vector6::new(linear.x, linear.y, linear.z, angular.x, angular.y, angular.z)
    }).collect();

    JacobianMatrix::from_fn(|row, col| columns[col][row])
}
