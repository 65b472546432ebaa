//! Forward kinematics of 7 axis arms described by modified DH parameters.

use crate::jacobian::Jacobian;
use crate::kinematic_traits::{Joints, Kinematics, Pose, DOF};
use crate::kinematics_error::{check_length, KinematicsError};
use crate::parameters::dh_kinematics::{DhParameter, Parameters};
use crate::pose::{isometry_from_matrix, pose7_from_isometry, Pose7};
use crate::transform::{joint_frames, transform_through};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_4;

/// Rotation of the Panda gripper frame about the z axis of the last joint.
pub const PANDA_EE_ROTATION: f64 = -FRAC_PI_4;

#[derive(Debug, Clone, Copy)]
pub struct DhKinematics {
    /// The parameters that were used to construct this solver.
    parameters: Parameters,

    /// Transformation from the world origin to the robot base.
    base: Isometry3<f64>,

    /// Precomputed end effector frame correction, applied to the reported pose only.
    ee_correction: Isometry3<f64>,
}

impl DhKinematics {
    /// Creates a new `DhKinematics` instance standing at the world origin.
    pub fn new(parameters: Parameters) -> Self {
        Self::with_base(parameters, Isometry3::identity())
    }

    /// Creates a new `DhKinematics` instance mounted on the given base.
    pub fn with_base(parameters: Parameters, base: Isometry3<f64>) -> Self {
        let ee_correction = Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), parameters.ee_rotation),
        );
        DhKinematics { parameters, base, ee_correction }
    }

    /// Creates a new `DhKinematics` instance with the base at the given position and
    /// identity orientation.
    pub fn at_position(parameters: Parameters, base_position: &[f64; 3]) -> Self {
        let base = Isometry3::translation(base_position[0], base_position[1], base_position[2]);
        Self::with_base(parameters, base)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn base(&self) -> &Isometry3<f64> {
        &self.base
    }

    /// Flange pose (base times the complete chain), before the end effector correction.
    pub fn flange(&self, qs: &Joints) -> Pose {
        self.base * isometry_from_matrix(&transform_through(DOF, qs, &self.parameters.dh))
    }
}

impl Kinematics for DhKinematics {
    fn forward(&self, qs: &Joints) -> Pose {
        self.flange(qs) * self.ee_correction
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; DOF] {
        let frames = joint_frames(qs, &self.parameters.dh);
        std::array::from_fn(|i| self.base * isometry_from_matrix(&frames[i + 1]))
    }

    fn jacobian(&self, qs: &Joints) -> Jacobian {
        Jacobian::new(qs, &self.parameters.dh, &self.base)
    }
}

/// Converts the joint angle slice into the fixed size array, checking the length.
pub fn joints_from_slice(qs: &[f64]) -> Result<Joints, KinematicsError> {
    check_length("joint angles", DOF, qs.len())?;
    let mut joints = [0.0; DOF];
    joints.copy_from_slice(qs);
    Ok(joints)
}

/// Forward kinematics and Jacobian of the Panda arm placed at `base_position`,
/// for a DH table and joint angles of unchecked length.
///
/// Both the table and the joints must contain 7 entries, otherwise
/// `KinematicsError::DimensionMismatch` is returned before anything is computed.
/// The reported orientation includes the -45 degree rotation of the Panda gripper frame;
/// the Jacobian is computed on the chain without it.
///
/// # Returns
///
/// The end effector pose `[x, y, z, qx, qy, qz, qw]` and the Jacobian as 6 rows of 7
/// (linear xyz, then angular xyz, one column per joint).
pub fn forward_kinematics(
    base_position: &[f64; 3],
    dh: &[DhParameter],
    qs: &[f64],
) -> Result<(Pose7, [[f64; DOF]; 6]), KinematicsError> {
    let parameters = Parameters::from_dh_table(dh, PANDA_EE_ROTATION)?;
    forward_kinematics_with(&parameters, base_position, qs)
}

/// Same as `forward_kinematics` but uses the complete robot model, including its own
/// end effector rotation.
pub fn forward_kinematics_with(
    parameters: &Parameters,
    base_position: &[f64; 3],
    qs: &[f64],
) -> Result<(Pose7, [[f64; DOF]; 6]), KinematicsError> {
    let joints = joints_from_slice(qs)?;
    let robot = DhKinematics::at_position(*parameters, base_position);
    let pose = pose7_from_isometry(&robot.forward(&joints));
    Ok((pose, robot.jacobian(&joints).to_rows()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::pose7_distance;

    const SMALL: f64 = 1e-9;

    fn panda_table() -> Vec<DhParameter> {
        Parameters::franka_panda().dh.to_vec()
    }

    #[test]
    fn test_zero_pose() {
        let (pose, jacobian) = forward_kinematics(&[0.0; 3], &panda_table(), &[0.0; DOF])
            .expect("Valid input");
        // Gripper frame is the flange turned by -45 degrees, the flange itself points down
        let expected: Pose7 = [0.088, 0.0, 0.963, 0.9238795325112867, 0.3826834323650897, 0.0, 0.0];
        assert!(pose7_distance(&pose, &expected) < SMALL, "Pose {:?}", pose);
        assert!((jacobian[1][0] - 0.088).abs() < SMALL);
        assert!((jacobian[5][0] - 1.0).abs() < SMALL);
    }

    #[test]
    fn test_base_position_shifts_pose_only() {
        let qs = [0.3, -0.7, 1.1, -2.0, 0.4, 1.9, -0.6];
        let (at_origin, j_origin) = forward_kinematics(&[0.0; 3], &panda_table(), &qs).expect("Valid input");
        let (shifted, j_shifted) = forward_kinematics(&[0.1, -0.2, 0.5], &panda_table(), &qs).expect("Valid input");
        assert!((shifted[0] - at_origin[0] - 0.1).abs() < SMALL);
        assert!((shifted[1] - at_origin[1] + 0.2).abs() < SMALL);
        assert!((shifted[2] - at_origin[2] - 0.5).abs() < SMALL);
        for i in 3..7 {
            assert!((shifted[i] - at_origin[i]).abs() < SMALL);
        }
        // Lever arms do not change with a pure translation of the base
        for r in 0..6 {
            for c in 0..DOF {
                assert!((j_origin[r][c] - j_shifted[r][c]).abs() < SMALL);
            }
        }
    }

    #[test]
    fn test_short_joints_rejected() {
        let result = forward_kinematics(&[0.0; 3], &panda_table(), &[0.0; 6]);
        assert!(matches!(result, Err(KinematicsError::DimensionMismatch { expected: 7, found: 6, .. })));
    }

    #[test]
    fn test_long_table_rejected() {
        let mut table = panda_table();
        table.push(DhParameter::new(0.0, 0.107, 0.0));
        let result = forward_kinematics(&[0.0; 3], &table, &[0.0; DOF]);
        assert!(matches!(result, Err(KinematicsError::DimensionMismatch { expected: 7, found: 8, .. })));
    }

    #[test]
    fn test_correction_does_not_move_flange() {
        let robot = DhKinematics::new(Parameters::franka_panda());
        let qs = [-1.5, 1.2, -0.4, -0.9, 2.1, 0.2, 1.7];
        let flange = robot.flange(&qs);
        let tcp = robot.forward(&qs);
        assert!((flange.translation.vector - tcp.translation.vector).norm() < SMALL);
        // Same z axis, rotated by -45 degrees about it
        let relative = flange.rotation.inverse() * tcp.rotation;
        assert!((relative.angle() - FRAC_PI_4).abs() < SMALL);
        let axis = relative.axis().expect("Non zero rotation");
        assert!((axis.into_inner() - Vector3::new(0.0, 0.0, -1.0)).norm() < SMALL);
    }

    #[test]
    fn test_model_rotation_is_configurable() {
        let mut parameters = Parameters::franka_panda();
        parameters.ee_rotation = 0.0;
        let qs = [0.2; DOF];
        let (pose, _) = forward_kinematics_with(&parameters, &[0.0; 3], &qs).expect("Valid input");
        let flange = DhKinematics::new(parameters).flange(&qs);
        assert!(pose7_distance(&pose, &pose7_from_isometry(&flange)) < SMALL);
    }

    #[test]
    fn test_calls_are_independent() {
        let qs = [0.5, 0.4, 0.3, -0.2, 0.1, 0.6, 0.7];
        let first = forward_kinematics(&[0.0; 3], &panda_table(), &qs).expect("Valid input");
        forward_kinematics(&[1.0; 3], &panda_table(), &[1.0; DOF]).expect("Valid input");
        let again = forward_kinematics(&[0.0; 3], &panda_table(), &qs).expect("Valid input");
        assert_eq!(first, again);
    }
}
