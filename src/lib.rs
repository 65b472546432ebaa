//! Forward kinematics and the geometric Jacobian for seven axis serial arms described by
//! Denavit-Hartenberg parameters in Craig's modified convention.
//!
//! # Features
//!
//! - Per-joint homogeneous transforms, composed either from the base through the first
//!   `k` joints or between any two frames of the chain.
//! - Geometric Jacobian (6x7, linear rows first) from joint axes and lever arms, with a
//!   finite difference Jacobian for cross-checking.
//! - The robot may stand on a base (arbitrary isometry) and may carry a fixed end effector
//!   rotation about the last joint axis, as the Franka Emika Panda gripper does.
//! - Poses are available as `nalgebra::Isometry3`, homogeneous matrices or flat
//!   `[x, y, z, qx, qy, qz, qw]` arrays.
//! - Robot models can be read from YAML. Recorded ground truth (JSON) can be scored with the
//!   included command line tool.
//!
//! # Parameters
//!
//! Each joint is described by link length `a`, link offset `d` and link twist `alpha`.
//! The transform of joint `i` with angle `theta` is
//! `Rot_x(alpha) * Trans_x(a) * Rot_z(theta) * Trans_z(d)`.
//!
//! ```
//! use rs_dh_kinematics::kinematic_traits::Kinematics;
//! use rs_dh_kinematics::kinematics_impl::DhKinematics;
//! use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
//!
//! let robot = DhKinematics::at_position(Parameters::franka_panda(), &[0.0, 0.0, 0.0]);
//! let joints = [0.0, -0.785398, 0.0, -2.356194, 0.0, 1.570796, 0.785398];
//! let pose = robot.forward(&joints);
//! let jacobian = robot.jacobian(&joints);
//! println!("Gripper at {:?}, jacobian {:?}", pose.translation, jacobian.matrix());
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

pub mod kinematics_error;
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod transform;

pub mod jacobian;

pub mod pose;

#[cfg(feature = "allow_filesystem")]
pub mod scoring;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
