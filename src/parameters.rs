//! Defines the DH parameter data structures

pub mod dh_kinematics {
    use crate::kinematic_traits::DOF;
    use crate::kinematics_error::{check_length, KinematicsError};
    use crate::utils::deg;

    /// Kinematic constants of a single link, following Craig's modified DH convention.
    /// The joint angle (theta) is not stored here as it changes with every call.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct DhParameter {
        /// Link length, distance between the z axes along the x axis of the previous frame.
        pub a: f64,

        /// Link offset, distance along the joint z axis.
        pub d: f64,

        /// Link twist (radians), rotation about the x axis of the previous frame.
        pub alpha: f64,
    }

    impl DhParameter {
        pub const fn new(a: f64, d: f64, alpha: f64) -> Self {
            DhParameter { a, d, alpha }
        }

        pub fn is_finite(&self) -> bool {
            self.a.is_finite() && self.d.is_finite() && self.alpha.is_finite()
        }
    }

    /// Parameters for the robot. See [parameters_robots.rs](parameters_robots.rs) for
    /// concrete robot models.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// One entry per joint, from the base to the flange.
        pub dh: [DhParameter; DOF],

        /// Fixed rotation (radians) about the z axis of the last joint frame, applied to the
        /// reported end effector orientation only. It accounts for the mounting of the physical
        /// end effector frame relative to the last kinematic frame and is model specific.
        pub ee_rotation: f64,
    }

    impl Parameters {
        /// Builds parameters from a DH table of unchecked length.
        pub fn from_dh_table(dh: &[DhParameter], ee_rotation: f64) -> Result<Self, KinematicsError> {
            check_length("DH table", DOF, dh.len())?;
            let mut table = [DhParameter::new(0.0, 0.0, 0.0); DOF];
            table.copy_from_slice(dh);
            Ok(Parameters { dh: table, ee_rotation })
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            let mut yaml = String::from("dh_kinematics_parameters:\n");
            for p in &self.dh {
                yaml.push_str(&format!(
                    "  - {{ a: {}, d: {}, alpha: {} }}\n",
                    p.a, p.d, deg(&p.alpha)
                ));
            }
            yaml.push_str(&format!(
                "dh_kinematics_ee_rotation: {}\ndof: {}\n",
                deg(&self.ee_rotation),
                DOF
            ));
            yaml
        }
    }

}
