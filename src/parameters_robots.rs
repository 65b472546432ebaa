//! Hardcoded DH parameters for a few robots

pub mod dh_kinematics {
    use crate::kinematic_traits::DOF;
    use crate::parameters::dh_kinematics::{DhParameter, Parameters};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[allow(dead_code)]
    impl Parameters {
        // Provides default values
        pub fn new() -> Self {
            Parameters {
                dh: [DhParameter::new(0.0, 0.0, 0.0); DOF],
                ee_rotation: 0.0,
            }
        }

        /// Franka Emika Panda in Craig's convention, as laid out by panda_model.urdf.
        /// Joint 7 differs slightly from the vendor table. The gripper frame is turned
        /// by -45 degrees about the z axis of the last joint.
        /// See https://frankaemika.github.io/docs/control_parameters.html#denavithartenberg-parameters
        pub fn franka_panda() -> Self {
            Parameters {
                dh: [
                    DhParameter::new(0.0, 0.333, 0.0),           // panda_joint1
                    DhParameter::new(0.0, 0.0, -FRAC_PI_2),      // panda_joint2
                    DhParameter::new(0.0, 0.316, FRAC_PI_2),     // panda_joint3
                    DhParameter::new(0.0825, 0.0, FRAC_PI_2),    // panda_joint4
                    DhParameter::new(-0.0825, 0.384, -FRAC_PI_2), // panda_joint5
                    DhParameter::new(0.0, 0.0, FRAC_PI_2),       // panda_joint6
                    DhParameter::new(0.088, 0.07, FRAC_PI_2),    // panda_joint7
                ],
                ee_rotation: -FRAC_PI_4,
            }
        }
    }
}
