#[cfg(test)]
mod tests {
    use crate::kinematic_traits::{Kinematics, DOF, JOINTS_AT_ZERO};
    use crate::kinematics_impl::{forward_kinematics, DhKinematics};
    use crate::parameters::dh_kinematics::Parameters;
    use crate::pose::pose7_from_isometry;
    use crate::scoring::{FK_ERROR_THRESH, JACOBIAN_ERROR_THRESH};
    use crate::tests::test_utils;

    // Reference data has 9 decimals
    const TIGHT: f64 = 1e-7;

    #[test]
    fn test_load_reference_cases() {
        let result = test_utils::load_reference_cases();
        assert!(result.is_ok(), "Failed to load the JSON file: {}", result.unwrap_err());
        let cases = result.expect("Expected valid test cases");
        assert_eq!(cases.cases.len(), 8);
        assert_eq!(cases.name, "fk_testcase.json");
    }

    #[test]
    fn test_forward_matches_reference() {
        let cases = test_utils::load_reference_cases().expect("Reference cases");
        let panda = Parameters::franka_panda();
        println!("Forward kinematics: {} test cases", cases.cases.len());

        for (i, case) in cases.cases.iter().enumerate() {
            let (pose, jacobian) = forward_kinematics(&[0.0; 3], &panda.dh, &case.joints)
                .expect("Panda table and 7 joints are valid");

            test_utils::assert_pose7_close(&pose, &case.pose, TIGHT);
            assert!(test_utils::pose7_distance_ok(&pose, &case.pose, FK_ERROR_THRESH));

            let mut error = 0.0;
            for r in 0..6 {
                for c in 0..DOF {
                    let d = jacobian[r][c] - case.jacobian[(r, c)];
                    error += d * d;
                }
            }
            let error = f64::sqrt(error);
            assert!(error < TIGHT && error < JACOBIAN_ERROR_THRESH,
                    "Jacobian of case {} differs by {}", i, error);
        }
    }

    #[test]
    fn test_typed_api_matches_reference() {
        let cases = test_utils::load_reference_cases().expect("Reference cases");
        let robot = DhKinematics::new(Parameters::franka_panda());

        for case in cases.cases.iter() {
            let pose = pose7_from_isometry(&robot.forward(&case.joints));
            test_utils::assert_pose7_close(&pose, &case.pose, TIGHT);
            assert!(robot.jacobian(&case.joints).distance(&case.jacobian) < TIGHT);
        }
    }

    #[test]
    fn test_zero_pose_closed_form() {
        let cases = test_utils::load_reference_cases().expect("Reference cases");
        let zero = &cases.cases[0];
        assert_eq!(zero.joints, JOINTS_AT_ZERO);

        // Closed form from the table: offsets along x and z only
        let dh = Parameters::franka_panda().dh;
        let x = dh[3].a + dh[4].a + dh[6].a;
        let z = dh[0].d + dh[2].d + dh[4].d - dh[6].d;
        assert!((zero.pose[0] - x).abs() < TIGHT);
        assert!(zero.pose[1].abs() < TIGHT);
        assert!((zero.pose[2] - z).abs() < TIGHT);
        assert!((x - 0.088).abs() < 1e-12);
        assert!((z - 0.963).abs() < 1e-12);
    }
}
