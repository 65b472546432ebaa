use anyhow::{Context, Result};
use nalgebra::Isometry3;

use crate::pose::{pose7_distance, Pose7};
use crate::scoring::TestCases;

pub(crate) const REFERENCE_CASES: &str = "src/tests/data/fk_testcase.json";
pub(crate) const PANDA_YAML: &str = "src/tests/data/franka_panda.yaml";

/// Load the reference cases recorded for the Panda standing at the origin.
pub(crate) fn load_reference_cases() -> Result<TestCases> {
    TestCases::from_json_file(REFERENCE_CASES)
        .with_context(|| format!("Failed to read test cases: {}", REFERENCE_CASES))
}

/// Compare two isometries with separate tolerances.
/// - `trans_tol_m`: max allowed Euclidean distance in meters
/// - `rot_tol_rad`: max allowed rotation angle difference in radians
pub fn are_isometries_close(a: &Isometry3<f64>, b: &Isometry3<f64>, trans_tol_m: f64, rot_tol_rad: f64) -> bool {
    let tdiff = (a.translation.vector - b.translation.vector).norm();
    if tdiff > trans_tol_m {
        return false;
    }
    let rdiff = a.rotation.inverse() * b.rotation;
    let mut angle = rdiff.angle(); // in [0, π]
    // Be tolerant to tiny numerical drift
    if angle.is_nan() {
        angle = 0.0;
    }
    angle <= rot_tol_rad
}

#[inline]
pub fn are_isometries_approx_equal(a: &Isometry3<f64>, b: &Isometry3<f64>, tolerance: f64) -> bool {
    are_isometries_close(a, b, tolerance, tolerance)
}

pub fn assert_pose7_close(actual: &Pose7, expected: &Pose7, tolerance: f64) {
    let distance = pose7_distance(actual, expected);
    assert!(distance <= tolerance,
            "Pose {:?} differs from expected {:?} by {}", actual, expected, distance);
}

pub fn pose7_distance_ok(actual: &Pose7, expected: &Pose7, threshold: f64) -> bool {
    pose7_distance(actual, expected) <= threshold
}
