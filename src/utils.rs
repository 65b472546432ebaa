//! Helper functions

use crate::jacobian::Jacobian;
use crate::kinematic_traits::{Joints, DOF};
use crate::pose::Pose7;

/// Checks if all elements in the array are finite
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..DOF {
        let computed = joints[joint_idx];
        row_str.push_str(&format!("{:5.2} ", computed.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

/// Print the pose as position and quaternion.
#[allow(dead_code)]
pub fn dump_pose(pose: &Pose7) {
    println!("position   [{:8.5} {:8.5} {:8.5}]", pose[0], pose[1], pose[2]);
    println!("quaternion [{:8.5} {:8.5} {:8.5} {:8.5}] (x y z w)", pose[3], pose[4], pose[5], pose[6]);
}

/// Print the Jacobian row by row, linear rows first.
#[allow(dead_code)]
pub fn dump_jacobian(jacobian: &Jacobian) {
    for row in jacobian.to_rows() {
        let row_str = row.iter()
            .map(|v| format!("{:8.4}", v))
            .collect::<Vec<_>>()
            .join(" ");
        println!("[{}]", row_str);
    }
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: [f64; DOF]) -> Joints {
    std::array::from_fn(|i| degrees[i].to_radians())
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}
