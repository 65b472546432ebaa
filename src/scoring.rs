//! Scores forward kinematics and Jacobians against recorded ground truth (optional).
//!
//! A test case file holds three parallel arrays, one entry per case:
//! ```json
//! {
//!   "joint_poses": [[q1, q2, q3, q4, q5, q6, q7], ...],
//!   "poses": [[x, y, z, qx, qy, qz, qw], ...],
//!   "jacobian": [[[...7 values...], ...6 rows...], ...]
//! }
//! ```
//! Each file is worth `FK_SCORE_MAX / files` points for the poses and as much for the
//! Jacobians. Every case over the error threshold costs a fixed penalty, scores never
//! drop below zero.

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::jacobian::JacobianMatrix;
use crate::kinematic_traits::{Joints, Kinematics, DOF};
use crate::kinematics_error::{check_length, KinematicsError};
use crate::kinematics_impl::joints_from_slice;
use crate::pose::{pose7_distance, pose7_from_isometry, Pose7};

pub const FK_SCORE_MAX: f64 = 10.0;
pub const JACOBIAN_SCORE_MAX: f64 = 10.0;
pub const TASK_SCORE_MAX: f64 = FK_SCORE_MAX + JACOBIAN_SCORE_MAX;

/// Largest accepted pose error (Euclidean norm over position and quaternion).
pub const FK_ERROR_THRESH: f64 = 0.005;

/// Largest accepted Jacobian error (Frobenius norm of the difference).
pub const JACOBIAN_ERROR_THRESH: f64 = 0.05;

/// Share of the cases that may fail before the file score drops to zero.
const PENALTY_FRACTION: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct TestCase {
    pub joints: Joints,
    pub pose: Pose7,
    pub jacobian: JacobianMatrix,
}

#[derive(Debug, Clone)]
pub struct TestCases {
    /// File name without the directory, for reporting.
    pub name: String,
    pub cases: Vec<TestCase>,
}

#[derive(Deserialize)]
struct TestCasesJson {
    joint_poses: Vec<Vec<f64>>,
    poses: Vec<Vec<f64>>,
    jacobian: Vec<Vec<Vec<f64>>>,
}

impl TestCases {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, KinematicsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_json_str(&name, &contents)
    }

    pub fn from_json_str(name: &str, contents: &str) -> Result<Self, KinematicsError> {
        let root: TestCasesJson = serde_json::from_str(contents)
            .map_err(|e| KinematicsError::ParseError(format!("{}: {}", name, e)))?;

        let count = root.joint_poses.len();
        check_length("poses", count, root.poses.len())?;
        check_length("jacobian", count, root.jacobian.len())?;

        let mut cases = Vec::with_capacity(count);
        for ((joints, pose), jacobian) in root.joint_poses.iter()
            .zip(root.poses.iter())
            .zip(root.jacobian.iter()) {
            cases.push(TestCase {
                joints: joints_from_slice(joints)?,
                pose: pose_from_slice(pose)?,
                jacobian: jacobian_from_rows(jacobian)?,
            });
        }
        debug!("Loaded {} test cases from {}", cases.len(), name);
        Ok(TestCases { name: name.to_string(), cases })
    }
}

fn pose_from_slice(values: &[f64]) -> Result<Pose7, KinematicsError> {
    check_length("pose", 7, values.len())?;
    let mut pose = [0.0; 7];
    pose.copy_from_slice(values);
    Ok(pose)
}

fn jacobian_from_rows(rows: &[Vec<f64>]) -> Result<JacobianMatrix, KinematicsError> {
    check_length("jacobian rows", 6, rows.len())?;
    for row in rows {
        check_length("jacobian columns", DOF, row.len())?;
    }
    Ok(JacobianMatrix::from_fn(|r, c| rows[r][c]))
}

/// Errors of a single case.
#[derive(Debug, Clone, Copy)]
pub struct CaseErrors {
    pub pose_error: f64,
    pub jacobian_error: f64,
}

impl CaseErrors {
    pub fn pose_ok(&self) -> bool {
        self.pose_error <= FK_ERROR_THRESH
    }

    pub fn jacobian_ok(&self) -> bool {
        self.jacobian_error <= JACOBIAN_ERROR_THRESH
    }
}

/// Compares the robot against a single recorded case.
pub fn evaluate_case(robot: &impl Kinematics, case: &TestCase) -> CaseErrors {
    let pose = pose7_from_isometry(&robot.forward(&case.joints));
    let jacobian = robot.jacobian(&case.joints);
    CaseErrors {
        pose_error: pose7_distance(&pose, &case.pose),
        jacobian_error: jacobian.distance(&case.jacobian),
    }
}

#[derive(Debug, Clone)]
pub struct FileScore {
    pub name: String,
    pub cases: usize,
    pub fk_score: f64,
    pub fk_score_max: f64,
    pub fk_errors: usize,
    pub jacobian_score: f64,
    pub jacobian_score_max: f64,
    pub jacobian_errors: usize,
}

/// Scores one file that is part of a set of `file_count` files.
pub fn score_file(robot: &impl Kinematics, cases: &TestCases, file_count: usize) -> FileScore {
    let file_count = file_count.max(1) as f64;
    let fk_score_max = FK_SCORE_MAX / file_count;
    let jacobian_score_max = JACOBIAN_SCORE_MAX / file_count;
    let penalty = (TASK_SCORE_MAX / file_count) / (PENALTY_FRACTION * cases.cases.len() as f64);

    let mut score = FileScore {
        name: cases.name.clone(),
        cases: cases.cases.len(),
        fk_score: fk_score_max,
        fk_score_max,
        fk_errors: 0,
        jacobian_score: jacobian_score_max,
        jacobian_score_max,
        jacobian_errors: 0,
    };

    for (i, case) in cases.cases.iter().enumerate() {
        let errors = evaluate_case(robot, case);
        debug!("{} case {}: pose error {:.6}, jacobian error {:.6}",
            cases.name, i, errors.pose_error, errors.jacobian_error);
        if !errors.pose_ok() {
            warn!("{} case {}: pose error {:.6} exceeds {}", cases.name, i, errors.pose_error, FK_ERROR_THRESH);
            score.fk_score -= penalty;
            score.fk_errors += 1;
        }
        if !errors.jacobian_ok() {
            warn!("{} case {}: jacobian error {:.6} exceeds {}", cases.name, i, errors.jacobian_error, JACOBIAN_ERROR_THRESH);
            score.jacobian_score -= penalty;
            score.jacobian_errors += 1;
        }
    }

    score.fk_score = score.fk_score.max(0.0);
    score.jacobian_score = score.jacobian_score.max(0.0);
    info!("{}: fk {:.3}/{:.3}, jacobian {:.3}/{:.3}", score.name,
        score.fk_score, score.fk_score_max, score.jacobian_score, score.jacobian_score_max);
    score
}

#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub files: Vec<FileScore>,
}

impl ScoreReport {
    pub fn total_fk(&self) -> f64 {
        self.files.iter().map(|f| f.fk_score).sum()
    }

    pub fn total_jacobian(&self) -> f64 {
        self.files.iter().map(|f| f.jacobian_score).sum()
    }

    pub fn total(&self) -> f64 {
        self.total_fk() + self.total_jacobian()
    }
}

/// Scores already loaded test case sets, in parallel, keeping their order.
pub fn score_sets(robot: &impl Kinematics, sets: &[TestCases]) -> ScoreReport {
    let files = sets.par_iter()
        .map(|set| score_file(robot, set, sets.len()))
        .collect();
    ScoreReport { files }
}

/// Loads and scores all test case files. Fails if any file cannot be loaded.
pub fn score_files(robot: &impl Kinematics, paths: &[PathBuf]) -> Result<ScoreReport, KinematicsError> {
    let sets = paths.iter()
        .map(TestCases::from_json_file)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(score_sets(robot, &sets))
}

impl fmt::Display for FileScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "- Test case file : {}", self.name)?;
        writeln!(f, "- Forward kinematics score : {:.3} / {:.3}, error count : {:4} / {:4}",
                 self.fk_score, self.fk_score_max, self.fk_errors, self.cases)?;
        write!(f, "- Jacobian matrix score    : {:.3} / {:.3}, error count : {:4} / {:4}",
               self.jacobian_score, self.jacobian_score_max, self.jacobian_errors, self.cases)
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "{}\n", file)?;
        }
        writeln!(f, "{}", "=".repeat(84))?;
        writeln!(f, "- Total score : {:.3} / {:.3}", self.total(), TASK_SCORE_MAX)?;
        write!(f, "{}", "=".repeat(84))
    }
}
