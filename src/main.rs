use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, DOF};
use rs_dh_kinematics::kinematics_impl::{joints_from_slice, DhKinematics};
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::pose::pose7_from_isometry;
use rs_dh_kinematics::scoring::score_files;
use rs_dh_kinematics::utils::{as_radians, dump_jacobian, dump_joints, dump_pose, is_valid};

/// Forward kinematics and Jacobian of 7 axis arms, and scoring against recorded test cases.
#[derive(Parser)]
#[command(name = "rs-dh-kinematics", version, about)]
struct Cli {
    /// More detailed logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score the model against JSON test case files
    Score {
        #[command(flatten)]
        robot: RobotArgs,

        /// Test case files with joint_poses, poses and jacobian arrays
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the end effector pose and the Jacobian for the given joint angles
    Fk {
        #[command(flatten)]
        robot: RobotArgs,

        /// Joint angles are given in degrees rather than radians
        #[arg(long)]
        degrees: bool,

        /// Seven joint angles
        #[arg(num_args = 7, required = true, allow_negative_numbers = true)]
        joints: Vec<f64>,
    },
}

#[derive(clap::Args)]
struct RobotArgs {
    /// Robot model YAML (Franka Emika Panda if not given)
    #[arg(long)]
    robot: Option<PathBuf>,

    /// Base position, overrides the one from the robot YAML
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    base: Option<Vec<f64>>,
}

impl RobotArgs {
    fn load(&self) -> Result<DhKinematics> {
        let robot = match &self.robot {
            Some(path) => DhKinematics::from_yaml_file(path)
                .with_context(|| format!("Failed to load robot model from {}", path.display()))?,
            None => DhKinematics::new(Parameters::franka_panda()),
        };
        debug!("Robot model:\n{}", robot.parameters().to_yaml());

        match &self.base {
            Some(base) => {
                let position: [f64; 3] = base.as_slice().try_into()
                    .context("Base position needs 3 values")?;
                Ok(DhKinematics::at_position(*robot.parameters(), &position))
            }
            None => Ok(robot),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .init();

    match cli.command {
        Command::Score { robot, files } => {
            let robot = robot.load()?;
            info!("Scoring {} test case file(s)", files.len());
            let report = score_files(&robot, &files).context("Failed to score test cases")?;
            println!("{}", report);
        }
        Command::Fk { robot, degrees, joints } => {
            let robot = robot.load()?;
            let mut joints: Joints = joints_from_slice(&joints)?;
            if degrees {
                joints = as_radians(joints);
            }
            if !is_valid(&joints) {
                bail!("All {} joint angles must be finite", DOF);
            }
            print!("Joints (degrees): ");
            dump_joints(&joints);
            dump_pose(&pose7_from_isometry(&robot.forward(&joints)));
            println!("Jacobian:");
            dump_jacobian(&robot.jacobian(&joints));
        }
    }
    Ok(())
}
