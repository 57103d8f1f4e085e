//! `dh-kinematics` command line tool: forward kinematics, inverse kinematics and range of
//! motion sweeps for a robot described in YAML.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use rs_dh_kinematics::kinematics_impl::{ee_position, fk, fk_chain};
use rs_dh_kinematics::parameters_from_file::RobotConfig;
use rs_dh_kinematics::solver::solve_ik;
use rs_dh_kinematics::trajectory::{range_trajectory, DEFAULT_SWEEP_STEPS};
use rs_dh_kinematics::utils::{dump_pose, format_joints};

#[derive(Parser)]
#[command(version, about = "Kinematics of Denavit-Hartenberg serial arms")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// End-effector pose and joint positions for the given angles
    Fk {
        #[arg(long)]
        config: PathBuf,
        /// Comma separated joint angles in degrees, default pose if omitted
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        joints: Option<Vec<f64>>,
    },
    /// Joint angles placing the end-effector at the target
    Ik {
        #[arg(long)]
        config: PathBuf,
        /// Target position x,y,z in meters
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        target: Vec<f64>,
        /// Starting joint angles in degrees, default pose if omitted
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        from: Option<Vec<f64>>,
        #[arg(long)]
        max_iters: Option<usize>,
        #[arg(long)]
        damping: Option<f64>,
        #[arg(long)]
        tolerance: Option<f64>,
        /// Exit with status 2 when the solver does not converge
        #[arg(long)]
        require_convergence: bool,
    },
    /// Sweep all joints from their lower to their upper limits
    Sweep {
        #[arg(long)]
        config: PathBuf,
        #[arg(long, default_value_t = DEFAULT_SWEEP_STEPS)]
        steps: usize,
    },
}

fn load(path: &Path) -> Result<RobotConfig> {
    RobotConfig::from_yaml_file(path)
        .with_context(|| format!("Failed to load robot from {}", path.display()))
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Fk { config, joints } => {
            let config = load(&config)?;
            let model = &config.model;
            let qs = joints.unwrap_or_else(|| model.default_pose());

            let pose = fk(model, &qs).context("Forward kinematics failed")?;
            println!("Joints: {}", format_joints(&qs));
            println!("Pose:");
            dump_pose(&pose);
            println!("Chain:");
            for (i, point) in fk_chain(model, &qs)?.iter().enumerate() {
                println!("  {:2}: {:9.5} {:9.5} {:9.5}", i, point.x, point.y, point.z);
            }
            let ee = ee_position(model, &qs)?;
            println!("End-effector: {:.5} {:.5} {:.5}", ee.x, ee.y, ee.z);
        }
        Command::Ik { config, target, from, max_iters, damping, tolerance, require_convergence } => {
            let config = load(&config)?;
            let mut ik = config.ik;
            if let Some(max_iters) = max_iters {
                ik.max_iters = max_iters;
            }
            if let Some(damping) = damping {
                ik.damping = damping;
            }
            if let Some(tolerance) = tolerance {
                if tolerance <= 0.0 {
                    bail!("Tolerance must be positive (got {})", tolerance);
                }
                ik.tolerance_m = tolerance;
            }

            let solution = solve_ik(&config.model, &target, from.as_deref(), &ik)
                .context("Inverse kinematics failed")?;
            info!(converged = solution.converged, iterations = solution.iterations, "solved");
            println!("Joints: {}", format_joints(&solution.joints));
            println!("Converged: {}", solution.converged);
            println!("Iterations: {}", solution.iterations);
            println!("Position error: {:.6} m", solution.position_error);
            if require_convergence && !solution.converged {
                return Ok(ExitCode::from(2));
            }
        }
        Command::Sweep { config, steps } => {
            let config = load(&config)?;
            for (k, qs) in range_trajectory(&config.model, steps).enumerate() {
                println!("{:8.3} {}", k as f64 * config.control.dt_s, format_joints(&qs));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .compact()
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
