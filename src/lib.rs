//! Rust implementation of forward and inverse kinematics for serial manipulators described
//! with Denavit-Hartenberg parameters.
//!
//! The robot is a chain of revolute joints, each with its DH link parameters (_a, α, d_) and
//! a constant offset added to the joint angle. Joint angles are given and returned in degrees,
//! lengths in meters. Each link contributes the transform `Rz(θ)·Tz(d)·Tx(a)·Rx(α)` and the
//! end-effector pose is their product from the base.
//!
//! # Features
//!
//! - Forward kinematics: end-effector pose, frames of all links and the joint position chain.
//! - Numerical position Jacobian (forward differences).
//! - Damped least squares inverse kinematics for position targets. Joint limits are enforced
//!   at every iteration, so returned angles always respect them even if the target is not
//!   reached.
//! - Joint space trajectories: range of motion sweeps and linear moves, with clamping.
//! - Robot model and solver settings from YAML, including `deg(angle)` notation
//!   (feature `allow_filesystem`).
//! - Batch inverse kinematics on all cores (feature `parallel`).
//!
//! ```
//! use rs_dh_kinematics::parameters::RobotModel;
//! use rs_dh_kinematics::kinematics_impl::ee_position;
//! use rs_dh_kinematics::solver::{solve_ik, IkConfig};
//!
//! let robot = RobotModel::planar_two_link();
//! let solution = solve_ik(&robot, &[0.4, 0.3, 0.0], None, &IkConfig::default()).unwrap();
//! assert!(solution.converged);
//! let reached = ee_position(&robot, &solution.joints).unwrap();
//! assert!((reached.x - 0.4).abs() < 1e-3 && (reached.y - 0.3).abs() < 1e-3);
//! ```

pub mod parameter_error;
pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod jacobian;
pub mod constraints;
pub mod solver;
pub mod trajectory;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
