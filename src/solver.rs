//! Damped least squares (Levenberg-Marquardt) position-only inverse kinematics.
//!
//! The solver iterates `q += degrees(Jᵗ(J·Jᵗ + λ²I)⁻¹·(target - p))`, clamping to the joint
//! limits after every update so that the next Jacobian is evaluated at a reachable
//! configuration. The 3x3 system size does not depend on the DOF of the arm. Orientation of
//! the end-effector is not resolved.

use tracing::{debug, trace, warn};

use crate::constraints::clamp_to_limits;
use crate::jacobian::{Jacobian, DEFAULT_EPSILON_DEG};
use crate::kinematic_traits::{Joints, Position};
use crate::kinematics_impl::ee_position;
use crate::parameter_error::{check_dimension, Result};
use crate::parameters::RobotModel;

/// Configuration for the DLS solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkConfig {
    /// Hard cap on iterations, the only cancellation mechanism.
    pub max_iters: usize,
    /// Damping factor (lambda). Higher is more robust near singularities but converges slower.
    pub damping: f64,
    /// Position error tolerance (meters).
    pub tolerance_m: f64,
    /// Joint disturbance (degrees) for the numerical Jacobian.
    pub epsilon_deg: f64,
}

impl Default for IkConfig {
    fn default() -> Self {
        IkConfig {
            max_iters: 120,
            damping: 0.04,
            tolerance_m: 1e-3,
            epsilon_deg: DEFAULT_EPSILON_DEG,
        }
    }
}

/// Outcome of an IK solve. Not converging is a normal result: `joints` then holds the
/// last (clamped) iterate and callers decide whether to retry with other settings.
#[derive(Debug, Clone, PartialEq)]
pub struct IkSolution {
    /// Joint angles in degrees, always within limits.
    pub joints: Joints,
    /// Whether the position error at `joints` (after clamping) is below the tolerance.
    pub converged: bool,
    /// Number of Jacobian updates performed.
    pub iterations: usize,
    /// Distance between the target and the end-effector at `joints` (meters).
    pub position_error: f64,
}

impl IkSolution {
    /// The `(joints, converged)` pair.
    pub fn into_pair(self) -> (Joints, bool) {
        (self.joints, self.converged)
    }
}

/// Solves for joint angles placing the end-effector at `target` (meters, x y z).
///
/// `q_init` is the starting configuration in degrees; the default pose of the model is used
/// when it is `None`. Fails only on dimension mismatch or unsupported joint types; otherwise
/// a solution is always returned and convergence is reported in [`IkSolution::converged`].
pub fn solve_ik(model: &RobotModel, target: &[f64], q_init: Option<&[f64]>,
                config: &IkConfig) -> Result<IkSolution> {
    check_dimension("target position", 3, target.len())?;
    let target = Position::new(target[0], target[1], target[2]);

    let mut q: Joints = match q_init {
        Some(q_init) => {
            check_dimension("initial joint angles", model.dof(), q_init.len())?;
            q_init.to_vec()
        }
        None => model.default_pose(),
    };

    for iteration in 0..config.max_iters {
        let error = target - ee_position(model, &q)?;
        let residual = error.norm();
        trace!(iteration, residual, "ik iteration");

        if residual < config.tolerance_m {
            let joints = clamp_to_limits(model, &q)?;
            let position_error = (target - ee_position(model, &joints)?).norm();
            if position_error < config.tolerance_m {
                debug!(iterations = iteration, position_error, "ik converged");
                return Ok(IkSolution { joints, converged: true, iterations: iteration, position_error });
            }
            // Only a start vector outside the limits gets here; go on from its clamped value.
            q = joints;
            continue;
        }

        let jacobian = Jacobian::new(model, &q, config.epsilon_deg)?;
        let Some(dq_rad) = jacobian.dls_step(&error, config.damping) else {
            warn!(iteration, damping = config.damping, "damped system is not invertible, giving up");
            return Ok(IkSolution { joints: q, converged: false, iterations: iteration, position_error: residual });
        };

        let stepped: Joints = q.iter().zip(dq_rad.iter()).map(|(q, dq)| q + dq.to_degrees()).collect();
        q = clamp_to_limits(model, &stepped)?;
    }

    let position_error = (target - ee_position(model, &q)?).norm();
    debug!(iterations = config.max_iters, position_error, "ik did not converge");
    Ok(IkSolution { joints: q, converged: false, iterations: config.max_iters, position_error })
}

/// Solves independent targets in parallel, one [`solve_ik`] call per target. Results are
/// returned in the order of `targets`.
#[cfg(feature = "parallel")]
pub fn solve_ik_batch(model: &RobotModel, targets: &[[f64; 3]], q_init: Option<&[f64]>,
                      config: &IkConfig) -> Result<Vec<IkSolution>> {
    use rayon::prelude::*;

    targets.par_iter()
        .map(|target| solve_ik(model, target, q_init, config))
        .collect()
}
