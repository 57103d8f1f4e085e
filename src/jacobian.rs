extern crate nalgebra as na;
use na::{DVector, Matrix3, Matrix3xX, Vector3};
use crate::kinematic_traits::{Kinematics, Position};
use crate::parameter_error::Result;
use crate::parameters::RobotModel;

/// Default joint disturbance (degrees) used for numerical differentiation.
pub const DEFAULT_EPSILON_DEG: f64 = 0.1;

/// Struct representing the positional Jacobian matrix
pub struct Jacobian {
    /// A 3xDOF matrix: each column is the sensitivity of the end-effector position
    /// to the joint with the same index, in meters per radian.
    matrix: Matrix3xX<f64>,

    /// The disturbance value (degrees) used for computing the Jacobian
    epsilon_deg: f64,
}

impl Jacobian {
    /// Constructs a new Jacobian struct by computing the Jacobian matrix for the given robot and joint configuration
    ///
    /// # Arguments
    ///
    /// * `robot` - A reference to the robot implementing the Kinematics trait
    /// * `qs` - Joint angles in degrees
    /// * `epsilon_deg` - Joint disturbance in degrees used for numerical differentiation
    ///
    /// # Returns
    ///
    /// A new instance of `Jacobian`, or dimension and joint type errors reported by the robot.
    pub fn new(robot: &impl Kinematics, qs: &[f64], epsilon_deg: f64) -> Result<Self> {
        let matrix = compute_jacobian(robot, qs, epsilon_deg)?;
        Ok(Self { matrix, epsilon_deg })
    }

    pub fn matrix(&self) -> &Matrix3xX<f64> {
        &self.matrix
    }

    pub fn epsilon_deg(&self) -> f64 {
        self.epsilon_deg
    }

    /// Sensitivity of the end-effector position to the given joint (meters per radian).
    pub fn column(&self, joint: usize) -> Vector3<f64> {
        self.matrix.column(joint).into_owned()
    }

    /// Manipulability measure: product of the singular values of the matrix, equal to
    /// sqrt(det(J·Jᵗ)) for chains with three or more joints. Drops to zero at singular
    /// configurations, for instance when a planar arm is fully stretched.
    pub fn manipulability(&self) -> f64 {
        self.matrix.clone().svd(false, false).singular_values.iter().product()
    }

    /// Damped least squares step Jᵗ(J·Jᵗ + λ²I)⁻¹·error, in radians per joint.
    ///
    /// The damped matrix is always invertible for a positive `damping`. With zero damping
    /// at a singular configuration `None` is returned.
    pub fn dls_step(&self, error: &Position, damping: f64) -> Option<DVector<f64>> {
        let jjt: Matrix3<f64> = &self.matrix * self.matrix.transpose();
        let damped = jjt + Matrix3::identity() * (damping * damping);
        let inverse = damped.try_inverse()?;
        Some(self.matrix.transpose() * (inverse * error))
    }
}

/// Function to compute the positional Jacobian for a given robot and joint configuration
///
/// Forward difference: only a positive disturbance is applied, costing DOF + 1 forward
/// kinematics evaluations. The denominator is the disturbance in radians, so the result is
/// in meters per radian even though joint angles are given in degrees.
pub fn compute_jacobian(robot: &impl Kinematics, qs: &[f64], epsilon_deg: f64) -> Result<Matrix3xX<f64>> {
    let current_position = robot.position(qs)?;
    let epsilon_rad = epsilon_deg.to_radians();
    let mut jacobian = Matrix3xX::zeros(qs.len());

    let mut perturbed_qs = qs.to_vec();
    for i in 0..qs.len() {
        perturbed_qs[i] = qs[i] + epsilon_deg;
        let perturbed_position = robot.position(&perturbed_qs)?;
        perturbed_qs[i] = qs[i];

        jacobian.set_column(i, &((perturbed_position - current_position) / epsilon_rad));
    }

    Ok(jacobian)
}

/// 3xDOF Jacobian of the end-effector position of the model.
pub fn jacobian(model: &RobotModel, qs: &[f64], epsilon_deg: f64) -> Result<Matrix3xX<f64>> {
    compute_jacobian(model, qs, epsilon_deg)
}
