//! Joint limit enforcement

use crate::kinematic_traits::Joints;
use crate::parameter_error::{check_dimension, Result};
use crate::parameters::RobotModel;

/// Clamps every angle into `[min_deg, max_deg]` of its joint, independently per joint.
/// Angles already within limits pass through unchanged. The only failure is a vector
/// whose length differs from the DOF of the model.
pub fn clamp_to_limits(model: &RobotModel, qs: &[f64]) -> Result<Joints> {
    check_dimension("joint angles", model.dof(), qs.len())?;
    Ok(model.joints().iter().zip(qs).map(|(joint, &q)| joint.clamp(q)).collect())
}

/// Indices of joints whose angle lies outside the limits.
pub fn violated_joints(model: &RobotModel, qs: &[f64]) -> Result<Vec<usize>> {
    check_dimension("joint angles", model.dof(), qs.len())?;
    Ok(model.joints().iter().zip(qs)
        .enumerate()
        .filter(|(_, (joint, q))| !joint.contains(**q))
        .map(|(index, _)| index)
        .collect())
}
