//! Joint space trajectories: range of motion sweeps and linear moves between configurations.

use crate::constraints::clamp_to_limits;
use crate::kinematic_traits::Joints;
use crate::parameter_error::{check_dimension, Result};
use crate::parameters::RobotModel;

/// Default number of points in a range of motion sweep.
pub const DEFAULT_SWEEP_STEPS: usize = 100;

/// Minimal number of points of a [`move_trajectory`], however small the move.
pub const MIN_MOVE_STEPS: usize = 25;

/// Upper bound on the points of a [`move_trajectory`], reached only when the start lies far
/// outside the joint limits (or is not finite).
pub const MAX_MOVE_STEPS: usize = 10_000;

/// Lazy, finite sequence of joint vectors linearly interpolated per joint between two
/// configurations, endpoints included. Every vector is clamped to the joint limits.
/// A clone continues from the same position; [`JointTrajectory::restart`] starts over.
#[derive(Debug, Clone)]
pub struct JointTrajectory<'a> {
    model: &'a RobotModel,
    from: Joints,
    to: Joints,
    steps: usize,
    next: usize,
}

impl<'a> JointTrajectory<'a> {
    /// Number of points in the whole sequence.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The same sequence, from its first point.
    pub fn restart(&self) -> Self {
        JointTrajectory { next: 0, ..self.clone() }
    }

    fn point(&self, k: usize) -> Joints {
        let joints: Joints = if k > 0 && k + 1 == self.steps {
            self.to.clone()
        } else {
            let fraction = k as f64 / (self.steps.saturating_sub(1).max(1)) as f64;
            self.from.iter().zip(&self.to)
                .map(|(from, to)| from + (to - from) * fraction)
                .collect()
        };
        // Both vectors have DOF length, so clamping cannot fail here.
        clamp_to_limits(self.model, &joints).unwrap_or(joints)
    }
}

impl Iterator for JointTrajectory<'_> {
    type Item = Joints;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.steps {
            return None;
        }
        let point = self.point(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for JointTrajectory<'_> {}

/// `steps` joint vectors from `from` to `to` inclusive (only `from` when `steps == 1`,
/// nothing when `steps == 0`).
pub fn interpolate<'a>(model: &'a RobotModel, from: &[f64], to: &[f64], steps: usize)
                       -> Result<JointTrajectory<'a>> {
    check_dimension("start joint angles", model.dof(), from.len())?;
    check_dimension("end joint angles", model.dof(), to.len())?;
    Ok(JointTrajectory {
        model,
        from: from.to_vec(),
        to: to.to_vec(),
        steps,
        next: 0,
    })
}

/// Range of motion sweep from the lower limits of all joints to their upper limits.
pub fn range_trajectory(model: &RobotModel, steps: usize) -> JointTrajectory<'_> {
    JointTrajectory {
        model,
        from: model.min_limits(),
        to: model.max_limits(),
        steps,
        next: 0,
    }
}

/// Move from `from` to `to` in joint space. The goal is clamped first; the number of points
/// grows with the largest joint travel, one point per two degrees, within
/// [`MIN_MOVE_STEPS`]..=[`MAX_MOVE_STEPS`].
pub fn move_trajectory<'a>(model: &'a RobotModel, from: &[f64], to: &[f64]) -> Result<JointTrajectory<'a>> {
    check_dimension("start joint angles", model.dof(), from.len())?;
    let goal = clamp_to_limits(model, to)?;
    let travel = from.iter().zip(&goal)
        .map(|(a, b)| (b - a).abs())
        .fold(0.0, f64::max);
    // float to usize casts saturate, NaN becomes 0
    let steps = ((travel / 2.0).floor() as usize)
        .saturating_add(1)
        .clamp(MIN_MOVE_STEPS, MAX_MOVE_STEPS);
    interpolate(model, from, &goal, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_error::KinematicsError;
    use crate::parameters::JointSpec;

    fn model() -> RobotModel {
        RobotModel::new("three", vec![
            JointSpec::revolute("j1", 0.2, 0.0, 0.0, 0.0, -90.0, 90.0),
            JointSpec::revolute("j2", 0.2, 0.0, 0.0, 0.0, 0.0, 150.0),
            JointSpec::revolute("j3", 0.2, 0.0, 0.0, 0.0, -45.0, -45.0),
        ]).unwrap()
    }

    #[test]
    fn test_single_step_is_min_vector() {
        let model = model();
        let points: Vec<Joints> = range_trajectory(&model, 1).collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0], clamp_to_limits(&model, &model.min_limits()).unwrap());
    }

    #[test]
    fn test_endpoints_inclusive() {
        let model = model();
        let points: Vec<Joints> = range_trajectory(&model, 7).collect();
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], vec![-90.0, 0.0, -45.0]);
        assert_eq!(points[6], vec![90.0, 150.0, -45.0]);
        assert_eq!(points[3], vec![0.0, 75.0, -45.0]);
    }

    #[test]
    fn test_default_sweep_is_within_limits() {
        let model = model();
        let sweep = range_trajectory(&model, DEFAULT_SWEEP_STEPS);
        assert_eq!(sweep.len(), DEFAULT_SWEEP_STEPS);
        for point in sweep {
            assert!(model.within_limits(&point).unwrap());
        }
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let model = model();
        assert_eq!(range_trajectory(&model, 0).count(), 0);
    }

    #[test]
    fn test_restartable() {
        let model = model();
        let mut sweep = range_trajectory(&model, 5);
        let first = sweep.next().unwrap();
        sweep.next();
        assert_eq!(sweep.len(), 3);

        let restarted = sweep.restart();
        assert_eq!(restarted.len(), 5);
        assert_eq!(restarted.clone().next().unwrap(), first);
        assert_eq!(restarted.count(), 5);
    }

    #[test]
    fn test_interpolation_clamps_points() {
        let model = model();
        let points: Vec<Joints> = interpolate(&model, &[0.0, 0.0, -45.0], &[180.0, 0.0, -45.0], 3)
            .unwrap()
            .collect();
        assert_eq!(points[1], vec![90.0, 0.0, -45.0]);
        assert_eq!(points[2], vec![90.0, 0.0, -45.0]);
    }

    #[test]
    fn test_move_step_count() {
        let model = model();
        let short = move_trajectory(&model, &[0.0, 0.0, -45.0], &[10.0, 0.0, -45.0]).unwrap();
        assert_eq!(short.steps(), MIN_MOVE_STEPS);

        let long = move_trajectory(&model, &[-90.0, 0.0, -45.0], &[90.0, 10.0, -45.0]).unwrap();
        assert_eq!(long.steps(), 91);
        let points: Vec<Joints> = long.collect();
        assert_eq!(points[0], vec![-90.0, 0.0, -45.0]);
        assert_eq!(points[90], vec![90.0, 10.0, -45.0]);
    }

    #[test]
    fn test_move_goal_is_clamped() {
        let model = model();
        let last = move_trajectory(&model, &[0.0, 0.0, -45.0], &[500.0, -20.0, 0.0])
            .unwrap()
            .last()
            .unwrap();
        assert_eq!(last, vec![90.0, 0.0, -45.0]);
    }

    #[test]
    fn test_move_from_far_outside_limits() {
        let model = RobotModel::planar_two_link();
        for start in [1e300, f64::INFINITY, f64::NEG_INFINITY] {
            let moving = move_trajectory(&model, &[start, 0.0], &[0.0, 0.0]).unwrap();
            assert_eq!(moving.steps(), MAX_MOVE_STEPS);
            let last = moving.clone().last().unwrap();
            assert_eq!(last, vec![0.0, 0.0]);
            for point in moving.step_by(997) {
                assert!(model.within_limits(&point).unwrap(), "{start}: {point:?}");
            }
        }
    }

    #[test]
    fn test_move_from_nan_has_min_steps() {
        let model = RobotModel::planar_two_link();
        let moving = move_trajectory(&model, &[f64::NAN, 0.0], &[10.0, 0.0]).unwrap();
        assert_eq!(moving.steps(), MIN_MOVE_STEPS);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = model();
        assert!(matches!(interpolate(&model, &[0.0], &[0.0, 0.0, 0.0], 3),
            Err(KinematicsError::DimensionMismatch { .. })));
        assert!(matches!(move_trajectory(&model, &[0.0, 0.0, 0.0], &[0.0]),
            Err(KinematicsError::DimensionMismatch { .. })));
    }
}
