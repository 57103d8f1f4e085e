//! Forward kinematics of a Denavit-Hartenberg chain

use crate::kinematic_traits::{translation, Kinematics, Pose, Position};
use crate::parameter_error::{check_dimension, KinematicsError, Result};
use crate::parameters::{JointType, RobotModel};

/// Standard DH transform Rz(theta)·Tz(d)·Tx(a)·Rx(alpha) in closed form.
pub fn dh_transform(a: f64, alpha: f64, d: f64, theta: f64) -> Pose {
    let (sth, cth) = theta.sin_cos();
    let (sal, cal) = alpha.sin_cos();
    Pose::new(
        cth, -sth * cal, sth * sal, a * cth,
        sth, cth * cal, -cth * sal, a * sth,
        0.0, sal, cal, d,
        0.0, 0.0, 0.0, 1.0,
    )
}

impl RobotModel {
    /// Per-joint DH transforms for the given angles, checking the vector length
    /// and joint types before anything is computed.
    fn link_transforms<'a>(&'a self, qs: &'a [f64]) -> Result<impl Iterator<Item = Pose> + 'a> {
        check_dimension("joint angles", self.dof(), qs.len())?;
        if let Some((index, joint)) = self.joints().iter().enumerate()
            .find(|(_, joint)| joint.joint_type != JointType::Revolute) {
            return Err(KinematicsError::UnsupportedJointType {
                index,
                joint: joint.name.clone(),
                joint_type: joint.joint_type.to_string(),
            });
        }
        Ok(self.joints().iter().zip(qs).map(|(joint, &q)| {
            let theta = q.to_radians() + joint.theta_offset;
            dh_transform(joint.a, joint.alpha, joint.d, theta)
        }))
    }
}

impl Kinematics for RobotModel {
    fn dof(&self) -> usize {
        RobotModel::dof(self)
    }

    fn forward(&self, qs: &[f64]) -> Result<Pose> {
        fk(self, qs)
    }
}

/// End-effector pose for the joint angles `qs` (degrees).
pub fn fk(model: &RobotModel, qs: &[f64]) -> Result<Pose> {
    Ok(model.link_transforms(qs)?.fold(Pose::identity(), |t, link| t * link))
}

/// Cumulative frames: the base frame (identity) followed by the frame after every joint.
pub fn fk_frames(model: &RobotModel, qs: &[f64]) -> Result<Vec<Pose>> {
    let mut frames = Vec::with_capacity(model.dof() + 1);
    let mut t = Pose::identity();
    frames.push(t);
    for link in model.link_transforms(qs)? {
        t *= link;
        frames.push(t);
    }
    Ok(frames)
}

/// Points of the chain from the base origin through every joint to the end-effector,
/// DOF + 1 points in total.
pub fn fk_chain(model: &RobotModel, qs: &[f64]) -> Result<Vec<Position>> {
    Ok(fk_frames(model, qs)?.iter().map(translation).collect())
}

/// End-effector position, the translation component of [`fk`].
pub fn ee_position(model: &RobotModel, qs: &[f64]) -> Result<Position> {
    Ok(translation(&fk(model, qs)?))
}
