extern crate nalgebra as na;

use na::{Matrix4, Vector3};
use crate::parameter_error::Result;

/// Joint angles in degrees, ordered from the base to the end-effector.
pub type Joints = Vec<f64>;

/// Pose is a 4x4 homogeneous transform of a frame relative to the robot base. The upper
/// left 3x3 block is the rotation and the first three rows of the last column the translation.
/// ```
/// extern crate nalgebra as na;
/// use na::Matrix4;
///
/// type Pose = Matrix4<f64>;
///
/// let pose = Pose::new_translation(&na::Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(pose[(0, 3)], 1.0);
/// ```
pub type Pose = Matrix4<f64>;

/// Cartesian position in meters.
pub type Position = Vector3<f64>;

/// Extracts the translation component of the pose.
pub fn translation(pose: &Pose) -> Position {
    Position::new(pose[(0, 3)], pose[(1, 3)], pose[(2, 3)])
}

/// Anything that can compute the end-effector pose from joint angles (degrees).
/// The numerical Jacobian and the IK solver only need this much from a robot.
pub trait Kinematics {
    /// Number of joint angles `forward` expects.
    fn dof(&self) -> usize;

    /// End-effector pose for the given joint angles in degrees.
    fn forward(&self, qs: &[f64]) -> Result<Pose>;

    /// End-effector position for the given joint angles in degrees.
    fn position(&self, qs: &[f64]) -> Result<Position> {
        Ok(translation(&self.forward(qs)?))
    }
}
