//! Hardcoded models of a few arms

use std::f64::consts::FRAC_PI_2;
use crate::parameters::{JointSpec, RobotModel};

impl RobotModel {
    // Not validated, tests check every preset against RobotModel::new.
    fn preset(name: &str, joints: Vec<JointSpec>) -> Self {
        RobotModel { name: name.to_string(), joints }
    }

    /// Single revolute joint with a link of 1 m, turning in the XY plane.
    pub fn single_link() -> Self {
        Self::preset("single_link", vec![
            JointSpec::revolute("j1", 1.0, 0.0, 0.0, 0.0, -180.0, 180.0),
        ])
    }

    /// Planar arm with links of 0.5 m and 0.3 m. The default pose has the elbow bent
    /// at 90°, away from the stretched singularity.
    pub fn planar_two_link() -> Self {
        Self::preset("planar_two_link", vec![
            JointSpec::revolute("shoulder", 0.5, 0.0, 0.0, 0.0, -170.0, 170.0),
            JointSpec::revolute("elbow", 0.3, 0.0, 0.0, 0.0, -170.0, 170.0).with_initial(90.0),
        ])
    }

    /// Five axis articulated desk arm: base yaw, shoulder, elbow, wrist pitch and wrist roll.
    pub fn desk_arm() -> Self {
        Self::preset("desk_arm", vec![
            JointSpec::revolute("base_yaw", 0.0, FRAC_PI_2, 0.12, 0.0, -170.0, 170.0),
            JointSpec::revolute("shoulder", 0.25, 0.0, 0.0, FRAC_PI_2, -90.0, 90.0).with_initial(-30.0),
            JointSpec::revolute("elbow", 0.20, 0.0, 0.0, 0.0, -135.0, 135.0).with_initial(-60.0),
            JointSpec::revolute("wrist_pitch", 0.0, FRAC_PI_2, 0.0, FRAC_PI_2, -100.0, 100.0),
            JointSpec::revolute("wrist_roll", 0.0, 0.0, 0.08, 0.0, -180.0, 180.0),
        ])
    }
}
