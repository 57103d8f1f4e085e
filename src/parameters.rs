//! Defines the joint and robot model data structures

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::kinematic_traits::Joints;
use crate::parameter_error::{KinematicsError, Result, check_dimension};
use crate::utils::deg;

/// Kind of joint. Only revolute joints have kinematics implemented; other
/// recognized kinds load fine but any kinematic call on them fails fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointType {
    Revolute,
    Prismatic,
}

impl JointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JointType::Revolute => "revolute",
            JointType::Prismatic => "prismatic",
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JointType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revolute" => Ok(JointType::Revolute),
            "prismatic" => Ok(JointType::Prismatic),
            other => Err(format!("unknown joint type '{}' (expected revolute or prismatic)", other)),
        }
    }
}

/// One link/joint of the chain, described with Denavit-Hartenberg parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSpec {
    /// Joint name, unique within the chain. Only used for diagnostics.
    pub name: String,

    pub joint_type: JointType,

    /// Link length along the common normal (meters).
    pub a: f64,

    /// Link twist about the common normal (radians).
    pub alpha: f64,

    /// Link offset along the previous z axis (meters).
    pub d: f64,

    /// Constant added to the commanded angle (radians).
    pub theta_offset: f64,

    /// Angle of the default pose (degrees).
    pub initial_deg: f64,

    /// Inclusive lower travel limit (degrees).
    pub min_deg: f64,

    /// Inclusive upper travel limit (degrees).
    pub max_deg: f64,
}

impl JointSpec {
    /// Revolute joint with the given DH parameters, starting at 0° and limited to `[min_deg, max_deg]`.
    pub fn revolute(name: &str, a: f64, alpha: f64, d: f64, theta_offset: f64,
                    min_deg: f64, max_deg: f64) -> Self {
        JointSpec {
            name: name.to_string(),
            joint_type: JointType::Revolute,
            a,
            alpha,
            d,
            theta_offset,
            initial_deg: 0.0,
            min_deg,
            max_deg,
        }
    }

    /// Returns a copy of this joint with a different default angle.
    pub fn with_initial(self, initial_deg: f64) -> Self {
        JointSpec { initial_deg, ..self }
    }

    /// Checks whether the angle (degrees) lies within the joint limits, bounds included.
    pub fn contains(&self, angle_deg: f64) -> bool {
        angle_deg >= self.min_deg && angle_deg <= self.max_deg
    }

    /// Clamps the angle (degrees) into the joint limits.
    pub fn clamp(&self, angle_deg: f64) -> f64 {
        angle_deg.max(self.min_deg).min(self.max_deg)
    }

    fn validate(&self, index: usize) -> Result<()> {
        for (field, value) in [
            ("a_m", self.a), ("alpha_rad", self.alpha), ("d_m", self.d),
            ("theta_offset_rad", self.theta_offset), ("initial_deg", self.initial_deg),
            ("min_deg", self.min_deg), ("max_deg", self.max_deg),
        ] {
            if !value.is_finite() {
                return Err(KinematicsError::configuration(
                    index, &self.name, format!("{} must be finite (got {})", field, value)));
            }
        }
        if self.min_deg > self.max_deg {
            return Err(KinematicsError::configuration(
                index, &self.name,
                format!("min_deg {} exceeds max_deg {}", self.min_deg, self.max_deg)));
        }
        Ok(())
    }
}

/// Format neutral joint record as supplied by a configuration source. All fields are
/// optional here so that a missing one can be reported against the joint it belongs to.
#[derive(Debug, Clone, Default)]
pub struct JointRecord {
    pub name: Option<String>,
    pub joint_type: Option<String>,
    /// Only "z" is meaningful under the DH convention.
    pub rotation_axis_local: Option<String>,
    pub a: Option<f64>,
    pub alpha: Option<f64>,
    pub d: Option<f64>,
    pub theta_offset: Option<f64>,
    pub initial_deg: Option<f64>,
    pub min_deg: Option<f64>,
    pub max_deg: Option<f64>,
}

pub(crate) const UNNAMED: &str = "<unnamed>";

impl JointRecord {
    /// Converts the record into a typed joint, reporting the first missing or malformed field.
    pub fn to_spec(&self, index: usize) -> Result<JointSpec> {
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(KinematicsError::configuration(index, UNNAMED, "missing field: name")),
        };
        let required = |field: &str, value: Option<f64>| -> Result<f64> {
            value.ok_or_else(|| KinematicsError::configuration(
                index, &name, format!("missing field: {}", field)))
        };

        let type_name = self.joint_type.as_deref().ok_or_else(
            || KinematicsError::configuration(index, &name, "missing field: type"))?;
        let joint_type = type_name.parse::<JointType>()
            .map_err(|reason| KinematicsError::configuration(index, &name, reason))?;

        if let Some(axis) = self.rotation_axis_local.as_deref() {
            if !axis.trim().eq_ignore_ascii_case("z") {
                return Err(KinematicsError::configuration(
                    index, &name,
                    format!("rotation_axis_local must be 'z' under the DH convention (got '{}')", axis)));
            }
        }

        let joint = JointSpec {
            joint_type,
            a: required("a_m", self.a)?,
            alpha: required("alpha_rad", self.alpha)?,
            d: required("d_m", self.d)?,
            theta_offset: required("theta_offset_rad", self.theta_offset)?,
            initial_deg: self.initial_deg.unwrap_or(0.0),
            min_deg: required("min_deg", self.min_deg)?,
            max_deg: required("max_deg", self.max_deg)?,
            name,
        };
        joint.validate(index)?;
        Ok(joint)
    }
}

/// Validated, immutable chain of joints ordered from the base to the end-effector.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotModel {
    pub(crate) name: String,
    pub(crate) joints: Vec<JointSpec>,
}

impl RobotModel {
    /// Builds the model, checking every joint and the chain invariants
    /// (at least one joint, unique names, finite values, `min <= max`).
    pub fn new(name: &str, joints: Vec<JointSpec>) -> Result<Self> {
        if joints.is_empty() {
            return Err(KinematicsError::configuration(0, "<robot>", "robot has no joints"));
        }
        {
            let mut seen = HashSet::new();
            for (index, joint) in joints.iter().enumerate() {
                if joint.name.trim().is_empty() {
                    return Err(KinematicsError::configuration(index, UNNAMED, "missing field: name"));
                }
                joint.validate(index)?;
                if !seen.insert(joint.name.as_str()) {
                    return Err(KinematicsError::configuration(
                        index, &joint.name, "joint name is not unique within the chain"));
                }
            }
        }
        tracing::debug!(robot = name, dof = joints.len(), "robot model created");
        Ok(RobotModel { name: name.to_string(), joints })
    }

    /// Builds the model from format neutral joint records.
    pub fn from_records(name: &str, records: &[JointRecord]) -> Result<Self> {
        let joints = records.iter()
            .enumerate()
            .map(|(index, record)| record.to_spec(index))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, joints)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Degrees of freedom, the number of joints in the chain.
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    pub fn joints(&self) -> &[JointSpec] {
        &self.joints
    }

    /// Joint angles of the default pose (degrees).
    pub fn default_pose(&self) -> Joints {
        self.joints.iter().map(|j| j.initial_deg).collect()
    }

    /// Lower limits of all joints (degrees).
    pub fn min_limits(&self) -> Joints {
        self.joints.iter().map(|j| j.min_deg).collect()
    }

    /// Upper limits of all joints (degrees).
    pub fn max_limits(&self) -> Joints {
        self.joints.iter().map(|j| j.max_deg).collect()
    }

    /// Upper bound of the distance between the base origin and the end-effector.
    pub fn reach(&self) -> f64 {
        self.joints.iter().map(|j| j.a.abs() + j.d.abs()).sum()
    }

    /// Checks if all angles are within the joint limits.
    pub fn within_limits(&self, qs: &[f64]) -> Result<bool> {
        check_dimension("joint angles", self.dof(), qs.len())?;
        Ok(self.joints.iter().zip(qs).all(|(joint, &q)| joint.contains(q)))
    }

    /// Convert to string yaml representation (quick viewing, etc).
    pub fn to_yaml(&self) -> String {
        let mut yaml = format!("robot:\n  name: {}\n  joints:\n", self.name);
        for joint in &self.joints {
            yaml.push_str(&format!(
                "    - name: {}\n      \
                     type: {}\n      \
                     a_m: {}\n      \
                     alpha_rad: {}\n      \
                     d_m: {}\n      \
                     theta_offset_rad: {}\n      \
                     initial_deg: {}\n      \
                     min_deg: {}\n      \
                     max_deg: {}\n",
                joint.name,
                joint.joint_type,
                joint.a,
                deg(&joint.alpha),
                joint.d,
                deg(&joint.theta_offset),
                joint.initial_deg,
                joint.min_deg,
                joint.max_deg,
            ));
        }
        yaml
    }
}
