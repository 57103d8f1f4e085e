//! Supports reading the robot model and solver settings from YAML file (optional)

use std::path::Path;
use serde::Deserialize;
use serde_saphyr::Options;

use crate::parameter_error::{KinematicsError, Result};
use crate::parameters::{JointRecord, RobotModel, UNNAMED};
use crate::solver::IkConfig;

fn yaml_options() -> Options {
    Options { angle_conversions: true, ..Default::default() }
}

/// Numeric joint field as written. Anything that is not already a number is kept as text
/// and converted later, so that a malformed value is reported against its joint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Text(String),
}

impl RawScalar {
    fn number(self) -> std::result::Result<f64, String> {
        match self {
            RawScalar::Number(value) => Ok(value),
            // deg(..) and rad(..) arrive here unless the deserializer already converted them
            RawScalar::Text(text) => serde_saphyr::from_str_with_options::<f64>(&text, yaml_options())
                .map_err(|_| text),
        }
    }
}

#[derive(Deserialize)]
struct JointSection {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub joint_type: Option<String>,
    pub rotation_axis_local: Option<String>,
    pub a_m: Option<RawScalar>,
    pub alpha_rad: Option<RawScalar>,
    pub d_m: Option<RawScalar>,
    pub theta_offset_rad: Option<RawScalar>,
    pub initial_deg: Option<RawScalar>,
    pub min_deg: Option<RawScalar>,
    pub max_deg: Option<RawScalar>,
}

impl JointSection {
    fn into_record(self, index: usize) -> Result<JointRecord> {
        let joint = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNNAMED.to_string(),
        };
        let number = |field: &str, value: Option<RawScalar>| -> Result<Option<f64>> {
            value.map(|raw| raw.number().map_err(|text| KinematicsError::configuration(
                index, &joint, format!("{} is not a number (got '{}')", field, text))))
                .transpose()
        };

        Ok(JointRecord {
            a: number("a_m", self.a_m)?,
            alpha: number("alpha_rad", self.alpha_rad)?,
            d: number("d_m", self.d_m)?,
            theta_offset: number("theta_offset_rad", self.theta_offset_rad)?,
            initial_deg: number("initial_deg", self.initial_deg)?,
            min_deg: number("min_deg", self.min_deg)?,
            max_deg: number("max_deg", self.max_deg)?,
            name: self.name,
            joint_type: self.joint_type,
            rotation_axis_local: self.rotation_axis_local,
        })
    }
}

#[derive(Deserialize)]
struct RobotSection {
    #[serde(default)]
    pub name: Option<String>,
    pub joints: Vec<JointSection>,
}

#[derive(Deserialize, Default)]
struct IkSection {
    pub max_iters: Option<usize>,
    pub damping: Option<f64>,
    pub tolerance_m: Option<f64>,
    pub epsilon_deg: Option<f64>,
}

#[derive(Deserialize, Default)]
struct ControlSection {
    pub dt_s: Option<f64>,
}

#[derive(Deserialize, Default)]
struct SimulationSection {
    #[serde(default)]
    pub ik: IkSection,
    #[serde(default)]
    pub control: ControlSection,
}

#[derive(Deserialize)]
struct Root {
    pub robot: RobotSection,
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// Timing of the presentation side (animation of trajectories).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    /// Time between two trajectory points (seconds).
    pub dt_s: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        ControlConfig { dt_s: 0.01 }
    }
}

/// Everything a configuration file carries: the robot and the settings to drive it.
#[derive(Debug, Clone)]
pub struct RobotConfig {
    pub model: RobotModel,
    pub ik: IkConfig,
    pub control: ControlConfig,
}

const DEFAULT_ROBOT_NAME: &str = "robot";

impl RobotConfig {
    /// Read the robot configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// robot:
    ///   name: planar
    ///   joints:
    ///     - name: shoulder
    ///       type: revolute
    ///       a_m: 0.5
    ///       alpha_rad: 0.0
    ///       d_m: 0.0
    ///       theta_offset_rad: 0.0
    ///       min_deg: -170
    ///       max_deg: 170
    ///     - name: elbow
    ///       type: revolute
    ///       a_m: 0.3
    ///       alpha_rad: deg(0)
    ///       d_m: 0.0
    ///       theta_offset_rad: 0.0
    ///       initial_deg: 90
    ///       min_deg: -170
    ///       max_deg: 170
    /// simulation:
    ///   ik: { max_iters: 120, damping: 0.04, tolerance_m: 0.001 }
    ///   control: { dt_s: 0.01 }
    /// ```
    /// The `simulation` section and each of its keys are optional. Robot name defaults to the
    /// file stem. YAML extension to parse the deg(angle) function is supported (serde_saphyr).
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let fallback_name = path.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(DEFAULT_ROBOT_NAME);
        Self::parse(&contents, fallback_name)
    }

    /// Same as [`RobotConfig::from_yaml_file`], reading YAML from the string.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Self::parse(contents, DEFAULT_ROBOT_NAME)
    }

    fn parse(contents: &str, fallback_name: &str) -> Result<Self> {
        let root: Root = serde_saphyr::from_str_with_options(contents, yaml_options())
            .map_err(|e| KinematicsError::Parse(format!("{}", e)))?;

        let name = root.robot.name.as_deref().unwrap_or(fallback_name);
        let records = root.robot.joints.into_iter()
            .enumerate()
            .map(|(index, joint)| joint.into_record(index))
            .collect::<Result<Vec<_>>>()?;
        let model = RobotModel::from_records(name, &records)?;
        let ik = ik_config(&root.simulation.ik)?;
        let control = match root.simulation.control.dt_s {
            Some(dt_s) => ControlConfig { dt_s: positive("simulation.control.dt_s", dt_s)? },
            None => ControlConfig::default(),
        };

        tracing::debug!(robot = model.name(), dof = model.dof(), "robot configuration loaded");
        Ok(RobotConfig { model, ik, control })
    }
}

impl RobotModel {
    /// Reads only the robot model from the YAML configuration file, see
    /// [`RobotConfig::from_yaml_file`] for the format.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(RobotConfig::from_yaml_file(path)?.model)
    }
}

fn ik_config(section: &IkSection) -> Result<IkConfig> {
    let defaults = IkConfig::default();
    let max_iters = section.max_iters.unwrap_or(defaults.max_iters);
    if max_iters == 0 {
        return Err(KinematicsError::Parse(
            "simulation.ik.max_iters must be at least 1".to_string()));
    }
    let damping = section.damping.unwrap_or(defaults.damping);
    if !damping.is_finite() || damping < 0.0 {
        return Err(KinematicsError::Parse(format!(
            "simulation.ik.damping must be finite and not negative (got {})", damping)));
    }
    Ok(IkConfig {
        max_iters,
        damping,
        tolerance_m: positive("simulation.ik.tolerance_m",
                              section.tolerance_m.unwrap_or(defaults.tolerance_m))?,
        epsilon_deg: positive("simulation.ik.epsilon_deg",
                              section.epsilon_deg.unwrap_or(defaults.epsilon_deg))?,
    })
}

fn positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(KinematicsError::Parse(format!(
            "{} must be finite and positive (got {})", field, value)));
    }
    Ok(value)
}
