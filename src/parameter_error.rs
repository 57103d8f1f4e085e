//! Error handling for model loading and kinematic computations

use std::io;
use thiserror::Error;

/// Unified error for model validation, YAML loading and kinematic calls.
///
/// Inverse kinematics that does not converge is not an error, see
/// [`IkSolution::converged`](crate::solver::IkSolution::converged).
#[derive(Debug, Error)]
pub enum KinematicsError {
    /// A joint record is missing a field, carries a malformed value or violates
    /// a model invariant. Fatal at load time.
    #[error("Configuration Error in joint #{index} '{joint}': {reason}")]
    Configuration {
        index: usize,
        joint: String,
        reason: String,
    },

    /// A joint vector or target has the wrong number of components.
    #[error("Dimension Mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Kinematics was requested for a joint type that is not implemented.
    #[error("Unsupported joint type '{joint_type}' of joint #{index} '{joint}'")]
    UnsupportedJointType {
        index: usize,
        joint: String,
        joint_type: String,
    },

    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse Error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, KinematicsError>;

impl KinematicsError {
    pub(crate) fn configuration(index: usize, joint: &str, reason: impl Into<String>) -> Self {
        KinematicsError::Configuration {
            index,
            joint: joint.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn dimension(what: &'static str, expected: usize, found: usize) -> Self {
        KinematicsError::DimensionMismatch { what, expected, found }
    }
}

/// Fails with [`KinematicsError::DimensionMismatch`] unless `found == expected`.
pub(crate) fn check_dimension(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(KinematicsError::dimension(what, expected, found));
    }
    Ok(())
}
