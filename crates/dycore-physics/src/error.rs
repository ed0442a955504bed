//! Errors from prognostic physics components.

use std::error::Error;
use std::fmt;

use dycore_core::ValidationError;

/// A prognostic component or pipeline failed.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsError {
    /// A time-scheduled component received a state without a time.
    MissingTime {
        /// Name of the component that needed the time.
        name: String,
    },
    /// A component's computation failed.
    Failed {
        /// Name of the failing component.
        name: String,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// Outputs of several components could not be merged.
    Merge(ValidationError),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTime { name } => {
                write!(f, "'{name}' requires the state to carry a time")
            }
            Self::Failed { name, reason } => write!(f, "prognostic '{name}' failed: {reason}"),
            Self::Merge(e) => write!(f, "cannot merge prognostic outputs: {e}"),
        }
    }
}

impl Error for PhysicsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Merge(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for PhysicsError {
    fn from(e: ValidationError) -> Self {
        Self::Merge(e)
    }
}
