//! Errors from a dynamical-core step.

use std::error::Error;
use std::fmt;

use dycore_core::ValidationError;
use dycore_kernel::KernelError;
use dycore_physics::PhysicsError;

use crate::assemble::AssemblyError;

/// An `advance` call failed. The step is abandoned.
///
/// The kernel may already hold fields pushed before the failure; the next
/// successful step resynchronizes if the caller's state differs.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The input state is malformed.
    Validation(ValidationError),
    /// Tendencies could not be assembled.
    Assembly(AssemblyError),
    /// Contained physics failed.
    Physics(PhysicsError),
    /// The kernel failed.
    Kernel(KernelError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "invalid input state: {e}"),
            Self::Assembly(e) => write!(f, "tendency assembly failed: {e}"),
            Self::Physics(e) => write!(f, "physics failed: {e}"),
            Self::Kernel(e) => write!(f, "kernel failed: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Assembly(e) => Some(e),
            Self::Physics(e) => Some(e),
            Self::Kernel(e) => Some(e),
        }
    }
}

impl From<ValidationError> for StepError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<AssemblyError> for StepError {
    fn from(e: AssemblyError) -> Self {
        Self::Assembly(e)
    }
}

impl From<PhysicsError> for StepError {
    fn from(e: PhysicsError) -> Self {
        Self::Physics(e)
    }
}

impl From<KernelError> for StepError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}
