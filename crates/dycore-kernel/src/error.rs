//! Errors signaled by the spectral kernel surface.

use std::error::Error;
use std::fmt;

/// A failure reported by, or while talking to, a [`SpectralKernel`](crate::SpectralKernel).
///
/// The adapter does not interpret or recover from these; they propagate
/// to the caller unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// The kernel resource is already leased by another live adapter.
    Busy {
        /// Name of the contended resource.
        resource: String,
    },
    /// A kernel procedure failed.
    CallFailed {
        /// The procedure that failed.
        operation: &'static str,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A buffer handed to (or requested from) the kernel has the wrong shape.
    ShapeMismatch {
        /// The procedure that rejected the buffer.
        operation: &'static str,
        /// Shape the kernel was configured for.
        expected: Vec<usize>,
        /// Shape it received.
        actual: Vec<usize>,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy { resource } => {
                write!(f, "kernel resource '{resource}' is already in use")
            }
            Self::CallFailed { operation, reason } => {
                write!(f, "kernel call '{operation}' failed: {reason}")
            }
            Self::ShapeMismatch {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "kernel call '{operation}' got shape {actual:?}, expected {expected:?}"
            ),
        }
    }
}

impl Error for KernelError {}
