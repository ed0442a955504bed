//! Error types shared across the dycore workspace.
//!
//! [`ValidationError`] covers malformed arrays and states, raised by the
//! validation utilities and by the adapter's own input checks.
//! [`ConstantError`] covers physical-constant resolution.

use std::error::Error;
use std::fmt;

/// A labeled array or state failed a structural check.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// Two mappings expected to be disjoint share one or more keys.
    SharedKeys {
        /// The keys present in both mappings, in first-mapping order.
        keys: Vec<String>,
    },
    /// An array does not have exactly the required number of axes.
    DimensionCount {
        /// Name of the offending quantity.
        name: String,
        /// Required axis count.
        expected: usize,
        /// Actual axis count.
        actual: usize,
    },
    /// An array needs a vertical third axis but has fewer than three axes.
    TooFewDimensions {
        /// Name of the offending quantity.
        name: String,
        /// Actual axis count.
        actual: usize,
    },
    /// The third axis is not a recognized vertical coordinate.
    NotVertical {
        /// Name of the offending quantity.
        name: String,
        /// The axis name found in third position.
        dim: String,
    },
    /// A horizontal-only array has more than two axes.
    NotHorizontal {
        /// Name of the offending quantity.
        name: String,
        /// Actual axis count.
        ndim: usize,
    },
    /// A horizontal-only array carries a non-horizontal axis.
    NonHorizontalDim {
        /// Name of the offending quantity.
        name: String,
        /// The non-horizontal axis name.
        dim: String,
    },
    /// Arrays expected to share axes have different axis names.
    DimsMismatch {
        /// Name of the offending quantity.
        name: String,
        /// Axis names of the reference array.
        expected: Vec<String>,
        /// Axis names of the offending array.
        actual: Vec<String>,
    },
    /// Arrays sharing an axis name disagree on its coordinate values.
    CoordinateMismatch {
        /// Name of the offending quantity.
        name: String,
        /// The axis whose coordinates differ.
        dim: String,
    },
    /// An array does not have the required shape.
    ShapeMismatch {
        /// Name of the offending quantity.
        name: String,
        /// Required shape.
        expected: Vec<usize>,
        /// Actual shape.
        actual: Vec<usize>,
    },
    /// Only 1-D (and pass-through 3-D) arrays can be broadcast to 3-D.
    BroadcastRank {
        /// Rank of the rejected array.
        ndim: usize,
    },
    /// Broadcast target axis must be 1, 2 or 3.
    BroadcastAxis {
        /// The rejected axis position.
        axis: usize,
    },
    /// A required quantity is absent from the state.
    MissingQuantity {
        /// Name of the missing quantity.
        name: String,
    },
    /// A labeled array could not be constructed or updated.
    InvalidArray {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedKeys { keys } => write!(f, "unexpected shared keys: {keys:?}"),
            Self::DimensionCount {
                name,
                expected,
                actual,
            } => write!(f, "{name} must have {expected} dimensions, has {actual}"),
            Self::TooFewDimensions { name, actual } => {
                write!(f, "{name} has fewer than 3 dimensions ({actual})")
            }
            Self::NotVertical { name, dim } => write!(
                f,
                "{name} does not have a vertical coordinate as its third dimension (found '{dim}')"
            ),
            Self::NotHorizontal { name, ndim } => write!(
                f,
                "{name} is not horizontal, it has {ndim} dimensions (at most 2 allowed)"
            ),
            Self::NonHorizontalDim { name, dim } => {
                write!(f, "{name} has non-horizontal dimension '{dim}'")
            }
            Self::DimsMismatch {
                name,
                expected,
                actual,
            } => write!(f, "{name} has dimensions {actual:?}, expected {expected:?}"),
            Self::CoordinateMismatch { name, dim } => {
                write!(f, "{name} has mismatched coordinates along '{dim}'")
            }
            Self::ShapeMismatch {
                name,
                expected,
                actual,
            } => write!(f, "{name} has shape {actual:?}, expected {expected:?}"),
            Self::BroadcastRank { ndim } => {
                write!(f, "value should be a 1D or 3D array, instead got {ndim}D")
            }
            Self::BroadcastAxis { axis } => {
                write!(f, "broadcast axis should be an integer from 1 to 3, got {axis}")
            }
            Self::MissingQuantity { name } => write!(f, "{name} not found in state"),
            Self::InvalidArray { reason } => write!(f, "invalid array: {reason}"),
        }
    }
}

impl Error for ValidationError {}

/// A physical constant could not be resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantError {
    /// Not overridden and absent from the constants table.
    Missing {
        /// The table key that was looked up.
        key: String,
    },
    /// Resolved value is not finite, or not positive where it must be.
    Invalid {
        /// The table key of the constant.
        key: String,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConstantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { key } => write!(f, "constant '{key}' is not defined"),
            Self::Invalid { key, value } => {
                write!(f, "constant '{key}' is out of range, got {value}")
            }
        }
    }
}

impl Error for ConstantError {}
