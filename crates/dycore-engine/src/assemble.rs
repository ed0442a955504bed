//! Tendency assembly: one column-major array per requested quantity.

use std::error::Error;
use std::fmt;

use dycore_core::{State, Tendencies};
use dycore_kernel::fortran_copy;
use ndarray::{ArrayD, ShapeBuilder};

/// A tendency could not be assembled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssemblyError {
    /// The quantity is in neither the tendencies nor the state.
    Missing {
        /// The missing quantity.
        name: String,
    },
    /// A supplied tendency does not match its state quantity's shape.
    ShapeMismatch {
        /// The offending quantity.
        name: String,
        /// Shape of the state quantity.
        expected: Vec<usize>,
        /// Shape of the supplied tendency.
        actual: Vec<usize>,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => {
                write!(f, "{name} not found in input state or tendencies")
            }
            Self::ShapeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "tendency of {name} has shape {actual:?}, state has {expected:?}"
            ),
        }
    }
}

impl Error for AssemblyError {}

/// For each name: the supplied tendency if present, else zeros shaped
/// like the state quantity. Arrays are returned in request order.
///
/// All-or-nothing: the first missing or mis-shaped quantity fails the
/// whole call.
pub fn assemble_tendencies(
    names: &[&str],
    state: &State,
    tendencies: &Tendencies,
) -> Result<Vec<ArrayD<f64>>, AssemblyError> {
    names
        .iter()
        .map(|&name| {
            let reference = state.get(name);
            match (tendencies.get(name), reference) {
                (Some(tend), Some(value)) if tend.shape() != value.shape() => {
                    Err(AssemblyError::ShapeMismatch {
                        name: name.to_string(),
                        expected: value.shape().to_vec(),
                        actual: tend.shape().to_vec(),
                    })
                }
                (Some(tend), _) => Ok(fortran_copy(tend.data())),
                (None, Some(value)) => Ok(ArrayD::zeros(value.data().raw_dim().f())),
                (None, None) => Err(AssemblyError::Missing {
                    name: name.to_string(),
                }),
            }
        })
        .collect()
}
