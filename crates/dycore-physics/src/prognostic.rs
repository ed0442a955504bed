//! The [`Prognostic`] trait.

use dycore_core::{Diagnostics, State, Tendencies};

use crate::error::PhysicsError;

/// A physics component producing tendencies and diagnostics from a state.
///
/// Components may keep internal state between calls, hence `&mut self`.
/// Tendencies are keyed by state quantity name and must match that
/// quantity's shape; absent entries mean zero tendency.
///
/// # Examples
///
/// ```
/// use dycore_core::{Diagnostics, State, Tendencies};
/// use dycore_physics::{PhysicsError, Prognostic};
///
/// struct Nothing;
///
/// impl Prognostic for Nothing {
///     fn name(&self) -> &str { "nothing" }
///
///     fn compute(&mut self, _state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
///         Ok((Tendencies::new(), Diagnostics::new()))
///     }
/// }
///
/// let (tend, diag) = Nothing.compute(&State::new()).unwrap();
/// assert!(tend.is_empty() && diag.is_empty());
/// ```
pub trait Prognostic: Send {
    /// Human-readable name for errors and logs.
    fn name(&self) -> &str;

    /// Compute tendencies and diagnostics for `state`.
    fn compute(&mut self, state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError>;
}

impl<P: Prognostic + ?Sized> Prognostic for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compute(&mut self, state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
        (**self).compute(state)
    }
}
