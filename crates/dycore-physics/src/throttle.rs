//! [`UpdateThrottle`]: recompute a prognostic only every `interval` of
//! model time.

use std::time::Duration;

use dycore_core::{Diagnostics, State, Tendencies};
use log::debug;

use crate::error::PhysicsError;
use crate::prognostic::Prognostic;

/// Wraps a prognostic so it is recomputed only when the state time has
/// advanced by at least `interval` since the last recomputation.
///
/// Between recomputations the cached tendencies and diagnostics are
/// returned unchanged. The first call always recomputes. State times are
/// expected to be non-decreasing; a time earlier than the last update
/// counts as "not yet due" and returns the cache.
pub struct UpdateThrottle<P> {
    inner: P,
    interval: Duration,
    last_update: Option<Duration>,
    cached: Option<(Tendencies, Diagnostics)>,
}

impl<P: Prognostic> UpdateThrottle<P> {
    /// Wrap `inner`, recomputing at most every `interval`.
    pub fn new(inner: P, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last_update: None,
            cached: None,
        }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the last recomputation, if any.
    pub fn last_update(&self) -> Option<Duration> {
        self.last_update
    }

    /// The wrapped prognostic.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwrap, discarding the cache.
    pub fn into_inner(self) -> P {
        self.inner
    }

    fn is_due(&self, now: Duration) -> bool {
        match (self.last_update, &self.cached) {
            (Some(last), Some(_)) => now >= last.saturating_add(self.interval),
            _ => true,
        }
    }
}

impl<P: Prognostic> Prognostic for UpdateThrottle<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn compute(&mut self, state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
        let now = state.time().ok_or_else(|| PhysicsError::MissingTime {
            name: self.inner.name().to_string(),
        })?;

        if let (false, Some(cached)) = (self.is_due(now), &self.cached) {
            debug!(
                "{}: reusing output from {:?} at {:?}",
                self.inner.name(),
                self.last_update,
                now
            );
            return Ok(cached.clone());
        }

        let output = self.inner.compute(state)?;
        self.last_update = Some(now);
        self.cached = Some(output.clone());
        Ok(output)
    }
}
