//! Reusable prognostic fixtures.
//!
//! - [`ConstantTendency`]: returns fixed tendencies and diagnostics.
//! - [`CountingPrognostic`]: returns nothing, counts calls.
//! - [`FailingPrognostic`]: fails deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dycore_core::{Diagnostics, LabeledArray, State, Tendencies};
use dycore_physics::{PhysicsError, Prognostic};

/// Returns the same tendencies and diagnostics on every call.
pub struct ConstantTendency {
    pub name: String,
    pub tendencies: Tendencies,
    pub diagnostics: Diagnostics,
}

impl ConstantTendency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tendencies: Tendencies::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Add a tendency for `quantity`.
    pub fn with_tendency(mut self, quantity: impl Into<String>, value: LabeledArray) -> Self {
        self.tendencies.insert(quantity.into(), value);
        self
    }

    /// Add a diagnostic.
    pub fn with_diagnostic(mut self, name: impl Into<String>, value: LabeledArray) -> Self {
        self.diagnostics.insert(name.into(), value);
        self
    }

    /// A tendency for `quantity` shaped like it in `state`, filled with `rate`.
    ///
    /// # Panics
    ///
    /// If `quantity` is not in `state`.
    pub fn uniform(name: impl Into<String>, state: &State, quantity: &str, rate: f64) -> Self {
        let mut value = state
            .get(quantity)
            .unwrap_or_else(|| panic!("{quantity} not in state"))
            .zeros_like();
        value.data_mut().fill(rate);
        Self::new(name).with_tendency(quantity, value)
    }
}

impl Prognostic for ConstantTendency {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&mut self, _state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
        Ok((self.tendencies.clone(), self.diagnostics.clone()))
    }
}

/// Returns empty output; counts calls through a shared counter.
pub struct CountingPrognostic {
    pub name: String,
    calls: Arc<AtomicUsize>,
}

impl CountingPrognostic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter readable after the prognostic is moved into a pipeline.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// How many times `compute()` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Prognostic for CountingPrognostic {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&mut self, _state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok((Tendencies::new(), Diagnostics::new()))
    }
}

/// Fails deterministically after a configurable number of successful calls.
pub struct FailingPrognostic {
    pub name: String,
    pub succeed_count: usize,
    call_count: usize,
}

impl FailingPrognostic {
    /// Create a prognostic that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: 0,
        }
    }

    /// How many times `compute()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count
    }
}

impl Prognostic for FailingPrognostic {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&mut self, _state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
        let n = self.call_count;
        self.call_count += 1;
        if n >= self.succeed_count {
            return Err(PhysicsError::Failed {
                name: self.name.clone(),
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok((Tendencies::new(), Diagnostics::new()))
    }
}
