//! [`PhysicsPipeline`]: several prognostics run as one.

use dycore_core::{accumulate_in_place, ensure_no_shared_keys, Diagnostics, State, Tendencies};

use crate::error::PhysicsError;
use crate::prognostic::Prognostic;

/// Runs prognostics in order on the same state and combines their outputs.
///
/// Tendencies for the same quantity are summed. Diagnostics must be
/// disjoint; two components producing the same diagnostic is an error.
#[derive(Default)]
pub struct PhysicsPipeline {
    components: Vec<Box<dyn Prognostic>>,
}

impl PhysicsPipeline {
    /// An empty pipeline. Produces no tendencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component.
    pub fn with(mut self, component: impl Prognostic + 'static) -> Self {
        self.push(Box::new(component));
        self
    }

    /// Append a boxed component.
    pub fn push(&mut self, component: Box<dyn Prognostic>) {
        self.components.push(component);
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the pipeline has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component names, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }
}

impl Prognostic for PhysicsPipeline {
    fn name(&self) -> &str {
        "physics_pipeline"
    }

    fn compute(&mut self, state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
        let mut tendencies = Tendencies::new();
        let mut diagnostics = Diagnostics::new();
        for component in &mut self.components {
            let (tend, diag) = component.compute(state)?;
            accumulate_in_place(&mut tendencies, &tend)?;
            ensure_no_shared_keys(&diagnostics, &diag)?;
            diagnostics.extend(diag);
        }
        Ok((tendencies, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dycore_core::{LabeledArray, ValidationError};

    struct Fixed {
        name: &'static str,
        tendency: Option<(&'static str, f64)>,
        diagnostic: Option<&'static str>,
    }

    fn field(value: f64) -> LabeledArray {
        let mut arr = LabeledArray::zeros(&[2, 2], ["longitude", "latitude"], "1").unwrap();
        arr.data_mut().fill(value);
        arr
    }

    impl Prognostic for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn compute(&mut self, _state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
            let mut tend = Tendencies::new();
            if let Some((name, value)) = self.tendency {
                tend.insert(name.to_string(), field(value));
            }
            let mut diag = Diagnostics::new();
            if let Some(name) = self.diagnostic {
                diag.insert(name.to_string(), field(0.0));
            }
            Ok((tend, diag))
        }
    }

    #[test]
    fn sums_tendencies() {
        let mut pipeline = PhysicsPipeline::new()
            .with(Fixed {
                name: "radiation",
                tendency: Some(("air_temperature", 1.5)),
                diagnostic: Some("heating_rate"),
            })
            .with(Fixed {
                name: "convection",
                tendency: Some(("air_temperature", 0.5)),
                diagnostic: Some("precipitation"),
            });
        assert_eq!(pipeline.names(), vec!["radiation", "convection"]);

        let (tend, diag) = pipeline.compute(&State::new()).unwrap();
        assert!(tend["air_temperature"].data().iter().all(|&v| v == 2.0));
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn rejects_duplicate_diagnostics() {
        let mut pipeline = PhysicsPipeline::new()
            .with(Fixed {
                name: "a",
                tendency: None,
                diagnostic: Some("cloud_fraction"),
            })
            .with(Fixed {
                name: "b",
                tendency: None,
                diagnostic: Some("cloud_fraction"),
            });
        let err = pipeline.compute(&State::new()).unwrap_err();
        assert_eq!(
            err,
            PhysicsError::Merge(ValidationError::SharedKeys {
                keys: vec!["cloud_fraction".into()]
            })
        );
    }

    #[test]
    fn empty_pipeline_is_empty_output() {
        let mut pipeline = PhysicsPipeline::new();
        assert!(pipeline.is_empty());
        let (tend, diag) = pipeline.compute(&State::new()).unwrap();
        assert!(tend.is_empty());
        assert!(diag.is_empty());
    }
}
