//! Dycore quickstart: step a state through a kernel with contained physics.
//!
//! Demonstrates:
//!   1. Building a `DycoreConfig` and a `DynamicalCore`
//!   2. Writing a `Prognostic` (Newtonian cooling toward a fixed profile)
//!   3. Throttling it with `UpdateThrottle`
//!   4. Feeding each output state back in and watching resynchronization
//!
//! The kernel here is the in-memory recording kernel from
//! `dycore-test-utils`, which integrates pushed tendencies with forward
//! Euler. A real binding implements `SpectralKernel` over the spectral
//! model.
//!
//! Run with:
//!   cargo run --example quickstart

use std::time::Duration;

use dycore_core::{Diagnostics, State, Tendencies};
use dycore_engine::quantities::AIR_TEMPERATURE;
use dycore_engine::{DycoreConfig, DynamicalCore};
use dycore_physics::{PhysicsError, Prognostic, UpdateThrottle};
use dycore_test_utils::{apply_update, RecordingKernel};

// ─── Physics: Newtonian cooling ─────────────────────────────────

const EQUILIBRIUM_TEMPERATURE: f64 = 240.0;
const RELAXATION_SECONDS: f64 = 86_400.0;

struct NewtonianCooling;

impl Prognostic for NewtonianCooling {
    fn name(&self) -> &str {
        "newtonian_cooling"
    }

    fn compute(&mut self, state: &State) -> Result<(Tendencies, Diagnostics), PhysicsError> {
        let temperature = state.require(AIR_TEMPERATURE)?;
        let mut tendency = temperature.zeros_like();
        tendency
            .data_mut()
            .zip_mut_with(temperature.data(), |rate, &t| {
                *rate = (EQUILIBRIUM_TEMPERATURE - t) / RELAXATION_SECONDS;
            });
        let mut tendencies = Tendencies::new();
        tendencies.insert(AIR_TEMPERATURE.to_string(), tendency);
        Ok((tendencies, Diagnostics::new()))
    }
}

fn mean_temperature(state: &State) -> f64 {
    state
        .get(AIR_TEMPERATURE)
        .and_then(|t| t.data().mean())
        .unwrap_or(f64::NAN)
}

fn main() {
    let config = DycoreConfig {
        latitude_count: 16,
        longitude_count: 32,
        ..Default::default()
    };
    let physics = UpdateThrottle::new(NewtonianCooling, Duration::from_secs(3600));
    let mut core = DynamicalCore::new(config, Box::new(RecordingKernel::new()))
        .expect("valid configuration")
        .with_physics(physics);

    let resolution = core.resolution();
    println!(
        "truncation {} with {} spectral coefficients",
        resolution.truncation, resolution.spectral_dimension
    );

    let mut state = core.initial_state().expect("initial state");
    let dt = Duration::from_secs_f64(core.config().time_step_seconds);
    for step in 0..6 {
        let (_, update) = core.advance(&state).expect("step");
        apply_update(&mut state, &update);
        let now = state.time().unwrap_or_default() + dt;
        state.set_time(Some(now));

        let metrics = core.last_metrics();
        println!(
            "step {step}: t = {:>5} s  mean T = {:.4} K  resync = {}  ({} us)",
            now.as_secs(),
            mean_temperature(&state),
            metrics.resynchronized,
            metrics.total_us,
        );
    }
    println!("spectral state rebuilt {} time(s)", core.resync_count());
}
