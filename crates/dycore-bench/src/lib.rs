//! Benchmark profiles for the dynamical-core adapter.
//!
//! - [`reference_config`]: the default 198 x 94 x 28 grid
//! - [`small_config`]: a 32 x 16 x 28 grid for quick iteration
//! - [`perturbed_state`]: a deterministic non-uniform starting state

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dycore_core::State;
use dycore_engine::quantities::{AIR_TEMPERATURE, EASTWARD_WIND, SPECIFIC_HUMIDITY};
use dycore_engine::{DycoreConfig, DynamicalCore};
use dycore_test_utils::RecordingKernel;

/// Default grid: 198 longitudes, 94 latitudes, 28 levels.
pub fn reference_config() -> DycoreConfig {
    DycoreConfig::default()
}

/// Reduced grid: 32 longitudes, 16 latitudes, 28 levels.
pub fn small_config() -> DycoreConfig {
    DycoreConfig {
        latitude_count: 16,
        longitude_count: 32,
        ..Default::default()
    }
}

/// A core over a fresh [`RecordingKernel`].
///
/// # Panics
///
/// If `config` is invalid.
pub fn recording_core(config: DycoreConfig) -> DynamicalCore {
    DynamicalCore::new(config, Box::new(RecordingKernel::new()))
        .unwrap_or_else(|e| panic!("benchmark profile rejected: {e}"))
}

/// The core's initial state with a zonal wind jet, a temperature gradient
/// and moisture, all derived from `seed`.
///
/// # Panics
///
/// If the core cannot build its initial state.
pub fn perturbed_state(core: &DynamicalCore, seed: u64) -> State {
    let mut state = core
        .initial_state()
        .unwrap_or_else(|e| panic!("initial state: {e}"));
    let offset = (seed % 97) as f64 * 0.01;
    let latitudes = core.grid().latitudes().to_vec();

    if let Some(u) = state.get_mut(EASTWARD_WIND) {
        for (ix, v) in u.data_mut().indexed_iter_mut() {
            *v = 20.0 * latitudes[ix[1]].to_radians().cos() + offset;
        }
    }
    if let Some(t) = state.get_mut(AIR_TEMPERATURE) {
        for (ix, v) in t.data_mut().indexed_iter_mut() {
            let (i, j, k) = (ix[0], ix[1], ix[2]);
            *v = 300.0 - 40.0 * latitudes[j].to_radians().sin().abs() - 2.0 * k as f64
                + 0.1 * i as f64
                + offset;
        }
    }
    if let Some(q) = state.get_mut(SPECIFIC_HUMIDITY) {
        q.data_mut().fill(1.0e-3 + offset * 1.0e-4);
    }
    state
}
