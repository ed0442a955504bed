//! Test doubles and fixtures for dycore development.
//!
//! Provides [`RecordingKernel`], an in-process [`SpectralKernel`] that
//! integrates pushed tendencies with forward Euler and records every call,
//! plus prognostic fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::f64::consts::PI;
use std::sync::{Arc, Mutex, MutexGuard};

use dycore_core::{PhysicalConstants, State};
use dycore_kernel::{
    GridBuffers, GridCoordinates, KernelDims, KernelError, KernelResource, PressureBuffers,
    SpectralKernel, TendencyBuffers,
};
use ndarray::{Array2, ArrayView2, Axis, Zip};

pub use fixtures::{ConstantTendency, CountingPrognostic, FailingPrognostic};

/// Everything a [`RecordingKernel`] has been told.
#[derive(Clone, Debug, Default)]
pub struct KernelLog {
    /// Procedure names, in call order.
    pub calls: Vec<&'static str>,
    pub resync_count: usize,
    pub step_count: usize,
    pub time_step: Option<f64>,
    pub constants: Option<PhysicalConstants>,
    pub dims: Option<KernelDims>,
    pub dry_pressure: Option<f64>,
    pub damped_levels: Option<usize>,
    /// Grid fields as last pushed, before stepping.
    pub pushed_grid: Option<GridBuffers>,
    pub pushed_pressure: Option<PressureBuffers>,
    pub topography: Option<Array2<f64>>,
    pub tendencies: Option<TendencyBuffers>,
}

impl KernelLog {
    /// Number of times `name` was called.
    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| **c == name).count()
    }
}

/// Shared handle to a kernel's log, readable after the kernel is boxed.
#[derive(Clone, Debug, Default)]
pub struct LogHandle(Arc<Mutex<KernelLog>>);

impl LogHandle {
    /// Lock the log for inspection.
    pub fn lock(&self) -> MutexGuard<'_, KernelLog> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// In-process kernel for tests.
///
/// Grid fields are held in grid space; `advance_one_step` adds
/// `dt * tendency` to each prognostic field, `spectral_to_grid` does
/// nothing, and `recompute_pressure_fields` rebuilds pressures from the
/// log surface pressure and the sigma coordinate.
pub struct RecordingKernel {
    resource: Arc<KernelResource>,
    log: LogHandle,
    dims: Option<KernelDims>,
    time_step: f64,
    sigma_levels: Vec<f64>,
    sigma_interfaces: Vec<f64>,
    grid: Option<GridBuffers>,
    pressure: Option<PressureBuffers>,
    tendencies: Option<TendencyBuffers>,
    fail_on: Option<&'static str>,
}

impl RecordingKernel {
    /// A kernel with its own fresh resource.
    pub fn new() -> Self {
        Self::with_resource(KernelResource::new("recording-kernel"))
    }

    /// A kernel driving `resource`, shared with any other kernel using it.
    pub fn with_resource(resource: Arc<KernelResource>) -> Self {
        Self {
            resource,
            log: LogHandle::default(),
            dims: None,
            time_step: 0.0,
            sigma_levels: Vec::new(),
            sigma_interfaces: Vec::new(),
            grid: None,
            pressure: None,
            tendencies: None,
            fail_on: None,
        }
    }

    /// A second kernel over the same process-wide resource as `self`.
    pub fn sharing(&self) -> Self {
        Self::with_resource(Arc::clone(&self.resource))
    }

    /// Fail every call to the procedure named `operation`.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Handle to the call log.
    pub fn log(&self) -> LogHandle {
        self.log.clone()
    }

    /// The resource this kernel drives.
    pub fn shared_resource(&self) -> Arc<KernelResource> {
        Arc::clone(&self.resource)
    }

    fn enter(&mut self, operation: &'static str) -> Result<(), KernelError> {
        self.log.lock().calls.push(operation);
        if self.fail_on == Some(operation) {
            return Err(KernelError::CallFailed {
                operation,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn configured(&self, operation: &'static str) -> Result<KernelDims, KernelError> {
        self.dims.ok_or_else(|| KernelError::CallFailed {
            operation,
            reason: "grid not configured".to_string(),
        })
    }
}

impl Default for RecordingKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn check_shape(
    operation: &'static str,
    expected: &[usize],
    actual: &[usize],
) -> Result<(), KernelError> {
    if expected == actual {
        Ok(())
    } else {
        Err(KernelError::ShapeMismatch {
            operation,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}

impl SpectralKernel for RecordingKernel {
    fn resource(&self) -> Arc<KernelResource> {
        Arc::clone(&self.resource)
    }

    fn configure_time_step(&mut self, seconds: f64) -> Result<(), KernelError> {
        self.enter("configure_time_step")?;
        self.time_step = seconds;
        self.log.lock().time_step = Some(seconds);
        Ok(())
    }

    fn configure_constants(&mut self, constants: &PhysicalConstants) -> Result<(), KernelError> {
        self.enter("configure_constants")?;
        self.log.lock().constants = Some(*constants);
        Ok(())
    }

    fn configure_grid(&mut self, dims: &KernelDims) -> Result<(), KernelError> {
        self.enter("configure_grid")?;
        self.dims = Some(*dims);
        self.log.lock().dims = Some(*dims);
        Ok(())
    }

    fn initialize_grid(
        &mut self,
        dry_pressure: f64,
        damped_levels: usize,
    ) -> Result<GridCoordinates, KernelError> {
        self.enter("initialize_grid")?;
        let dims = self.configured("initialize_grid")?;
        let nlat = dims.latitude_count as f64;
        let nlon = dims.longitude_count as f64;
        let nlev = dims.level_count as f64;

        self.sigma_levels = (0..dims.level_count)
            .map(|k| 1.0 - (k as f64 + 0.5) / nlev)
            .collect();
        self.sigma_interfaces = (0..=dims.level_count)
            .map(|k| 1.0 - k as f64 / nlev)
            .collect();
        {
            let mut log = self.log.lock();
            log.dry_pressure = Some(dry_pressure);
            log.damped_levels = Some(damped_levels);
        }
        Ok(GridCoordinates {
            latitudes_rad: (0..dims.latitude_count)
                .map(|j| -PI / 2.0 + (j as f64 + 0.5) * PI / nlat)
                .collect(),
            longitudes_rad: (0..dims.longitude_count)
                .map(|i| 2.0 * PI * i as f64 / nlon)
                .collect(),
            sigma_levels: self.sigma_levels.clone(),
            sigma_interfaces: self.sigma_interfaces.clone(),
        })
    }

    fn push_grid_fields(&mut self, fields: &GridBuffers) -> Result<(), KernelError> {
        self.enter("push_grid_fields")?;
        let dims = self.configured("push_grid_fields")?;
        let (x, y, z, n) = dims.tracer_shape();
        check_shape("push_grid_fields", &[x, y, z], fields.u.shape())?;
        check_shape("push_grid_fields", &[x, y], fields.log_surface_pressure.shape())?;
        check_shape("push_grid_fields", &[x, y, z, n], fields.tracers.shape())?;
        self.grid = Some(fields.clone());
        self.log.lock().pushed_grid = Some(fields.clone());
        Ok(())
    }

    fn push_pressure_fields(&mut self, fields: &PressureBuffers) -> Result<(), KernelError> {
        self.enter("push_pressure_fields")?;
        let dims = self.configured("push_pressure_fields")?;
        let (x, y, z) = dims.interface_shape();
        check_shape("push_pressure_fields", &[x, y, z], fields.pressure_on_interfaces.shape())?;
        self.pressure = Some(fields.clone());
        self.log.lock().pushed_pressure = Some(fields.clone());
        Ok(())
    }

    fn push_topography(&mut self, geopotential: ArrayView2<'_, f64>) -> Result<(), KernelError> {
        self.enter("push_topography")?;
        self.log.lock().topography = Some(geopotential.to_owned());
        Ok(())
    }

    fn push_tendencies(&mut self, tendencies: &TendencyBuffers) -> Result<(), KernelError> {
        self.enter("push_tendencies")?;
        self.tendencies = Some(tendencies.clone());
        self.log.lock().tendencies = Some(tendencies.clone());
        Ok(())
    }

    fn resynchronize_spectral_state(&mut self) -> Result<(), KernelError> {
        self.enter("resynchronize_spectral_state")?;
        self.log.lock().resync_count += 1;
        Ok(())
    }

    fn advance_one_step(&mut self) -> Result<(), KernelError> {
        self.enter("advance_one_step")?;
        let dt = self.time_step;
        let (Some(grid), Some(tend)) = (self.grid.as_mut(), self.tendencies.as_ref()) else {
            return Err(KernelError::CallFailed {
                operation: "advance_one_step",
                reason: "fields or tendencies not pushed".to_string(),
            });
        };
        grid.u.scaled_add(dt, &tend.u);
        grid.v.scaled_add(dt, &tend.v);
        grid.virtual_temperature
            .scaled_add(dt, &tend.virtual_temperature);
        grid.log_surface_pressure
            .scaled_add(dt, &tend.log_surface_pressure);
        grid.tracers.scaled_add(dt, &tend.tracers);
        self.log.lock().step_count += 1;
        Ok(())
    }

    fn spectral_to_grid(&mut self) -> Result<(), KernelError> {
        self.enter("spectral_to_grid")
    }

    fn recompute_pressure_fields(&mut self) -> Result<(), KernelError> {
        self.enter("recompute_pressure_fields")?;
        let (Some(grid), Some(pressure)) = (self.grid.as_ref(), self.pressure.as_mut()) else {
            return Err(KernelError::CallFailed {
                operation: "recompute_pressure_fields",
                reason: "fields not pushed".to_string(),
            });
        };
        Zip::from(&mut pressure.surface_pressure)
            .and(&grid.log_surface_pressure)
            .for_each(|ps, &lnps| *ps = lnps.exp());
        let ps = &pressure.surface_pressure;
        for (k, mut level) in pressure.pressure.axis_iter_mut(Axis(2)).enumerate() {
            let sigma = self.sigma_levels[k];
            Zip::from(&mut level).and(ps).for_each(|p, &s| *p = sigma * s);
        }
        for (k, mut level) in pressure
            .pressure_on_interfaces
            .axis_iter_mut(Axis(2))
            .enumerate()
        {
            let sigma = self.sigma_interfaces[k];
            Zip::from(&mut level).and(ps).for_each(|p, &s| *p = sigma * s);
        }
        Ok(())
    }

    fn pull_grid_fields(&mut self, fields: &mut GridBuffers) -> Result<(), KernelError> {
        self.enter("pull_grid_fields")?;
        let grid = self.grid.as_ref().ok_or(KernelError::CallFailed {
            operation: "pull_grid_fields",
            reason: "fields not pushed".to_string(),
        })?;
        fields.clone_from(grid);
        Ok(())
    }

    fn pull_pressure_fields(&mut self, fields: &mut PressureBuffers) -> Result<(), KernelError> {
        self.enter("pull_pressure_fields")?;
        let pressure = self.pressure.as_ref().ok_or(KernelError::CallFailed {
            operation: "pull_pressure_fields",
            reason: "fields not pushed".to_string(),
        })?;
        fields.clone_from(pressure);
        Ok(())
    }
}

/// Set every value of `name` in `state` to `value`.
///
/// # Panics
///
/// If `name` is not in `state`.
pub fn fill_quantity(state: &mut State, name: &str, value: f64) {
    state
        .get_mut(name)
        .unwrap_or_else(|| panic!("{name} not in state"))
        .data_mut()
        .fill(value);
}

/// Overwrite quantities in `state` with those in `update`, as a driver
/// does after each step. Quantities absent from `update` are kept.
pub fn apply_update(state: &mut State, update: &State) {
    for (name, value) in update.iter() {
        state.insert(name, value.clone());
    }
    state.set_time(update.time());
}
