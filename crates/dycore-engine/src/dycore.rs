//! [`DynamicalCore`]: steps a model state through an external spectral
//! kernel.
//!
//! Each [`advance`](DynamicalCore::advance) converts the caller's
//! grid-space state to the kernel's variables, pushes it together with
//! tendencies from optional contained physics, lets the kernel integrate
//! one step, and converts the result back.
//!
//! The kernel keeps its own spectral copy of the state between steps. If
//! the caller edits the state between calls, that copy is stale; a sampled
//! [`StateSignature`] detects this and triggers a resynchronization.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use log::{debug, info, trace};
use ndarray::{Array, Array2, Array3, Array4, ArrayD, Dimension, Ix2, Ix3};

use dycore_core::{
    ensure_axis_coordinates_agree, ensure_horizontal_only, ensure_number_of_dims,
    ensure_shared_coordinates, ensure_third_dim_is_vertical, Diagnostics, LabeledArray,
    PhysicalConstants, State, Tendencies, ValidationError,
};
use dycore_kernel::{
    fortran_copy, GridBuffers, KernelDims, KernelLease, PressureBuffers, SpectralKernel,
    TendencyBuffers,
};
use dycore_physics::Prognostic;

use crate::assemble::assemble_tendencies;
use crate::config::{ConfigError, DycoreConfig};
use crate::error::StepError;
use crate::grid::{GridDefinition, SpectralResolution};
use crate::metrics::StepMetrics;
use crate::quantities::{
    Placement, QuantitySpec, AIR_PRESSURE, AIR_PRESSURE_ON_INTERFACE_LEVELS, AIR_TEMPERATURE,
    DIVERGENCE_OF_WIND, EASTWARD_WIND, INPUT_QUANTITIES, INTERFACE_LEVELS_DIM, LATITUDE_DIM,
    LONGITUDE_DIM, MID_LEVELS_DIM, NORTHWARD_WIND, OUTPUT_QUANTITIES, RELATIVE_VORTICITY,
    SURFACE_AIR_PRESSURE, SURFACE_GEOPOTENTIAL, TENDENCY_QUANTITIES, TRACER_BUNDLE,
};
use crate::signature::{StateSignature, TrackedFields};
use crate::tracers::{pack_tracers, tracer_slot, FixedTracers, TracerSlot};
use crate::transform::{
    log_surface_pressure, log_surface_pressure_tendency, temperature_from_virtual,
    virtual_temperature, virtual_temperature_tendency,
};

/// Temperature of the state returned by [`DynamicalCore::initial_state`] (K).
pub const INITIAL_TEMPERATURE: f64 = 250.0;

/// Surface pressure of the state returned by [`DynamicalCore::initial_state`] (Pa).
pub const INITIAL_SURFACE_PRESSURE: f64 = 1.0e5;

/// Grid-space inputs, column-major.
struct Inputs {
    u: Array3<f64>,
    v: Array3<f64>,
    temperature: Array3<f64>,
    surface_pressure: Array2<f64>,
    pressure: Array3<f64>,
    pressure_on_interfaces: Array3<f64>,
    humidity: Array3<f64>,
    ozone: Array3<f64>,
    liquid: Array3<f64>,
    ice: Array3<f64>,
    geopotential: Array2<f64>,
    vorticity: Array3<f64>,
    divergence: Array3<f64>,
    tracers: Array4<f64>,
}

fn field<D: Dimension>(state: &State, name: &str) -> Result<Array<f64, D>, ValidationError> {
    let view = state
        .require(name)?
        .view()
        .into_dimensionality::<D>()
        .map_err(|e| ValidationError::InvalidArray {
            reason: format!("{name}: {e}"),
        })?;
    Ok(fortran_copy(&view))
}

fn fixed_rank<D: Dimension>(array: ArrayD<f64>, name: &str) -> Result<Array<f64, D>, ValidationError> {
    array
        .into_dimensionality::<D>()
        .map_err(|e| ValidationError::InvalidArray {
            reason: format!("tendency of {name}: {e}"),
        })
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

/// Drives a [`SpectralKernel`] one time step at a time.
///
/// Holds the kernel's [`KernelLease`] for its whole lifetime, so a second
/// core over the same kernel resource cannot be built while this one is
/// alive.
pub struct DynamicalCore {
    config: DycoreConfig,
    dims: KernelDims,
    resolution: SpectralResolution,
    constants: PhysicalConstants,
    fvirt: f64,
    grid: GridDefinition,
    signature: StateSignature,
    physics: Option<Box<dyn Prognostic>>,
    kernel: Box<dyn SpectralKernel>,
    // Dropped after the kernel.
    _lease: KernelLease,
    resync_count: u64,
    step_count: u64,
    last_metrics: StepMetrics,
}

impl std::fmt::Debug for DynamicalCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicalCore")
            .field("dims", &self.dims)
            .field("resource", &self._lease.resource().name())
            .field("has_physics", &self.physics.is_some())
            .field("resync_count", &self.resync_count)
            .field("step_count", &self.step_count)
            .finish_non_exhaustive()
    }
}

impl DynamicalCore {
    /// Validate `config`, lease `kernel`'s resource, configure the kernel
    /// and build the grid.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`DycoreConfig::validate`], and
    /// [`ConfigError::Kernel`] if the resource is busy or a setup call
    /// fails.
    pub fn new(config: DycoreConfig, mut kernel: Box<dyn SpectralKernel>) -> Result<Self, ConfigError> {
        config.validate()?;
        let constants = config.resolve_constants()?;
        let resolution = config.resolution();
        let dims = config.kernel_dims();

        let lease = KernelLease::acquire(kernel.resource())?;

        kernel.configure_time_step(config.time_step_seconds)?;
        kernel.configure_constants(&constants)?;
        kernel.configure_grid(&dims)?;

        info!("initialising dynamical core, this could take some time");
        let coords = kernel.initialize_grid(config.dry_pressure, config.damped_level_count)?;
        info!("done");
        debug!(
            "grid {}x{}x{}, truncation {}, {} spectral coefficients, {} tracers",
            dims.longitude_count,
            dims.latitude_count,
            dims.level_count,
            dims.truncation,
            dims.spectral_dimension,
            dims.tracer_count
        );

        let grid = GridDefinition::from_kernel(coords, &dims)?;
        let signature = StateSignature::new(
            dims.longitude_count,
            dims.latitude_count,
            dims.level_count,
            config.signature_seed,
        );

        Ok(Self {
            fvirt: constants.fvirt(),
            config,
            dims,
            resolution,
            constants,
            grid,
            signature,
            physics: None,
            kernel,
            _lease: lease,
            resync_count: 0,
            step_count: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Run `physics` inside every step, on the caller's state.
    pub fn with_physics(mut self, physics: impl Prognostic + 'static) -> Self {
        self.physics = Some(Box::new(physics));
        self
    }

    /// Replace or remove the contained physics.
    pub fn set_physics(&mut self, physics: Option<Box<dyn Prognostic>>) {
        self.physics = physics;
    }

    /// The configuration this core was built from.
    pub fn config(&self) -> &DycoreConfig {
        &self.config
    }

    /// The grid produced by the kernel.
    pub fn grid(&self) -> &GridDefinition {
        &self.grid
    }

    /// Derived spectral resolution.
    pub fn resolution(&self) -> SpectralResolution {
        self.resolution
    }

    /// Resolved physical constants.
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Number of spectral resynchronizations so far.
    pub fn resync_count(&self) -> u64 {
        self.resync_count
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Timing of the last completed step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Declared inputs.
    pub fn input_quantities(&self) -> &'static [QuantitySpec] {
        &INPUT_QUANTITIES
    }

    /// Declared outputs.
    pub fn output_quantities(&self) -> &'static [QuantitySpec] {
        &OUTPUT_QUANTITIES
    }

    fn expected_shape(&self, placement: Placement) -> Vec<usize> {
        let d = &self.dims;
        match placement {
            Placement::Surface => vec![d.longitude_count, d.latitude_count],
            Placement::MidLevels => vec![d.longitude_count, d.latitude_count, d.level_count],
            Placement::InterfaceLevels => {
                vec![d.longitude_count, d.latitude_count, d.level_count + 1]
            }
            Placement::Tracers => vec![
                d.longitude_count,
                d.latitude_count,
                d.level_count,
                d.tracer_count,
            ],
        }
    }

    fn coordinates(&self, dim: &str) -> Option<Vec<f64>> {
        match dim {
            LONGITUDE_DIM => Some(self.grid.longitudes().to_vec()),
            LATITUDE_DIM => Some(self.grid.latitudes().to_vec()),
            MID_LEVELS_DIM => Some(self.grid.sigma_levels().to_vec()),
            INTERFACE_LEVELS_DIM => Some(self.grid.sigma_interfaces().to_vec()),
            _ => None,
        }
    }

    /// A complete input state on this core's grid.
    ///
    /// Winds, humidity, condensate, tracers, vorticity, divergence and
    /// geopotential are zero; temperature is [`INITIAL_TEMPERATURE`];
    /// surface pressure is [`INITIAL_SURFACE_PRESSURE`] and the level
    /// pressures are `sigma * ps`. Axes carry the grid coordinates.
    pub fn initial_state(&self) -> Result<State, ValidationError> {
        let mut state = State::at_time(Duration::ZERO);
        let sigma = self.grid.sigma_levels();
        let sigma_int = self.grid.sigma_interfaces();

        for quantity in &INPUT_QUANTITIES {
            let dims = quantity.placement.dims();
            let shape = self.expected_shape(quantity.placement);
            let mut value = LabeledArray::zeros(&shape, dims.iter().copied(), quantity.units)?;
            for dim in dims {
                if let Some(coords) = self.coordinates(dim) {
                    value = value.with_coords(dim, coords)?;
                }
            }
            {
                let mut data = value.data_mut();
                match quantity.name {
                    AIR_TEMPERATURE => data.fill(INITIAL_TEMPERATURE),
                    SURFACE_AIR_PRESSURE => data.fill(INITIAL_SURFACE_PRESSURE),
                    AIR_PRESSURE => data
                        .indexed_iter_mut()
                        .for_each(|(i, v)| *v = sigma[i[2]] * INITIAL_SURFACE_PRESSURE),
                    AIR_PRESSURE_ON_INTERFACE_LEVELS => data
                        .indexed_iter_mut()
                        .for_each(|(i, v)| *v = sigma_int[i[2]] * INITIAL_SURFACE_PRESSURE),
                    _ => {}
                }
            }
            state.insert(quantity.name, value);
        }
        Ok(state)
    }

    fn validate_inputs(&self, state: &State) -> Result<(), ValidationError> {
        for quantity in &INPUT_QUANTITIES {
            let value = state.require(quantity.name)?;
            ensure_number_of_dims(value, quantity.placement.dims().len(), quantity.name)?;
            match quantity.placement {
                Placement::Surface => ensure_horizontal_only(value, quantity.name)?,
                _ => ensure_third_dim_is_vertical(value, quantity.name)?,
            }
            let expected = self.expected_shape(quantity.placement);
            if value.shape() != expected.as_slice() {
                return Err(ValidationError::ShapeMismatch {
                    name: quantity.name.to_string(),
                    expected,
                    actual: value.shape().to_vec(),
                });
            }
        }
        let inputs = INPUT_QUANTITIES
            .iter()
            .map(|q| Ok((q.name, state.require(q.name)?)))
            .collect::<Result<Vec<_>, ValidationError>>()?;
        let mid_level_fields: Vec<_> = inputs
            .iter()
            .zip(&INPUT_QUANTITIES)
            .filter(|(_, q)| q.placement == Placement::MidLevels)
            .map(|(pair, _)| *pair)
            .collect();
        ensure_shared_coordinates(&mid_level_fields)?;
        ensure_axis_coordinates_agree(&inputs)
    }

    fn extract_inputs(&self, state: &State) -> Result<Inputs, ValidationError> {
        self.validate_inputs(state)?;
        Ok(Inputs {
            u: field::<Ix3>(state, EASTWARD_WIND)?,
            v: field::<Ix3>(state, NORTHWARD_WIND)?,
            temperature: field::<Ix3>(state, AIR_TEMPERATURE)?,
            surface_pressure: field::<Ix2>(state, SURFACE_AIR_PRESSURE)?,
            pressure: field::<Ix3>(state, AIR_PRESSURE)?,
            pressure_on_interfaces: field::<Ix3>(state, AIR_PRESSURE_ON_INTERFACE_LEVELS)?,
            humidity: field::<Ix3>(state, TracerSlot::SpecificHumidity.quantity())?,
            ozone: field::<Ix3>(state, TracerSlot::Ozone.quantity())?,
            liquid: field::<Ix3>(state, TracerSlot::CloudLiquidWater.quantity())?,
            ice: field::<Ix3>(state, TracerSlot::CloudIce.quantity())?,
            geopotential: field::<Ix2>(state, SURFACE_GEOPOTENTIAL)?,
            vorticity: field::<Ix3>(state, RELATIVE_VORTICITY)?,
            divergence: field::<Ix3>(state, DIVERGENCE_OF_WIND)?,
            tracers: field(state, TRACER_BUNDLE)?,
        })
    }

    /// Advance `state` by one kernel time step.
    ///
    /// Returns empty diagnostics and a new state holding the declared
    /// output quantities, with the input state's units, coordinates and
    /// time. The input state is not modified.
    ///
    /// # Errors
    ///
    /// [`StepError`] on malformed input, failed physics or assembly, or
    /// any kernel failure. A failed step may leave fields pushed into the
    /// kernel; no partial state is returned, and the next step
    /// resynchronizes.
    pub fn advance(&mut self, state: &State) -> Result<(Diagnostics, State), StepError> {
        let result = self.try_advance(state);
        if result.is_err() {
            self.signature.clear();
        }
        result
    }

    fn try_advance(&mut self, state: &State) -> Result<(Diagnostics, State), StepError> {
        let step_start = Instant::now();
        let fvirt = self.fvirt;

        // 1. Inputs and output buffers.
        let inputs = self.extract_inputs(state)?;
        let mut outputs: IndexMap<String, LabeledArray> = OUTPUT_QUANTITIES
            .iter()
            .map(|q| Ok((q.name.to_string(), state.require(q.name)?.clone())))
            .collect::<Result<_, ValidationError>>()?;

        // 2. Was the state edited outside the core since the last step?
        let modified = self.signature.check_and_update(&TrackedFields {
            eastward_wind: inputs.u.view(),
            northward_wind: inputs.v.view(),
            temperature: inputs.temperature.view(),
            pressure: inputs.pressure.view(),
            surface_pressure: inputs.surface_pressure.view(),
        });
        if modified {
            debug!("state modified externally, spectral arrays will be resynchronized");
        }

        // 3-4. Kernel variables.
        let log_ps = log_surface_pressure(inputs.surface_pressure.view());
        let t_virt = virtual_temperature(inputs.temperature.view(), inputs.humidity.view(), fvirt);
        let tracers = pack_tracers(
            inputs.tracers.view(),
            &FixedTracers {
                humidity: inputs.humidity.view(),
                ozone: inputs.ozone.view(),
                liquid: inputs.liquid.view(),
                ice: inputs.ice.view(),
            },
        );

        // 5. Push grid-space fields.
        let kernel_start = Instant::now();
        let mut grid = GridBuffers {
            u: inputs.u,
            v: inputs.v,
            virtual_temperature: t_virt,
            log_surface_pressure: log_ps,
            tracers,
            vorticity: inputs.vorticity,
            divergence: inputs.divergence,
        };
        let mut pressure = PressureBuffers {
            surface_pressure: inputs.surface_pressure,
            pressure: inputs.pressure,
            pressure_on_interfaces: inputs.pressure_on_interfaces,
        };
        self.kernel.push_grid_fields(&grid)?;
        self.kernel.push_pressure_fields(&pressure)?;
        self.kernel.push_topography(inputs.geopotential.view())?;
        let mut kernel_time = kernel_start.elapsed();

        // 6. Contained physics sees the caller's state.
        let physics_start = Instant::now();
        let tendencies = match self.physics.as_mut() {
            Some(physics) => physics.compute(state)?.0,
            None => Tendencies::new(),
        };
        let physics_time = physics_start.elapsed();

        // 7. Assemble.
        let [t_tend, q_tend, u_tend, v_tend, ps_tend, tracer_tend]: [ArrayD<f64>; 6] =
            assemble_tendencies(&TENDENCY_QUANTITIES, state, &tendencies)?
                .try_into()
                .map_err(|_| ValidationError::InvalidArray {
                    reason: "tendency count does not match request".to_string(),
                })?;

        // 8. Transform and push tendencies.
        let t_tend = fixed_rank::<Ix3>(t_tend, AIR_TEMPERATURE)?;
        let q_tend = fixed_rank::<Ix3>(q_tend, TracerSlot::SpecificHumidity.quantity())?;
        let ps_tend = fixed_rank::<Ix2>(ps_tend, SURFACE_AIR_PRESSURE)?;
        let tendency_buffers = TendencyBuffers {
            u: fixed_rank(u_tend, EASTWARD_WIND)?,
            v: fixed_rank(v_tend, NORTHWARD_WIND)?,
            virtual_temperature: virtual_temperature_tendency(
                t_tend.view(),
                inputs.humidity.view(),
                grid.virtual_temperature.view(),
                q_tend.view(),
                fvirt,
            ),
            log_surface_pressure: log_surface_pressure_tendency(
                ps_tend.view(),
                pressure.surface_pressure.view(),
            ),
            tracers: fixed_rank(tracer_tend, TRACER_BUNDLE)?,
        };

        let kernel_start = Instant::now();
        self.kernel.push_tendencies(&tendency_buffers)?;

        // 9. Resynchronize only when needed; it is expensive.
        if modified {
            self.kernel.resynchronize_spectral_state()?;
            self.resync_count += 1;
        }

        // 10. Step and read back.
        self.kernel.advance_one_step()?;
        self.kernel.spectral_to_grid()?;
        self.kernel.recompute_pressure_fields()?;
        self.kernel.pull_grid_fields(&mut grid)?;
        self.kernel.pull_pressure_fields(&mut pressure)?;
        kernel_time += kernel_start.elapsed();

        // 11. Back to temperature with the post-step humidity.
        let humidity = tracer_slot(&grid.tracers, TracerSlot::SpecificHumidity);
        let temperature =
            temperature_from_virtual(grid.virtual_temperature.view(), humidity, fvirt);

        // 12. Remember what this step produced.
        self.signature.store(&TrackedFields {
            eastward_wind: grid.u.view(),
            northward_wind: grid.v.view(),
            temperature: temperature.view(),
            pressure: pressure.pressure.view(),
            surface_pressure: pressure.surface_pressure.view(),
        });

        // 13. Fill the outputs.
        for (name, value) in outputs.iter_mut() {
            let source = match name.as_str() {
                EASTWARD_WIND => grid.u.view().into_dyn(),
                NORTHWARD_WIND => grid.v.view().into_dyn(),
                AIR_TEMPERATURE => temperature.view().into_dyn(),
                SURFACE_AIR_PRESSURE => pressure.surface_pressure.view().into_dyn(),
                AIR_PRESSURE => pressure.pressure.view().into_dyn(),
                AIR_PRESSURE_ON_INTERFACE_LEVELS => pressure.pressure_on_interfaces.view().into_dyn(),
                TRACER_BUNDLE => grid.tracers.view().into_dyn(),
                other => {
                    match TracerSlot::ALL.into_iter().find(|s| s.quantity() == other) {
                        Some(slot) => tracer_slot(&grid.tracers, slot).into_dyn(),
                        None => continue,
                    }
                }
            };
            value.assign(&source)?;
        }

        let mut new_state: State = outputs.into_iter().collect();
        new_state.set_time(state.time());

        self.step_count += 1;
        self.last_metrics = StepMetrics {
            total_us: micros(step_start.elapsed()),
            physics_us: micros(physics_time),
            kernel_us: micros(kernel_time),
            resynchronized: modified,
        };
        trace!(
            "step {} took {}us (physics {}us, kernel {}us)",
            self.step_count,
            self.last_metrics.total_us,
            self.last_metrics.physics_us,
            self.last_metrics.kernel_us
        );

        Ok((Diagnostics::new(), new_state))
    }
}
