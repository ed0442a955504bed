//! The [`SpectralKernel`] trait: the procedural surface of an external
//! spectral atmospheric integrator.

use std::sync::Arc;

use dycore_core::PhysicalConstants;
use ndarray::ArrayView2;

use crate::buffers::{GridBuffers, GridCoordinates, KernelDims, PressureBuffers, TendencyBuffers};
use crate::error::KernelError;
use crate::resource::KernelResource;

/// An external spectral dynamical kernel.
///
/// # Contract
///
/// - Configuration calls (`configure_*`, then `initialize_grid`) happen
///   once, in that order, before any field is pushed.
/// - A step is: push grid, pressure and topography fields; push
///   tendencies; optionally `resynchronize_spectral_state`; then
///   `advance_one_step`, `spectral_to_grid`, `recompute_pressure_fields`,
///   and finally the two `pull_*` calls to read the updated fields.
/// - The kernel may hold process-wide state. Every kernel that shares such
///   state must return the same [`KernelResource`] from
///   [`resource`](Self::resource); the adapter leases it for its lifetime.
///
/// # Object safety
///
/// The adapter stores kernels as `Box<dyn SpectralKernel>`.
pub trait SpectralKernel: Send {
    /// The process-wide resource this kernel drives.
    fn resource(&self) -> Arc<KernelResource>;

    /// Set the integration time step.
    fn configure_time_step(&mut self, seconds: f64) -> Result<(), KernelError>;

    /// Set planetary and thermodynamic constants.
    fn configure_constants(&mut self, constants: &PhysicalConstants) -> Result<(), KernelError>;

    /// Set grid and spectral sizes.
    fn configure_grid(&mut self, dims: &KernelDims) -> Result<(), KernelError>;

    /// Build the grid and vertical coordinate.
    ///
    /// `damped_levels` is the number of top levels with extra damping.
    fn initialize_grid(
        &mut self,
        dry_pressure: f64,
        damped_levels: usize,
    ) -> Result<GridCoordinates, KernelError>;

    /// Load grid-space prognostic fields.
    fn push_grid_fields(&mut self, fields: &GridBuffers) -> Result<(), KernelError>;

    /// Load pressure fields.
    fn push_pressure_fields(&mut self, fields: &PressureBuffers) -> Result<(), KernelError>;

    /// Load surface geopotential.
    fn push_topography(&mut self, geopotential: ArrayView2<'_, f64>) -> Result<(), KernelError>;

    /// Load tendencies for the next step.
    fn push_tendencies(&mut self, tendencies: &TendencyBuffers) -> Result<(), KernelError>;

    /// Rebuild the spectral state from the pushed grid fields.
    fn resynchronize_spectral_state(&mut self) -> Result<(), KernelError>;

    /// Integrate one time step in spectral space.
    fn advance_one_step(&mut self) -> Result<(), KernelError>;

    /// Transform the spectral state back to grid space.
    fn spectral_to_grid(&mut self) -> Result<(), KernelError>;

    /// Recompute pressure fields from the updated surface pressure.
    fn recompute_pressure_fields(&mut self) -> Result<(), KernelError>;

    /// Copy the kernel's current grid fields into `fields`.
    fn pull_grid_fields(&mut self, fields: &mut GridBuffers) -> Result<(), KernelError>;

    /// Copy the kernel's current pressure fields into `fields`.
    fn pull_pressure_fields(&mut self, fields: &mut PressureBuffers) -> Result<(), KernelError>;
}
