//! Dycore: an orchestrator that drives an external spectral atmospheric
//! kernel from grid-space model states.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! `dycore-*` sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use dycore::prelude::*;
//! use dycore_test_utils::RecordingKernel;
//!
//! let config = DycoreConfig {
//!     latitude_count: 8,
//!     longitude_count: 16,
//!     ..Default::default()
//! };
//! let mut core = DynamicalCore::new(config, Box::new(RecordingKernel::new())).unwrap();
//! let state = core.initial_state().unwrap();
//! let (_diagnostics, next) = core.advance(&state).unwrap();
//! assert_eq!(next.require("air_temperature").unwrap().shape(), &[16, 8, 28]);
//! assert_eq!(core.resync_count(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dycore-core` | Labeled arrays, states, constants, validation |
//! | [`kernel`] | `dycore-kernel` | Kernel trait, exchange buffers, resource lease |
//! | [`physics`] | `dycore-physics` | Prognostic trait, pipelines, throttling |
//! | [`engine`] | `dycore-engine` | The dynamical-core adapter itself |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Labeled arrays, model state, and physical constants (`dycore-core`).
pub use dycore_core as types;

/// The spectral kernel contract (`dycore-kernel`).
///
/// Implement [`kernel::SpectralKernel`] to bind a new numerical kernel.
pub use dycore_kernel as kernel;

/// Contained physics components (`dycore-physics`).
pub use dycore_physics as physics;

/// The adapter (`dycore-engine`).
///
/// [`engine::DynamicalCore`] steps a state forward by one time step.
pub use dycore_engine as engine;

/// Common imports for typical usage.
pub mod prelude {
    // Core types
    pub use dycore_core::{
        ConstantOverrides, ConstantTable, Diagnostics, LabeledArray, PhysicalConstants, State,
        Tendencies,
    };

    // Errors
    pub use dycore_core::{ConstantError, ValidationError};
    pub use dycore_engine::{ConfigError, StepError};
    pub use dycore_kernel::KernelError;
    pub use dycore_physics::PhysicsError;

    // Kernel
    pub use dycore_kernel::{KernelResource, SpectralKernel};

    // Physics
    pub use dycore_physics::{PhysicsPipeline, Prognostic, UpdateThrottle};

    // Engine
    pub use dycore_engine::{DycoreConfig, DynamicalCore, GridDefinition, StepMetrics};
}
