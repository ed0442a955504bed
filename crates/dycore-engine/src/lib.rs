//! Dynamical-core adapter for an external spectral atmospheric kernel.
//!
//! Provides [`DynamicalCore`], which converts grid-space model states to
//! the kernel's variables, folds in tendencies from contained physics,
//! steps the kernel and converts back. A sampled [`StateSignature`]
//! decides when the kernel's spectral state must be rebuilt from the
//! caller's fields.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assemble;
pub mod config;
pub mod dycore;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod quantities;
pub mod signature;
pub mod tracers;
pub mod transform;

pub use assemble::{assemble_tendencies, AssemblyError};
pub use config::{ConfigError, DycoreConfig, DEFAULT_SIGNATURE_SEED, SUPPORTED_LEVEL_COUNT};
pub use dycore::{DynamicalCore, INITIAL_SURFACE_PRESSURE, INITIAL_TEMPERATURE};
pub use error::StepError;
pub use grid::{GridDefinition, SpectralResolution, FIXED_TRACER_COUNT};
pub use metrics::StepMetrics;
pub use quantities::{Placement, QuantitySpec, INPUT_QUANTITIES, OUTPUT_QUANTITIES};
pub use signature::{SignatureHashes, StateSignature, TrackedFields, SAMPLE_COUNT};
pub use tracers::TracerSlot;
