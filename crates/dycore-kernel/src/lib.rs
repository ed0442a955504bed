//! Procedural surface of the external spectral kernel.
//!
//! Defines the [`SpectralKernel`] trait the dynamical-core adapter drives,
//! the column-major buffers exchanged with it, its error type, and the
//! [`KernelLease`] guard that keeps a kernel's process-wide state owned by
//! one adapter at a time.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffers;
pub mod error;
pub mod kernel;
pub mod resource;

pub use buffers::{
    fortran_copy, is_fortran_layout, GridBuffers, GridCoordinates, KernelDims, PressureBuffers,
    TendencyBuffers,
};
pub use error::KernelError;
pub use kernel::SpectralKernel;
pub use resource::{KernelLease, KernelResource};
