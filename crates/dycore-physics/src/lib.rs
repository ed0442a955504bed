//! Physics components for the dycore workspace.
//!
//! Provides the [`Prognostic`] trait, [`PhysicsPipeline`] to run several
//! prognostics as one, and [`UpdateThrottle`] to recompute an expensive
//! prognostic only at a coarser model-time interval.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pipeline;
pub mod prognostic;
pub mod throttle;

pub use error::PhysicsError;
pub use pipeline::PhysicsPipeline;
pub use prognostic::Prognostic;
pub use throttle::UpdateThrottle;
