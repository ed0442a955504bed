//! Core types for the dycore workspace.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! labeled array and state containers, physical constants, shared error
//! types, and the stateless validation and merge utilities used by the
//! physics pipeline and the dynamical-core adapter.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod constants;
pub mod error;
pub mod merge;
pub mod state;
pub mod validate;

pub use array::{AxisNames, LabeledArray};
pub use constants::{ConstantOverrides, ConstantTable, PhysicalConstants};
pub use error::{ConstantError, ValidationError};
pub use merge::accumulate_in_place;
pub use state::{Diagnostics, State, Tendencies};
pub use validate::{
    broadcast_to_3d, ensure_axis_coordinates_agree, ensure_horizontal_only, ensure_no_shared_keys, ensure_number_of_dims,
    ensure_shared_coordinates, ensure_third_dim_is_vertical, is_horizontal_dim, is_vertical_dim,
};
