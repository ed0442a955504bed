//! Tracer bundle layout.
//!
//! The bundle is `(lon, lat, level, tracer)`. Slots 0..4 hold, in this
//! order and no other: specific humidity, ozone, cloud liquid water,
//! cloud ice. Slots from 4 on are extra tracers owned by the caller.

use ndarray::{Array4, ArrayView3, ArrayView4, Axis};

use dycore_kernel::fortran_copy;

use crate::quantities::{CLOUD_ICE, CLOUD_LIQUID_WATER, OZONE_MOLE_FRACTION, SPECIFIC_HUMIDITY};

/// One of the four fixed tracer slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracerSlot {
    /// Slot 0.
    SpecificHumidity,
    /// Slot 1.
    Ozone,
    /// Slot 2.
    CloudLiquidWater,
    /// Slot 3.
    CloudIce,
}

impl TracerSlot {
    /// The fixed slots in bundle order.
    pub const ALL: [TracerSlot; 4] = [
        Self::SpecificHumidity,
        Self::Ozone,
        Self::CloudLiquidWater,
        Self::CloudIce,
    ];

    /// Position in the tracer axis.
    pub fn index(self) -> usize {
        match self {
            Self::SpecificHumidity => 0,
            Self::Ozone => 1,
            Self::CloudLiquidWater => 2,
            Self::CloudIce => 3,
        }
    }

    /// State quantity stored in this slot.
    pub fn quantity(self) -> &'static str {
        match self {
            Self::SpecificHumidity => SPECIFIC_HUMIDITY,
            Self::Ozone => OZONE_MOLE_FRACTION,
            Self::CloudLiquidWater => CLOUD_LIQUID_WATER,
            Self::CloudIce => CLOUD_ICE,
        }
    }
}

/// The four fixed tracer fields, borrowed.
#[derive(Clone, Copy, Debug)]
pub struct FixedTracers<'a> {
    /// Specific humidity.
    pub humidity: ArrayView3<'a, f64>,
    /// Ozone mole fraction.
    pub ozone: ArrayView3<'a, f64>,
    /// Cloud liquid water.
    pub liquid: ArrayView3<'a, f64>,
    /// Cloud ice.
    pub ice: ArrayView3<'a, f64>,
}

impl<'a> FixedTracers<'a> {
    fn get(&self, slot: TracerSlot) -> ArrayView3<'a, f64> {
        match slot {
            TracerSlot::SpecificHumidity => self.humidity,
            TracerSlot::Ozone => self.ozone,
            TracerSlot::CloudLiquidWater => self.liquid,
            TracerSlot::CloudIce => self.ice,
        }
    }
}

/// Build the kernel's tracer bundle: a column-major copy of `existing`
/// with the fixed slots overwritten from `fixed`.
///
/// Shapes must agree; the adapter validates them first.
pub fn pack_tracers(existing: ArrayView4<'_, f64>, fixed: &FixedTracers<'_>) -> Array4<f64> {
    let mut bundle = fortran_copy(&existing);
    for slot in TracerSlot::ALL {
        bundle
            .index_axis_mut(Axis(3), slot.index())
            .assign(&fixed.get(slot));
    }
    bundle
}

/// View of one fixed slot of `bundle`.
pub fn tracer_slot(bundle: &Array4<f64>, slot: TracerSlot) -> ArrayView3<'_, f64> {
    bundle.index_axis(Axis(3), slot.index())
}
