//! Spectral resolution and the immutable grid descriptor.

use dycore_kernel::{GridCoordinates, KernelDims, KernelError};

/// Number of tracer slots with a fixed meaning.
pub const FIXED_TRACER_COUNT: usize = 4;

/// Spectral sizes derived from the longitude count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpectralResolution {
    /// Spectral truncation, `floor(lon / 3) - 2`. Zero if that would be
    /// negative; configuration rejects it.
    pub truncation: usize,
    /// Number of retained coefficients, `(t + 1)(t + 2) / 2`.
    pub spectral_dimension: usize,
    /// Tracer slots, `extra + 4`.
    pub tracer_count: usize,
}

impl SpectralResolution {
    /// Derive the resolution for `longitude_count` longitudes and
    /// `extra_tracer_count` tracers beyond the fixed four.
    pub fn new(longitude_count: usize, extra_tracer_count: usize) -> Self {
        let truncation = (longitude_count / 3).saturating_sub(2);
        Self {
            truncation,
            spectral_dimension: (truncation + 1) * (truncation + 2) / 2,
            tracer_count: extra_tracer_count + FIXED_TRACER_COUNT,
        }
    }
}

/// Grid coordinates, produced once by the kernel and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct GridDefinition {
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    sigma_levels: Vec<f64>,
    sigma_interfaces: Vec<f64>,
}

impl GridDefinition {
    /// Build from the kernel's coordinates, converting radians to degrees.
    ///
    /// # Errors
    ///
    /// [`KernelError::ShapeMismatch`] if any coordinate vector does not
    /// match `dims`.
    pub fn from_kernel(coords: GridCoordinates, dims: &KernelDims) -> Result<Self, KernelError> {
        let check = |expected: usize, actual: usize| {
            if expected == actual {
                Ok(())
            } else {
                Err(KernelError::ShapeMismatch {
                    operation: "initialize_grid",
                    expected: vec![expected],
                    actual: vec![actual],
                })
            }
        };
        check(dims.latitude_count, coords.latitudes_rad.len())?;
        check(dims.longitude_count, coords.longitudes_rad.len())?;
        check(dims.level_count, coords.sigma_levels.len())?;
        check(dims.level_count + 1, coords.sigma_interfaces.len())?;

        Ok(Self {
            latitudes: coords.latitudes_rad.iter().map(|r| r.to_degrees()).collect(),
            longitudes: coords.longitudes_rad.iter().map(|r| r.to_degrees()).collect(),
            sigma_levels: coords.sigma_levels,
            sigma_interfaces: coords.sigma_interfaces,
        })
    }

    /// Latitudes, degrees north.
    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Longitudes, degrees east.
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// Sigma at mid levels.
    pub fn sigma_levels(&self) -> &[f64] {
        &self.sigma_levels
    }

    /// Sigma at level interfaces.
    pub fn sigma_interfaces(&self) -> &[f64] {
        &self.sigma_interfaces
    }
}
