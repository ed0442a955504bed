//! Owned, column-major buffers exchanged with the kernel.
//!
//! Fields are laid out `(longitude, latitude, level[, tracer])` in Fortran
//! memory order, which is what spectral kernels of this family expect.

use ndarray::{Array, Array2, Array3, Array4, ArrayBase, Data, Dimension, ShapeBuilder};

/// Grid and spectral sizes handed to [`configure_grid`](crate::SpectralKernel::configure_grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelDims {
    /// Number of latitudes.
    pub latitude_count: usize,
    /// Number of longitudes.
    pub longitude_count: usize,
    /// Number of vertical levels.
    pub level_count: usize,
    /// Spectral truncation.
    pub truncation: usize,
    /// Number of retained spectral coefficients.
    pub spectral_dimension: usize,
    /// Tracer slots, including the four fixed ones.
    pub tracer_count: usize,
}

impl KernelDims {
    /// Shape of a surface field, `(lon, lat)`.
    pub fn surface_shape(&self) -> (usize, usize) {
        (self.longitude_count, self.latitude_count)
    }

    /// Shape of a mid-level field, `(lon, lat, level)`.
    pub fn mid_level_shape(&self) -> (usize, usize, usize) {
        (self.longitude_count, self.latitude_count, self.level_count)
    }

    /// Shape of an interface-level field, `(lon, lat, level + 1)`.
    pub fn interface_shape(&self) -> (usize, usize, usize) {
        (
            self.longitude_count,
            self.latitude_count,
            self.level_count + 1,
        )
    }

    /// Shape of the tracer bundle, `(lon, lat, level, tracers)`.
    pub fn tracer_shape(&self) -> (usize, usize, usize, usize) {
        (
            self.longitude_count,
            self.latitude_count,
            self.level_count,
            self.tracer_count,
        )
    }
}

/// Coordinates returned by [`initialize_grid`](crate::SpectralKernel::initialize_grid).
#[derive(Clone, Debug, PartialEq)]
pub struct GridCoordinates {
    /// Latitudes in radians, one per latitude row.
    pub latitudes_rad: Vec<f64>,
    /// Longitudes in radians, one per longitude column.
    pub longitudes_rad: Vec<f64>,
    /// Sigma values at mid levels.
    pub sigma_levels: Vec<f64>,
    /// Sigma values at level interfaces.
    pub sigma_interfaces: Vec<f64>,
}

/// Prognostic grid-space fields.
#[derive(Clone, Debug, PartialEq)]
pub struct GridBuffers {
    /// Eastward wind.
    pub u: Array3<f64>,
    /// Northward wind.
    pub v: Array3<f64>,
    /// Virtual temperature.
    pub virtual_temperature: Array3<f64>,
    /// Natural log of surface pressure.
    pub log_surface_pressure: Array2<f64>,
    /// Tracer bundle.
    pub tracers: Array4<f64>,
    /// Relative vorticity.
    pub vorticity: Array3<f64>,
    /// Divergence.
    pub divergence: Array3<f64>,
}

impl GridBuffers {
    /// Zero-filled buffers sized for `dims`.
    pub fn zeros(dims: &KernelDims) -> Self {
        Self {
            u: Array3::zeros(dims.mid_level_shape().f()),
            v: Array3::zeros(dims.mid_level_shape().f()),
            virtual_temperature: Array3::zeros(dims.mid_level_shape().f()),
            log_surface_pressure: Array2::zeros(dims.surface_shape().f()),
            tracers: Array4::zeros(dims.tracer_shape().f()),
            vorticity: Array3::zeros(dims.mid_level_shape().f()),
            divergence: Array3::zeros(dims.mid_level_shape().f()),
        }
    }
}

/// Pressure fields.
#[derive(Clone, Debug, PartialEq)]
pub struct PressureBuffers {
    /// Surface pressure.
    pub surface_pressure: Array2<f64>,
    /// Pressure at mid levels.
    pub pressure: Array3<f64>,
    /// Pressure at level interfaces.
    pub pressure_on_interfaces: Array3<f64>,
}

impl PressureBuffers {
    /// Zero-filled buffers sized for `dims`.
    pub fn zeros(dims: &KernelDims) -> Self {
        Self {
            surface_pressure: Array2::zeros(dims.surface_shape().f()),
            pressure: Array3::zeros(dims.mid_level_shape().f()),
            pressure_on_interfaces: Array3::zeros(dims.interface_shape().f()),
        }
    }
}

/// Tendencies of the prognostic fields, already in kernel variables.
#[derive(Clone, Debug, PartialEq)]
pub struct TendencyBuffers {
    /// Eastward wind tendency.
    pub u: Array3<f64>,
    /// Northward wind tendency.
    pub v: Array3<f64>,
    /// Virtual temperature tendency.
    pub virtual_temperature: Array3<f64>,
    /// Log surface pressure tendency.
    pub log_surface_pressure: Array2<f64>,
    /// Tracer bundle tendency.
    pub tracers: Array4<f64>,
}

/// Copy `source` into a new array with Fortran (column-major) layout.
pub fn fortran_copy<S, D>(source: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut out = Array::zeros(source.raw_dim().f());
    out.assign(source);
    out
}

/// Whether `array` is laid out column-major.
pub fn is_fortran_layout<S, D>(array: &ArrayBase<S, D>) -> bool
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    array.ndim() <= 1 || array.t().is_standard_layout()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn dims() -> KernelDims {
        KernelDims {
            latitude_count: 4,
            longitude_count: 8,
            level_count: 3,
            truncation: 0,
            spectral_dimension: 1,
            tracer_count: 5,
        }
    }

    #[test]
    fn fortran_copy_keeps_values_changes_layout() {
        let c = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(!is_fortran_layout(&c));
        let f = fortran_copy(&c);
        assert!(is_fortran_layout(&f));
        assert_eq!(f, c);
        assert_eq!(f.as_slice_memory_order().unwrap(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn buffers_are_column_major_and_sized() {
        let grid = GridBuffers::zeros(&dims());
        assert_eq!(grid.u.dim(), (8, 4, 3));
        assert_eq!(grid.tracers.dim(), (8, 4, 3, 5));
        assert!(is_fortran_layout(&grid.tracers));
        let pressure = PressureBuffers::zeros(&dims());
        assert_eq!(pressure.pressure_on_interfaces.dim(), (8, 4, 4));
        assert_eq!(pressure.surface_pressure.dim(), (8, 4));
    }
}
