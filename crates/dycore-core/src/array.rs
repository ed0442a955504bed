//! [`LabeledArray`]: an N-dimensional `f64` array tagged with axis names,
//! per-axis coordinates and a physical unit.

use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, IxDyn};
use smallvec::SmallVec;

use crate::error::ValidationError;

/// Ordered axis names of a [`LabeledArray`].
pub type AxisNames = SmallVec<[String; 4]>;

/// An N-dimensional numeric array with named axes, coordinates and units.
///
/// Every axis has a name and a coordinate vector of the same length as the
/// axis. Coordinates default to the index values `0, 1, .., n-1` and can be
/// replaced with [`with_coords`](Self::with_coords).
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledArray {
    data: ArrayD<f64>,
    dims: AxisNames,
    coords: SmallVec<[Vec<f64>; 4]>,
    units: String,
}

impl LabeledArray {
    /// Wrap `data` with axis names and a unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArray`] if the number of axis names
    /// differs from the array rank, or if an axis name repeats.
    pub fn new<I, S>(
        data: ArrayD<f64>,
        dims: I,
        units: impl Into<String>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: AxisNames = dims.into_iter().map(Into::into).collect();
        if dims.len() != data.ndim() {
            return Err(ValidationError::InvalidArray {
                reason: format!("{} axis names for a {}-d array", dims.len(), data.ndim()),
            });
        }
        for (i, dim) in dims.iter().enumerate() {
            if dims[..i].contains(dim) {
                return Err(ValidationError::InvalidArray {
                    reason: format!("axis name '{dim}' repeats"),
                });
            }
        }
        let coords = data
            .shape()
            .iter()
            .map(|&n| (0..n).map(|i| i as f64).collect())
            .collect();
        Ok(Self {
            data,
            dims,
            coords,
            units: units.into(),
        })
    }

    /// A zero-filled array of the given shape.
    pub fn zeros<I, S>(
        shape: &[usize],
        dims: I,
        units: impl Into<String>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ArrayD::zeros(IxDyn(shape)), dims, units)
    }

    /// Replace the coordinates of axis `dim`.
    ///
    /// # Errors
    ///
    /// Fails if `dim` is not an axis of this array or `values` has the
    /// wrong length.
    pub fn with_coords(mut self, dim: &str, values: Vec<f64>) -> Result<Self, ValidationError> {
        let axis = self
            .axis_index(dim)
            .ok_or_else(|| ValidationError::InvalidArray {
                reason: format!("no axis named '{dim}'"),
            })?;
        let len = self.data.shape()[axis];
        if values.len() != len {
            return Err(ValidationError::InvalidArray {
                reason: format!(
                    "{} coordinates for axis '{dim}' of length {len}",
                    values.len()
                ),
            });
        }
        self.coords[axis] = values;
        Ok(self)
    }

    /// The underlying array.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Mutable access to the underlying array. The shape cannot change.
    pub fn data_mut(&mut self) -> ArrayViewMutD<'_, f64> {
        self.data.view_mut()
    }

    /// A read-only view of the data.
    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }

    /// Consume the array, returning the raw data.
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Axis names, in axis order.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Position of the axis called `dim`.
    pub fn axis_index(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// Coordinates of the axis called `dim`.
    pub fn coords(&self, dim: &str) -> Option<&[f64]> {
        self.axis_index(dim).map(|axis| self.coords[axis].as_slice())
    }

    /// Coordinates of the axis at position `axis`.
    pub fn coords_at(&self, axis: usize) -> Option<&[f64]> {
        self.coords.get(axis).map(Vec::as_slice)
    }

    /// Physical unit annotation.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Array shape.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Same axes, coordinates and units, all values zero.
    pub fn zeros_like(&self) -> Self {
        Self {
            data: ArrayD::zeros(self.data.raw_dim()),
            dims: self.dims.clone(),
            coords: self.coords.clone(),
            units: self.units.clone(),
        }
    }

    /// Overwrite every value with `values`, keeping labels.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArray`] if the shapes differ.
    pub fn assign(&mut self, values: &ArrayViewD<'_, f64>) -> Result<(), ValidationError> {
        if values.shape() != self.data.shape() {
            return Err(ValidationError::InvalidArray {
                reason: format!(
                    "cannot assign shape {:?} into shape {:?}",
                    values.shape(),
                    self.data.shape()
                ),
            });
        }
        self.data.assign(values);
        Ok(())
    }
}
