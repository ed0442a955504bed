//! Stateless checks over labeled arrays and quantity maps.
//!
//! Each `ensure_*` function returns `Ok(())` or a [`ValidationError`]
//! describing the first violation. They are used by the adapter's input
//! checks and by physics pipelines that merge outputs.

use indexmap::IndexMap;
use ndarray::{ArrayView3, ArrayViewD, Axis, Ix1, Ix3};

use crate::array::LabeledArray;
use crate::error::ValidationError;

const VERTICAL_BASE_NAMES: [&str; 7] = [
    "height",
    "z",
    "alt",
    "pres",
    "pressure",
    "air_pressure",
    "altitude",
];

const VERTICAL_EXTRA_NAMES: [&str; 5] = [
    "lev",
    "levels",
    "half_levels",
    "mid_levels",
    "interface_levels",
];

/// Axis names recognized as horizontal.
pub const HORIZONTAL_DIMENSION_NAMES: [&str; 6] =
    ["x", "y", "lon", "lat", "longitude", "latitude"];

/// Whether `dim` names a vertical coordinate.
///
/// Accepts the base names (`height`, `z`, `pressure`, ...), their
/// `_on_full_levels` / `_on_half_levels` variants, and the level names
/// (`lev`, `levels`, `half_levels`, `mid_levels`, `interface_levels`).
pub fn is_vertical_dim(dim: &str) -> bool {
    if VERTICAL_EXTRA_NAMES.contains(&dim) {
        return true;
    }
    let base = dim
        .strip_suffix("_on_full_levels")
        .or_else(|| dim.strip_suffix("_on_half_levels"))
        .unwrap_or(dim);
    VERTICAL_BASE_NAMES.contains(&base)
}

/// Whether `dim` names a horizontal coordinate.
pub fn is_horizontal_dim(dim: &str) -> bool {
    HORIZONTAL_DIMENSION_NAMES.contains(&dim)
}

/// Fail if the two maps share any key.
///
/// The error lists every shared key, in `first`'s order.
pub fn ensure_no_shared_keys<A, B>(
    first: &IndexMap<String, A>,
    second: &IndexMap<String, B>,
) -> Result<(), ValidationError> {
    let keys: Vec<String> = first
        .keys()
        .filter(|k| second.contains_key(k.as_str()))
        .cloned()
        .collect();
    if keys.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::SharedKeys { keys })
    }
}

/// Fail unless every array has the same axis names as the first one and,
/// per axis, identical coordinate values.
pub fn ensure_shared_coordinates(arrays: &[(&str, &LabeledArray)]) -> Result<(), ValidationError> {
    let Some((_, reference)) = arrays.first() else {
        return Ok(());
    };
    for (name, value) in &arrays[1..] {
        if value.dims() != reference.dims() {
            return Err(ValidationError::DimsMismatch {
                name: name.to_string(),
                expected: reference.dims().to_vec(),
                actual: value.dims().to_vec(),
            });
        }
        for (axis, dim) in reference.dims().iter().enumerate() {
            if value.coords_at(axis) != reference.coords_at(axis) {
                return Err(ValidationError::CoordinateMismatch {
                    name: name.to_string(),
                    dim: dim.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Fail unless, for every axis name, all arrays carrying that axis agree
/// on its length and coordinate values.
///
/// Unlike [`ensure_shared_coordinates`], the arrays may have different
/// axis sets; a surface field and a volume field are compared only on the
/// axes they share. The first array carrying an axis is the reference.
pub fn ensure_axis_coordinates_agree(
    arrays: &[(&str, &LabeledArray)],
) -> Result<(), ValidationError> {
    let mut reference: IndexMap<&str, (usize, Option<&[f64]>)> = IndexMap::new();
    for (name, value) in arrays {
        for (axis, dim) in value.dims().iter().enumerate() {
            let current = (value.shape()[axis], value.coords_at(axis));
            match reference.get(dim.as_str()) {
                Some(expected) if *expected != current => {
                    return Err(ValidationError::CoordinateMismatch {
                        name: name.to_string(),
                        dim: dim.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    reference.insert(dim.as_str(), current);
                }
            }
        }
    }
    Ok(())
}

/// Fail unless `value` has at least three axes and the third is vertical.
pub fn ensure_third_dim_is_vertical(value: &LabeledArray, name: &str) -> Result<(), ValidationError> {
    if value.ndim() < 3 {
        return Err(ValidationError::TooFewDimensions {
            name: name.to_string(),
            actual: value.ndim(),
        });
    }
    let third = &value.dims()[2];
    if !is_vertical_dim(third) {
        return Err(ValidationError::NotVertical {
            name: name.to_string(),
            dim: third.clone(),
        });
    }
    Ok(())
}

/// Fail if `value` has more than two axes or any non-horizontal axis.
pub fn ensure_horizontal_only(value: &LabeledArray, name: &str) -> Result<(), ValidationError> {
    if value.ndim() > 2 {
        return Err(ValidationError::NotHorizontal {
            name: name.to_string(),
            ndim: value.ndim(),
        });
    }
    if let Some(dim) = value.dims().iter().find(|d| !is_horizontal_dim(d)) {
        return Err(ValidationError::NonHorizontalDim {
            name: name.to_string(),
            dim: dim.clone(),
        });
    }
    Ok(())
}

/// Fail unless `value` has exactly `num_dims` axes.
pub fn ensure_number_of_dims(
    value: &LabeledArray,
    num_dims: usize,
    name: &str,
) -> Result<(), ValidationError> {
    if value.ndim() != num_dims {
        return Err(ValidationError::DimensionCount {
            name: name.to_string(),
            expected: num_dims,
            actual: value.ndim(),
        });
    }
    Ok(())
}

/// View a 1-D array as 3-D, with its data along axis `axis` (1, 2 or 3)
/// and length-1 axes elsewhere, so it broadcasts against 3-D fields.
///
/// A 3-D input is returned unchanged whatever `axis` is.
///
/// # Errors
///
/// [`ValidationError::BroadcastRank`] for inputs that are neither 1-D nor
/// 3-D; [`ValidationError::BroadcastAxis`] for a 1-D input with `axis`
/// outside `1..=3`.
pub fn broadcast_to_3d<'a>(
    value: ArrayViewD<'a, f64>,
    axis: usize,
) -> Result<ArrayView3<'a, f64>, ValidationError> {
    let ndim = value.ndim();
    match ndim {
        3 => value
            .into_dimensionality::<Ix3>()
            .map_err(|_| ValidationError::BroadcastRank { ndim }),
        1 => {
            let line = value
                .into_dimensionality::<Ix1>()
                .map_err(|_| ValidationError::BroadcastRank { ndim })?;
            match axis {
                1 => Ok(line.insert_axis(Axis(1)).insert_axis(Axis(2))),
                2 => Ok(line.insert_axis(Axis(0)).insert_axis(Axis(2))),
                3 => Ok(line.insert_axis(Axis(0)).insert_axis(Axis(0))),
                other => Err(ValidationError::BroadcastAxis { axis: other }),
            }
        }
        _ => Err(ValidationError::BroadcastRank { ndim }),
    }
}
