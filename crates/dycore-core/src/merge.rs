//! In-place accumulation of tendency maps.

use indexmap::IndexMap;

use crate::array::LabeledArray;
use crate::error::ValidationError;

/// Add every array in `addend` into `target`.
///
/// Keys present in both maps are summed elementwise; keys only in
/// `addend` are copied into `target`. All shapes are checked before any
/// value is touched, so on error `target` is unchanged.
///
/// # Errors
///
/// [`ValidationError::ShapeMismatch`] if a shared key has different
/// shapes in the two maps.
pub fn accumulate_in_place(
    target: &mut IndexMap<String, LabeledArray>,
    addend: &IndexMap<String, LabeledArray>,
) -> Result<(), ValidationError> {
    for (name, value) in addend {
        if let Some(existing) = target.get(name) {
            if existing.shape() != value.shape() {
                return Err(ValidationError::ShapeMismatch {
                    name: name.clone(),
                    expected: existing.shape().to_vec(),
                    actual: value.shape().to_vec(),
                });
            }
        }
    }
    for (name, value) in addend {
        match target.get_mut(name) {
            Some(existing) => {
                let mut data = existing.data_mut();
                data += &value.view();
            }
            None => {
                target.insert(name.clone(), value.clone());
            }
        }
    }
    Ok(())
}
