//! Model state and the tendency/diagnostic maps exchanged with physics.

use std::time::Duration;

use indexmap::IndexMap;

use crate::array::LabeledArray;
use crate::error::ValidationError;

/// Per-quantity time derivatives. Absent entries mean zero tendency.
pub type Tendencies = IndexMap<String, LabeledArray>;

/// Per-quantity diagnostic outputs.
pub type Diagnostics = IndexMap<String, LabeledArray>;

/// Grid-space model state: named quantities plus an optional model time.
///
/// The time is the elapsed simulation time since model start. It is only
/// required by components that schedule work on it, such as
/// `UpdateThrottle`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    time: Option<Duration>,
    quantities: IndexMap<String, LabeledArray>,
}

impl State {
    /// An empty state with no time set.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty state at simulation time `time`.
    pub fn at_time(time: Duration) -> Self {
        Self {
            time: Some(time),
            quantities: IndexMap::new(),
        }
    }

    /// The simulation time, if set.
    pub fn time(&self) -> Option<Duration> {
        self.time
    }

    /// Set or clear the simulation time.
    pub fn set_time(&mut self, time: Option<Duration>) {
        self.time = time;
    }

    /// Insert a quantity, returning the previous value under that name.
    pub fn insert(&mut self, name: impl Into<String>, value: LabeledArray) -> Option<LabeledArray> {
        self.quantities.insert(name.into(), value)
    }

    /// Look up a quantity.
    pub fn get(&self, name: &str) -> Option<&LabeledArray> {
        self.quantities.get(name)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut LabeledArray> {
        self.quantities.get_mut(name)
    }

    /// Look up a quantity that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingQuantity`] naming `name`.
    pub fn require(&self, name: &str) -> Result<&LabeledArray, ValidationError> {
        self.quantities
            .get(name)
            .ok_or_else(|| ValidationError::MissingQuantity {
                name: name.to_string(),
            })
    }

    /// Remove a quantity, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<LabeledArray> {
        self.quantities.shift_remove(name)
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.quantities.contains_key(name)
    }

    /// Number of quantities.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Whether the state holds no quantities.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Quantity names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.quantities.keys().map(String::as_str)
    }

    /// `(name, array)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabeledArray)> {
        self.quantities.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The underlying name → array map.
    pub fn quantities(&self) -> &IndexMap<String, LabeledArray> {
        &self.quantities
    }
}

impl FromIterator<(String, LabeledArray)> for State {
    fn from_iter<I: IntoIterator<Item = (String, LabeledArray)>>(iter: I) -> Self {
        Self {
            time: None,
            quantities: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(value: f64) -> LabeledArray {
        let mut arr = LabeledArray::zeros(&[2], ["x"], "1").unwrap();
        arr.data_mut().fill(value);
        arr
    }

    #[test]
    fn insert_get_remove() {
        let mut state = State::new();
        assert!(state.is_empty());
        state.insert("a", scalar(1.0));
        state.insert("b", scalar(2.0));
        assert_eq!(state.len(), 2);
        assert!(state.contains("a"));
        assert_eq!(state.get("b").unwrap().data()[[1]], 2.0);
        assert!(state.remove("a").is_some());
        assert_eq!(state.names().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn require_names_missing_quantity() {
        let state = State::new();
        let err = state.require("air_temperature").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingQuantity {
                name: "air_temperature".into()
            }
        );
    }

    #[test]
    fn time_round_trips() {
        let mut state = State::at_time(Duration::from_secs(60));
        assert_eq!(state.time(), Some(Duration::from_secs(60)));
        state.set_time(None);
        assert_eq!(state.time(), None);
    }

    #[test]
    fn from_iterator_keeps_order() {
        let state: State = vec![("z".to_string(), scalar(0.0)), ("a".to_string(), scalar(0.0))]
            .into_iter()
            .collect();
        assert_eq!(state.names().collect::<Vec<_>>(), vec!["z", "a"]);
    }
}
