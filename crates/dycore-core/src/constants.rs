//! Physical constants: a key → value table, per-constant overrides, and the
//! resolved [`PhysicalConstants`] consumed by the adapter.
//!
//! The table is an explicit value passed in at construction. There is no
//! process-global default lookup; [`ConstantTable::earth`] builds the
//! shared defaults on demand.

use indexmap::IndexMap;

use crate::error::ConstantError;

/// Table keys for the constants the dynamical core consumes.
pub mod keys {
    /// Planetary radius (m).
    pub const PLANETARY_RADIUS: &str = "planetary_radius";
    /// Planetary rotation rate (s^-1).
    pub const PLANETARY_ROTATION_RATE: &str = "planetary_rotation_rate";
    /// Universal gas constant (J K^-1 mol^-1).
    pub const UNIVERSAL_GAS_CONSTANT: &str = "universal_gas_constant";
    /// Gas constant of dry air (J kg^-1 K^-1).
    pub const GAS_CONSTANT_OF_DRY_AIR: &str = "gas_constant_of_dry_air";
    /// Gas constant of the condensible, water vapour (J kg^-1 K^-1).
    pub const GAS_CONSTANT_OF_WATER_VAPOR: &str = "gas_constant_of_water_vapor";
    /// Gravitational acceleration (m s^-2).
    pub const GRAVITATIONAL_ACCELERATION: &str = "gravitational_acceleration";
    /// Heat capacity of dry air at constant pressure (J kg^-1 K^-1).
    pub const HEAT_CAPACITY_OF_DRY_AIR: &str = "heat_capacity_of_dry_air_at_constant_pressure";
    /// Heat capacity of water vapour at constant pressure (J kg^-1 K^-1).
    pub const HEAT_CAPACITY_OF_WATER_VAPOR: &str =
        "heat_capacity_of_water_vapor_at_constant_pressure";
}

/// A flat, read-only-by-convention table of named physical constants.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantTable {
    values: IndexMap<String, f64>,
}

impl ConstantTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Earth defaults for every key in [`keys`].
    pub fn earth() -> Self {
        let mut table = Self::empty();
        table.set(keys::PLANETARY_RADIUS, 6.371e6);
        table.set(keys::PLANETARY_ROTATION_RATE, 7.292e-5);
        table.set(keys::UNIVERSAL_GAS_CONSTANT, 8.3144598);
        table.set(keys::GAS_CONSTANT_OF_DRY_AIR, 287.05);
        table.set(keys::GAS_CONSTANT_OF_WATER_VAPOR, 461.5);
        table.set(keys::GRAVITATIONAL_ACCELERATION, 9.80665);
        table.set(keys::HEAT_CAPACITY_OF_DRY_AIR, 1004.64);
        table.set(keys::HEAT_CAPACITY_OF_WATER_VAPOR, 1846.0);
        table
    }

    /// Look up a constant.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Set a constant, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(key.into(), value)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl Default for ConstantTable {
    fn default() -> Self {
        Self::earth()
    }
}

/// Optional per-constant overrides. `None` resolves from the table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantOverrides {
    /// Planetary radius (m).
    pub planetary_radius: Option<f64>,
    /// Planetary rotation rate (s^-1).
    pub planetary_rotation_rate: Option<f64>,
    /// Universal gas constant (J K^-1 mol^-1).
    pub universal_gas_constant: Option<f64>,
    /// Gas constant of dry air (J kg^-1 K^-1).
    pub gas_constant_dry_air: Option<f64>,
    /// Gas constant of the condensible (J kg^-1 K^-1).
    pub gas_constant_condensible: Option<f64>,
    /// Gravitational acceleration (m s^-2).
    pub acceleration_gravity: Option<f64>,
    /// Heat capacity of dry air at constant pressure (J kg^-1 K^-1).
    pub specific_heat_dry_air: Option<f64>,
    /// Heat capacity of the condensible at constant pressure (J kg^-1 K^-1).
    pub specific_heat_condensible: Option<f64>,
}

impl ConstantOverrides {
    /// Resolve every constant from the overrides, falling back to `table`.
    ///
    /// Values the kernel divides by (radius, gravity, the dry and
    /// condensible gas constants, dry heat capacity) must be positive.
    /// The rest only need to be finite, so a non-rotating or retrograde
    /// planet is accepted.
    ///
    /// # Errors
    ///
    /// [`ConstantError::Missing`] if a constant is neither overridden nor in
    /// the table; [`ConstantError::Invalid`] if a resolved value is out of
    /// range.
    pub fn resolve(&self, table: &ConstantTable) -> Result<PhysicalConstants, ConstantError> {
        use Requirement::{Finite, Positive};

        let pick = |key: &str,
                    value: Option<f64>,
                    requirement: Requirement|
         -> Result<f64, ConstantError> {
            let resolved = value
                .or_else(|| table.get(key))
                .ok_or_else(|| ConstantError::Missing {
                    key: key.to_string(),
                })?;
            let ok = match requirement {
                Finite => resolved.is_finite(),
                Positive => resolved.is_finite() && resolved > 0.0,
            };
            if !ok {
                return Err(ConstantError::Invalid {
                    key: key.to_string(),
                    value: resolved,
                });
            }
            Ok(resolved)
        };

        Ok(PhysicalConstants {
            planetary_radius: pick(keys::PLANETARY_RADIUS, self.planetary_radius, Positive)?,
            rotation_rate: pick(
                keys::PLANETARY_ROTATION_RATE,
                self.planetary_rotation_rate,
                Finite,
            )?,
            universal_gas_constant: pick(
                keys::UNIVERSAL_GAS_CONSTANT,
                self.universal_gas_constant,
                Finite,
            )?,
            gas_constant_dry_air: pick(
                keys::GAS_CONSTANT_OF_DRY_AIR,
                self.gas_constant_dry_air,
                Positive,
            )?,
            gas_constant_condensible: pick(
                keys::GAS_CONSTANT_OF_WATER_VAPOR,
                self.gas_constant_condensible,
                Positive,
            )?,
            gravity: pick(
                keys::GRAVITATIONAL_ACCELERATION,
                self.acceleration_gravity,
                Positive,
            )?,
            heat_capacity_dry_air: pick(
                keys::HEAT_CAPACITY_OF_DRY_AIR,
                self.specific_heat_dry_air,
                Positive,
            )?,
            heat_capacity_condensible: pick(
                keys::HEAT_CAPACITY_OF_WATER_VAPOR,
                self.specific_heat_condensible,
                Finite,
            )?,
        })
    }
}

#[derive(Clone, Copy)]
enum Requirement {
    Finite,
    Positive,
}

/// Fully resolved constants, fixed for the lifetime of an adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstants {
    /// Planetary radius (m).
    pub planetary_radius: f64,
    /// Planetary rotation rate (s^-1).
    pub rotation_rate: f64,
    /// Universal gas constant (J K^-1 mol^-1).
    pub universal_gas_constant: f64,
    /// Gas constant of dry air, `Rd` (J kg^-1 K^-1).
    pub gas_constant_dry_air: f64,
    /// Gas constant of the condensible, `Rv` (J kg^-1 K^-1).
    pub gas_constant_condensible: f64,
    /// Gravitational acceleration (m s^-2).
    pub gravity: f64,
    /// Heat capacity of dry air, `Cp` (J kg^-1 K^-1).
    pub heat_capacity_dry_air: f64,
    /// Heat capacity of the condensible, `Cvap` (J kg^-1 K^-1).
    pub heat_capacity_condensible: f64,
}

impl PhysicalConstants {
    /// Virtual temperature factor `(1 - Rd/Rv) / (Rd/Rv)`.
    pub fn fvirt(&self) -> f64 {
        let ratio = self.gas_constant_dry_air / self.gas_constant_condensible;
        (1.0 - ratio) / ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_table_resolves() {
        let c = ConstantOverrides::default()
            .resolve(&ConstantTable::earth())
            .unwrap();
        assert_eq!(c.planetary_radius, 6.371e6);
        assert_eq!(c.gas_constant_dry_air, 287.05);
        assert_eq!(c.heat_capacity_condensible, 1846.0);
    }

    #[test]
    fn overrides_win_over_table() {
        let overrides = ConstantOverrides {
            planetary_radius: Some(3.3895e6),
            ..Default::default()
        };
        let c = overrides.resolve(&ConstantTable::earth()).unwrap();
        assert_eq!(c.planetary_radius, 3.3895e6);
        assert_eq!(c.gravity, 9.80665);
    }

    #[test]
    fn missing_key_fails() {
        let mut table = ConstantTable::empty();
        table.set(keys::PLANETARY_RADIUS, 1.0);
        let err = ConstantOverrides::default().resolve(&table).unwrap_err();
        assert_eq!(
            err,
            ConstantError::Missing {
                key: keys::PLANETARY_ROTATION_RATE.into()
            }
        );
    }

    #[test]
    fn non_positive_value_fails() {
        let overrides = ConstantOverrides {
            acceleration_gravity: Some(0.0),
            ..Default::default()
        };
        let err = overrides.resolve(&ConstantTable::earth()).unwrap_err();
        assert!(matches!(err, ConstantError::Invalid { value, .. } if value == 0.0));
    }

    #[test]
    fn rotation_rate_may_be_zero_or_negative() {
        for rate in [0.0, -7.292e-5] {
            let overrides = ConstantOverrides {
                planetary_rotation_rate: Some(rate),
                ..Default::default()
            };
            let c = overrides.resolve(&ConstantTable::earth()).unwrap();
            assert_eq!(c.rotation_rate, rate);
        }
    }

    #[test]
    fn non_finite_rotation_rate_fails() {
        let overrides = ConstantOverrides {
            planetary_rotation_rate: Some(f64::NAN),
            ..Default::default()
        };
        let err = overrides.resolve(&ConstantTable::earth()).unwrap_err();
        assert!(matches!(
            err,
            ConstantError::Invalid { ref key, .. } if key == keys::PLANETARY_ROTATION_RATE
        ));
    }

    #[test]
    fn fvirt_matches_definition() {
        let c = ConstantOverrides::default()
            .resolve(&ConstantTable::earth())
            .unwrap();
        let expected = (1.0 - 287.05 / 461.5) / (287.05 / 461.5);
        assert!((c.fvirt() - expected).abs() < 1e-15);
        assert!((c.fvirt() - 0.6077).abs() < 1e-3);
    }
}
