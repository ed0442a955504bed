//! Adapter configuration, validation, and error types.
//!
//! [`DycoreConfig`] is the constructor input for
//! [`DynamicalCore`](crate::DynamicalCore). [`validate()`](DycoreConfig::validate)
//! checks every precondition before the kernel is touched.

use std::error::Error;
use std::fmt;

use dycore_core::{ConstantError, ConstantOverrides, ConstantTable, PhysicalConstants};
use dycore_kernel::{KernelDims, KernelError};

use crate::grid::SpectralResolution;

/// The only vertical level count the kernel supports.
pub const SUPPORTED_LEVEL_COUNT: usize = 28;

/// Default seed for the state-signature sample indices.
pub const DEFAULT_SIGNATURE_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

// ── DycoreConfig ───────────────────────────────────────────────────

/// Construction parameters for the dynamical core.
#[derive(Clone, Debug)]
pub struct DycoreConfig {
    /// Number of latitudes. Default: 94.
    pub latitude_count: usize,
    /// Number of longitudes. Default: 198.
    pub longitude_count: usize,
    /// Number of vertical levels. Must be [`SUPPORTED_LEVEL_COUNT`].
    pub level_count: usize,
    /// Tracers beyond humidity, ozone, liquid and ice. Default: 0.
    pub extra_tracer_count: usize,
    /// Number of damped levels at the model top. Default: 0.
    pub damped_level_count: usize,
    /// Reference dry-atmosphere surface pressure (Pa). Default: 1.0132e5.
    pub dry_pressure: f64,
    /// Integration time step (s). Default: 1200.
    pub time_step_seconds: f64,
    /// Per-constant overrides. Default: none.
    pub constants: ConstantOverrides,
    /// Table that unset constants resolve from. Default: Earth values.
    pub constant_table: ConstantTable,
    /// Seed for the signature sample indices.
    pub signature_seed: u64,
}

impl Default for DycoreConfig {
    fn default() -> Self {
        Self {
            latitude_count: 94,
            longitude_count: 198,
            level_count: SUPPORTED_LEVEL_COUNT,
            extra_tracer_count: 0,
            damped_level_count: 0,
            dry_pressure: 1.0132e5,
            time_step_seconds: 1200.0,
            constants: ConstantOverrides::default(),
            constant_table: ConstantTable::earth(),
            signature_seed: DEFAULT_SIGNATURE_SEED,
        }
    }
}

impl DycoreConfig {
    /// Check all preconditions.
    ///
    /// # Errors
    ///
    /// The first violated precondition, as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid dimensions.
        for (dimension, count) in [
            ("latitude", self.latitude_count),
            ("longitude", self.longitude_count),
            ("level", self.level_count),
        ] {
            if count == 0 {
                return Err(ConfigError::ZeroDimension { dimension });
            }
        }
        // 2. Fixed vertical resolution.
        if self.level_count != SUPPORTED_LEVEL_COUNT {
            return Err(ConfigError::UnsupportedLevelCount {
                configured: self.level_count,
            });
        }
        // 3. Spectral truncation and the Gaussian grid constraint.
        let resolution = self.resolution();
        if resolution.truncation < 1 {
            return Err(ConfigError::TruncationTooLow {
                longitude_count: self.longitude_count,
            });
        }
        if self.latitude_count > self.longitude_count / 2 {
            return Err(ConfigError::TooManyLatitudes {
                latitude_count: self.latitude_count,
                longitude_count: self.longitude_count,
            });
        }
        // 4. Damping cannot exceed the column.
        if self.damped_level_count > self.level_count {
            return Err(ConfigError::TooManyDampedLevels {
                damped: self.damped_level_count,
                levels: self.level_count,
            });
        }
        // 5. Scalars.
        if !self.time_step_seconds.is_finite() || self.time_step_seconds <= 0.0 {
            return Err(ConfigError::InvalidTimeStep {
                value: self.time_step_seconds,
            });
        }
        if !self.dry_pressure.is_finite() || self.dry_pressure <= 0.0 {
            return Err(ConfigError::InvalidDryPressure {
                value: self.dry_pressure,
            });
        }
        // 6. Constants.
        self.resolve_constants()?;
        Ok(())
    }

    /// Derived spectral resolution.
    pub fn resolution(&self) -> SpectralResolution {
        SpectralResolution::new(self.longitude_count, self.extra_tracer_count)
    }

    /// Grid sizes passed to the kernel.
    pub fn kernel_dims(&self) -> KernelDims {
        let resolution = self.resolution();
        KernelDims {
            latitude_count: self.latitude_count,
            longitude_count: self.longitude_count,
            level_count: self.level_count,
            truncation: resolution.truncation,
            spectral_dimension: resolution.spectral_dimension,
            tracer_count: resolution.tracer_count,
        }
    }

    /// Resolve physical constants from the overrides and the table.
    pub fn resolve_constants(&self) -> Result<PhysicalConstants, ConfigError> {
        Ok(self.constants.resolve(&self.constant_table)?)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// The dynamical core could not be constructed.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Level count other than [`SUPPORTED_LEVEL_COUNT`].
    UnsupportedLevelCount {
        /// The configured level count.
        configured: usize,
    },
    /// A grid dimension is zero.
    ZeroDimension {
        /// Which dimension.
        dimension: &'static str,
    },
    /// Too few longitudes for a truncation of at least one.
    TruncationTooLow {
        /// The configured longitude count.
        longitude_count: usize,
    },
    /// More latitudes than half the longitudes.
    TooManyLatitudes {
        /// The configured latitude count.
        latitude_count: usize,
        /// The configured longitude count.
        longitude_count: usize,
    },
    /// More damped levels than levels.
    TooManyDampedLevels {
        /// The configured damped level count.
        damped: usize,
        /// The configured level count.
        levels: usize,
    },
    /// Time step is not finite and positive.
    InvalidTimeStep {
        /// The rejected value.
        value: f64,
    },
    /// Dry pressure is not finite and positive.
    InvalidDryPressure {
        /// The rejected value.
        value: f64,
    },
    /// A constant is neither overridden nor in the table.
    MissingConstant {
        /// The table key.
        key: String,
    },
    /// A resolved constant is out of range.
    InvalidConstant {
        /// The table key.
        key: String,
        /// The rejected value.
        value: f64,
    },
    /// The kernel failed during setup.
    Kernel(KernelError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLevelCount { configured } => write!(
                f,
                "only {SUPPORTED_LEVEL_COUNT} vertical levels are supported, got {configured}"
            ),
            Self::ZeroDimension { dimension } => {
                write!(f, "{dimension} count must be positive")
            }
            Self::TruncationTooLow { longitude_count } => write!(
                f,
                "{longitude_count} longitudes give a spectral truncation below 1"
            ),
            Self::TooManyLatitudes {
                latitude_count,
                longitude_count,
            } => write!(
                f,
                "{latitude_count} latitudes exceed half of {longitude_count} longitudes"
            ),
            Self::TooManyDampedLevels { damped, levels } => {
                write!(f, "{damped} damped levels exceed {levels} levels")
            }
            Self::InvalidTimeStep { value } => {
                write!(f, "time step must be finite and positive, got {value}")
            }
            Self::InvalidDryPressure { value } => {
                write!(f, "dry pressure must be finite and positive, got {value}")
            }
            Self::MissingConstant { key } => write!(f, "constant '{key}' is not defined"),
            Self::InvalidConstant { key, value } => {
                write!(f, "constant '{key}' is out of range, got {value}")
            }
            Self::Kernel(e) => write!(f, "kernel setup failed: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kernel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KernelError> for ConfigError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

impl From<ConstantError> for ConfigError {
    fn from(e: ConstantError) -> Self {
        match e {
            ConstantError::Missing { key } => Self::MissingConstant { key },
            ConstantError::Invalid { key, value } => Self::InvalidConstant { key, value },
        }
    }
}
