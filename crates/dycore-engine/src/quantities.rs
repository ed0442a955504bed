//! Declared quantity names, units and axis names.

/// Eastward wind.
pub const EASTWARD_WIND: &str = "eastward_wind";
/// Northward wind.
pub const NORTHWARD_WIND: &str = "northward_wind";
/// Air temperature.
pub const AIR_TEMPERATURE: &str = "air_temperature";
/// Surface air pressure.
pub const SURFACE_AIR_PRESSURE: &str = "surface_air_pressure";
/// Air pressure at mid levels.
pub const AIR_PRESSURE: &str = "air_pressure";
/// Air pressure at level interfaces.
pub const AIR_PRESSURE_ON_INTERFACE_LEVELS: &str = "air_pressure_on_interface_levels";
/// Specific humidity.
pub const SPECIFIC_HUMIDITY: &str = "specific_humidity";
/// Surface geopotential.
pub const SURFACE_GEOPOTENTIAL: &str = "surface_geopotential";
/// Relative vorticity.
pub const RELATIVE_VORTICITY: &str = "atmosphere_relative_vorticity";
/// Divergence of wind.
pub const DIVERGENCE_OF_WIND: &str = "divergence_of_wind";
/// Ozone mole fraction.
pub const OZONE_MOLE_FRACTION: &str = "mole_fraction_of_ozone_in_air";
/// Cloud ice mass content.
pub const CLOUD_ICE: &str = "mass_content_of_cloud_ice_in_atmosphere_layer";
/// Cloud liquid water mass content.
pub const CLOUD_LIQUID_WATER: &str = "mass_content_of_cloud_liquid_water_in_atmosphere_layer";
/// All advected tracers in one array.
pub const TRACER_BUNDLE: &str = "tracer_bundle";

/// Longitude axis.
pub const LONGITUDE_DIM: &str = "longitude";
/// Latitude axis.
pub const LATITUDE_DIM: &str = "latitude";
/// Mid-level axis.
pub const MID_LEVELS_DIM: &str = "mid_levels";
/// Interface-level axis.
pub const INTERFACE_LEVELS_DIM: &str = "interface_levels";
/// Tracer slot axis.
pub const TRACER_DIM: &str = "tracer_number";

/// Where a quantity lives on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// `(longitude, latitude)`.
    Surface,
    /// `(longitude, latitude, mid_levels)`.
    MidLevels,
    /// `(longitude, latitude, interface_levels)`.
    InterfaceLevels,
    /// `(longitude, latitude, mid_levels, tracer_number)`.
    Tracers,
}

impl Placement {
    /// Axis names for this placement.
    pub fn dims(self) -> &'static [&'static str] {
        match self {
            Self::Surface => &[LONGITUDE_DIM, LATITUDE_DIM],
            Self::MidLevels => &[LONGITUDE_DIM, LATITUDE_DIM, MID_LEVELS_DIM],
            Self::InterfaceLevels => &[LONGITUDE_DIM, LATITUDE_DIM, INTERFACE_LEVELS_DIM],
            Self::Tracers => &[LONGITUDE_DIM, LATITUDE_DIM, MID_LEVELS_DIM, TRACER_DIM],
        }
    }
}

/// A declared quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantitySpec {
    /// Quantity name.
    pub name: &'static str,
    /// Unit string.
    pub units: &'static str,
    /// Grid placement.
    pub placement: Placement,
}

const fn spec(name: &'static str, units: &'static str, placement: Placement) -> QuantitySpec {
    QuantitySpec {
        name,
        units,
        placement,
    }
}

/// Quantities the dynamical core reads.
pub const INPUT_QUANTITIES: [QuantitySpec; 14] = [
    spec(EASTWARD_WIND, "m s^-1", Placement::MidLevels),
    spec(NORTHWARD_WIND, "m s^-1", Placement::MidLevels),
    spec(AIR_TEMPERATURE, "degK", Placement::MidLevels),
    spec(SURFACE_AIR_PRESSURE, "Pa", Placement::Surface),
    spec(AIR_PRESSURE, "Pa", Placement::MidLevels),
    spec(AIR_PRESSURE_ON_INTERFACE_LEVELS, "Pa", Placement::InterfaceLevels),
    spec(SPECIFIC_HUMIDITY, "kg kg^-1", Placement::MidLevels),
    spec(SURFACE_GEOPOTENTIAL, "m^2 s^-2", Placement::Surface),
    spec(RELATIVE_VORTICITY, "s^-1", Placement::MidLevels),
    spec(DIVERGENCE_OF_WIND, "s^-1", Placement::MidLevels),
    spec(OZONE_MOLE_FRACTION, "dimensionless", Placement::MidLevels),
    spec(CLOUD_ICE, "g m^-2", Placement::MidLevels),
    spec(CLOUD_LIQUID_WATER, "g m^-2", Placement::MidLevels),
    spec(TRACER_BUNDLE, "dimensionless", Placement::Tracers),
];

/// Quantities the dynamical core returns: the inputs minus the surface
/// geopotential, vorticity and divergence driving fields.
pub const OUTPUT_QUANTITIES: [QuantitySpec; 11] = [
    spec(EASTWARD_WIND, "m s^-1", Placement::MidLevels),
    spec(NORTHWARD_WIND, "m s^-1", Placement::MidLevels),
    spec(AIR_TEMPERATURE, "degK", Placement::MidLevels),
    spec(SURFACE_AIR_PRESSURE, "Pa", Placement::Surface),
    spec(AIR_PRESSURE, "Pa", Placement::MidLevels),
    spec(AIR_PRESSURE_ON_INTERFACE_LEVELS, "Pa", Placement::InterfaceLevels),
    spec(SPECIFIC_HUMIDITY, "kg kg^-1", Placement::MidLevels),
    spec(OZONE_MOLE_FRACTION, "dimensionless", Placement::MidLevels),
    spec(CLOUD_ICE, "g m^-2", Placement::MidLevels),
    spec(CLOUD_LIQUID_WATER, "g m^-2", Placement::MidLevels),
    spec(TRACER_BUNDLE, "dimensionless", Placement::Tracers),
];

/// Quantities whose tendencies reach the kernel, in assembly order.
pub const TENDENCY_QUANTITIES: [&str; 6] = [
    AIR_TEMPERATURE,
    SPECIFIC_HUMIDITY,
    EASTWARD_WIND,
    NORTHWARD_WIND,
    SURFACE_AIR_PRESSURE,
    TRACER_BUNDLE,
];
