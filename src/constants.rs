//! Physical and numerical constants used across the simulation core.

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Standard air density at sea level (kg/m³)
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Speed of sound at sea level, standard atmospheric conditions (m/s)
///
/// Conditions: 15°C, 1013.25 hPa, dry air. Follows the ICAO Standard
/// Atmosphere; Mach numbers for drag-curve lookup are computed against the
/// environment snapshot's speed of sound, which defaults to this value.
pub const SPEED_OF_SOUND_MPS: f64 = 340.29;

/// Earth's rotation rate (rad/s), used by the Coriolis force
pub const EARTH_ROTATION_RATE: f64 = 7.2921159e-5;

/// Specific gas constant for dry air (J/(kg·K))
pub const R_DRY_AIR: f64 = 287.05;

/// Specific gas constant for water vapor (J/(kg·K))
pub const R_WATER_VAPOR: f64 = 461.495;

/// Tropospheric temperature lapse rate (K/m)
pub const TROPOSPHERE_LAPSE_RATE: f64 = -0.0065;

/// ICAO standard sea-level temperature (K)
pub const STANDARD_TEMPERATURE_K: f64 = 288.15;

/// ICAO standard sea-level pressure (Pa)
pub const STANDARD_PRESSURE_PA: f64 = 101325.0;

// Numerical stability constants

/// Minimum velocity magnitude below which direction computations are skipped
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-6;

/// Minimum squared speed for orienting a collider from its velocity
pub const MIN_ORIENT_SPEED_SQ: f64 = 1e-6;

/// Smallest mass a rigid body may carry; non-positive masses are clamped
/// here at construction instead of propagating NaN through integration
pub const MIN_BODY_MASS_KG: f64 = 1e-6;

/// Contacts shallower than this are not reported (avoids contact jitter)
pub const CONTACT_EPSILON: f64 = 1e-4;

/// Cross-product separating axes shorter than this are degenerate (the two
/// edge directions are parallel) and skipped
pub const MIN_AXIS_LENGTH: f64 = 1e-6;

/// Cross-section area (m²) used for drag on bodies without a projectile
/// profile; matches the preset layer's default projectile area
pub const DEFAULT_FALLBACK_AREA_M2: f64 = 0.01;

/// Channel area (m²) assumed by the impact resolver for bodies without a
/// projectile profile (≈ 1 cm² wound channel)
pub const TERMINAL_FALLBACK_AREA_M2: f64 = 1e-4;

/// Outward nudge past the contact point after a ricochet (m)
pub const RICOCHET_NUDGE_M: f64 = 1e-3;

/// Forward margin past the struck surface after a penetration (m)
pub const PENETRATION_MARGIN_M: f64 = 0.05;
