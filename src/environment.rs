//! Environment providers and the per-step environment snapshot.
//!
//! Providers are registered on the [`PhysicsWorld`](crate::PhysicsWorld)
//! and folded into an [`Environment`] snapshot once per integration step,
//! so every force evaluation within a (possibly multi-stage) step sees the
//! same ambient state.

use crate::constants::{
    G_ACCEL_MPS2, R_DRY_AIR, R_WATER_VAPOR, SPEED_OF_SOUND_MPS, STANDARD_AIR_DENSITY,
    STANDARD_PRESSURE_PA, STANDARD_TEMPERATURE_K, TROPOSPHERE_LAPSE_RATE,
};
use crate::math::Vec3;

/// Ambient parameters consumed by forces. Assembled by the registry from
/// the registered providers; defaults are ICAO standard sea-level values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub air_density: f64,
    pub speed_of_sound: f64,
    pub wind: Vec3,
    pub latitude_deg: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature_k: STANDARD_TEMPERATURE_K,
            pressure_pa: STANDARD_PRESSURE_PA,
            air_density: STANDARD_AIR_DENSITY,
            speed_of_sound: SPEED_OF_SOUND_MPS,
            wind: Vec3::zeros(),
            latitude_deg: 0.0,
        }
    }
}

/// Atmospheric conditions: sea-level temperature and pressure plus the
/// simulation altitude, folded into air density via the barometric relation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Sea-level temperature (K)
    pub temperature_k: f64,
    /// Sea-level pressure (Pa)
    pub pressure_pa: f64,
    /// Altitude of the simulated scene (m)
    pub altitude_m: f64,
}

impl Atmosphere {
    pub fn new(temperature_k: f64, pressure_pa: f64) -> Self {
        Self {
            temperature_k: temperature_k.max(1.0),
            pressure_pa: pressure_pa.max(0.0),
            altitude_m: 0.0,
        }
    }

    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = altitude_m;
        self
    }

    fn apply(&self, env: &mut Environment) {
        // tropospheric lapse-rate relation from the configured base
        let temp_k = (self.temperature_k + TROPOSPHERE_LAPSE_RATE * self.altitude_m).max(1.0);
        let temp_ratio = temp_k / self.temperature_k;
        let pressure_pa =
            self.pressure_pa * temp_ratio.powf(-G_ACCEL_MPS2 / (TROPOSPHERE_LAPSE_RATE * R_DRY_AIR));

        env.temperature_k = temp_k;
        env.pressure_pa = pressure_pa;
        env.air_density = pressure_pa / (R_DRY_AIR * temp_k);
        env.speed_of_sound = (temp_k * 401.874).sqrt();
    }
}

/// Relative humidity; lowers air density for the water-vapor partial
/// pressure at the snapshot's temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Humidity {
    percent: f64,
}

impl Humidity {
    pub fn new(percent: f64) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn set_percent(&mut self, percent: f64) {
        self.percent = percent.clamp(0.0, 100.0);
    }

    fn apply(&self, env: &mut Environment) {
        let temp_c = env.temperature_k - 273.15;

        // saturation vapor pressure, Arden Buck equation (hPa)
        let es_hpa = if temp_c >= 0.0 {
            6.1121 * ((18.678 - temp_c / 234.5) * (temp_c / (257.14 + temp_c))).exp()
        } else {
            6.1115 * ((23.036 - temp_c / 333.7) * (temp_c / (279.82 + temp_c))).exp()
        };

        let vapor_pressure_pa = self.percent / 100.0 * es_hpa * 100.0;
        let dry_pressure_pa = (env.pressure_pa - vapor_pressure_pa).max(0.0);

        // two-gas mixture; vapor is lighter than dry air, density drops
        env.air_density = dry_pressure_pa / (R_DRY_AIR * env.temperature_k)
            + vapor_pressure_pa / (R_WATER_VAPOR * env.temperature_k);
    }
}

/// Geographic position; latitude feeds the Coriolis force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geography {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Geography {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg: latitude_deg.clamp(-90.0, 90.0),
            longitude_deg,
        }
    }

    fn apply(&self, env: &mut Environment) {
        env.latitude_deg = self.latitude_deg;
    }
}

/// Constant ambient wind, mutable after registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    pub velocity: Vec3,
}

impl Wind {
    pub fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn apply(&self, env: &mut Environment) {
        env.wind = self.velocity;
    }
}

/// Closed set of environment providers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvironmentModel {
    Atmosphere(Atmosphere),
    Humidity(Humidity),
    Geography(Geography),
    Wind(Wind),
}

impl EnvironmentModel {
    pub fn name(&self) -> &'static str {
        match self {
            EnvironmentModel::Atmosphere(_) => "Atmosphere",
            EnvironmentModel::Humidity(_) => "Humidity",
            EnvironmentModel::Geography(_) => "Geography",
            EnvironmentModel::Wind(_) => "Wind",
        }
    }

    pub(crate) fn apply(&self, env: &mut Environment) {
        match self {
            EnvironmentModel::Atmosphere(a) => a.apply(env),
            EnvironmentModel::Humidity(h) => h.apply(env),
            EnvironmentModel::Geography(g) => g.apply(env),
            EnvironmentModel::Wind(w) => w.apply(env),
        }
    }
}
