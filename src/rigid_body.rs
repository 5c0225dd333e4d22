//! Rigid body state and the optional projectile profile.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_BODY_MASS_KG;
use crate::math::{velocity_from_angles, Vec3};
use crate::DragModel;

/// Projectile-specific parameters attached to a rigid body.
///
/// Presence of a profile is what opts a body into projectile behavior
/// (drag-curve lookup, orientation-from-velocity, terminal ballistics) —
/// composition instead of a specialized body subtype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileProfile {
    /// Projectile mass (kg)
    pub mass: f64,
    /// Projectile diameter (m)
    pub diameter: f64,
    /// Drag-curve tag used for Cd lookup
    pub drag_model: DragModel,
}

impl ProjectileProfile {
    pub fn new(mass: f64, diameter: f64, drag_model: DragModel) -> Self {
        Self {
            mass: mass.max(MIN_BODY_MASS_KG),
            diameter: diameter.max(0.0),
            drag_model,
        }
    }

    /// Frontal cross-section area (m²)
    pub fn cross_section_area(&self) -> f64 {
        std::f64::consts::PI * (self.diameter / 2.0).powi(2)
    }
}

/// A point-mass rigid body advanced by the integrator.
///
/// Position and velocity are mutated only by the integrator and, on
/// impact, by the terminal-ballistics resolver. A grounded body is
/// excluded from integration until externally reset.
#[derive(Debug, Clone)]
pub struct RigidBody {
    mass: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    profile: Option<ProjectileProfile>,
}

impl RigidBody {
    /// Create a body with the given mass; non-positive masses are clamped
    /// to a minimum positive value rather than rejected.
    pub fn new(mass: f64) -> Self {
        Self {
            mass: mass.max(MIN_BODY_MASS_KG),
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            grounded: false,
            profile: None,
        }
    }

    /// Create a projectile body; mass comes from the profile.
    pub fn projectile(profile: ProjectileProfile) -> Self {
        let mut body = Self::new(profile.mass);
        body.profile = Some(profile);
        body
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass.max(MIN_BODY_MASS_KG);
    }

    pub fn profile(&self) -> Option<&ProjectileProfile> {
        self.profile.as_ref()
    }

    pub fn is_projectile(&self) -> bool {
        self.profile.is_some()
    }

    /// Set velocity from launch parameters (speed in m/s, angles in degrees).
    pub fn set_velocity_from_angles(&mut self, speed: f64, elevation_deg: f64, azimuth_deg: f64) {
        self.velocity = velocity_from_angles(speed, elevation_deg, azimuth_deg);
    }

    /// Kinetic energy in joules
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Cross-section area from the attached profile, if any
    pub fn cross_section_area(&self) -> Option<f64> {
        self.profile.map(|p| p.cross_section_area())
    }
}
