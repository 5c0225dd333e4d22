//! Force models applied to rigid bodies.
//!
//! Each force is a pure function of the body state and the per-step
//! environment snapshot; summation over active forces is commutative, so
//! the net force never depends on registration order.

use crate::constants::{DEFAULT_FALLBACK_AREA_M2, EARTH_ROTATION_RATE, G_ACCEL_MPS2, MIN_VELOCITY_THRESHOLD};
use crate::drag_tables::drag_coefficient;
use crate::environment::Environment;
use crate::math::Vec3;
use crate::rigid_body::RigidBody;
use crate::DragModel;

/// Aerodynamic drag against the relative velocity `v_rel = v − wind`:
/// `F = −0.5 · ρ · |v_rel| · Cd(Mach) · A · v_rel`.
///
/// The drag curve and cross-section come from the body's projectile
/// profile; bodies without one fall back to the configured area and model.
fn drag_force(body: &RigidBody, wind: Vec3, env: &Environment, fallback: &DragProperties) -> Vec3 {
    let v_rel = body.velocity - wind;
    let speed = v_rel.norm();
    if speed < MIN_VELOCITY_THRESHOLD {
        return Vec3::zeros();
    }

    let (area, model) = match body.profile() {
        Some(profile) => (profile.cross_section_area(), profile.drag_model),
        None => (fallback.area, fallback.model),
    };

    let mach = if env.speed_of_sound > MIN_VELOCITY_THRESHOLD {
        speed / env.speed_of_sound
    } else {
        0.0
    };
    let cd = drag_coefficient(mach, model);

    // -0.5 ρ |v_rel|² Cd A v̂_rel, folded to avoid the normalize
    -0.5 * env.air_density * cd * area * speed * v_rel
}

/// Fallback drag parameters for bodies without a projectile profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragProperties {
    /// Cross-section area (m²)
    pub area: f64,
    /// Drag-curve tag
    pub model: DragModel,
}

impl Default for DragProperties {
    fn default() -> Self {
        Self {
            area: DEFAULT_FALLBACK_AREA_M2,
            model: DragModel::G1,
        }
    }
}

/// Constant downward gravity, `F = m · g`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gravity;

impl Gravity {
    fn force(&self, body: &RigidBody, _env: &Environment) -> Vec3 {
        Vec3::new(0.0, -G_ACCEL_MPS2 * body.mass(), 0.0)
    }
}

/// Drag against the snapshot wind (zero wind unless a `Wind` environment
/// provider is registered).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Drag {
    pub fallback: DragProperties,
}

impl Drag {
    pub fn new(fallback_area: f64) -> Self {
        Self {
            fallback: DragProperties {
                area: fallback_area.max(0.0),
                model: DragModel::G1,
            },
        }
    }

    fn force(&self, body: &RigidBody, env: &Environment) -> Vec3 {
        drag_force(body, env.wind, env, &self.fallback)
    }
}

/// Drag against a wind vector owned by the force itself, settable after
/// registration (e.g. from a debug UI) without touching the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindDrag {
    wind: Vec3,
    pub fallback: DragProperties,
}

impl WindDrag {
    pub fn new(wind: Vec3, fallback_area: f64) -> Self {
        Self {
            wind,
            fallback: DragProperties {
                area: fallback_area.max(0.0),
                model: DragModel::G1,
            },
        }
    }

    pub fn wind_velocity(&self) -> Vec3 {
        self.wind
    }

    pub fn set_wind_velocity(&mut self, wind: Vec3) {
        self.wind = wind;
    }

    fn force(&self, body: &RigidBody, env: &Environment) -> Vec3 {
        drag_force(body, self.wind, env, &self.fallback)
    }
}

/// Coriolis force in the local frame, `F = −2 m Ω × v`, with the rotation
/// vector built from the planetary rotation rate and the snapshot latitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coriolis;

impl Coriolis {
    fn force(&self, body: &RigidBody, env: &Environment) -> Vec3 {
        let lat = env.latitude_deg.to_radians();
        let omega = Vec3::new(
            0.0,
            EARTH_ROTATION_RATE * lat.cos(),
            EARTH_ROTATION_RATE * lat.sin(),
        );
        -2.0 * body.mass() * omega.cross(&body.velocity)
    }
}

/// Closed set of force models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Force {
    Gravity(Gravity),
    Drag(Drag),
    WindDrag(WindDrag),
    Coriolis(Coriolis),
}

impl Force {
    /// Symbolic identifier, for diagnostics and display only.
    pub fn name(&self) -> &'static str {
        match self {
            Force::Gravity(_) => "Gravity",
            Force::Drag(_) => "Drag",
            Force::WindDrag(_) => "Wind Drag",
            Force::Coriolis(_) => "Coriolis",
        }
    }

    /// Force on `body` under the environment snapshot `env`, in newtons.
    pub fn force(&self, body: &RigidBody, env: &Environment) -> Vec3 {
        match self {
            Force::Gravity(f) => f.force(body, env),
            Force::Drag(f) => f.force(body, env),
            Force::WindDrag(f) => f.force(body, env),
            Force::Coriolis(f) => f.force(body, env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::ProjectileProfile;

    fn test_projectile() -> RigidBody {
        let mut body = RigidBody::projectile(ProjectileProfile::new(0.05, 0.00762, DragModel::G7));
        body.velocity = Vec3::new(50.0, 0.0, 0.0);
        body
    }

    #[test]
    fn test_gravity_scales_with_mass() {
        let env = Environment::default();
        let light = RigidBody::new(1.0);
        let heavy = RigidBody::new(10.0);
        let f1 = Force::Gravity(Gravity).force(&light, &env);
        let f2 = Force::Gravity(Gravity).force(&heavy, &env);
        assert!((f1.y + G_ACCEL_MPS2).abs() < 1e-9);
        assert!((f2.y - 10.0 * f1.y).abs() < 1e-9);
        assert_eq!(f1.x, 0.0);
        assert_eq!(f1.z, 0.0);
    }

    #[test]
    fn test_drag_opposes_relative_velocity() {
        let env = Environment::default();
        let body = test_projectile();
        let f = Force::Drag(Drag::default()).force(&body, &env);
        assert!(f.x < 0.0, "drag must oppose +x motion: {f:?}");
        assert!(f.y.abs() < 1e-12);
        assert!(f.z.abs() < 1e-12);
    }

    #[test]
    fn test_drag_monotonic_in_density() {
        let body = test_projectile();
        let mut thin = Environment::default();
        thin.air_density = 0.8;
        let mut thick = Environment::default();
        thick.air_density = 1.4;

        let f_thin = Force::Drag(Drag::default()).force(&body, &thin).norm();
        let f_thick = Force::Drag(Drag::default()).force(&body, &thick).norm();
        assert!(f_thick > f_thin);
    }

    #[test]
    fn test_drag_zero_at_rest() {
        let env = Environment::default();
        let body = RigidBody::new(0.05);
        let f = Force::Drag(Drag::default()).force(&body, &env);
        assert_eq!(f, Vec3::zeros());
    }

    #[test]
    fn test_drag_magnitude_matches_formula() {
        let env = Environment::default();
        let body = test_projectile();
        let speed = 50.0_f64;
        let mach = speed / env.speed_of_sound;
        let cd = drag_coefficient(mach, DragModel::G7);
        let area = body.cross_section_area().unwrap();
        let expected = 0.5 * env.air_density * speed * speed * cd * area;

        let f = Force::Drag(Drag::default()).force(&body, &env).norm();
        assert!((f - expected).abs() < 1e-9, "{f} vs {expected}");
    }

    #[test]
    fn test_tailwind_reduces_wind_drag() {
        let env = Environment::default();
        let body = test_projectile();
        let still = WindDrag::new(Vec3::zeros(), 0.01);
        let tailwind = WindDrag::new(Vec3::new(10.0, 0.0, 0.0), 0.01);
        let f_still = Force::WindDrag(still).force(&body, &env).norm();
        let f_tail = Force::WindDrag(tailwind).force(&body, &env).norm();
        assert!(f_tail < f_still);
    }

    #[test]
    fn test_wind_drag_settable() {
        let mut wind_drag = WindDrag::new(Vec3::zeros(), 0.01);
        wind_drag.set_wind_velocity(Vec3::new(-3.0, 0.0, 1.0));
        assert_eq!(wind_drag.wind_velocity(), Vec3::new(-3.0, 0.0, 1.0));
    }

    #[test]
    fn test_coriolis_perpendicular_to_velocity() {
        let mut env = Environment::default();
        env.latitude_deg = 45.0;
        let body = test_projectile();
        let f = Force::Coriolis(Coriolis).force(&body, &env);
        assert!(f.norm() > 0.0);
        assert!(f.dot(&body.velocity).abs() < 1e-9);
    }

    #[test]
    fn test_coriolis_vanishes_at_rest() {
        let mut env = Environment::default();
        env.latitude_deg = 45.0;
        let body = RigidBody::new(1.0);
        let f = Force::Coriolis(Coriolis).force(&body, &env);
        assert_eq!(f, Vec3::zeros());
    }
}
