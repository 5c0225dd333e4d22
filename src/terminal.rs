//! Terminal ballistics: what happens when a projectile meets a material.
//!
//! The resolver turns a contact plus an optional target material into one
//! of three outcomes (ricochet, penetration, embed) and a residual
//! velocity, then applies the outcome to the body with a small positional
//! nudge so the same contact is not re-reported next tick.

use serde::{Deserialize, Serialize};

use crate::collision::ContactInfo;
use crate::constants::{
    MIN_VELOCITY_THRESHOLD, PENETRATION_MARGIN_M, RICOCHET_NUDGE_M, TERMINAL_FALLBACK_AREA_M2,
};
use crate::math::Vec3;
use crate::rigid_body::RigidBody;

/// Terminal-ballistics description of a target material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Bulk density (kg/m³)
    pub density: f64,
    /// Slab thickness along the penetration channel (m)
    pub thickness: f64,
    /// Resistance to penetration (Pa); absorbed energy scales with it
    pub strength: f64,
    /// Incidence angle from the surface normal above which grazing
    /// impacts may ricochet (degrees)
    pub critical_angle_deg: f64,
    /// Velocity retained on ricochet, 0..=1
    pub restitution: f64,
    /// Ricochet is only allowed while kinetic energy stays below this
    /// multiple of the absorption capacity
    pub ricochet_energy_factor: f64,
}

impl Material {
    pub fn new(
        density: f64,
        thickness: f64,
        strength: f64,
        critical_angle_deg: f64,
        restitution: f64,
        ricochet_energy_factor: f64,
    ) -> Self {
        Self {
            density: density.max(0.0),
            thickness: thickness.max(0.0),
            strength: strength.max(0.0),
            critical_angle_deg: critical_angle_deg.clamp(0.0, 90.0),
            restitution: restitution.clamp(0.0, 1.0),
            ricochet_energy_factor: ricochet_energy_factor.max(0.0),
        }
    }

    pub fn wood() -> Self {
        Self::new(700.0, 0.05, 4.0e6, 55.0, 0.3, 1.5)
    }

    pub fn concrete() -> Self {
        Self::new(2400.0, 0.1, 2.0e8, 70.0, 0.2, 1.2)
    }

    pub fn steel() -> Self {
        Self::new(7850.0, 0.01, 1.0e9, 50.0, 0.6, 3.0)
    }

    pub fn soil() -> Self {
        Self::new(1600.0, 0.5, 4.0e6, 75.0, 0.1, 1.0)
    }

    /// Energy (J) the slab can absorb along a penetration channel of the
    /// given cross-section.
    pub fn absorption_capacity(&self, channel_area: f64) -> f64 {
        self.strength * self.thickness * channel_area.max(0.0)
    }
}

/// Outcome class of an impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactOutcome {
    Ricochet,
    Penetration,
    Embed,
}

/// Resolved impact: the outcome plus the velocity the body keeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactResult {
    pub outcome: ImpactOutcome,
    pub residual_velocity: Vec3,
}

/// Stateless impact resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactResolver;

impl ImpactResolver {
    /// Classify an impact against `material`.
    ///
    /// A missing material is a hard stop: the body embeds where it is.
    /// Otherwise the decision runs in order: if kinetic energy does not
    /// exceed the absorption capacity the body embeds; a grazing impact
    /// (incidence beyond the critical angle) with bounded energy
    /// ricochets; everything else penetrates with the residual speed set
    /// by the energy left after absorption.
    pub fn resolve(
        &self,
        body: &RigidBody,
        contact: &ContactInfo,
        material: Option<&Material>,
    ) -> ImpactResult {
        let embed = ImpactResult {
            outcome: ImpactOutcome::Embed,
            residual_velocity: Vec3::zeros(),
        };

        let material = match material {
            Some(m) => m,
            None => return embed,
        };

        let speed = body.velocity.norm();
        if speed < MIN_VELOCITY_THRESHOLD {
            return embed;
        }

        let channel_area = body
            .cross_section_area()
            .unwrap_or(TERMINAL_FALLBACK_AREA_M2);
        let capacity = material.absorption_capacity(channel_area);
        let energy = body.kinetic_energy();

        if energy <= capacity {
            return embed;
        }

        let direction = body.velocity / speed;
        let incidence_deg = (-direction.dot(&contact.normal)).clamp(-1.0, 1.0).acos().to_degrees();

        if incidence_deg > material.critical_angle_deg
            && energy < material.ricochet_energy_factor * capacity
        {
            let reflected =
                body.velocity - 2.0 * body.velocity.dot(&contact.normal) * contact.normal;
            return ImpactResult {
                outcome: ImpactOutcome::Ricochet,
                residual_velocity: reflected * material.restitution,
            };
        }

        let residual_speed_sq = speed * speed - 2.0 * capacity / body.mass();
        let residual_speed = residual_speed_sq.max(0.0).sqrt();
        ImpactResult {
            outcome: ImpactOutcome::Penetration,
            residual_velocity: direction * residual_speed,
        }
    }

    /// Write a resolved impact back onto the body.
    ///
    /// Ricochets and penetrations nudge the position clear of the contact
    /// so detection does not report the same overlap again; embeds ground
    /// the body in place, excluding it from further integration.
    pub fn apply(&self, body: &mut RigidBody, contact: &ContactInfo, result: &ImpactResult) {
        match result.outcome {
            ImpactOutcome::Ricochet => {
                body.velocity = result.residual_velocity;
                body.position += contact.normal * (contact.penetration + RICOCHET_NUDGE_M);
            }
            ImpactOutcome::Penetration => {
                body.velocity = result.residual_velocity;
                let speed = result.residual_velocity.norm();
                let direction = if speed > MIN_VELOCITY_THRESHOLD {
                    result.residual_velocity / speed
                } else {
                    -contact.normal
                };
                body.position += direction * (contact.penetration + PENETRATION_MARGIN_M);
            }
            ImpactOutcome::Embed => {
                body.velocity = Vec3::zeros();
                body.grounded = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag_model::DragModel;
    use crate::rigid_body::ProjectileProfile;

    fn contact_facing(normal: Vec3) -> ContactInfo {
        ContactInfo {
            normal,
            penetration: 0.01,
        }
    }

    fn projectile(speed: f64, direction: Vec3) -> RigidBody {
        let mut body = RigidBody::projectile(ProjectileProfile::new(0.05, 0.00762, DragModel::G1));
        body.velocity = direction.normalize() * speed;
        body
    }

    #[test]
    fn test_missing_material_hard_stop() {
        let mut body = projectile(50.0, Vec3::x());
        let contact = contact_facing(-Vec3::x());
        let resolver = ImpactResolver;

        let result = resolver.resolve(&body, &contact, None);
        assert_eq!(result.outcome, ImpactOutcome::Embed);

        resolver.apply(&mut body, &contact, &result);
        assert_eq!(body.velocity, Vec3::zeros());
        assert!(body.grounded);
    }

    #[test]
    fn test_low_energy_embeds() {
        // E = 62.5 J, soil capacity ≈ 91 J over the 7.62 mm channel
        let body = projectile(50.0, Vec3::x());
        let result = ImpactResolver.resolve(&body, &contact_facing(-Vec3::x()), Some(&Material::soil()));
        assert_eq!(result.outcome, ImpactOutcome::Embed);
        assert_eq!(result.residual_velocity, Vec3::zeros());
    }

    #[test]
    fn test_head_on_overmatch_penetrates() {
        // E = 62.5 J, wood capacity ≈ 9.1 J over the 7.62 mm channel
        let body = projectile(50.0, Vec3::x());
        let material = Material::wood();
        let result = ImpactResolver.resolve(&body, &contact_facing(-Vec3::x()), Some(&material));

        assert_eq!(result.outcome, ImpactOutcome::Penetration);
        let area = body.cross_section_area().unwrap();
        let expected = (2500.0 - 2.0 * material.absorption_capacity(area) / 0.05).sqrt();
        assert!((result.residual_velocity.norm() - expected).abs() < 1e-9);
        // direction preserved
        assert!(result.residual_velocity.x > 0.0);
        assert!(result.residual_velocity.y.abs() < 1e-12);
    }

    #[test]
    fn test_grazing_impact_ricochets() {
        // incidence ≈ 84° off the normal, energy between capacity and
        // factor·capacity for steel
        let mut direction = Vec3::new(1.0, -0.1, 0.0);
        direction = direction.normalize();
        let material = Material::steel();
        let area = ProjectileProfile::new(0.05, 0.00762, DragModel::G1).cross_section_area();
        let capacity = material.absorption_capacity(area);

        // pick a speed with capacity < E < factor·capacity
        let energy = 2.0 * capacity;
        let speed = (2.0 * energy / 0.05).sqrt();
        let body = projectile(speed, direction);
        let contact = contact_facing(Vec3::y());

        let result = ImpactResolver.resolve(&body, &contact, Some(&material));
        assert_eq!(result.outcome, ImpactOutcome::Ricochet);
        // vertical component reflected, scaled by restitution
        assert!(result.residual_velocity.y > 0.0);
        assert!(
            (result.residual_velocity.norm() - speed * material.restitution).abs() < 1e-9
        );
    }

    #[test]
    fn test_grazing_but_overpowered_penetrates() {
        // same grazing geometry but energy above the ricochet bound
        let direction = Vec3::new(1.0, -0.1, 0.0).normalize();
        let material = Material::wood();
        let area = ProjectileProfile::new(0.05, 0.00762, DragModel::G1).cross_section_area();
        let capacity = material.absorption_capacity(area);

        let energy = material.ricochet_energy_factor * capacity * 4.0;
        let speed = (2.0 * energy / 0.05).sqrt();
        let body = projectile(speed, direction);

        let result = ImpactResolver.resolve(&body, &contact_facing(Vec3::y()), Some(&material));
        assert_eq!(result.outcome, ImpactOutcome::Penetration);
    }

    #[test]
    fn test_steep_impact_never_ricochets() {
        // head-on incidence is 0°, well under any critical angle
        let material = Material::steel();
        let area = ProjectileProfile::new(0.05, 0.00762, DragModel::G1).cross_section_area();
        let capacity = material.absorption_capacity(area);
        let speed = (2.0 * 2.0 * capacity / 0.05).sqrt();
        let body = projectile(speed, Vec3::x());

        let result = ImpactResolver.resolve(&body, &contact_facing(-Vec3::x()), Some(&material));
        assert_eq!(result.outcome, ImpactOutcome::Penetration);
    }

    #[test]
    fn test_penetration_residual_clamped_at_zero() {
        // capacity slightly above E would embed; force the boundary by a
        // material whose capacity equals E exactly
        let body = projectile(50.0, Vec3::x());
        let area = body.cross_section_area().unwrap();
        let energy = body.kinetic_energy();
        let material = Material::new(1000.0, 1.0, energy / area, 55.0, 0.3, 1.5);

        let result = ImpactResolver.resolve(&body, &contact_facing(-Vec3::x()), Some(&material));
        assert_eq!(result.outcome, ImpactOutcome::Embed);
    }

    #[test]
    fn test_apply_penetration_nudges_through() {
        let mut body = projectile(50.0, Vec3::x());
        let contact = contact_facing(-Vec3::x());
        let resolver = ImpactResolver;
        let result = resolver.resolve(&body, &contact, Some(&Material::wood()));
        assert_eq!(result.outcome, ImpactOutcome::Penetration);

        let x_before = body.position.x;
        resolver.apply(&mut body, &contact, &result);
        assert!(body.position.x > x_before + contact.penetration);
        assert!(!body.grounded);
    }

    #[test]
    fn test_apply_ricochet_nudges_along_normal() {
        let direction = Vec3::new(1.0, -0.1, 0.0).normalize();
        let material = Material::steel();
        let area = ProjectileProfile::new(0.05, 0.00762, DragModel::G1).cross_section_area();
        let speed = (2.0 * 2.0 * material.absorption_capacity(area) / 0.05).sqrt();
        let mut body = projectile(speed, direction);
        let contact = contact_facing(Vec3::y());

        let resolver = ImpactResolver;
        let result = resolver.resolve(&body, &contact, Some(&material));
        assert_eq!(result.outcome, ImpactOutcome::Ricochet);

        let y_before = body.position.y;
        resolver.apply(&mut body, &contact, &result);
        assert!(body.position.y > y_before + contact.penetration);
        assert!(body.velocity.y > 0.0);
    }

    #[test]
    fn test_material_clamps() {
        let m = Material::new(-1.0, -0.1, -5.0, 120.0, 1.5, -2.0);
        assert_eq!(m.density, 0.0);
        assert_eq!(m.thickness, 0.0);
        assert_eq!(m.strength, 0.0);
        assert_eq!(m.critical_angle_deg, 90.0);
        assert_eq!(m.restitution, 1.0);
        assert_eq!(m.ricochet_energy_factor, 0.0);
    }

    #[test]
    fn test_named_materials_serialize() {
        let json = serde_json::to_string(&Material::concrete()).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Material::concrete());
    }
}
