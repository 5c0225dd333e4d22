//! Projectile flight and terminal ballistics simulation core.
//!
//! The crate is organized around a fixed-timestep [`Simulation`] session:
//! forces and environment providers are registered on a [`PhysicsWorld`],
//! an [`Integrator`] strategy advances each [`RigidBody`], convex
//! collision detection reports contacts, and the [`ImpactResolver`]
//! decides whether an impact ricochets, penetrates or embeds.
//!
//! # Example
//!
//! ```
//! use projectile_sim::{
//!     presets, Collider, Material, ProjectileProfile, RealismLevel, RigidBody, Simulation, Vec3,
//!     DragModel,
//! };
//!
//! let mut sim = Simulation::new();
//! presets::configure(sim.world_mut(), RealismLevel::Full, 0.01);
//!
//! let mut body = RigidBody::projectile(ProjectileProfile::new(0.05, 0.00762, DragModel::G7));
//! body.position = Vec3::new(0.0, 1.5, 0.0);
//! body.set_velocity_from_angles(50.0, 0.0, 90.0);
//! let id = sim.spawn_with_collider(body, Some(Collider::cuboid(Vec3::new(0.01, 0.004, 0.004))));
//!
//! let mut wall = Collider::cuboid(Vec3::new(0.05, 2.0, 2.0)).with_material(Material::wood());
//! wall.set_position(Vec3::new(20.0, 1.0, 0.0));
//! sim.add_obstacle(wall);
//! sim.add_obstacle(Collider::ground(0.0));
//!
//! while !sim.body(id).unwrap().grounded {
//!     if sim.advance(1.0 / 60.0) == 0 && sim.has_impacted(id) {
//!         break;
//!     }
//! }
//! ```

pub mod collision;
pub mod constants;
pub mod drag_model;
pub mod drag_tables;
pub mod environment;
pub mod forces;
pub mod integrator;
pub mod math;
pub mod presets;
pub mod rigid_body;
pub mod simulation;
pub mod terminal;
pub mod world;

pub use collision::{Collider, ColliderShape, CollisionDetection, ContactInfo, Manifold};
pub use drag_model::DragModel;
pub use drag_tables::{drag_coefficient, DragTable};
pub use environment::{Atmosphere, Environment, EnvironmentModel, Geography, Humidity, Wind};
pub use forces::{Coriolis, Drag, DragProperties, Force, Gravity, WindDrag};
pub use integrator::{EulerIntegrator, Integrator, MidpointIntegrator, Rk4Integrator};
pub use math::{velocity_from_angles, Vec3};
pub use presets::{PresetHandles, RealismLevel};
pub use rigid_body::{ProjectileProfile, RigidBody};
pub use simulation::{BodyId, Simulation, DEFAULT_FIXED_DT, DEFAULT_MAX_STEPS_PER_FRAME};
pub use terminal::{ImpactOutcome, ImpactResolver, ImpactResult, Material};
pub use world::{EnvironmentHandle, ForceHandle, PhysicsWorld};
