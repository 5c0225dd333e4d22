//! Fixed-timestep simulation session.
//!
//! A session owns the force registry, the integrator, the collision set
//! and every body it has spawned. Wall-clock frame time is fed through an
//! accumulator and consumed in fixed 1 ms ticks, so trajectories are
//! reproducible regardless of frame pacing.

use crate::collision::{Collider, CollisionDetection, Manifold};
use crate::constants::MIN_ORIENT_SPEED_SQ;
use crate::integrator::{Integrator, Rk4Integrator};
use crate::math::orthonormal_axes_from_direction;
use crate::rigid_body::RigidBody;
use crate::terminal::ImpactResolver;
use crate::world::PhysicsWorld;

pub const DEFAULT_FIXED_DT: f64 = 1.0 / 1000.0;
pub const DEFAULT_MAX_STEPS_PER_FRAME: usize = 50;

/// Stable identifier for a body spawned into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

struct Entry {
    body: RigidBody,
    collider: Option<Collider>,
    impacted: bool,
}

/// Simulation session: bodies, obstacles, forces and time.
pub struct Simulation {
    world: PhysicsWorld,
    integrator: Box<dyn Integrator>,
    detection: CollisionDetection,
    resolver: ImpactResolver,
    entries: Vec<Entry>,
    obstacles: Vec<Collider>,
    accumulator: f64,
    fixed_dt: f64,
    max_steps_per_frame: usize,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            world: PhysicsWorld::new(),
            integrator: Box::new(Rk4Integrator),
            detection: CollisionDetection::new(),
            resolver: ImpactResolver,
            entries: Vec::new(),
            obstacles: Vec::new(),
            accumulator: 0.0,
            fixed_dt: DEFAULT_FIXED_DT,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
        }
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn set_integrator(&mut self, integrator: Box<dyn Integrator>) {
        self.integrator = integrator;
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Change the tick length. Non-positive values are ignored.
    pub fn set_fixed_dt(&mut self, dt: f64) {
        if dt > 0.0 {
            self.fixed_dt = dt;
        }
    }

    /// Spawn a body without a collider; it flies but never collides.
    pub fn spawn(&mut self, body: RigidBody) -> BodyId {
        self.spawn_with_collider(body, None)
    }

    /// Spawn a body with an optional collider tracking its transform.
    pub fn spawn_with_collider(&mut self, body: RigidBody, collider: Option<Collider>) -> BodyId {
        self.entries.push(Entry {
            body,
            collider,
            impacted: false,
        });
        BodyId(self.entries.len() - 1)
    }

    /// Register a static obstacle (wall, ground plane, target slab).
    pub fn add_obstacle(&mut self, collider: Collider) {
        self.obstacles.push(collider);
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.entries.get(id.0).map(|entry| &entry.body)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.entries.get_mut(id.0).map(|entry| &mut entry.body)
    }

    /// Whether this body has resolved an impact at some point.
    pub fn has_impacted(&self, id: BodyId) -> bool {
        self.entries.get(id.0).map(|e| e.impacted).unwrap_or(false)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &RigidBody> {
        self.entries.iter().map(|entry| &entry.body)
    }

    /// Feed a frame's worth of wall-clock time; returns the number of
    /// fixed ticks executed.
    ///
    /// At most `max_steps_per_frame` ticks run per call; if the frame owed
    /// more than that, the remainder is discarded rather than carried, so
    /// a long stall slows the simulation instead of spiraling it.
    pub fn advance(&mut self, frame_dt: f64) -> usize {
        self.accumulator += frame_dt.max(0.0);

        // repeated subtraction leaves float residue on the accumulator, so
        // a full step is recognized within a relative tolerance
        let slack = self.fixed_dt * 1e-9;
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt - slack && steps < self.max_steps_per_frame {
            self.tick();
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        if steps == self.max_steps_per_frame && self.accumulator >= self.fixed_dt - slack {
            self.accumulator = 0.0;
        }

        steps
    }

    /// One fixed step: integrate, sync colliders, detect, resolve impacts.
    fn tick(&mut self) {
        for entry in &mut self.entries {
            self.integrator.step(&mut entry.body, &self.world, self.fixed_dt);

            if let Some(collider) = &mut entry.collider {
                collider.set_position(entry.body.position);
                let speed_sq = entry.body.velocity.norm_squared();
                if entry.body.is_projectile() && speed_sq > MIN_ORIENT_SPEED_SQ {
                    collider.set_axes(orthonormal_axes_from_direction(entry.body.velocity));
                }
            }
        }

        self.detection.clear();
        // detection index -> owning entry, None for static obstacles
        let mut owners: Vec<Option<usize>> = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(collider) = &entry.collider {
                self.detection.add_collider(*collider);
                owners.push(Some(index));
            }
        }
        for obstacle in &self.obstacles {
            self.detection.add_collider(*obstacle);
            owners.push(None);
        }

        let manifolds = self.detection.detect();
        self.resolve_impacts(&manifolds, &owners);
    }

    /// Resolve at most one impact per projectile per tick, in manifold
    /// order. Grounded bodies and non-projectiles are left alone.
    fn resolve_impacts(&mut self, manifolds: &[Manifold], owners: &[Option<usize>]) {
        let mut resolved = vec![false; self.entries.len()];

        for manifold in manifolds {
            let (projectile_idx, target_detection_idx, flip_normal) =
                match (owners[manifold.a], owners[manifold.b]) {
                    // projectiles pass through each other; the resolver
                    // only handles projectile-vs-surface contacts
                    (Some(ia), Some(ib))
                        if self.is_live_projectile(ia) && self.is_live_projectile(ib) =>
                    {
                        continue
                    }
                    (Some(ia), _) if self.is_live_projectile(ia) => (ia, manifold.b, false),
                    (_, Some(ib)) if self.is_live_projectile(ib) => (ib, manifold.a, true),
                    _ => continue,
                };
            if resolved[projectile_idx] {
                continue;
            }

            let mut contact = manifold.contact;
            if flip_normal {
                contact.normal = -contact.normal;
            }

            let material = self
                .detection
                .collider(target_detection_idx)
                .and_then(|collider| collider.material);

            let entry = &mut self.entries[projectile_idx];
            let result = self.resolver.resolve(&entry.body, &contact, material.as_ref());
            self.resolver.apply(&mut entry.body, &contact, &result);
            entry.impacted = true;
            resolved[projectile_idx] = true;

            if let Some(collider) = &mut entry.collider {
                collider.set_position(entry.body.position);
            }
        }
    }

    fn is_live_projectile(&self, index: usize) -> bool {
        let body = &self.entries[index].body;
        body.is_projectile() && !body.grounded
    }
}
