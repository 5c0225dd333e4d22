//! Force and environment registry.

use crate::environment::{Environment, EnvironmentModel};
use crate::forces::Force;
use crate::math::Vec3;
use crate::rigid_body::RigidBody;

/// Stable handle to a registered force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceHandle(usize);

/// Stable handle to a registered environment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentHandle(usize);

struct ForceEntry {
    force: Force,
    active: bool,
}

/// Registry of active forces and environment providers.
///
/// Registration happens during setup, not during active ticking; handles
/// returned at registration time give typed access for later mutation
/// (e.g. steering the wind) without lookup by name.
#[derive(Default)]
pub struct PhysicsWorld {
    forces: Vec<ForceEntry>,
    environments: Vec<EnvironmentModel>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_force(&mut self, force: Force) -> ForceHandle {
        self.forces.push(ForceEntry {
            force,
            active: true,
        });
        ForceHandle(self.forces.len() - 1)
    }

    pub fn add_environment(&mut self, model: EnvironmentModel) -> EnvironmentHandle {
        self.environments.push(model);
        EnvironmentHandle(self.environments.len() - 1)
    }

    pub fn force(&self, handle: ForceHandle) -> Option<&Force> {
        self.forces.get(handle.0).map(|entry| &entry.force)
    }

    pub fn force_mut(&mut self, handle: ForceHandle) -> Option<&mut Force> {
        self.forces.get_mut(handle.0).map(|entry| &mut entry.force)
    }

    pub fn set_force_active(&mut self, handle: ForceHandle, active: bool) {
        if let Some(entry) = self.forces.get_mut(handle.0) {
            entry.active = active;
        }
    }

    pub fn environment_model(&self, handle: EnvironmentHandle) -> Option<&EnvironmentModel> {
        self.environments.get(handle.0)
    }

    pub fn environment_model_mut(
        &mut self,
        handle: EnvironmentHandle,
    ) -> Option<&mut EnvironmentModel> {
        self.environments.get_mut(handle.0)
    }

    /// Active forces in registration order. Diagnostics/display only: net
    /// force is a commutative sum and never depends on this order.
    pub fn forces(&self) -> impl Iterator<Item = &Force> {
        self.forces
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| &entry.force)
    }

    /// Assemble the environment snapshot from the registered providers.
    ///
    /// The integrator calls this once per step and passes the snapshot to
    /// every stage, so the ambient state cannot change mid-step.
    pub fn environment(&self) -> Environment {
        let mut env = Environment::default();
        for model in &self.environments {
            model.apply(&mut env);
        }
        env
    }

    /// Net force on `body` under a previously captured snapshot.
    pub fn net_force_in(&self, body: &RigidBody, env: &Environment) -> Vec3 {
        self.forces()
            .fold(Vec3::zeros(), |sum, force| sum + force.force(body, env))
    }

    /// Net force on `body` under a freshly assembled snapshot.
    pub fn compute_net_force(&self, body: &RigidBody) -> Vec3 {
        let env = self.environment();
        self.net_force_in(body, &env)
    }

    /// Drop all registered forces and environment providers.
    pub fn clear(&mut self) {
        self.forces.clear();
        self.environments.clear();
    }
}
