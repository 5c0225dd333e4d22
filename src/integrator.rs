//! Numerical integration strategies.
//!
//! Every strategy advances a body in place from net-force evaluations
//! against a single environment snapshot captured at the start of the
//! step. Intermediate stages of the multi-stage methods evaluate trial
//! copies of the body; the authoritative state is only written by the
//! final combination, which is what makes the higher-order methods
//! actually higher order.

use crate::environment::Environment;
use crate::math::Vec3;
use crate::rigid_body::RigidBody;
use crate::world::PhysicsWorld;

/// Strategy object advancing a body's state by one timestep.
///
/// `dt ≤ 0` and grounded bodies are no-ops.
pub trait Integrator {
    fn step(&self, body: &mut RigidBody, world: &PhysicsWorld, dt: f64);
}

fn skip(body: &RigidBody, dt: f64) -> bool {
    dt <= 0.0 || body.grounded
}

fn acceleration(world: &PhysicsWorld, body: &RigidBody, env: &Environment) -> Vec3 {
    world.net_force_in(body, env) / body.mass()
}

/// Evaluate acceleration at a trial state without touching the real body.
fn acceleration_at(
    world: &PhysicsWorld,
    body: &RigidBody,
    env: &Environment,
    position: Vec3,
    velocity: Vec3,
) -> Vec3 {
    let mut trial = body.clone();
    trial.position = position;
    trial.velocity = velocity;
    acceleration(world, &trial, env)
}

/// Semi-implicit Euler: one force evaluation, velocity first, then
/// position from the updated velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerIntegrator;

impl Integrator for EulerIntegrator {
    fn step(&self, body: &mut RigidBody, world: &PhysicsWorld, dt: f64) {
        if skip(body, dt) {
            return;
        }
        let env = world.environment();
        let accel = acceleration(world, body, &env);

        body.velocity += accel * dt;
        body.position += body.velocity * dt;
    }
}

/// Midpoint (RK2): a second force evaluation at the half-step trial state
/// supplies the acceleration; position advances with the averaged velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointIntegrator;

impl Integrator for MidpointIntegrator {
    fn step(&self, body: &mut RigidBody, world: &PhysicsWorld, dt: f64) {
        if skip(body, dt) {
            return;
        }
        let env = world.environment();
        let half = 0.5 * dt;

        let a1 = acceleration(world, body, &env);
        let mid_velocity = body.velocity + a1 * half;
        let mid_position = body.position + body.velocity * half;
        let a_mid = acceleration_at(world, body, &env, mid_position, mid_velocity);

        let new_velocity = body.velocity + a_mid * dt;
        body.position += (body.velocity + new_velocity) * half;
        body.velocity = new_velocity;
    }
}

/// Classic RK4 with 1-2-2-1 weighting over four staged evaluations at
/// t, t+dt/2 (twice) and t+dt, combined for both position and velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4Integrator;

impl Integrator for Rk4Integrator {
    fn step(&self, body: &mut RigidBody, world: &PhysicsWorld, dt: f64) {
        if skip(body, dt) {
            return;
        }
        let env = world.environment();
        let half = 0.5 * dt;

        let p0 = body.position;
        let v0 = body.velocity;

        // k = (dp/dt, dv/dt) at each stage
        let k1_p = v0;
        let k1_v = acceleration(world, body, &env);

        let k2_p = v0 + k1_v * half;
        let k2_v = acceleration_at(world, body, &env, p0 + k1_p * half, k2_p);

        let k3_p = v0 + k2_v * half;
        let k3_v = acceleration_at(world, body, &env, p0 + k2_p * half, k3_p);

        let k4_p = v0 + k3_v * dt;
        let k4_v = acceleration_at(world, body, &env, p0 + k3_p * dt, k4_p);

        body.position = p0 + (k1_p + 2.0 * k2_p + 2.0 * k3_p + k4_p) * (dt / 6.0);
        body.velocity = v0 + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * (dt / 6.0);
    }
}
