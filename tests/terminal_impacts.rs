//! End-to-end impact scenarios: ricochet, penetration, embed.

use projectile_sim::{
    presets, Collider, DragModel, Material, ProjectileProfile, RealismLevel, RigidBody, Simulation,
    Vec3,
};

fn small_collider() -> Collider {
    Collider::cuboid(Vec3::new(0.01, 0.004, 0.004))
}

fn spawn_demo(sim: &mut Simulation, speed: f64) -> projectile_sim::BodyId {
    let mut body = RigidBody::projectile(ProjectileProfile::new(0.05, 0.00762, DragModel::G1));
    body.set_velocity_from_angles(speed, 0.0, 90.0);
    sim.spawn_with_collider(body, Some(small_collider()))
}

fn run(sim: &mut Simulation, seconds: f64) {
    let ticks = (seconds / sim.fixed_dt()).round() as usize;
    for _ in 0..ticks {
        sim.advance(sim.fixed_dt());
    }
}

#[test]
fn test_wooden_wall_is_penetrated() {
    let mut sim = Simulation::new();
    presets::configure(sim.world_mut(), RealismLevel::Basic, 0.01);
    let id = spawn_demo(&mut sim, 50.0);

    let mut wall = Collider::cuboid(Vec3::new(0.025, 1.0, 1.0)).with_material(Material::wood());
    wall.set_position(Vec3::new(2.0, 0.0, 0.0));
    sim.add_obstacle(wall);

    run(&mut sim, 0.2);

    let body = sim.body(id).unwrap();
    assert!(sim.has_impacted(id));
    assert!(!body.grounded, "wood should not stop this projectile");
    assert!(body.position.x > 2.0, "should be past the wall: {}", body.position.x);

    let speed = body.velocity.norm();
    assert!(speed < 50.0, "penetration must cost energy: {speed}");
    assert!(speed > 30.0, "wood absorbs only a small fraction here: {speed}");
}

#[test]
fn test_concrete_wall_stops_projectile() {
    let mut sim = Simulation::new();
    presets::configure(sim.world_mut(), RealismLevel::Basic, 0.01);
    let id = spawn_demo(&mut sim, 50.0);

    let mut wall = Collider::cuboid(Vec3::new(0.05, 1.0, 1.0)).with_material(Material::concrete());
    wall.set_position(Vec3::new(2.0, 0.0, 0.0));
    sim.add_obstacle(wall);

    run(&mut sim, 0.2);

    let body = sim.body(id).unwrap();
    assert!(sim.has_impacted(id));
    assert!(body.grounded);
    assert_eq!(body.velocity, Vec3::zeros());
    assert!(body.position.x < 2.1, "embedded bodies stay put: {}", body.position.x);
}

#[test]
fn test_shallow_impact_on_steel_ricochets() {
    let mut sim = Simulation::new();
    presets::configure(sim.world_mut(), RealismLevel::Basic, 0.01);

    // fast and shallow: energy sits inside the ricochet window for steel
    // and the incidence is far past the critical angle
    let mut body = RigidBody::projectile(ProjectileProfile::new(0.05, 0.00762, DragModel::G1));
    body.position = Vec3::new(0.0, 1.0, 0.0);
    body.set_velocity_from_angles(180.0, -5.0, 90.0);
    let id = sim.spawn_with_collider(body, Some(small_collider()));

    let mut plate = Collider::cuboid(Vec3::new(20.0, 0.5, 5.0)).with_material(Material::steel());
    plate.set_position(Vec3::new(10.0, -0.5, 0.0));
    sim.add_obstacle(plate);

    run(&mut sim, 0.2);

    let body = sim.body(id).unwrap();
    assert!(sim.has_impacted(id));
    assert!(!body.grounded);
    assert!(body.velocity.y > 0.0, "ricochet should bounce upward: {:?}", body.velocity);
    assert!(body.velocity.x > 0.0, "forward motion is kept: {:?}", body.velocity);
    assert!(body.velocity.norm() < 180.0, "restitution must cost speed");
}

#[test]
fn test_soil_berm_embeds_demo_projectile() {
    // 62.5 J against a soil capacity of roughly 91 J over this channel
    let mut sim = Simulation::new();
    presets::configure(sim.world_mut(), RealismLevel::Basic, 0.01);
    let id = spawn_demo(&mut sim, 50.0);

    let mut berm = Collider::cuboid(Vec3::new(0.5, 1.0, 1.0)).with_material(Material::soil());
    berm.set_position(Vec3::new(2.0, 0.0, 0.0));
    sim.add_obstacle(berm);

    run(&mut sim, 0.2);

    let body = sim.body(id).unwrap();
    assert!(body.grounded);
    assert_eq!(body.velocity, Vec3::zeros());

    // a grounded body is frozen for the rest of the session
    let resting = body.position;
    run(&mut sim, 0.05);
    assert_eq!(sim.body(id).unwrap().position, resting);
}

#[test]
fn test_bare_ground_is_a_hard_stop() {
    let mut sim = Simulation::new();
    presets::configure(sim.world_mut(), RealismLevel::Basic, 0.01);

    let mut body = RigidBody::projectile(ProjectileProfile::new(0.05, 0.00762, DragModel::G1));
    body.position = Vec3::new(0.0, 1.5, 0.0);
    body.set_velocity_from_angles(50.0, 0.0, 90.0);
    let id = sim.spawn_with_collider(body, Some(small_collider()));
    sim.add_obstacle(Collider::ground(0.0));

    run(&mut sim, 2.0);

    let body = sim.body(id).unwrap();
    assert!(body.grounded);
    assert_eq!(body.velocity, Vec3::zeros());
    assert!(body.position.y.abs() < 0.1, "stopped at the surface: {}", body.position.y);
}

#[test]
fn test_sequential_walls_attenuate() {
    // two wooden walls; each passage bleeds energy
    let mut sim = Simulation::new();
    presets::configure(sim.world_mut(), RealismLevel::Basic, 0.01);
    let id = spawn_demo(&mut sim, 50.0);

    for x in [2.0, 4.0] {
        let mut wall = Collider::cuboid(Vec3::new(0.025, 1.0, 1.0)).with_material(Material::wood());
        wall.set_position(Vec3::new(x, 0.0, 0.0));
        sim.add_obstacle(wall);
    }

    run(&mut sim, 0.05);
    let after_first = sim.body(id).unwrap().velocity.norm();
    run(&mut sim, 0.1);
    let after_second = sim.body(id).unwrap().velocity.norm();

    assert!(after_first < 50.0);
    assert!(after_second < after_first);
    assert!(sim.body(id).unwrap().position.x > 4.0);
}
