//! Small vector helpers on top of `nalgebra`.

use nalgebra::Vector3;

use crate::constants::MIN_VELOCITY_THRESHOLD;

/// 3D vector type used throughout the simulation
pub type Vec3 = Vector3<f64>;

/// Build a velocity vector from launch parameters.
///
/// Elevation is measured up from the horizontal plane, azimuth clockwise
/// from +Z (so azimuth 90° launches along +X).
pub fn velocity_from_angles(speed: f64, elevation_deg: f64, azimuth_deg: f64) -> Vec3 {
    let el = elevation_deg.to_radians();
    let az = azimuth_deg.to_radians();
    Vec3::new(
        speed * el.cos() * az.sin(),
        speed * el.sin(),
        speed * el.cos() * az.cos(),
    )
}

/// Build an orthonormal frame whose local Y axis points along `dir`.
///
/// Used to orient box colliders from a body's velocity (the collider's long
/// axis is local Y). Returns the world axes for a degenerate direction.
pub fn orthonormal_axes_from_direction(dir: Vec3) -> [Vec3; 3] {
    let y = match dir.try_normalize(MIN_VELOCITY_THRESHOLD) {
        Some(v) => v,
        None => return [Vec3::x(), Vec3::y(), Vec3::z()],
    };

    // pick a reference axis that is not parallel to the direction
    let reference = if y.x.abs() < 0.9 { Vec3::x() } else { Vec3::z() };

    let z = y.cross(&reference).normalize();
    let x = y.cross(&z);

    [x, y, z]
}
