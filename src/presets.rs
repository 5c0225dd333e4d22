//! Realism presets: canned force/environment configurations.

use serde::{Deserialize, Serialize};

use crate::environment::{Atmosphere, EnvironmentModel, Geography, Humidity, Wind};
use crate::forces::{Coriolis, Drag, Force, Gravity, WindDrag};
use crate::math::Vec3;
use crate::world::{EnvironmentHandle, ForceHandle, PhysicsWorld};

/// How much of the force stack a session runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RealismLevel {
    /// Gravity only
    Basic,
    /// Gravity, drag and wind
    WindOnly,
    /// Everything, including Coriolis and the full atmosphere stack
    Full,
}

/// Handles to whatever `configure` registered. Absent pieces stay `None`,
/// so callers can steer the wind or toggle a force without re-deriving
/// indices.
#[derive(Debug, Clone, Copy)]
pub struct PresetHandles {
    pub gravity: ForceHandle,
    pub drag: Option<ForceHandle>,
    pub wind_drag: Option<ForceHandle>,
    pub coriolis: Option<ForceHandle>,
    pub atmosphere: Option<EnvironmentHandle>,
    pub humidity: Option<EnvironmentHandle>,
    pub geography: Option<EnvironmentHandle>,
    pub wind: Option<EnvironmentHandle>,
}

/// Reset `world` and register the forces and environment providers for
/// the requested realism level. `fallback_area` seeds the drag fallback
/// for bodies without a projectile profile.
pub fn configure(world: &mut PhysicsWorld, level: RealismLevel, fallback_area: f64) -> PresetHandles {
    world.clear();

    let gravity = world.add_force(Force::Gravity(Gravity));
    let mut handles = PresetHandles {
        gravity,
        drag: None,
        wind_drag: None,
        coriolis: None,
        atmosphere: None,
        humidity: None,
        geography: None,
        wind: None,
    };

    if level == RealismLevel::Basic {
        return handles;
    }

    handles.drag = Some(world.add_force(Force::Drag(Drag::new(fallback_area))));
    handles.wind_drag = Some(world.add_force(Force::WindDrag(WindDrag::new(
        Vec3::zeros(),
        fallback_area,
    ))));
    handles.wind = Some(world.add_environment(EnvironmentModel::Wind(Wind::new(Vec3::zeros()))));

    if level == RealismLevel::WindOnly {
        return handles;
    }

    handles.coriolis = Some(world.add_force(Force::Coriolis(Coriolis)));
    // atmosphere first so humidity corrects its density, then geography
    handles.atmosphere = Some(world.add_environment(EnvironmentModel::Atmosphere(
        Atmosphere::new(
            crate::constants::STANDARD_TEMPERATURE_K,
            crate::constants::STANDARD_PRESSURE_PA,
        ),
    )));
    handles.humidity = Some(world.add_environment(EnvironmentModel::Humidity(Humidity::new(0.0))));
    handles.geography =
        Some(world.add_environment(EnvironmentModel::Geography(Geography::new(0.0, 0.0))));

    handles
}
