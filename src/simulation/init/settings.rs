use glam::Vec3;

use crate::domain::{IntegrationMode, SettingsError, SimulationSettings};
use crate::systems::fluid::FluidParams;

use super::commands;
use super::perf_stats::PerfStats;
use super::WorldCore;

/// Validate and swap in new settings.
///
/// Values baked into entities at build time (masses, stiffness, damping) only
/// change on the next `reset`; the fluid parameters and the integrator switch
/// take effect immediately.
pub(super) fn apply_settings(world: &mut WorldCore, settings: SimulationSettings) -> Result<(), SettingsError> {
    settings.validate()?;

    let mode = settings.integration_mode;
    let fluid_params = FluidParams::from_settings(&settings.fluid, &settings.boundary);
    world.settings = SimulationSettings {
        integration_mode: world.settings.integration_mode,
        ..settings
    };
    if let Some(fluid) = world.scene.fluid.as_mut() {
        if fluid.params != fluid_params {
            fluid.set_params(fluid_params);
        }
    }
    set_integration_mode(world, mode);

    engine_log!("settings applied (integrator {:?})", world.settings.integration_mode);
    Ok(())
}

pub(super) fn set_integration_mode(world: &mut WorldCore, mode: IntegrationMode) {
    let previous = world.settings.integration_mode;
    world.settings.integration_mode = mode;
    if mode == IntegrationMode::LeapFrog && previous != IntegrationMode::LeapFrog {
        commands::prime_springs(world);
    }
}

pub(super) fn set_gravity(world: &mut WorldCore, gravity: Vec3) {
    if gravity.is_finite() {
        world.settings.gravity = gravity;
    }
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}
