use glam::Vec3;

use crate::core::math::safe_normalize;
use crate::domain::{IntegrationMode, SceneError};
use crate::systems::springs::{prime_leap_frog, SpringEnvironment};

use super::presets::build_scene;
use super::scene::{Scene, ScenePreset};
use super::WorldCore;

/// Explosions radiate from this point (below the floor, so everything lifts).
const EXPLOSION_ORIGIN: Vec3 = Vec3::new(0.0, -2.0, 0.0);
/// Distances from the world origin are floored at this before dividing.
const EXPLOSION_MIN_DISTANCE: f32 = 0.1;

pub(super) fn load_scene(world: &mut WorldCore, preset: ScenePreset) -> Result<(), SceneError> {
    let scene = build_scene(preset, &world.settings)?;
    install(world, scene, Some(preset));
    engine_log!(
        "scene {:?}: {} points, {} springs, {} bodies, {} particles",
        preset,
        world.scene.points.len(),
        world.scene.springs.len(),
        world.scene.bodies.len(),
        world.scene.particle_count()
    );
    Ok(())
}

pub(super) fn set_scene(world: &mut WorldCore, scene: Scene) {
    install(world, scene, None);
}

pub(super) fn reset(world: &mut WorldCore) -> Result<(), SceneError> {
    match world.preset {
        Some(preset) => load_scene(world, preset),
        None => {
            clear(world);
            Ok(())
        }
    }
}

pub(super) fn clear(world: &mut WorldCore) {
    install(world, Scene::new(), None);
}

fn install(world: &mut WorldCore, scene: Scene, preset: Option<ScenePreset>) {
    world.scene = scene;
    world.preset = preset;
    world.frame = 0;
    world.time = 0.0;
    world.perf_stats.reset();
    if world.settings.integration_mode == IntegrationMode::LeapFrog {
        prime_springs(world);
    }
}

/// Stagger spring-point velocities by half a step for Leap-Frog.
pub(super) fn prime_springs(world: &mut WorldCore) {
    let settings = &world.settings;
    let env = SpringEnvironment {
        gravity: settings.gravity,
        boundary: settings.boundary,
        point_radius: settings.point_radius,
    };
    let scene = &mut world.scene;
    prime_leap_frog(&mut scene.points, &mut scene.springs, settings.timestep, settings.spring_flags, &env);
}

/// Velocity change for something at `position`: away from the explosion
/// origin, scaled by `strength / |position|`.
pub(super) fn explosion_kick(position: Vec3, strength: f32) -> Vec3 {
    let direction = safe_normalize(position - EXPLOSION_ORIGIN);
    direction * (strength / position.length().max(EXPLOSION_MIN_DISTANCE))
}

pub(super) fn explode(world: &mut WorldCore, strength: f32) {
    if !strength.is_finite() {
        return;
    }
    let scene = &mut world.scene;

    for point in scene.points.iter_mut().filter(|p| !p.is_static) {
        point.velocity += explosion_kick(point.position, strength);
    }
    for body in scene.bodies.iter_mut().filter(|b| b.is_dynamic()) {
        let kick = explosion_kick(body.position(), strength);
        let position = body.position();
        body.apply_impulse(kick * body.mass(), position);
    }
    if let Some(fluid) = scene.fluid.as_mut() {
        for particle in fluid.particles.iter_mut() {
            particle.velocity += explosion_kick(particle.position, strength);
        }
    }
}
