use crate::systems::fluid::{step_fluid, FluidStepReport};
use crate::systems::rigid_body::{step_rigid_body, RigidEnvironment};
use crate::systems::springs::{step_springs, SpringEnvironment, SpringStepReport};

use super::collide::{resolve_contacts, ContactTally};
use super::{PerfTimer, WorldCore};

pub(super) fn step(world: &mut WorldCore, dt: f32) {
    if !(dt > 0.0) || !dt.is_finite() {
        return;
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // === SPRING NETWORK ===
    let springs = if perf_on {
        let t0 = PerfTimer::start();
        let report = step_spring_network(world, dt);
        world.perf_stats.springs_ms = t0.elapsed_ms();
        report
    } else {
        step_spring_network(world, dt)
    };
    if springs.torn > 0 {
        engine_log!("frame {}: {} spring(s) torn", world.frame, springs.torn);
    }

    // === RIGID BODIES ===
    if perf_on {
        let t0 = PerfTimer::start();
        step_bodies(world, dt);
        world.perf_stats.rigid_ms = t0.elapsed_ms();
    } else {
        step_bodies(world, dt);
    }

    // === CONTACTS ===
    // After integration so every contact sees this frame's positions.
    let contacts = if perf_on {
        let t0 = PerfTimer::start();
        let tally = resolve_contacts(world);
        world.perf_stats.collision_ms = t0.elapsed_ms();
        tally
    } else {
        resolve_contacts(world)
    };
    if contacts.degenerate > 0 {
        engine_warn!("frame {}: {} contact(s) with no movable mass skipped", world.frame, contacts.degenerate);
    }

    // === FLUID ===
    let fluid = if perf_on {
        let t0 = PerfTimer::start();
        let report = step_fluid_block(world);
        world.perf_stats.fluid_ms = t0.elapsed_ms();
        report
    } else {
        step_fluid_block(world)
    };

    world.frame += 1;
    world.time += dt as f64;

    if let Some(t0) = step_start {
        record_counters(world, springs, contacts, fluid);
        world.perf_stats.step_ms = t0.elapsed_ms();
    }
}

fn step_spring_network(world: &mut WorldCore, dt: f32) -> SpringStepReport {
    let settings = &world.settings;
    let env = SpringEnvironment {
        gravity: settings.gravity,
        boundary: settings.boundary,
        point_radius: settings.point_radius,
    };
    let scene = &mut world.scene;
    step_springs(
        &mut scene.points,
        &mut scene.springs,
        dt,
        settings.integration_mode,
        settings.spring_flags,
        &env,
    )
}

fn step_bodies(world: &mut WorldCore, dt: f32) {
    let settings = &world.settings;
    let env = RigidEnvironment {
        gravity: settings.gravity,
        linear_damping: settings.linear_damping,
        angular_damping: settings.angular_damping,
    };
    for body in world.scene.bodies.iter_mut() {
        step_rigid_body(body, dt, settings.rigid_flags, &env);
    }
}

/// The fluid always advances by its own timestep, whatever the frame `dt`.
fn step_fluid_block(world: &mut WorldCore) -> FluidStepReport {
    let settings = &world.settings;
    match world.scene.fluid.as_mut() {
        Some(fluid) => step_fluid(
            fluid,
            settings.fluid.timestep,
            settings.gravity,
            settings.fluid.lower_bound,
            settings.fluid.upper_bound,
            settings.fluid_flags,
        ),
        None => FluidStepReport::default(),
    }
}

fn record_counters(world: &mut WorldCore, springs: SpringStepReport, contacts: ContactTally, fluid: FluidStepReport) {
    let stats = &mut world.perf_stats;
    stats.springs_torn = springs.torn as u32;
    stats.point_wall_hits = springs.wall_hits as u32;
    stats.body_pairs_tested = contacts.pairs_tested;
    stats.point_contacts_tested = contacts.points_tested;
    stats.contacts_found = contacts.found;
    stats.impulses_applied = contacts.applied;
    stats.degenerate_contacts = contacts.degenerate;
    stats.neighbor_pairs = fluid.neighbor_pairs as u32;
    stats.fluid_wall_hits = fluid.wall_hits as u32;

    stats.point_count = world.scene.points.len() as u32;
    stats.spring_count = world.scene.springs.len() as u32;
    stats.body_count = world.scene.bodies.len() as u32;
    stats.particle_count = world.scene.particle_count() as u32;
}
