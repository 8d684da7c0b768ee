//! Explicit integrators for spring networks.
//!
//! Every scheme runs in two phases: forces are accumulated for the whole point
//! list first, then each point is integrated. No point ever reads a neighbor
//! that was already moved in the same phase.

use glam::Vec3;

use crate::domain::{BoundarySettings, IntegrationMode, SpringStepFlags};
use crate::systems::boundary::Boundary;

use super::point::SpringPoint;
use super::spring::Spring;

/// Scene-wide inputs of a spring step.
#[derive(Clone, Copy, Debug)]
pub struct SpringEnvironment {
    pub gravity: Vec3,
    pub boundary: BoundarySettings,
    pub point_radius: f32,
}

/// What happened during one spring step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpringStepReport {
    /// Springs that went ripe and were dropped from the list.
    pub torn: usize,
    /// Points clamped by the room walls.
    pub wall_hits: usize,
}

/// Which state the force phase reads.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ForceState {
    Authoritative,
    Midpoint,
}

/// Advance a spring network by `dt`.
///
/// Ripe springs are removed once the step is done, so the next frame never
/// sees them.
pub fn step_springs(
    points: &mut [SpringPoint],
    springs: &mut Vec<Spring>,
    dt: f32,
    mode: IntegrationMode,
    flags: SpringStepFlags,
    env: &SpringEnvironment,
) -> SpringStepReport {
    match mode {
        IntegrationMode::Euler => step_euler(points, springs, dt, flags, env),
        IntegrationMode::Midpoint => step_midpoint(points, springs, dt, flags, env),
        IntegrationMode::LeapFrog => step_leap_frog(points, springs, dt, flags, env),
    }

    let boundary = Boundary::from_settings(&env.boundary, flags.walls);
    let mut wall_hits = 0;
    for point in points.iter_mut().filter(|p| !p.is_static) {
        if boundary.collide(&mut point.position, &mut point.velocity, env.point_radius, dt) {
            wall_hits += 1;
        }
    }

    SpringStepReport { torn: remove_ripe_springs(springs), wall_hits }
}

/// Shift velocities back by half a step so Leap-Frog runs on staggered velocities.
///
/// Call once after a scene (re)load, before the first Leap-Frog step.
pub fn prime_leap_frog(
    points: &mut [SpringPoint],
    springs: &mut [Spring],
    dt: f32,
    flags: SpringStepFlags,
    env: &SpringEnvironment,
) {
    accumulate_forces(points, springs, flags, env, ForceState::Authoritative);
    for point in points.iter_mut() {
        if !point.is_static {
            point.integrate_velocity(-0.5 * dt);
        }
        point.reset_forces();
    }
}

/// Drop springs flagged by the last force evaluation. Returns how many went.
pub fn remove_ripe_springs(springs: &mut Vec<Spring>) -> usize {
    let before = springs.len();
    springs.retain(|s| !s.is_ripe());
    before - springs.len()
}

fn accumulate_forces(
    points: &mut [SpringPoint],
    springs: &mut [Spring],
    flags: SpringStepFlags,
    env: &SpringEnvironment,
    state: ForceState,
) {
    for spring in springs.iter_mut() {
        match state {
            ForceState::Authoritative => spring.compute_elastic_forces(points),
            ForceState::Midpoint => spring.compute_elastic_forces_tmp(points),
        }
    }

    for point in points.iter_mut() {
        if flags.gravity {
            point.add_gravity(env.gravity);
        }
        if flags.damping {
            let velocity = match state {
                ForceState::Authoritative => point.velocity,
                ForceState::Midpoint => point.vel_temp,
            };
            point.add_damping(velocity);
        }
    }
}

/// Position with the old velocity, then velocity with the old force.
fn step_euler(
    points: &mut [SpringPoint],
    springs: &mut [Spring],
    dt: f32,
    flags: SpringStepFlags,
    env: &SpringEnvironment,
) {
    accumulate_forces(points, springs, flags, env, ForceState::Authoritative);

    for point in points.iter_mut() {
        if !point.is_static {
            let velocity = point.velocity;
            point.integrate_position(dt, velocity);
            point.integrate_velocity(dt);
        }
        point.reset_forces();
    }
}

/// Half step into the temporaries, then a full step with midpoint derivatives.
fn step_midpoint(
    points: &mut [SpringPoint],
    springs: &mut [Spring],
    dt: f32,
    flags: SpringStepFlags,
    env: &SpringEnvironment,
) {
    accumulate_forces(points, springs, flags, env, ForceState::Authoritative);
    for point in points.iter_mut() {
        if point.is_static {
            point.pos_temp = point.position;
            point.vel_temp = point.velocity;
        } else {
            point.integrate_temp(0.5 * dt);
        }
        point.reset_forces();
    }

    accumulate_forces(points, springs, flags, env, ForceState::Midpoint);
    for point in points.iter_mut() {
        if !point.is_static {
            let velocity = point.vel_temp;
            point.integrate_position(dt, velocity);
            point.integrate_velocity(dt);
        }
        point.reset_forces();
    }
}

/// Velocity first with the current force, then position with the new velocity.
fn step_leap_frog(
    points: &mut [SpringPoint],
    springs: &mut [Spring],
    dt: f32,
    flags: SpringStepFlags,
    env: &SpringEnvironment,
) {
    accumulate_forces(points, springs, flags, env, ForceState::Authoritative);

    for point in points.iter_mut() {
        if !point.is_static {
            point.integrate_velocity(dt);
            let velocity = point.velocity;
            point.integrate_position(dt, velocity);
        }
        point.reset_forces();
    }
}
