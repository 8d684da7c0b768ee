//! Two-pass SPH update.
//!
//! Pass 1 sums densities and derives pressures for every particle. Pass 2
//! sums symmetric pressure forces (and the XSPH velocity correction) from the
//! same snapshot. Only then are particles integrated with explicit Euler,
//! position first, and clamped to the box.

use glam::Vec3;

use crate::core::math::EPSILON;
use crate::domain::{FluidStepFlags, NeighborSearch};
use crate::spatial::UniformGrid;
use crate::systems::boundary::Boundary;

use super::fluid::Fluid;
use super::kernel::CubicSpline;
use super::particle::Particle;

/// What happened during one fluid step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FluidStepReport {
    /// Ordered pairs within kernel support, over both passes.
    pub neighbor_pairs: usize,
    /// Particles clamped by the box.
    pub wall_hits: usize,
}

/// Advance `fluid` by `dt` inside `[lower, upper]`.
pub fn step_fluid(
    fluid: &mut Fluid,
    dt: f32,
    gravity: Vec3,
    lower: Vec3,
    upper: Vec3,
    flags: FluidStepFlags,
) -> FluidStepReport {
    let mut report = FluidStepReport::default();
    if fluid.is_empty() || !(dt > 0.0) || !dt.is_finite() {
        return report;
    }

    report.neighbor_pairs += compute_density_pressure(fluid, lower, upper);
    report.neighbor_pairs += compute_forces(fluid, if flags.gravity { gravity } else { Vec3::ZERO }, flags.damping);

    let boundary = Boundary::aabb(lower, upper, fluid.params.bounciness, fluid.params.friction);
    let Fluid { particles, velocity_scratch, .. } = fluid;

    for (particle, correction) in particles.iter_mut().zip(velocity_scratch.iter()) {
        let velocity = particle.velocity + *correction;
        particle.position += velocity * dt;
        particle.velocity = velocity + particle.acceleration * dt;

        if flags.walls
            && boundary.collide(&mut particle.position, &mut particle.velocity, 0.0, dt)
        {
            report.wall_hits += 1;
        }
    }

    report
}

/// Pass 1: densities and pressures from the current positions.
/// Rebuilds the neighbor grid when the fluid uses one, falling back to all
/// pairs when the particles are too spread out for a grid. Returns pairs visited.
pub fn compute_density_pressure(fluid: &mut Fluid, lower: Vec3, upper: Vec3) -> usize {
    let gridded = fluid.params.neighbor_search == NeighborSearch::UniformGrid
        && fluid.rebuild_grid(lower, upper);
    if !gridded {
        fluid.grid = None;
    }

    let Fluid { particles, params, kernel, grid, .. } = fluid;
    let grid = grid.as_ref();
    let mut pairs = 0;

    for i in 0..particles.len() {
        let pos_i = particles[i].position;
        let mut density = 0.0;
        for_each_neighbor(grid, particles, pos_i, kernel, |j, offset| {
            density += particles[j].mass * kernel.value(offset.length());
            pairs += 1;
        });

        let particle = &mut particles[i];
        particle.density = density;
        particle.pressure = params.pressure(density);
    }

    pairs
}

/// Pass 2: pressure force, acceleration and XSPH correction per particle.
///
/// `F_i = -0.5 · (m_i/ρ_i) · Σ_j (p_i + p_j) · (m_j/ρ_j) · ∇W_ij`
fn compute_forces(fluid: &mut Fluid, gravity: Vec3, smoothing: bool) -> usize {
    let Fluid { particles, params, kernel, grid, velocity_scratch, .. } = fluid;
    let grid = grid.as_ref();
    let viscosity = if smoothing { params.viscosity } else { 0.0 };

    velocity_scratch.clear();
    velocity_scratch.resize(particles.len(), Vec3::ZERO);
    let mut pairs = 0;

    for i in 0..particles.len() {
        let p_i = particles[i];
        let mut sum = Vec3::ZERO;
        let mut correction = Vec3::ZERO;

        for_each_neighbor(grid, particles, p_i.position, kernel, |j, offset| {
            pairs += 1;
            if j == i {
                return;
            }
            let p_j = &particles[j];
            let density_j = p_j.density.max(EPSILON);
            sum += kernel.gradient(offset) * ((p_i.pressure + p_j.pressure) * p_j.mass / density_j);

            if viscosity > 0.0 {
                let mean_density = (0.5 * (p_i.density + p_j.density)).max(EPSILON);
                correction += (p_j.velocity - p_i.velocity)
                    * (p_j.mass / mean_density * kernel.value(offset.length()));
            }
        });

        let force = sum * (-0.5 * p_i.mass / p_i.density.max(EPSILON));
        let particle = &mut particles[i];
        particle.pressure_force = force;
        let pressure_acceleration = if p_i.mass > 0.0 { force / p_i.mass } else { Vec3::ZERO };
        particle.acceleration = pressure_acceleration + gravity;
        velocity_scratch[i] = correction * viscosity;
    }

    pairs
}

/// Call `visit(j, x_i - x_j)` for every particle within kernel support of `position`
/// (including the particle itself).
fn for_each_neighbor(
    grid: Option<&UniformGrid>,
    particles: &[Particle],
    position: Vec3,
    kernel: &CubicSpline,
    mut visit: impl FnMut(usize, Vec3),
) {
    let support = kernel.support();
    let support_sq = support * support;
    let mut test = |j: usize| {
        let offset = position - particles[j].position;
        if offset.length_squared() < support_sq {
            visit(j, offset);
        }
    };

    match grid {
        Some(grid) => grid.for_each_candidate(position, support, test),
        None => (0..particles.len()).for_each(&mut test),
    }
}
