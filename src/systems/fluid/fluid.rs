use glam::Vec3;

use crate::domain::settings::MAX_FLUID_PARTICLES;
use crate::domain::{BoundarySettings, FluidSettings, NeighborSearch};
use crate::spatial::UniformGrid;

use super::kernel::CubicSpline;
use super::particle::Particle;

/// Material and solver parameters of a fluid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidParams {
    pub kernel_radius: f32,
    pub stiffness: f32,
    pub rest_density: f32,
    pub exponent: i32,
    /// XSPH smoothing factor.
    pub viscosity: f32,
    pub neighbor_search: NeighborSearch,
    /// Wall response, same policy as spring points.
    pub bounciness: f32,
    pub friction: f32,
}

impl FluidParams {
    pub fn from_settings(fluid: &FluidSettings, boundary: &BoundarySettings) -> Self {
        Self {
            kernel_radius: fluid.kernel_radius,
            stiffness: fluid.stiffness,
            rest_density: fluid.rest_density,
            exponent: fluid.exponent,
            viscosity: fluid.viscosity,
            neighbor_search: fluid.neighbor_search,
            bounciness: boundary.bounciness,
            friction: boundary.friction,
        }
    }

    /// Tait equation of state: `k · ((ρ / ρ0)^γ - 1)`.
    #[inline]
    pub fn pressure(&self, density: f32) -> f32 {
        self.stiffness * ((density / self.rest_density).powi(self.exponent) - 1.0)
    }
}

impl Default for FluidParams {
    fn default() -> Self {
        Self::from_settings(&FluidSettings::default(), &BoundarySettings::default())
    }
}

/// A body of SPH particles.
pub struct Fluid {
    pub particles: Vec<Particle>,
    pub params: FluidParams,
    pub(super) kernel: CubicSpline,
    /// Fitted to the particles each step; `None` while all-pairs is in use.
    pub(super) grid: Option<UniformGrid>,
    /// XSPH velocity corrections, one per particle.
    pub(super) velocity_scratch: Vec<Vec3>,
}

impl Fluid {
    pub fn new(params: FluidParams) -> Self {
        Self {
            particles: Vec::new(),
            params,
            kernel: CubicSpline::new(params.kernel_radius),
            grid: None,
            velocity_scratch: Vec::new(),
        }
    }

    /// Particles on a regular lattice starting at `origin`, `spacing` apart.
    ///
    /// Each particle carries `rest_density · spacing³` so that a lattice at
    /// `kernel_radius == spacing` starts close to rest density.
    pub fn new_block(origin: Vec3, counts: [u32; 3], spacing: f32, params: FluidParams) -> Self {
        let mut fluid = Self::new(params);
        let mass = params.rest_density * spacing * spacing * spacing;
        let total = (counts[0] as usize)
            .checked_mul(counts[1] as usize)
            .and_then(|n| n.checked_mul(counts[2] as usize))
            .unwrap_or(0);
        if total == 0 {
            return fluid;
        }
        fluid.particles.reserve(total.min(MAX_FLUID_PARTICLES));

        for z in 0..counts[2] {
            for y in 0..counts[1] {
                for x in 0..counts[0] {
                    let offset = Vec3::new(x as f32, y as f32, z as f32) * spacing;
                    fluid.particles.push(Particle::new(origin + offset, mass));
                }
            }
        }
        fluid
    }

    /// Block described by the fluid section of the settings.
    pub fn from_settings(fluid: &FluidSettings, boundary: &BoundarySettings) -> Self {
        Self::new_block(
            fluid.origin,
            fluid.counts,
            fluid.spacing,
            FluidParams::from_settings(fluid, boundary),
        )
    }

    pub fn add_particle(&mut self, position: Vec3, velocity: Vec3, mass: f32) {
        let mut particle = Particle::new(position, mass);
        particle.velocity = velocity;
        self.particles.push(particle);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn kernel(&self) -> &CubicSpline {
        &self.kernel
    }

    /// Swap parameters; the kernel follows the new radius and the grid is dropped.
    pub fn set_params(&mut self, params: FluidParams) {
        self.params = params;
        self.kernel = CubicSpline::new(params.kernel_radius);
        self.grid = None;
    }

    /// Particles' bounding box, clamped to `[lower, upper]`.
    pub fn particle_bounds(&self, lower: Vec3, upper: Vec3) -> (Vec3, Vec3) {
        let (min, max) = self.particles.iter().fold(
            (Vec3::INFINITY, Vec3::NEG_INFINITY),
            |(min, max), p| (min.min(p.position), max.max(p.position)),
        );
        (min.max(lower).min(upper), max.min(upper).max(lower))
    }

    /// Fit the grid to the particles and re-bin them.
    ///
    /// Returns false, and drops the grid, when the particles are spread over
    /// more cells than a grid may hold; the caller then searches all pairs.
    pub(super) fn rebuild_grid(&mut self, lower: Vec3, upper: Vec3) -> bool {
        let (min, max) = self.particle_bounds(lower, upper);
        let h = self.kernel.smoothing_radius();

        let fitted = match self.grid.as_mut() {
            Some(grid) => grid.reshape(h, min, max),
            None => {
                self.grid = UniformGrid::new(h, min, max);
                self.grid.is_some()
            }
        };
        if !fitted {
            self.grid = None;
            return false;
        }

        if let Some(grid) = self.grid.as_mut() {
            grid.rebuild(self.particles.iter().map(|p| p.position));
        }
        true
    }
}
