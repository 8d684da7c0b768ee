//! SPH fluid: cubic-spline kernel, Tait pressure, symmetric pressure forces.
//!
//! Neighbor lookup is either all pairs or a uniform grid rebuilt every step
//! (see `spatial::UniformGrid`).

mod fluid;
mod kernel;
mod particle;
mod step;

pub use fluid::{Fluid, FluidParams};
pub use kernel::CubicSpline;
pub use particle::Particle;
pub use step::{compute_density_pressure, step_fluid, FluidStepReport};
