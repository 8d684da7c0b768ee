//! Mass-spring networks: points, springs and their explicit integrators.

mod integrator;
mod point;
mod spring;

pub use integrator::{
    prime_leap_frog, remove_ripe_springs, step_springs, SpringEnvironment, SpringStepReport,
};
pub use point::{PointId, SpringPoint};
pub use spring::Spring;
