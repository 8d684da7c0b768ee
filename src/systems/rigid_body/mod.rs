//! RigidBody - a solid body that moves as a unit
//!
//! The body is assembled once from mass points given in body space. From then
//! on it is integrated through its linear and angular momentum; velocities and
//! the world-space inverse inertia are derived from the orientation each step.

mod body;
mod mass_point;
mod step;

pub use body::{BodyState, RigidBody};
pub use mass_point::{box_mass_points, MassPoint};
pub use step::{step_rigid_body, RigidEnvironment};
