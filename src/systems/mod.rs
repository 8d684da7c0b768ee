//! Systems - the physics building blocks the simulation steps are made of.

pub mod boundary;
pub mod collision;
pub mod fluid;
pub mod rigid_body;
pub mod springs;
