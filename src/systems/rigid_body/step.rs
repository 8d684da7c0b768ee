use glam::Vec3;

use crate::domain::RigidStepFlags;

use super::body::RigidBody;

/// Scene-wide inputs of a rigid-body step.
#[derive(Clone, Copy, Debug)]
pub struct RigidEnvironment {
    pub gravity: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

/// One frame for one body: accumulated forces, optional gravity and damping,
/// then integration. Static and uninitialized bodies are skipped.
pub fn step_rigid_body(body: &mut RigidBody, dt: f32, flags: RigidStepFlags, env: &RigidEnvironment) {
    if !body.is_dynamic() {
        return;
    }

    body.apply_accumulated_forces(dt);
    if flags.gravity {
        body.add_gravity(dt, env.gravity);
    }
    if flags.damping {
        body.add_damping(dt, env.linear_damping, env.angular_damping);
    }
    body.integrate_values(dt);
}
