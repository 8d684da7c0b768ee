use glam::Vec3;

/// SPH particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Acceleration from the last force pass (pressure + gravity).
    pub acceleration: Vec3,
    pub mass: f32,
    pub density: f32,
    pub pressure: f32,
    /// Pressure force accumulated by the last force pass.
    pub pressure_force: Vec3,
}

impl Particle {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass,
            density: 0.0,
            pressure: 0.0,
            pressure_force: Vec3::ZERO,
        }
    }
}
