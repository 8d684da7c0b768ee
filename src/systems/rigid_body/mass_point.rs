use glam::Vec3;

/// Constituent point of a rigid body, stored in body space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassPoint {
    /// Offset from the body's center of mass (body frame).
    pub offset: Vec3,
    pub mass: f32,
    /// World-space force accumulated at this point since the last
    /// `apply_accumulated_forces`.
    pub force: Vec3,
    /// World velocity of the point, derived after every integration.
    pub velocity: Vec3,
}

impl MassPoint {
    pub fn new(offset: Vec3, mass: f32) -> Self {
        Self { offset, mass, force: Vec3::ZERO, velocity: Vec3::ZERO }
    }
}

/// The 8 corners of a `size` box, each carrying an eighth of `mass`.
///
/// Corner order: x major, then y, then z, positive half first
/// (`+++`, `++-`, `+-+`, `+--`, `-++`, `-+-`, `--+`, `---`).
pub fn box_mass_points(size: Vec3, mass: f32) -> Vec<MassPoint> {
    let half = size * 0.5;
    let corner_mass = mass / 8.0;
    let mut points = Vec::with_capacity(8);
    for sx in [1.0, -1.0] {
        for sy in [1.0, -1.0] {
            for sz in [1.0, -1.0] {
                points.push(MassPoint::new(half * Vec3::new(sx, sy, sz), corner_mass));
            }
        }
    }
    points
}
