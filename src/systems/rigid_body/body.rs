use glam::{Mat3, Mat4, Quat, Vec3};

use crate::core::math::{self, EPSILON};
use crate::domain::BodyError;

use super::mass_point::MassPoint;

/// Determinant below which the body-space inertia tensor is treated as singular.
const SINGULAR_INERTIA: f32 = 1e-12;

/// Lifecycle of a rigid body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyState {
    /// No mass points yet; every operation is a no-op.
    #[default]
    Uninitialized,
    /// Integrates and reacts to impulses.
    Dynamic,
    /// Infinite mass: can be placed, never moves on its own.
    Static,
}

/// Rigid Body - momentum-based 3D body built from mass points
#[derive(Clone, Debug, PartialEq)]
pub struct RigidBody {
    // === Shape ===
    mass_points: Vec<MassPoint>,
    /// Visual/collision box extents (unit cube scaled by this).
    pub scale: Vec3,

    // === Transform ===
    position: Vec3,
    orientation: Quat,

    // === Momenta (integrated) ===
    linear_momentum: Vec3,
    angular_momentum: Vec3,

    // === Derived velocities ===
    linear_velocity: Vec3,
    angular_velocity: Vec3,

    // === Mass properties ===
    mass: f32,
    inverse_mass: f32,
    body_inertia: Mat3,
    body_inverse_inertia: Mat3,
    world_inverse_inertia: Mat3,

    // === Accumulators ===
    force: Vec3,
    torque: Vec3,

    state: BodyState,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass_points: Vec::new(),
            scale: Vec3::ONE,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_momentum: Vec3::ZERO,
            angular_momentum: Vec3::ZERO,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 0.0,
            inverse_mass: 0.0,
            body_inertia: Mat3::ZERO,
            body_inverse_inertia: Mat3::ZERO,
            world_inverse_inertia: Mat3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            state: BodyState::Uninitialized,
        }
    }
}

impl RigidBody {
    /// Build a dynamic body from its mass points, placed at `position`/`orientation`.
    pub fn new(points: Vec<MassPoint>, position: Vec3, orientation: Quat) -> Result<Self, BodyError> {
        let mut body = Self::default();
        body.init(points, position, orientation)?;
        Ok(body)
    }

    /// Compute mass and inertia from `points` and move to `Dynamic`.
    ///
    /// Offsets are re-centered on their center of mass; `position` is where
    /// the original offset origin lands, so the stored position is the world
    /// center of mass. On error the body is left untouched.
    pub fn init(&mut self, mut points: Vec<MassPoint>, position: Vec3, orientation: Quat) -> Result<(), BodyError> {
        if points.is_empty() {
            return Err(BodyError::NoMassPoints);
        }
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !(p.mass > 0.0)) {
            return Err(BodyError::NonPositiveMass { index, mass: p.mass });
        }

        let mass: f32 = points.iter().map(|p| p.mass).sum();
        let center = points.iter().map(|p| p.offset * p.mass).sum::<Vec3>() / mass;

        let mut inertia = Mat3::ZERO;
        for p in points.iter_mut() {
            p.offset -= center;
            p.force = Vec3::ZERO;
            inertia += math::point_inertia(p.mass, p.offset);
        }

        let determinant = inertia.determinant();
        if !(determinant.abs() > SINGULAR_INERTIA) || !determinant.is_finite() {
            return Err(BodyError::SingularInertia { determinant });
        }

        let orientation = math::renormalize(orientation);
        *self = Self {
            mass_points: points,
            scale: self.scale,
            position: position + orientation * center,
            orientation,
            mass,
            inverse_mass: 1.0 / mass,
            body_inertia: inertia,
            body_inverse_inertia: inertia.inverse(),
            state: BodyState::Dynamic,
            ..Self::default()
        };
        self.update_world_inertia();
        self.update_velocities();
        Ok(())
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.set_static(is_static);
        self
    }

    // === State machine ===

    #[inline]
    pub fn state(&self) -> BodyState {
        self.state
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.state == BodyState::Static
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.state == BodyState::Dynamic
    }

    /// Switch between `Dynamic` and `Static`. Freezing clears all motion.
    /// An uninitialized body stays uninitialized.
    pub fn set_static(&mut self, is_static: bool) {
        match (self.state, is_static) {
            (BodyState::Dynamic, true) => {
                self.state = BodyState::Static;
                self.linear_momentum = Vec3::ZERO;
                self.angular_momentum = Vec3::ZERO;
                self.clear_accumulators();
                self.update_velocities();
            }
            (BodyState::Static, false) => self.state = BodyState::Dynamic,
            _ => {}
        }
    }

    // === Readback ===

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn linear_momentum(&self) -> Vec3 {
        self.linear_momentum
    }

    #[inline]
    pub fn angular_momentum(&self) -> Vec3 {
        self.angular_momentum
    }

    #[inline]
    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    #[inline]
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Stored total mass (also for static bodies).
    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Effective inverse mass: 0 unless the body is dynamic.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_dynamic() {
            self.inverse_mass
        } else {
            0.0
        }
    }

    /// Effective world inverse inertia: zero unless the body is dynamic.
    #[inline]
    pub fn world_inverse_inertia(&self) -> Mat3 {
        if self.is_dynamic() {
            self.world_inverse_inertia
        } else {
            Mat3::ZERO
        }
    }

    #[inline]
    pub fn body_inverse_inertia(&self) -> Mat3 {
        self.body_inverse_inertia
    }

    #[inline]
    pub fn mass_points(&self) -> &[MassPoint] {
        &self.mass_points
    }

    /// World position of mass point `index`.
    pub fn mass_point_position(&self, index: usize) -> Option<Vec3> {
        self.mass_points
            .get(index)
            .map(|p| self.position + self.orientation * p.offset)
    }

    /// Object-to-world matrix of the body's box.
    #[inline]
    pub fn world_transform(&self) -> Mat4 {
        math::box_transform(self.position, self.orientation, self.scale)
    }

    /// World velocity of the material point currently at `world_point`.
    #[inline]
    pub fn point_velocity(&self, world_point: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(world_point - self.position)
    }

    // === Placement (allowed in any initialized state) ===

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = math::renormalize(orientation);
        self.update_world_inertia();
        self.update_velocities();
    }

    // === Velocity setters (dynamic only) ===

    pub fn set_linear_velocity(&mut self, velocity: Vec3) {
        if self.is_dynamic() {
            self.linear_momentum = velocity * self.mass;
            self.update_velocities();
        }
    }

    pub fn set_angular_velocity(&mut self, omega: Vec3) {
        if self.is_dynamic() {
            let rot = Mat3::from_quat(self.orientation);
            let world_inertia = rot * self.body_inertia * rot.transpose();
            self.angular_momentum = world_inertia * omega;
            self.update_velocities();
        }
    }

    // === Forces ===

    /// Force through the center of mass.
    pub fn add_force(&mut self, force: Vec3) {
        if self.is_dynamic() {
            self.force += force;
        }
    }

    /// Force applied at a world point; contributes torque about the center.
    pub fn add_force_at(&mut self, force: Vec3, world_point: Vec3) {
        if self.is_dynamic() {
            self.force += force;
            self.torque += (world_point - self.position).cross(force);
        }
    }

    /// Force applied at mass point `index`. Returns false for an unknown index.
    pub fn add_mass_point_force(&mut self, index: usize, force: Vec3) -> bool {
        if !self.is_dynamic() {
            return false;
        }
        match self.mass_points.get_mut(index) {
            Some(p) => {
                p.force += force;
                true
            }
            None => false,
        }
    }

    /// Turn accumulated forces and torques into momentum over `dt`, then clear them.
    pub fn apply_accumulated_forces(&mut self, dt: f32) {
        if !self.is_dynamic() {
            self.clear_accumulators();
            return;
        }

        let mut force = self.force;
        let mut torque = self.torque;
        for p in &self.mass_points {
            force += p.force;
            torque += (self.orientation * p.offset).cross(p.force);
        }

        self.linear_momentum += force * dt;
        self.angular_momentum += torque * dt;
        self.clear_accumulators();
        self.update_velocities();
    }

    /// `P += m · g · dt`.
    pub fn add_gravity(&mut self, dt: f32, gravity: Vec3) {
        if self.is_dynamic() {
            self.linear_momentum += gravity * (self.mass * dt);
            self.update_velocities();
        }
    }

    /// Exponential decay of both momenta: `P *= e^(-linear·dt)`, `L *= e^(-angular·dt)`.
    pub fn add_damping(&mut self, dt: f32, linear: f32, angular: f32) {
        if self.is_dynamic() {
            self.linear_momentum *= (-linear * dt).exp();
            self.angular_momentum *= (-angular * dt).exp();
            self.update_velocities();
        }
    }

    /// Impulse `j` at a world point: `P += j`, `L += r × j`.
    pub fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3) {
        if self.is_dynamic() {
            self.linear_momentum += impulse;
            self.angular_momentum += (world_point - self.position).cross(impulse);
            self.update_velocities();
        }
    }

    // === Integration ===

    /// Advance position and orientation from the current momenta.
    ///
    /// Momenta are not changed here; gravity, damping and accumulated forces
    /// are separate calls.
    pub fn integrate_values(&mut self, dt: f32) {
        if !self.is_dynamic() {
            return;
        }

        self.position += self.linear_momentum * self.inverse_mass * dt;

        let omega = self.world_inverse_inertia * self.angular_momentum;
        self.orientation = math::integrate_orientation(self.orientation, omega, dt);

        self.update_world_inertia();
        self.update_velocities();
    }

    // === Internals ===

    fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
        for p in self.mass_points.iter_mut() {
            p.force = Vec3::ZERO;
        }
    }

    fn update_world_inertia(&mut self) {
        self.world_inverse_inertia =
            math::world_inverse_inertia(self.orientation, self.body_inverse_inertia);
    }

    fn update_velocities(&mut self) {
        if self.is_dynamic() {
            self.linear_velocity = self.linear_momentum * self.inverse_mass;
            self.angular_velocity = self.world_inverse_inertia * self.angular_momentum;
            if self.angular_velocity.length_squared() < EPSILON * EPSILON {
                self.angular_velocity = Vec3::ZERO;
            }
        } else {
            self.linear_velocity = Vec3::ZERO;
            self.angular_velocity = Vec3::ZERO;
        }

        let (v, w, q) = (self.linear_velocity, self.angular_velocity, self.orientation);
        for p in self.mass_points.iter_mut() {
            p.velocity = v + w.cross(q * p.offset);
        }
    }
}
