use glam::Vec3;

/// Index of a point inside the scene's point list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

/// A mass point of a spring network (cloth, rope).
#[derive(Clone, Debug, PartialEq)]
pub struct SpringPoint {
    // === Authoritative state ===
    pub position: Vec3,
    pub velocity: Vec3,
    /// Force accumulator, cleared after every integration.
    pub force: Vec3,
    pub mass: f32,
    /// Velocity damping coefficient (force = -damping · velocity).
    pub damping: f32,
    /// Immovable: ignores forces, impulses and integration.
    pub is_static: bool,

    // === Midpoint temporaries ===
    pub pos_temp: Vec3,
    pub vel_temp: Vec3,

    /// Position before the last integration (entry-face estimate for box contacts).
    pub prev_position: Vec3,
}

impl SpringPoint {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            damping: 0.0,
            is_static: false,
            pos_temp: position,
            vel_temp: Vec3::ZERO,
            prev_position: position,
        }
    }

    /// Anchor point that never moves.
    pub fn fixed(position: Vec3, mass: f32) -> Self {
        Self {
            is_static: true,
            ..Self::new(position, mass)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self.vel_temp = velocity;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// 0 for static (or massless) points.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        if !self.is_static {
            self.force += force;
        }
    }

    #[inline]
    pub fn add_gravity(&mut self, gravity: Vec3) {
        self.add_force(gravity * self.mass);
    }

    /// Viscous drag against `velocity` (authoritative or midpoint velocity).
    #[inline]
    pub fn add_damping(&mut self, velocity: Vec3) {
        self.add_force(-velocity * self.damping);
    }

    #[inline]
    pub fn acceleration(&self) -> Vec3 {
        self.force * self.inverse_mass()
    }

    #[inline]
    pub fn reset_forces(&mut self) {
        self.force = Vec3::ZERO;
    }

    /// `pos += velocity · dt`, remembering where the point came from.
    #[inline]
    pub fn integrate_position(&mut self, dt: f32, velocity: Vec3) {
        self.prev_position = self.position;
        self.position += velocity * dt;
    }

    /// `vel += (force / mass) · dt`.
    #[inline]
    pub fn integrate_velocity(&mut self, dt: f32) {
        self.velocity += self.acceleration() * dt;
    }

    /// Half-step into `pos_temp`/`vel_temp` without touching the authoritative state.
    #[inline]
    pub fn integrate_temp(&mut self, dt: f32) {
        self.pos_temp = self.position + self.velocity * dt;
        self.vel_temp = self.velocity + self.acceleration() * dt;
    }

    /// Instantaneous velocity change; ignored by static points.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass();
    }
}
