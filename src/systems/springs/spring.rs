use glam::Vec3;

use crate::core::math::EPSILON;

use super::point::{PointId, SpringPoint};

/// Elastic link between two points of the same point list.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    pub a: PointId,
    pub b: PointId,
    /// Fixed at creation.
    pub rest_length: f32,
    pub stiffness: f32,
    /// Damping along the spring axis.
    pub damping: f32,
    /// Length seen by the latest force evaluation.
    pub current_length: f32,
    /// Length seen by the evaluation before that.
    pub previous_length: f32,
    /// Force magnitude above which the spring tears.
    pub tear_threshold: Option<f32>,
    /// Magnitude of the force applied to each endpoint by the latest evaluation.
    pub force_magnitude: f32,
    ripe: bool,
}

impl Spring {
    /// Spring whose rest length is the current separation of `a` and `b`.
    pub fn between(points: &[SpringPoint], a: PointId, b: PointId, stiffness: f32) -> Self {
        let rest = match (points.get(a.0), points.get(b.0)) {
            (Some(pa), Some(pb)) => pa.position.distance(pb.position),
            _ => 0.0,
        };
        Self::with_rest_length(a, b, rest, stiffness)
    }

    pub fn with_rest_length(a: PointId, b: PointId, rest_length: f32, stiffness: f32) -> Self {
        Self {
            a,
            b,
            rest_length,
            stiffness,
            damping: 0.0,
            current_length: rest_length,
            previous_length: rest_length,
            tear_threshold: None,
            force_magnitude: 0.0,
            ripe: false,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_tear_threshold(mut self, threshold: Option<f32>) -> Self {
        self.tear_threshold = threshold;
        self
    }

    /// Marked for removal by the owning list.
    #[inline]
    pub fn is_ripe(&self) -> bool {
        self.ripe
    }

    /// Force on endpoint A for the given endpoint states (B receives the negation).
    ///
    /// Hooke term `-k (|d| - L0) d̂` plus damping `-c ((v_a - v_b)·d̂) d̂`, with
    /// `d = p_a - p_b`. Coincident endpoints produce no force.
    pub fn force_on_a(&self, pos_a: Vec3, vel_a: Vec3, pos_b: Vec3, vel_b: Vec3) -> Vec3 {
        let d = pos_a - pos_b;
        let len = d.length();
        if len < EPSILON {
            return Vec3::ZERO;
        }
        let dir = d / len;
        let elastic = -self.stiffness * (len - self.rest_length);
        let damping = -self.damping * (vel_a - vel_b).dot(dir);
        dir * (elastic + damping)
    }

    /// Accumulate forces from the authoritative endpoint state.
    pub fn compute_elastic_forces(&mut self, points: &mut [SpringPoint]) {
        self.apply(points, |p| (p.position, p.velocity));
    }

    /// Accumulate forces from the midpoint temporaries (`pos_temp`, `vel_temp`).
    pub fn compute_elastic_forces_tmp(&mut self, points: &mut [SpringPoint]) {
        self.apply(points, |p| (p.pos_temp, p.vel_temp));
    }

    fn apply(&mut self, points: &mut [SpringPoint], state: impl Fn(&SpringPoint) -> (Vec3, Vec3)) {
        let (Some(pa), Some(pb)) = (points.get(self.a.0), points.get(self.b.0)) else {
            return;
        };
        let (pos_a, vel_a) = state(pa);
        let (pos_b, vel_b) = state(pb);

        let force = self.force_on_a(pos_a, vel_a, pos_b, vel_b);

        self.previous_length = self.current_length;
        self.current_length = pos_a.distance(pos_b);
        self.force_magnitude = force.length();
        if let Some(threshold) = self.tear_threshold {
            if self.force_magnitude > threshold {
                self.ripe = true;
            }
        }

        points[self.a.0].add_force(force);
        points[self.b.0].add_force(-force);
    }
}
