//! Cubic-spline (M4) smoothing kernel in 3D.
//!
//! With `q = r / h` and `σ = 1 / (π h³)`:
//!
//! ```text
//! W(q) = σ · (1 - 1.5 q² + 0.75 q³)    0 <= q < 1
//!        σ · 0.25 (2 - q)³              1 <= q < 2
//!        0                              q >= 2
//! ```
//!
//! `dW/dr` is the analytic derivative of the same expression, so density and
//! pressure force always use matching normalization.

use std::f32::consts::PI;

use glam::Vec3;

use crate::core::math::EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSpline {
    h: f32,
    inv_h: f32,
    sigma: f32,
}

impl CubicSpline {
    pub fn new(smoothing_radius: f32) -> Self {
        let h = smoothing_radius.max(EPSILON);
        Self { h, inv_h: 1.0 / h, sigma: 1.0 / (PI * h * h * h) }
    }

    #[inline]
    pub fn smoothing_radius(&self) -> f32 {
        self.h
    }

    /// Distance beyond which the kernel vanishes (`2h`).
    #[inline]
    pub fn support(&self) -> f32 {
        2.0 * self.h
    }

    #[inline]
    pub fn value(&self, distance: f32) -> f32 {
        let q = distance * self.inv_h;
        if q < 1.0 {
            self.sigma * (1.0 - 1.5 * q * q + 0.75 * q * q * q)
        } else if q < 2.0 {
            let t = 2.0 - q;
            self.sigma * 0.25 * t * t * t
        } else {
            0.0
        }
    }

    /// `dW/dr` at `distance`.
    #[inline]
    pub fn derivative(&self, distance: f32) -> f32 {
        let q = distance * self.inv_h;
        let scale = self.sigma * self.inv_h;
        if q < 1.0 {
            scale * (-3.0 * q + 2.25 * q * q)
        } else if q < 2.0 {
            let t = 2.0 - q;
            scale * (-0.75 * t * t)
        } else {
            0.0
        }
    }

    /// `∇W` with respect to the first particle, for `offset = x_i - x_j`.
    /// Coincident particles get a zero gradient.
    #[inline]
    pub fn gradient(&self, offset: Vec3) -> Vec3 {
        let distance = offset.length();
        if distance < EPSILON {
            return Vec3::ZERO;
        }
        offset * (self.derivative(distance) / distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 0.05;

    #[test]
    fn vanishes_at_and_beyond_support() {
        let w = CubicSpline::new(H);
        assert_eq!(w.value(2.0 * H), 0.0);
        assert_eq!(w.value(3.0 * H), 0.0);
        assert_eq!(w.derivative(2.0 * H), 0.0);
        assert_eq!(w.gradient(Vec3::new(0.0, 5.0 * H, 0.0)), Vec3::ZERO);
    }

    #[test]
    fn continuous_at_branch_points() {
        let w = CubicSpline::new(H);
        let e = 1e-4 * H;
        for r in [H, 2.0 * H] {
            let jump = (w.value(r - e) - w.value(r + e)).abs();
            assert!(jump < 1e-3 * w.value(0.0), "W jumps by {jump} at r = {r}");
        }
        let slope_jump = (w.derivative(H - e) - w.derivative(H + e)).abs();
        assert!(slope_jump < 1e-3 * w.derivative(H).abs());
    }

    #[test]
    fn integrates_to_one() {
        let w = CubicSpline::new(H);
        let steps = 4000;
        let dr = w.support() / steps as f32;
        let mut total = 0.0f64;
        for i in 0..steps {
            let r = (i as f32 + 0.5) * dr;
            total += (4.0 * PI * r * r * w.value(r) * dr) as f64;
        }
        assert!((total - 1.0).abs() < 1e-3, "integral = {total}");
    }

    #[test]
    fn gradient_points_away_from_neighbor_and_is_repulsive() {
        let w = CubicSpline::new(H);
        let offset = Vec3::new(0.5 * H, 0.0, 0.0);
        let g = w.gradient(offset);
        // W decreases with distance: the gradient points back toward the neighbor.
        assert!(g.x < 0.0);
        assert_eq!(g.y, 0.0);
        assert_eq!(w.gradient(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let w = CubicSpline::new(H);
        let e = 1e-3 * H;
        for r in [0.3 * H, 0.8 * H, 1.4 * H, 1.9 * H] {
            let numeric = (w.value(r + e) - w.value(r - e)) / (2.0 * e);
            let analytic = w.derivative(r);
            assert!((numeric - analytic).abs() < 1e-2 * analytic.abs(), "r = {r}");
        }
    }
}
