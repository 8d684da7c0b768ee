//! Boundary - axis-aligned room walls shared by spring points and fluid particles
//!
//! A point that is inside a wall, or would cross it within the next step, is
//! clamped onto the wall. Its normal velocity is reversed and scaled by
//! `bounciness`, and the two tangential components are scaled by `friction`.
//! Open sides use infinite bounds.

use glam::Vec3;

use crate::domain::BoundarySettings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub min: Vec3,
    pub max: Vec3,
    pub bounciness: f32,
    pub friction: f32,
}

impl Boundary {
    /// Closed box `[min, max]`.
    pub fn aabb(min: Vec3, max: Vec3, bounciness: f32, friction: f32) -> Self {
        Self { min, max, bounciness, friction }
    }

    /// Ground plane only, everything else open.
    pub fn floor_only(floor: f32, bounciness: f32, friction: f32) -> Self {
        Self {
            min: Vec3::new(f32::NEG_INFINITY, floor, f32::NEG_INFINITY),
            max: Vec3::INFINITY,
            bounciness,
            friction,
        }
    }

    /// Spring-point room: the floor always, side walls and ceiling when `walls` is set.
    pub fn from_settings(settings: &BoundarySettings, walls: bool) -> Self {
        if !walls {
            return Self::floor_only(settings.floor, settings.bounciness, settings.friction);
        }
        Self {
            min: Vec3::new(-settings.x_wall, settings.floor, -settings.z_wall),
            max: Vec3::new(settings.x_wall, settings.ceiling, settings.z_wall),
            bounciness: settings.bounciness,
            friction: settings.friction,
        }
    }

    /// Keep a sphere of `radius` inside the box. Returns whether any wall was hit.
    pub fn collide(&self, position: &mut Vec3, velocity: &mut Vec3, radius: f32, dt: f32) -> bool {
        let mut hit = false;

        for axis in 0..3 {
            let lo = self.min[axis] + radius;
            let hi = self.max[axis] - radius;
            let projected = position[axis] + velocity[axis] * dt;

            let hit_low = position[axis] < lo || (projected < lo && velocity[axis] < 0.0);
            let hit_high = position[axis] > hi || (projected > hi && velocity[axis] > 0.0);

            if hit_low {
                position[axis] = position[axis].max(lo);
                if velocity[axis] < 0.0 {
                    velocity[axis] = -velocity[axis] * self.bounciness;
                }
            } else if hit_high {
                position[axis] = position[axis].min(hi);
                if velocity[axis] > 0.0 {
                    velocity[axis] = -velocity[axis] * self.bounciness;
                }
            } else {
                continue;
            }

            hit = true;
            for tangent in 0..3 {
                if tangent != axis {
                    velocity[tangent] *= self.friction;
                }
            }
        }

        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_reflects_and_applies_friction() {
        let boundary = Boundary::floor_only(-1.0, 0.5, 0.9);
        let mut pos = Vec3::new(0.0, -1.2, 0.0);
        let mut vel = Vec3::new(2.0, -4.0, 0.0);

        assert!(boundary.collide(&mut pos, &mut vel, 0.0, 0.01));
        assert_eq!(pos.y, -1.0);
        assert_eq!(vel.y, 2.0);
        assert!((vel.x - 1.8).abs() < 1e-6);
    }

    #[test]
    fn projected_penetration_reflects_before_crossing() {
        let boundary = Boundary::floor_only(0.0, 1.0, 1.0);
        let mut pos = Vec3::new(0.0, 0.05, 0.0);
        let mut vel = Vec3::new(0.0, -10.0, 0.0);

        assert!(boundary.collide(&mut pos, &mut vel, 0.0, 0.01));
        // Not yet inside: position untouched, velocity already reversed.
        assert_eq!(pos.y, 0.05);
        assert_eq!(vel.y, 10.0);
    }

    #[test]
    fn open_sides_never_collide() {
        let boundary = Boundary::floor_only(-1.0, 0.75, 0.98);
        let mut pos = Vec3::new(1e6, 5.0, -1e6);
        let mut vel = Vec3::new(100.0, 1.0, -100.0);

        assert!(!boundary.collide(&mut pos, &mut vel, 0.05, 0.1));
        assert_eq!(vel, Vec3::new(100.0, 1.0, -100.0));
    }

    #[test]
    fn radius_offsets_the_wall() {
        let settings = BoundarySettings::default();
        let boundary = Boundary::from_settings(&settings, true);
        let mut pos = Vec3::new(1.0, 0.0, 0.0);
        let mut vel = Vec3::ZERO;

        assert!(boundary.collide(&mut pos, &mut vel, 0.05, 0.005));
        assert!((pos.x - 0.95).abs() < 1e-6);
    }

    #[test]
    fn point_moving_away_from_wall_is_left_alone() {
        let boundary = Boundary::floor_only(0.0, 0.5, 0.5);
        let mut pos = Vec3::new(0.0, 0.001, 0.0);
        let mut vel = Vec3::new(1.0, 3.0, 0.0);

        assert!(!boundary.collide(&mut pos, &mut vel, 0.0, 0.01));
        assert_eq!(vel, Vec3::new(1.0, 3.0, 0.0));
    }
}
