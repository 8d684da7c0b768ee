//! One-sided oriented-box test.
//!
//! Boxes are the unit cube `[-0.5, 0.5]³` under a world transform. The test
//! only looks for corners of B inside A; callers run it a second time with the
//! roles swapped and negate the normal to catch the other direction.

use glam::{Mat3, Mat4, Vec3};

use crate::core::math::{safe_normalize, EPSILON};

const HALF: f32 = 0.5;

/// Result of one pairwise test.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionInfo {
    pub is_valid: bool,
    /// World position of the contained corner.
    pub point: Vec3,
    /// Unit normal pointing from B toward A.
    pub normal: Vec3,
}

impl CollisionInfo {
    pub const NONE: CollisionInfo = CollisionInfo {
        is_valid: false,
        point: Vec3::ZERO,
        normal: Vec3::ZERO,
    };

    fn hit(point: Vec3, normal: Vec3) -> Self {
        Self { is_valid: true, point, normal }
    }

    /// Same contact seen from the other body.
    #[inline]
    pub fn flipped(self) -> Self {
        Self { normal: -self.normal, ..self }
    }
}

/// Spring point found inside a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointContact {
    /// Box is A, the point is B.
    pub info: CollisionInfo,
    /// Where the point leaves the box through its entry face.
    pub surface: Vec3,
}

/// Unit-cube corners, `+++` first, matching `box_mass_points`.
pub const UNIT_CORNERS: [Vec3; 8] = [
    Vec3::new(HALF, HALF, HALF),
    Vec3::new(HALF, HALF, -HALF),
    Vec3::new(HALF, -HALF, HALF),
    Vec3::new(HALF, -HALF, -HALF),
    Vec3::new(-HALF, HALF, HALF),
    Vec3::new(-HALF, HALF, -HALF),
    Vec3::new(-HALF, -HALF, HALF),
    Vec3::new(-HALF, -HALF, -HALF),
];

/// Test the corners of box B against the volume of box A.
///
/// The first contained corner wins. The normal is the outward normal of the
/// A face nearest to that corner, negated so it points from B toward A.
pub fn check_collision(transform_a: &Mat4, transform_b: &Mat4) -> CollisionInfo {
    let Some(to_local_a) = local_frame(transform_a) else {
        return CollisionInfo::NONE;
    };

    for corner in UNIT_CORNERS {
        let world = transform_b.transform_point3(corner);
        let local = to_local_a.transform_point3(world);
        if !inside_unit_cube(local) {
            continue;
        }
        let face = nearest_face(local);
        return CollisionInfo::hit(world, -world_normal(&to_local_a, face));
    }

    CollisionInfo::NONE
}

/// Test a single point against box A, choosing the face it entered through.
///
/// The entry face is the one `previous` lay furthest outside of; when
/// `previous` was already inside, the face nearest to `point` is used.
pub fn check_point(transform_a: &Mat4, point: Vec3, previous: Vec3) -> Option<PointContact> {
    let to_local_a = local_frame(transform_a)?;

    let local = to_local_a.transform_point3(point);
    if !inside_unit_cube(local) {
        return None;
    }

    let local_prev = to_local_a.transform_point3(previous);
    let face = entry_face(local_prev).unwrap_or_else(|| nearest_face(local));

    let mut on_face = local;
    on_face[face.axis] = HALF * face.sign;

    Some(PointContact {
        info: CollisionInfo::hit(point, -world_normal(&to_local_a, face)),
        surface: transform_a.transform_point3(on_face),
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Face {
    axis: usize,
    sign: f32,
}

fn local_frame(transform: &Mat4) -> Option<Mat4> {
    if transform.determinant().abs() <= EPSILON {
        return None;
    }
    let inverse = transform.inverse();
    inverse.is_finite().then_some(inverse)
}

#[inline]
fn inside_unit_cube(local: Vec3) -> bool {
    local.abs().cmple(Vec3::splat(HALF)).all()
}

/// Face with the smallest remaining distance; ties go to the lower axis.
fn nearest_face(local: Vec3) -> Face {
    let mut best = Face { axis: 0, sign: 1.0 };
    let mut best_gap = f32::INFINITY;
    for axis in 0..3 {
        let gap = HALF - local[axis].abs();
        if gap < best_gap {
            best_gap = gap;
            best = Face { axis, sign: if local[axis] < 0.0 { -1.0 } else { 1.0 } };
        }
    }
    best
}

/// Face `local_prev` was furthest outside of, if it was outside at all.
fn entry_face(local_prev: Vec3) -> Option<Face> {
    let mut best = None;
    let mut best_excess = 0.0;
    for axis in 0..3 {
        let excess = local_prev[axis].abs() - HALF;
        if excess > best_excess {
            best_excess = excess;
            best = Some(Face { axis, sign: if local_prev[axis] < 0.0 { -1.0 } else { 1.0 } });
        }
    }
    best
}

/// Outward world normal of a local face (inverse-transpose for scaled boxes).
fn world_normal(to_local: &Mat4, face: Face) -> Vec3 {
    let mut local = Vec3::ZERO;
    local[face.axis] = face.sign;
    safe_normalize(Mat3::from_mat4(*to_local).transpose() * local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::box_transform;
    use glam::Quat;

    fn aabb(position: Vec3, scale: Vec3) -> Mat4 {
        box_transform(position, Quat::IDENTITY, scale)
    }

    #[test]
    fn corner_inside_is_reported_one_sided() {
        let a = aabb(Vec3::ZERO, Vec3::ONE);
        let b = aabb(Vec3::splat(0.35), Vec3::splat(0.1));

        let ab = check_collision(&a, &b);
        assert!(ab.is_valid);
        assert!(ab.point.abs_diff_eq(Vec3::splat(0.4), 1e-6));
        assert_eq!(ab.normal, Vec3::new(-1.0, 0.0, 0.0));

        let ba = check_collision(&b, &a);
        assert!(!ba.is_valid);
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = aabb(Vec3::ZERO, Vec3::ONE);
        let b = aabb(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        assert_eq!(check_collision(&a, &b), CollisionInfo::NONE);
        assert_eq!(check_collision(&b, &a), CollisionInfo::NONE);
    }

    #[test]
    fn normal_follows_nearest_face() {
        let a = aabb(Vec3::ZERO, Vec3::ONE);
        let b = aabb(Vec3::new(0.0, -0.55, 0.0), Vec3::splat(0.2));

        let info = check_collision(&a, &b);
        assert!(info.is_valid);
        // B sits below A: the normal points from B up into A.
        assert!(info.normal.abs_diff_eq(Vec3::Y, 1e-6));
        assert!((info.point.y + 0.45).abs() < 1e-6);
    }

    #[test]
    fn normal_is_rotated_into_world_space() {
        let a = box_transform(Vec3::ZERO, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2), Vec3::ONE);
        let b = aabb(Vec3::new(0.45, 0.0, 0.0), Vec3::splat(0.05));

        let info = check_collision(&a, &b);
        assert!(info.is_valid);
        assert!(info.normal.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn scaled_box_normal_stays_unit() {
        let a = aabb(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let b = aabb(Vec3::new(0.95, 0.0, 0.0), Vec3::splat(0.05));

        let info = check_collision(&a, &b);
        assert!(info.is_valid);
        assert!(info.normal.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn degenerate_transform_never_collides() {
        let flat = aabb(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        let b = aabb(Vec3::ZERO, Vec3::splat(0.1));
        assert!(!check_collision(&flat, &b).is_valid);
    }

    #[test]
    fn point_uses_entry_face_from_previous_position() {
        let a = aabb(Vec3::ZERO, Vec3::ONE);
        // Closest to +x now, but it came in from above.
        let contact = check_point(&a, Vec3::new(0.45, 0.0, 0.3), Vec3::new(0.45, 0.6, 0.3)).unwrap();

        assert!(contact.info.normal.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-6));
        assert!(contact.surface.abs_diff_eq(Vec3::new(0.45, 0.5, 0.3), 1e-6));
    }

    #[test]
    fn point_without_history_uses_nearest_face() {
        let a = aabb(Vec3::ZERO, Vec3::ONE);
        let p = Vec3::new(0.45, 0.0, 0.3);
        let contact = check_point(&a, p, p).unwrap();
        assert!(contact.info.normal.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-6));
        assert!(check_point(&a, Vec3::new(0.0, 0.6, 0.0), Vec3::ZERO).is_none());
    }
}
