//! Math helpers on top of glam
//!
//! glam supplies the value types (`Vec3`, `Quat`, `Mat3`, `Mat4`); this module
//! adds the handful of rigid-body specific operations the engine needs.

pub use glam::{Mat3, Mat4, Quat, Vec3};

/// Smallest length treated as non-zero for normalization / division guards.
pub const EPSILON: f32 = 1e-6;

/// Normalize `v`, or return zero when it is (nearly) zero length.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > EPSILON {
        v / len
    } else {
        Vec3::ZERO
    }
}

/// Outer product `a ⊗ b` (column `j` is `a * b[j]`).
#[inline]
pub fn outer(a: Vec3, b: Vec3) -> Mat3 {
    Mat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Inertia contribution of a point mass at body-space offset `r`:
/// `m · (|r|² I − r ⊗ r)`.
#[inline]
pub fn point_inertia(mass: f32, r: Vec3) -> Mat3 {
    (Mat3::from_diagonal(Vec3::splat(r.length_squared())) - outer(r, r)) * mass
}

/// Transport a body-space inverse inertia tensor into world space:
/// `R · I⁻¹ · Rᵀ`.
#[inline]
pub fn world_inverse_inertia(orientation: Quat, body_inverse: Mat3) -> Mat3 {
    let rot = Mat3::from_quat(orientation);
    rot * body_inverse * rot.transpose()
}

/// Advance `orientation` by angular velocity `omega` over `dt` using the
/// quaternion derivative `q̇ = ½ · ω_q · q`, then renormalize.
#[inline]
pub fn integrate_orientation(orientation: Quat, omega: Vec3, dt: f32) -> Quat {
    let omega_q = Quat::from_xyzw(omega.x, omega.y, omega.z, 0.0);
    let dq = omega_q * orientation;
    let next = Quat::from_xyzw(
        orientation.x + 0.5 * dt * dq.x,
        orientation.y + 0.5 * dt * dq.y,
        orientation.z + 0.5 * dt * dq.z,
        orientation.w + 0.5 * dt * dq.w,
    );
    renormalize(next)
}

/// Unit-length quaternion; falls back to identity for a degenerate input.
#[inline]
pub fn renormalize(q: Quat) -> Quat {
    let len = q.length();
    if len > EPSILON && len.is_finite() {
        q / len
    } else {
        Quat::IDENTITY
    }
}

/// Object-to-world matrix of a box: scale, then rotate, then translate.
/// The box itself is the unit cube `[-0.5, 0.5]³` under this transform.
#[inline]
pub fn box_transform(position: Vec3, orientation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, orientation, position)
}

/// Rotation from Euler angles (radians) applied X, then Y, then Z.
#[inline]
pub fn quat_from_euler_xyz(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(glam::EulerRot::XYZ, x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_product_matches_definition() {
        let m = outer(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.col(0), Vec3::new(4.0, 8.0, 12.0));
        assert_eq!(m.col(2), Vec3::new(6.0, 12.0, 18.0));
    }

    #[test]
    fn point_inertia_of_axis_point() {
        // Point on the x axis: no inertia about x, m·r² about y and z.
        let i = point_inertia(2.0, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(i.x_axis, Vec3::ZERO);
        assert_eq!(i.y_axis, Vec3::new(0.0, 18.0, 0.0));
        assert_eq!(i.z_axis, Vec3::new(0.0, 0.0, 18.0));
    }

    #[test]
    fn zero_angular_velocity_keeps_orientation() {
        let q = quat_from_euler_xyz(0.3, -0.2, 1.1);
        let next = integrate_orientation(q, Vec3::ZERO, 0.1);
        assert!((next.dot(q) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orientation_integration_rotates_about_axis() {
        let mut q = Quat::IDENTITY;
        let omega = Vec3::new(0.0, 0.0, 1.0);
        for _ in 0..1000 {
            q = integrate_orientation(q, omega, 0.001);
        }
        // One radian about z, small-step integration error only.
        let expected = Quat::from_rotation_z(1.0);
        assert!(q.dot(expected).abs() > 0.9999);
        assert!((q.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn renormalize_degenerate_is_identity() {
        let q = renormalize(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(q, Quat::IDENTITY);
    }

    #[test]
    fn safe_normalize_zero() {
        assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
        assert!((safe_normalize(Vec3::new(0.0, 3.0, 4.0)).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn box_transform_maps_corner() {
        let m = box_transform(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, Vec3::new(2.0, 4.0, 6.0));
        let corner = m.transform_point3(Vec3::splat(0.5));
        assert_eq!(corner, Vec3::new(2.0, 4.0, 6.0));
    }
}
