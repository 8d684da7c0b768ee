//! Impulse-based contact resolution.
//!
//! Single normal impulse per contact, no friction and no positional
//! correction for rigid pairs.

use glam::{Mat3, Vec3};

use crate::core::math::EPSILON;
use crate::domain::{ContactSettings, InertiaTermMode};
use crate::systems::rigid_body::RigidBody;
use crate::systems::springs::SpringPoint;

use super::obb::CollisionInfo;

/// What the resolver did with a contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImpulseOutcome {
    /// The collision info was not valid.
    NoContact,
    /// Bodies already moving apart along the normal.
    Separating,
    /// No normal approach speed (tangential motion only).
    Sliding,
    /// Impulse of this magnitude applied along the normal.
    Applied(f32),
    /// Denominator vanished (both ends immovable); nothing applied.
    Degenerate,
}

impl ImpulseOutcome {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, ImpulseOutcome::Applied(_))
    }
}

/// Resolve a contact between two rigid bodies. `info.normal` must point from B toward A.
///
/// A receives `+j·n`, B receives `-j·n`, both at the contact point.
pub fn resolve_rigid_contact(
    info: &CollisionInfo,
    a: &mut RigidBody,
    b: &mut RigidBody,
    settings: &ContactSettings,
) -> ImpulseOutcome {
    if !info.is_valid {
        return ImpulseOutcome::NoContact;
    }
    let n = info.normal;
    let r_a = info.point - a.position();
    let r_b = info.point - b.position();

    let v_rel = n.dot(a.point_velocity(info.point) - b.point_velocity(info.point));

    let inv_inertia_a = a.world_inverse_inertia();
    let inv_inertia_b = match settings.inertia_term {
        InertiaTermMode::PerBody => b.world_inverse_inertia(),
        InertiaTermMode::BodyAForBoth => inv_inertia_a,
    };
    let denominator = a.inverse_mass()
        + b.inverse_mass()
        + angular_term(inv_inertia_a, r_a, n)
        + angular_term(inv_inertia_b, r_b, n);

    match impulse_magnitude(v_rel, denominator, settings.restitution) {
        ImpulseOutcome::Applied(j) => {
            a.apply_impulse(n * j, info.point);
            b.apply_impulse(-n * j, info.point);
            ImpulseOutcome::Applied(j)
        }
        other => other,
    }
}

/// Resolve a rigid body (A) against a spring point (B) treated as a particle
/// without rotational inertia.
pub fn resolve_point_contact(
    info: &CollisionInfo,
    body: &mut RigidBody,
    point: &mut SpringPoint,
    settings: &ContactSettings,
) -> ImpulseOutcome {
    if !info.is_valid {
        return ImpulseOutcome::NoContact;
    }
    let n = info.normal;
    let r = info.point - body.position();

    let v_rel = n.dot(body.point_velocity(info.point) - point.velocity);
    let denominator =
        body.inverse_mass() + point.inverse_mass() + angular_term(body.world_inverse_inertia(), r, n);

    match impulse_magnitude(v_rel, denominator, settings.restitution) {
        ImpulseOutcome::Applied(j) => {
            body.apply_impulse(n * j, info.point);
            point.apply_impulse(-n * j);
            ImpulseOutcome::Applied(j)
        }
        other => other,
    }
}

/// `n · ((I⁻¹ (r × n)) × r)`.
#[inline]
fn angular_term(inverse_inertia: Mat3, r: Vec3, n: Vec3) -> f32 {
    n.dot((inverse_inertia * r.cross(n)).cross(r))
}

/// `j = -(1 + c) · v_rel / denominator` for approaching contacts.
fn impulse_magnitude(v_rel: f32, denominator: f32, restitution: f32) -> ImpulseOutcome {
    if v_rel > EPSILON {
        return ImpulseOutcome::Separating;
    }
    if v_rel.abs() <= EPSILON {
        return ImpulseOutcome::Sliding;
    }
    if !(denominator.abs() > EPSILON) || !denominator.is_finite() {
        return ImpulseOutcome::Degenerate;
    }
    ImpulseOutcome::Applied(-(1.0 + restitution) * v_rel / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::collision::check_collision;
    use crate::systems::rigid_body::box_mass_points;
    use glam::Quat;

    fn cube(position: Vec3, size: f32, mass: f32) -> RigidBody {
        RigidBody::new(box_mass_points(Vec3::splat(size), mass), position, Quat::IDENTITY)
            .unwrap()
            .with_scale(Vec3::splat(size))
    }

    /// Unit box at rest, small box moving into its +x face.
    fn incoming_pair() -> (RigidBody, RigidBody, CollisionInfo) {
        let a = cube(Vec3::ZERO, 1.0, 8.0);
        let mut b = cube(Vec3::new(0.55, 0.0, 0.0), 0.2, 1.0);
        b.set_linear_velocity(Vec3::new(-1.0, 0.0, 0.0));
        let info = check_collision(&a.world_transform(), &b.world_transform());
        (a, b, info)
    }

    #[test]
    fn incoming_pair_fixture() {
        let (_, _, info) = incoming_pair();
        assert!(info.is_valid);
        assert!(info.point.abs_diff_eq(Vec3::new(0.45, 0.1, 0.1), 1e-6));
        assert!(info.normal.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn impulse_conserves_linear_momentum() {
        let (mut a, mut b, info) = incoming_pair();
        let before = a.linear_momentum() + b.linear_momentum();

        let outcome = resolve_rigid_contact(&info, &mut a, &mut b, &ContactSettings::default());
        assert!(outcome.is_applied());

        let after = a.linear_momentum() + b.linear_momentum();
        assert!(after.abs_diff_eq(before, 1e-5));
        // A pushed away from B, B slowed down.
        assert!(a.linear_velocity().x < 0.0);
        assert!(b.linear_velocity().x > -1.0);
    }

    #[test]
    fn per_body_and_biased_denominators_differ() {
        let (mut a, mut b, info) = incoming_pair();
        let per_body = resolve_rigid_contact(&info, &mut a, &mut b, &ContactSettings::default());

        let (mut a, mut b, info) = incoming_pair();
        let biased_settings = ContactSettings {
            inertia_term: InertiaTermMode::BodyAForBoth,
            ..ContactSettings::default()
        };
        let biased = resolve_rigid_contact(&info, &mut a, &mut b, &biased_settings);

        // denominators: 1/8 + 1 + 0.005 + 1 and 1/8 + 1 + 0.005 + 0.005
        match (per_body, biased) {
            (ImpulseOutcome::Applied(j1), ImpulseOutcome::Applied(j2)) => {
                assert!((j1 - 1.5 / 2.13).abs() < 1e-4, "per-body j = {j1}");
                assert!((j2 - 1.5 / 1.135).abs() < 1e-4, "biased j = {j2}");
            }
            other => panic!("expected two impulses, got {other:?}"),
        }
    }

    #[test]
    fn separating_bodies_are_left_alone() {
        let (mut a, mut b, info) = incoming_pair();
        b.set_linear_velocity(Vec3::new(1.0, 0.0, 0.0));
        let before = (a.clone(), b.clone());

        let outcome = resolve_rigid_contact(&info, &mut a, &mut b, &ContactSettings::default());
        assert_eq!(outcome, ImpulseOutcome::Separating);
        assert_eq!((a, b), before);
    }

    #[test]
    fn tangential_motion_is_sliding() {
        let (mut a, mut b, info) = incoming_pair();
        b.set_linear_velocity(Vec3::new(0.0, 0.0, 3.0));
        let outcome = resolve_rigid_contact(&info, &mut a, &mut b, &ContactSettings::default());
        assert_eq!(outcome, ImpulseOutcome::Sliding);
    }

    #[test]
    fn static_bodies_are_not_mutated() {
        let (a, mut b, info) = incoming_pair();
        let mut a = a.with_static(true);
        let a_before = a.clone();

        let outcome = resolve_rigid_contact(&info, &mut a, &mut b, &ContactSettings::default());
        assert!(outcome.is_applied());
        assert_eq!(a, a_before);
        // Contact point of B leaves at half its approach speed.
        assert!((b.point_velocity(info.point).x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn two_static_bodies_never_exchange_impulses() {
        let (a, b, info) = incoming_pair();
        let (mut a, mut b) = (a.with_static(true), b.with_static(true));
        let before = (a.clone(), b.clone());

        let outcome = resolve_rigid_contact(&info, &mut a, &mut b, &ContactSettings::default());
        assert!(!outcome.is_applied());
        assert_eq!((a, b), before);
    }

    #[test]
    fn invalid_info_is_no_contact() {
        let (mut a, mut b, _) = incoming_pair();
        let outcome =
            resolve_rigid_contact(&CollisionInfo::NONE, &mut a, &mut b, &ContactSettings::default());
        assert_eq!(outcome, ImpulseOutcome::NoContact);
    }

    #[test]
    fn point_bounces_off_a_static_box() {
        let mut floor = cube(Vec3::ZERO, 1.0, 1.0).with_static(true);
        let mut point = SpringPoint::new(Vec3::new(0.0, 0.45, 0.0), 1.0)
            .with_velocity(Vec3::new(0.0, -2.0, 0.0));
        let info = CollisionInfo { is_valid: true, point: point.position, normal: Vec3::new(0.0, -1.0, 0.0) };

        let outcome = resolve_point_contact(&info, &mut floor, &mut point, &ContactSettings::default());
        assert_eq!(outcome, ImpulseOutcome::Applied(3.0));
        assert!(point.velocity.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn immovable_pair_is_degenerate() {
        let mut floor = cube(Vec3::ZERO, 1.0, 1.0).with_static(true);
        let mut anchor = SpringPoint::fixed(Vec3::new(0.0, 0.45, 0.0), 1.0)
            .with_velocity(Vec3::new(0.0, -2.0, 0.0));
        let info = CollisionInfo { is_valid: true, point: anchor.position, normal: Vec3::new(0.0, -1.0, 0.0) };

        let outcome = resolve_point_contact(&info, &mut floor, &mut anchor, &ContactSettings::default());
        assert_eq!(outcome, ImpulseOutcome::Degenerate);
        assert_eq!(anchor.velocity, Vec3::new(0.0, -2.0, 0.0));
    }
}
