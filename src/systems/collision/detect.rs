//! Detection + response in one call.
//!
//! `check_collision` is one-sided, so a pair is tested twice: corners of B in
//! A, and if that finds nothing, corners of A in B with the normal flipped so
//! it still points from B toward A.

use crate::domain::ContactSettings;
use crate::systems::rigid_body::{BodyState, RigidBody};
use crate::systems::springs::SpringPoint;

use super::contact::{resolve_point_contact, resolve_rigid_contact, ImpulseOutcome};
use super::obb::{check_collision, check_point};

/// Test a body pair in both directions and resolve the first contact found.
///
/// Returns `NoContact` when neither test hits; any other outcome means a
/// contact was found and already handled.
pub fn detect_and_resolve_collision(
    a: &mut RigidBody,
    b: &mut RigidBody,
    settings: &ContactSettings,
) -> ImpulseOutcome {
    if !a.is_dynamic() && !b.is_dynamic() {
        return ImpulseOutcome::NoContact;
    }

    let transform_a = a.world_transform();
    let transform_b = b.world_transform();

    let info = check_collision(&transform_a, &transform_b);
    if info.is_valid {
        return resolve_rigid_contact(&info, a, b, settings);
    }

    // Corners of A inside B: the normal comes out pointing from A toward B.
    let reverse = check_collision(&transform_b, &transform_a);
    if reverse.is_valid {
        return resolve_rigid_contact(&reverse.flipped(), a, b, settings);
    }

    ImpulseOutcome::NoContact
}

/// Test a spring point against a body, resolve the impulse and move the point
/// back onto the face it came through.
pub fn detect_and_resolve_point_collision(
    body: &mut RigidBody,
    point: &mut SpringPoint,
    settings: &ContactSettings,
) -> ImpulseOutcome {
    if body.state() == BodyState::Uninitialized {
        return ImpulseOutcome::NoContact;
    }

    let transform = body.world_transform();
    let Some(contact) = check_point(&transform, point.position, point.prev_position) else {
        return ImpulseOutcome::NoContact;
    };

    let outcome = resolve_point_contact(&contact.info, body, point, settings);
    if !point.is_static {
        point.position = contact.surface;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::rigid_body::box_mass_points;
    use glam::{Quat, Vec3};

    fn unit_box(position: Vec3, velocity: Vec3) -> RigidBody {
        cube(position, 1.0, velocity)
    }

    fn cube(position: Vec3, size: f32, velocity: Vec3) -> RigidBody {
        let mut body = RigidBody::new(box_mass_points(Vec3::splat(size), 1.0), position, Quat::IDENTITY)
            .unwrap()
            .with_scale(Vec3::splat(size));
        body.set_linear_velocity(velocity);
        body
    }

    #[test]
    fn finds_contact_in_either_direction() {
        let settings = ContactSettings::default();

        // The small cube's +x corners poke into the big one from the left.
        let mut big = unit_box(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        let mut small = cube(Vec3::new(-0.7, 0.0, 0.0), 0.5, Vec3::new(1.0, 0.0, 0.0));
        let forward = detect_and_resolve_collision(&mut big, &mut small, &settings);
        assert!(forward.is_applied());
        assert!(big.linear_velocity().x > -1.0);
        assert!(small.linear_velocity().x < 1.0);
        let total = big.linear_momentum() + small.linear_momentum();
        assert!(total.abs_diff_eq(Vec3::ZERO, 1e-5));

        // Roles swapped: only the reverse test can see the contact.
        let mut small = cube(Vec3::new(-0.7, 0.0, 0.0), 0.5, Vec3::new(1.0, 0.0, 0.0));
        let mut big = unit_box(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        let swapped = detect_and_resolve_collision(&mut small, &mut big, &settings);
        assert!(swapped.is_applied());
        assert!(small.linear_velocity().x < 1.0);
        assert!(big.linear_velocity().x > -1.0);
    }

    #[test]
    fn swapping_roles_gives_the_same_impulse() {
        let settings = ContactSettings::default();
        let mut a = unit_box(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        let mut b = cube(Vec3::new(-0.7, 0.0, 0.0), 0.5, Vec3::new(1.0, 0.0, 0.0));
        let mut a2 = a.clone();
        let mut b2 = b.clone();

        let forward = detect_and_resolve_collision(&mut a, &mut b, &settings);
        let backward = detect_and_resolve_collision(&mut b2, &mut a2, &settings);
        match (forward, backward) {
            (ImpulseOutcome::Applied(j1), ImpulseOutcome::Applied(j2)) => {
                assert!((j1 - j2).abs() < 1e-4, "{j1} vs {j2}");
            }
            other => panic!("expected two applied impulses, got {other:?}"),
        }
        assert!(a.linear_momentum().abs_diff_eq(a2.linear_momentum(), 1e-4));
        assert!(b.linear_momentum().abs_diff_eq(b2.linear_momentum(), 1e-4));
    }

    #[test]
    fn far_apart_bodies_do_not_touch() {
        let mut a = unit_box(Vec3::ZERO, Vec3::ZERO);
        let mut b = unit_box(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO);
        let outcome = detect_and_resolve_collision(&mut a, &mut b, &ContactSettings::default());
        assert_eq!(outcome, ImpulseOutcome::NoContact);
    }

    #[test]
    fn point_is_pushed_back_to_the_entry_face() {
        let mut body = unit_box(Vec3::ZERO, Vec3::ZERO).with_static(true);
        let mut point = SpringPoint::new(Vec3::new(0.1, 0.6, 0.0), 1.0).with_velocity(Vec3::new(0.0, -2.0, 0.0));
        point.integrate_position(0.1, point.velocity);
        assert!(point.position.y < 0.5);

        let outcome = detect_and_resolve_point_collision(&mut body, &mut point, &ContactSettings::default());
        assert!(outcome.is_applied());
        assert!((point.position.y - 0.5).abs() < 1e-5);
        assert!((point.position.x - 0.1).abs() < 1e-5);
        assert!(point.velocity.y > 0.0);
    }

    #[test]
    fn point_outside_is_left_alone() {
        let mut body = unit_box(Vec3::ZERO, Vec3::ZERO);
        let mut point = SpringPoint::new(Vec3::new(0.0, 2.0, 0.0), 1.0);
        let before = point.clone();
        let outcome = detect_and_resolve_point_collision(&mut body, &mut point, &ContactSettings::default());
        assert_eq!(outcome, ImpulseOutcome::NoContact);
        assert_eq!(point, before);
    }
}
