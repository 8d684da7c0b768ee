//! Collision - oriented-box detection and impulse response.

mod contact;
mod detect;
mod obb;

pub use contact::{resolve_point_contact, resolve_rigid_contact, ImpulseOutcome};
pub use detect::{detect_and_resolve_collision, detect_and_resolve_point_collision};
pub use obb::{check_collision, check_point, CollisionInfo, PointContact, UNIT_CORNERS};
