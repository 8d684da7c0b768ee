use crate::systems::collision::{
    detect_and_resolve_collision, detect_and_resolve_point_collision, ImpulseOutcome,
};

use super::WorldCore;

/// Contact counters for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct ContactTally {
    pub(super) pairs_tested: u32,
    pub(super) points_tested: u32,
    pub(super) found: u32,
    pub(super) applied: u32,
    pub(super) degenerate: u32,
}

impl ContactTally {
    fn record(&mut self, outcome: ImpulseOutcome) {
        match outcome {
            ImpulseOutcome::NoContact => return,
            ImpulseOutcome::Applied(_) => self.applied += 1,
            ImpulseOutcome::Degenerate => self.degenerate += 1,
            ImpulseOutcome::Separating | ImpulseOutcome::Sliding => {}
        }
        self.found += 1;
    }
}

/// Every body pair once (lower index as A), then every spring point against
/// every body.
pub(super) fn resolve_contacts(world: &mut WorldCore) -> ContactTally {
    let mut tally = ContactTally::default();
    let contact = world.settings.contact;
    let scene = &mut world.scene;

    let bodies = &mut scene.bodies;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            tally.pairs_tested += 1;
            tally.record(detect_and_resolve_collision(a, b, &contact));
        }
    }

    for body in scene.bodies.iter_mut() {
        for point in scene.points.iter_mut().filter(|p| !p.is_static) {
            tally.points_tested += 1;
            tally.record(detect_and_resolve_point_collision(body, point, &contact));
        }
    }

    tally
}
