use glam::{Quat, Vec3};

use crate::core::math::EPSILON;
use crate::domain::SceneError;
use crate::systems::fluid::Fluid;
use crate::systems::rigid_body::{box_mass_points, RigidBody};
use crate::systems::springs::{PointId, Spring, SpringPoint};

/// Built-in demo scenes, numbered the way the JS scene picker numbers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenePreset {
    /// Two free points joined by a stretched spring.
    SpringPair,
    /// Horizontal chains hanging from fixed anchors.
    SpringChains,
    /// One box spun up by an off-center push.
    SpinningBox,
    /// Two boxes flying into each other.
    BoxCollision,
    /// Two columns of boxes dropped onto a static floor slab.
    BoxPile,
    /// A cloth sheet falling onto a static box.
    ClothOverBox,
    /// The SPH block from the fluid settings.
    FluidBlock,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 7] = [
        ScenePreset::SpringPair,
        ScenePreset::SpringChains,
        ScenePreset::SpinningBox,
        ScenePreset::BoxCollision,
        ScenePreset::BoxPile,
        ScenePreset::ClothOverBox,
        ScenePreset::FluidBlock,
    ];

    pub fn from_u8(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        match self {
            ScenePreset::SpringPair => 0,
            ScenePreset::SpringChains => 1,
            ScenePreset::SpinningBox => 2,
            ScenePreset::BoxCollision => 3,
            ScenePreset::BoxPile => 4,
            ScenePreset::ClothOverBox => 5,
            ScenePreset::FluidBlock => 6,
        }
    }
}

/// Everything a world simulates: one arena per entity kind.
///
/// Springs refer to points by index, so points are only ever appended; a
/// scene is rebuilt from scratch rather than edited in place.
#[derive(Default)]
pub struct Scene {
    pub points: Vec<SpringPoint>,
    pub springs: Vec<Spring>,
    pub bodies: Vec<RigidBody>,
    pub fluid: Option<Fluid>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, point: SpringPoint) -> PointId {
        self.points.push(point);
        PointId(self.points.len() - 1)
    }

    /// Join two existing points with a spring at their current separation.
    /// Points closer than `EPSILON` would give a spring with no direction.
    pub fn connect(&mut self, a: PointId, b: PointId, stiffness: f32) -> Result<&mut Spring, SceneError> {
        self.check_point(a)?;
        self.check_point(b)?;
        if a == b || self.points[a.0].position.distance(self.points[b.0].position) < EPSILON {
            return Err(SceneError::DegenerateSpring(a.0));
        }
        let spring = Spring::between(&self.points, a, b, stiffness);
        self.springs.push(spring);
        let last = self.springs.len() - 1;
        Ok(&mut self.springs[last])
    }

    pub fn add_body(&mut self, body: RigidBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Box of the given edge lengths, mass split over its eight corners.
    pub fn add_box(
        &mut self,
        size: Vec3,
        mass: f32,
        position: Vec3,
        orientation: Quat,
    ) -> Result<&mut RigidBody, SceneError> {
        let body = RigidBody::new(box_mass_points(size, mass), position, orientation)?.with_scale(size);
        let index = self.add_body(body);
        Ok(&mut self.bodies[index])
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.springs.clear();
        self.bodies.clear();
        self.fluid = None;
    }

    pub fn particle_count(&self) -> usize {
        self.fluid.as_ref().map_or(0, Fluid::len)
    }

    fn check_point(&self, id: PointId) -> Result<(), SceneError> {
        if id.0 < self.points.len() {
            Ok(())
        } else {
            Err(SceneError::PointOutOfRange { index: id.0, count: self.points.len() })
        }
    }
}
