//! Demo scene builders.
//!
//! Every preset is rebuilt from the current settings, so a reset picks up
//! new masses and stiffness without touching the builders.

use glam::{Quat, Vec3};

use crate::core::math::quat_from_euler_xyz;
use crate::domain::{SceneError, SimulationSettings};
use crate::systems::fluid::Fluid;
use crate::systems::springs::{PointId, SpringPoint};

use super::scene::{Scene, ScenePreset};

/// Half-thickness of the floor slab used by the rigid-body scenes.
const FLOOR_HALF_THICKNESS: f32 = 5.0;
const FLOOR_EXTENT: f32 = 500.0;

const CHAIN_COUNT: usize = 4;
const CHAIN_LINKS: usize = 12;
const CHAIN_SPACING: f32 = 0.08;

const CLOTH_SIDE: usize = 10;
const CLOTH_SPACING: f32 = 0.08;

pub(crate) fn build_scene(preset: ScenePreset, settings: &SimulationSettings) -> Result<Scene, SceneError> {
    let mut scene = Scene::new();
    match preset {
        ScenePreset::SpringPair => spring_pair(&mut scene, settings)?,
        ScenePreset::SpringChains => spring_chains(&mut scene, settings)?,
        ScenePreset::SpinningBox => spinning_box(&mut scene, settings)?,
        ScenePreset::BoxCollision => box_collision(&mut scene, settings)?,
        ScenePreset::BoxPile => box_pile(&mut scene, settings)?,
        ScenePreset::ClothOverBox => cloth_over_box(&mut scene, settings)?,
        ScenePreset::FluidBlock => {
            scene.fluid = Some(Fluid::from_settings(&settings.fluid, &settings.boundary));
        }
    }
    Ok(scene)
}

/// Point with the scene-wide damping applied.
fn point(settings: &SimulationSettings, position: Vec3, mass: f32) -> SpringPoint {
    SpringPoint::new(position, mass).with_damping(settings.linear_damping)
}

/// Spring from `a` to `b` with the scene-wide stiffness, damping and tear limit.
fn link(scene: &mut Scene, settings: &SimulationSettings, a: PointId, b: PointId) -> Result<(), SceneError> {
    let spring = scene.connect(a, b, settings.spring_stiffness)?;
    spring.damping = settings.spring_damping;
    spring.tear_threshold = settings.tear_threshold;
    Ok(())
}

fn spring_pair(scene: &mut Scene, settings: &SimulationSettings) -> Result<(), SceneError> {
    let a = scene.add_point(point(settings, Vec3::new(-0.3, 0.5, 0.0), settings.point_mass));
    let b = scene.add_point(point(settings, Vec3::new(0.3, 0.5, 0.0), settings.point_mass));
    link(scene, settings, a, b)?;
    // Start stretched to twice the rest length.
    scene.springs[0].rest_length *= 0.5;
    Ok(())
}

/// Chains laid out horizontally from a fixed anchor; they swing down under gravity.
fn spring_chains(scene: &mut Scene, settings: &SimulationSettings) -> Result<(), SceneError> {
    let link_mass = settings.point_mass / CHAIN_LINKS as f32;
    for chain in 0..CHAIN_COUNT {
        let z = -0.3 + 0.2 * chain as f32;
        let anchor = Vec3::new(-0.5, 0.8, z);
        let mut previous = scene.add_point(SpringPoint::fixed(anchor, link_mass));
        for i in 1..CHAIN_LINKS {
            let position = anchor + Vec3::new(CHAIN_SPACING * i as f32, 0.0, 0.0);
            let current = scene.add_point(point(settings, position, link_mass));
            link(scene, settings, previous, current)?;
            previous = current;
        }
    }
    Ok(())
}

/// Static slab whose top face sits on the boundary floor.
fn add_floor(scene: &mut Scene, settings: &SimulationSettings) -> Result<(), SceneError> {
    let size = Vec3::new(FLOOR_EXTENT, 2.0 * FLOOR_HALF_THICKNESS, FLOOR_EXTENT);
    let position = Vec3::new(0.0, settings.boundary.floor - FLOOR_HALF_THICKNESS, 0.0);
    scene.add_box(size, 1000.0, position, Quat::IDENTITY)?.set_static(true);
    Ok(())
}

fn spinning_box(scene: &mut Scene, settings: &SimulationSettings) -> Result<(), SceneError> {
    add_floor(scene, settings)?;
    let body = scene.add_box(Vec3::new(0.6, 0.3, 0.4), 1.0, Vec3::new(0.0, 0.3, 0.0), Quat::IDENTITY)?;
    // Push one corner sideways so the box tumbles as it falls.
    if let Some(corner) = body.mass_point_position(0) {
        body.apply_impulse(Vec3::new(0.0, 0.0, 1.5), corner);
    }
    Ok(())
}

fn box_collision(scene: &mut Scene, settings: &SimulationSettings) -> Result<(), SceneError> {
    add_floor(scene, settings)?;
    let size = Vec3::splat(0.3);
    scene
        .add_box(size, 1.0, Vec3::new(-0.7, 0.2, 0.0), Quat::IDENTITY)?
        .set_linear_velocity(Vec3::new(2.0, 0.0, 0.0));
    scene
        .add_box(size, 1.0, Vec3::new(0.7, 0.25, 0.05), quat_from_euler_xyz(0.3, 0.2, 0.5))?
        .set_linear_velocity(Vec3::new(-2.0, 0.0, 0.0));
    Ok(())
}

fn box_pile(scene: &mut Scene, settings: &SimulationSettings) -> Result<(), SceneError> {
    add_floor(scene, settings)?;
    let size = Vec3::splat(0.3);
    for column in 0..2 {
        let x = if column == 0 { -0.25 } else { 0.25 };
        for level in 0..5 {
            let y = settings.boundary.floor + 0.5 + 0.45 * level as f32;
            let tilt = 0.1 * (level as f32 + column as f32);
            scene.add_box(size, 1.0, Vec3::new(x, y, 0.0), quat_from_euler_xyz(tilt, 0.0, 0.5 * tilt))?;
        }
    }
    Ok(())
}

/// Square sheet with structural and shear springs above a static box.
fn cloth_over_box(scene: &mut Scene, settings: &SimulationSettings) -> Result<(), SceneError> {
    scene
        .add_box(Vec3::splat(0.6), 1.0, Vec3::new(0.0, -0.6, 0.0), Quat::IDENTITY)?
        .set_static(true);

    let mass = settings.point_mass * 0.1;
    let half = 0.5 * CLOTH_SPACING * (CLOTH_SIDE - 1) as f32;
    let first = scene.points.len();
    for row in 0..CLOTH_SIDE {
        for col in 0..CLOTH_SIDE {
            let position = Vec3::new(
                col as f32 * CLOTH_SPACING - half,
                0.2,
                row as f32 * CLOTH_SPACING - half,
            );
            scene.add_point(point(settings, position, mass));
        }
    }

    let at = |row: usize, col: usize| PointId(first + row * CLOTH_SIDE + col);
    for row in 0..CLOTH_SIDE {
        for col in 0..CLOTH_SIDE {
            if col + 1 < CLOTH_SIDE {
                link(scene, settings, at(row, col), at(row, col + 1))?;
            }
            if row + 1 < CLOTH_SIDE {
                link(scene, settings, at(row, col), at(row + 1, col))?;
            }
            if row + 1 < CLOTH_SIDE && col + 1 < CLOTH_SIDE {
                link(scene, settings, at(row, col), at(row + 1, col + 1))?;
                link(scene, settings, at(row, col + 1), at(row + 1, col))?;
            }
        }
    }
    Ok(())
}
