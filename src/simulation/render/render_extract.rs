use super::WorldCore;

pub(super) fn extract_all(world: &mut WorldCore) {
    extract_points(world);
    extract_springs(world);
    extract_bodies(world);
    extract_fluid(world);
}

pub(super) fn extract_points(world: &mut WorldCore) {
    let out = &mut world.render.point_positions;
    out.clear();
    out.reserve(world.scene.points.len() * 3);
    for point in &world.scene.points {
        out.extend_from_slice(&point.position.to_array());
    }
}

pub(super) fn extract_springs(world: &mut WorldCore) {
    let out = &mut world.render.spring_indices;
    out.clear();
    out.reserve(world.scene.springs.len() * 2);
    for spring in &world.scene.springs {
        out.push(spring.a.0 as u32);
        out.push(spring.b.0 as u32);
    }
}

pub(super) fn extract_bodies(world: &mut WorldCore) {
    let out = &mut world.render.body_transforms;
    out.clear();
    out.reserve(world.scene.bodies.len() * 16);
    for body in &world.scene.bodies {
        out.extend_from_slice(&body.world_transform().to_cols_array());
    }
}

pub(super) fn extract_fluid(world: &mut WorldCore) {
    let out = &mut world.render.fluid_positions;
    out.clear();
    let Some(fluid) = world.scene.fluid.as_ref() else {
        return;
    };
    out.reserve(fluid.len() * 3);
    for particle in &fluid.particles {
        out.extend_from_slice(&particle.position.to_array());
    }
}
