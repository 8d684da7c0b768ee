use crate::domain::SimulationSettings;

use super::perf_stats::PerfStats;
use super::scene::Scene;
use super::RenderBuffers;
use super::WorldCore;

pub(super) fn create_world_core(settings: SimulationSettings) -> WorldCore {
    WorldCore {
        settings,
        scene: Scene::new(),
        preset: None,
        frame: 0,
        time: 0.0,

        render: RenderBuffers {
            point_positions: Vec::new(),
            spring_indices: Vec::new(),
            body_transforms: Vec::new(),
            fluid_positions: Vec::new(),
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
