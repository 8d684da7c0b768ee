//! World - scene owner and per-frame driver
//!
//! `WorldCore` holds one arena per entity kind (spring points, springs, rigid
//! bodies, one optional fluid) plus the settings they are stepped with. A frame
//! runs the systems in a fixed order:
//!
//! 1. spring network (forces for every point first, then integration)
//! 2. rigid bodies, each on its own
//! 3. contacts: body pairs, then spring points against bodies
//! 4. fluid, on its own fixed timestep
//!
//! `World` in `facade.rs` is the wasm-bindgen wrapper around it.

use glam::Vec3;

use crate::domain::{IntegrationMode, SceneError, SettingsError, SimulationSettings};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "scene/scene.rs"]
mod scene;
#[path = "scene/presets.rs"]
mod presets;
#[path = "step/step.rs"]
mod step;
#[path = "step/collide.rs"]
mod collide;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use scene::{Scene, ScenePreset};

use perf_timer::PerfTimer;

/// Flat copies of the scene state handed to the renderer.
pub(crate) struct RenderBuffers {
    /// xyz per spring point.
    pub(crate) point_positions: Vec<f32>,
    /// Two point indices per spring.
    pub(crate) spring_indices: Vec<u32>,
    /// Column-major 4x4 box transform per body.
    pub(crate) body_transforms: Vec<f32>,
    /// xyz per fluid particle.
    pub(crate) fluid_positions: Vec<f32>,
}

/// The simulation world
pub struct WorldCore {
    settings: SimulationSettings,
    scene: Scene,
    /// Preset `reset` rebuilds; `None` for an empty or hand-built scene.
    preset: Option<ScenePreset>,

    // State
    frame: u64,
    time: f64,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Empty world with default settings
    pub fn new() -> Self {
        init::create_world_core(SimulationSettings::default())
    }

    /// Empty world with the given settings (validated first)
    pub fn with_settings(settings: SimulationSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(init::create_world_core(settings))
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Replace the settings. On error the current settings stay in place.
    pub fn set_settings(&mut self, settings: SimulationSettings) -> Result<(), SettingsError> {
        settings::apply_settings(self, settings)
    }

    /// Parse, validate and apply a (possibly partial) JSON settings document
    pub fn load_settings_json(&mut self, json: &str) -> Result<(), SettingsError> {
        let settings = SimulationSettings::from_json(json)?;
        settings::apply_settings(self, settings)
    }

    pub fn settings_json(&self) -> String {
        self.settings.to_json()
    }

    pub fn integration_mode(&self) -> IntegrationMode {
        self.settings.integration_mode
    }

    /// Switch the spring integrator; entering Leap-Frog primes the velocities.
    pub fn set_integration_mode(&mut self, mode: IntegrationMode) {
        settings::set_integration_mode(self, mode);
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        settings::set_gravity(self, gravity);
    }

    /// Replace the scene with a freshly built preset
    pub fn load_scene(&mut self, preset: ScenePreset) -> Result<(), SceneError> {
        commands::load_scene(self, preset)
    }

    /// Same as `load_scene`, by the numeric id the JS side uses
    pub fn load_scene_id(&mut self, id: u8) -> Result<(), SceneError> {
        let preset = ScenePreset::from_u8(id).ok_or(SceneError::UnknownPreset(id))?;
        commands::load_scene(self, preset)
    }

    /// Adopt a hand-built scene. `reset` will clear it.
    pub fn set_scene(&mut self, scene: Scene) {
        commands::set_scene(self, scene);
    }

    /// Rebuild the current preset from the current settings
    pub fn reset(&mut self) -> Result<(), SceneError> {
        commands::reset(self)
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn preset(&self) -> Option<ScenePreset> {
        self.preset
    }

    /// Radial kick away from a point two units below the origin, using the
    /// configured strength
    pub fn explode(&mut self) {
        let strength = self.settings.explosion_strength;
        commands::explode(self, strength);
    }

    pub fn explode_with(&mut self, strength: f32) {
        commands::explode(self, strength);
    }

    /// Advance one frame by `dt` seconds. Non-positive or non-finite `dt` is ignored.
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    /// Advance one frame by the configured timestep
    pub fn step_fixed(&mut self) {
        let dt = self.settings.timestep;
        step::step(self, dt);
    }

    pub fn frame(&self) -> u64 { self.frame }

    /// Simulated seconds since the scene was loaded
    pub fn time(&self) -> f64 { self.time }

    pub fn point_count(&self) -> usize { self.scene.points.len() }

    pub fn spring_count(&self) -> usize { self.scene.springs.len() }

    pub fn body_count(&self) -> usize { self.scene.bodies.len() }

    pub fn particle_count(&self) -> usize { self.scene.particle_count() }

    /// Refresh the render buffers from the current scene
    pub fn extract_render_data(&mut self) {
        if self.perf_enabled {
            let t0 = PerfTimer::start();
            render_extract::extract_all(self);
            self.perf_stats.render_ms = t0.elapsed_ms();
        } else {
            render_extract::extract_all(self);
        }
    }

    pub fn point_positions(&self) -> &[f32] {
        &self.render.point_positions
    }

    pub fn spring_indices(&self) -> &[u32] {
        &self.render.spring_indices
    }

    pub fn body_transforms(&self) -> &[f32] {
        &self.render.body_transforms
    }

    pub fn fluid_positions(&self) -> &[f32] {
        &self.render.fluid_positions
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
