use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::domain::IntegrationMode;

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Pointers and lengths of the render buffers, refreshed by `extract_render_data`.
#[wasm_bindgen]
pub struct RenderLayout {
    point_positions_ptr: u32,
    point_positions_len: u32,
    spring_indices_ptr: u32,
    spring_indices_len: u32,
    body_transforms_ptr: u32,
    body_transforms_len: u32,
    fluid_positions_ptr: u32,
    fluid_positions_len: u32,
}

#[wasm_bindgen]
impl RenderLayout {
    #[wasm_bindgen(getter)]
    pub fn point_positions_ptr(&self) -> u32 { self.point_positions_ptr }
    #[wasm_bindgen(getter)]
    pub fn point_positions_len(&self) -> u32 { self.point_positions_len }

    #[wasm_bindgen(getter)]
    pub fn spring_indices_ptr(&self) -> u32 { self.spring_indices_ptr }
    #[wasm_bindgen(getter)]
    pub fn spring_indices_len(&self) -> u32 { self.spring_indices_len }

    #[wasm_bindgen(getter)]
    pub fn body_transforms_ptr(&self) -> u32 { self.body_transforms_ptr }
    #[wasm_bindgen(getter)]
    pub fn body_transforms_len(&self) -> u32 { self.body_transforms_len }

    #[wasm_bindgen(getter)]
    pub fn fluid_positions_ptr(&self) -> u32 { self.fluid_positions_ptr }
    #[wasm_bindgen(getter)]
    pub fn fluid_positions_len(&self) -> u32 { self.fluid_positions_len }
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create an empty world with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: WorldCore::new() }
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn point_count(&self) -> u32 { self.core.point_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn spring_count(&self) -> u32 { self.core.spring_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === SETTINGS ===

    /// Apply a (possibly partial) JSON settings document
    pub fn load_settings(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_settings_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    pub fn get_settings_json(&self) -> String {
        self.core.settings_json()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.core.set_gravity(Vec3::new(x, y, z));
    }

    /// 0 Euler, 1 Midpoint, 2 Leap-Frog. Returns false for unknown ids.
    pub fn set_integration_mode(&mut self, mode: u8) -> bool {
        match IntegrationMode::from_u8(mode) {
            Some(mode) => {
                self.core.set_integration_mode(mode);
                true
            }
            None => false,
        }
    }

    pub fn integration_mode(&self) -> u8 {
        self.core.integration_mode().as_u8()
    }

    // === SCENE ===

    /// Load a preset scene by id (see `ScenePreset`)
    pub fn load_scene(&mut self, id: u8) -> Result<(), JsValue> {
        self.core
            .load_scene_id(id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Rebuild the current preset
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.core.reset().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Kick everything away from below the floor with the configured strength
    pub fn explode(&mut self) {
        self.core.explode();
    }

    pub fn explode_with(&mut self, strength: f32) {
        self.core.explode_with(strength);
    }

    // === STEPPING ===

    /// Step the simulation forward by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    /// Step by the configured timestep
    pub fn step_fixed(&mut self) {
        self.core.step_fixed();
    }

    // === RENDER DATA ===

    /// Copy the scene state into the render buffers
    pub fn extract_render_data(&mut self) {
        self.core.extract_render_data();
    }

    /// Zero-copy view of the render buffers (valid until the next extract)
    pub fn render_layout(&self) -> RenderLayout {
        RenderLayout {
            point_positions_ptr: self.core.point_positions().as_ptr() as u32,
            point_positions_len: self.core.point_positions().len() as u32,
            spring_indices_ptr: self.core.spring_indices().as_ptr() as u32,
            spring_indices_len: self.core.spring_indices().len() as u32,
            body_transforms_ptr: self.core.body_transforms().as_ptr() as u32,
            body_transforms_len: self.core.body_transforms().len() as u32,
            fluid_positions_ptr: self.core.fluid_positions().as_ptr() as u32,
            fluid_positions_len: self.core.fluid_positions().len() as u32,
        }
    }

    /// xyz per spring point, copied out
    pub fn point_positions(&self) -> Vec<f32> {
        self.core.point_positions().to_vec()
    }

    /// Endpoint index pairs, copied out
    pub fn spring_indices(&self) -> Vec<u32> {
        self.core.spring_indices().to_vec()
    }

    /// 16 floats (column-major) per body, copied out
    pub fn body_transforms(&self) -> Vec<f32> {
        self.core.body_transforms().to_vec()
    }

    /// xyz per fluid particle, copied out
    pub fn fluid_positions(&self) -> Vec<f32> {
        self.core.fluid_positions().to_vec()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Native access to the wrapped core (tests, tools)
    pub fn core(&self) -> &WorldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WorldCore {
        &mut self.core
    }
}
