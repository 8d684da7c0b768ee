use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) springs_ms: f64,
    pub(super) rigid_ms: f64,
    pub(super) collision_ms: f64,
    pub(super) fluid_ms: f64,
    pub(super) render_ms: f64,

    pub(super) springs_torn: u32,
    pub(super) point_wall_hits: u32,
    pub(super) body_pairs_tested: u32,
    pub(super) point_contacts_tested: u32,
    pub(super) contacts_found: u32,
    pub(super) impulses_applied: u32,
    pub(super) degenerate_contacts: u32,
    pub(super) neighbor_pairs: u32,
    pub(super) fluid_wall_hits: u32,

    pub(super) point_count: u32,
    pub(super) spring_count: u32,
    pub(super) body_count: u32,
    pub(super) particle_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        PerfStats {
            step_ms: 0.0,
            springs_ms: 0.0,
            rigid_ms: 0.0,
            collision_ms: 0.0,
            fluid_ms: 0.0,
            render_ms: 0.0,

            springs_torn: 0,
            point_wall_hits: 0,
            body_pairs_tested: 0,
            point_contacts_tested: 0,
            contacts_found: 0,
            impulses_applied: 0,
            degenerate_contacts: 0,
            neighbor_pairs: 0,
            fluid_wall_hits: 0,

            point_count: 0,
            spring_count: 0,
            body_count: 0,
            particle_count: 0,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn springs_ms(&self) -> f64 { self.springs_ms }
    #[wasm_bindgen(getter)]
    pub fn rigid_ms(&self) -> f64 { self.rigid_ms }
    #[wasm_bindgen(getter)]
    pub fn collision_ms(&self) -> f64 { self.collision_ms }
    #[wasm_bindgen(getter)]
    pub fn fluid_ms(&self) -> f64 { self.fluid_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn springs_torn(&self) -> u32 { self.springs_torn }
    #[wasm_bindgen(getter)]
    pub fn point_wall_hits(&self) -> u32 { self.point_wall_hits }
    #[wasm_bindgen(getter)]
    pub fn body_pairs_tested(&self) -> u32 { self.body_pairs_tested }
    #[wasm_bindgen(getter)]
    pub fn point_contacts_tested(&self) -> u32 { self.point_contacts_tested }
    #[wasm_bindgen(getter)]
    pub fn contacts_found(&self) -> u32 { self.contacts_found }
    #[wasm_bindgen(getter)]
    pub fn impulses_applied(&self) -> u32 { self.impulses_applied }
    #[wasm_bindgen(getter)]
    pub fn degenerate_contacts(&self) -> u32 { self.degenerate_contacts }
    #[wasm_bindgen(getter)]
    pub fn neighbor_pairs(&self) -> u32 { self.neighbor_pairs }
    #[wasm_bindgen(getter)]
    pub fn fluid_wall_hits(&self) -> u32 { self.fluid_wall_hits }
    #[wasm_bindgen(getter)]
    pub fn point_count(&self) -> u32 { self.point_count }
    #[wasm_bindgen(getter)]
    pub fn spring_count(&self) -> u32 { self.spring_count }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
}
