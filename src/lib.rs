//! Physica Engine - physics for the Physica sandbox, compiled to WASM
//!
//! Architecture:
//! - core/        - math helpers, safety and logging macros
//! - domain/      - settings and error types
//! - spatial/     - neighbor search structures
//! - systems/     - springs, rigid bodies, collision, SPH fluid
//! - simulation/  - `WorldCore` orchestration and the wasm `World` facade

// Macros must be declared first so later modules can use them.
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    engine_log!("Physica engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{IntegrationMode, SimulationSettings};
pub use simulation::{PerfStats, Scene, ScenePreset, World, WorldCore};
