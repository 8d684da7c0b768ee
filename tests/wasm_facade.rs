#![cfg(target_arch = "wasm32")]

use physica_engine::World;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn rejects_unknown_scene() {
    let mut world = World::new();
    assert!(world.load_scene(200).is_err());
    assert!(world.load_scene(0).is_ok());
}

#[wasm_bindgen_test]
fn rejects_bad_settings_json() {
    let mut world = World::new();
    assert!(world.load_settings("{".to_string()).is_err());
    assert!(world.load_settings(r#"{ "timestep": 0.01 }"#.to_string()).is_ok());
}

#[wasm_bindgen_test]
fn render_layout_tracks_buffers() {
    let mut world = World::new();
    world.load_scene(3).unwrap();
    world.step_fixed();
    world.extract_render_data();
    let layout = world.render_layout();
    assert_eq!(layout.body_transforms_len(), world.body_count() * 16);
    assert_eq!(world.body_transforms().len() as u32, layout.body_transforms_len());
}
