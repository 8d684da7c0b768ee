use physica_engine::domain::{IntegrationMode, NeighborSearch, SettingsError};
use physica_engine::{ScenePreset, SimulationSettings, WorldCore};

#[test]
fn partial_settings_round_trip_through_world() {
    let mut world = WorldCore::new();
    world
        .load_settings_json(
            r#"{
                "integrationMode": "midpoint",
                "springStiffness": 80.0,
                "fluid": { "neighborSearch": "allPairs" }
            }"#,
        )
        .unwrap();

    let json = world.settings_json();
    let back = SimulationSettings::from_json(&json).unwrap();
    assert_eq!(&back, world.settings());
    assert_eq!(back.integration_mode, IntegrationMode::Midpoint);
    assert_eq!(back.spring_stiffness, 80.0);
    assert_eq!(back.fluid.neighbor_search, NeighborSearch::AllPairs);
}

#[test]
fn stiffness_applies_on_reset() {
    let mut world = WorldCore::new();
    world.load_scene(ScenePreset::SpringChains).unwrap();
    let before = world.scene().springs[0].stiffness;

    world.load_settings_json(r#"{ "springStiffness": 120.0 }"#).unwrap();
    assert_eq!(world.scene().springs[0].stiffness, before);

    world.reset().unwrap();
    assert_eq!(world.scene().springs[0].stiffness, 120.0);
}

#[test]
fn out_of_range_values_are_rejected() {
    let mut world = WorldCore::new();
    for json in [
        r#"{ "contact": { "restitution": -0.1 } }"#,
        r#"{ "boundary": { "floor": 2.0 } }"#,
        r#"{ "fluid": { "kernelRadius": 0.0 } }"#,
        r#"{ "tearThreshold": 0.0 }"#,
    ] {
        let err = world.load_settings_json(json).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }), "{json}: {err}");
    }
    assert_eq!(world.settings(), &SimulationSettings::default());
}

#[test]
fn tear_threshold_breaks_overloaded_springs() {
    let mut world = WorldCore::new();
    world.load_settings_json(r#"{ "tearThreshold": 1.0 }"#).unwrap();
    world.load_scene(ScenePreset::SpringPair).unwrap();
    assert_eq!(world.spring_count(), 1);

    // The pair starts stretched to twice its rest length: 40 * 0.3 = 12 > 1.
    world.step_fixed();
    assert_eq!(world.spring_count(), 0);
}
