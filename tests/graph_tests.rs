// Host-side tests for tour loading and validation.

mod common;

use common::TOUR_JSON;
use tour_core::{ConfigurationError, TourConfig, TourGraph};

fn scene_json(id: &str, targets: &[&str]) -> String {
    let hotspots: Vec<String> = targets
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                r#"{{"id":"{id}-{i}","pitch":0,"yaw":0,"targetSceneId":"{t}","label":"go"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"id":"{id}","title":"{id}","src":"/{id}.jpg","thumb":"/{id}_t.jpg",
            "initialYaw":0,"initialPitch":0,"hotspots":[{}]}}"#,
        hotspots.join(",")
    )
}

fn tour(scenes: &[String]) -> String {
    format!(r#"{{"scenes":[{}]}}"#, scenes.join(","))
}

#[test]
fn lookup_returns_every_declared_scene_unchanged() {
    let config: TourConfig = serde_json::from_str(TOUR_JSON).unwrap();
    let graph = TourGraph::load(TOUR_JSON).unwrap();
    assert_eq!(graph.scenes(), config.scenes.as_slice());
    for scene in &config.scenes {
        assert_eq!(graph.scene(&scene.id).unwrap(), scene);
    }
}

#[test]
fn first_scene_is_first_declared() {
    let graph = TourGraph::load(TOUR_JSON).unwrap();
    assert_eq!(graph.first_scene().id, "lobby");
}

#[test]
fn every_hotspot_target_resolves() {
    let graph = TourGraph::load(TOUR_JSON).unwrap();
    for scene in graph.scenes() {
        for h in &scene.hotspots {
            assert!(graph.scene(&h.target_scene_id).is_ok(), "{} dangles", h.id);
        }
    }
}

#[test]
fn unknown_scene_lookup_is_not_found() {
    let graph = TourGraph::load(TOUR_JSON).unwrap();
    let err = graph.scene("attic").unwrap_err();
    assert_eq!(err.id, "attic");
    assert_eq!(err.to_string(), "scene `attic` not found");
}

#[test]
fn dangling_hotspot_fails_construction() {
    let raw = tour(&[scene_json("a", &["b"]), scene_json("b", &["nowhere"])]);
    match TourGraph::load(&raw) {
        Err(ConfigurationError::DanglingHotspot {
            scene,
            hotspot,
            target,
        }) => {
            assert_eq!(scene, "b");
            assert_eq!(hotspot, "b-0");
            assert_eq!(target, "nowhere");
        }
        other => panic!("expected dangling hotspot error, got {other:?}"),
    }
}

#[test]
fn duplicate_scene_ids_fail_construction() {
    let raw = tour(&[scene_json("a", &[]), scene_json("a", &[])]);
    assert!(matches!(
        TourGraph::load(&raw),
        Err(ConfigurationError::DuplicateScene { id }) if id == "a"
    ));
}

#[test]
fn empty_tour_fails_construction() {
    assert!(matches!(
        TourGraph::load(r#"{"scenes":[]}"#),
        Err(ConfigurationError::EmptyTour)
    ));
}

#[test]
fn missing_required_field_is_a_configuration_error() {
    // no "src"
    let raw = r#"{"scenes":[{"id":"a","title":"A","thumb":"/t.jpg",
        "initialYaw":0,"initialPitch":0,"hotspots":[]}]}"#;
    assert!(matches!(
        TourGraph::load(raw),
        Err(ConfigurationError::Parse(_))
    ));
}

#[test]
fn wrong_field_type_is_a_configuration_error() {
    let raw = r#"{"scenes":[{"id":"a","title":"A","src":"/a.jpg","thumb":"/t.jpg",
        "initialYaw":"east","initialPitch":0,"hotspots":[]}]}"#;
    assert!(matches!(
        TourGraph::load(raw),
        Err(ConfigurationError::Parse(_))
    ));
}

#[test]
fn non_finite_angles_are_rejected() {
    let mut config: TourConfig = serde_json::from_str(TOUR_JSON).unwrap();
    config.scenes[1].hotspots[0].yaw = f64::NAN;
    match TourGraph::from_config(config) {
        Err(ConfigurationError::InvalidAngle { scene, field }) => {
            assert_eq!(scene, "hall");
            assert_eq!(field, "hotspots.hall-lobby");
        }
        other => panic!("expected invalid angle, got {other:?}"),
    }
}

#[test]
fn image_source_alias_is_accepted() {
    let raw = r#"{"scenes":[{"id":"a","title":"A","imageSource":"/a.jpg","thumbnail":"/t.jpg",
        "initialYaw":0,"initialPitch":0,"hotspots":[]}]}"#;
    let graph = TourGraph::load(raw).unwrap();
    assert_eq!(graph.first_scene().image_source, "/a.jpg");
    assert_eq!(graph.first_scene().thumbnail, "/t.jpg");
    assert!(graph.first_scene().info_spots.is_empty());
}

#[test]
fn search_matches_titles_case_insensitively() {
    let graph = TourGraph::load(TOUR_JSON).unwrap();
    let ids: Vec<&str> = graph.search("HALL").map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["hall"]);
    let ids: Vec<&str> = graph.search("r").map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["hall", "roof"]);
    assert_eq!(graph.search("  ").count(), 3);
    assert_eq!(graph.search("basement").count(), 0);
}

#[test]
fn map_points_only_include_placed_scenes() {
    let graph = TourGraph::load(TOUR_JSON).unwrap();
    let placed: Vec<(&str, f32, f32)> = graph
        .map_points()
        .map(|(s, p)| (s.id.as_str(), p.x, p.y))
        .collect();
    assert_eq!(placed, vec![("lobby", 20.0, 70.0), ("hall", 55.0, 40.0)]);
    assert_eq!(graph.floorplan(), Some("/tour/floorplan.png"));
}

#[test]
fn viewer_settings_default_when_absent() {
    let graph = TourGraph::load(TOUR_JSON).unwrap();
    assert_eq!(graph.viewer_settings().fade_duration_ms, 500);
    assert_eq!(graph.viewer_settings().default_hfov, 100.0);
}

#[test]
fn viewer_settings_are_read_from_document() {
    let raw = format!(
        r#"{{"viewer":{{"fadeDurationMs":250,"loadTimeoutMs":0}},"scenes":[{}]}}"#,
        scene_json("a", &[])
    );
    let graph = TourGraph::load(&raw).unwrap();
    let s = graph.viewer_settings();
    assert_eq!(s.fade_duration_ms, 250);
    assert_eq!(s.load_timeout_ms, 0);
    assert_eq!(s.zoom_step, 10.0);
}

#[test]
fn out_of_range_viewer_settings_are_rejected() {
    let cases = [
        (r#""zoomStep":-10"#, "zoomStep"),
        (r#""zoomStep":0"#, "zoomStep"),
        (r#""defaultHfov":150"#, "defaultHfov"),
        (r#""defaultHfov":20"#, "defaultHfov"),
    ];
    for (setting, expected) in cases {
        let raw = format!(
            r#"{{"viewer":{{{setting}}},"scenes":[{}]}}"#,
            scene_json("a", &[])
        );
        match TourGraph::load(&raw) {
            Err(ConfigurationError::InvalidViewerSetting { field, .. }) => {
                assert_eq!(field, expected, "{setting}")
            }
            other => panic!("{setting}: expected invalid viewer setting, got {other:?}"),
        }
    }
}

#[test]
fn non_finite_autorotate_rate_is_rejected() {
    let mut config: TourConfig = serde_json::from_str(TOUR_JSON).unwrap();
    config.viewer.autorotate_rate = f64::INFINITY;
    assert!(matches!(
        TourGraph::from_config(config),
        Err(ConfigurationError::InvalidViewerSetting {
            field: "autorotateRate",
            ..
        })
    ));
}
