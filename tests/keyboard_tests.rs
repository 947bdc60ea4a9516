// Host-side tests for the key map.
// The main crate is wasm-only, so the pure module is included directly.

mod keymap {
    include!("../src/keymap.rs");
}

use keymap::{intent_for_key, scene_index_for_digit};
use tour_core::{Intent, ZoomDirection};

#[test]
fn zoom_keys() {
    for key in ["+", "="] {
        assert_eq!(intent_for_key(key), Some(Intent::Zoom(ZoomDirection::In)));
    }
    for key in ["-", "_"] {
        assert_eq!(intent_for_key(key), Some(Intent::Zoom(ZoomDirection::Out)));
    }
}

#[test]
fn viewer_control_keys() {
    assert_eq!(intent_for_key("r"), Some(Intent::Reset));
    assert_eq!(intent_for_key("R"), Some(Intent::Reset));
    assert_eq!(intent_for_key("f"), Some(Intent::ToggleFullscreen));
    assert_eq!(intent_for_key("Enter"), Some(Intent::ToggleFullscreen));
    assert_eq!(intent_for_key(" "), Some(Intent::ToggleAutorotate));
    assert_eq!(intent_for_key("Escape"), Some(Intent::DismissOverlay));
}

#[test]
fn arrows_step_through_scenes() {
    assert_eq!(intent_for_key("ArrowRight"), Some(Intent::NextScene));
    assert_eq!(intent_for_key("ArrowLeft"), Some(Intent::PreviousScene));
    assert_eq!(intent_for_key("ArrowUp"), None);
    assert_eq!(intent_for_key("ArrowDown"), None);
}

#[test]
fn digits_select_scenes_one_based() {
    assert_eq!(scene_index_for_digit("1"), Some(0));
    assert_eq!(scene_index_for_digit("9"), Some(8));
    assert_eq!(scene_index_for_digit("0"), None);
    assert_eq!(intent_for_key("3"), Some(Intent::SceneAt(2)));
}

#[test]
fn unmapped_keys() {
    for key in ["", "a", "x", "Tab", "Shift", "F1", "10"] {
        assert_eq!(intent_for_key(key), None, "key {key:?}");
    }
}
