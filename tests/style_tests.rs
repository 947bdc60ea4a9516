// Host-side tests for inline style builders.
// The main crate is wasm-only, so the pure module is included directly.

mod style {
    include!("../src/style.rs");
}

use std::time::Duration;

use glam::Vec2;
use style::{fade_style, map_marker_style};

#[test]
fn fade_animates_in_both_directions() {
    let d = Duration::from_millis(500);
    assert_eq!(fade_style(0, d), "opacity:0;transition:opacity 500ms");
    assert_eq!(fade_style(1, d), "opacity:1;transition:opacity 500ms");
}

#[test]
fn map_marker_is_clamped_to_the_floor_plan() {
    assert_eq!(map_marker_style(Vec2::new(20.0, 70.0)), "left:20.00%;top:70.00%");
    assert_eq!(map_marker_style(Vec2::new(-5.0, 140.0)), "left:0.00%;top:100.00%");
}
