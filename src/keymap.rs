use tour_core::{Intent, ZoomDirection};

/// Map a `KeyboardEvent.key` value to a viewer intent.
#[inline]
pub fn intent_for_key(key: &str) -> Option<Intent> {
    if let Some(i) = scene_index_for_digit(key) {
        return Some(Intent::SceneAt(i));
    }
    match key {
        "+" | "=" => Some(Intent::Zoom(ZoomDirection::In)),
        "-" | "_" => Some(Intent::Zoom(ZoomDirection::Out)),
        "r" | "R" => Some(Intent::Reset),
        "f" | "F" | "Enter" => Some(Intent::ToggleFullscreen),
        " " => Some(Intent::ToggleAutorotate),
        "Escape" => Some(Intent::DismissOverlay),
        "ArrowRight" => Some(Intent::NextScene),
        "ArrowLeft" => Some(Intent::PreviousScene),
        _ => None,
    }
}

/// Digits `1`..`9` select the scene at that (1-based) position.
#[inline]
pub fn scene_index_for_digit(key: &str) -> Option<usize> {
    match key {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        "4" => Some(3),
        "5" => Some(4),
        "6" => Some(5),
        "7" => Some(6),
        "8" => Some(7),
        "9" => Some(8),
        _ => None,
    }
}
