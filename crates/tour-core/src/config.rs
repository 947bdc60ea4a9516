//! Runtime engine settings.
//!
//! `EngineConfig` is what the engine consumes; `ViewerSettings` is the optional
//! `viewer` block of the tour document that overrides its defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTOROTATE_RATE_DEG_PER_SEC, DEFAULT_HFOV_DEG, FADE_DURATION_MS, LOAD_TIMEOUT_MS,
    ZOOM_STEP_DEG,
};

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Fixed wait between starting the fade-out and swapping the scene.
    pub fade_duration: Duration,
    /// Bounded wait for the renderer's load callback; `None` waits forever.
    pub load_timeout: Option<Duration>,
    pub default_hfov: f64,
    pub zoom_step: f64,
    pub autorotate_rate: f64,
    /// Hint the images of every hotspot target once a scene has loaded.
    pub prefetch_neighbors: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fade_duration: Duration::from_millis(FADE_DURATION_MS),
            load_timeout: Some(Duration::from_millis(LOAD_TIMEOUT_MS)),
            default_hfov: DEFAULT_HFOV_DEG,
            zoom_step: ZOOM_STEP_DEG,
            autorotate_rate: AUTOROTATE_RATE_DEG_PER_SEC,
            prefetch_neighbors: true,
        }
    }
}

/// Serialized form of the viewer settings, as found in the tour document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerSettings {
    pub fade_duration_ms: u64,
    /// `0` disables the load timeout.
    pub load_timeout_ms: u64,
    pub default_hfov: f64,
    pub zoom_step: f64,
    pub autorotate_rate: f64,
    pub prefetch_neighbors: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            fade_duration_ms: FADE_DURATION_MS,
            load_timeout_ms: LOAD_TIMEOUT_MS,
            default_hfov: DEFAULT_HFOV_DEG,
            zoom_step: ZOOM_STEP_DEG,
            autorotate_rate: AUTOROTATE_RATE_DEG_PER_SEC,
            prefetch_neighbors: true,
        }
    }
}

impl From<&ViewerSettings> for EngineConfig {
    fn from(s: &ViewerSettings) -> Self {
        Self {
            fade_duration: Duration::from_millis(s.fade_duration_ms),
            load_timeout: (s.load_timeout_ms > 0).then(|| Duration::from_millis(s.load_timeout_ms)),
            default_hfov: s.default_hfov,
            zoom_step: s.zoom_step,
            autorotate_rate: s.autorotate_rate,
            prefetch_neighbors: s.prefetch_neighbors,
        }
    }
}
