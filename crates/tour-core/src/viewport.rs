//! Viewport control over the active renderer.
//!
//! The controller holds at most one `ViewportHandle`, attached once the
//! renderer has loaded a scene and detached the moment a transition swaps
//! the image. Every intent is a silent no-op while detached.

use std::ops::RangeInclusive;

use crate::constants::{
    AUTOROTATE_RATE_DEG_PER_SEC, DEFAULT_HFOV_DEG, MAX_HFOV_DEG, MIN_HFOV_DEG, ZOOM_STEP_DEG,
};
use crate::graph::Scene;

/// Live connection to the renderer instance showing the current scene.
///
/// All angles are in degrees.
pub trait ViewportHandle {
    fn hfov(&self) -> f64;
    fn set_hfov(&mut self, deg: f64);
    fn set_pitch(&mut self, deg: f64);
    fn set_yaw(&mut self, deg: f64);
    fn start_autorotate(&mut self, deg_per_sec: f64);
    fn stop_autorotate(&mut self);
    fn toggle_fullscreen(&mut self);

    /// Field-of-view range the renderer accepts.
    fn hfov_bounds(&self) -> RangeInclusive<f64> {
        MIN_HFOV_DEG..=MAX_HFOV_DEG
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Camera settings a controller applies to the handle it wraps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTuning {
    pub default_hfov: f64,
    pub zoom_step: f64,
    pub autorotate_rate: f64,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            default_hfov: DEFAULT_HFOV_DEG,
            zoom_step: ZOOM_STEP_DEG,
            autorotate_rate: AUTOROTATE_RATE_DEG_PER_SEC,
        }
    }
}

#[derive(Default)]
pub struct ViewportController {
    handle: Option<Box<dyn ViewportHandle>>,
    autorotating: bool,
    tuning: ViewportTuning,
}

impl ViewportController {
    pub fn new(tuning: ViewportTuning) -> Self {
        Self {
            handle: None,
            autorotating: false,
            tuning,
        }
    }

    pub fn attach(&mut self, handle: Box<dyn ViewportHandle>) {
        self.handle = Some(handle);
    }

    /// Drop the reference to the current renderer. Returns it so the caller
    /// can dispose of it explicitly.
    pub fn detach(&mut self) -> Option<Box<dyn ViewportHandle>> {
        self.handle.take()
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_autorotating(&self) -> bool {
        self.autorotating
    }

    /// Current hfov of the attached renderer.
    pub fn live_hfov(&self) -> Option<f64> {
        self.handle.as_ref().map(|h| h.hfov())
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        let Some(h) = self.handle.as_mut() else {
            return;
        };
        let step = match direction {
            ZoomDirection::In => -self.tuning.zoom_step,
            ZoomDirection::Out => self.tuning.zoom_step,
        };
        let bounds = h.hfov_bounds();
        let next = (h.hfov() + step).clamp(*bounds.start(), *bounds.end());
        h.set_hfov(next);
    }

    /// Return to `scene`'s declared orientation and the default hfov.
    pub fn reset(&mut self, scene: &Scene) {
        let Some(h) = self.handle.as_mut() else {
            return;
        };
        h.set_pitch(scene.initial_pitch);
        h.set_yaw(scene.initial_yaw);
        h.set_hfov(self.tuning.default_hfov);
    }

    pub fn toggle_fullscreen(&mut self) {
        if let Some(h) = self.handle.as_mut() {
            h.toggle_fullscreen();
        }
    }

    pub fn toggle_autorotate(&mut self) {
        let Some(h) = self.handle.as_mut() else {
            return;
        };
        if self.autorotating {
            h.stop_autorotate();
        } else {
            h.start_autorotate(self.tuning.autorotate_rate);
        }
        self.autorotating = !self.autorotating;
        log::info!("[viewport] autorotate={}", self.autorotating);
    }

    /// Stop any drift and clear the flag. Transitions always win over rotation.
    pub fn stop_autorotate(&mut self) {
        if let Some(h) = self.handle.as_mut() {
            h.stop_autorotate();
        }
        self.autorotating = false;
    }
}
