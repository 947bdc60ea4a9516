//! Navigation engine: one graph, one prefetch cache, one viewport controller,
//! one transition controller and one overlay slot.
//!
//! The engine never touches a renderer or the DOM directly. Operations queue
//! [`Effect`]s, and the embedding front-end drains them once per frame with
//! [`TourEngine::tick`].

use std::sync::Arc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::graph::{Scene, TourGraph};
use crate::overlay::{OverlayContent, OverlayDispatcher};
use crate::prefetch::{PrefetchCache, ResourceHints};
use crate::transition::{
    Effect, LoadToken, MarkerAction, SceneView, SwitchOutcome, TransitionController,
};
use crate::viewport::{ViewportController, ViewportHandle, ViewportTuning, ZoomDirection};

/// User intent coming from keys or on-screen controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Zoom(ZoomDirection),
    Reset,
    ToggleFullscreen,
    ToggleAutorotate,
    DismissOverlay,
    NextScene,
    PreviousScene,
    /// Jump to the scene at this position in declaration order.
    SceneAt(usize),
    GoTo(String),
}

pub struct TourEngine<H: ResourceHints> {
    graph: Arc<TourGraph>,
    config: EngineConfig,
    prefetch: PrefetchCache<H>,
    viewport: ViewportController,
    transition: TransitionController,
    overlay: OverlayDispatcher,
    queued: Vec<Effect>,
}

impl<H: ResourceHints> TourEngine<H> {
    /// Create an engine positioned on the tour's first scene and queue its
    /// initial load.
    pub fn new(graph: Arc<TourGraph>, config: EngineConfig, hints: H) -> Self {
        let viewport = ViewportController::new(ViewportTuning {
            default_hfov: config.default_hfov,
            zoom_step: config.zoom_step,
            autorotate_rate: config.autorotate_rate,
        });
        let transition = TransitionController::new(graph.clone(), &config);
        let mut engine = Self {
            graph,
            config,
            prefetch: PrefetchCache::new(hints),
            viewport,
            transition,
            overlay: OverlayDispatcher::default(),
            queued: Vec::new(),
        };
        engine.transition.start(&mut engine.queued);
        engine
    }

    /// Create an engine using the `viewer` settings of the tour document.
    pub fn with_graph_settings(graph: Arc<TourGraph>, hints: H) -> Self {
        let config = EngineConfig::from(graph.viewer_settings());
        Self::new(graph, config, hints)
    }

    // ---------------- Reads ----------------

    pub fn graph(&self) -> &TourGraph {
        &self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_scene(&self) -> &Scene {
        // The current id only ever takes validated values.
        self.graph
            .scene(self.transition.current_scene_id())
            .unwrap_or_else(|_| self.graph.first_scene())
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_busy()
    }

    pub fn active_overlay(&self) -> Option<&OverlayContent> {
        self.overlay.active()
    }

    pub fn is_autorotating(&self) -> bool {
        self.viewport.is_autorotating()
    }

    pub fn is_viewport_attached(&self) -> bool {
        self.viewport.is_attached()
    }

    pub fn active_view(&self) -> Option<&SceneView> {
        self.transition.active_view()
    }

    pub fn prefetch_cache(&self) -> &PrefetchCache<H> {
        &self.prefetch
    }

    // ---------------- Navigation ----------------

    pub fn switch_scene(&mut self, id: &str) -> SwitchOutcome {
        self.transition
            .switch_scene(id, &mut self.viewport, &mut self.queued)
    }

    /// Renderer for `token` finished loading; `handle` controls it from now on.
    pub fn scene_loaded(&mut self, token: LoadToken, handle: Box<dyn ViewportHandle>) -> bool {
        let accepted =
            self.transition
                .scene_loaded(token, handle, &mut self.viewport, &mut self.queued);
        if accepted && self.config.prefetch_neighbors {
            self.prefetch_neighbors();
        }
        accepted
    }

    /// Advance engine time and move all pending effects into `out`.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<Effect>) {
        self.transition
            .tick(dt, &mut self.viewport, &mut self.queued);
        out.append(&mut self.queued);
    }

    // ---------------- Markers ----------------

    /// Click on a marker of the active scene. Unknown ids are ignored.
    pub fn click_marker(&mut self, marker_id: &str) {
        let Some(action) = self
            .transition
            .active_view()
            .and_then(|v| v.marker(marker_id))
            .map(|m| m.click_action())
        else {
            log::debug!("[click] no marker {}", marker_id);
            return;
        };
        log::info!("[click] marker {}", marker_id);
        match action {
            MarkerAction::SwitchScene(target) => {
                self.switch_scene(&target);
            }
            MarkerAction::ShowOverlay(content) => self.show_overlay(content),
        }
    }

    /// Pointer entered a marker of the active scene.
    pub fn hover_marker(&mut self, marker_id: &str) {
        let url = self
            .transition
            .active_view()
            .and_then(|v| v.marker(marker_id))
            .and_then(|m| m.hover_prefetch())
            .map(str::to_owned);
        if let Some(url) = url {
            self.prefetch.prefetch(&url);
        }
    }

    /// Pointer entered a scene entry of the scene list or minimap.
    pub fn hover_scene(&mut self, id: &str) {
        if let Ok(scene) = self.graph.scene(id) {
            self.prefetch.prefetch(&scene.image_source);
        }
    }

    // ---------------- Overlay ----------------

    pub fn show_overlay(&mut self, content: OverlayContent) {
        self.overlay.show(content.clone());
        self.queued.push(Effect::ShowOverlay(content));
    }

    pub fn dismiss_overlay(&mut self) {
        if self.overlay.dismiss() {
            self.queued.push(Effect::HideOverlay);
        }
    }

    // ---------------- Viewport ----------------

    // The outgoing renderer stays attached through the fade-out but no longer
    // accepts camera intents; its state was captured when the switch began.

    pub fn zoom(&mut self, direction: ZoomDirection) {
        if self.viewport_locked() {
            return;
        }
        self.viewport.zoom(direction);
    }

    /// Restore the current scene's initial orientation and default hfov.
    pub fn reset(&mut self) {
        if self.viewport_locked() {
            return;
        }
        let scene = self.current_scene().clone();
        self.viewport.reset(&scene);
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.viewport_locked() {
            return;
        }
        self.viewport.toggle_fullscreen();
    }

    pub fn toggle_autorotate(&mut self) {
        if self.viewport_locked() {
            return;
        }
        self.viewport.toggle_autorotate();
    }

    fn viewport_locked(&self) -> bool {
        let busy = self.transition.is_busy();
        if busy {
            log::debug!("[viewport] intent ignored mid-transition");
        }
        busy
    }

    // ---------------- Intents ----------------

    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Zoom(dir) => self.zoom(dir),
            Intent::Reset => self.reset(),
            Intent::ToggleFullscreen => self.toggle_fullscreen(),
            Intent::ToggleAutorotate => self.toggle_autorotate(),
            Intent::DismissOverlay => self.dismiss_overlay(),
            Intent::NextScene => self.step_scene(1),
            Intent::PreviousScene => self.step_scene(-1),
            Intent::SceneAt(i) => {
                if let Some(id) = self.graph.scenes().get(i).map(|s| s.id.clone()) {
                    self.switch_scene(&id);
                }
            }
            Intent::GoTo(id) => {
                self.switch_scene(&id);
            }
        }
    }

    // Cycle through scenes in declaration order, wrapping at both ends.
    fn step_scene(&mut self, delta: isize) {
        let n = self.graph.scenes().len() as isize;
        let here = self
            .graph
            .position(self.transition.current_scene_id())
            .unwrap_or(0) as isize;
        let next = (here + delta).rem_euclid(n) as usize;
        let id = self.graph.scenes()[next].id.clone();
        self.switch_scene(&id);
    }

    fn prefetch_neighbors(&mut self) {
        let urls: Vec<String> = self
            .current_scene()
            .hotspots
            .iter()
            .filter_map(|h| self.graph.scene(&h.target_scene_id).ok())
            .map(|s| s.image_source.clone())
            .collect();
        for url in urls {
            self.prefetch.prefetch(&url);
        }
    }
}
