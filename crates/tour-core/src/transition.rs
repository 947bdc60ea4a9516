//! Scene transition state machine.
//!
//! A switch runs as one busy period made of two waits:
//!
//! 1. a fixed fade-out interval, advanced by [`TransitionController::tick`];
//! 2. the renderer's asynchronous load of the new panorama, ended by
//!    [`TransitionController::scene_loaded`] (or by the optional load timeout).
//!
//! Requests that arrive while busy are dropped, not queued. Each scene load is
//! identified by a [`LoadToken`]; load callbacks carrying any other token are
//! stale and their handle is discarded, so a renderer for a scene that is no
//! longer current can never be attached.

use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;

use crate::config::EngineConfig;
use crate::constants::INLINE_MARKERS;
use crate::graph::{Scene, TourGraph};
use crate::overlay::OverlayContent;
use crate::viewport::{ViewportController, ViewportHandle};

/// Identifies one awaited scene load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadToken(u64);

impl LoadToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Hotspot marker: click navigates, hover prefetches the *target* panorama.
#[derive(Clone, Debug, PartialEq)]
pub struct HotspotMarker {
    pub id: String,
    pub pitch: f64,
    pub yaw: f64,
    pub label: String,
    pub target_scene_id: String,
    pub target_image: String,
}

/// Infospot marker: click opens the overlay, hover prefetches its image.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoMarker {
    pub id: String,
    pub pitch: f64,
    pub yaw: f64,
    pub content: OverlayContent,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Marker {
    Hotspot(HotspotMarker),
    Info(InfoMarker),
}

/// What a marker asks the engine to do when clicked.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerAction {
    SwitchScene(String),
    ShowOverlay(OverlayContent),
}

impl Marker {
    pub fn id(&self) -> &str {
        match self {
            Marker::Hotspot(m) => &m.id,
            Marker::Info(m) => &m.id,
        }
    }

    /// `(pitch, yaw)` in degrees.
    pub fn position(&self) -> (f64, f64) {
        match self {
            Marker::Hotspot(m) => (m.pitch, m.yaw),
            Marker::Info(m) => (m.pitch, m.yaw),
        }
    }

    /// Tooltip text.
    pub fn text(&self) -> &str {
        match self {
            Marker::Hotspot(m) => &m.label,
            Marker::Info(m) => &m.content.title,
        }
    }

    pub fn click_action(&self) -> MarkerAction {
        match self {
            Marker::Hotspot(m) => MarkerAction::SwitchScene(m.target_scene_id.clone()),
            Marker::Info(m) => MarkerAction::ShowOverlay(m.content.clone()),
        }
    }

    /// Image worth preloading while the pointer rests on this marker.
    pub fn hover_prefetch(&self) -> Option<&str> {
        match self {
            Marker::Hotspot(m) => Some(m.target_image.as_str()),
            Marker::Info(m) => m.content.image.as_deref(),
        }
    }
}

pub type MarkerSet = SmallVec<[Marker; INLINE_MARKERS]>;

/// Everything the renderer needs to show one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneView {
    pub token: LoadToken,
    pub scene_id: String,
    pub title: String,
    pub image_source: String,
    pub hfov: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub markers: MarkerSet,
}

impl SceneView {
    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id() == id)
    }
}

/// Camera state carried from the outgoing scene into the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingViewport {
    pub hfov: f64,
}

/// Instruction for the embedding front-end.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Start fading the panorama out over `duration`.
    FadeOut { duration: Duration },
    /// Replace the renderer with one showing `view`; report back through
    /// `scene_loaded(view.token, ..)`.
    LoadScene(SceneView),
    /// Restore full opacity.
    FadeIn,
    ShowOverlay(OverlayContent),
    HideOverlay,
    /// The renderer did not report the load of `scene_id` in time.
    LoadTimedOut { scene_id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    Busy,
    AlreadyCurrent,
    UnknownScene,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    Started,
    Ignored(IgnoreReason),
}

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Idle,
    FadingOut { target: String, remaining: Duration },
    Loading { token: LoadToken, waited: Duration },
}

pub struct TransitionController {
    graph: Arc<TourGraph>,
    current_scene_id: String,
    phase: Phase,
    pending_viewport: Option<PendingViewport>,
    view: Option<SceneView>,
    // Time spent waiting on the first scene's load. Navigation is not
    // blocked meanwhile.
    initial_wait: Option<Duration>,
    next_token: u64,
    fade_duration: Duration,
    load_timeout: Option<Duration>,
    default_hfov: f64,
}

impl TransitionController {
    /// Idle on the tour's first scene. Call [`start`](Self::start) to request
    /// its initial load.
    pub fn new(graph: Arc<TourGraph>, config: &EngineConfig) -> Self {
        let current_scene_id = graph.first_scene().id.clone();
        Self {
            graph,
            current_scene_id,
            phase: Phase::Idle,
            pending_viewport: None,
            view: None,
            initial_wait: None,
            next_token: 0,
            fade_duration: config.fade_duration,
            load_timeout: config.load_timeout,
            default_hfov: config.default_hfov,
        }
    }

    /// Build the first scene's view and ask the front-end to load it. The
    /// controller stays idle; the handle attaches whenever the load reports.
    /// The load timeout still applies and is reported without a fade-in.
    pub fn start(&mut self, out: &mut Vec<Effect>) {
        let scene = self.graph.first_scene().clone();
        let view = self.build_view(&scene);
        out.push(Effect::LoadScene(view.clone()));
        self.view = Some(view);
        self.initial_wait = Some(Duration::ZERO);
    }

    pub fn current_scene_id(&self) -> &str {
        &self.current_scene_id
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn pending_viewport(&self) -> Option<PendingViewport> {
        self.pending_viewport
    }

    /// View of the current scene, including its interactive markers.
    pub fn active_view(&self) -> Option<&SceneView> {
        self.view.as_ref()
    }

    /// Begin a switch to `target`. Dropped while busy or when `target` is
    /// already current.
    pub fn switch_scene(
        &mut self,
        target: &str,
        viewport: &mut ViewportController,
        out: &mut Vec<Effect>,
    ) -> SwitchOutcome {
        if self.is_busy() {
            log::debug!("[transition] busy, dropping switch to {}", target);
            return SwitchOutcome::Ignored(IgnoreReason::Busy);
        }
        if target == self.current_scene_id {
            return SwitchOutcome::Ignored(IgnoreReason::AlreadyCurrent);
        }
        if !self.graph.contains(target) {
            log::warn!("[transition] unknown scene {}", target);
            return SwitchOutcome::Ignored(IgnoreReason::UnknownScene);
        }

        self.initial_wait = None;
        if let Some(hfov) = viewport.live_hfov() {
            self.pending_viewport = Some(PendingViewport { hfov });
        }
        viewport.stop_autorotate();

        log::info!(
            "[transition] {} -> {} (fade {}ms)",
            self.current_scene_id,
            target,
            self.fade_duration.as_millis()
        );
        self.phase = Phase::FadingOut {
            target: target.to_string(),
            remaining: self.fade_duration,
        };
        out.push(Effect::FadeOut {
            duration: self.fade_duration,
        });
        SwitchOutcome::Started
    }

    /// Advance the fade-out and the load timeout by `dt`.
    pub fn tick(&mut self, dt: Duration, viewport: &mut ViewportController, out: &mut Vec<Effect>) {
        match &mut self.phase {
            Phase::Idle => {
                let (Some(waited), Some(limit)) = (self.initial_wait.as_mut(), self.load_timeout)
                else {
                    return;
                };
                *waited += dt;
                if *waited >= limit {
                    log::warn!(
                        "[transition] {} not loaded after {}ms",
                        self.current_scene_id,
                        waited.as_millis()
                    );
                    self.initial_wait = None;
                    out.push(Effect::LoadTimedOut {
                        scene_id: self.current_scene_id.clone(),
                    });
                }
            }
            Phase::FadingOut { target, remaining } => {
                if dt < *remaining {
                    *remaining -= dt;
                    return;
                }
                let overshoot = dt - *remaining;
                let target = std::mem::take(target);
                self.swap_to(target, overshoot, viewport, out);
            }
            Phase::Loading { waited, .. } => {
                *waited += dt;
                let waited = *waited;
                if let Some(limit) = self.load_timeout {
                    if waited >= limit {
                        log::warn!(
                            "[transition] {} not loaded after {}ms, giving up",
                            self.current_scene_id,
                            waited.as_millis()
                        );
                        self.phase = Phase::Idle;
                        out.push(Effect::LoadTimedOut {
                            scene_id: self.current_scene_id.clone(),
                        });
                        out.push(Effect::FadeIn);
                    }
                }
            }
        }
    }

    /// Renderer reports that the load identified by `token` finished.
    ///
    /// Returns `false` and discards `handle` if the token is stale.
    pub fn scene_loaded(
        &mut self,
        token: LoadToken,
        handle: Box<dyn ViewportHandle>,
        viewport: &mut ViewportController,
        out: &mut Vec<Effect>,
    ) -> bool {
        let current = self.view.as_ref().map(|v| v.token);
        if current != Some(token) {
            log::debug!("[transition] stale load {:?}, expected {:?}", token, current);
            return false;
        }
        match self.phase {
            Phase::Loading { token: awaited, .. } if awaited == token => {
                viewport.attach(handle);
                self.phase = Phase::Idle;
                out.push(Effect::FadeIn);
                log::info!("[transition] {} loaded", self.current_scene_id);
                true
            }
            // Initial load, or a late load after the timeout gave up.
            Phase::Idle if !viewport.is_attached() => {
                viewport.attach(handle);
                self.initial_wait = None;
                log::info!("[transition] {} attached", self.current_scene_id);
                true
            }
            _ => false,
        }
    }

    fn swap_to(
        &mut self,
        target: String,
        already_waited: Duration,
        viewport: &mut ViewportController,
        out: &mut Vec<Effect>,
    ) {
        // The old renderer is invalid the moment the image source changes.
        drop(viewport.detach());

        let scene = match self.graph.scene(&target) {
            Ok(s) => s.clone(),
            Err(e) => {
                log::error!("[transition] {}", e);
                self.phase = Phase::Idle;
                out.push(Effect::FadeIn);
                return;
            }
        };
        self.current_scene_id = target;
        let view = self.build_view(&scene);
        self.phase = Phase::Loading {
            token: view.token,
            waited: already_waited,
        };
        out.push(Effect::LoadScene(view.clone()));
        self.view = Some(view);
    }

    fn build_view(&mut self, scene: &Scene) -> SceneView {
        self.next_token += 1;
        let mut markers = MarkerSet::new();
        for h in &scene.hotspots {
            let target_image = self
                .graph
                .scene(&h.target_scene_id)
                .map(|s| s.image_source.clone())
                .unwrap_or_default();
            markers.push(Marker::Hotspot(HotspotMarker {
                id: h.id.clone(),
                pitch: h.pitch,
                yaw: h.yaw,
                label: h.label.clone(),
                target_scene_id: h.target_scene_id.clone(),
                target_image,
            }));
        }
        for s in &scene.info_spots {
            markers.push(Marker::Info(InfoMarker {
                id: s.id.clone(),
                pitch: s.pitch,
                yaw: s.yaw,
                content: OverlayContent::from(s),
            }));
        }

        SceneView {
            token: LoadToken(self.next_token),
            scene_id: scene.id.clone(),
            title: scene.title.clone(),
            image_source: scene.image_source.clone(),
            hfov: self
                .pending_viewport
                .map(|p| p.hfov)
                .unwrap_or(self.default_hfov),
            pitch: scene.initial_pitch,
            yaw: scene.initial_yaw,
            markers,
        }
    }
}
