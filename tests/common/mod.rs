// Shared fixtures for host-side engine tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use tour_core::{
    Effect, EngineConfig, LoadToken, ResourceHints, TourEngine, TourGraph, ViewportHandle,
};

pub const TOUR_JSON: &str = r#"{
  "floorplan": "/tour/floorplan.png",
  "scenes": [
    {
      "id": "lobby",
      "title": "Main Lobby",
      "src": "/tour/lobby.jpg",
      "thumb": "/tour/lobby_thumb.jpg",
      "initialYaw": 10,
      "initialPitch": -5,
      "sceneMapPosition": { "x": 20, "y": 70 },
      "hotspots": [
        { "id": "lobby-hall", "pitch": 0, "yaw": 90, "targetSceneId": "hall", "label": "To the hall" },
        { "id": "lobby-roof", "pitch": 30, "yaw": -120, "targetSceneId": "roof", "label": "Up to the roof" }
      ],
      "infoSpots": [
        { "id": "statue", "pitch": 2, "yaw": 45, "title": "Statue", "description": "Bronze, cast in 1921.", "image": "/s.jpg" }
      ]
    },
    {
      "id": "hall",
      "title": "Great Hall",
      "src": "/tour/hall.jpg",
      "thumb": "/tour/hall_thumb.jpg",
      "initialYaw": 180,
      "initialPitch": 0,
      "sceneMapPosition": { "x": 55, "y": 40 },
      "hotspots": [
        { "id": "hall-lobby", "pitch": -2, "yaw": 0, "targetSceneId": "lobby", "label": "Back to lobby" },
        { "id": "hall-roof", "pitch": 10, "yaw": 200, "targetSceneId": "roof", "label": "Stairs" }
      ],
      "infoSpots": [
        { "id": "plaque", "pitch": 0, "yaw": 170, "title": "Plaque", "description": "Opened by the mayor." }
      ]
    },
    {
      "id": "roof",
      "title": "Roof Terrace",
      "src": "/tour/roof.jpg",
      "thumb": "/tour/roof_thumb.jpg",
      "initialYaw": -45,
      "initialPitch": 15,
      "hotspots": [
        { "id": "roof-hall", "pitch": -20, "yaw": 90, "targetSceneId": "hall", "label": "Down" }
      ]
    }
  ]
}"#;

pub fn graph() -> Arc<TourGraph> {
    Arc::new(TourGraph::load(TOUR_JSON).expect("fixture tour is valid"))
}

/// Observable renderer state behind a `FakeViewport`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub hfov: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub autorotate: Option<f64>,
    pub fullscreen_toggles: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            hfov: 100.0,
            pitch: 0.0,
            yaw: 0.0,
            autorotate: None,
            fullscreen_toggles: 0,
        }
    }
}

/// Viewport double that records into shared state the test keeps a handle to.
pub struct FakeViewport {
    pub state: Rc<RefCell<ViewState>>,
    pub bounds: RangeInclusive<f64>,
}

impl FakeViewport {
    pub fn new() -> (Self, Rc<RefCell<ViewState>>) {
        Self::with_hfov(100.0)
    }

    pub fn with_hfov(hfov: f64) -> (Self, Rc<RefCell<ViewState>>) {
        let state = Rc::new(RefCell::new(ViewState {
            hfov,
            ..ViewState::default()
        }));
        (
            Self {
                state: state.clone(),
                bounds: 50.0..=120.0,
            },
            state,
        )
    }
}

impl ViewportHandle for FakeViewport {
    fn hfov(&self) -> f64 {
        self.state.borrow().hfov
    }
    fn set_hfov(&mut self, deg: f64) {
        self.state.borrow_mut().hfov = deg;
    }
    fn set_pitch(&mut self, deg: f64) {
        self.state.borrow_mut().pitch = deg;
    }
    fn set_yaw(&mut self, deg: f64) {
        self.state.borrow_mut().yaw = deg;
    }
    fn start_autorotate(&mut self, deg_per_sec: f64) {
        self.state.borrow_mut().autorotate = Some(deg_per_sec);
    }
    fn stop_autorotate(&mut self) {
        self.state.borrow_mut().autorotate = None;
    }
    fn toggle_fullscreen(&mut self) {
        self.state.borrow_mut().fullscreen_toggles += 1;
    }
    fn hfov_bounds(&self) -> RangeInclusive<f64> {
        self.bounds.clone()
    }
}

/// Resource hints that only remember what was requested.
#[derive(Default)]
pub struct RecordingHints {
    pub urls: RefCell<Vec<String>>,
}

impl ResourceHints for RecordingHints {
    fn preload_image(&self, url: &str) {
        self.urls.borrow_mut().push(url.to_string());
    }
}

pub const FADE: Duration = Duration::from_millis(500);

pub fn config() -> EngineConfig {
    EngineConfig::default()
}

pub fn engine() -> TourEngine<RecordingHints> {
    TourEngine::new(graph(), config(), RecordingHints::default())
}

/// Last `LoadScene` token found in `effects`.
pub fn load_token(effects: &[Effect]) -> Option<LoadToken> {
    effects.iter().rev().find_map(|e| match e {
        Effect::LoadScene(v) => Some(v.token),
        _ => None,
    })
}

/// Engine on its first scene with a viewport attached.
pub fn loaded_engine() -> (TourEngine<RecordingHints>, Rc<RefCell<ViewState>>) {
    let mut engine = engine();
    let mut effects = Vec::new();
    engine.tick(Duration::ZERO, &mut effects);
    let token = load_token(&effects).expect("initial load requested");
    let (fake, state) = FakeViewport::new();
    assert!(engine.scene_loaded(token, Box::new(fake)));
    (engine, state)
}

/// Run a started switch through the fade and the load. Returns the new
/// viewport state.
pub fn complete_switch(engine: &mut TourEngine<RecordingHints>) -> Rc<RefCell<ViewState>> {
    let mut effects = Vec::new();
    engine.tick(FADE, &mut effects);
    let token = load_token(&effects).expect("scene swap requested a load");
    let (fake, state) = FakeViewport::new();
    assert!(engine.scene_loaded(token, Box::new(fake)));
    state
}
