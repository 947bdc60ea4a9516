//! Tour data model: scenes and their outgoing hotspot / infospot edges.
//!
//! A `TourGraph` is built once from the tour document, validated, and never
//! mutated afterwards. Every hotspot target is guaranteed to resolve, so
//! lookups driven by markers cannot fail on a validated graph.

use fnv::FnvHashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ViewerSettings;
use crate::constants::{MAX_HFOV_DEG, MIN_HFOV_DEG};
use crate::error::{ConfigurationError, NotFoundError};

/// Navigational edge to another scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub id: String,
    pub pitch: f64,
    pub yaw: f64,
    pub target_scene_id: String,
    /// Tooltip text.
    pub label: String,
}

/// Non-navigational marker that opens descriptive content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoSpot {
    pub id: String,
    pub pitch: f64,
    pub yaw: f64,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One panorama plus its markers and initial camera orientation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub title: String,
    /// Full-resolution panorama URL.
    #[serde(rename = "src", alias = "imageSource")]
    pub image_source: String,
    #[serde(rename = "thumb", alias = "thumbnail")]
    pub thumbnail: String,
    pub initial_yaw: f64,
    pub initial_pitch: f64,
    pub hotspots: Vec<Hotspot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_spots: Vec<InfoSpot>,
    /// Floor-plan coordinate in percent of the plan's width / height.
    #[serde(
        default,
        rename = "sceneMapPosition",
        with = "map_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub map_position: Option<Vec2>,
}

/// Raw tour document as it is authored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourConfig {
    pub scenes: Vec<Scene>,
    /// Floor-plan image shown behind the minimap markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floorplan: Option<String>,
    #[serde(default)]
    pub viewer: ViewerSettings,
}

/// Validated, read-only scene graph keyed by scene id.
#[derive(Clone, Debug)]
pub struct TourGraph {
    scenes: Vec<Scene>,
    index: FnvHashMap<String, usize>,
    floorplan: Option<String>,
    viewer: ViewerSettings,
}

impl TourGraph {
    /// Parse and validate a JSON tour document.
    pub fn load(raw: &str) -> Result<Self, ConfigurationError> {
        let config: TourConfig = serde_json::from_str(raw)?;
        Self::from_config(config)
    }

    /// Validate an already deserialized tour document.
    pub fn from_config(config: TourConfig) -> Result<Self, ConfigurationError> {
        let TourConfig {
            scenes,
            floorplan,
            viewer,
        } = config;

        if scenes.is_empty() {
            return Err(ConfigurationError::EmptyTour);
        }
        check_viewer(&viewer)?;

        let mut index = FnvHashMap::default();
        for (i, scene) in scenes.iter().enumerate() {
            check_angles(scene)?;
            if index.insert(scene.id.clone(), i).is_some() {
                return Err(ConfigurationError::DuplicateScene {
                    id: scene.id.clone(),
                });
            }
        }

        for scene in &scenes {
            if let Some(h) = scene
                .hotspots
                .iter()
                .find(|h| !index.contains_key(&h.target_scene_id))
            {
                return Err(ConfigurationError::DanglingHotspot {
                    scene: scene.id.clone(),
                    hotspot: h.id.clone(),
                    target: h.target_scene_id.clone(),
                });
            }
        }

        log::info!("[graph] loaded {} scenes", scenes.len());
        Ok(Self {
            scenes,
            index,
            floorplan,
            viewer,
        })
    }

    pub fn scene(&self, id: &str) -> Result<&Scene, NotFoundError> {
        self.index
            .get(id)
            .map(|&i| &self.scenes[i])
            .ok_or_else(|| NotFoundError { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Scenes in declaration order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Entry point of the tour: the first declared scene.
    pub fn first_scene(&self) -> &Scene {
        // Non-empty by construction.
        &self.scenes[0]
    }

    /// Position of `id` in declaration order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Scenes whose title contains `term`, ignoring case. An empty or
    /// whitespace-only term matches every scene.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Scene> + 'a {
        let needle = term.trim().to_lowercase();
        self.scenes
            .iter()
            .filter(move |s| needle.is_empty() || s.title.to_lowercase().contains(&needle))
    }

    /// Scenes placed on the floor plan, with their coordinates.
    pub fn map_points(&self) -> impl Iterator<Item = (&Scene, Vec2)> {
        self.scenes
            .iter()
            .filter_map(|s| s.map_position.map(|p| (s, p)))
    }

    pub fn floorplan(&self) -> Option<&str> {
        self.floorplan.as_deref()
    }

    pub fn viewer_settings(&self) -> &ViewerSettings {
        &self.viewer
    }
}

fn check_angles(scene: &Scene) -> Result<(), ConfigurationError> {
    let invalid = |field: String| ConfigurationError::InvalidAngle {
        scene: scene.id.clone(),
        field,
    };
    if !scene.initial_yaw.is_finite() {
        return Err(invalid("initialYaw".into()));
    }
    if !scene.initial_pitch.is_finite() {
        return Err(invalid("initialPitch".into()));
    }
    for h in &scene.hotspots {
        if !(h.pitch.is_finite() && h.yaw.is_finite()) {
            return Err(invalid(format!("hotspots.{}", h.id)));
        }
    }
    for s in &scene.info_spots {
        if !(s.pitch.is_finite() && s.yaw.is_finite()) {
            return Err(invalid(format!("infoSpots.{}", s.id)));
        }
    }
    Ok(())
}

fn check_viewer(v: &ViewerSettings) -> Result<(), ConfigurationError> {
    let invalid = |field, value| Err(ConfigurationError::InvalidViewerSetting { field, value });
    if !(v.zoom_step.is_finite() && v.zoom_step > 0.0) {
        return invalid("zoomStep", v.zoom_step);
    }
    if !(MIN_HFOV_DEG..=MAX_HFOV_DEG).contains(&v.default_hfov) {
        return invalid("defaultHfov", v.default_hfov);
    }
    if !v.autorotate_rate.is_finite() {
        return invalid("autorotateRate", v.autorotate_rate);
    }
    Ok(())
}

// `{ "x": .., "y": .. }` <-> `Option<Vec2>`
mod map_position {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Point {
        x: f32,
        y: f32,
    }

    pub fn serialize<S: Serializer>(v: &Option<Vec2>, s: S) -> Result<S::Ok, S::Error> {
        v.map(|p| Point { x: p.x, y: p.y }).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec2>, D::Error> {
        Ok(Option::<Point>::deserialize(d)?.map(|p| Vec2::new(p.x, p.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_position_reads_xy_object() {
        let raw = r#"{"scenes":[{"id":"a","title":"A","src":"/a.jpg","thumb":"/a_t.jpg",
            "initialYaw":0,"initialPitch":0,"hotspots":[],
            "sceneMapPosition":{"x":12.5,"y":40}}]}"#;
        let g = TourGraph::load(raw).unwrap();
        assert_eq!(g.first_scene().map_position, Some(Vec2::new(12.5, 40.0)));
    }

    #[test]
    fn missing_map_position_is_none() {
        let raw = r#"{"scenes":[{"id":"a","title":"A","src":"/a.jpg","thumb":"/a_t.jpg",
            "initialYaw":0,"initialPitch":0,"hotspots":[]}]}"#;
        let g = TourGraph::load(raw).unwrap();
        assert_eq!(g.first_scene().map_position, None);
        assert_eq!(g.map_points().count(), 0);
    }
}
