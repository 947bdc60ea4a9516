//! Scene list (with search) and floor-plan minimap.
//!
//! Both are rebuilt from the graph whenever the current scene or the search
//! term changes. Entries navigate on click and prefetch the scene's panorama
//! on hover.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use tour_core::Scene;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{CURRENT_CLASS, MINIMAP_ID, SCENE_LIST_ID, SCENE_SEARCH_ID};
use crate::style::map_marker_style;
use crate::{dom, with_engine, SharedEngine};

#[derive(Default)]
pub struct ScenePanel {
    search_term: String,
    callbacks: Vec<Closure<dyn FnMut()>>,
}

impl ScenePanel {
    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
    }

    /// Rebuild the scene list and the minimap markers.
    pub fn render(&mut self, document: &web::Document, engine: &SharedEngine) {
        self.callbacks.clear();
        let Ok(eng) = engine.try_borrow() else {
            return;
        };
        let current = eng.current_scene().id.clone();
        let graph = eng.graph();

        if let Some(list) = document.get_element_by_id(SCENE_LIST_ID) {
            list.set_inner_html("");
            for scene in graph.search(&self.search_term) {
                if let Some(item) = self.scene_item(document, scene, &current, engine) {
                    _ = list.append_child(&item);
                }
            }
        }

        if let Some(map) = document.get_element_by_id(MINIMAP_ID) {
            map.set_inner_html("");
            if let Some(plan) = graph.floorplan() {
                if let Some(img) = dom::create(document, "img", "floorplan") {
                    _ = img.set_attribute("src", plan);
                    _ = img.set_attribute("alt", "Floor plan");
                    _ = map.append_child(&img);
                }
            }
            for (scene, pos) in graph.map_points() {
                if let Some(dot) = self.map_marker(document, scene, pos, &current, engine) {
                    _ = map.append_child(&dot);
                }
            }
        }
    }

    fn scene_item(
        &mut self,
        document: &web::Document,
        scene: &Scene,
        current: &str,
        engine: &SharedEngine,
    ) -> Option<web::Element> {
        let class = if scene.id == current {
            format!("scene-item {CURRENT_CLASS}")
        } else {
            "scene-item".to_string()
        };
        let item = dom::create(document, "button", &class)?;
        if let Some(thumb) = dom::create(document, "img", "scene-thumb") {
            _ = thumb.set_attribute("src", &scene.thumbnail);
            _ = thumb.set_attribute("alt", &scene.title);
            _ = item.append_child(&thumb);
        }
        if let Some(label) = dom::create(document, "span", "scene-label") {
            label.set_text_content(Some(&scene.title));
            _ = item.append_child(&label);
        }
        self.wire_entry(&item, &scene.id, engine);
        Some(item)
    }

    fn map_marker(
        &mut self,
        document: &web::Document,
        scene: &Scene,
        pos: Vec2,
        current: &str,
        engine: &SharedEngine,
    ) -> Option<web::Element> {
        let class = if scene.id == current {
            format!("map-marker {CURRENT_CLASS}")
        } else {
            "map-marker".to_string()
        };
        let dot = dom::create(document, "button", &class)?;
        _ = dot.set_attribute("title", &scene.title);
        _ = dot.set_attribute("aria-label", &format!("Go to {}", scene.title));
        _ = dot.set_attribute("style", &map_marker_style(pos));
        self.wire_entry(&dot, &scene.id, engine);
        Some(dot)
    }

    fn wire_entry(&mut self, el: &web::Element, scene_id: &str, engine: &SharedEngine) {
        let click_engine = engine.clone();
        let click_id = scene_id.to_string();
        let click = Closure::wrap(Box::new(move || {
            with_engine(&click_engine, |e| e.switch_scene(&click_id));
        }) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());

        let hover_engine = engine.clone();
        let hover_id = scene_id.to_string();
        let hover = Closure::wrap(Box::new(move || {
            with_engine(&hover_engine, |e| e.hover_scene(&hover_id));
        }) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("mouseenter", hover.as_ref().unchecked_ref());

        self.callbacks.push(click);
        self.callbacks.push(hover);
    }
}

/// Re-render the panel whenever the search box changes.
pub fn wire_search(
    document: &web::Document,
    panel: Rc<RefCell<ScenePanel>>,
    engine: SharedEngine,
) {
    let Some(input) = document
        .get_element_by_id(SCENE_SEARCH_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    else {
        return;
    };
    let doc = document.clone();
    let input_for_cb = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Ok(mut p) = panel.try_borrow_mut() else {
            return;
        };
        p.set_search_term(input_for_cb.value());
        p.render(&doc, &engine);
    }) as Box<dyn FnMut()>);
    _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}
