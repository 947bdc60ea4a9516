//! Pannellum renderer binding.
//!
//! `pannellum.viewer(container, config)` creates one viewer per scene; its
//! `load` event hands a [`PannellumHandle`] back to the engine together with
//! the load token of the view it was created for.

use std::ops::RangeInclusive;

use anyhow::anyhow;
use js_sys::{Array, Function, Object, Reflect};
use tour_core::{LoadToken, Marker, SceneView, ViewportHandle, MAX_HFOV_DEG, MIN_HFOV_DEG};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{HOTSPOT_CLASS, INFOSPOT_CLASS};
use crate::{with_engine, SharedEngine};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type Viewer;

    #[wasm_bindgen(catch, js_namespace = pannellum, js_name = viewer)]
    fn create_viewer(container: &web::HtmlElement, config: &Object) -> Result<Viewer, JsValue>;

    #[wasm_bindgen(method, js_name = getHfov)]
    fn get_hfov(this: &Viewer) -> f64;

    #[wasm_bindgen(method, js_name = setHfov)]
    fn set_hfov(this: &Viewer, hfov: f64);

    #[wasm_bindgen(method, js_name = setPitch)]
    fn set_pitch(this: &Viewer, pitch: f64);

    #[wasm_bindgen(method, js_name = setYaw)]
    fn set_yaw(this: &Viewer, yaw: f64);

    #[wasm_bindgen(method, js_name = getHfovBounds)]
    fn get_hfov_bounds(this: &Viewer) -> JsValue;

    #[wasm_bindgen(method, js_name = startAutoRotate)]
    fn start_auto_rotate(this: &Viewer, speed: f64);

    #[wasm_bindgen(method, js_name = stopAutoRotate)]
    fn stop_auto_rotate(this: &Viewer);

    #[wasm_bindgen(method, js_name = toggleFullscreen)]
    fn toggle_fullscreen(this: &Viewer);

    #[wasm_bindgen(method)]
    fn on(this: &Viewer, event: &str, listener: &Function);

    #[wasm_bindgen(method)]
    fn destroy(this: &Viewer);
}

/// Viewport handle over a loaded Pannellum viewer.
pub struct PannellumHandle {
    viewer: Viewer,
}

impl ViewportHandle for PannellumHandle {
    fn hfov(&self) -> f64 {
        self.viewer.get_hfov()
    }

    fn set_hfov(&mut self, deg: f64) {
        self.viewer.set_hfov(deg);
    }

    fn set_pitch(&mut self, deg: f64) {
        self.viewer.set_pitch(deg);
    }

    fn set_yaw(&mut self, deg: f64) {
        self.viewer.set_yaw(deg);
    }

    fn start_autorotate(&mut self, deg_per_sec: f64) {
        self.viewer.start_auto_rotate(deg_per_sec);
    }

    fn stop_autorotate(&mut self) {
        self.viewer.stop_auto_rotate();
    }

    fn toggle_fullscreen(&mut self) {
        self.viewer.toggle_fullscreen();
    }

    fn hfov_bounds(&self) -> RangeInclusive<f64> {
        let bounds = Array::from(&self.viewer.get_hfov_bounds());
        match (bounds.get(0).as_f64(), bounds.get(1).as_f64()) {
            (Some(min), Some(max)) if min <= max => min..=max,
            _ => MIN_HFOV_DEG..=MAX_HFOV_DEG,
        }
    }
}

/// Owns the viewer for the current scene and the callbacks it was given.
///
/// Callbacks are dropped only after the viewer that references them has been
/// destroyed.
#[derive(Default)]
pub struct ViewerSlot {
    viewer: Option<Viewer>,
    marker_callbacks: Vec<Closure<dyn FnMut(JsValue, JsValue)>>,
    hover_callbacks: Vec<Closure<dyn FnMut()>>,
    event_callbacks: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl ViewerSlot {
    /// Tear down the current viewer and create one for `view`.
    pub fn show(
        &mut self,
        view: &SceneView,
        container: &web::HtmlElement,
        engine: &SharedEngine,
    ) -> anyhow::Result<()> {
        self.clear();

        let config = Object::new();
        set(&config, "type", "equirectangular");
        set(&config, "panorama", view.image_source.as_str());
        set(&config, "autoLoad", true);
        set(&config, "showControls", false);
        set(&config, "hfov", view.hfov);
        set(&config, "pitch", view.pitch);
        set(&config, "yaw", view.yaw);

        let hot_spots = Array::new();
        for marker in &view.markers {
            hot_spots.push(&self.marker_config(marker, engine));
        }
        set(&config, "hotSpots", hot_spots);

        let viewer = create_viewer(container, &config).map_err(|e| anyhow!("{:?}", e))?;
        self.wire_viewer_events(&viewer, view.token, engine);
        self.viewer = Some(viewer);
        log::info!("[viewer] created for {}", view.scene_id);
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(viewer) = self.viewer.take() {
            viewer.destroy();
        }
        self.marker_callbacks.clear();
        self.hover_callbacks.clear();
        self.event_callbacks.clear();
    }

    fn marker_config(&mut self, marker: &Marker, engine: &SharedEngine) -> Object {
        let (pitch, yaw) = marker.position();
        let (kind, class) = match marker {
            Marker::Hotspot(_) => ("scene", HOTSPOT_CLASS),
            Marker::Info(_) => ("info", INFOSPOT_CLASS),
        };
        let obj = Object::new();
        set(&obj, "pitch", pitch);
        set(&obj, "yaw", yaw);
        set(&obj, "type", kind);
        set(&obj, "text", marker.text());
        set(&obj, "cssClass", class);

        let id = marker.id().to_string();
        let click_engine = engine.clone();
        let click_id = id.clone();
        let click = Closure::wrap(Box::new(move |_ev: JsValue, _args: JsValue| {
            with_engine(&click_engine, |e| e.click_marker(&click_id));
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        let hover_engine = engine.clone();
        let hover = Closure::wrap(Box::new(move || {
            with_engine(&hover_engine, |e| e.hover_marker(&id));
        }) as Box<dyn FnMut()>);
        let hover_fn: Function = hover.as_ref().unchecked_ref::<Function>().clone();

        let text = marker.text().to_string();
        let tooltip = Closure::wrap(Box::new(move |div: JsValue, _args: JsValue| {
            let Ok(div) = div.dyn_into::<web::HtmlElement>() else {
                return;
            };
            div.set_title(&text);
            if let Some(doc) = div.owner_document() {
                if let Ok(span) = doc.create_element("span") {
                    span.set_text_content(Some(&text));
                    _ = div.append_child(&span);
                }
            }
            _ = div.add_event_listener_with_callback("mouseenter", &hover_fn);
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        set(&obj, "clickHandlerFunc", click.as_ref().clone());
        set(&obj, "createTooltipFunc", tooltip.as_ref().clone());
        self.marker_callbacks.push(click);
        self.marker_callbacks.push(tooltip);
        self.hover_callbacks.push(hover);
        obj
    }

    fn wire_viewer_events(&mut self, viewer: &Viewer, token: LoadToken, engine: &SharedEngine) {
        let loaded_engine = engine.clone();
        let loaded_viewer = viewer.clone();
        let on_load = Closure::wrap(Box::new(move |_: JsValue| {
            let handle = Box::new(PannellumHandle {
                viewer: loaded_viewer.clone(),
            });
            with_engine(&loaded_engine, |e| e.scene_loaded(token, handle));
        }) as Box<dyn FnMut(JsValue)>);
        viewer.on("load", on_load.as_ref().unchecked_ref());

        // Load failures surface through the engine's load timeout.
        let on_error = Closure::wrap(Box::new(move |err: JsValue| {
            log::warn!("[viewer] load error for token {}: {:?}", token.value(), err);
        }) as Box<dyn FnMut(JsValue)>);
        viewer.on("error", on_error.as_ref().unchecked_ref());

        self.event_callbacks.push(on_load);
        self.event_callbacks.push(on_error);
    }
}

#[inline]
fn set(target: &Object, key: &str, value: impl Into<JsValue>) {
    _ = Reflect::set(target, &JsValue::from_str(key), &value.into());
}
