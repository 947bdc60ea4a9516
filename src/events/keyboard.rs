use tour_core::Intent;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::keymap::intent_for_key;
use crate::{with_engine, SharedEngine};

pub fn handle_global_keydown(ev: &web::KeyboardEvent, engine: &SharedEngine) {
    // Keys typed into the scene search box belong to the search box.
    if let Some(target) = ev.target() {
        if target.dyn_ref::<web::HtmlInputElement>().is_some() {
            return;
        }
    }
    let key = ev.key();
    let Some(intent) = intent_for_key(&key) else {
        return;
    };
    log::info!("[keys] {} -> {:?}", key, intent);
    if matches!(intent, Intent::ToggleAutorotate | Intent::ToggleFullscreen) {
        ev.prevent_default();
    }
    with_engine(engine, |e| e.apply_intent(intent));
}

pub fn wire_global_keydown(engine: SharedEngine) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &engine);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
