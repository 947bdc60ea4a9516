use tour_core::{Intent, ZoomDirection};
use web_sys as web;

use crate::constants::{AUTOROTATE_ID, FULLSCREEN_ID, RESET_ID, ZOOM_IN_ID, ZOOM_OUT_ID};
use crate::{dom, with_engine, SharedEngine};

/// Wire the on-screen control buttons. Intents are applied inside the click
/// handler so fullscreen requests keep their user-gesture context.
pub fn wire_controls(document: &web::Document, engine: &SharedEngine) {
    let buttons = [
        (ZOOM_IN_ID, Intent::Zoom(ZoomDirection::In)),
        (ZOOM_OUT_ID, Intent::Zoom(ZoomDirection::Out)),
        (RESET_ID, Intent::Reset),
        (FULLSCREEN_ID, Intent::ToggleFullscreen),
        (AUTOROTATE_ID, Intent::ToggleAutorotate),
    ];
    for (id, intent) in buttons {
        let engine = engine.clone();
        dom::add_click_listener(document, id, move || {
            log::info!("[click] {:?}", intent);
            with_engine(&engine, |e| e.apply_intent(intent.clone()));
        });
    }
}
