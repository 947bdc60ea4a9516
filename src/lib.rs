#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use instant::Instant;
use tour_core::{TourEngine, TourGraph};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod keymap;
mod overlay;
mod pannellum;
mod panel;
mod prefetch;
mod style;

use constants::{PANORAMA_ID, TOUR_CONFIG_URL};
use prefetch::LinkPreloadHints;

pub type SharedEngine = Rc<RefCell<TourEngine<LinkPreloadHints>>>;

/// Run `f` against the engine unless it is already borrowed further up the
/// stack, in which case the event is dropped.
pub fn with_engine<R>(
    engine: &SharedEngine,
    f: impl FnOnce(&mut TourEngine<LinkPreloadHints>) -> R,
) -> Option<R> {
    match engine.try_borrow_mut() {
        Ok(mut e) => Some(f(&mut *e)),
        Err(_) => {
            log::warn!("[engine] re-entrant event dropped");
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn fetch_text(window: &web::Window, url: &str) -> anyhow::Result<String> {
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("GET {} -> {}", url, resp.status());
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("{} is not text", url))
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let container: web::HtmlElement = document
        .get_element_by_id(PANORAMA_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", PANORAMA_ID))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let raw = fetch_text(&window, TOUR_CONFIG_URL).await?;
    let graph = TourGraph::load(&raw).context("tour configuration validation failed")?;
    log::info!(
        "[engine] first scene={} scenes={}",
        graph.first_scene().id,
        graph.scenes().len()
    );

    let engine = TourEngine::with_graph_settings(
        Arc::new(graph),
        LinkPreloadHints::new(document.clone()),
    );
    let fade_duration = engine.config().fade_duration;
    let engine: SharedEngine = Rc::new(RefCell::new(engine));

    // Overlay, controls, keys
    let engine_close = engine.clone();
    overlay::hide_info(&document);
    overlay::wire_close(&document, move || {
        with_engine(&engine_close, |e| e.dismiss_overlay());
    });
    events::wire_controls(&document, &engine);
    events::wire_global_keydown(engine.clone());

    // Scene list and minimap
    let panel = Rc::new(RefCell::new(panel::ScenePanel::default()));
    panel::wire_search(&document, panel.clone(), engine.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        document,
        container,
        slot: pannellum::ViewerSlot::default(),
        panel,
        last_instant: Instant::now(),
        effects: Vec::new(),
        autorotating: false,
        fade_duration,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
