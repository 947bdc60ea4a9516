use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use instant::Instant;
use tour_core::Effect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{ACTIVE_CLASS, AUTOROTATE_ID, FADE_WRAPPER_ID, SCENE_TITLE_ID};
use crate::pannellum::ViewerSlot;
use crate::panel::ScenePanel;
use crate::{dom, overlay, style, SharedEngine};

pub struct FrameContext {
    pub engine: SharedEngine,
    pub document: web::Document,
    pub container: web::HtmlElement,
    pub slot: ViewerSlot,
    pub panel: Rc<RefCell<ScenePanel>>,
    pub last_instant: Instant,
    pub effects: Vec<Effect>,
    pub autorotating: bool,
    pub fade_duration: Duration,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Drain with the engine borrowed, apply with it released: applying
        // effects creates viewers whose callbacks borrow the engine again.
        let autorotating = match self.engine.try_borrow_mut() {
            Ok(mut eng) => {
                eng.tick(dt, &mut self.effects);
                eng.is_autorotating()
            }
            Err(_) => return,
        };
        if autorotating != self.autorotating {
            self.autorotating = autorotating;
            dom::set_class(&self.document, AUTOROTATE_ID, ACTIVE_CLASS, autorotating);
        }
        let effects = std::mem::take(&mut self.effects);
        for effect in &effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::FadeOut { duration } => self.set_opacity(0, *duration),
            Effect::FadeIn => self.set_opacity(1, self.fade_duration),
            Effect::LoadScene(view) => {
                if let Err(e) = self.slot.show(view, &self.container, &self.engine) {
                    log::error!("[viewer] {}: {:?}", view.scene_id, e);
                }
                dom::set_text(&self.document, SCENE_TITLE_ID, &view.title);
                overlay::set_status(&self.document, "");
                if let Ok(mut panel) = self.panel.try_borrow_mut() {
                    panel.render(&self.document, &self.engine);
                }
            }
            Effect::ShowOverlay(content) => overlay::show_info(&self.document, content),
            Effect::HideOverlay => overlay::hide_info(&self.document),
            Effect::LoadTimedOut { scene_id } => {
                log::warn!("[viewer] {} did not load", scene_id);
                overlay::set_status(&self.document, "This view could not be loaded.");
            }
        }
    }

    fn set_opacity(&self, opacity: u8, duration: Duration) {
        dom::set_style(&self.document, FADE_WRAPPER_ID, &style::fade_style(opacity, duration));
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
