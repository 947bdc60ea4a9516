use tour_core::OverlayContent;
use web_sys as web;

use crate::constants::{
    INFO_CLOSE_ID, INFO_DESCRIPTION_ID, INFO_IMAGE_ID, INFO_OVERLAY_ID, INFO_TITLE_ID,
    SCENE_STATUS_ID,
};
use crate::dom;

/// Fill the info overlay with `content` and make it visible.
pub fn show_info(document: &web::Document, content: &OverlayContent) {
    dom::set_text(document, INFO_TITLE_ID, &content.title);
    dom::set_text(document, INFO_DESCRIPTION_ID, &content.description);
    if let Some(img) = document.get_element_by_id(INFO_IMAGE_ID) {
        match &content.image {
            Some(src) => {
                _ = img.set_attribute("src", src);
                _ = img.set_attribute("alt", &content.title);
                _ = img.set_attribute("style", "");
            }
            None => {
                _ = img.remove_attribute("src");
                _ = img.set_attribute("style", "display:none");
            }
        }
    }
    if let Some(el) = document.get_element_by_id(INFO_OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_info(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INFO_OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Wire the close button of the info overlay.
pub fn wire_close(document: &web::Document, mut on_close: impl FnMut() + 'static) {
    dom::add_click_listener(document, INFO_CLOSE_ID, move || on_close());
}

/// Short status line under the scene title; empty text hides it.
pub fn set_status(document: &web::Document, text: &str) {
    dom::set_text(document, SCENE_STATUS_ID, text);
    let style = if text.is_empty() { "display:none" } else { "" };
    dom::set_style(document, SCENE_STATUS_ID, style);
}
