use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_style(document: &web::Document, element_id: &str, style: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.set_attribute("style", style);
    }
}

/// Toggle a CSS class on an element; missing elements are ignored.
#[inline]
pub fn set_class(document: &web::Document, element_id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().toggle_with_force(class, on);
    }
}

/// Create an element with a class name, logging instead of failing.
pub fn create(document: &web::Document, tag: &str, class: &str) -> Option<web::Element> {
    match document.create_element(tag) {
        Ok(el) => {
            el.set_class_name(class);
            Some(el)
        }
        Err(e) => {
            log::error!("[dom] create <{}> failed: {:?}", tag, e);
            None
        }
    }
}
