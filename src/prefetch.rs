use tour_core::ResourceHints;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Preloads images by appending `<link rel="preload" as="image">` to `<head>`.
///
/// The browser fetches in the background and keeps the response in its
/// cache; nothing is reported back.
pub struct LinkPreloadHints {
    document: web::Document,
}

impl LinkPreloadHints {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }
}

impl ResourceHints for LinkPreloadHints {
    fn preload_image(&self, url: &str) {
        let Some(head) = self.document.head() else {
            return;
        };
        let link = match self
            .document
            .create_element("link")
            .map(|el| el.dyn_into::<web::HtmlLinkElement>())
        {
            Ok(Ok(link)) => link,
            _ => {
                log::debug!("[prefetch] could not create <link> for {}", url);
                return;
            }
        };
        link.set_rel("preload");
        link.set_as("image");
        link.set_href(url);
        _ = head.append_child(&link);
    }
}
