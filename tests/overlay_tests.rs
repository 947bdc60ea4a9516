// Host-side tests for the overlay slot.

use tour_core::{OverlayContent, OverlayDispatcher};

fn content(title: &str) -> OverlayContent {
    OverlayContent {
        title: title.to_string(),
        description: format!("About the {title}"),
        image: None,
    }
}

#[test]
fn show_replaces_wholesale() {
    let mut o = OverlayDispatcher::default();
    o.show(OverlayContent {
        image: Some("/s.jpg".into()),
        ..content("Statue")
    });
    o.show(content("Plaque"));
    assert_eq!(o.active(), Some(&content("Plaque")));
}

#[test]
fn dismiss_clears_and_reports() {
    let mut o = OverlayDispatcher::default();
    assert!(!o.dismiss());
    o.show(content("Statue"));
    assert!(o.dismiss());
    assert_eq!(o.active(), None);
}
