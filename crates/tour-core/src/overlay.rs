use serde::{Deserialize, Serialize};

use crate::graph::InfoSpot;

/// Detail content shown for an infospot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayContent {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&InfoSpot> for OverlayContent {
    fn from(spot: &InfoSpot) -> Self {
        Self {
            title: spot.title.clone(),
            description: spot.description.clone(),
            image: spot.image.clone(),
        }
    }
}

/// Single-slot presenter: at most one overlay at a time, replaced wholesale.
#[derive(Debug, Default)]
pub struct OverlayDispatcher {
    active: Option<OverlayContent>,
}

impl OverlayDispatcher {
    pub fn show(&mut self, content: OverlayContent) {
        log::info!("[overlay] show {:?}", content.title);
        self.active = Some(content);
    }

    /// Clear the overlay. Returns whether one was showing.
    pub fn dismiss(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn active(&self) -> Option<&OverlayContent> {
        self.active.as_ref()
    }
}
