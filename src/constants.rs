//! Element ids the front-end expects in the host page, plus the location of
//! the tour document.

// Tour document, relative to the page
pub const TOUR_CONFIG_URL: &str = "tour/tourConfig.json";

// Viewer
pub const PANORAMA_ID: &str = "panorama"; // container handed to the renderer
pub const FADE_WRAPPER_ID: &str = "panorama-fade"; // element whose opacity is animated
pub const SCENE_TITLE_ID: &str = "scene-title";
pub const SCENE_STATUS_ID: &str = "scene-status";

// Info overlay
pub const INFO_OVERLAY_ID: &str = "info-overlay";
pub const INFO_TITLE_ID: &str = "info-title";
pub const INFO_DESCRIPTION_ID: &str = "info-description";
pub const INFO_IMAGE_ID: &str = "info-image";
pub const INFO_CLOSE_ID: &str = "info-close";

// Controls
pub const ZOOM_IN_ID: &str = "zoom-in";
pub const ZOOM_OUT_ID: &str = "zoom-out";
pub const RESET_ID: &str = "reset-view";
pub const FULLSCREEN_ID: &str = "fullscreen";
pub const AUTOROTATE_ID: &str = "autorotate";

// Scene list and minimap
pub const SCENE_LIST_ID: &str = "scene-list";
pub const SCENE_SEARCH_ID: &str = "scene-search";
pub const MINIMAP_ID: &str = "minimap";

// CSS classes applied to renderer markers
pub const HOTSPOT_CLASS: &str = "pnlm-hotspot-custom";
pub const INFOSPOT_CLASS: &str = "pnlm-hotspot-info";
pub const CURRENT_CLASS: &str = "current";
pub const ACTIVE_CLASS: &str = "active";
