// Shared viewer tuning constants used by the engine and the web frontend.

// Camera
pub const DEFAULT_HFOV_DEG: f64 = 100.0; // hfov on first entry and after reset
pub const ZOOM_STEP_DEG: f64 = 10.0; // hfov change per zoom intent
pub const MIN_HFOV_DEG: f64 = 50.0; // renderer default lower bound
pub const MAX_HFOV_DEG: f64 = 120.0; // renderer default upper bound

// Autorotate drift, degrees of yaw per second (negative = rightwards)
pub const AUTOROTATE_RATE_DEG_PER_SEC: f64 = -2.0;

// Transitions
// Fixed wait for the fade-out; the outgoing renderer has no "fade complete" event.
pub const FADE_DURATION_MS: u64 = 500;
// Upper bound on the wait for the renderer's load callback (0 disables).
pub const LOAD_TIMEOUT_MS: u64 = 15_000;

// Markers per scene stored inline before spilling to the heap
pub const INLINE_MARKERS: usize = 8;
