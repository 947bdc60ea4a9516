use std::time::Duration;

use glam::Vec2;

/// Inline style for the fade wrapper. Both directions animate.
#[inline]
pub fn fade_style(opacity: u8, duration: Duration) -> String {
    format!(
        "opacity:{};transition:opacity {}ms",
        opacity,
        duration.as_millis()
    )
}

/// Position of a minimap marker, in percent of the floor plan, clamped to it.
#[inline]
pub fn map_marker_style(pos: Vec2) -> String {
    let p = pos.clamp(Vec2::ZERO, Vec2::splat(100.0));
    format!("left:{:.2}%;top:{:.2}%", p.x, p.y)
}
