//! Keep located tooltips on screen.

use lingering_types::{Point, Size};

/// Pull a tooltip of `size` at `location` back inside `canvas`, leaving
/// `padding` pixels on each side.
///
/// The near edge wins when the tooltip is larger than the canvas.
pub fn clamped_location(size: Size, location: Point, canvas: Size, padding: Point) -> Point {
    Point::new(
        clamp_axis(location.x, size.width, canvas.width, padding.x),
        clamp_axis(location.y, size.height, canvas.height, padding.y),
    )
}

fn clamp_axis(pos: i32, extent: i32, max: i32, padding: i32) -> i32 {
    if pos < padding {
        padding
    } else if pos.saturating_add(extent).saturating_add(padding) > max {
        max.saturating_sub(extent)
            .saturating_sub(padding)
            .max(padding)
    } else {
        pos
    }
}
