//! Common utility functions for tooltip rendering

use lingering_types::Rgba;
use lingering_types::markup::remove_tags;
use tiny_skia::Color;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Convert RGBA to a Color with `opacity` multiplied into its alpha
pub fn faded_color(rgba: Rgba, opacity: f32) -> Color {
    let mut color = color_from_rgba(rgba);
    color.apply_opacity(opacity.clamp(0.0, 1.0));
    color
}

/// Visible character count of tooltip text (markup excluded)
pub fn visible_chars(text: &str) -> usize {
    remove_tags(text).chars().count()
}
