//! Render surface abstraction.
//!
//! The engine never talks to a window directly. A host implements
//! [`TooltipSurface`] on top of whatever it draws with; [`PixmapSurface`]
//! is the headless implementation used by the replay tool and tests.
//!
//! [`PixmapSurface`]: crate::pixmap::PixmapSurface

use lingering_types::{Point, Rgba, Size};

/// Something tooltips can be drawn onto.
pub trait TooltipSurface {
    /// Drawable area in pixels
    fn canvas_size(&self) -> Size;

    /// Anchored tooltips are drawn fully transparent while the mouse is off
    /// the canvas.
    fn mouse_over_canvas(&self) -> bool {
        true
    }

    /// Size the text box for `text` would occupy, without drawing it.
    fn measure(&self, text: &str) -> Size;

    /// Draw a text box with its top-left corner at `position`, or let the
    /// surface place it next to the cursor when `position` is `None`.
    ///
    /// `alpha` in `0.0..=1.0` scales both background and text. Returns the
    /// drawn size.
    fn draw_text_box(
        &mut self,
        text: &str,
        background: Rgba,
        position: Option<Point>,
        alpha: f32,
    ) -> Size;
}
