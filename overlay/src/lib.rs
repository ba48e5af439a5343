//! Render boundary for lingering click tooltips.
//!
//! [`TooltipOverlay`] turns an engine's per-frame state into draw calls on a
//! [`TooltipSurface`]. Hosts implement the surface over their own graphics
//! stack; [`PixmapSurface`] renders headlessly into a tiny-skia pixmap.

pub mod clamp;
pub mod compose;
pub mod pixmap;
pub mod surface;
pub mod utils;

pub use clamp::clamped_location;
pub use compose::{TooltipOverlay, fixed_position};
pub use pixmap::{DrawCall, PixmapSurface};
pub use surface::TooltipSurface;
