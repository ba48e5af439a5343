//! Per-frame compose pass.
//!
//! ```text
//!   render(engine, surface)
//!     1. clamp   : measure + clamp every located tooltip not yet clamped
//!     2. collect : engine.prepare_frame (flush, opacity, faded marking)
//!     3. draw    : info → fixed slot or queue, anchored items hidden
//!                  while the mouse is off the canvas
//! ```

use chrono::NaiveDateTime;
use lingering_core::{RenderItem, Slot, TooltipEngine};
use lingering_types::{FixedAnchor, Point, Size};

use crate::clamp::clamped_location;
use crate::surface::TooltipSurface;

/// Draws an engine's tooltips onto a surface once per frame.
#[derive(Debug, Default)]
pub struct TooltipOverlay {
    frames: u64,
}

impl TooltipOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Render one frame. Returns the size of the fixed-slot tooltip if one
    /// was drawn, so the host can size its fixed overlay.
    pub fn render<S: TooltipSurface + ?Sized>(
        &mut self,
        engine: &mut TooltipEngine,
        surface: &mut S,
        now: NaiveDateTime,
    ) -> Option<Size> {
        self.frames += 1;
        clamp_pending(engine, surface);

        let frame = engine.prepare_frame(now);
        if frame.flushed > 0 {
            tracing::debug!(flushed = frame.flushed, frame = self.frames, "Tooltips retired");
        }

        let mouse_over = surface.mouse_over_canvas();
        let mut fixed_size = None;
        for item in &frame.items {
            match item.slot {
                Slot::Fixed => {
                    let size = surface.measure(&item.text);
                    let config = engine.config();
                    let position = fixed_position(
                        config.fixed_anchor,
                        config.fixed_location,
                        size,
                        surface.canvas_size(),
                    );
                    fixed_size = Some(surface.draw_text_box(
                        &item.text,
                        item.background,
                        Some(position),
                        item.opacity,
                    ));
                }
                Slot::Info | Slot::Queue(_) => draw_item(surface, item, mouse_over),
            }
        }
        fixed_size
    }
}

fn draw_item<S: TooltipSurface + ?Sized>(surface: &mut S, item: &RenderItem, mouse_over: bool) {
    let alpha = if item.location.is_none() && !mouse_over {
        0.0
    } else {
        item.opacity
    };
    surface.draw_text_box(&item.text, item.background, item.location, alpha);
}

/// Clamp every located tooltip that hasn't been clamped yet. Each tooltip is
/// clamped exactly once, against the canvas size at that moment.
fn clamp_pending<S: TooltipSurface + ?Sized>(engine: &mut TooltipEngine, surface: &S) {
    let canvas = surface.canvas_size();
    let config = engine.config();
    let padding = Point::new(config.clamp_x_padding, config.clamp_y_padding);

    for (id, text, location) in engine.unclamped() {
        let clamped = clamped_location(surface.measure(&text), location, canvas, padding);
        if clamped != location {
            tracing::trace!(?id, from = ?location, to = ?clamped, "Clamped tooltip");
        }
        engine.clamp(id, clamped);
    }
}

/// Top-left corner of the fixed-slot tooltip.
pub fn fixed_position(anchor: FixedAnchor, offset: Point, size: Size, canvas: Size) -> Point {
    let right = canvas.width.saturating_sub(size.width).saturating_sub(offset.x);
    let bottom = canvas.height.saturating_sub(size.height).saturating_sub(offset.y);
    match anchor {
        FixedAnchor::TopLeft => offset,
        FixedAnchor::TopRight => Point::new(right, offset.y),
        FixedAnchor::BottomLeft => Point::new(offset.x, bottom),
        FixedAnchor::BottomRight => Point::new(right, bottom),
    }
}
