//! Headless raster surface.
//!
//! Fills each tooltip's background box into a `tiny_skia::Pixmap` with the
//! tooltip opacity applied and records every draw call. Glyphs are not
//! rasterized; text is measured with a fixed advance so layout (and clamping)
//! behaves like a monospace font.

use lingering_types::markup::remove_tags;
use lingering_types::{Point, Rgba, Size};
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

use crate::clamp::clamped_location;
use crate::surface::TooltipSurface;
use crate::utils::{faded_color, visible_chars};

const GLYPH_ADVANCE: i32 = 7;
const LINE_HEIGHT: i32 = 14;
const PADDING: i32 = 4;
/// Anchored boxes sit this far right of and below the cursor
const CURSOR_OFFSET: Point = Point::new(12, 16);
const STACK_GAP: i32 = 2;

/// One recorded `draw_text_box` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// De-tagged text
    pub text: String,
    pub background: Rgba,
    pub position: Point,
    pub size: Size,
    pub alpha: f32,
    pub anchored: bool,
}

pub struct PixmapSurface {
    pixmap: Pixmap,
    cursor: Point,
    mouse_over: bool,
    /// Height already used by anchored boxes this frame
    anchored_stack: i32,
    draws: Vec<DrawCall>,
}

impl PixmapSurface {
    /// `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            cursor: Point::default(),
            mouse_over: true,
            anchored_stack: 0,
            draws: Vec::new(),
        })
    }

    pub fn set_cursor(&mut self, cursor: Point, over_canvas: bool) {
        self.cursor = cursor;
        self.mouse_over = over_canvas;
    }

    /// Clear the canvas and the draw log.
    pub fn begin_frame(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.draws.clear();
        self.anchored_stack = 0;
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn anchored_position(&mut self, size: Size) -> Point {
        let wanted = self
            .cursor
            .offset(CURSOR_OFFSET.x, CURSOR_OFFSET.y + self.anchored_stack);
        self.anchored_stack += size.height + STACK_GAP;
        clamped_location(size, wanted, self.canvas_size(), Point::default())
    }

    fn fill_box(&mut self, position: Point, size: Size, background: Rgba, alpha: f32) {
        if alpha <= 0.0 || background[3] == 0 {
            return;
        }
        let Some(rect) = Rect::from_xywh(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(faded_color(background, alpha));
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }
}

impl TooltipSurface for PixmapSurface {
    fn canvas_size(&self) -> Size {
        Size::new(self.pixmap.width() as i32, self.pixmap.height() as i32)
    }

    fn mouse_over_canvas(&self) -> bool {
        self.mouse_over
    }

    fn measure(&self, text: &str) -> Size {
        Size::new(
            visible_chars(text) as i32 * GLYPH_ADVANCE + 2 * PADDING,
            LINE_HEIGHT + 2 * PADDING,
        )
    }

    fn draw_text_box(
        &mut self,
        text: &str,
        background: Rgba,
        position: Option<Point>,
        alpha: f32,
    ) -> Size {
        let size = self.measure(text);
        let anchored = position.is_none();
        let position = match position {
            Some(p) => p,
            None => self.anchored_position(size),
        };

        self.fill_box(position, size, background, alpha);
        self.draws.push(DrawCall {
            text: remove_tags(text),
            background,
            position,
            size,
            alpha,
            anchored,
        });
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_surface() -> PixmapSurface {
        PixmapSurface::new(400, 300).unwrap()
    }

    #[test]
    fn test_zero_sized_surface() {
        assert!(PixmapSurface::new(0, 10).is_none());
    }

    #[test]
    fn test_measure_uses_visible_text() {
        let surface = make_surface();
        assert_eq!(surface.measure("<col=ff0000>Drop"), Size::new(36, 22));
    }

    #[test]
    fn test_draw_fills_background_with_alpha() {
        let mut surface = make_surface();
        surface.draw_text_box("Examine Rock", [255, 0, 0, 255], Some(Point::new(10, 10)), 0.5);

        let inside = surface.pixmap().pixel(12, 12).unwrap();
        assert!((inside.alpha() as i32 - 128).abs() <= 1);
        let outside = surface.pixmap().pixel(5, 5).unwrap();
        assert_eq!(outside.alpha(), 0);
    }

    #[test]
    fn test_transparent_draw_leaves_canvas_untouched() {
        let mut surface = make_surface();
        surface.draw_text_box("Examine Rock", [255, 0, 0, 255], Some(Point::new(10, 10)), 0.0);
        assert_eq!(surface.pixmap().pixel(12, 12).unwrap().alpha(), 0);
        assert_eq!(surface.draws().len(), 1);
    }

    #[test]
    fn test_anchored_boxes_stack_below_cursor() {
        let mut surface = make_surface();
        surface.set_cursor(Point::new(100, 100), true);
        surface.draw_text_box("Tooltips HIDDEN", [0, 0, 0, 0], None, 1.0);
        surface.draw_text_box("Examine Rock", [0, 0, 0, 0], None, 1.0);

        let positions: Vec<Point> = surface.draws().iter().map(|d| d.position).collect();
        assert_eq!(positions, vec![Point::new(112, 116), Point::new(112, 140)]);
        assert!(surface.draws().iter().all(|d| d.anchored));

        surface.begin_frame();
        assert!(surface.draws().is_empty());
    }
}
