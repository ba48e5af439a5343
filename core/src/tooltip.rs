//! Tooltip records.

use chrono::NaiveDateTime;
use lingering_types::markup::remove_tags;
use lingering_types::{Point, Rgba};

/// Identity of a tooltip for flush marks and refresh checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TooltipId(pub u64);

/// A single live tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub id: TooltipId,
    /// Display text, possibly carrying `<col=...>` markup
    pub text: String,
    pub background_color: Rgba,
    /// `None` lets the render surface auto-place the tooltip
    pub location: Option<Point>,
    pub is_info: bool,
    created_at: NaiveDateTime,
    is_faded: bool,
    is_clamped: bool,
}

impl Tooltip {
    pub fn new(
        id: TooltipId,
        text: String,
        background_color: Rgba,
        location: Option<Point>,
        is_info: bool,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            text,
            background_color,
            location,
            is_info,
            created_at: now,
            is_faded: false,
            is_clamped: false,
        }
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn is_faded(&self) -> bool {
        self.is_faded
    }

    pub fn is_clamped(&self) -> bool {
        self.is_clamped
    }

    /// Text with markup removed, used for every comparison.
    pub fn plain_text(&self) -> String {
        remove_tags(&self.text)
    }

    /// Milliseconds since creation (negative if the clock stepped backwards).
    pub fn elapsed_ms(&self, now: NaiveDateTime) -> i64 {
        (now - self.created_at).num_milliseconds()
    }

    /// Latch the faded flag. There is no way back except [`Tooltip::revive`].
    pub fn mark_faded(&mut self) {
        self.is_faded = true;
    }

    /// Clear the faded latch and restart the lifespan at `now`.
    pub(crate) fn revive(&mut self, now: NaiveDateTime) {
        self.is_faded = false;
        self.restart_at(now);
    }

    /// Move `created_at` forward. Earlier instants are ignored.
    pub(crate) fn restart_at(&mut self, at: NaiveDateTime) {
        if at > self.created_at {
            self.created_at = at;
        }
    }

    /// Apply the one-time viewport clamp. Later calls are no-ops.
    pub fn clamp_to(&mut self, location: Point) {
        if self.is_clamped {
            return;
        }
        if self.location.is_some() {
            self.location = Some(location);
        }
        self.is_clamped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn make_tooltip(at: NaiveDateTime) -> Tooltip {
        Tooltip::new(
            TooltipId(1),
            "<col=ffffff>Examine Rock".to_string(),
            [0, 0, 0, 255],
            Some(Point::new(100, 100)),
            false,
            at,
        )
    }

    #[test]
    fn test_restart_never_moves_backwards() {
        let t0 = now();
        let mut tooltip = make_tooltip(t0);
        tooltip.restart_at(t0 - Duration::milliseconds(50));
        assert_eq!(tooltip.created_at(), t0);
        tooltip.restart_at(t0 + Duration::milliseconds(50));
        assert_eq!(tooltip.created_at(), t0 + Duration::milliseconds(50));
    }

    #[test]
    fn test_clamp_applies_once() {
        let mut tooltip = make_tooltip(now());
        tooltip.clamp_to(Point::new(90, 100));
        tooltip.clamp_to(Point::new(0, 0));
        assert!(tooltip.is_clamped());
        assert_eq!(tooltip.location, Some(Point::new(90, 100)));
    }

    #[test]
    fn test_plain_text_strips_markup() {
        assert_eq!(make_tooltip(now()).plain_text(), "Examine Rock");
    }
}
