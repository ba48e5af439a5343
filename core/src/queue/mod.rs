//! Tooltip queue manager.
//!
//! Owns every live tooltip. Clicks and info events feed in, the render
//! boundary pulls a [`RenderFrame`] once per frame, and faded or overflowing
//! tooltips are retired by marking them and flushing at the start of the next
//! frame, never while the queue is being walked.
//!
//! ```text
//!   submit ──┬── tick sync ──▶ [pending] ── tick ──┐
//!            │                                     ▼
//!            └───────────────────────────────▶ place ──┬──▶ [fixed slot]
//!                                                      └──▶ [queue] ─ overflow ─▶ flush marks
//!   info ───────────────────▶ [info slot] (refreshed in place)
//! ```

#[cfg(test)]
mod queue_tests;

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use hashbrown::HashSet;
use lingering_types::markup::remove_tags;
use lingering_types::{ConfigKey, Point, Rgba, TooltipConfig, TooltipLocation};

use crate::config::ConfigStore;
use crate::fade::{self, FadePhase};
use crate::filter::{FilterEngine, FilterListUpdate, MetaNotification};
use crate::input::InputState;
use crate::tooltip::{Tooltip, TooltipId};

/// What happened to a submitted click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitOutcome {
    pub created: bool,
    /// The click was blocked and must not reach the host
    pub consumed: bool,
}

/// Which slot a rendered item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Info,
    Fixed,
    /// 1-indexed position from the oldest queued tooltip
    Queue(usize),
}

/// One tooltip to draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub id: TooltipId,
    pub slot: Slot,
    pub text: String,
    pub background: Rgba,
    pub location: Option<Point>,
    pub opacity: f32,
}

impl RenderItem {
    fn new(tooltip: &Tooltip, slot: Slot, opacity: f32) -> Self {
        Self {
            id: tooltip.id,
            slot,
            text: tooltip.text.clone(),
            background: tooltip.background_color,
            location: tooltip.location,
            opacity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub items: Vec<RenderItem>,
    /// Tooltips removed by the flush that opened this frame
    pub flushed: usize,
}

#[derive(Debug, Default)]
pub struct TooltipQueue {
    tooltips: VecDeque<Tooltip>,
    to_flush: HashSet<TooltipId>,
    info: Option<Tooltip>,
    fixed: Option<Tooltip>,
    tick_pending: Option<Tooltip>,
    next_id: u64,
    last_tooltip_text: Option<String>,
    last_unfiltered_text: Option<String>,
}

impl TooltipQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.tooltips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tooltips.is_empty()
    }

    /// Queued tooltips, oldest first.
    pub fn tooltips(&self) -> impl Iterator<Item = &Tooltip> {
        self.tooltips.iter()
    }

    pub fn info(&self) -> Option<&Tooltip> {
        self.info.as_ref()
    }

    pub fn fixed(&self) -> Option<&Tooltip> {
        self.fixed.as_ref()
    }

    pub fn tick_pending(&self) -> Option<&Tooltip> {
        self.tick_pending.as_ref()
    }

    pub fn is_marked_for_flush(&self, id: TooltipId) -> bool {
        self.to_flush.contains(&id)
    }

    /// Last non-trivial click text, the target of list updates.
    pub fn last_tooltip_text(&self) -> Option<&str> {
        self.last_tooltip_text.as_deref()
    }

    /// Last text that actually became a tooltip, shown by peek.
    pub fn last_unfiltered_text(&self) -> Option<&str> {
        self.last_unfiltered_text.as_deref()
    }

    pub fn last_info_text(&self) -> Option<&str> {
        self.info.as_ref().map(|t| t.text.as_str())
    }

    fn next_id(&mut self) -> TooltipId {
        self.next_id += 1;
        TooltipId(self.next_id)
    }

    fn find_mut(&mut self, id: TooltipId) -> Option<&mut Tooltip> {
        if let Some(t) = self.info.as_mut().filter(|t| t.id == id) {
            return Some(t);
        }
        if let Some(t) = self.fixed.as_mut().filter(|t| t.id == id) {
            return Some(t);
        }
        self.tooltips.iter_mut().find(|t| t.id == id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a click through the filters and create its tooltip if it passes.
    pub fn submit(
        &mut self,
        text: &str,
        click: Option<Point>,
        input: &InputState,
        filter: &FilterEngine,
        config: &TooltipConfig,
        now: NaiveDateTime,
    ) -> SubmitOutcome {
        let colored = filter.apply_text_color(text, config);
        let plain = remove_tags(&colored);
        if !filter.is_trivial(&plain) {
            self.last_tooltip_text = Some(colored.clone());
        }

        let block = filter.block_decision(&plain, input.shift_pressed, input.ctrl_pressed, config);
        let consumed = block.is_some_and(|b| b.consumes());
        let full_text = match block {
            Some(annotation) => format!("{}{}", annotation.prefix(), colored),
            None => colored,
        };

        if !filter.should_render(&full_text, input.hide_mode, input.ctrl_pressed, config) {
            tracing::debug!(text = %plain, "Tooltip filtered");
            return SubmitOutcome {
                created: false,
                consumed,
            };
        }

        self.last_unfiltered_text = Some(full_text.clone());
        let background = filter.background_color(&full_text, config);
        let id = self.next_id();
        let tooltip = Tooltip::new(
            id,
            full_text,
            background,
            offset_location(click, config),
            false,
            now,
        );

        if config.tick_sync_mode {
            self.tick_pending = Some(tooltip);
        } else {
            self.place(tooltip, config);
        }

        SubmitOutcome {
            created: true,
            consumed,
        }
    }

    fn place(&mut self, tooltip: Tooltip, config: &TooltipConfig) {
        if uses_fixed_slot(config) {
            self.fixed = Some(tooltip);
        } else {
            self.add(tooltip, config);
        }
    }

    /// Append to the queue, marking the oldest entries for flush if it is
    /// now over the cap.
    pub fn add(&mut self, tooltip: Tooltip, config: &TooltipConfig) {
        self.tooltips.push_back(tooltip);

        let max = config.maximum_tooltips_shown as usize;
        let unmarked: Vec<TooltipId> = self
            .tooltips
            .iter()
            .map(|t| t.id)
            .filter(|id| !self.to_flush.contains(id))
            .collect();
        if unmarked.len() > max {
            let excess = unmarked.len() - max;
            self.to_flush.extend(unmarked.into_iter().take(excess));
        }
    }

    /// Show an info tooltip, refreshing the current one if its text matches.
    pub fn create_info_tooltip(
        &mut self,
        text: &str,
        filter: &FilterEngine,
        config: &TooltipConfig,
        now: NaiveDateTime,
    ) -> TooltipId {
        let plain = remove_tags(text);
        if let Some(info) = self.info.as_mut()
            && info.plain_text() == plain
        {
            fade::refresh(info, config, now);
            return info.id;
        }

        let id = self.next_id();
        let background = filter.background_color(text, config);
        self.info = Some(Tooltip::new(id, text.to_string(), background, None, true, now));
        id
    }

    pub fn show_hide_mode(
        &mut self,
        hidden: bool,
        filter: &FilterEngine,
        config: &TooltipConfig,
        now: NaiveDateTime,
    ) -> TooltipId {
        let text = MetaNotification::HideMode { hidden }.render();
        self.create_info_tooltip(&text, filter, config, now)
    }

    /// Toggle the last click in the active list and announce the result.
    pub fn commit_list_update(
        &mut self,
        filter: &FilterEngine,
        config: &mut TooltipConfig,
        store: &mut dyn ConfigStore,
        now: NaiveDateTime,
    ) -> FilterListUpdate {
        let text = self.last_tooltip_text.clone().unwrap_or_default();
        let update = filter.update_filter_lists(&text, false, config, store);
        if let Some(note) = update.notification(false) {
            self.create_info_tooltip(&note.render(), filter, config, now);
        }
        update
    }

    /// Preview what a commit would do, or fall back to the last click.
    /// Shows nothing when there is neither.
    pub fn peek(
        &mut self,
        filter: &FilterEngine,
        config: &mut TooltipConfig,
        store: &mut dyn ConfigStore,
        now: NaiveDateTime,
    ) -> Option<TooltipId> {
        let text = self.last_tooltip_text.clone().unwrap_or_default();
        let update = filter.update_filter_lists(&text, true, config, store);
        let note = match update {
            FilterListUpdate::Changed { .. } => update.notification(true),
            _ => self
                .last_unfiltered_text
                .as_ref()
                .map(|text| MetaNotification::LastClick { text: text.clone() }),
        }?;
        Some(self.create_info_tooltip(&note.render(), filter, config, now))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Promote the tick-synced tooltip, starting its lifespan now.
    pub fn tick(&mut self, config: &TooltipConfig, now: NaiveDateTime) {
        if let Some(mut tooltip) = self.tick_pending.take() {
            tooltip.restart_at(now);
            self.place(tooltip, config);
        }
    }

    /// Remove marked tooltips from the queue. Returns how many went.
    pub fn flush(&mut self) -> usize {
        if self.to_flush.is_empty() {
            return 0;
        }
        let before = self.tooltips.len();
        let to_flush = &self.to_flush;
        self.tooltips.retain(|t| !to_flush.contains(&t.id));
        self.to_flush.clear();
        before - self.tooltips.len()
    }

    /// Drop in-flight tooltips after a setting changed.
    pub fn clear(&mut self, key: ConfigKey) {
        if !key.is_reposition() {
            self.tooltips.clear();
            self.to_flush.clear();
            self.fixed = None;
            self.tick_pending = None;
        }
        if !key.is_filter_list() {
            self.last_tooltip_text = None;
            self.last_unfiltered_text = None;
        }
    }

    /// Record the one-time viewport clamp for a tooltip.
    pub fn clamp(&mut self, id: TooltipId, location: Point) {
        if let Some(tooltip) = self.find_mut(id) {
            tooltip.clamp_to(location);
        }
    }

    /// Located tooltips that have not been clamped yet.
    pub fn unclamped(&self) -> Vec<(TooltipId, String, Point)> {
        self.info
            .iter()
            .chain(self.fixed.iter())
            .chain(self.tooltips.iter())
            .filter(|t| !t.is_clamped())
            .filter_map(|t| t.location.map(|loc| (t.id, t.text.clone(), loc)))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Per-frame walk
    // ─────────────────────────────────────────────────────────────────────────

    /// Flush, then collect everything visible this frame with its opacity.
    ///
    /// Only the first `maximum_tooltips_shown` queue entries are drawn, but
    /// the whole queue is walked so faded entries get marked for the next
    /// flush.
    pub fn prepare_frame(
        &mut self,
        input: &InputState,
        config: &TooltipConfig,
        now: NaiveDateTime,
    ) -> RenderFrame {
        let mut frame = RenderFrame {
            flushed: self.flush(),
            ..Default::default()
        };

        if let Some(info) = self.info.as_mut()
            && let Some(opacity) = timed_opacity(info, config, now)
        {
            frame.items.push(RenderItem::new(info, Slot::Info, opacity));
        }

        let hidden = input.hide_mode && !(input.ctrl_pressed && config.ctrl_shows_while_hidden);
        if hidden {
            return frame;
        }

        if uses_fixed_slot(config) {
            if let Some(fixed) = self.fixed.as_mut() {
                let opacity = if config.is_permanent() {
                    Some(fade::permanent_opacity(config)).filter(|o| *o > 0.0)
                } else {
                    timed_opacity(fixed, config, now)
                };
                if let Some(opacity) = opacity {
                    frame.items.push(RenderItem::new(fixed, Slot::Fixed, opacity));
                }
            }
            return frame;
        }

        let max = config.maximum_tooltips_shown as usize;
        let len = self.tooltips.len();
        for (index, tooltip) in self.tooltips.iter_mut().enumerate() {
            if index < max {
                let opacity = if config.is_permanent() {
                    Some(fade::queue_opacity(index + 1, len, config)).filter(|o| *o > 0.0)
                } else {
                    timed_opacity(tooltip, config, now)
                };
                if let Some(opacity) = opacity {
                    frame
                        .items
                        .push(RenderItem::new(tooltip, Slot::Queue(index + 1), opacity));
                }
            }
            if tooltip.is_faded() {
                self.to_flush.insert(tooltip.id);
            }
        }

        frame
    }
}

/// Opacity for a timed tooltip, latching the faded flag when its life is over.
/// `None` when there is nothing to draw.
fn timed_opacity(tooltip: &mut Tooltip, config: &TooltipConfig, now: NaiveDateTime) -> Option<f32> {
    if tooltip.is_faded() {
        return None;
    }
    let opacity = fade::tooltip_opacity(tooltip, config, now);
    if opacity.phase == FadePhase::Faded {
        tooltip.mark_faded();
        return None;
    }
    Some(opacity.value).filter(|v| *v > 0.0)
}

fn uses_fixed_slot(config: &TooltipConfig) -> bool {
    config.tooltip_location == TooltipLocation::Fixed && !config.tracker_mode
}

/// Where a click tooltip sits relative to its click, or `None` when the
/// surface should place it.
pub fn offset_location(click: Option<Point>, config: &TooltipConfig) -> Option<Point> {
    if config.is_anchored() || uses_fixed_slot(config) {
        return None;
    }
    click.map(|p| p.offset(config.tooltip_x_offset, config.tooltip_y_offset))
}
