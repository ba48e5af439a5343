//! Host-facing entry point.
//!
//! The host forwards raw events here and pulls one [`RenderFrame`] per frame.
//! Everything runs on the host's event thread; each call is short and never
//! blocks.

use chrono::NaiveDateTime;
use lingering_types::markup::menu_text;
use lingering_types::{ConfigKey, Point, TooltipConfig};

use crate::config::ConfigStore;
use crate::error::ConfigError;
use crate::filter::{FilterEngine, FilterListUpdate};
use crate::input::{InputIntent, InputState, InputStateMachine, ModifierKey};
use crate::queue::{RenderFrame, TooltipQueue};
use crate::tooltip::TooltipId;

pub struct TooltipEngine {
    config: TooltipConfig,
    filter: FilterEngine,
    input: InputStateMachine,
    queue: TooltipQueue,
    store: Box<dyn ConfigStore>,
}

impl TooltipEngine {
    pub fn new(config: TooltipConfig, store: Box<dyn ConfigStore>) -> Self {
        Self {
            filter: FilterEngine::new(&config),
            config,
            input: InputStateMachine::new(),
            queue: TooltipQueue::new(),
            store,
        }
    }

    /// Build an engine from whatever the store currently holds.
    pub fn from_store(store: Box<dyn ConfigStore>) -> Result<Self, ConfigError> {
        let config = store.load()?;
        Ok(Self::new(config, store))
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn queue(&self) -> &TooltipQueue {
        &self.queue
    }

    pub fn input_state(&self) -> InputState {
        self.input.state()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Host events
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_mouse_pressed(&mut self, point: Point) {
        self.input.mouse_pressed(point);
    }

    /// A menu entry was clicked. Returns true if the click must be consumed.
    pub fn on_menu_option_clicked(&mut self, option: &str, target: &str, now: NaiveDateTime) -> bool {
        let input = self.input.state();
        let outcome = self.queue.submit(
            &menu_text(option, target),
            input.last_click_point,
            &input,
            &self.filter,
            &self.config,
            now,
        );
        if outcome.consumed {
            tracing::debug!(option, target, "Click blocked");
        }
        outcome.consumed
    }

    /// Returns true if the key event must be consumed.
    pub fn on_key_pressed(&mut self, key: ModifierKey, now: NaiveDateTime) -> bool {
        let response = self.input.key_pressed(key, now, &self.config);
        for intent in response.intents {
            self.dispatch(intent, now);
        }
        response.consumed
    }

    pub fn on_key_released(&mut self, key: ModifierKey, now: NaiveDateTime) {
        self.input.key_released(key, now, &self.config);
    }

    pub fn on_tick(&mut self, now: NaiveDateTime) {
        self.queue.tick(&self.config, now);
    }

    /// Adopt a new config after `key` changed.
    pub fn on_config_changed(&mut self, key: ConfigKey, config: TooltipConfig) {
        self.config = config;
        self.apply_change(key);
    }

    fn apply_change(&mut self, key: ConfigKey) {
        tracing::debug!(key = %key, "Config changed");
        self.filter.update_from_config(key, &self.config);
        self.queue.clear(key);
    }

    fn dispatch(&mut self, intent: InputIntent, now: NaiveDateTime) {
        match intent {
            InputIntent::ToggleHide { hidden } => {
                self.queue
                    .show_hide_mode(hidden, &self.filter, &self.config, now);
            }
            InputIntent::CommitListUpdate => {
                let update = self.queue.commit_list_update(
                    &self.filter,
                    &mut self.config,
                    self.store.as_mut(),
                    now,
                );
                // The list is a setting like any other
                if let FilterListUpdate::Changed { mode, .. } = update
                    && let Some(key) = mode.list_key()
                {
                    self.apply_change(key);
                }
            }
            InputIntent::Peek => {
                self.queue
                    .peek(&self.filter, &mut self.config, self.store.as_mut(), now);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Render boundary
    // ─────────────────────────────────────────────────────────────────────────

    pub fn prepare_frame(&mut self, now: NaiveDateTime) -> RenderFrame {
        let input = self.input.state();
        let frame = self.queue.prepare_frame(&input, &self.config, now);
        if frame.flushed > 0 {
            tracing::trace!(flushed = frame.flushed, "Flushed tooltips");
        }
        frame
    }

    pub fn unclamped(&self) -> Vec<(TooltipId, String, Point)> {
        self.queue.unclamped()
    }

    pub fn clamp(&mut self, id: TooltipId, location: Point) {
        self.queue.clamp(id, location);
    }
}
