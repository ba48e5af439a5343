//! Modifier key state machine.
//!
//! Two keys drive every hotkey feature:
//!
//! ```text
//!   Ctrl  double-tap ─────────────────────▶ ToggleHide
//!   Ctrl held + Shift double-tap ─────────▶ CommitListUpdate
//!   Ctrl held + Shift held past window ───▶ Peek (every repeat, consumed)
//! ```
//!
//! Each key runs its own [`DoubleTap`] detector:
//!
//! ```text
//!               press                 release (≤ window)
//!   Released ─────────▶ Pressed ──────────────────────▶ ArmedSingleTap
//!      ▲                   │ repeat past window            │ press within window
//!      │                   ▼                               ▼
//!      └──── release ── Held                             Spent ── release ──▶ Released
//! ```
//!
//! Anything unexpected (a release with no press, a stale armed tap) falls
//! back to `Released` so a stray event never produces a double-tap.

use chrono::NaiveDateTime;
use lingering_types::{Point, TooltipConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Ctrl,
    Shift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapState {
    #[default]
    Released,
    /// Down, first press at `since`
    Pressed { since: NaiveDateTime },
    /// Released quickly after a press at `since`; waiting for the second tap
    ArmedSingleTap { since: NaiveDateTime },
    /// Down longer than the window
    Held { since: NaiveDateTime },
    /// Down after completing a double-tap
    Spent,
}

/// What a key event meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    None,
    DoubleTap,
    /// Key is still down past the window (repeat press)
    Holding,
}

/// Double-tap and long-hold detection for one key.
#[derive(Debug, Clone, Default)]
pub struct DoubleTap {
    state: TapState,
}

impl DoubleTap {
    pub fn state(&self) -> TapState {
        self.state
    }

    pub fn is_down(&self) -> bool {
        matches!(
            self.state,
            TapState::Pressed { .. } | TapState::Held { .. } | TapState::Spent
        )
    }

    /// Start of the pending double-tap window, if one is open.
    pub fn pending_since(&self) -> Option<NaiveDateTime> {
        match self.state {
            TapState::Pressed { since } | TapState::ArmedSingleTap { since } => Some(since),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = TapState::Released;
    }

    /// Handle a press (or an auto-repeat press while already down).
    /// A zero window disables detection entirely.
    pub fn press(&mut self, now: NaiveDateTime, window_ms: u32) -> TapOutcome {
        if window_ms == 0 {
            self.state = TapState::Spent;
            return TapOutcome::None;
        }
        let window = window_ms as i64;

        match self.state {
            TapState::Released => {
                self.state = TapState::Pressed { since: now };
                TapOutcome::None
            }
            TapState::Pressed { since } => {
                if elapsed_ms(since, now) > window {
                    self.state = TapState::Held { since };
                    TapOutcome::Holding
                } else {
                    TapOutcome::None
                }
            }
            TapState::ArmedSingleTap { since } => {
                let elapsed = elapsed_ms(since, now);
                if (0..window).contains(&elapsed) {
                    self.state = TapState::Spent;
                    TapOutcome::DoubleTap
                } else {
                    self.state = TapState::Pressed { since: now };
                    TapOutcome::None
                }
            }
            TapState::Held { .. } => TapOutcome::Holding,
            TapState::Spent => TapOutcome::None,
        }
    }

    /// Handle a release. A hold longer than the window discards the tap.
    pub fn release(&mut self, now: NaiveDateTime, window_ms: u32) {
        self.state = match self.state {
            TapState::Pressed { since } if elapsed_ms(since, now) <= window_ms as i64 => {
                TapState::ArmedSingleTap { since }
            }
            _ => TapState::Released,
        };
    }
}

fn elapsed_ms(since: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - since).num_milliseconds()
}

/// High-level actions produced by key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    ToggleHide { hidden: bool },
    CommitListUpdate,
    Peek,
}

/// Result of one key event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyResponse {
    pub intents: Vec<InputIntent>,
    /// The host should not pass this event on
    pub consumed: bool,
}

/// Read-only view of modifier state for the rest of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub ctrl_pressed: bool,
    pub shift_pressed: bool,
    pub hide_mode: bool,
    pub last_ctrl_press: Option<NaiveDateTime>,
    pub last_shift_press: Option<NaiveDateTime>,
    pub last_click_point: Option<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct InputStateMachine {
    ctrl: DoubleTap,
    shift: DoubleTap,
    hide_mode: bool,
    last_click_point: Option<Point>,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        InputState {
            ctrl_pressed: self.ctrl.is_down(),
            shift_pressed: self.shift.is_down(),
            hide_mode: self.hide_mode,
            last_ctrl_press: self.ctrl.pending_since(),
            last_shift_press: self.shift.pending_since(),
            last_click_point: self.last_click_point,
        }
    }

    pub fn hide_mode(&self) -> bool {
        self.hide_mode
    }

    pub fn mouse_pressed(&mut self, point: Point) {
        self.last_click_point = Some(point);
    }

    pub fn key_pressed(
        &mut self,
        key: ModifierKey,
        now: NaiveDateTime,
        config: &TooltipConfig,
    ) -> KeyResponse {
        let window = config.double_tap_delay_ms;
        let mut response = KeyResponse::default();

        match key {
            ModifierKey::Ctrl => {
                if self.ctrl.press(now, window) == TapOutcome::DoubleTap {
                    self.hide_mode = !self.hide_mode;
                    tracing::info!(hidden = self.hide_mode, "Hide mode toggled");
                    response.intents.push(InputIntent::ToggleHide {
                        hidden: self.hide_mode,
                    });
                }
            }
            ModifierKey::Shift => {
                // Shift only means something while ctrl is down
                if !self.ctrl.is_down() {
                    self.shift.reset();
                    return response;
                }
                match self.shift.press(now, window) {
                    TapOutcome::DoubleTap => {
                        response.intents.push(InputIntent::CommitListUpdate);
                    }
                    TapOutcome::Holding => {
                        response.intents.push(InputIntent::Peek);
                        response.consumed = true;
                    }
                    TapOutcome::None => {}
                }
            }
        }

        response
    }

    pub fn key_released(&mut self, key: ModifierKey, now: NaiveDateTime, config: &TooltipConfig) {
        let window = config.double_tap_delay_ms;
        match key {
            ModifierKey::Ctrl => {
                self.ctrl.release(now, window);
                self.shift.reset();
            }
            ModifierKey::Shift => self.shift.release(now, window),
        }
    }
}
