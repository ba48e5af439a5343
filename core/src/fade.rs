//! Fade scheduling.
//!
//! A tooltip's opacity is a pure function of its age and the active config:
//!
//! ```text
//!  opacity
//!    max ┤      ┌───────────────┐
//!        │     ╱                 ╲
//!        │    ╱                   ╲
//!      0 ┼───┴─────────────────────┴──▶ elapsed
//!        0  fade_in          threshold  duration
//! ```
//!
//! Info tooltips live 1.5x longer with a proportionally shorter ramp. Fast
//! mode halves the lifespan of click tooltips. Light mode dims them and
//! doubles the fade-out window, which can start the fade-out before the
//! tooltip is even created. Permanent and tracker modes skip all of this.

use chrono::{Duration, NaiveDateTime};
use lingering_types::TooltipConfig;

use crate::tooltip::Tooltip;

/// Info tooltips stretch the base duration by this factor.
const INFO_DURATION_FACTOR: f64 = 1.5;

/// Fast mode shrinks click tooltip durations by this factor.
const FAST_MODE_FACTOR: f64 = 0.5;

/// Light mode caps click tooltip opacity at this fraction of the maximum.
const LIGHT_MODE_OPACITY: f32 = 0.75;

/// Light mode multiplies the fade-out window by this factor.
const LIGHT_MODE_FADEOUT_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    FadeIn,
    Steady,
    FadeOut,
    /// Lifespan is over; the caller latches the tooltip's faded flag
    Faded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity {
    pub value: f32,
    pub phase: FadePhase,
}

impl Opacity {
    pub fn is_visible(&self) -> bool {
        self.value > 0.0
    }
}

/// Timing thresholds for one tooltip, all in milliseconds from creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeProfile {
    pub duration_ms: i64,
    pub fade_in_ms: i64,
    /// May be negative when light mode widens the fade-out past the lifespan
    pub fadeout_threshold_ms: i64,
    pub max_opacity: f32,
}

impl FadeProfile {
    pub fn for_tooltip(is_info: bool, config: &TooltipConfig) -> Self {
        let base = config.tooltip_duration_ms as f64;
        let fade_in = base * pct(config.tooltip_fade_in_pct);

        let (duration, fade_in) = if is_info {
            (base * INFO_DURATION_FACTOR, fade_in / INFO_DURATION_FACTOR)
        } else if config.fast_mode {
            (base * FAST_MODE_FACTOR, fade_in * FAST_MODE_FACTOR)
        } else {
            (base, fade_in)
        };

        let mut fadeout_window = duration * pct(config.tooltip_fadeout_pct);
        let mut max_opacity = pct(config.maximum_opacity_pct) as f32;
        if !is_info && config.light_mode {
            fadeout_window *= LIGHT_MODE_FADEOUT_FACTOR;
            max_opacity *= LIGHT_MODE_OPACITY;
        }

        Self {
            duration_ms: duration as i64,
            fade_in_ms: fade_in as i64,
            fadeout_threshold_ms: (duration - fadeout_window) as i64,
            max_opacity,
        }
    }

    pub fn fadeout_window_ms(&self) -> i64 {
        self.duration_ms - self.fadeout_threshold_ms
    }

    /// Opacity after `elapsed_ms` of life.
    ///
    /// Where the fade-in and fade-out ramps overlap the lower one wins, so the
    /// curve never jumps upward.
    pub fn opacity_at(&self, elapsed_ms: i64) -> Opacity {
        let remaining = self.duration_ms - elapsed_ms;
        if remaining <= 0 {
            return Opacity {
                value: 0.0,
                phase: FadePhase::Faded,
            };
        }

        let mut opacity = Opacity {
            value: self.max_opacity,
            phase: FadePhase::Steady,
        };

        let window = self.fadeout_window_ms();
        if elapsed_ms >= self.fadeout_threshold_ms && window > 0 {
            let ratio = (remaining as f32 / window as f32).min(1.0);
            opacity = Opacity {
                value: self.max_opacity * ratio,
                phase: FadePhase::FadeOut,
            };
        }

        if self.fade_in_ms > 0 && elapsed_ms < self.fade_in_ms {
            let ratio = elapsed_ms.max(0) as f32 / self.fade_in_ms as f32;
            let ramp = self.max_opacity * ratio;
            if ramp < opacity.value {
                opacity = Opacity {
                    value: ramp,
                    phase: FadePhase::FadeIn,
                };
            }
        }

        opacity
    }

    pub fn is_fading_in(&self, elapsed_ms: i64) -> bool {
        elapsed_ms < self.fade_in_ms
    }
}

#[inline]
fn pct(value: u32) -> f64 {
    value.min(100) as f64 / 100.0
}

/// Opacity of a tooltip right now, using the timed profile.
pub fn tooltip_opacity(tooltip: &Tooltip, config: &TooltipConfig, now: NaiveDateTime) -> Opacity {
    FadeProfile::for_tooltip(tooltip.is_info, config).opacity_at(tooltip.elapsed_ms(now))
}

/// Constant opacity for permanent and tracker mode.
pub fn permanent_opacity(config: &TooltipConfig) -> f32 {
    pct(config.maximum_opacity_pct) as f32
}

/// Permanent-mode opacity for the queue item at 1-indexed `position`, so the
/// newest item is fully opaque and older ones step down.
pub fn queue_opacity(position: usize, queue_len: usize, config: &TooltipConfig) -> f32 {
    if queue_len == 0 {
        return 0.0;
    }
    permanent_opacity(config) * (position.min(queue_len) as f32 / queue_len as f32)
}

/// Bring an info tooltip back to full strength without allocating a new one.
///
/// A faded tooltip restarts from scratch. One that already finished its
/// fade-in is rewound to the end of the fade-in. One still fading in keeps
/// its ramp.
pub fn refresh(tooltip: &mut Tooltip, config: &TooltipConfig, now: NaiveDateTime) {
    if tooltip.is_faded() {
        tooltip.revive(now);
        return;
    }

    let profile = FadeProfile::for_tooltip(tooltip.is_info, config);
    if !profile.is_fading_in(tooltip.elapsed_ms(now)) {
        tooltip.restart_at(now - Duration::milliseconds(profile.fade_in_ms));
    }
}
