//! Tooltip filtering and background color resolution.
//!
//! ```text
//!   click text ──▶ block_decision ──▶ annotated text
//!                                         │
//!                                         ▼
//!                 should_render: hide mode → trivial → list membership
//!                                         │
//!                                         ▼
//!               background_color: reserved → per action → custom → host
//! ```

mod colors;
mod trivial;

pub use colors::{
    BlockAnnotation, ListAction, MetaNotification, is_block_annotation, list_color,
    reserved_background,
};
pub use trivial::{TrivialClicks, is_builtin_trivial};

pub mod palette {
    pub use super::colors::{
        DARKER_GRAY, GREEN, LIGHT_GREEN, LIGHT_RED, LIGHTER_GRAY, MEDIUM_GRAY, ORANGE, RED,
        TRANSPARENT, WHITE, YELLOW,
    };
}

use hashbrown::HashMap;
use lingering_types::markup::{colorize, csv_to_list, list_to_csv, remove_tags};
use lingering_types::{ConfigKey, FilterMode, Rgba, TooltipConfig};

use crate::config::ConfigStore;

/// Result of toggling a click in the active filter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterListUpdate {
    Changed {
        mode: FilterMode,
        action: ListAction,
        /// De-tagged entry that was toggled
        text: String,
        /// New list storage value
        csv: String,
    },
    NoFilterMode,
    /// Nothing to toggle (no click recorded yet)
    Nothing,
}

impl FilterListUpdate {
    /// Info tooltip announcing this update, if any.
    pub fn notification(&self, peek: bool) -> Option<MetaNotification> {
        match self {
            FilterListUpdate::Changed {
                mode, action, text, ..
            } => Some(MetaNotification::ListUpdate {
                mode: *mode,
                action: *action,
                peek,
                text: text.clone(),
            }),
            FilterListUpdate::NoFilterMode => Some(MetaNotification::NoFilterMode),
            FilterListUpdate::Nothing => None,
        }
    }
}

/// Decides which clicks become tooltips and what they look like.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    trivial: TrivialClicks,
    action_colors: HashMap<String, Rgba>,
}

impl FilterEngine {
    pub fn new(config: &TooltipConfig) -> Self {
        Self {
            trivial: TrivialClicks::from_config(config),
            action_colors: action_colors(config),
        }
    }

    /// Refresh cached state after a setting changed.
    pub fn update_from_config(&mut self, key: ConfigKey, config: &TooltipConfig) {
        match key {
            ConfigKey::TrackerMode
            | ConfigKey::HideTrivialClicks
            | ConfigKey::HideWalkHere
            | ConfigKey::HideWalkHereWithTarget
            | ConfigKey::HideWield
            | ConfigKey::HideWear
            | ConfigKey::HideToggleRun
            | ConfigKey::HideSpecialAttack
            | ConfigKey::HideQuickPrayers
            | ConfigKey::HidePanelPrayers
            | ConfigKey::HidePanelsGroup => {
                self.trivial = TrivialClicks::from_config(config);
            }
            ConfigKey::ActionBackgroundColors => {
                self.action_colors = action_colors(config);
            }
            _ => {}
        }
    }

    /// Trivial check on raw (possibly tagged) text.
    pub fn is_trivial(&self, text: &str) -> bool {
        self.trivial.is_trivial(&remove_tags(text))
    }

    /// Would the active list suppress this de-tagged text?
    pub fn is_filtered_by_list(&self, plain: &str, config: &TooltipConfig) -> bool {
        let Some(csv) = config.list(config.filter_mode) else {
            return false;
        };
        let listed = csv_to_list(csv).iter().any(|entry| entry == plain);
        match config.filter_mode {
            FilterMode::Blacklist => listed,
            FilterMode::Whitelist => !listed,
            FilterMode::None => false,
        }
    }

    /// Whether a candidate tooltip should be created at all.
    pub fn should_render(
        &self,
        text: &str,
        hide_mode: bool,
        modifier_held: bool,
        config: &TooltipConfig,
    ) -> bool {
        if hide_mode && !(modifier_held && config.ctrl_shows_while_hidden) {
            return false;
        }

        let plain = remove_tags(text);
        if self.trivial.is_trivial(&plain) {
            return false;
        }

        if config.show_blocked_clicks && is_block_annotation(&plain) {
            return true;
        }
        !self.is_filtered_by_list(&plain, config)
    }

    /// Block or bypass policy for a click while a filter mode is active.
    pub fn block_decision(
        &self,
        plain: &str,
        shift_held: bool,
        ctrl_held: bool,
        config: &TooltipConfig,
    ) -> Option<BlockAnnotation> {
        if config.filter_mode == FilterMode::None {
            return None;
        }
        if config.shift_blocks && shift_held {
            return Some(BlockAnnotation::BlockedByShift);
        }
        if config.block_filtered_clicks && self.is_filtered_by_list(plain, config) {
            return Some(if config.ctrl_bypasses_block && ctrl_held {
                BlockAnnotation::Bypass(config.filter_mode)
            } else {
                BlockAnnotation::BlockedByList(config.filter_mode)
            });
        }
        None
    }

    /// Toggle `text` in the active list.
    ///
    /// A peek only reports what would happen. Otherwise the new list is
    /// written into `config` and persisted through `store`; a failed write is
    /// logged and the in-memory list is kept.
    pub fn update_filter_lists(
        &self,
        text: &str,
        peek: bool,
        config: &mut TooltipConfig,
        store: &mut dyn ConfigStore,
    ) -> FilterListUpdate {
        let plain = remove_tags(text).trim().to_string();
        if plain.is_empty() {
            return FilterListUpdate::Nothing;
        }

        let mode = config.filter_mode;
        let (Some(key), Some(csv)) = (mode.list_key(), config.list(mode)) else {
            return FilterListUpdate::NoFilterMode;
        };

        let mut list = csv_to_list(csv);
        let action = if let Some(pos) = list.iter().position(|entry| *entry == plain) {
            list.remove(pos);
            ListAction::Remove
        } else {
            list.push(plain.clone());
            ListAction::Add
        };
        let csv = list_to_csv(&list);

        if !peek {
            config.set_list(mode, csv.clone());
            if let Err(e) = store.write_list(key, &csv) {
                tracing::warn!(error = %e, key = %key, "Failed to persist filter list");
            }
            tracing::info!(mode = %mode, ?action, text = %plain, "Filter list updated");
        }

        FilterListUpdate::Changed {
            mode,
            action,
            text: plain,
            csv,
        }
    }

    /// Background for new tooltip text. Always resolves to something.
    pub fn background_color(&self, text: &str, config: &TooltipConfig) -> Rgba {
        let plain = remove_tags(text);
        if let Some(color) = reserved_background(&plain) {
            return color;
        }
        if let Some(color) = self.action_colors.get(&plain) {
            return *color;
        }
        if config.use_custom_background_color {
            return config.custom_background_color;
        }
        config.host_background_color
    }

    /// Apply the configured custom text color to raw click text.
    pub fn apply_text_color(&self, raw: &str, config: &TooltipConfig) -> String {
        if !config.use_custom_text_color {
            return raw.to_string();
        }
        if config.override_menu_colors {
            colorize(&remove_tags(raw), config.custom_text_color)
        } else {
            colorize(raw, config.custom_text_color)
        }
    }
}

fn action_colors(config: &TooltipConfig) -> HashMap<String, Rgba> {
    config
        .action_background_colors
        .iter()
        .map(|(text, color)| (text.clone(), *color))
        .collect()
}
