//! Trivial click classification.
//!
//! Some clicks are never worth a tooltip (the built-in set). Others are hidden
//! per category depending on config, and two families are matched by shape
//! rather than exact text: "Walk here" with a destination, and panel prayer
//! toggles ("Activate Protect from Melee").

use hashbrown::HashSet;
use lingering_types::TooltipConfig;
use phf::phf_set;

/// Always trivial, regardless of config.
static BUILTIN: phf::Set<&'static str> = phf_set! {
    "Cancel",
    "Continue",
    "Play",
    "Logout",
    "Close",
    "World Switcher",
    "Select",
    "Drop",
    "Use",
    "Eat",
    "Move",
};

/// Side panel tabs, toggled together.
static PANELS: phf::Set<&'static str> = phf_set! {
    "Combat Options",
    "Skills",
    "Character Summary",
    "Quest List",
    "Achievement Diaries",
    "Kourend Favour",
    "Inventory",
    "Worn Equipment",
    "Prayer",
    "Magic",
    "Chat-channel",
    "Your Clan",
    "View another clan",
    "Grouping",
    "Friends List",
    "Ignore List",
    "Account Management",
    "Settings",
    "Emotes",
    "Music Player",
};

const WALK_HERE: &str = "Walk here";
const WIELD: &str = "Wield";
const WEAR: &str = "Wear";
const TOGGLE_RUN: &str = "Toggle Run";
const SPECIAL_ATTACK: &str = "Use Special Attack";
const ACTIVATE_QUICK_PRAYERS: &str = "Activate Quick-prayers";
const DEACTIVATE_QUICK_PRAYERS: &str = "Deactivate Quick-prayers";
const QUICK_PRAYERS: &str = "Quick-prayers";
const ACTIVATE: &str = "Activate ";
const DEACTIVATE: &str = "Deactivate ";

/// Is `text` (already de-tagged) in the built-in set?
pub fn is_builtin_trivial(text: &str) -> bool {
    BUILTIN.contains(text)
}

/// The configurable part of trivial-click detection.
#[derive(Debug, Clone, Default)]
pub struct TrivialClicks {
    enabled: HashSet<&'static str>,
    walk_here_with_target: bool,
    panel_prayers: bool,
}

impl TrivialClicks {
    /// Build the enabled set. Tracker mode leaves everything off so only the
    /// built-in set applies. The master toggle gates the per-category set but
    /// not the two composite rules, which follow their own toggles.
    pub fn from_config(config: &TooltipConfig) -> Self {
        let mut clicks = Self::default();
        if config.tracker_mode {
            return clicks;
        }

        clicks.walk_here_with_target = config.hide_walk_here_with_target;
        clicks.panel_prayers = config.hide_panel_prayers;
        if !config.hide_trivial_clicks {
            return clicks;
        }

        let toggles: [(bool, &[&'static str]); 6] = [
            (config.hide_walk_here, &[WALK_HERE]),
            (config.hide_wield, &[WIELD]),
            (config.hide_wear, &[WEAR]),
            (config.hide_toggle_run, &[TOGGLE_RUN]),
            (config.hide_special_attack, &[SPECIAL_ATTACK]),
            (
                config.hide_quick_prayers,
                &[ACTIVATE_QUICK_PRAYERS, DEACTIVATE_QUICK_PRAYERS],
            ),
        ];
        for (on, entries) in toggles {
            if on {
                clicks.enabled.extend(entries.iter().copied());
            }
        }
        if config.hide_panels_group {
            clicks.enabled.extend(PANELS.iter().copied());
        }

        clicks
    }

    /// Full classification of de-tagged click text.
    pub fn is_trivial(&self, text: &str) -> bool {
        if is_builtin_trivial(text) || self.enabled.contains(text) {
            return true;
        }

        if let Some(target) = text.strip_prefix(WALK_HERE)
            && !target.trim().is_empty()
        {
            return self.walk_here_with_target;
        }

        self.panel_prayers
            && (text.starts_with(ACTIVATE) || text.starts_with(DEACTIVATE))
            && !text.contains(QUICK_PRAYERS)
    }
}
