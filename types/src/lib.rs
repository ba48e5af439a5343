//! Shared configuration types for lingering click tooltips.
//!
//! Everything here is plain data: the persisted [`TooltipConfig`], the
//! [`ConfigKey`] identifiers used to report which setting changed, and the
//! small geometry types shared by the engine and the render boundary.

pub mod markup;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// RGBA color as stored in config files.
pub type Rgba = [u8; 4];

// ─────────────────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Canvas coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Saturates at the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Measured or available size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Which list, if any, filters tooltip text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    None,
    Blacklist,
    Whitelist,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::None => "None",
            FilterMode::Blacklist => "Blacklist",
            FilterMode::Whitelist => "Whitelist",
        }
    }

    /// The config key that stores this mode's list.
    pub fn list_key(self) -> Option<ConfigKey> {
        match self {
            FilterMode::None => None,
            FilterMode::Blacklist => Some(ConfigKey::Blacklist),
            FilterMode::Whitelist => Some(ConfigKey::Whitelist),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where new tooltips are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipLocation {
    /// Offset from the click that created the tooltip
    #[default]
    Dynamic,
    /// Auto-placed by the render surface next to the cursor
    Anchored,
    /// A single slot at the fixed overlay position
    Fixed,
}

/// Corner of the canvas that [`TooltipConfig::fixed_location`] is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedAnchor {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_duration() -> u32 {
    1000
}

fn default_fade_in() -> u32 {
    10
}

fn default_fadeout() -> u32 {
    50
}

fn default_max_shown() -> u32 {
    3
}

fn default_opacity() -> u32 {
    100
}

fn default_custom_background() -> Rgba {
    [0, 0, 0, 156]
}

fn default_custom_text() -> Rgba {
    [255, 255, 255, 255]
}

fn default_host_background() -> Rgba {
    [70, 61, 50, 156]
}

fn default_y_offset() -> i32 {
    -20
}

fn default_fixed_location() -> Point {
    Point::new(10, 10)
}

fn default_double_tap_delay() -> u32 {
    250
}

/// All user-facing settings.
///
/// Percentages are whole numbers in `0..=100`; durations are milliseconds.
/// Every field has a serde default so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    // Lifespan
    #[serde(default = "default_duration")]
    pub tooltip_duration_ms: u32,
    #[serde(default = "default_fade_in")]
    pub tooltip_fade_in_pct: u32,
    #[serde(default = "default_fadeout")]
    pub tooltip_fadeout_pct: u32,
    pub permanent_tooltips: bool,
    pub tick_sync_mode: bool,
    #[serde(default = "default_max_shown")]
    pub maximum_tooltips_shown: u32,

    // Appearance
    #[serde(default = "default_opacity")]
    pub maximum_opacity_pct: u32,
    pub use_custom_background_color: bool,
    #[serde(default = "default_custom_background")]
    pub custom_background_color: Rgba,
    pub use_custom_text_color: bool,
    #[serde(default = "default_custom_text")]
    pub custom_text_color: Rgba,
    /// Strip the host's menu colors before applying the custom text color
    pub override_menu_colors: bool,
    #[serde(default = "default_host_background")]
    pub host_background_color: Rgba,
    /// Per-action background overrides keyed by de-tagged text
    pub action_background_colors: BTreeMap<String, Rgba>,

    // Location
    pub tooltip_location: TooltipLocation,
    pub tooltip_x_offset: i32,
    #[serde(default = "default_y_offset")]
    pub tooltip_y_offset: i32,
    pub clamp_x_padding: i32,
    pub clamp_y_padding: i32,
    #[serde(default = "default_fixed_location")]
    pub fixed_location: Point,
    pub fixed_anchor: FixedAnchor,

    // Hotkeys
    /// Double-tap window; 0 disables double-tap and hold detection
    #[serde(default = "default_double_tap_delay")]
    pub double_tap_delay_ms: u32,
    #[serde(default = "default_true")]
    pub ctrl_shows_while_hidden: bool,
    pub shift_blocks: bool,
    #[serde(default = "default_true")]
    pub ctrl_bypasses_block: bool,
    pub block_filtered_clicks: bool,
    #[serde(default = "default_true")]
    pub show_blocked_clicks: bool,

    // Modes
    pub fast_mode: bool,
    pub light_mode: bool,
    pub tracker_mode: bool,

    // Filtering
    pub filter_mode: FilterMode,
    pub blacklist: String,
    pub whitelist: String,

    // Trivial clicks
    #[serde(default = "default_true")]
    pub hide_trivial_clicks: bool,
    #[serde(default = "default_true")]
    pub hide_walk_here: bool,
    pub hide_walk_here_with_target: bool,
    pub hide_wield: bool,
    pub hide_wear: bool,
    pub hide_toggle_run: bool,
    pub hide_special_attack: bool,
    pub hide_quick_prayers: bool,
    pub hide_panel_prayers: bool,
    #[serde(default = "default_true")]
    pub hide_panels_group: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            tooltip_duration_ms: default_duration(),
            tooltip_fade_in_pct: default_fade_in(),
            tooltip_fadeout_pct: default_fadeout(),
            permanent_tooltips: false,
            tick_sync_mode: false,
            maximum_tooltips_shown: default_max_shown(),
            maximum_opacity_pct: default_opacity(),
            use_custom_background_color: false,
            custom_background_color: default_custom_background(),
            use_custom_text_color: false,
            custom_text_color: default_custom_text(),
            override_menu_colors: false,
            host_background_color: default_host_background(),
            action_background_colors: BTreeMap::new(),
            tooltip_location: TooltipLocation::default(),
            tooltip_x_offset: 0,
            tooltip_y_offset: default_y_offset(),
            clamp_x_padding: 0,
            clamp_y_padding: 0,
            fixed_location: default_fixed_location(),
            fixed_anchor: FixedAnchor::default(),
            double_tap_delay_ms: default_double_tap_delay(),
            ctrl_shows_while_hidden: true,
            shift_blocks: false,
            ctrl_bypasses_block: true,
            block_filtered_clicks: false,
            show_blocked_clicks: true,
            fast_mode: false,
            light_mode: false,
            tracker_mode: false,
            filter_mode: FilterMode::default(),
            blacklist: String::new(),
            whitelist: String::new(),
            hide_trivial_clicks: true,
            hide_walk_here: true,
            hide_walk_here_with_target: false,
            hide_wield: false,
            hide_wear: false,
            hide_toggle_run: false,
            hide_special_attack: false,
            hide_quick_prayers: false,
            hide_panel_prayers: false,
            hide_panels_group: true,
        }
    }
}

impl TooltipConfig {
    /// Tooltips never fade on their own (they leave only via queue overflow).
    pub fn is_permanent(&self) -> bool {
        self.permanent_tooltips || self.tracker_mode
    }

    /// New tooltips are auto-placed instead of following the click.
    pub fn is_anchored(&self) -> bool {
        self.tracker_mode || self.tooltip_location == TooltipLocation::Anchored
    }

    /// Storage string for a list mode. `None` has no list.
    pub fn list(&self, mode: FilterMode) -> Option<&str> {
        match mode {
            FilterMode::None => None,
            FilterMode::Blacklist => Some(&self.blacklist),
            FilterMode::Whitelist => Some(&self.whitelist),
        }
    }

    pub fn set_list(&mut self, mode: FilterMode, csv: String) {
        match mode {
            FilterMode::None => {}
            FilterMode::Blacklist => self.blacklist = csv,
            FilterMode::Whitelist => self.whitelist = csv,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config keys
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! config_keys {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Identifies a single setting in change notifications.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ConfigKey {
            $($variant),*
        }

        impl ConfigKey {
            pub const ALL: &'static [ConfigKey] = &[$(ConfigKey::$variant),*];

            /// Stable identifier used in storage and change events.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ConfigKey::$variant => $name),*
                }
            }
        }

        impl FromStr for ConfigKey {
            type Err = UnknownConfigKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(ConfigKey::$variant),)*
                    other => Err(UnknownConfigKey(other.to_string())),
                }
            }
        }
    };
}

config_keys! {
    TooltipDuration => "tooltipDuration",
    TooltipFadeIn => "tooltipFadeIn",
    TooltipFadeout => "tooltipFadeout",
    PermanentTooltips => "permanentTooltips",
    TickSyncMode => "tickSyncMode",
    MaximumTooltipsShown => "maximumTooltipsShown",
    MaximumOpacity => "maximumOpacity",
    UseCustomBackgroundColor => "useCustomBackgroundColor",
    CustomBackgroundColor => "customBackgroundColor",
    UseCustomTextColor => "useCustomTextColor",
    CustomTextColor => "customTextColor",
    OverrideMenuColors => "overrideMenuColors",
    HostBackgroundColor => "hostBackgroundColor",
    ActionBackgroundColors => "actionBackgroundColors",
    TooltipLocation => "tooltipLocation",
    TooltipXOffset => "tooltipXOffset",
    TooltipYOffset => "tooltipYOffset",
    ClampXPadding => "clampXPadding",
    ClampYPadding => "clampYPadding",
    FixedLocation => "preferredLocation",
    FixedAnchor => "preferredPosition",
    DoubleTapDelay => "hotkeyToggleDelay",
    CtrlShowsWhileHidden => "ctrlShowsWhileHidden",
    ShiftBlocks => "shiftBlocks",
    CtrlBypassesBlock => "ctrlBypassesBlock",
    BlockFilteredClicks => "blockFilteredClicks",
    ShowBlockedClicks => "showBlockedClicks",
    FastMode => "fastMode",
    LightMode => "lightMode",
    TrackerMode => "trackerMode",
    FilterMode => "filterMode",
    Blacklist => "blacklist",
    Whitelist => "whitelist",
    HideTrivialClicks => "hideTrivialClicks",
    HideWalkHere => "hideWalkHere",
    HideWalkHereWithTarget => "hideWalkHereWithTarget",
    HideWield => "hideWield",
    HideWear => "hideWear",
    HideToggleRun => "hideToggleRun",
    HideSpecialAttack => "hideSpecialAttack",
    HideQuickPrayers => "hideQuickPrayers",
    HidePanelPrayers => "hidePanelPrayers",
    HidePanelsGroup => "hidePanelsGroup",
}

impl ConfigKey {
    /// Keys that only move the fixed overlay and must not clear live tooltips.
    pub fn is_reposition(self) -> bool {
        matches!(self, ConfigKey::FixedLocation | ConfigKey::FixedAnchor)
    }

    /// Keys that hold filter list contents.
    pub fn is_filter_list(self) -> bool {
        matches!(self, ConfigKey::Blacklist | ConfigKey::Whitelist)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a change notification names a setting we don't know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConfigKey(pub String);

impl fmt::Display for UnknownConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key: {}", self.0)
    }
}

impl std::error::Error for UnknownConfigKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
tooltip_duration_ms = 600
filter_mode = "blacklist"
blacklist = "Examine Rock"
tooltip_location = "fixed"
"#;
        let config: TooltipConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.tooltip_duration_ms, 600);
        assert_eq!(config.filter_mode, FilterMode::Blacklist);
        assert_eq!(config.list(FilterMode::Blacklist), Some("Examine Rock"));
        assert_eq!(config.tooltip_location, TooltipLocation::Fixed);
        // Untouched fields fall back to defaults
        assert_eq!(config.tooltip_fadeout_pct, 50);
        assert_eq!(config.tooltip_y_offset, -20);
        assert_eq!(config.double_tap_delay_ms, 250);
        assert!(config.hide_trivial_clicks);
        assert!(config.hide_panels_group);
    }

    #[test]
    fn test_action_colors_from_toml() {
        let toml = r#"
[action_background_colors]
"Examine Rock" = [255, 0, 0, 200]
"#;
        let config: TooltipConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.action_background_colors.get("Examine Rock"),
            Some(&[255, 0, 0, 200])
        );
    }

    #[test]
    fn test_config_key_names() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>(), Ok(*key));
        }
        assert_eq!(
            "nope".parse::<ConfigKey>(),
            Err(UnknownConfigKey("nope".to_string()))
        );
        assert!(ConfigKey::FixedLocation.is_reposition());
        assert!(!ConfigKey::TooltipDuration.is_reposition());
        assert!(ConfigKey::Whitelist.is_filter_list());
    }

    #[test]
    fn test_point_offset_saturates() {
        assert_eq!(Point::new(5, -5).offset(3, -20), Point::new(8, -25));
        assert_eq!(
            Point::new(i32::MAX - 1, i32::MIN + 1).offset(10, -10),
            Point::new(i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn test_tracker_mode_implies_permanent_and_anchored() {
        let config = TooltipConfig {
            tracker_mode: true,
            ..Default::default()
        };
        assert!(config.is_permanent());
        assert!(config.is_anchored());
        assert!(!TooltipConfig::default().is_permanent());
    }
}
