//! Palette, meta notification text, and background resolution.

use lingering_types::markup::{colorize, remove_tags};
use lingering_types::{FilterMode, Rgba};

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];
pub const WHITE: Rgba = [255, 255, 255, 255];
pub const RED: Rgba = [255, 0, 0, 255];
pub const GREEN: Rgba = [0, 255, 0, 255];
pub const YELLOW: Rgba = [255, 255, 0, 255];
pub const ORANGE: Rgba = [255, 200, 0, 255];
pub const LIGHT_RED: Rgba = [0xED, 0x55, 0x55, 255];
pub const LIGHT_GREEN: Rgba = [0x55, 0xED, 0x55, 255];
pub const LIGHTER_GRAY: Rgba = [0xE0, 0xE0, 0xE0, 255];
pub const DARKER_GRAY: Rgba = [0x20, 0x20, 0x20, 0xC8];
pub const MEDIUM_GRAY: Rgba = [0x60, 0x60, 0x60, 0xC8];

const TOOLTIPS: &str = "Tooltips";
const HIDDEN: &str = "HIDDEN";
const SHOWN: &str = "SHOWN";
const NO_FILTER_MODE: &str = "No filter mode enabled";
const LAST_CLICK: &str = "Last click: ";
pub(crate) const BLOCKED_BY: &str = "Blocked by ";
pub(crate) const BYPASS: &str = "Bypass ";

/// Direction of a list toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Add,
    Remove,
}

impl ListAction {
    fn label(self, peek: bool) -> &'static str {
        match (self, peek) {
            (ListAction::Add, false) => "ADDED",
            (ListAction::Add, true) => "ADD?",
            (ListAction::Remove, false) => "REMOVED",
            (ListAction::Remove, true) => "REMOVE?",
        }
    }

    fn color(self) -> Rgba {
        match self {
            ListAction::Add => GREEN,
            ListAction::Remove => RED,
        }
    }
}

/// Text color used for a list's name.
pub fn list_color(mode: FilterMode) -> Rgba {
    match mode {
        FilterMode::None => WHITE,
        FilterMode::Blacklist => YELLOW,
        FilterMode::Whitelist => ORANGE,
    }
}

/// Info tooltips produced by hotkeys rather than clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaNotification {
    HideMode {
        hidden: bool,
    },
    ListUpdate {
        mode: FilterMode,
        action: ListAction,
        peek: bool,
        text: String,
    },
    NoFilterMode,
    LastClick {
        text: String,
    },
}

impl MetaNotification {
    /// Display text with color markup.
    pub fn render(&self) -> String {
        match self {
            MetaNotification::HideMode { hidden } => {
                let (word, color) = if *hidden {
                    (HIDDEN, LIGHT_RED)
                } else {
                    (SHOWN, LIGHT_GREEN)
                };
                format!("{}{}", colorize(&format!("{} ", TOOLTIPS), WHITE), colorize(word, color))
            }
            MetaNotification::ListUpdate {
                mode,
                action,
                peek,
                text,
            } => format!(
                "{}{}{}",
                colorize(&format!("{} ", mode.label()), list_color(*mode)),
                colorize(&format!("{} ", action.label(*peek)), action.color()),
                colorize(&remove_tags(text), WHITE),
            ),
            MetaNotification::NoFilterMode => colorize(NO_FILTER_MODE, RED),
            MetaNotification::LastClick { text } => {
                format!("{}{}", colorize(LAST_CLICK, LIGHTER_GRAY), text)
            }
        }
    }
}

/// Background for meta notification text, recognized by its de-tagged form.
pub fn reserved_background(plain: &str) -> Option<Rgba> {
    if plain == format!("{} {}", TOOLTIPS, HIDDEN) || plain == format!("{} {}", TOOLTIPS, SHOWN) {
        return Some(TRANSPARENT);
    }
    if plain == NO_FILTER_MODE || plain.starts_with(LAST_CLICK) {
        return Some(TRANSPARENT);
    }
    if is_list_update(plain, FilterMode::Blacklist) {
        return Some(DARKER_GRAY);
    }
    if is_list_update(plain, FilterMode::Whitelist) {
        return Some(MEDIUM_GRAY);
    }
    None
}

fn is_list_update(plain: &str, mode: FilterMode) -> bool {
    let Some(rest) = plain
        .strip_prefix(mode.label())
        .and_then(|rest| rest.strip_prefix(' '))
    else {
        return false;
    };
    ["ADDED ", "ADD? ", "REMOVED ", "REMOVE? "]
        .iter()
        .any(|label| rest.starts_with(label))
}

/// What stopped (or didn't stop) a filtered click from reaching the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAnnotation {
    BlockedByShift,
    BlockedByList(FilterMode),
    Bypass(FilterMode),
}

impl BlockAnnotation {
    /// Whether the click must be swallowed.
    pub fn consumes(self) -> bool {
        !matches!(self, BlockAnnotation::Bypass(_))
    }

    /// Markup prefix placed before the click text.
    pub fn prefix(self) -> String {
        let (head, head_color, source, source_color) = match self {
            BlockAnnotation::BlockedByShift => (BLOCKED_BY, RED, "Shift", WHITE),
            BlockAnnotation::BlockedByList(mode) => (BLOCKED_BY, RED, mode.label(), list_color(mode)),
            BlockAnnotation::Bypass(mode) => (BYPASS, GREEN, mode.label(), list_color(mode)),
        };
        format!(
            "{}{}{}",
            colorize(head, head_color),
            colorize(source, source_color),
            colorize(": ", WHITE)
        )
    }
}

/// Does de-tagged text start with a block or bypass annotation?
pub fn is_block_annotation(plain: &str) -> bool {
    plain.starts_with(BLOCKED_BY) || plain.starts_with(BYPASS)
}
