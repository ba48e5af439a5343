//! Scripted input for replay.
//!
//! ```toml
//! [canvas]
//! width = 765
//! height = 503
//!
//! [[event]]
//! at_ms = 0
//! type = "mouse"
//! x = 120
//! y = 200
//!
//! [[event]]
//! at_ms = 0
//! type = "click"
//! option = "Examine"
//! target = "Rock"
//! ```

use std::path::Path;

use lingering_core::ModifierKey;
use lingering_types::Point;
use serde::Deserialize;

fn default_width() -> u32 {
    765
}

fn default_height() -> u32 {
    503
}

#[derive(Debug, Clone, Deserialize)]
pub struct Canvas {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Mouse,
    Click,
    KeyDown,
    KeyUp,
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Ctrl,
    Shift,
}

impl From<Key> for ModifierKey {
    fn from(key: Key) -> Self {
        match key {
            Key::Ctrl => ModifierKey::Ctrl,
            Key::Shift => ModifierKey::Shift,
        }
    }
}

/// One line of the script, as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioEvent {
    pub at_ms: i64,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub target: String,
    pub key: Option<Key>,
}

/// A validated event, ready to feed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Mouse(Point),
    Click { option: String, target: String },
    KeyDown(ModifierKey),
    KeyUp(ModifierKey),
    Tick,
}

impl ScenarioEvent {
    pub fn action(&self) -> Result<Action, String> {
        let key = || {
            self.key
                .map(ModifierKey::from)
                .ok_or_else(|| format!("event at {}ms is missing `key`", self.at_ms))
        };
        Ok(match self.kind {
            EventKind::Mouse => Action::Mouse(Point::new(self.x, self.y)),
            EventKind::Click => {
                if self.option.trim().is_empty() {
                    return Err(format!("click at {}ms has no `option`", self.at_ms));
                }
                Action::Click {
                    option: self.option.clone(),
                    target: self.target.clone(),
                }
            }
            EventKind::KeyDown => Action::KeyDown(key()?),
            EventKind::KeyUp => Action::KeyUp(key()?),
            EventKind::Tick => Action::Tick,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default, rename = "event")]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    pub fn parse(contents: &str) -> Result<Self, String> {
        let mut scenario: Scenario = toml::from_str(contents).map_err(|e| e.to_string())?;
        // Stable sort keeps same-instant events in file order
        scenario.events.sort_by_key(|e| e.at_ms);
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("IO error reading {:?}: {}", path, e))?;
        Self::parse(&contents).map_err(|e| format!("Parse error in {:?}: {}", path, e))
    }

    /// Timestamp of the last event.
    pub fn end_ms(&self) -> i64 {
        self.events.last().map(|e| e.at_ms).unwrap_or(0)
    }
}
