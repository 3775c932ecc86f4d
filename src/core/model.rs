//! Counter data model: mode, theme, history entries and the full widget state.
//!
//! Every persisted field has a textual form used by the key-value store.
//! Parsing those forms is lenient: anything unrecognised falls back to the
//! field's default instead of failing.

use super::history::History;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ceiling applied in [`Mode::Limited`] when nothing is persisted.
pub const DEFAULT_MAX_LIMIT: u32 = 10;

/// Counting mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Unlimited,
    Limited,
}

impl Mode {
    /// Stored form (`"unlimited"` / `"limited"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlimited => "unlimited",
            Self::Limited => "limited",
        }
    }

    /// Parse the stored form. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "unlimited" => Some(Self::Unlimited),
            "limited" => Some(Self::Limited),
            _ => None,
        }
    }
}

/// Visual theme flag.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Only `"dark"` selects the dark theme; everything else reads as light.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Count-changing action recorded in the history.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Action {
    Increment,
    Decrement,
    Reset,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Increment => "Increment",
            Self::Decrement => "Decrement",
            Self::Reset => "Reset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One audit record of a count-changing action.
///
/// `value` is the counter value after the action was applied.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Entry {
    pub action: Action,
    pub value: u32,
    pub timestamp: String,
}

/// Complete in-memory state of the widget.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CounterState {
    pub count: u32,
    pub mode: Mode,
    pub max_limit: u32,
    pub theme: Theme,
    pub history: History,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            count: 0,
            mode: Mode::Unlimited,
            max_limit: DEFAULT_MAX_LIMIT,
            theme: Theme::Light,
            history: History::new(),
        }
    }
}

impl CounterState {
    /// True when the ceiling applies and the count has reached it.
    pub fn at_limit(&self) -> bool {
        self.mode == Mode::Limited && self.count >= self.max_limit
    }
}
