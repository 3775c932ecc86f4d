//! Presentation model.
//!
//! A [`View`] is everything a renderer needs for one frame. It is rebuilt from
//! the widget state on every render and carries no state of its own.

use crate::core::{
    can_decrement, can_increment, Action, CounterState, Entry, Mode, Phase, RingGeometry, Theme,
};
use std::fmt;

/// Placeholder text for an empty history.
pub const EMPTY_HISTORY: &str = "No actions yet.";

/// What to draw for the current phase.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    /// Spinner placeholder during the loading delay.
    Loading { theme: Theme },
    Main(MainView),
    /// Nothing is drawn after teardown.
    Unmounted,
}

/// Main counter view.
#[derive(Clone, Debug, PartialEq)]
pub struct MainView {
    pub theme: Theme,
    pub mode: Mode,
    pub count: u32,
    /// Value of the max-limit input; only present in limited mode.
    pub limit_input: Option<u32>,
    /// Progress ring; only present in limited mode.
    pub ring: Option<RingGeometry>,
    pub increment_enabled: bool,
    pub decrement_enabled: bool,
    pub history: Vec<HistoryLine>,
}

/// One rendered history row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryLine {
    pub action: Action,
    pub value: u32,
    pub timestamp: String,
}

impl From<&Entry> for HistoryLine {
    fn from(entry: &Entry) -> Self {
        Self {
            action: entry.action,
            value: entry.value,
            timestamp: entry.timestamp.clone(),
        }
    }
}

impl fmt::Display for HistoryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} ({})", self.action, self.value, self.timestamp)
    }
}

impl View {
    /// Build the view for a phase and state.
    pub fn of(phase: Phase, state: &CounterState) -> Self {
        match phase {
            Phase::Loading => View::Loading { theme: state.theme },
            Phase::Unmounted => View::Unmounted,
            Phase::Ready => View::Main(MainView {
                theme: state.theme,
                mode: state.mode,
                count: state.count,
                limit_input: (state.mode == Mode::Limited).then_some(state.max_limit),
                ring: RingGeometry::for_state(state),
                increment_enabled: can_increment().check(state),
                decrement_enabled: can_decrement().check(state),
                history: state.history.entries().iter().map(HistoryLine::from).collect(),
            }),
        }
    }
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = match self {
            View::Loading { .. } => return writeln!(f, "Loading..."),
            View::Unmounted => return Ok(()),
            View::Main(main) => main,
        };

        writeln!(f, "Counter App [{} theme]", main.theme.as_str())?;
        writeln!(f, "Mode: {}", main.mode.as_str())?;
        if let Some(limit) = main.limit_input {
            writeln!(f, "Max limit: {limit}")?;
        }
        match &main.ring {
            Some(ring) => writeln!(f, "Count: {} ({:.0}%)", main.count, ring.ratio * 100.0)?,
            None => writeln!(f, "Count: {}", main.count)?,
        }
        writeln!(
            f,
            "{} {} [Reset] [Clear History]",
            button("Increment", main.increment_enabled),
            button("Decrement", main.decrement_enabled)
        )?;
        writeln!(f, "History:")?;
        if main.history.is_empty() {
            writeln!(f, "  {EMPTY_HISTORY}")?;
        }
        for line in &main.history {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}
