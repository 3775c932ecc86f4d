//! Pure counter transitions.
//!
//! [`apply`] computes the next state for an [`Operation`] together with the
//! side effects the shell has to perform. Nothing here touches storage, audio
//! or the presentation layer.

use super::guard::{can_decrement, can_increment};
use super::model::{Action, CounterState, Entry, Mode, Theme};
use serde::{Deserialize, Serialize};

/// User operation emitted by the presentation layer.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Operation {
    Increment,
    Decrement,
    Reset,
    ClearHistory,
    SetMode(Mode),
    SetMaxLimit(u32),
    ToggleTheme,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Increment => "Increment",
            Self::Decrement => "Decrement",
            Self::Reset => "Reset",
            Self::ClearHistory => "ClearHistory",
            Self::SetMode(_) => "SetMode",
            Self::SetMaxLimit(_) => "SetMaxLimit",
            Self::ToggleTheme => "ToggleTheme",
        }
    }
}

/// Side effect requested by a transition. Persistence is not listed here;
/// the shell derives it by diffing the previous and next state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SideEffect {
    /// Fire-and-forget audio cue.
    PlayCue,
    /// Update the global presentation theme flag.
    ApplyTheme(Theme),
}

/// Whether the operation changed anything.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Applied {
    Changed,
    /// Guard blocked the operation; state and effects are untouched.
    Inert,
}

/// Result of a pure transition.
#[derive(Clone, PartialEq, Debug)]
pub struct Outcome {
    pub state: CounterState,
    pub effects: Vec<SideEffect>,
    pub applied: Applied,
}

impl Outcome {
    fn changed(state: CounterState, effects: Vec<SideEffect>) -> Self {
        Self {
            state,
            effects,
            applied: Applied::Changed,
        }
    }

    fn inert(state: &CounterState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            applied: Applied::Inert,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.applied == Applied::Inert
    }
}

/// Apply an operation to a state (pure).
///
/// `now` is only called when a history entry is recorded.
pub fn apply<F>(state: &CounterState, op: &Operation, now: F) -> Outcome
where
    F: FnOnce() -> String,
{
    match op {
        Operation::Increment => {
            if !can_increment().check(state) {
                return Outcome::inert(state);
            }
            counted(state, Action::Increment, state.count + 1, now)
        }
        Operation::Decrement => {
            if !can_decrement().check(state) {
                return Outcome::inert(state);
            }
            counted(state, Action::Decrement, state.count - 1, now)
        }
        Operation::Reset => counted(state, Action::Reset, 0, now),
        Operation::ClearHistory => {
            let mut next = state.clone();
            next.history = Default::default();
            Outcome::changed(next, Vec::new())
        }
        Operation::SetMode(mode) => {
            // An existing count above the ceiling is left alone; the
            // increment guard stops further growth.
            let mut next = state.clone();
            next.mode = *mode;
            Outcome::changed(next, Vec::new())
        }
        Operation::SetMaxLimit(limit) => {
            let mut next = state.clone();
            next.max_limit = *limit;
            Outcome::changed(next, Vec::new())
        }
        Operation::ToggleTheme => {
            let mut next = state.clone();
            next.theme = state.theme.toggled();
            let theme = next.theme;
            Outcome::changed(next, vec![SideEffect::ApplyTheme(theme)])
        }
    }
}

fn counted<F>(state: &CounterState, action: Action, value: u32, now: F) -> Outcome
where
    F: FnOnce() -> String,
{
    let mut next = state.clone();
    next.count = value;
    next.history = state.history.record(Entry {
        action,
        value,
        timestamp: now(),
    });
    Outcome::changed(next, vec![SideEffect::PlayCue])
}

/// Interpret raw text from the max-limit input.
///
/// Numeric input is truncated toward zero and clamped to `u32`; negative
/// values become 0. Anything non-numeric (including empty input) degrades
/// to 0, which disables further increments in limited mode.
pub fn parse_limit_input(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => {
            if value >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                value as u32
            }
        }
        _ => 0,
    }
}
