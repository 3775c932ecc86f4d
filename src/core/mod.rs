//! Core counter types and logic.
//!
//! This module contains the pure functional core of the widget:
//! - The data model (`CounterState`, `Mode`, `Theme`, `Entry`)
//! - Lifecycle phases via the `State` trait
//! - Guards, transitions and the capped action history
//! - Progress ring geometry
//!
//! Nothing in this module performs I/O.

mod guard;
mod history;
mod model;
mod progress;
mod state;
mod transition;

pub use guard::{can_decrement, can_increment, Guard};
pub use history::{History, HISTORY_CAP};
pub use model::{Action, CounterState, Entry, Mode, Theme, DEFAULT_MAX_LIMIT};
pub use progress::{progress_ratio, RingGeometry, RING_RADIUS, RING_STROKE};
pub use state::{Phase, State};
pub use transition::{apply, parse_limit_input, Applied, Operation, Outcome, SideEffect};
