//! Widget lifecycle phases.
//!
//! The widget moves `Loading -> Ready -> Unmounted`. Loading ends on a timer;
//! unmounting can happen from either earlier phase.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// All methods are pure. Implementors describe where the widget is in its
/// lifecycle and whether it may react to user input there.
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name for display/logging.
    fn name(&self) -> &str;

    /// Terminal states accept no further transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether user operations are accepted in this state.
    ///
    /// Default implementation returns `false`.
    fn accepts_input(&self) -> bool {
        false
    }
}

/// Lifecycle phase of a [`CounterWidget`](crate::effects::CounterWidget).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Placeholder shown for the configured loading delay.
    Loading,
    /// Steady state; all operations enabled.
    Ready,
    /// Torn down. Pending timers are cancelled.
    Unmounted,
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Loading => "Loading",
            Self::Ready => "Ready",
            Self::Unmounted => "Unmounted",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Unmounted)
    }

    fn accepts_input(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl Phase {
    /// Whether `self -> next` is a legal lifecycle move (pure).
    pub fn can_move_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Self::Loading, Self::Ready)
                | (Self::Loading, Self::Unmounted)
                | (Self::Ready, Self::Unmounted)
        )
    }
}
