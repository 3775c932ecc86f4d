//! Widget error types.

use crate::core::Phase;
use thiserror::Error;

/// Errors returned to the presentation layer.
///
/// None of these are meant for the end user: they signal that an operation
/// arrived while the widget could not take it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WidgetError {
    #[error("Operation '{operation}' rejected while {phase:?}")]
    NotReady {
        operation: &'static str,
        phase: Phase,
    },

    #[error("Widget has been unmounted")]
    Unmounted,
}
