//! Build errors for the widget builder.

use crate::config::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when assembling a widget.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Store not specified. Call .store(store) before mounting")]
    MissingStore,

    #[error("Configuration rejected with {} violation(s)", .0.len())]
    InvalidConfig(Vec<ConfigViolation>),
}
