//! Configuration violations and load errors.

use std::time::Duration;
use thiserror::Error;

/// A single rule broken by a [`WidgetConfig`](super::WidgetConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Key namespace must not be empty")]
    EmptyNamespace,

    #[error("Key namespace '{namespace}' must not contain ':'")]
    NamespaceSeparator { namespace: String },

    #[error("Default max limit must be at least 1")]
    ZeroDefaultLimit,

    #[error("Loading delay ({delay:?}) exceeds the maximum ({max:?})")]
    LoadingDelayTooLong { delay: Duration, max: Duration },
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration could not be parsed: {0}")]
    Parse(String),

    #[error("Configuration has {} violation(s): {}", .0.len(), render(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn render(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
