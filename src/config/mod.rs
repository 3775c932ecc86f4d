//! Widget configuration.
//!
//! Validation accumulates every violation through Stillwater's `Validation`
//! instead of stopping at the first one, so a bad config file is reported in
//! full.
//!
//! # Example
//!
//! ```rust
//! use tally::config::WidgetConfig;
//!
//! let config = WidgetConfig::from_json(r#"{ "loading_delay_ms": 500 }"#).unwrap();
//! assert_eq!(config.default_max_limit, 10);
//! assert!(config.validate().is_success());
//! ```

use crate::core::DEFAULT_MAX_LIMIT;
use crate::persist::StorageKeys;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod violations;

pub use violations::{ConfigError, ConfigViolation};

/// Default length of the loading placeholder.
pub const DEFAULT_LOADING_DELAY_MS: u64 = 2000;

/// Longest loading delay accepted by [`WidgetConfig::validate`].
pub const MAX_LOADING_DELAY: Duration = Duration::from_secs(60);

/// Tunables for a widget instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Loading placeholder duration in milliseconds. 0 skips the placeholder.
    pub loading_delay_ms: u64,
    /// Ceiling used when none is persisted.
    pub default_max_limit: u32,
    /// Optional prefix for every storage key.
    pub key_namespace: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
            default_max_limit: DEFAULT_MAX_LIMIT,
            key_namespace: None,
        }
    }
}

impl WidgetConfig {
    /// Parse without validating; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse and validate.
    pub fn load(raw: &str) -> Result<Self, ConfigError> {
        let config = Self::from_json(raw)?;
        match config.validate() {
            Validation::Success(_) => Ok(config),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(self.key_namespace.clone())
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        if let Some(ns) = &self.key_namespace {
            let check = if ns.trim().is_empty() {
                Validation::fail(ConfigViolation::EmptyNamespace)
            } else if ns.contains(':') {
                Validation::fail(ConfigViolation::NamespaceSeparator {
                    namespace: ns.clone(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        checks.push(if self.default_max_limit == 0 {
            Validation::fail(ConfigViolation::ZeroDefaultLimit)
        } else {
            Validation::success(())
        });

        let delay = self.loading_delay();
        checks.push(if delay > MAX_LOADING_DELAY {
            Validation::fail(ConfigViolation::LoadingDelayTooLong {
                delay,
                max: MAX_LOADING_DELAY,
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }
}
