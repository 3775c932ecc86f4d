//! Environment of external collaborators the shell talks to.

use crate::core::Theme;
use crate::persist::{KeyValueStore, StorageKeys};
use chrono::Local;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by an [`AudioCue`]. The shell only logs them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AudioError {
    #[error("Audio cue unavailable: {0}")]
    Unavailable(String),

    #[error("Audio playback failed: {0}")]
    PlaybackFailed(String),
}

/// Short click played after each count-changing action.
pub trait AudioCue: Send + Sync {
    fn play(&self) -> Result<(), AudioError>;
}

/// Global presentation flag for the theme (e.g. a `dark` class on the root).
pub trait ThemeSink: Send + Sync {
    fn apply(&self, theme: Theme);
}

/// Source of human-readable local timestamps for history entries.
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> String;
}

/// Cue that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Sink that ignores theme changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopThemeSink;

impl ThemeSink for NoopThemeSink {
    fn apply(&self, _theme: Theme) {}
}

/// Wall clock in the local timezone, formatted like `3/14/2026, 9:05:07 PM`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn timestamp(&self) -> String {
        Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}

/// Clock that always returns the same timestamp.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// Everything the effectful shell needs, injected as one cloneable value.
#[derive(Clone)]
pub struct WidgetEnv {
    pub store: Arc<dyn KeyValueStore>,
    pub audio: Arc<dyn AudioCue>,
    pub theme_sink: Arc<dyn ThemeSink>,
    pub clock: Arc<dyn Clock>,
    pub keys: StorageKeys,
}

impl WidgetEnv {
    /// Environment with a silent cue, no theme sink and the local clock.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            audio: Arc::new(SilentCue),
            theme_sink: Arc::new(NoopThemeSink),
            clock: Arc::new(LocalClock),
            keys: StorageKeys::default(),
        }
    }

    pub fn with_audio(mut self, audio: Arc<dyn AudioCue>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_theme_sink(mut self, theme_sink: Arc<dyn ThemeSink>) -> Self {
        self.theme_sink = theme_sink;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }
}

impl fmt::Debug for WidgetEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetEnv")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
