//! Builder for mounting counter widgets.

use crate::builder::error::BuildError;
use crate::config::WidgetConfig;
use crate::effects::{AudioCue, Clock, CounterWidget, ThemeSink, WidgetEnv};
use crate::persist::KeyValueStore;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for a [`CounterWidget`] and its [`WidgetEnv`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tally::builder::WidgetBuilder;
/// use tally::config::WidgetConfig;
/// use tally::persist::MemoryStore;
///
/// # tokio_test_block(async {
/// let (widget, _env) = WidgetBuilder::new()
///     .store(Arc::new(MemoryStore::new()))
///     .config(WidgetConfig { loading_delay_ms: 0, ..WidgetConfig::default() })
///     .mount()
///     .await
///     .unwrap();
/// assert_eq!(widget.state().count, 0);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread()
/// #         .enable_all()
/// #         .build()
/// #         .unwrap()
/// #         .block_on(f);
/// # }
/// ```
#[derive(Default)]
pub struct WidgetBuilder {
    config: WidgetConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    audio: Option<Arc<dyn AudioCue>>,
    theme_sink: Option<Arc<dyn ThemeSink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl WidgetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the key-value store (required).
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn audio(mut self, audio: Arc<dyn AudioCue>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn theme_sink(mut self, theme_sink: Arc<dyn ThemeSink>) -> Self {
        self.theme_sink = Some(theme_sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and assemble the environment.
    pub fn build_env(&self) -> Result<WidgetEnv, BuildError> {
        if let Validation::Failure(errors) = self.config.validate() {
            return Err(BuildError::InvalidConfig(errors.iter().cloned().collect()));
        }

        let store = self.store.clone().ok_or(BuildError::MissingStore)?;
        let mut env = WidgetEnv::new(store).with_keys(self.config.storage_keys());
        if let Some(audio) = &self.audio {
            env = env.with_audio(Arc::clone(audio));
        }
        if let Some(theme_sink) = &self.theme_sink {
            env = env.with_theme_sink(Arc::clone(theme_sink));
        }
        if let Some(clock) = &self.clock {
            env = env.with_clock(Arc::clone(clock));
        }
        Ok(env)
    }

    /// Build the environment and mount a widget in it.
    pub async fn mount(self) -> Result<(CounterWidget, WidgetEnv), BuildError> {
        let env = self.build_env()?;
        let widget = CounterWidget::mount(&env, &self.config).await;
        Ok((widget, env))
    }
}
