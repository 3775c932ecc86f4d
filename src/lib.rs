//! Tally: a persisted counter widget as a pure state machine
//!
//! Tally follows the "pure core, imperative shell" split. The counter logic
//! (guards, transitions, the capped history, progress geometry) is made of pure
//! functions; persistence, the audio cue and theme application live in a shell
//! that runs Stillwater effects against an injected environment.
//!
//! # Core Concepts
//!
//! - **CounterState**: count, mode, max limit, theme and history
//! - **Operations**: increment, decrement, reset, clear history, mode, limit, theme
//! - **Phases**: `Loading -> Ready -> Unmounted`
//! - **Store**: any `KeyValueStore`; each field lives under its own key
//! - **View**: the render model a presentation layer draws
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tally::config::WidgetConfig;
//! use tally::core::{Mode, Operation};
//! use tally::effects::{CounterWidget, WidgetEnv};
//! use tally::persist::{KeyValueStore, MemoryStore};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let store = Arc::new(MemoryStore::new());
//! let env = WidgetEnv::new(store.clone());
//! let config = WidgetConfig { loading_delay_ms: 0, ..WidgetConfig::default() };
//!
//! let mut widget = CounterWidget::mount(&env, &config).await;
//! widget.dispatch(Operation::SetMode(Mode::Limited), &env).await.unwrap();
//! widget.dispatch(Operation::SetMaxLimit(1), &env).await.unwrap();
//! widget.dispatch(Operation::Increment, &env).await.unwrap();
//! widget.dispatch(Operation::Increment, &env).await.unwrap(); // inert at the ceiling
//!
//! assert_eq!(widget.state().count, 1);
//! assert_eq!(store.get("count").unwrap().as_deref(), Some("1"));
//! # });
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod persist;
pub mod view;

// Re-export commonly used types
pub use crate::core::{CounterState, Mode, Operation, Phase, Theme};
pub use effects::{CounterWidget, WidgetEnv, WidgetError};
pub use view::View;
