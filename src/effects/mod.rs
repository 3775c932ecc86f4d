//! Effectful shell around the pure counter core.
//!
//! This module performs everything the core only describes: reading and
//! writing the key-value store, playing the audio cue, applying the theme
//! flag and running the loading timer.
//!
//! # Key Concepts
//!
//! - **Environment**: collaborators injected as one `WidgetEnv` value
//! - **Effects**: each transition's side effects form one Stillwater effect,
//!   run against the environment
//! - **Widget**: `CounterWidget` owns the lifecycle phase and counter state

mod env;
mod error;
mod machine;
mod shell;
mod timer;

pub use env::{
    AudioCue, AudioError, Clock, FixedClock, LocalClock, NoopThemeSink, SilentCue, ThemeSink,
    WidgetEnv,
};
pub use error::WidgetError;
pub use machine::{CounterWidget, Step};
pub use shell::{perform, EffectReport};
pub use timer::LoadingTimer;
