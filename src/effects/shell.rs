//! Side effects of a transition, expressed as a single Stillwater effect.

use crate::core::SideEffect;
use crate::effects::env::WidgetEnv;
use crate::effects::error::WidgetError;
use crate::persist::FieldWrite;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::{debug, warn};

/// What the shell actually did while running an effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectReport {
    /// Store writes that succeeded.
    pub written: usize,
    /// Keys whose write failed; the in-memory state stays authoritative.
    pub failed_keys: Vec<String>,
    /// Audio cues handed to the player.
    pub cues: usize,
    /// Theme flag updates.
    pub themes_applied: usize,
}

/// Build the effect that mirrors a transition into the environment.
///
/// Store failures are logged and recorded in the report; cue failures are
/// ignored. The effect itself never fails.
pub fn perform(
    writes: Vec<FieldWrite>,
    effects: Vec<SideEffect>,
) -> BoxedEffect<EffectReport, WidgetError, WidgetEnv> {
    if writes.is_empty() && effects.is_empty() {
        return pure(EffectReport::default()).boxed();
    }

    from_fn(move |env: &WidgetEnv| {
        let mut report = EffectReport::default();

        for write in &writes {
            match write.perform(env.store.as_ref()) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!(key = write.key(), error = %e, "failed to persist field");
                    report.failed_keys.push(write.key().to_string());
                }
            }
        }

        for effect in &effects {
            match effect {
                SideEffect::PlayCue => {
                    report.cues += 1;
                    if let Err(e) = env.audio.play() {
                        debug!(error = %e, "audio cue failed");
                    }
                }
                SideEffect::ApplyTheme(theme) => {
                    env.theme_sink.apply(*theme);
                    report.themes_applied += 1;
                }
            }
        }

        Ok(report)
    })
    .boxed()
}
