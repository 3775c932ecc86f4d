//! The counter widget: lifecycle phases plus the counter state.

use crate::config::WidgetConfig;
use crate::core::{
    apply, parse_limit_input, progress_ratio, Applied, CounterState, Operation, Phase, SideEffect,
    State,
};
use crate::effects::env::WidgetEnv;
use crate::effects::error::WidgetError;
use crate::effects::shell::{perform, EffectReport};
use crate::effects::timer::LoadingTimer;
use crate::persist::{plan_writes, rehydrate, Field, FieldWrite};
use crate::view::View;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::{debug, info, warn};

/// Result of applying an operation to the in-memory state.
///
/// The state has already changed; `effect` still has to be run against the
/// environment to persist it and perform the side effects.
pub struct Step {
    pub applied: Applied,
    pub effect: BoxedEffect<EffectReport, WidgetError, WidgetEnv>,
}

/// Counter widget owning all state.
///
/// Created with [`CounterWidget::mount`], which rehydrates from the store and
/// starts in `Loading`. Operations are accepted once the widget is `Ready`.
#[derive(Debug)]
pub struct CounterWidget {
    phase: Phase,
    state: CounterState,
    timer: Option<LoadingTimer>,
}

impl CounterWidget {
    /// Rehydrate from the environment's store and start the loading delay.
    ///
    /// The normalized values are flushed back to the store and the theme is
    /// applied to the presentation layer. Must run inside a tokio runtime.
    pub async fn mount(env: &WidgetEnv, config: &WidgetConfig) -> Self {
        let state = rehydrate(env.store.as_ref(), &env.keys, config.default_max_limit);
        info!(
            count = state.count,
            mode = state.mode.as_str(),
            max_limit = state.max_limit,
            theme = state.theme.as_str(),
            history = state.history.len(),
            "counter widget rehydrated"
        );

        let flush = perform(
            plan_writes(&env.keys, None, &state),
            vec![SideEffect::ApplyTheme(state.theme)],
        );
        if let Err(e) = flush.run(env).await {
            warn!(error = %e, "initial flush failed");
        }

        let delay = config.loading_delay();
        if delay.is_zero() {
            return Self {
                phase: Phase::Ready,
                state,
                timer: None,
            };
        }

        debug!(?delay, "loading placeholder started");
        Self {
            phase: Phase::Loading,
            state,
            timer: Some(LoadingTimer::start(delay)),
        }
    }

    /// Current phase. A loading delay that has run out reads as `Ready`.
    pub fn phase(&self) -> Phase {
        if self.phase == Phase::Loading
            && self.timer.as_ref().is_some_and(LoadingTimer::is_elapsed)
        {
            Phase::Ready
        } else {
            self.phase
        }
    }

    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// Progress ratio for the ring (pure, recomputed on every call).
    pub fn progress(&self) -> f64 {
        progress_ratio(&self.state)
    }

    /// Presentation model for the current phase.
    pub fn view(&self) -> View {
        View::of(self.phase(), &self.state)
    }

    fn move_to(&mut self, next: Phase) {
        if self.phase.can_move_to(next) {
            info!(from = self.phase.name(), to = next.name(), "phase changed");
            self.phase = next;
        }
    }

    /// Finish loading if the delay has passed, without waiting.
    pub fn poll_ready(&mut self) -> Phase {
        if self.timer.as_ref().is_some_and(LoadingTimer::is_elapsed) {
            self.timer = None;
            self.move_to(Phase::Ready);
        }
        self.phase
    }

    /// Wait for the loading delay, then move to `Ready`.
    ///
    /// Returns immediately when already ready or unmounted.
    pub async fn ready(&mut self) -> Phase {
        if let Some(timer) = self.timer.as_mut() {
            timer.elapsed().await;
            self.timer = None;
            self.move_to(Phase::Ready);
        }
        self.phase
    }

    /// Tear the widget down, cancelling a pending loading timer.
    pub fn unmount(&mut self) {
        if self.timer.take().is_some() {
            debug!("loading timer cancelled");
        }
        self.move_to(Phase::Unmounted);
    }

    fn check_accepts(&self, op: &Operation) -> Result<(), WidgetError> {
        if self.phase.accepts_input() {
            Ok(())
        } else if self.phase.is_final() {
            Err(WidgetError::Unmounted)
        } else {
            Err(WidgetError::NotReady {
                operation: op.name(),
                phase: self.phase,
            })
        }
    }

    /// Apply an operation to the in-memory state.
    ///
    /// The returned effect mirrors the change into the environment; inert
    /// operations return an effect that does nothing.
    pub fn step(&mut self, op: &Operation, env: &WidgetEnv) -> Result<Step, WidgetError> {
        self.poll_ready();
        self.check_accepts(op)?;

        let outcome = apply(&self.state, op, || env.clock.timestamp());
        if outcome.is_inert() {
            debug!(operation = op.name(), "operation blocked by guard");
            return Ok(Step {
                applied: Applied::Inert,
                effect: pure(EffectReport::default()).boxed(),
            });
        }

        let mut writes = plan_writes(&env.keys, Some(&self.state), &outcome.state);
        if *op == Operation::ClearHistory {
            // The stored record may outlive an empty in-memory history after
            // an earlier failed removal.
            let key = env.keys.key(Field::History);
            if !writes.iter().any(|w| w.key() == key) {
                writes.push(FieldWrite::Remove { key });
            }
        }
        debug!(
            operation = op.name(),
            count = outcome.state.count,
            writes = writes.len(),
            "operation applied"
        );
        self.state = outcome.state;

        Ok(Step {
            applied: outcome.applied,
            effect: perform(writes, outcome.effects),
        })
    }

    /// Apply an operation and run its effect.
    pub async fn dispatch(
        &mut self,
        op: Operation,
        env: &WidgetEnv,
    ) -> Result<Applied, WidgetError> {
        let step = self.step(&op, env)?;
        let report = step.effect.run(env).await?;
        if !report.failed_keys.is_empty() {
            debug!(failed = ?report.failed_keys, "some fields were not persisted");
        }
        Ok(step.applied)
    }

    /// Set the ceiling from raw input text. Non-numeric text degrades to 0.
    pub async fn set_max_limit_input(
        &mut self,
        raw: &str,
        env: &WidgetEnv,
    ) -> Result<Applied, WidgetError> {
        self.dispatch(Operation::SetMaxLimit(parse_limit_input(raw)), env)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, Mode, Theme};
    use crate::effects::env::FixedClock;
    use crate::persist::{KeyValueStore, MemoryStore};
    use std::sync::Arc;
    use std::time::Duration;

    fn env_with(store: Arc<MemoryStore>) -> WidgetEnv {
        WidgetEnv::new(store).with_clock(Arc::new(FixedClock("t0".to_string())))
    }

    fn instant() -> WidgetConfig {
        WidgetConfig {
            loading_delay_ms: 0,
            ..WidgetConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mount_starts_loading_then_becomes_ready() {
        let env = env_with(Arc::new(MemoryStore::new()));
        let mut widget = CounterWidget::mount(&env, &WidgetConfig::default()).await;

        assert_eq!(widget.phase(), Phase::Loading);
        assert!(matches!(widget.view(), View::Loading { .. }));
        assert_eq!(widget.poll_ready(), Phase::Loading);

        assert_eq!(widget.ready().await, Phase::Ready);
        assert!(matches!(widget.view(), View::Main(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_ready_after_delay() {
        let env = env_with(Arc::new(MemoryStore::new()));
        let mut widget = CounterWidget::mount(&env, &WidgetConfig::default()).await;

        tokio::time::advance(Duration::from_millis(2000)).await;
        assert_eq!(widget.poll_ready(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_delay_reads_as_ready_without_polling() {
        let env = env_with(Arc::new(MemoryStore::new()));
        let widget = CounterWidget::mount(&env, &WidgetConfig::default()).await;

        assert_eq!(widget.phase(), Phase::Loading);
        tokio::time::advance(Duration::from_millis(2000)).await;
        assert_eq!(widget.phase(), Phase::Ready);
        assert!(matches!(widget.view(), View::Main(_)));
    }

    #[tokio::test]
    async fn clear_history_removes_record_even_when_already_empty() {
        let store = Arc::new(MemoryStore::new());
        let env = env_with(store.clone());
        let mut widget = CounterWidget::mount(&env, &instant()).await;
        store.set("countHistory", "[]").unwrap();

        let step = widget.step(&Operation::ClearHistory, &env).unwrap();
        assert_eq!(step.applied, Applied::Changed);
        step.effect.run(&env).await.unwrap();

        assert_eq!(store.get("countHistory").unwrap(), None);
    }

    #[tokio::test]
    async fn operations_rejected_while_loading() {
        let env = env_with(Arc::new(MemoryStore::new()));
        let mut widget = CounterWidget::mount(&env, &WidgetConfig::default()).await;

        let err = widget.dispatch(Operation::Increment, &env).await.unwrap_err();
        assert_eq!(
            err,
            WidgetError::NotReady {
                operation: "Increment",
                phase: Phase::Loading
            }
        );
        assert_eq!(widget.state().count, 0);
    }

    #[tokio::test]
    async fn unmount_cancels_loading() {
        let env = env_with(Arc::new(MemoryStore::new()));
        let mut widget = CounterWidget::mount(&env, &WidgetConfig::default()).await;

        widget.unmount();
        assert_eq!(widget.phase(), Phase::Unmounted);
        assert_eq!(widget.ready().await, Phase::Unmounted);
        assert_eq!(widget.poll_ready(), Phase::Unmounted);
        assert_eq!(
            widget.dispatch(Operation::Reset, &env).await,
            Err(WidgetError::Unmounted)
        );
        assert_eq!(widget.view(), View::Unmounted);
    }

    #[tokio::test]
    async fn mount_flushes_normalized_values() {
        let store = Arc::new(MemoryStore::with_entries([("count", "abc"), ("mode", "??")]));
        let env = env_with(store.clone());
        let widget = CounterWidget::mount(&env, &instant()).await;

        assert_eq!(widget.phase(), Phase::Ready);
        assert_eq!(store.get("count").unwrap().as_deref(), Some("0"));
        assert_eq!(store.get("mode").unwrap().as_deref(), Some("unlimited"));
        assert_eq!(store.get("maxLimit").unwrap().as_deref(), Some("10"));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(store.get("countHistory").unwrap(), None);
    }

    #[tokio::test]
    async fn step_applies_state_before_effect_runs() {
        let store = Arc::new(MemoryStore::new());
        let env = env_with(store.clone());
        let mut widget = CounterWidget::mount(&env, &instant()).await;

        let step = widget.step(&Operation::Increment, &env).unwrap();
        assert_eq!(step.applied, Applied::Changed);
        assert_eq!(widget.state().count, 1);
        assert_eq!(store.get("count").unwrap().as_deref(), Some("0"));

        let report = step.effect.run(&env).await.unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.cues, 1);
        assert_eq!(store.get("count").unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn dispatch_persists_and_records() {
        let store = Arc::new(MemoryStore::new());
        let env = env_with(store.clone());
        let mut widget = CounterWidget::mount(&env, &instant()).await;

        widget.dispatch(Operation::Increment, &env).await.unwrap();
        widget.dispatch(Operation::Increment, &env).await.unwrap();
        widget.dispatch(Operation::Decrement, &env).await.unwrap();

        assert_eq!(widget.state().count, 1);
        let latest = widget.state().history.latest().unwrap();
        assert_eq!(latest.action, Action::Decrement);
        assert_eq!(latest.value, 1);
        assert_eq!(latest.timestamp, "t0");
        assert_eq!(store.get("count").unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn limit_input_and_progress() {
        let env = env_with(Arc::new(MemoryStore::new()));
        let mut widget = CounterWidget::mount(&env, &instant()).await;

        widget
            .dispatch(Operation::SetMode(Mode::Limited), &env)
            .await
            .unwrap();
        widget.set_max_limit_input("4", &env).await.unwrap();
        widget.dispatch(Operation::Increment, &env).await.unwrap();
        assert_eq!(widget.progress(), 0.25);

        widget.set_max_limit_input("oops", &env).await.unwrap();
        assert_eq!(widget.state().max_limit, 0);
        assert_eq!(
            widget.dispatch(Operation::Increment, &env).await,
            Ok(Applied::Inert)
        );
        assert_eq!(widget.progress(), 1.0);
    }

    #[tokio::test]
    async fn theme_toggle_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let env = env_with(store.clone());
        let mut widget = CounterWidget::mount(&env, &instant()).await;

        widget.dispatch(Operation::ToggleTheme, &env).await.unwrap();
        assert_eq!(widget.state().theme, Theme::Dark);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        widget.dispatch(Operation::ToggleTheme, &env).await.unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }
}
