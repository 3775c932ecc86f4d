//! Property-based tests for the pure counter core.
//!
//! These tests use proptest to verify the counter invariants hold across
//! many randomly generated operation sequences.

use proptest::prelude::*;
use tally::core::{
    apply, progress_ratio, Action, CounterState, Entry, History, Mode, Operation, HISTORY_CAP,
};

fn stamp() -> String {
    "t".to_string()
}

prop_compose! {
    fn arbitrary_mode()(limited in any::<bool>()) -> Mode {
        if limited { Mode::Limited } else { Mode::Unlimited }
    }
}

fn arbitrary_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => Just(Operation::Increment),
        3 => Just(Operation::Decrement),
        1 => Just(Operation::Reset),
        1 => Just(Operation::ClearHistory),
        1 => arbitrary_mode().prop_map(Operation::SetMode),
        1 => (0u32..20).prop_map(Operation::SetMaxLimit),
        1 => Just(Operation::ToggleTheme),
    ]
}

fn run(start: CounterState, ops: &[Operation]) -> Vec<CounterState> {
    let mut states = vec![start];
    for op in ops {
        let next = apply(states.last().unwrap(), op, stamp).state;
        states.push(next);
    }
    states
}

proptest! {
    #[test]
    fn unlimited_increments_all_succeed(n in 0usize..200) {
        let ops = vec![Operation::Increment; n];
        let states = run(CounterState::default(), &ops);
        prop_assert_eq!(states.last().unwrap().count as usize, n);
    }

    #[test]
    fn limited_count_never_exceeds_ceiling(limit in 0u32..30, attempts in 0usize..80) {
        let start = CounterState {
            mode: Mode::Limited,
            max_limit: limit,
            ..CounterState::default()
        };
        let ops = vec![Operation::Increment; attempts];
        for state in run(start, &ops) {
            prop_assert!(state.count <= limit);
        }
    }

    #[test]
    fn decrement_never_goes_below_zero(start in 0u32..20, attempts in 0usize..40) {
        let state = CounterState { count: start, ..CounterState::default() };
        let ops = vec![Operation::Decrement; attempts];
        let last = run(state, &ops).pop().unwrap();
        prop_assert_eq!(last.count as usize, (start as usize).saturating_sub(attempts));
    }

    #[test]
    fn history_stays_capped_and_newest_first(ops in prop::collection::vec(arbitrary_operation(), 0..60)) {
        let mut state = CounterState::default();
        let mut recorded: Vec<u32> = Vec::new();

        for (i, op) in ops.iter().enumerate() {
            let marker = i.to_string();
            let outcome = apply(&state, op, || marker.clone());
            let latest = outcome.state.history.latest().map(|e| e.timestamp.as_str());
            if latest == Some(marker.as_str()) {
                recorded.push(i as u32);
            }
            if matches!(op, Operation::ClearHistory) {
                recorded.clear();
            }
            state = outcome.state;
            prop_assert!(state.history.len() <= HISTORY_CAP);
        }

        let expected: Vec<String> = recorded
            .iter()
            .rev()
            .take(HISTORY_CAP)
            .map(|i| i.to_string())
            .collect();
        let actual: Vec<String> = state
            .history
            .entries()
            .iter()
            .map(|e| e.timestamp.clone())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn entry_value_matches_resulting_count(ops in prop::collection::vec(arbitrary_operation(), 1..40)) {
        let mut state = CounterState::default();
        for op in &ops {
            let outcome = apply(&state, op, stamp);
            let recorded = matches!(op, Operation::Increment | Operation::Decrement | Operation::Reset)
                && !outcome.is_inert();
            if recorded {
                prop_assert_eq!(outcome.state.history.latest().map(|e| e.value), Some(outcome.state.count));
            }
            state = outcome.state;
        }
    }

    #[test]
    fn mode_and_limit_changes_never_touch_count(
        count in 0u32..100,
        mode in arbitrary_mode(),
        limit in 0u32..100,
    ) {
        let state = CounterState { count, ..CounterState::default() };
        let after_mode = apply(&state, &Operation::SetMode(mode), stamp).state;
        let after_limit = apply(&after_mode, &Operation::SetMaxLimit(limit), stamp).state;
        prop_assert_eq!(after_limit.count, count);
    }

    #[test]
    fn progress_ratio_is_bounded(count in 0u32..1000, limit in 0u32..1000, mode in arbitrary_mode()) {
        let state = CounterState { count, mode, max_limit: limit, ..CounterState::default() };
        let ratio = progress_ratio(&state);
        prop_assert!((0.0..=1.0).contains(&ratio));
        if mode == Mode::Unlimited {
            prop_assert_eq!(ratio, 0.0);
        }
    }

    #[test]
    fn history_roundtrip_serialization(values in prop::collection::vec(0u32..50, 0..15)) {
        let mut history = History::new();
        for value in values {
            history = history.record(Entry { action: Action::Increment, value, timestamp: stamp() });
        }

        let json = serde_json::to_string(&history).unwrap();
        let restored: History = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, history);
    }
}
