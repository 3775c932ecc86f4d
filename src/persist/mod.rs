//! Persistence of the widget state into a key-value store.
//!
//! Five fields are stored independently under their own keys. Reading is
//! forgiving: a missing, unreadable or malformed value falls back to the
//! field default. Writing is planned as a per-field diff between the previous
//! and the next state, so only changed fields touch the store.

use crate::core::{CounterState, Entry, History, Mode, Theme};
use tracing::{debug, warn};

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// A persisted field of the widget state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Count,
    Theme,
    Mode,
    MaxLimit,
    History,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Count,
        Field::Theme,
        Field::Mode,
        Field::MaxLimit,
        Field::History,
    ];

    /// Unprefixed storage key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Theme => "theme",
            Self::Mode => "mode",
            Self::MaxLimit => "maxLimit",
            Self::History => "countHistory",
        }
    }

    fn differs(&self, old: &CounterState, new: &CounterState) -> bool {
        match self {
            Self::Count => old.count != new.count,
            Self::Theme => old.theme != new.theme,
            Self::Mode => old.mode != new.mode,
            Self::MaxLimit => old.max_limit != new.max_limit,
            Self::History => old.history != new.history,
        }
    }
}

/// Storage keys scoped to one widget, optionally under a namespace.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StorageKeys {
    namespace: Option<String>,
}

impl StorageKeys {
    pub fn new(namespace: Option<String>) -> Self {
        Self { namespace }
    }

    /// Full key for a field: `"<namespace>:<key>"` or just `"<key>"`.
    pub fn key(&self, field: Field) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", field.key()),
            None => field.key().to_string(),
        }
    }
}

/// One store mutation produced by [`plan_writes`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FieldWrite {
    Set { key: String, value: String },
    Remove { key: String },
}

impl FieldWrite {
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key,
        }
    }

    /// Perform the write against a store.
    pub fn perform(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        match self {
            Self::Set { key, value } => store.set(key, value),
            Self::Remove { key } => store.remove(key),
        }
    }
}

fn encode(state: &CounterState, field: Field, keys: &StorageKeys) -> Option<FieldWrite> {
    let key = keys.key(field);
    let value = match field {
        Field::Count => state.count.to_string(),
        Field::Theme => state.theme.as_str().to_string(),
        Field::Mode => state.mode.as_str().to_string(),
        Field::MaxLimit => state.max_limit.to_string(),
        Field::History if state.history.is_empty() => {
            return Some(FieldWrite::Remove { key });
        }
        Field::History => match serde_json::to_string(&state.history) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "history could not be encoded, skipping write");
                return None;
            }
        },
    };
    Some(FieldWrite::Set { key, value })
}

/// Plan the store writes that mirror `next`.
///
/// With `previous` set, only fields that differ are written. Without it every
/// field is flushed. An empty history is removed rather than written.
pub fn plan_writes(
    keys: &StorageKeys,
    previous: Option<&CounterState>,
    next: &CounterState,
) -> Vec<FieldWrite> {
    Field::ALL
        .iter()
        .filter(|field| previous.is_none_or(|old| field.differs(old, next)))
        .filter_map(|field| encode(next, *field, keys))
        .collect()
}

fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "store read failed, using default");
            None
        }
    }
}

fn parse_or<T>(
    raw: Option<String>,
    key: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    match raw {
        None => default,
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            debug!(key, value = %raw, "malformed persisted value, using default");
            default
        }),
    }
}

/// Leading unsigned integer of a stored value: `"5.7"` reads as 5 and
/// `"12px"` as 12. Negative or digit-less values are rejected.
fn leading_u32(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

/// Read every field from the store, substituting defaults where needed.
pub fn rehydrate(
    store: &dyn KeyValueStore,
    keys: &StorageKeys,
    default_max_limit: u32,
) -> CounterState {
    let count_key = keys.key(Field::Count);
    let count = parse_or(read(store, &count_key), &count_key, 0, leading_u32);

    let theme_key = keys.key(Field::Theme);
    let theme = read(store, &theme_key)
        .map(|raw| Theme::parse(&raw))
        .unwrap_or_default();

    let mode_key = keys.key(Field::Mode);
    let mode = parse_or(read(store, &mode_key), &mode_key, Mode::Unlimited, Mode::parse);

    let limit_key = keys.key(Field::MaxLimit);
    let max_limit = parse_or(
        read(store, &limit_key),
        &limit_key,
        default_max_limit,
        leading_u32,
    );

    let history_key = keys.key(Field::History);
    let history = parse_or(
        read(store, &history_key),
        &history_key,
        History::new(),
        |raw| {
            serde_json::from_str::<Vec<Entry>>(raw)
                .ok()
                .map(History::from_entries)
        },
    );

    CounterState {
        count,
        mode,
        max_limit,
        theme,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, DEFAULT_MAX_LIMIT};

    fn entry(value: u32) -> Entry {
        Entry {
            action: Action::Increment,
            value,
            timestamp: "t".to_string(),
        }
    }

    #[test]
    fn empty_store_rehydrates_defaults() {
        let store = MemoryStore::new();
        let state = rehydrate(&store, &StorageKeys::default(), DEFAULT_MAX_LIMIT);
        assert_eq!(state, CounterState::default());
    }

    #[test]
    fn stored_values_are_read() {
        let store = MemoryStore::with_entries([
            ("count", "4"),
            ("theme", "dark"),
            ("mode", "limited"),
            ("maxLimit", "6"),
            (
                "countHistory",
                r#"[{"action":"Decrement","value":4,"timestamp":"x"}]"#,
            ),
        ]);
        let state = rehydrate(&store, &StorageKeys::default(), DEFAULT_MAX_LIMIT);

        assert_eq!(state.count, 4);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.mode, Mode::Limited);
        assert_eq!(state.max_limit, 6);
        assert_eq!(state.history.latest().map(|e| e.action), Some(Action::Decrement));
    }

    #[test]
    fn malformed_values_fall_back() {
        let store = MemoryStore::with_entries([
            ("count", "-3"),
            ("theme", "neon"),
            ("mode", "sometimes"),
            ("maxLimit", "lots"),
            ("countHistory", "{not json"),
        ]);
        let state = rehydrate(&store, &StorageKeys::default(), 25);

        assert_eq!(state.count, 0);
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.mode, Mode::Unlimited);
        assert_eq!(state.max_limit, 25);
        assert!(state.history.is_empty());
    }

    #[test]
    fn numeric_prefix_is_read() {
        let store = MemoryStore::with_entries([("count", "5.7"), ("maxLimit", " 12px")]);
        let state = rehydrate(&store, &StorageKeys::default(), DEFAULT_MAX_LIMIT);

        assert_eq!(state.count, 5);
        assert_eq!(state.max_limit, 12);
        assert_eq!(leading_u32("+3"), Some(3));
        assert_eq!(leading_u32("px12"), None);
        assert_eq!(leading_u32("-3"), None);
    }

    #[test]
    fn oversized_history_is_truncated() {
        let entries: Vec<Entry> = (0..14).map(entry).collect();
        let store = MemoryStore::with_entries([(
            "countHistory".to_string(),
            serde_json::to_string(&entries).unwrap(),
        )]);
        let state = rehydrate(&store, &StorageKeys::default(), DEFAULT_MAX_LIMIT);
        assert_eq!(state.history.len(), 10);
    }

    #[test]
    fn namespace_prefixes_keys() {
        let keys = StorageKeys::new(Some("left".to_string()));
        assert_eq!(keys.key(Field::MaxLimit), "left:maxLimit");

        let store = MemoryStore::with_entries([("left:count", "9"), ("count", "2")]);
        assert_eq!(rehydrate(&store, &keys, DEFAULT_MAX_LIMIT).count, 9);
    }

    #[test]
    fn full_flush_skips_empty_history() {
        let writes = plan_writes(&StorageKeys::default(), None, &CounterState::default());

        assert_eq!(writes.len(), 5);
        assert!(writes.contains(&FieldWrite::Set {
            key: "count".to_string(),
            value: "0".to_string()
        }));
        assert!(writes.contains(&FieldWrite::Set {
            key: "mode".to_string(),
            value: "unlimited".to_string()
        }));
        assert!(writes.contains(&FieldWrite::Remove {
            key: "countHistory".to_string()
        }));
    }

    #[test]
    fn diff_writes_only_changed_fields() {
        let old = CounterState::default();
        let new = CounterState {
            theme: Theme::Dark,
            ..old.clone()
        };
        let writes = plan_writes(&StorageKeys::default(), Some(&old), &new);

        assert_eq!(
            writes,
            vec![FieldWrite::Set {
                key: "theme".to_string(),
                value: "dark".to_string()
            }]
        );
    }

    #[test]
    fn history_is_written_as_json_array() {
        let old = CounterState::default();
        let new = CounterState {
            count: 1,
            history: History::new().record(entry(1)),
            ..old.clone()
        };
        let writes = plan_writes(&StorageKeys::default(), Some(&old), &new);

        assert_eq!(writes.len(), 2);
        let history = writes
            .iter()
            .find(|w| w.key() == "countHistory")
            .unwrap();
        match history {
            FieldWrite::Set { value, .. } => {
                assert_eq!(value, r#"[{"action":"Increment","value":1,"timestamp":"t"}]"#)
            }
            FieldWrite::Remove { .. } => panic!("expected history to be set"),
        }
    }

    #[test]
    fn perform_applies_to_store() {
        let store = MemoryStore::with_entries([("countHistory", "[]")]);
        FieldWrite::Remove {
            key: "countHistory".to_string(),
        }
        .perform(&store)
        .unwrap();
        FieldWrite::Set {
            key: "count".to_string(),
            value: "3".to_string(),
        }
        .perform(&store)
        .unwrap();

        assert_eq!(store.get("countHistory").unwrap(), None);
        assert_eq!(store.get("count").unwrap().as_deref(), Some("3"));
    }
}
