//! Mapping between [`DeckState`] and the string key-value store.
//!
//! `currentIndex` and `lastUndone` are decimal strings; `removedCards` is a
//! JSON array of `{"index": n}` objects. Anything absent or unreadable falls
//! back to its zero value.

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StoreError};

use super::state::{DeckState, Removal};

pub const CURRENT_INDEX_KEY: &str = "currentIndex";
pub const REMOVED_CARDS_KEY: &str = "removedCards";
pub const LAST_UNDONE_KEY: &str = "lastUndone";

#[derive(Debug, Serialize, Deserialize)]
struct RemovedCard {
    index: usize,
}

/// Read deck state from `store`, clamping the cursor into `[0, card_count]`.
pub fn load(store: &impl KeyValueStore, card_count: usize) -> DeckState {
    let current_index = load_index(store, CURRENT_INDEX_KEY);
    let clamped = current_index.min(card_count);
    if clamped != current_index {
        tracing::warn!(
            "Persisted {CURRENT_INDEX_KEY}={current_index} exceeds deck size {card_count}; clamping"
        );
    }
    DeckState {
        current_index: clamped,
        history: load_history(store),
        last_undone: load_index(store, LAST_UNDONE_KEY),
    }
}

/// Write every field of `state` to `store` in a single batch.
pub fn save(store: &mut impl KeyValueStore, state: &DeckState) -> Result<(), StoreError> {
    let removed: Vec<RemovedCard> = state
        .history
        .iter()
        .map(|removal| RemovedCard {
            index: removal.position,
        })
        .collect();
    let encoded = serde_json::to_string(&removed).unwrap_or_else(|_| "[]".to_string());
    let current_index = state.current_index.to_string();
    let last_undone = state.last_undone.to_string();
    store.set_many(&[
        (CURRENT_INDEX_KEY, current_index.as_str()),
        (REMOVED_CARDS_KEY, encoded.as_str()),
        (LAST_UNDONE_KEY, last_undone.as_str()),
    ])
}

/// Remove every persisted field in a single batch.
pub fn clear(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
    store.remove_many(&[CURRENT_INDEX_KEY, REMOVED_CARDS_KEY, LAST_UNDONE_KEY])
}

fn load_index(store: &impl KeyValueStore, key: &str) -> usize {
    let Some(raw) = store.get(key).filter(|raw| !raw.is_empty()) else {
        return 0;
    };
    match parse_int_prefix(&raw) {
        Some(value) if value >= 0 => usize::try_from(value).unwrap_or(usize::MAX),
        Some(_) => 0,
        None => {
            tracing::warn!("Persisted {key}={raw:?} is not a number; using 0");
            0
        }
    }
}

fn load_history(store: &impl KeyValueStore) -> Vec<Removal> {
    let Some(raw) = store.get(REMOVED_CARDS_KEY).filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<RemovedCard>>(&raw) {
        Ok(removed) => removed
            .into_iter()
            .map(|card| Removal {
                position: card.index,
            })
            .collect(),
        Err(err) => {
            tracing::warn!("Persisted {REMOVED_CARDS_KEY} is unreadable ({err}); using empty history");
            Vec::new()
        }
    }
}

/// Parse the leading integer of `raw`: optional whitespace, optional sign,
/// then as many decimal digits as present. `None` when no digit leads.
/// Values beyond `i64` saturate.
pub(crate) fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn parses_leading_digits_like_a_lenient_integer_parser() {
        assert_eq!(parse_int_prefix("12"), Some(12));
        assert_eq!(parse_int_prefix("  7px"), Some(7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn empty_store_loads_defaults() {
        assert_eq!(load(&MemoryStore::new(), 5), DeckState::default());
    }

    #[test]
    fn stored_state_uses_index_field_name() {
        let mut store = MemoryStore::new();
        let state = DeckState {
            current_index: 2,
            history: vec![Removal { position: 0 }, Removal { position: 1 }],
            last_undone: 1,
        };
        save(&mut store, &state).unwrap();

        assert_eq!(store.get(CURRENT_INDEX_KEY).as_deref(), Some("2"));
        assert_eq!(
            store.get(REMOVED_CARDS_KEY).as_deref(),
            Some(r#"[{"index":0},{"index":1}]"#)
        );
        assert_eq!(store.get(LAST_UNDONE_KEY).as_deref(), Some("1"));
        assert_eq!(load(&store, 3), state);
    }

    #[test]
    fn malformed_fields_fall_back_independently() {
        let store = MemoryStore::with_entries([
            (CURRENT_INDEX_KEY, "two"),
            (REMOVED_CARDS_KEY, r#"[{"index":0}]"#),
            (LAST_UNDONE_KEY, "-3"),
        ]);
        let state = load(&store, 4);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.history_positions(), vec![0]);
        assert_eq!(state.last_undone, 0);

        let store = MemoryStore::with_entries([
            (CURRENT_INDEX_KEY, "2"),
            (REMOVED_CARDS_KEY, "{not json"),
        ]);
        let state = load(&store, 4);
        assert_eq!(state.current_index, 2);
        assert!(state.history.is_empty());
    }

    #[test]
    fn negative_entry_invalidates_history() {
        let store = MemoryStore::with_entries([(REMOVED_CARDS_KEY, r#"[{"index":0},{"index":-1}]"#)]);
        assert!(load(&store, 4).history.is_empty());
    }

    #[test]
    fn cursor_is_clamped_to_deck_size() {
        let store = MemoryStore::with_entries([(CURRENT_INDEX_KEY, "12")]);
        assert_eq!(load(&store, 3).current_index, 3);
        assert_eq!(load(&store, 0).current_index, 0);
    }

    #[test]
    fn clear_removes_all_keys() {
        let mut store = MemoryStore::new();
        save(&mut store, &DeckState::default()).unwrap();
        store.set("unrelated", "kept").unwrap();
        clear(&mut store).unwrap();
        assert!(!store.contains_key(CURRENT_INDEX_KEY));
        assert!(!store.contains_key(REMOVED_CARDS_KEY));
        assert!(!store.contains_key(LAST_UNDONE_KEY));
        assert_eq!(store.get("unrelated").as_deref(), Some("kept"));
    }
}
