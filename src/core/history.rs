//! Conversion history with key-value persistence
//!
//! The manager owns the in-memory log and its persisted mirror, plus the
//! display preferences that share the same store. Mutations never fail:
//! store errors are logged and the in-memory state stays authoritative.

use chrono::Utc;
use std::sync::Arc;

use crate::core::storage::KeyValueStore;
use crate::shared::settings::Preferences;
use crate::shared::types::{HistoryEntry, NewHistoryEntry};

/// Maximum number of history entries to keep
pub const MAX_HISTORY_SIZE: usize = 50;

pub const HISTORY_KEY: &str = "history";

// Largest integer a JSON number holds exactly; persisted ids above it are corrupt
const MAX_ENTRY_ID: u64 = (1 << 53) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Ready,
}

/// Bounded, newest-first conversion log
pub struct HistoryManager {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
    preferences: Preferences,
    phase: Phase,
    last_id: u64,
}

impl HistoryManager {
    /// Create an uninitialized manager; call [`HistoryManager::load`] before use
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            entries: Vec::new(),
            preferences: Preferences::default(),
            phase: Phase::Uninitialized,
            last_id: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Restore the log and preferences from the store.
    ///
    /// Only the first call reads the store; later calls are no-ops.
    pub fn load(&mut self) {
        if self.is_ready() {
            return;
        }

        self.entries = load_entries(self.store.as_ref());
        self.preferences = Preferences::load(self.store.as_ref());
        self.last_id = self.entries.iter().map(|entry| entry.id).max().unwrap_or(0);
        self.phase = Phase::Ready;

        tracing::info!(
            entries = self.entries.len(),
            precision = self.preferences.precision,
            "history loaded"
        );
    }

    /// Discard in-memory state and read the store again
    pub fn reload(&mut self) {
        self.phase = Phase::Uninitialized;
        self.load();
    }

    // Mutating before load would overwrite the persisted log
    fn ensure_loaded(&mut self) {
        if !self.is_ready() {
            tracing::debug!("history used before load, loading now");
            self.load();
        }
    }

    /// Record a successful conversion and return the stored entry
    pub fn record(&mut self, data: NewHistoryEntry) -> HistoryEntry {
        self.ensure_loaded();

        let entry = data.into_entry(self.next_id(), Utc::now());
        self.entries.insert(0, entry.clone());
        if self.entries.len() > MAX_HISTORY_SIZE {
            self.entries.truncate(MAX_HISTORY_SIZE);
        }
        self.persist_entries();

        tracing::debug!(id = entry.id, category = %entry.category, "recorded conversion");
        entry
    }

    /// Remove the entry with `id`. Returns whether an entry was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        self.ensure_loaded();

        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;

        // The log is persisted even when nothing matched
        self.persist_entries();
        removed
    }

    /// Empty the log and delete its persisted copy
    pub fn clear(&mut self) {
        self.ensure_loaded();

        self.entries.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            tracing::error!(error = %e, "failed to remove persisted history");
        } else {
            tracing::info!("history cleared");
        }
    }

    /// Entries, newest first. Empty until loaded.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn precision(&self) -> u8 {
        self.preferences.precision
    }

    /// Set the precision (clamped to 0..=10) and persist it; returns the stored value
    pub fn set_precision(&mut self, precision: u8) -> u8 {
        self.ensure_loaded();

        self.preferences.precision = Preferences::clamp_precision(i64::from(precision));
        if let Err(e) = self.preferences.save_precision(self.store.as_ref()) {
            tracing::error!(error = %e, "failed to persist precision");
        }
        self.preferences.precision
    }

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.ensure_loaded();

        self.preferences.dark_mode = enabled;
        if let Err(e) = self.preferences.save_dark_mode(self.store.as_ref()) {
            tracing::error!(error = %e, "failed to persist dark mode flag");
        }
    }

    /// Flip the dark mode flag and return the new value
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.ensure_loaded();

        let enabled = !self.preferences.dark_mode;
        self.set_dark_mode(enabled);
        enabled
    }

    // Millisecond timestamps, bumped past the last id so ids strictly increase
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }

    fn persist_entries(&self) {
        let serialized = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize history");
                return;
            }
        };
        if let Err(e) = self.store.set(HISTORY_KEY, &serialized) {
            tracing::error!(error = %e, "failed to persist history");
        }
    }
}

/// Read the persisted log, skipping unreadable entries.
///
/// A missing key yields an empty log. A value that is not a JSON array also
/// yields an empty log, with a warning.
fn load_entries(store: &dyn KeyValueStore) -> Vec<HistoryEntry> {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted history, starting empty");
            return Vec::new();
        }
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(error = %e, "persisted history is malformed, starting empty");
            return Vec::new();
        }
    };

    let mut entries: Vec<HistoryEntry> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<HistoryEntry>(value) {
            Ok(entry) if entry.id > MAX_ENTRY_ID => {
                tracing::warn!(id = entry.id, "skipping history entry with out-of-range id");
                None
            }
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed history entry");
                None
            }
        })
        .collect();

    entries.truncate(MAX_HISTORY_SIZE);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::unit_converter::Category;
    use crate::core::storage::MemoryStore;

    fn new_manager() -> (Arc<MemoryStore>, HistoryManager) {
        let store = Arc::new(MemoryStore::new());
        let mut manager = HistoryManager::new(store.clone());
        manager.load();
        (store, manager)
    }

    fn entry_data(value: &str) -> NewHistoryEntry {
        NewHistoryEntry {
            category: Category::Distance,
            value: value.to_string(),
            from_unit: "km".to_string(),
            to_unit: "m".to_string(),
            result: format!("{}000", value),
        }
    }

    #[test]
    fn test_record_and_list_newest_first() {
        let (_, mut history) = new_manager();

        history.record(entry_data("1"));
        history.record(entry_data("2"));

        let items = history.list();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value, "2"); // Most recent first
        assert_eq!(items[1].value, "1");
    }

    #[test]
    fn test_ids_strictly_increase() {
        let (_, mut history) = new_manager();

        let ids: Vec<u64> = (0..20).map(|i| history.record(entry_data(&i.to_string())).id).collect();
        assert!(ids.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn test_max_history_size() {
        let (_, mut history) = new_manager();

        let first = history.record(entry_data("0"));
        for i in 1..=MAX_HISTORY_SIZE {
            history.record(entry_data(&i.to_string()));
        }

        let items = history.list();
        assert_eq!(items.len(), MAX_HISTORY_SIZE);
        assert_eq!(items[0].value, MAX_HISTORY_SIZE.to_string()); // 51st recorded
        assert!(history.get(first.id).is_none());
    }

    #[test]
    fn test_remove() {
        let (_, mut history) = new_manager();

        let keep = history.record(entry_data("1"));
        let removed = history.record(entry_data("2"));

        assert!(history.remove(removed.id));
        assert_eq!(history.list(), &[keep]);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let (_, mut history) = new_manager();

        history.record(entry_data("1"));
        let before = history.list().to_vec();

        assert!(!history.remove(12345));
        assert_eq!(history.list(), before.as_slice());
    }

    #[test]
    fn test_record_persists_log() {
        let (store, mut history) = new_manager();
        history.record(entry_data("3"));

        let mut reopened = HistoryManager::new(store);
        reopened.load();
        assert_eq!(reopened.list(), history.list());
    }

    #[test]
    fn test_clear_removes_persisted_key() {
        let (store, mut history) = new_manager();
        history.record(entry_data("1"));

        history.clear();

        assert!(history.is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);

        let mut reopened = HistoryManager::new(store);
        reopened.load();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_load_is_idempotent() {
        let (store, mut history) = new_manager();
        history.record(entry_data("1"));

        // External write is not picked up by a second load
        store.set(HISTORY_KEY, "[]").unwrap();
        history.load();
        assert_eq!(history.len(), 1);

        history.reload();
        assert!(history.is_empty());
    }

    #[test]
    fn test_malformed_history_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(HISTORY_KEY, "{not json").unwrap();

        let mut history = HistoryManager::new(store);
        history.load();
        assert!(history.is_empty());
        assert!(history.is_ready());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                HISTORY_KEY,
                r#"[{"id":5,"category":"weight","value":"1000","fromUnit":"g","toUnit":"kg","result":"1","timestamp":"2024-05-01T10:00:00Z"},{"id":"bad"}]"#,
            )
            .unwrap();

        let mut history = HistoryManager::new(store);
        history.load();
        assert_eq!(history.len(), 1);
        assert_eq!(history.list()[0].category, Category::Weight);

        // New ids continue past the loaded ones
        let entry = history.record(entry_data("1"));
        assert!(entry.id > 5);
    }

    #[test]
    fn test_out_of_range_ids_are_skipped() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                HISTORY_KEY,
                r#"[{"id":18446744073709551615,"category":"speed","value":"1","fromUnit":"knots","toUnit":"km/h","result":"1.851983","timestamp":"2024-05-01T10:00:00Z"},{"id":7,"category":"weight","value":"1000","fromUnit":"g","toUnit":"kg","result":"1","timestamp":"2024-05-01T10:00:00Z"}]"#,
            )
            .unwrap();

        let mut history = HistoryManager::new(store);
        history.load();
        assert_eq!(history.len(), 1);
        assert_eq!(history.list()[0].id, 7);

        let first = history.record(entry_data("1"));
        let second = history.record(entry_data("2"));
        assert!(first.id > 7);
        assert!(second.id > first.id);
        assert!(second.id <= MAX_ENTRY_ID);
    }

    #[test]
    fn test_next_id_saturates_instead_of_overflowing() {
        let (_, mut history) = new_manager();
        history.load();
        history.last_id = u64::MAX;
        assert_eq!(history.next_id(), u64::MAX);
    }

    #[test]
    fn test_record_before_load_keeps_persisted_entries() {
        let (store, mut history) = new_manager();
        history.record(entry_data("1"));

        let mut fresh = HistoryManager::new(store);
        assert!(!fresh.is_ready());
        fresh.record(entry_data("2"));

        assert!(fresh.is_ready());
        assert_eq!(fresh.len(), 2);
    }

    #[test]
    fn test_precision_change_keeps_recorded_results() {
        let (store, mut history) = new_manager();
        let entry = history.record(NewHistoryEntry {
            category: Category::Weight,
            value: "1".to_string(),
            from_unit: "lb".to_string(),
            to_unit: "kg".to_string(),
            result: "0.453592".to_string(),
        });

        assert_eq!(history.set_precision(2), 2);
        assert_eq!(history.get(entry.id).unwrap().result, "0.453592");
        assert_eq!(store.get("precision").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_precision_is_clamped() {
        let (_, mut history) = new_manager();
        assert_eq!(history.set_precision(15), 10);
        assert_eq!(history.precision(), 10);
    }

    #[test]
    fn test_dark_mode_round_trip() {
        let (store, mut history) = new_manager();
        assert!(!history.dark_mode());

        assert!(history.toggle_dark_mode());
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));

        let mut reopened = HistoryManager::new(store);
        reopened.load();
        assert!(reopened.dark_mode());
    }
}
