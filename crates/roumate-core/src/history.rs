//! Ordered outcome history with undo and best-effort persistence.
//!
//! The in-memory sequence is the source of truth for the running session.
//! Every mutation validates first (no partial state on error), applies, then
//! persists through the injected [`StorageAdapter`]. A persistence failure is
//! logged and recorded on the store but never rolls the mutation back.

use crate::error::{Result, RouletteError};
use crate::outcome::{TableVariant, classify};
use crate::storage::StorageAdapter;

/// Append/undo-capable outcome sequence for one table variant.
pub struct HistoryStore {
    variant: TableVariant,
    entries: Vec<u8>,
    storage: Box<dyn StorageAdapter>,
    last_persist_failure: Option<String>,
}

impl HistoryStore {
    /// Create a store hydrated from persisted storage. Persisted entries that
    /// are invalid for `variant` are dropped with a warning; they never enter
    /// the session.
    pub fn new(variant: TableVariant, storage: Box<dyn StorageAdapter>) -> Self {
        let mut store = Self {
            variant,
            entries: Vec::new(),
            storage,
            last_persist_failure: None,
        };
        store.hydrate();
        store
    }

    /// Create an empty store, ignoring any persisted state.
    pub fn empty(variant: TableVariant, storage: Box<dyn StorageAdapter>) -> Self {
        Self {
            variant,
            entries: Vec::new(),
            storage,
            last_persist_failure: None,
        }
    }

    fn hydrate(&mut self) {
        let loaded = match self.storage.load() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("history load failed, starting empty: {e}");
                return;
            }
        };
        let before = loaded.len();
        self.entries = loaded
            .into_iter()
            .filter(|&n| self.variant.is_valid(n))
            .collect();
        if self.entries.len() < before {
            log::warn!(
                "dropped {} invalid persisted entries for {} table",
                before - self.entries.len(),
                self.variant
            );
        }
    }

    pub fn variant(&self) -> TableVariant {
        self.variant
    }

    /// Full ordered history, oldest first.
    pub fn all(&self) -> &[u8] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate, push, persist. Returns the new length.
    pub fn append(&mut self, n: u8) -> Result<usize> {
        classify(n, self.variant)?;
        self.entries.push(n);
        self.persist_append(std::slice::from_ref(&n));
        Ok(self.entries.len())
    }

    /// Validate the whole batch, then push all of it. All-or-nothing: one
    /// invalid element leaves both memory and storage untouched.
    pub fn append_many(&mut self, outcomes: &[u8]) -> Result<usize> {
        for &n in outcomes {
            classify(n, self.variant)?;
        }
        self.entries.extend_from_slice(outcomes);
        if !outcomes.is_empty() {
            self.persist_append(outcomes);
        }
        Ok(self.entries.len())
    }

    /// Remove the most recent entry. Only the tail is ever removable.
    pub fn remove_last(&mut self) -> Result<u8> {
        let n = self.entries.pop().ok_or(RouletteError::EmptyHistory)?;
        self.persist_all();
        Ok(n)
    }

    /// Empty the history. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_persist_failure = None;
        if let Err(e) = self.storage.reset() {
            log::warn!("history reset not persisted: {e}");
            self.last_persist_failure = Some(e.to_string());
        }
    }

    /// The persistence failure from the most recent mutation, if any.
    /// In-memory state is unaffected either way.
    pub fn last_persist_failure(&self) -> Option<&str> {
        self.last_persist_failure.as_deref()
    }

    fn persist_append(&mut self, delta: &[u8]) {
        self.last_persist_failure = None;
        if let Err(e) = self.storage.append_many(delta) {
            log::warn!("history append not persisted: {e}");
            self.last_persist_failure = Some(e.to_string());
        }
    }

    fn persist_all(&mut self) {
        self.last_persist_failure = None;
        if let Err(e) = self.storage.save_all(&self.entries) {
            log::warn!("history not persisted: {e}");
            self.last_persist_failure = Some(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::DOUBLE_ZERO;
    use crate::storage::{MemoryStorage, StorageAdapter};

    fn store(variant: TableVariant) -> HistoryStore {
        HistoryStore::new(variant, Box::new(MemoryStorage::new()))
    }

    /// Adapter that always fails, for persistence-failure policy tests.
    struct FailingStorage;

    impl StorageAdapter for FailingStorage {
        fn load(&self) -> crate::error::Result<Vec<u8>> {
            Err(RouletteError::persistence("load refused"))
        }
        fn save_all(&mut self, _history: &[u8]) -> crate::error::Result<()> {
            Err(RouletteError::persistence("save refused"))
        }
        fn reset(&mut self) -> crate::error::Result<()> {
            Err(RouletteError::persistence("reset refused"))
        }
    }

    // -----------------------------------------------------------------------
    // Append / undo
    // -----------------------------------------------------------------------

    #[test]
    fn test_append_returns_length() {
        let mut h = store(TableVariant::European);
        assert_eq!(h.append(5).unwrap(), 1);
        assert_eq!(h.append(0).unwrap(), 2);
        assert_eq!(h.all(), &[5, 0]);
    }

    #[test]
    fn test_append_invalid_mutates_nothing() {
        let mut h = store(TableVariant::European);
        h.append(10).unwrap();
        assert!(h.append(DOUBLE_ZERO).is_err());
        assert_eq!(h.all(), &[10]);
    }

    #[test]
    fn test_append_then_remove_last_is_inverse() {
        let mut h = store(TableVariant::American);
        h.append_many(&[4, 19]).unwrap();
        h.append(DOUBLE_ZERO).unwrap();
        assert_eq!(h.remove_last().unwrap(), DOUBLE_ZERO);
        assert_eq!(h.all(), &[4, 19]);
    }

    #[test]
    fn test_remove_last_on_empty() {
        let mut h = store(TableVariant::European);
        assert!(matches!(
            h.remove_last(),
            Err(RouletteError::EmptyHistory)
        ));
    }

    // -----------------------------------------------------------------------
    // Batch append atomicity
    // -----------------------------------------------------------------------

    #[test]
    fn test_append_many_roundtrip_order() {
        let mut h = store(TableVariant::European);
        h.append_many(&[1, 2, 3, 0]).unwrap();
        assert_eq!(h.all(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_append_many_is_atomic() {
        let mut h = store(TableVariant::European);
        h.append(8).unwrap();
        // 37 is invalid on a European table; nothing from the batch lands.
        assert!(h.append_many(&[1, 2, DOUBLE_ZERO, 3]).is_err());
        assert_eq!(h.all(), &[8]);
    }

    #[test]
    fn test_append_many_matches_sequential_appends() {
        let input = [7, 0, 21, 36];
        let mut batch = store(TableVariant::European);
        batch.append_many(&input).unwrap();
        let mut seq = store(TableVariant::European);
        for &n in &input {
            seq.append(n).unwrap();
        }
        assert_eq!(batch.all(), seq.all());
    }

    // -----------------------------------------------------------------------
    // Clear
    // -----------------------------------------------------------------------

    #[test]
    fn test_clear_is_idempotent() {
        let mut h = store(TableVariant::European);
        h.append_many(&[1, 2]).unwrap();
        h.clear();
        assert!(h.is_empty());
        h.clear();
        assert!(h.is_empty());
    }

    // -----------------------------------------------------------------------
    // Hydration
    // -----------------------------------------------------------------------

    #[test]
    fn test_hydrates_from_storage() {
        let mut seed = MemoryStorage::new();
        seed.save_all(&[3, 0, 12]).unwrap();
        let h = HistoryStore::new(TableVariant::European, Box::new(seed));
        assert_eq!(h.all(), &[3, 0, 12]);
    }

    #[test]
    fn test_hydration_drops_invalid_entries() {
        let mut seed = MemoryStorage::new();
        // 37 and 99 are invalid on a European table.
        seed.save_all(&[3, 37, 99, 12]).unwrap();
        let h = HistoryStore::new(TableVariant::European, Box::new(seed));
        assert_eq!(h.all(), &[3, 12]);
    }

    #[test]
    fn test_load_failure_starts_empty() {
        let h = HistoryStore::new(TableVariant::European, Box::new(FailingStorage));
        assert!(h.is_empty());
    }

    // -----------------------------------------------------------------------
    // Persistence failure policy
    // -----------------------------------------------------------------------

    #[test]
    fn test_persist_failure_keeps_in_memory_state() {
        let mut h = HistoryStore::new(TableVariant::European, Box::new(FailingStorage));
        assert_eq!(h.append(5).unwrap(), 1);
        assert_eq!(h.all(), &[5]);
        assert!(h.last_persist_failure().is_some());

        // A later successful mutation path still keeps history intact.
        assert_eq!(h.remove_last().unwrap(), 5);
        assert!(h.is_empty());
    }
}
