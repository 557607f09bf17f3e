//! In-process key-value store.

use super::{StoreAdapter, StoreEntries, StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Non-durable store with switchable fault injection.
///
/// Reads and writes can be made to fail independently, which lets callers
/// exercise the repositories' storage-failure recovery paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<StoreEntries>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries(entries: StoreEntries) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Returns a copy of everything currently stored.
    pub fn snapshot(&self) -> StoreEntries {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl StoreAdapter for MemoryStore {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreEntries> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read failure injected".to_string()));
        }
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                entries
                    .get(*key)
                    .map(|value| ((*key).to_string(), value.clone()))
            })
            .collect())
    }

    fn set(&self, entries: StoreEntries) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write failure injected".to_string()));
        }
        let mut stored = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        stored.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{single_entry, StoreAdapter, StoreError};
    use serde_json::json;

    #[test]
    fn injected_failures_surface_as_unavailable() {
        let store = MemoryStore::new();
        store.fail_reads(true);
        assert!(matches!(store.get(&["notes"]), Err(StoreError::Unavailable(_))));

        store.fail_writes(true);
        let err = store.set(single_entry("notes", json!([]))).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn set_then_get_returns_value() {
        let store = MemoryStore::new();
        store.set(single_entry("notes", json!([1, 2]))).unwrap();
        let entries = store.get(&["notes", "settings"]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["notes"], json!([1, 2]));
    }
}
