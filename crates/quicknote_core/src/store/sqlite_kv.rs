//! SQLite-backed key-value store.

use super::{StoreAdapter, StoreEntries, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// Durable store keeping one JSON document per key in `kv_entries`.
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Opens (or creates) a store file with migrations applied.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already has migrations applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }
}

impl StoreAdapter for SqliteKvStore {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreEntries> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached("SELECT value FROM kv_entries WHERE key = ?1;")?;
        let mut entries = StoreEntries::new();

        for key in keys {
            let mut rows = stmt.query([key])?;
            if let Some(row) = rows.next()? {
                let raw: String = row.get(0)?;
                entries.insert((*key).to_string(), serde_json::from_str(&raw)?);
            }
        }

        Ok(entries)
    }

    fn set(&self, entries: StoreEntries) -> StoreResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for (key, value) in &entries {
            let raw = serde_json::to_string(value)?;
            tx.execute(
                "INSERT INTO kv_entries (key, value, updated_at)
                 VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key, raw],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::store::{single_entry, StoreAdapter};
    use serde_json::json;

    #[test]
    fn get_omits_missing_keys() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        let entries = store.get(&["notes"]).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn set_overwrites_existing_value() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        store.set(single_entry("settings", json!({"defaultSecret": false}))).unwrap();
        store.set(single_entry("settings", json!({"defaultSecret": true}))).unwrap();

        let entries = store.get(&["settings"]).unwrap();
        assert_eq!(entries["settings"], json!({"defaultSecret": true}));
    }
}
