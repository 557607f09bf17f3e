//! Key-value backing store contracts and implementations.
//!
//! # Responsibility
//! - Define the adapter boundary the repositories persist through.
//! - Provide a SQLite-backed store and an in-process store.
//!
//! # Invariants
//! - Adapters report failures as `StoreError`; they never panic.
//! - `set` writes every entry of one call or none of them.
//! - Values are JSON documents; adapters do not interpret them.

use crate::db::DbError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod memory;
mod sqlite_kv;

pub use memory::MemoryStore;
pub use sqlite_kv::SqliteKvStore;

/// Store key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";
/// Store key holding the serialized settings record.
pub const SETTINGS_KEY: &str = "settings";

/// Key to JSON value mapping exchanged with adapters.
pub type StoreEntries = BTreeMap<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backing-store failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A stored value could not be encoded or decoded.
    Json(serde_json::Error),
    /// The store refused the operation (quota, closed handle, injected fault).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid stored value: {err}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Adapter interface for the persistent key-value store.
pub trait StoreAdapter: Send + Sync {
    /// Reads the requested keys. Absent keys are omitted from the result.
    fn get(&self, keys: &[&str]) -> StoreResult<StoreEntries>;
    /// Writes all entries, replacing existing values for the same keys.
    fn set(&self, entries: StoreEntries) -> StoreResult<()>;
}

impl<S: StoreAdapter + ?Sized> StoreAdapter for &S {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreEntries> {
        (**self).get(keys)
    }

    fn set(&self, entries: StoreEntries) -> StoreResult<()> {
        (**self).set(entries)
    }
}

impl<S: StoreAdapter + ?Sized> StoreAdapter for Arc<S> {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreEntries> {
        (**self).get(keys)
    }

    fn set(&self, entries: StoreEntries) -> StoreResult<()> {
        (**self).set(entries)
    }
}

/// Builds a single-entry mapping for `set`.
pub fn single_entry(key: &str, value: Value) -> StoreEntries {
    let mut entries = StoreEntries::new();
    entries.insert(key.to_string(), value);
    entries
}
