//! SQLite bootstrap for the key-value backing store.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by `SqliteKvStore`.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No store entry is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the key-value store file.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a pragma, migration or `kv_entries` statement.
    Sqlite(rusqlite::Error),
    /// The file carries a `user_version` this build cannot read.
    ///
    /// Opening is refused so an older binary never rewrites `kv_entries`
    /// in a layout it does not understand.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl DbError {
    /// Stable code used in `event=db_open` log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "kv_sqlite_failed",
            Self::UnsupportedSchemaVersion { .. } => "kv_schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "note store database error: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "note store was written by a newer QuickNote (schema {found}, this build reads up to {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;

    #[test]
    fn codes_and_messages_name_the_note_store() {
        let sqlite = DbError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(sqlite.code(), "kv_sqlite_failed");
        assert!(sqlite.to_string().starts_with("note store database error"));

        let too_new = DbError::UnsupportedSchemaVersion {
            found: 3,
            supported: 1,
        };
        assert_eq!(too_new.code(), "kv_schema_too_new");
        assert!(too_new.to_string().contains("schema 3"));
    }
}
