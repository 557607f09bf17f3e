use quicknote_core::db::migrations::latest_version;
use quicknote_core::db::{open_db, open_db_in_memory, DbError};
use quicknote_core::store::{single_entry, NOTES_KEY, SETTINGS_KEY};
use quicknote_core::{NoteRepository, SettingsRepository, SqliteKvStore, StoreAdapter, StoreError};
use rusqlite::Connection;
use serde_json::json;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quicknote.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "kv_entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(*found, 999);
            assert_eq!(*supported, latest_version());
            assert_eq!(err.code(), "kv_schema_too_new");
            assert!(err.to_string().contains("newer QuickNote"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        SqliteKvStore::open(&path),
        Err(StoreError::Db(DbError::UnsupportedSchemaVersion { .. }))
    ));
}

#[test]
fn kv_store_missing_keys_are_absent_and_writes_upsert() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    assert!(store.get(&[NOTES_KEY, SETTINGS_KEY]).unwrap().is_empty());

    store.set(single_entry(NOTES_KEY, json!([1]))).unwrap();
    store.set(single_entry(NOTES_KEY, json!([2]))).unwrap();

    let entries = store.get(&[NOTES_KEY, SETTINGS_KEY]).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[NOTES_KEY], json!([2]));
}

#[test]
fn notes_and_settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quicknote.sqlite3");

    let created = {
        let store = SqliteKvStore::open(&path).unwrap();
        let mut settings = SettingsRepository::new(&store);
        settings.set_default_secret(true);
        let mut notes = NoteRepository::new(&store);
        notes
            .create("kept on disk", vec!["disk".to_string()], true)
            .unwrap()
    };

    let store = SqliteKvStore::open(&path).unwrap();
    let mut settings = SettingsRepository::new(&store);
    assert!(settings.load().default_secret);

    let mut notes = NoteRepository::new(&store);
    assert_eq!(notes.load(), [created]);
    assert_eq!(notes.all_tags(), ["disk"]);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
