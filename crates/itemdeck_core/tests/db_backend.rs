use itemdeck_core::db::migrations::latest_version;
use itemdeck_core::db::{open_db, open_db_in_memory, DbError};
use itemdeck_core::{
    AppConfig, KeyValueBackend, KvRecordStore, RecordDraft, RecordStore, SqliteKeyValueBackend,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("itemdeck.sqlite3");

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
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unversioned_database_is_upgraded_without_losing_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        INSERT INTO kv_entries (key, value) VALUES ('testApp_items', '[]');",
    )
    .unwrap();
    assert_eq!(schema_version(&conn), 0);
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    drop(conn);

    let backend = SqliteKeyValueBackend::open(&path).unwrap();
    assert_eq!(
        backend.get("testApp_items").unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("itemdeck.sqlite3");
    let config = AppConfig::default();

    let created = {
        let backend = SqliteKeyValueBackend::open(&path).unwrap();
        let mut store = KvRecordStore::new(backend, &config);
        store
            .create(RecordDraft::new("Milk").with_tag_input("dairy, grocery"))
            .unwrap()
    };

    let backend = SqliteKeyValueBackend::open(&path).unwrap();
    let raw = backend.get(config.collection_key()).unwrap().unwrap();
    assert!(raw.starts_with('['));

    let store = KvRecordStore::new(backend, &config);
    assert_eq!(store.get_all().unwrap(), vec![created]);
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
