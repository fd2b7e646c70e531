#![forbid(unsafe_code)]

use linkset_storage::{InsertEntryRequest, SqliteStore, StoreError};
use rusqlite::Connection;
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("linkset_storage_gate_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn open_is_fail_closed_on_foreign_tables() {
    let dir = temp_dir("foreign_tables");
    let db_path = dir.join("linkset.db");

    let conn = Connection::open(db_path).expect("seed db must open");
    conn.execute("CREATE TABLE wallpapers(id TEXT PRIMARY KEY)", [])
        .expect("foreign table should be created");
    drop(conn);

    let err = SqliteStore::open(&dir).expect_err("foreign schema must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
    assert!(matches!(
        err,
        StoreError::InvalidInput(message) if message.starts_with("RESET_REQUIRED")
    ));
}

#[test]
fn open_is_fail_closed_on_schema_version_mismatch() {
    let dir = temp_dir("version_mismatch");

    let store = SqliteStore::open(&dir).expect("fresh store should open");
    drop(store);

    let conn = Connection::open(dir.join("linkset.db")).expect("reopen raw db");
    conn.execute("UPDATE store_state SET schema_version=99 WHERE singleton=1", [])
        .expect("bump version");
    drop(conn);

    let err = SqliteStore::open(&dir).expect_err("future schema must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
}

#[test]
fn open_adopts_a_bare_persistent_sets_table() {
    let dir = temp_dir("adopt_legacy");
    let db_path = dir.join("linkset.db");

    // The table as it existed before the store carried a version row.
    let conn = Connection::open(db_path).expect("seed db must open");
    conn.execute_batch(
        r#"
        CREATE TABLE PersistentSets (
          name TEXT NOT NULL,
          timestamp TEXT DEFAULT CURRENT_TIMESTAMP,
          url TEXT NOT NULL,
          PRIMARY KEY(name, url)
        );
        INSERT INTO PersistentSets(name, url) VALUES ('downloaded', 'https://example.com/old');
        "#,
    )
    .expect("legacy schema should seed");
    drop(conn);

    let store = SqliteStore::open(&dir).expect("legacy table must be adopted");
    assert!(
        store
            .contains("downloaded", "https://example.com/old")
            .expect("legacy row visible")
    );
}

#[test]
fn reopen_preserves_rows() {
    let dir = temp_dir("reopen");

    let mut store = SqliteStore::open(&dir).expect("open store");
    store
        .insert_entry(InsertEntryRequest {
            set_name: "downloaded".to_string(),
            url: "https://example.com/a".to_string(),
            timestamp: None,
        })
        .expect("insert");
    drop(store);

    let store = SqliteStore::open(&dir).expect("reopen store");
    assert!(
        store
            .contains("downloaded", "https://example.com/a")
            .expect("row survives reopen")
    );
}
