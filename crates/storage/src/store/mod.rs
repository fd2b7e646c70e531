#![forbid(unsafe_code)]

mod error;
mod requests;

pub use error::StoreError;
pub use requests::*;

use linkset_core::names::SetName;
use linkset_core::urls::UrlText;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE: &str = "linkset.db";
const SCHEMA_VERSION: i64 = 1;
const MAX_TIMESTAMP_BYTES: usize = 64;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        preflight_gate(&conn)?;
        install_schema(&conn)?;

        Ok(Self {
            conn,
            storage_dir: Some(storage_dir),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        Ok(Self {
            conn,
            storage_dir: None,
        })
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    pub fn insert_entry(&mut self, request: InsertEntryRequest) -> Result<EntryRow, StoreError> {
        let set_name = canonicalize_set(&request.set_name)?;
        let url = canonicalize_url(&request.url)?;
        let timestamp = request
            .timestamp
            .as_deref()
            .map(canonicalize_timestamp)
            .transpose()?;

        let insert = match timestamp {
            Some(timestamp) => self.conn.execute(
                "INSERT INTO PersistentSets(name, timestamp, url) VALUES (?1, ?2, ?3)",
                params![set_name, timestamp, url],
            ),
            // Omitted timestamp falls through to the column default
            // (CURRENT_TIMESTAMP at insertion).
            None => self.conn.execute(
                "INSERT INTO PersistentSets(name, url) VALUES (?1, ?2)",
                params![set_name, url],
            ),
        };

        if let Err(err) = insert {
            return Err(map_insert_conflict(err, &set_name, &url));
        }

        let stored = self.conn.query_row(
            "SELECT name, url, timestamp FROM PersistentSets WHERE name=?1 AND url=?2",
            params![set_name, url],
            |row| {
                Ok(EntryRow {
                    set_name: row.get::<_, String>(0)?,
                    url: row.get::<_, String>(1)?,
                    timestamp: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            },
        )?;

        Ok(stored)
    }

    pub fn contains(&self, set_name: &str, url: &str) -> Result<bool, StoreError> {
        let set_name = canonicalize_set(set_name)?;
        let url = canonicalize_url(url)?;

        Ok(self
            .conn
            .query_row(
                "SELECT 1 FROM PersistentSets WHERE name=?1 AND url=?2",
                params![set_name, url],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .is_some())
    }

    pub fn remove_entry(&mut self, set_name: &str, url: &str) -> Result<bool, StoreError> {
        let set_name = canonicalize_set(set_name)?;
        let url = canonicalize_url(url)?;

        let removed = self.conn.execute(
            "DELETE FROM PersistentSets WHERE name=?1 AND url=?2",
            params![set_name, url],
        )?;
        Ok(removed > 0)
    }

    pub fn clear_set(&mut self, set_name: &str) -> Result<usize, StoreError> {
        let set_name = canonicalize_set(set_name)?;

        let removed = self.conn.execute(
            "DELETE FROM PersistentSets WHERE name=?1",
            params![set_name],
        )?;
        Ok(removed)
    }

    pub fn list_entries(&self, request: ListEntriesRequest) -> Result<Vec<EntryRow>, StoreError> {
        let set_name = canonicalize_set(&request.set_name)?;
        let limit = to_sqlite_i64(request.limit)?;
        let offset = to_sqlite_i64(request.offset)?;

        let mut stmt = self.conn.prepare(
            "SELECT name, url, timestamp FROM PersistentSets \
             WHERE name=?1 \
             ORDER BY timestamp ASC, url ASC \
             LIMIT ?2 OFFSET ?3",
        )?;

        let mut rows = stmt.query(params![set_name, limit, offset])?;
        let mut out = Vec::new();

        while let Some(row) = rows.next()? {
            out.push(EntryRow {
                set_name: row.get::<_, String>(0)?,
                url: row.get::<_, String>(1)?,
                timestamp: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            });
        }

        Ok(out)
    }

    pub fn count_entries(&self, set_name: &str) -> Result<usize, StoreError> {
        let set_name = canonicalize_set(set_name)?;

        let count = self.conn.query_row(
            "SELECT COUNT(1) FROM PersistentSets WHERE name=?1",
            params![set_name],
            |row| row.get::<_, i64>(0),
        )?;
        usize::try_from(count).map_err(|_| StoreError::InvalidInput("numeric overflow"))
    }

    pub fn summarize_set(&self, set_name: &str) -> Result<SetSummary, StoreError> {
        let set_name = canonicalize_set(set_name)?;

        let summary = self
            .conn
            .query_row(
                "SELECT name, COUNT(1), MIN(timestamp), MAX(timestamp) \
                 FROM PersistentSets WHERE name=?1 GROUP BY name",
                params![set_name],
                |row| {
                    Ok(SetSummary {
                        name: row.get::<_, String>(0)?,
                        entries: row.get::<_, i64>(1)?.max(0) as usize,
                        first_added: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        last_added: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;

        summary.ok_or(StoreError::UnknownSet)
    }

    pub fn list_sets(&self) -> Result<Vec<SetSummary>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, COUNT(1), MIN(timestamp), MAX(timestamp) \
             FROM PersistentSets GROUP BY name ORDER BY name ASC",
        )?;

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();

        while let Some(row) = rows.next()? {
            out.push(SetSummary {
                name: row.get::<_, String>(0)?,
                entries: row.get::<_, i64>(1)?.max(0) as usize,
                first_added: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                last_added: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            });
        }

        Ok(out)
    }
}

fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
    )?;
    let mut rows = stmt.query([])?;
    let mut tables = BTreeSet::new();
    while let Some(row) = rows.next()? {
        tables.insert(row.get::<_, String>(0)?);
    }

    if tables.is_empty() {
        return Ok(());
    }

    let known: BTreeSet<&str> = ["PersistentSets", "store_state"].into_iter().collect();
    if tables.iter().any(|table| !known.contains(table.as_str())) {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: unsupported tables detected",
        ));
    }

    // A database holding only PersistentSets predates the state row; adopt
    // it and let install_schema stamp the version.
    let version = if tables.contains("store_state") {
        conn.query_row(
            "SELECT schema_version FROM store_state WHERE singleton=1",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
    } else {
        None
    };

    match version {
        Some(v) if v == SCHEMA_VERSION => Ok(()),
        Some(_) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema version mismatch",
        )),
        None => Ok(()),
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store_state (
          singleton INTEGER PRIMARY KEY CHECK(singleton = 1),
          schema_version INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS PersistentSets (
          name TEXT NOT NULL,
          timestamp TEXT DEFAULT CURRENT_TIMESTAMP,
          url TEXT NOT NULL,
          PRIMARY KEY(name, url)
        );
        "#,
    )?;

    conn.execute(
        "INSERT INTO store_state(singleton, schema_version) VALUES (1, ?1) \
         ON CONFLICT(singleton) DO UPDATE SET schema_version=excluded.schema_version",
        params![SCHEMA_VERSION],
    )?;

    Ok(())
}

fn map_insert_conflict(err: rusqlite::Error, set_name: &str, url: &str) -> StoreError {
    if is_constraint_violation(&err) {
        return StoreError::DuplicateEntry {
            set: set_name.to_string(),
            url: url.to_string(),
        };
    }
    StoreError::Sql(err)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}

fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

fn canonicalize_set(value: &str) -> Result<String, StoreError> {
    SetName::try_new(value)
        .map(SetName::into_string)
        .map_err(|_| StoreError::InvalidInput("invalid set name"))
}

fn canonicalize_url(value: &str) -> Result<String, StoreError> {
    UrlText::try_new(value)
        .map(UrlText::into_string)
        .map_err(|_| StoreError::InvalidInput("invalid url"))
}

fn canonicalize_timestamp(value: &str) -> Result<String, StoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::InvalidInput("timestamp is empty"));
    }
    if value.len() > MAX_TIMESTAMP_BYTES {
        return Err(StoreError::InvalidInput("timestamp is too long"));
    }
    Ok(value.to_string())
}
