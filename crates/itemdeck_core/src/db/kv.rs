//! Key-value backend contract and implementations.

use super::{open_db, open_db_in_memory, BackendError, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

/// Whole-value string storage keyed by collection name.
pub trait KeyValueBackend {
    /// Returns the value stored under `key`, or `None` when never written.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;
    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError>;
    /// Removes `key`; missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<(), BackendError>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &mut B {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        (**self).remove(key)
    }
}

/// SQLite-backed durable key-value storage.
pub struct SqliteKeyValueBackend {
    conn: Connection,
}

impl SqliteKeyValueBackend {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl KeyValueBackend for SqliteKeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-process key-value storage.
///
/// `fail_writes` makes every `set` fail, which lets callers exercise
/// storage-full paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueBackend {
    entries: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryKeyValueBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueBackend for MemoryKeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        if self.fail_writes {
            return Err(BackendError::Unavailable(format!(
                "write to `{key}` rejected"
            )));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        self.entries.remove(key);
        Ok(())
    }
}
