//! SQLite-backed key-value store

use crate::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use verbatim_domain::traits::KeyValueStore;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        key   TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    );
";

/// SQLite implementation of [`KeyValueStore`]
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store between tasks by
/// wrapping it in a mutex.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use verbatim_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("verbatim.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), Self::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}
