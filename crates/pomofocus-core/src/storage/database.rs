//! SQLite-backed snapshot storage.
//!
//! A single key-value table holds the task list, the focus history and the
//! timer engine snapshot as JSON strings, each under a fixed key.

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, SnapshotStore};
use crate::error::StorageError;

/// SQLite database for snapshot storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/pomofocus.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("pomofocus.db");
        let conn =
            Connection::open(&path).map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl SnapshotStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.kv_get(key).map_err(StorageError::from)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.kv_set(key, value).map_err(StorageError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("tasks").unwrap(), None);
        db.kv_set("tasks", "[]").unwrap();
        assert_eq!(db.kv_get("tasks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn kv_set_overwrites_full_snapshot() {
        let db = Database::open_memory().unwrap();
        db.kv_set("focus_history", r#"[{"date":"2026-08-05","completed":1}]"#)
            .unwrap();
        db.kv_set("focus_history", r#"[{"date":"2026-08-05","completed":2}]"#)
            .unwrap();
        assert_eq!(
            db.kv_get("focus_history").unwrap().as_deref(),
            Some(r#"[{"date":"2026-08-05","completed":2}]"#)
        );
    }

    #[test]
    fn open_creates_schema_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        // data_dir() honors the override; keep the guard alive for the test.
        std::env::set_var("POMOFOCUS_DATA_DIR", dir.path());
        let db = Database::open().unwrap();
        db.kv_set("tasks", "[]").unwrap();
        drop(db);
        let db = Database::open().unwrap();
        assert_eq!(db.kv_get("tasks").unwrap().as_deref(), Some("[]"));
        std::env::remove_var("POMOFOCUS_DATA_DIR");
    }
}
