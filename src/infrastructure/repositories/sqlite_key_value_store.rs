use crate::domain::{
    error::{DomainError, DomainResult},
    repositories::KeyValueStore,
};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::{
    env,
    path::{Path, PathBuf},
};

use tracing::debug;

const DB_PATH_ENV: &str = "MARKETFEED_DB_PATH";

/// Device-local key-value store backed by a single SQLite table.
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    connection: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    pub fn new<P: AsRef<Path>>(path: P) -> DomainResult<Self> {
        let connection = Connection::open(path)
            .map_err(|e| DomainError::PersistenceError(format!("Failed to open database: {}", e)))?;

        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS key_value_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                [],
            )
            .map_err(|e| DomainError::PersistenceError(format!("Failed to create table: {}", e)))?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> DomainResult<Self> {
        Self::new(":memory:")
    }

    /// Opens the store at `MARKETFEED_DB_PATH`, or at [`Self::default_path`]
    /// when that is unset.
    pub fn open_default() -> DomainResult<Self> {
        let path = match env::var_os(DB_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::default_path()?,
        };
        debug!(path = %path.display(), "Opening key-value store");
        Self::new(path)
    }

    /// `<data dir>/marketfeed/state.db`, creating the directory if needed.
    pub fn default_path() -> DomainResult<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "marketfeed", "marketfeed").ok_or_else(
            || DomainError::ConfigurationError("Failed to get project directories".to_string()),
        )?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join("state.db"))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let conn = self.connection.lock();
        let value = conn
            .query_row(
                "SELECT value FROM key_value_store WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let conn = self.connection.lock();
        conn.execute(
            "INSERT OR REPLACE INTO key_value_store (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
