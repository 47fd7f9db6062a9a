use rusqlite::Connection;
use std::path::Path;

use crate::errors::AppError;

pub const IN_MEMORY: &str = ":memory:";

/// Owns the single SQLite session used for a run.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file. `:memory:` gives a private
    /// in-memory store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if path.as_os_str() == IN_MEMORY {
            return Self::open_in_memory();
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Db(format!("Open DB {} failed: {e}", path.display())))?;

        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Db(format!("Open in-memory DB failed: {e}")))?;
        Ok(Self { conn })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>,
    {
        f(&self.conn)
    }

    /// Provides a mutable connection to the closure, e.g. to open a transaction.
    pub fn with_conn_mut<F, T>(&mut self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        f(&mut self.conn)
    }
}
