use crate::sql::error::DbError;
use rusqlite::{Connection, DatabaseName, OpenFlags};
use std::path::Path;
use tracing::debug;

/// Owns the connection to a file-backed SQLite store.
pub struct SqliteAdapter {
    conn: Connection,
}

impl SqliteAdapter {
    /// Opens (creating if needed) the database file for writing.
    ///
    /// Fails if the file cannot be created or is only readable, so nothing is
    /// read from the input before the store is known to be writable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref().display().to_string();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&path, flags).map_err(|source| DbError::Open {
            path: path.clone(),
            source,
        })?;

        if conn.is_readonly(DatabaseName::Main)? {
            return Err(DbError::ReadOnly(path));
        }

        debug!(path = %path, "Opened SQLite database");
        Ok(SqliteAdapter { conn })
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}
