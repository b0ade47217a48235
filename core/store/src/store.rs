//! Connection handle for a credential store.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::debug;

use credsync_common::{Error, Result};

/// A handle to one credential store database.
///
/// Opened once per sync operation (against a staged copy, never the
/// original) and explicitly closed before the underlying file is deleted.
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Open a store database file.
    ///
    /// # Errors
    /// - The file cannot be opened as a SQLite database
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .map_err(|e| Error::Read(format!("failed to open {}: {}", path.display(), e)))?;
        debug!("Opened store at {}", path.display());
        Ok(Self { conn, path })
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Read(format!("failed to open in-memory store: {}", e)))?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    /// Path this store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the connection, surfacing any pending failure.
    ///
    /// Must be called before the underlying staged file is deleted; dropping
    /// a `Store` also closes the connection but swallows errors.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, e)| Error::Write(format!("failed to close {}: {}", path.display(), e)))?;
        debug!("Closed store at {}", path.display());
        Ok(())
    }

    /// Raw connection access for the store-layer modules.
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Mutable connection access, needed to start transactions.
    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
