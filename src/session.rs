//! Session management.
//!
//! A repository is constructed with a [`SessionFactory`] and opens one
//! short-lived [`Session`] per public operation. The session is a scoped
//! lock over the underlying connection; dropping it releases the scope on
//! every exit path, including error paths. Sessions are never held across
//! calls.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::Connection;

use crate::error::{LarderError, Result};

/// Injected session-factory capability.
///
/// Owns the store connection and hands out per-call sessions. Cloning the
/// factory shares the same connection, so repositories for different
/// entity types can run against one store.
#[derive(Clone)]
pub struct SessionFactory {
    db: Arc<Mutex<Connection>>,
}

impl SessionFactory {
    /// Opens (or creates) a database file.
    ///
    /// WAL mode is enabled for better concurrent access.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| LarderError::Session(e.to_string()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| LarderError::Session(e.to_string()))?;

        Ok(Self::from_connection(conn))
    }

    /// Opens an in-memory database. Useful for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LarderError::Session(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Acquires a session for one operation.
    pub fn session(&self) -> Result<Session<'_>> {
        let guard = self
            .db
            .lock()
            .map_err(|_| LarderError::Session("connection lock poisoned".to_string()))?;
        Ok(Session { guard })
    }
}

/// A scoped session over the store connection.
///
/// Held for the duration of exactly one repository operation.
pub struct Session<'f> {
    guard: MutexGuard<'f, Connection>,
}

impl Session<'_> {
    /// The connection backing this session.
    pub fn conn(&self) -> &Connection {
        &self.guard
    }

    /// Begins a transaction covering the rest of this session.
    ///
    /// Dropping the transaction without committing rolls back everything
    /// executed inside it.
    pub fn transaction(&mut self) -> Result<rusqlite::Transaction<'_>> {
        Ok(self.guard.transaction()?)
    }
}
