#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-only `DuckDB` access for the building map tile server.
//!
//! The buildings database is a pre-built, read-only `DuckDB` file with the
//! `spatial` extension. Connections are opened once at startup and shared by
//! all requests through a small round-robin pool; nothing in the serving
//! path ever writes to the store.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use duckdb::Connection;

/// Errors that can occur while opening or querying the buildings database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// `DuckDB` error.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),
}

/// Opens a read-only connection to the buildings `DuckDB` at `path` and
/// loads the `spatial` extension.
///
/// # Errors
///
/// Returns [`DbError`] if the file cannot be opened read-only or the
/// `spatial` extension is not available.
pub fn open_read_only(path: &Path) -> Result<Connection, DbError> {
    let config = duckdb::Config::default().access_mode(duckdb::AccessMode::ReadOnly)?;
    let conn = Connection::open_with_flags(path, config)?;

    conn.execute_batch("LOAD spatial;")?;

    Ok(conn)
}

/// Simple round-robin pool of read-only `DuckDB` connections.
///
/// `duckdb::Connection` is `Send` but not `Sync`, so each connection is
/// wrapped in a `Mutex`. The pool hands out connections round-robin via
/// an atomic counter, allowing concurrent queries on different
/// connections.
pub struct DuckDbPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl DuckDbPool {
    /// Opens `size` read-only connections to the `DuckDB` file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any connection fails to open.
    pub fn new(path: &Path, size: usize) -> Result<Self, DbError> {
        let connections = (0..size)
            .map(|_| open_read_only(path))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Opened {} read-only DuckDB connections to {}",
            connections.len(),
            path.display()
        );

        Ok(Self::from_connections(connections))
    }

    /// Builds a pool from pre-opened connections (e.g. in-memory
    /// connections in tests).
    ///
    /// # Panics
    ///
    /// Panics if `connections` is empty.
    #[must_use]
    pub fn from_connections(connections: Vec<Connection>) -> Self {
        assert!(
            !connections.is_empty(),
            "DuckDbPool requires at least one connection"
        );
        Self {
            connections: connections.into_iter().map(Mutex::new).collect(),
            next: AtomicUsize::new(0),
        }
    }

    /// Acquires the next connection from the pool (round-robin).
    ///
    /// # Panics
    ///
    /// Panics if the `Mutex` is poisoned.
    pub fn acquire(&self) -> std::sync::MutexGuard<'_, Connection> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        self.connections[idx]
            .lock()
            .expect("DuckDB pool mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_rotates_through_connections() {
        let connections = (0..3)
            .map(|_| Connection::open_in_memory().expect("in-memory connection"))
            .collect();
        let pool = DuckDbPool::from_connections(connections);

        // Three sequential acquires must hit three distinct connections.
        for _ in 0..3 {
            let conn = pool.acquire();
            let one: i64 = conn
                .prepare("SELECT 1")
                .and_then(|mut stmt| stmt.query_row([], |row| row.get(0)))
                .expect("trivial query");
            assert_eq!(one, 1);
        }
    }

    #[test]
    #[should_panic(expected = "at least one connection")]
    fn empty_pool_is_rejected() {
        let _ = DuckDbPool::from_connections(Vec::new());
    }

    #[test]
    fn open_read_only_fails_for_missing_file() {
        let result = open_read_only(Path::new("/nonexistent/buildings.duckdb"));
        assert!(result.is_err());
    }
}
