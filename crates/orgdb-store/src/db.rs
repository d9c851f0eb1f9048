//! Database connection management
//!
//! Provides utilities for opening and configuring the single SQLite
//! connection shared by both repos

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path with the default configuration
///
/// The bundled SQLite enforces foreign keys unless told otherwise, so the
/// default settings are applied explicitly.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn, &StoreConfig::default())?;
    Ok(conn)
}

/// Open an in-memory SQLite database with the default configuration
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn, &StoreConfig::default())?;
    Ok(conn)
}

/// Open and configure a connection as described by `config`
///
/// Missing parent directories of a file-backed database are created.
pub fn open_with(config: &StoreConfig) -> Result<Connection> {
    let conn = match config.path() {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
            }
            open(path)?
        }
        None => open_in_memory()?,
    };
    configure(&conn, config)?;
    tracing::debug!(
        path = ?config.path(),
        enforce_foreign_keys = config.enforce_foreign_keys,
        "opened store"
    );
    Ok(conn)
}

/// Apply connection-level settings
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    let pragma = if config.enforce_foreign_keys {
        "PRAGMA foreign_keys = ON;"
    } else {
        "PRAGMA foreign_keys = OFF;"
    };
    conn.execute_batch(pragma).map_err(from_rusqlite)
}

/// Whether the engine currently enforces foreign keys on this connection
pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool> {
    conn.query_row("PRAGMA foreign_keys", [], |row| row.get::<_, i64>(0))
        .map(|v| v != 0)
        .map_err(from_rusqlite)
}

/// Whether a table with this name exists
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [table],
        |row| row.get::<_, bool>(0),
    )
    .map_err(from_rusqlite)
}
