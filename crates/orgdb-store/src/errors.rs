//! Error handling for orgdb-store
//!
//! Wraps orgdb-core ExError with store-specific helpers

use orgdb_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a rusqlite error raised while running `op` against `table`
pub fn sql_error(op: &'static str, table: &'static str) -> impl FnOnce(rusqlite::Error) -> ExError {
    move |err| from_rusqlite(err).with_op(op).with_entity(table)
}

/// Update or delete was requested for an instance that was never saved
pub fn not_persisted(op: &'static str, table: &'static str) -> ExError {
    ExError::new(ExErrorKind::NotPersisted)
        .with_op(op)
        .with_entity(table)
        .with_message(format!("{} instance has no id; save it first", table))
}

/// A live instance is borrowed by the caller while the store needs it
pub fn borrow_conflict(table: &'static str, id: Option<i64>) -> ExError {
    let err = ExError::new(ExErrorKind::Concurrency)
        .with_entity(table)
        .with_message("instance is currently borrowed elsewhere");
    match id {
        Some(id) => err.with_entity_id(id),
        None => err,
    }
}

/// A row decoded without a primary key
pub fn missing_row_id(table: &'static str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_entity(table)
        .with_message("decoded row has no id")
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
