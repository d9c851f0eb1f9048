//! Store configuration

use std::path::{Path, PathBuf};

/// How to open and configure the SQLite store
///
/// The default is an in-memory database without engine-level foreign key
/// enforcement. Reference checks are done by the repos regardless; turning
/// enforcement on additionally makes SQLite reject deleting a department that
/// still owns employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database file; `None` opens an in-memory database
    pub path: Option<PathBuf>,
    /// Issue `PRAGMA foreign_keys = ON` after opening
    pub enforce_foreign_keys: bool,
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_foreign_keys(mut self, enforce: bool) -> Self {
        self.enforce_foreign_keys = enforce;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
