//! Repository layer
//!
//! `DepartmentRepo` and `EmployeeRepo` are the caller-facing managers. Each
//! owns an identity map; both borrow the same connection.

pub mod department_repo;
pub mod employee_repo;
pub mod identity_map;
pub mod record;
pub mod table;

pub use department_repo::DepartmentRepo;
pub use employee_repo::EmployeeRepo;
pub use identity_map::{IdentityMap, Live};
pub use record::Record;
pub use table::Table;

use orgdb_core::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

use crate::errors::Result;

/// Run a mutating operation between start and end/end_error events
pub(crate) fn logged<T>(
    op: &'static str,
    table: &'static str,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let started = Instant::now();
    log_op_start!(op, table = table);

    let result = f();

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &result {
        Ok(_) => log_op_end!(op, duration_ms = duration_ms, table = table),
        Err(err) => log_op_error!(op, err.clone(), duration_ms = duration_ms, table = table),
    }
    result
}
