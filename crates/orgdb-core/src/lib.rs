//! orgdb Core - domain models and shared facilities
//!
//! This crate provides:
//! - `Department` and `Employee` models whose invariants hold at all times
//!   (validated constructors and setters)
//! - The `DepartmentLookup` seam used to check employee references
//! - Field validation rules
//! - The error facility (`OrgError`, `ExError`, `ExErrorKind`)
//! - The structured logging facility
//!
//! Persistence lives in `orgdb-store`.

pub mod errors;
pub mod logging_facility;
pub mod lookup;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, OrgError, Result};
pub use lookup::{DepartmentLookup, KnownDepartments};
pub use model::{Department, Employee};
