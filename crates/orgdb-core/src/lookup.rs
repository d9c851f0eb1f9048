//! Department reference resolution
//!
//! Employees must reference an existing department at every assignment. The
//! check needs the store, which the core does not own, so it is expressed as
//! a trait implemented by the persistence layer.

use crate::errors::Result;

/// Answers whether a department row exists
pub trait DepartmentLookup {
    /// Returns `true` if a department with this id is currently stored
    ///
    /// # Errors
    /// Returns `Persistence` if the store cannot be queried.
    fn department_exists(&self, department_id: i64) -> Result<bool>;
}

/// Fixed set of known department ids
///
/// Useful where no store is available, e.g. validating input before a
/// connection is opened, and in tests.
#[derive(Debug, Clone, Default)]
pub struct KnownDepartments {
    ids: Vec<i64>,
}

impl KnownDepartments {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl DepartmentLookup for KnownDepartments {
    fn department_exists(&self, department_id: i64) -> Result<bool> {
        Ok(self.ids.contains(&department_id))
    }
}

impl<L: DepartmentLookup + ?Sized> DepartmentLookup for &L {
    fn department_exists(&self, department_id: i64) -> Result<bool> {
        (**self).department_exists(department_id)
    }
}
