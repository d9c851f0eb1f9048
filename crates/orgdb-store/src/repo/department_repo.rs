//! Department manager

use orgdb_core::{Department, DepartmentLookup, Employee, OrgError};

use super::employee_repo::EmployeeRepo;
use super::identity_map::Live;
use super::logged;
use super::record::Record;
use super::table::Table;
use crate::errors::Result;

/// Validation, persistence and retrieval for departments
///
/// Owns the department identity map: within one repo, every lookup of the
/// same row yields the same `Live<Department>`.
pub struct DepartmentRepo<'c> {
    table: Table<'c, Department>,
}

impl<'c> DepartmentRepo<'c> {
    pub fn new(conn: &'c rusqlite::Connection) -> Self {
        Self {
            table: Table::new(conn),
        }
    }

    pub(crate) fn conn(&self) -> &'c rusqlite::Connection {
        self.table.conn()
    }

    /// Create the `departments` table if it does not exist
    pub fn define_schema(&self) -> Result<()> {
        logged("department.define_schema", Department::TABLE, || {
            self.table.define_schema()
        })
    }

    /// Drop the `departments` table if it exists
    ///
    /// Cached instances lose their ids and the identity map is reset.
    pub fn drop_schema(&self) -> Result<()> {
        logged("department.drop_schema", Department::TABLE, || {
            self.table.drop_schema()
        })
    }

    /// Validate, insert and return a new department
    ///
    /// # Errors
    /// * `InvalidName` / `InvalidLocation` - Nothing is written
    /// * `Persistence` - If the insert fails
    pub fn create(
        &self,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Live<Department>> {
        logged("department.create", Department::TABLE, || {
            let department = Live::new(Department::new(name, location)?);
            self.table.insert(&department)?;
            Ok(department)
        })
    }

    /// Insert an unsaved department, assigning its id
    ///
    /// # Errors
    /// * `AlreadyPersisted` - If it already has an id
    pub fn save(&self, department: &Live<Department>) -> Result<()> {
        logged("department.save", Department::TABLE, || {
            self.table.insert(department).map(|_| ())
        })
    }

    /// Write the current field values to the department's row
    ///
    /// # Errors
    /// * `NotPersisted` - If it has no id
    pub fn update(&self, department: &Live<Department>) -> Result<()> {
        logged("department.update", Department::TABLE, || {
            let changed = self.table.update(department)?;
            if changed == 0 {
                tracing::warn!(record_id = ?department.id(), "update matched no department row");
            }
            Ok(())
        })
    }

    /// Delete the department's row, evict it and clear its id
    ///
    /// Employees are not touched. With foreign keys enforced by the store the
    /// delete fails while employees still reference the department.
    ///
    /// # Errors
    /// * `NotPersisted` - If it has no id
    pub fn delete(&self, department: &Live<Department>) -> Result<()> {
        logged("department.delete", Department::TABLE, || {
            self.table.delete(department).map(|_| ())
        })
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Live<Department>>> {
        self.table.find_by_id(id)
    }

    /// First department (lowest id) with exactly this name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Live<Department>>> {
        self.table.find_first_by("name", &name)
    }

    /// Every department, in store order
    pub fn get_all(&self) -> Result<Vec<Live<Department>>> {
        let all = self.table.select_all()?;
        tracing::debug!(row_count = all.len(), "departments loaded");
        Ok(all)
    }

    /// Whether a department row exists, without refreshing cached instances
    pub fn exists(&self, id: i64) -> Result<bool> {
        self.table.exists(id)
    }

    /// Employees of `department`, in insertion order, via the employee identity map
    ///
    /// An unsaved department owns no employees.
    pub fn employees_of(
        &self,
        employees: &EmployeeRepo<'_>,
        department: &Live<Department>,
    ) -> Result<Vec<Live<Employee>>> {
        match department.try_read()?.id() {
            Some(id) => employees.table().select_where("department_id", &id),
            None => Ok(Vec::new()),
        }
    }

    /// Detached copies of the employees of `department`
    ///
    /// Read-only fast path: the copies are not registered in the employee
    /// identity map and do not observe or affect cached instances.
    pub fn employee_snapshots(
        &self,
        employees: &EmployeeRepo<'_>,
        department: &Live<Department>,
    ) -> Result<Vec<Employee>> {
        match department.try_read()?.id() {
            Some(id) => employees
                .table()
                .select_detached_where("department_id", &id),
            None => Ok(Vec::new()),
        }
    }

    /// Number of cached department instances
    pub fn cached_len(&self) -> usize {
        self.table.identities().len()
    }

    /// Forget every cached instance
    pub fn clear_cache(&self) {
        self.table.identities().clear();
    }
}

impl DepartmentLookup for DepartmentRepo<'_> {
    fn department_exists(&self, department_id: i64) -> orgdb_core::Result<bool> {
        self.exists(department_id).map_err(OrgError::from)
    }
}
