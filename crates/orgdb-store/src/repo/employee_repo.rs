//! Employee manager

use orgdb_core::model::employee::ensure_department;
use orgdb_core::{Department, Employee};

use super::department_repo::DepartmentRepo;
use super::identity_map::Live;
use super::logged;
use super::record::Record;
use super::table::Table;
use crate::errors::{not_persisted, Result};

/// Validation, persistence and retrieval for employees
///
/// Holds the department repo as its collaborator: every write checks the
/// department reference through it, and `department_of` resolves references
/// to cache-backed departments.
pub struct EmployeeRepo<'c> {
    table: Table<'c, Employee>,
    departments: &'c DepartmentRepo<'c>,
}

impl<'c> EmployeeRepo<'c> {
    /// Employees share the department repo's connection
    pub fn new(departments: &'c DepartmentRepo<'c>) -> Self {
        Self {
            table: Table::new(departments.conn()),
            departments,
        }
    }

    pub(crate) fn table(&self) -> &Table<'c, Employee> {
        &self.table
    }

    pub fn departments(&self) -> &'c DepartmentRepo<'c> {
        self.departments
    }

    /// Create the `employees` table if it does not exist
    pub fn define_schema(&self) -> Result<()> {
        logged("employee.define_schema", Employee::TABLE, || {
            self.table.define_schema()
        })
    }

    /// Drop the `employees` table if it exists
    ///
    /// Cached instances lose their ids and the identity map is reset.
    pub fn drop_schema(&self) -> Result<()> {
        logged("employee.drop_schema", Employee::TABLE, || {
            self.table.drop_schema()
        })
    }

    /// Validate, insert and return a new employee
    ///
    /// # Errors
    /// * `InvalidName` / `InvalidJobTitle` - Nothing is written
    /// * `InvalidReference` - If no department with `department_id` exists;
    ///   nothing is written
    pub fn create(
        &self,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Live<Employee>> {
        logged("employee.create", Employee::TABLE, || {
            let employee = Live::new(Employee::new(
                name,
                job_title,
                department_id,
                self.departments,
            )?);
            self.table.insert(&employee)?;
            Ok(employee)
        })
    }

    /// Insert an unsaved employee, assigning its id
    ///
    /// The department reference is checked again, since the department may
    /// have been deleted since the employee was constructed.
    ///
    /// # Errors
    /// * `InvalidReference` - If the department no longer exists
    /// * `AlreadyPersisted` - If it already has an id
    pub fn save(&self, employee: &Live<Employee>) -> Result<()> {
        logged("employee.save", Employee::TABLE, || {
            self.check_reference(employee)?;
            self.table.insert(employee).map(|_| ())
        })
    }

    /// Write the current field values to the employee's row
    ///
    /// # Errors
    /// * `NotPersisted` - If it has no id
    /// * `InvalidReference` - If the department no longer exists
    pub fn update(&self, employee: &Live<Employee>) -> Result<()> {
        logged("employee.update", Employee::TABLE, || {
            if employee.try_read()?.id().is_none() {
                return Err(not_persisted("update", Employee::TABLE));
            }
            self.check_reference(employee)?;
            let changed = self.table.update(employee)?;
            if changed == 0 {
                tracing::warn!(record_id = ?employee.id(), "update matched no employee row");
            }
            Ok(())
        })
    }

    /// Delete the employee's row, evict it and clear its id
    ///
    /// # Errors
    /// * `NotPersisted` - If it has no id
    pub fn delete(&self, employee: &Live<Employee>) -> Result<()> {
        logged("employee.delete", Employee::TABLE, || {
            self.table.delete(employee).map(|_| ())
        })
    }

    /// Move `employee` to another department, checking the reference
    ///
    /// Only the in-memory instance changes; call `update` to persist.
    ///
    /// # Errors
    /// * `InvalidReference` - If no department with `department_id` exists
    pub fn reassign(&self, employee: &Live<Employee>, department_id: i64) -> Result<()> {
        employee.modify(|e| e.set_department_id(department_id, self.departments))
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Live<Employee>>> {
        self.table.find_by_id(id)
    }

    /// First employee (lowest id) with exactly this name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Live<Employee>>> {
        self.table.find_first_by("name", &name)
    }

    /// Every employee, in store order
    pub fn get_all(&self) -> Result<Vec<Live<Employee>>> {
        let all = self.table.select_all()?;
        tracing::debug!(row_count = all.len(), "employees loaded");
        Ok(all)
    }

    /// The employee's department, resolved through the department identity map
    ///
    /// Absent if the department row has been deleted.
    pub fn department_of(&self, employee: &Live<Employee>) -> Result<Option<Live<Department>>> {
        let department_id = employee.try_read()?.department_id();
        self.departments.find_by_id(department_id)
    }

    /// Number of cached employee instances
    pub fn cached_len(&self) -> usize {
        self.table.identities().len()
    }

    /// Forget every cached instance
    pub fn clear_cache(&self) {
        self.table.identities().clear();
    }

    fn check_reference(&self, employee: &Live<Employee>) -> Result<()> {
        let department_id = employee.try_read()?.department_id();
        ensure_department(self.departments, department_id)?;
        Ok(())
    }
}
