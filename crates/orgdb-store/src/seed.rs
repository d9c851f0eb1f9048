//! Fixture seed
//!
//! Rebuilds both tables and fills them with a fixed, deterministic data set.

use crate::errors::Result;
use crate::repo::{DepartmentRepo, EmployeeRepo};

/// (name, location)
pub const FIXTURE_DEPARTMENTS: [(&str, &str); 2] = [
    ("Payroll", "Building A, 5th Floor"),
    ("Human Resources", "Building C, East Wing"),
];

/// (name, job title, index into `FIXTURE_DEPARTMENTS`)
pub const FIXTURE_EMPLOYEES: [(&str, &str, usize); 5] = [
    ("Amir Haddad", "Database Administrator", 0),
    ("Bea Lindqvist", "Manager", 1),
    ("Chidi Okafor", "Full-stack Engineer", 0),
    ("Dana Moreau", "Web Designer", 1),
    ("Eitan Shapiro", "Manager", 0),
];

/// Counts of rows written by [`seed_fixture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub departments: usize,
    pub employees: usize,
}

/// Drop and recreate both tables, then insert the fixture
///
/// Employees are dropped before departments and created after them.
pub fn seed_fixture(departments: &DepartmentRepo<'_>, employees: &EmployeeRepo<'_>) -> Result<SeedSummary> {
    employees.drop_schema()?;
    departments.drop_schema()?;
    departments.define_schema()?;
    employees.define_schema()?;

    let mut department_ids = Vec::with_capacity(FIXTURE_DEPARTMENTS.len());
    for (name, location) in FIXTURE_DEPARTMENTS {
        let department = departments.create(name, location)?;
        if let Some(id) = department.id() {
            department_ids.push(id);
        }
    }

    let mut created = 0;
    for (name, job_title, department_index) in FIXTURE_EMPLOYEES {
        if let Some(&department_id) = department_ids.get(department_index) {
            employees.create(name, job_title, department_id)?;
            created += 1;
        }
    }

    tracing::info!(
        departments = department_ids.len(),
        employees = created,
        "seeded fixture"
    );

    Ok(SeedSummary {
        departments: department_ids.len(),
        employees: created,
    })
}
