//! Seed command
//!
//! Usage: orgdb seed

use orgdb_store::seed::seed_fixture;
use orgdb_store::{DepartmentRepo, EmployeeRepo};

use super::{CommandResult, Context};

/// Drop, recreate and fill both tables with the fixture
pub fn execute(ctx: &Context) -> CommandResult {
    let conn = ctx.open()?;
    let departments = DepartmentRepo::new(&conn);
    let employees = EmployeeRepo::new(&departments);

    let summary = seed_fixture(&departments, &employees)?;

    ctx.print_message(
        &format!(
            "✓ Seeded {} departments and {} employees",
            summary.departments, summary.employees
        ),
        serde_json::json!({
            "departments": summary.departments,
            "employees": summary.employees,
        }),
    )
}
