#![allow(dead_code)]

use orgdb_store::{db, DepartmentRepo, EmployeeRepo};
use rusqlite::Connection;

/// In-memory database with both tables defined
pub fn setup_db() -> Connection {
    let conn = db::open_in_memory().unwrap();
    {
        let departments = DepartmentRepo::new(&conn);
        let employees = EmployeeRepo::new(&departments);
        departments.define_schema().unwrap();
        employees.define_schema().unwrap();
    }
    conn
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}

/// Raw department row, bypassing the repos
pub fn department_row(conn: &Connection, id: i64) -> Option<(i64, String, String)> {
    conn.query_row(
        "SELECT id, name, location FROM departments WHERE id = ?1",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .ok()
}

/// Raw employee row, bypassing the repos
pub fn employee_row(conn: &Connection, id: i64) -> Option<(i64, String, String, i64)> {
    conn.query_row(
        "SELECT id, name, job_title, department_id FROM employees WHERE id = ?1",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
    )
    .ok()
}
