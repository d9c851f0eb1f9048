//! Row mapping for persisted models
//!
//! `Record` describes how one model maps onto one table. Everything generic
//! about persistence (statements, identity map bookkeeping) is written once
//! in [`super::table::Table`] against this trait.

use orgdb_core::{Department, Employee};
use rusqlite::types::Value;
use rusqlite::Row;

/// A model stored as one row of one table
pub trait Record: Sized {
    /// Table name
    const TABLE: &'static str;

    /// Data columns in bind order, excluding `id`
    const COLUMNS: &'static [&'static str];

    /// `CREATE TABLE IF NOT EXISTS` statement
    const DDL: &'static str;

    /// Column values read straight off a row, before validation
    type Raw;

    fn id(&self) -> Option<i64>;

    fn mark_persisted(&mut self, id: i64) -> orgdb_core::Result<()>;

    fn mark_detached(&mut self);

    /// Data column values in `COLUMNS` order
    fn values(&self) -> Vec<Value>;

    /// Decode `id` followed by `COLUMNS`
    fn read_row(row: &Row<'_>) -> rusqlite::Result<Self::Raw>;

    /// Validate a decoded row into a saved instance
    fn from_raw(raw: Self::Raw) -> orgdb_core::Result<Self>;
}

impl Record for Department {
    const TABLE: &'static str = Department::ENTITY;
    const COLUMNS: &'static [&'static str] = &["name", "location"];
    const DDL: &'static str = "CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY,
            name TEXT,
            location TEXT)";

    type Raw = (i64, String, String);

    fn id(&self) -> Option<i64> {
        Department::id(self)
    }

    fn mark_persisted(&mut self, id: i64) -> orgdb_core::Result<()> {
        Department::mark_persisted(self, id)
    }

    fn mark_detached(&mut self) {
        Department::mark_detached(self)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.location().to_string()),
        ]
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<Self::Raw> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    }

    fn from_raw((id, name, location): Self::Raw) -> orgdb_core::Result<Self> {
        let mut department = Department::new(name, location)?;
        department.mark_persisted(id)?;
        Ok(department)
    }
}

impl Record for Employee {
    const TABLE: &'static str = Employee::ENTITY;
    const COLUMNS: &'static [&'static str] = &["name", "job_title", "department_id"];
    const DDL: &'static str = "CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            name TEXT,
            job_title TEXT,
            department_id INTEGER,
            FOREIGN KEY (department_id) REFERENCES departments(id))";

    type Raw = (i64, String, String, i64);

    fn id(&self) -> Option<i64> {
        Employee::id(self)
    }

    fn mark_persisted(&mut self, id: i64) -> orgdb_core::Result<()> {
        Employee::mark_persisted(self, id)
    }

    fn mark_detached(&mut self) {
        Employee::mark_detached(self)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.job_title().to_string()),
            Value::Integer(self.department_id()),
        ]
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<Self::Raw> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn from_raw((id, name, job_title, department_id): Self::Raw) -> orgdb_core::Result<Self> {
        Employee::from_stored(id, name, job_title, department_id)
    }
}
