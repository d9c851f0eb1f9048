//! Generic table access
//!
//! Statements and identity-map bookkeeping shared by both repos. Every row
//! that leaves this module as a `Live<T>` has gone through the identity map.

use orgdb_core::errors::{ExError, OrgError};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, ToSql};

use super::identity_map::{IdentityMap, Live};
use super::record::Record;
use crate::errors::{missing_row_id, not_persisted, sql_error, Result};

pub struct Table<'c, T: Record> {
    conn: &'c Connection,
    identities: IdentityMap<T>,
}

impl<'c, T: Record> Table<'c, T> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            identities: IdentityMap::new(),
        }
    }

    pub fn conn(&self) -> &'c Connection {
        self.conn
    }

    pub fn identities(&self) -> &IdentityMap<T> {
        &self.identities
    }

    fn select_columns() -> String {
        format!("id, {}", T::COLUMNS.join(", "))
    }

    pub fn define_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(T::DDL)
            .map_err(sql_error("define_schema", T::TABLE))
    }

    /// Drop the table and detach every cached instance
    ///
    /// Ids restart once the table is recreated, so handles from before the
    /// drop must not keep claiming rows.
    ///
    /// # Errors
    /// * `Concurrency` - If a cached instance is borrowed; nothing is dropped
    pub fn drop_schema(&self) -> Result<()> {
        let cached = self.identities.handles();
        let mut guards = cached
            .iter()
            .map(|live| live.try_write())
            .collect::<Result<Vec<_>>>()?;

        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {};", T::TABLE))
            .map_err(sql_error("drop_schema", T::TABLE))?;

        for guard in guards.iter_mut() {
            guard.mark_detached();
        }
        drop(guards);
        self.identities.clear();
        Ok(())
    }

    /// Insert an unsaved instance and register it under the new id
    ///
    /// # Errors
    /// * `AlreadyPersisted` - If the instance already has an id
    /// * `Persistence` - If the insert fails
    /// * `Concurrency` - If the instance is borrowed; nothing is written
    pub fn insert(&self, instance: &Live<T>) -> Result<i64> {
        let mut current = instance.try_write()?;
        if let Some(id) = current.id() {
            return Err(OrgError::AlreadyPersisted {
                entity: T::TABLE,
                id,
            }
            .into());
        }
        let values = current.values();

        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        );
        self.conn
            .execute(&sql, params_from_iter(values))
            .map_err(sql_error("insert", T::TABLE))?;

        let id = self.conn.last_insert_rowid();
        current.mark_persisted(id)?;
        drop(current);
        self.identities.register(id, instance.clone());
        Ok(id)
    }

    /// Overwrite the row for a saved instance with its current values
    ///
    /// Returns the number of rows changed (0 if the row no longer exists).
    ///
    /// # Errors
    /// * `NotPersisted` - If the instance has no id
    pub fn update(&self, instance: &Live<T>) -> Result<usize> {
        let (id, mut values) = {
            let current = instance.try_read()?;
            let id = current.id().ok_or_else(|| not_persisted("update", T::TABLE))?;
            (id, current.values())
        };
        values.push(Value::Integer(id));

        let assignments = T::COLUMNS
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", T::TABLE, assignments);
        self.conn
            .execute(&sql, params_from_iter(values))
            .map_err(sql_error("update", T::TABLE))
    }

    /// Delete the row, evict the instance and clear its id
    ///
    /// # Errors
    /// * `NotPersisted` - If the instance has no id
    /// * `Concurrency` - If the instance is borrowed; nothing is deleted
    pub fn delete(&self, instance: &Live<T>) -> Result<usize> {
        let mut current = instance.try_write()?;
        let id = current
            .id()
            .ok_or_else(|| not_persisted("delete", T::TABLE))?;

        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let removed = self
            .conn
            .execute(&sql, [id])
            .map_err(sql_error("delete", T::TABLE))?;

        current.mark_detached();
        drop(current);
        self.identities.evict(id);
        Ok(removed)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Live<T>>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            Self::select_columns(),
            T::TABLE
        );
        let raw = self
            .conn
            .query_row(&sql, [id], T::read_row)
            .optional()
            .map_err(sql_error("find_by_id", T::TABLE))?;
        raw.map(|raw| self.materialize(raw)).transpose()
    }

    /// First row (lowest id) whose `column` equals `value`
    pub fn find_first_by(&self, column: &'static str, value: &dyn ToSql) -> Result<Option<Live<T>>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ? ORDER BY id LIMIT 1",
            Self::select_columns(),
            T::TABLE,
            column
        );
        let raw = self
            .conn
            .query_row(&sql, [value], T::read_row)
            .optional()
            .map_err(sql_error("find_first_by", T::TABLE))?;
        raw.map(|raw| self.materialize(raw)).transpose()
    }

    /// All rows in store order
    pub fn select_all(&self) -> Result<Vec<Live<T>>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            Self::select_columns(),
            T::TABLE
        );
        self.query_raw(&sql, &[])?
            .into_iter()
            .map(|raw| self.materialize(raw))
            .collect()
    }

    /// Rows whose `column` equals `value`, in store order
    pub fn select_where(&self, column: &'static str, value: &dyn ToSql) -> Result<Vec<Live<T>>> {
        self.select_raw_where(column, value)?
            .into_iter()
            .map(|raw| self.materialize(raw))
            .collect()
    }

    /// Like `select_where` but returns detached values that bypass the identity map
    pub fn select_detached_where(&self, column: &'static str, value: &dyn ToSql) -> Result<Vec<T>> {
        self.select_raw_where(column, value)?
            .into_iter()
            .map(|raw| T::from_raw(raw).map_err(ExError::from))
            .collect()
    }

    /// Whether a row with this id exists; does not touch the identity map
    pub fn exists(&self, id: i64) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", T::TABLE);
        self.conn
            .query_row(&sql, [id], |row| row.get::<_, bool>(0))
            .map_err(sql_error("exists", T::TABLE))
    }

    fn select_raw_where(&self, column: &'static str, value: &dyn ToSql) -> Result<Vec<T::Raw>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ? ORDER BY id",
            Self::select_columns(),
            T::TABLE,
            column
        );
        self.query_raw(&sql, &[value])
    }

    fn query_raw(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<T::Raw>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(sql_error("select", T::TABLE))?;
        let rows = stmt
            .query_map(params, T::read_row)
            .map_err(sql_error("select", T::TABLE))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sql_error("select", T::TABLE))?;
        Ok(rows)
    }

    fn materialize(&self, raw: T::Raw) -> Result<Live<T>> {
        let fresh = T::from_raw(raw)?;
        let id = fresh.id().ok_or_else(|| missing_row_id(T::TABLE))?;
        self.identities.refresh_or_register(id, fresh)
    }
}
