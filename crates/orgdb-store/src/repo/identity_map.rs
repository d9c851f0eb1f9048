//! Identity map
//!
//! Keeps at most one live in-memory instance per stored row. Handles are
//! shared (`Rc<RefCell<_>>`), so a mutation through one handle is observed
//! through every other handle to the same row.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use orgdb_core::errors::ExError;

use super::record::Record;
use crate::errors::{borrow_conflict, Result};

/// Shared handle to a cached instance
pub struct Live<T>(Rc<RefCell<T>>);

impl<T> Live<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrow the instance
    ///
    /// # Panics
    ///
    /// Panics if a mutable borrow is outstanding; use `try_read` to avoid this.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrow the instance
    ///
    /// # Panics
    ///
    /// Panics if any other borrow is outstanding; use `try_write` to avoid this.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// True if both handles refer to the same instance
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Number of handles currently referring to this instance
    pub fn handle_count(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }
}

impl<T: Record> Live<T> {
    /// The store-assigned id, or `None` when unsaved or currently borrowed mutably
    pub fn id(&self) -> Option<i64> {
        self.0.try_borrow().ok().and_then(|v| v.id())
    }

    pub fn try_read(&self) -> Result<Ref<'_, T>> {
        self.0
            .try_borrow()
            .map_err(|_| borrow_conflict(T::TABLE, None))
    }

    pub fn try_write(&self) -> Result<RefMut<'_, T>> {
        self.0
            .try_borrow_mut()
            .map_err(|_| borrow_conflict(T::TABLE, None))
    }

    /// Apply a validated mutation, e.g. `dept.modify(|d| d.set_name("HR"))`
    ///
    /// # Errors
    /// Returns the mutation's own error converted to `ExError`, or
    /// `Concurrency` if the instance is already borrowed.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> orgdb_core::Result<R>) -> Result<R> {
        let mut guard = self.try_write()?;
        f(&mut *guard).map_err(ExError::from)
    }

    /// Detached copy of the current state
    pub fn snapshot(&self) -> Result<T>
    where
        T: Clone,
    {
        Ok(self.try_read()?.clone())
    }
}

impl<T> Clone for Live<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Live<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => f.debug_tuple("Live").field(&*value).finish(),
            Err(_) => f.write_str("Live(<borrowed>)"),
        }
    }
}

/// Primary key -> live instance, owned by one repo
///
/// There is no eviction besides `evict` (called on delete) and `clear`.
pub struct IdentityMap<T> {
    entries: RefCell<HashMap<i64, Live<T>>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl<T: Record> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<Live<T>> {
        self.entries.borrow().get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Register `live` as the instance for `id`
    pub fn register(&self, id: i64, live: Live<T>) {
        tracing::trace!(table = T::TABLE, record_id = id, "identity registered");
        self.entries.borrow_mut().insert(id, live);
    }

    /// Remove and return the entry for `id`
    pub fn evict(&self, id: i64) -> Option<Live<T>> {
        tracing::trace!(table = T::TABLE, record_id = id, "identity evicted");
        self.entries.borrow_mut().remove(&id)
    }

    /// Every cached handle, in no particular order
    pub fn handles(&self) -> Vec<Live<T>> {
        self.entries.borrow().values().cloned().collect()
    }

    pub fn clear(&self) {
        tracing::debug!(table = T::TABLE, dropped = self.len(), "identity map cleared");
        self.entries.borrow_mut().clear();
    }

    /// Return the instance for a freshly decoded row
    ///
    /// A cached instance is overwritten with the row's values (the row wins
    /// over unsaved local edits) and returned; otherwise `fresh` is wrapped,
    /// registered and returned.
    ///
    /// # Errors
    /// * `Concurrency` - If the cached instance is currently borrowed
    pub fn refresh_or_register(&self, id: i64, fresh: T) -> Result<Live<T>> {
        if let Some(live) = self.get(id) {
            let mut cached = live
                .0
                .try_borrow_mut()
                .map_err(|_| borrow_conflict(T::TABLE, Some(id)))?;
            *cached = fresh;
            drop(cached);
            tracing::trace!(table = T::TABLE, record_id = id, "identity hit");
            return Ok(live);
        }

        tracing::trace!(table = T::TABLE, record_id = id, "identity miss");
        let live = Live::new(fresh);
        self.register(id, live.clone());
        Ok(live)
    }
}
