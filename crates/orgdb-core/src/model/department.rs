use serde::Serialize;

use crate::errors::{OrgError, Result};
use crate::rules::{validate_location, validate_name};

/// Department - an organisational unit that owns employees
///
/// Fields are private so that `name` and `location` can never be observed
/// empty: both are checked at construction and by every setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    /// Store-assigned primary key, absent until saved
    id: Option<i64>,
    name: String,
    location: String,
}

impl Department {
    pub const ENTITY: &'static str = "departments";

    /// Create an unsaved Department
    ///
    /// # Errors
    /// * `InvalidName` - If name is empty
    /// * `InvalidLocation` - If location is empty
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: None,
            name: validate_name(name)?,
            location: validate_location(location)?,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Replace the name; the current value is kept on failure
    ///
    /// # Errors
    /// * `InvalidName` - If name is empty
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Replace the location; the current value is kept on failure
    ///
    /// # Errors
    /// * `InvalidLocation` - If location is empty
    pub fn set_location(&mut self, location: impl Into<String>) -> Result<()> {
        self.location = validate_location(location)?;
        Ok(())
    }

    /// Record the store-assigned id. Called by the persistence layer.
    ///
    /// # Errors
    /// * `AlreadyPersisted` - If an id is already assigned
    pub fn mark_persisted(&mut self, id: i64) -> Result<()> {
        if let Some(existing) = self.id {
            return Err(OrgError::AlreadyPersisted {
                entity: Self::ENTITY,
                id: existing,
            });
        }
        self.id = Some(id);
        Ok(())
    }

    /// Forget the id after the backing row is deleted
    pub fn mark_detached(&mut self) {
        self.id = None;
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Department {}: {}, {}>", id, self.name, self.location),
            None => write!(f, "<Department unsaved: {}, {}>", self.name, self.location),
        }
    }
}
