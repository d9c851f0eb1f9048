use thiserror::Error;

/// Result type alias using OrgError
pub type Result<T> = std::result::Result<T, OrgError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages. The validation kinds are raised before any store
/// mutation; `Persistence` covers everything the store itself rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidName,
    InvalidLocation,
    InvalidJobTitle,
    InvalidReference,

    // Lifecycle
    AlreadyPersisted,
    NotPersisted,

    // Integration/IO
    Persistence,
    Io,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::InvalidLocation => "ERR_INVALID_LOCATION",
            ExErrorKind::InvalidJobTitle => "ERR_INVALID_JOB_TITLE",
            ExErrorKind::InvalidReference => "ERR_INVALID_REFERENCE",
            ExErrorKind::AlreadyPersisted => "ERR_ALREADY_PERSISTED",
            ExErrorKind::NotPersisted => "ERR_NOT_PERSISTED",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for the kinds raised when a field fails its invariant
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidName
                | ExErrorKind::InvalidLocation
                | ExErrorKind::InvalidJobTitle
                | ExErrorKind::InvalidReference
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, entity, record id) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<&'static str>,
    entity_id: Option<i64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (table) context
    pub fn with_entity(mut self, entity: &'static str) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Add record id context
    pub fn with_entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn is_validation(&self) -> bool {
        self.kind.is_validation()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<&'static str> {
        self.entity
    }

    pub fn entity_id(&self) -> Option<i64> {
        self.entity_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(id) = self.entity_id {
            write!(f, " (id: {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for department/employee operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrgError {
    /// Name is empty
    #[error("Name cannot be empty and must be a string")]
    InvalidName,

    /// Location is empty
    #[error("Location cannot be empty and must be a string")]
    InvalidLocation,

    /// Job title is empty
    #[error("job_title cannot be empty and must be a string")]
    InvalidJobTitle,

    /// Department reference does not resolve to a stored department
    #[error("department_id {department_id} must reference an existing department")]
    InvalidReference { department_id: i64 },

    /// Instance already has a store-assigned id
    #[error("{entity} is already persisted with id {id}")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    /// Instance has no store-assigned id
    #[error("{entity} has not been saved")]
    NotPersisted { entity: &'static str },

    /// Store rejected or failed an operation
    #[error("Persistence failure in {op}: {message}")]
    Persistence { op: String, message: String },
}

impl OrgError {
    /// True if this error came from a field invariant or reference check
    pub fn is_validation(&self) -> bool {
        ExErrorKind::from(self).is_validation()
    }
}

impl From<&OrgError> for ExErrorKind {
    fn from(err: &OrgError) -> Self {
        match err {
            OrgError::InvalidName => ExErrorKind::InvalidName,
            OrgError::InvalidLocation => ExErrorKind::InvalidLocation,
            OrgError::InvalidJobTitle => ExErrorKind::InvalidJobTitle,
            OrgError::InvalidReference { .. } => ExErrorKind::InvalidReference,
            OrgError::AlreadyPersisted { .. } => ExErrorKind::AlreadyPersisted,
            OrgError::NotPersisted { .. } => ExErrorKind::NotPersisted,
            OrgError::Persistence { .. } => ExErrorKind::Persistence,
        }
    }
}

impl From<OrgError> for ExError {
    fn from(err: OrgError) -> Self {
        let base = ExError::new(ExErrorKind::from(&err)).with_message(err.to_string());
        match err {
            OrgError::InvalidReference { department_id } => base
                .with_entity("departments")
                .with_entity_id(department_id),
            OrgError::AlreadyPersisted { entity, id } => {
                base.with_entity(entity).with_entity_id(id)
            }
            OrgError::NotPersisted { entity } => base.with_entity(entity),
            OrgError::Persistence { op, .. } => base.with_op(op),
            OrgError::InvalidName | OrgError::InvalidLocation | OrgError::InvalidJobTitle => base,
        }
    }
}

/// Store failures surfacing through a core seam (e.g. `DepartmentLookup`)
impl From<ExError> for OrgError {
    fn from(err: ExError) -> Self {
        OrgError::Persistence {
            op: err.op().unwrap_or("store").to_string(),
            message: err.message().to_string(),
        }
    }
}
