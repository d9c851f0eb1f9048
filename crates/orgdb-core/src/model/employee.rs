use serde::Serialize;

use crate::errors::{OrgError, Result};
use crate::lookup::DepartmentLookup;
use crate::rules::{validate_job_title, validate_name};

/// Employee - a member of exactly one department
///
/// The owning department is held as a foreign key. Every assignment of that
/// key is checked against a [`DepartmentLookup`], so a freshly constructed or
/// reassigned employee always points at a stored department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Store-assigned primary key, absent until saved
    id: Option<i64>,
    name: String,
    job_title: String,
    department_id: i64,
}

impl Employee {
    pub const ENTITY: &'static str = "employees";

    /// Create an unsaved Employee
    ///
    /// # Errors
    /// * `InvalidName` - If name is empty
    /// * `InvalidJobTitle` - If job title is empty
    /// * `InvalidReference` - If no department with `department_id` exists
    /// * `Persistence` - If the lookup cannot reach the store
    pub fn new<L: DepartmentLookup + ?Sized>(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
        departments: &L,
    ) -> Result<Self> {
        let name = validate_name(name)?;
        let job_title = validate_job_title(job_title)?;
        ensure_department(departments, department_id)?;
        Ok(Self {
            id: None,
            name,
            job_title,
            department_id,
        })
    }

    /// Rebuild an Employee from a stored row
    ///
    /// Text fields are validated. The department reference is taken as stored:
    /// the row is authoritative, and a department deleted after the employee
    /// was written leaves an orphaned reference that must still load.
    ///
    /// # Errors
    /// * `InvalidName` / `InvalidJobTitle` - If the row holds empty text
    pub fn from_stored(
        id: i64,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Self> {
        Ok(Self {
            id: Some(id),
            name: validate_name(name)?,
            job_title: validate_job_title(job_title)?,
            department_id,
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

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department_id(&self) -> i64 {
        self.department_id
    }

    /// # Errors
    /// * `InvalidName` - If name is empty
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// # Errors
    /// * `InvalidJobTitle` - If job title is empty
    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<()> {
        self.job_title = validate_job_title(job_title)?;
        Ok(())
    }

    /// Move the employee to another department
    ///
    /// # Errors
    /// * `InvalidReference` - If no department with `department_id` exists;
    ///   the current reference is kept
    /// * `Persistence` - If the lookup cannot reach the store
    pub fn set_department_id<L: DepartmentLookup + ?Sized>(
        &mut self,
        department_id: i64,
        departments: &L,
    ) -> Result<()> {
        ensure_department(departments, department_id)?;
        self.department_id = department_id;
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

/// Check that `department_id` resolves to a stored department
///
/// # Errors
/// * `InvalidReference` - If it does not
pub fn ensure_department<L: DepartmentLookup + ?Sized>(
    departments: &L,
    department_id: i64,
) -> Result<()> {
    if departments.department_exists(department_id)? {
        Ok(())
    } else {
        Err(OrgError::InvalidReference { department_id })
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Employee {}: ", id)?,
            None => write!(f, "<Employee unsaved: ")?,
        }
        write!(
            f,
            "{}, {}, Department ID: {}>",
            self.name, self.job_title, self.department_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::KnownDepartments;

    struct FailingLookup;

    impl DepartmentLookup for FailingLookup {
        fn department_exists(&self, _department_id: i64) -> Result<bool> {
            Err(OrgError::Persistence {
                op: "department_exists".to_string(),
                message: "no such table: departments".to_string(),
            })
        }
    }

    #[test]
    fn test_new_employee() {
        let known = KnownDepartments::new([1, 2]);
        let emp = Employee::new("Raha", "Accountant", 1, &known).unwrap();
        assert_eq!(emp.id(), None);
        assert_eq!(emp.name(), "Raha");
        assert_eq!(emp.job_title(), "Accountant");
        assert_eq!(emp.department_id(), 1);
    }

    #[test]
    fn test_new_rejects_unknown_department() {
        let known = KnownDepartments::new([1]);
        assert_eq!(
            Employee::new("Raha", "Accountant", 99, &known),
            Err(OrgError::InvalidReference { department_id: 99 })
        );
    }

    #[test]
    fn test_text_checked_before_reference() {
        // A failing store is never consulted when a text field is already invalid
        assert_eq!(
            Employee::new("", "Accountant", 1, &FailingLookup),
            Err(OrgError::InvalidName)
        );
        assert_eq!(
            Employee::new("Raha", "", 1, &FailingLookup),
            Err(OrgError::InvalidJobTitle)
        );
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let err = Employee::new("Raha", "Accountant", 1, &FailingLookup).unwrap_err();
        assert!(matches!(err, OrgError::Persistence { .. }));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_reassignment_is_revalidated() {
        let known = KnownDepartments::new([1, 2]);
        let mut emp = Employee::new("Tal", "Benefits Coordinator", 1, &known).unwrap();

        emp.set_department_id(2, &known).unwrap();
        assert_eq!(emp.department_id(), 2);

        assert_eq!(
            emp.set_department_id(3, &known),
            Err(OrgError::InvalidReference { department_id: 3 })
        );
        assert_eq!(emp.department_id(), 2);
    }

    #[test]
    fn test_from_stored_trusts_reference() {
        let emp = Employee::from_stored(4, "Sasha", "Manager", 404).unwrap();
        assert_eq!(emp.id(), Some(4));
        assert_eq!(emp.department_id(), 404);
        assert_eq!(
            Employee::from_stored(4, "", "Manager", 1),
            Err(OrgError::InvalidName)
        );
    }

    #[test]
    fn test_display() {
        let emp = Employee::from_stored(3, "Kai", "Web Developer", 2).unwrap();
        assert_eq!(
            emp.to_string(),
            "<Employee 3: Kai, Web Developer, Department ID: 2>"
        );
    }
}
