//! Field validation rules shared by the models
//!
//! Text fields reject the empty string. Whitespace-only values are accepted;
//! the check is on length, not content.

use crate::errors::{OrgError, Result};

fn require_text(value: String, err: OrgError) -> Result<String> {
    if value.is_empty() {
        return Err(err);
    }
    Ok(value)
}

/// Validate a department or employee name
///
/// # Errors
/// * `InvalidName` - If the name is empty
pub fn validate_name(name: impl Into<String>) -> Result<String> {
    require_text(name.into(), OrgError::InvalidName)
}

/// Validate a department location
///
/// # Errors
/// * `InvalidLocation` - If the location is empty
pub fn validate_location(location: impl Into<String>) -> Result<String> {
    require_text(location.into(), OrgError::InvalidLocation)
}

/// Validate an employee job title
///
/// # Errors
/// * `InvalidJobTitle` - If the job title is empty
pub fn validate_job_title(job_title: impl Into<String>) -> Result<String> {
    require_text(job_title.into(), OrgError::InvalidJobTitle)
}
