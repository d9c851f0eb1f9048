pub mod validation;

pub use validation::{validate_job_title, validate_location, validate_name};
