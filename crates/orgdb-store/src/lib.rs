//! orgdb Store - SQLite persistence with an identity map
//!
//! Provides:
//! - Connection management and store configuration
//! - A generic record table shared by both entities
//! - Per-repo identity maps guaranteeing one live instance per row
//! - `DepartmentRepo` and `EmployeeRepo`, the caller-facing managers
//! - A deterministic fixture seed

pub mod config;
pub mod db;
pub mod errors;
pub mod repo;
pub mod seed;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use repo::{DepartmentRepo, EmployeeRepo, IdentityMap, Live};
