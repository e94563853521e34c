//! Port contracts for profile persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by profile services.

pub mod repository;

pub use repository::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult};
