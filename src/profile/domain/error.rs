//! Error types for profile domain validation.

use thiserror::Error;

/// Errors returned while constructing domain profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The email address is empty or not addressable.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}
