//! Repository port for profile persistence and lookup.

use crate::profile::domain::{Profile, ProfileId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a new profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateProfile`] when the profile
    /// ID already exists or [`ProfileRepositoryError::DuplicateEmail`] when
    /// another profile already uses the email address.
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Persists changes to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does not
    /// exist.
    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Finds a profile by identifier.
    ///
    /// Returns `None` when the profile does not exist.
    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>>;

    /// Finds a profile by email address.
    ///
    /// Returns `None` when no profile uses the address.
    async fn find_by_email(&self, email: &str) -> ProfileRepositoryResult<Option<Profile>>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// A profile with the same identifier already exists.
    #[error("duplicate profile identifier: {0}")]
    DuplicateProfile(ProfileId),

    /// A profile with the same email address already exists.
    #[error("duplicate profile email: {0}")]
    DuplicateEmail(String),

    /// The profile was not found.
    #[error("profile not found: {0}")]
    NotFound(ProfileId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
