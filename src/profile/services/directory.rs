//! Service layer for registering and maintaining participant profiles.

use crate::profile::{
    domain::{Profile, ProfileDetails, ProfileDomainError, ProfileId},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a new participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterProfileRequest {
    email: String,
    display_name: Option<String>,
    institution: Option<String>,
}

impl RegisterProfileRequest {
    /// Creates a request for the given email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            institution: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the institution.
    #[must_use]
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }
}

/// Service-level errors for profile directory operations.
#[derive(Debug, Error)]
pub enum ProfileDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
    /// The profile does not exist.
    #[error("unknown profile: {0}")]
    UnknownProfile(ProfileId),
}

/// Result type for profile directory service operations.
pub type ProfileDirectoryResult<T> = Result<T, ProfileDirectoryError>;

/// Profile registration and maintenance service.
#[derive(Clone)]
pub struct ProfileDirectoryService<R, C>
where
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProfileDirectoryService<R, C>
where
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new profile directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new participant profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDirectoryError`] when the email is invalid or the
    /// repository rejects the write (duplicate identifier or email).
    pub async fn register(
        &self,
        request: RegisterProfileRequest,
    ) -> ProfileDirectoryResult<Profile> {
        let mut profile = Profile::new(request.email, &*self.clock)?;
        if let Some(name) = request.display_name {
            profile = profile.with_display_name(name);
        }
        if let Some(institution) = request.institution {
            profile = profile.with_institution(institution);
        }

        self.repository.store(&profile).await?;
        info!(profile_id = %profile.id(), "profile registered");
        Ok(profile)
    }

    /// Replaces the mutable fields of an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDirectoryError::UnknownProfile`] when the profile does
    /// not exist, or a repository error when persistence fails.
    pub async fn update_details(
        &self,
        id: ProfileId,
        details: ProfileDetails,
    ) -> ProfileDirectoryResult<Profile> {
        let mut profile = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProfileDirectoryError::UnknownProfile(id))?;

        profile.update_details(details, &*self.clock);
        self.repository.update(&profile).await?;
        info!(profile_id = %profile.id(), "profile details updated");
        Ok(profile)
    }

    /// Retrieves a profile by identifier.
    ///
    /// Returns `Ok(None)` when the profile does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn find(&self, id: ProfileId) -> ProfileDirectoryResult<Option<Profile>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
