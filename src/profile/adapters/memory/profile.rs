//! In-memory repository for profile tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::profile::{
    domain::{Profile, ProfileId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<InMemoryProfileState>>,
}

#[derive(Debug, Default)]
struct InMemoryProfileState {
    profiles: HashMap<ProfileId, Profile>,
    email_index: HashMap<String, ProfileId>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.profiles.contains_key(&profile.id()) {
            return Err(ProfileRepositoryError::DuplicateProfile(profile.id()));
        }
        if state.email_index.contains_key(profile.email()) {
            return Err(ProfileRepositoryError::DuplicateEmail(
                profile.email().to_owned(),
            ));
        }

        state
            .email_index
            .insert(profile.email().to_owned(), profile.id());
        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.profiles.contains_key(&profile.id()) {
            return Err(ProfileRepositoryError::NotFound(profile.id()));
        }
        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>> {
        let state = self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.profiles.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> ProfileRepositoryResult<Option<Profile>> {
        let state = self.state.read().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let profile = state
            .email_index
            .get(email)
            .and_then(|id| state.profiles.get(id))
            .cloned();
        Ok(profile)
    }
}
