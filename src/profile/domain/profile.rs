//! Profile aggregate for marketplace participants.

use super::{ProfileDomainError, ProfileId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Marketplace participant record.
///
/// A profile represents one user, who may act as a client (posting tasks)
/// and as a freelancer (bidding on other users' tasks) at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ProfileId,
    email: String,
    display_name: Option<String>,
    institution: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Mutable profile fields applied as one unit by [`Profile::update_details`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    /// Name shown beside the participant's bids and tasks.
    pub display_name: Option<String>,
    /// Institution the participant studies at.
    pub institution: Option<String>,
}

impl ProfileDetails {
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

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted profile identifier.
    pub id: ProfileId,
    /// Persisted email address.
    pub email: String,
    /// Persisted display name, if any.
    pub display_name: Option<String>,
    /// Persisted institution, if any.
    pub institution: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a new profile for the given email address.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::InvalidEmail`] when the email is empty
    /// after trimming or lacks an `@` separator.
    pub fn new(email: impl Into<String>, clock: &impl Clock) -> Result<Self, ProfileDomainError> {
        let raw = email.into();
        let normalized = raw.trim();
        if normalized.is_empty() || !normalized.contains('@') {
            return Err(ProfileDomainError::InvalidEmail(raw));
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: ProfileId::new(),
            email: normalized.to_owned(),
            display_name: None,
            institution: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            display_name: data.display_name,
            institution: data.institution,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the display name on a freshly created profile.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the institution on a freshly created profile.
    #[must_use]
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name, if set.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the institution, if set.
    #[must_use]
    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the mutable profile fields with the given details.
    pub fn update_details(&mut self, details: ProfileDetails, clock: &impl Clock) {
        self.display_name = details.display_name;
        self.institution = details.institution;
        self.updated_at = clock.utc();
    }
}
