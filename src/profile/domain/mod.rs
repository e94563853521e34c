//! Domain model for marketplace participant profiles.
//!
//! The profile domain models the participant records the workflow reads for
//! authorization and display purposes while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod profile;

pub use error::ProfileDomainError;
pub use ids::ProfileId;
pub use profile::{PersistedProfileData, Profile, ProfileDetails};
