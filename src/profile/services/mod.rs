//! Application services for profile management.

mod directory;

pub use directory::{
    ProfileDirectoryError, ProfileDirectoryResult, ProfileDirectoryService,
    RegisterProfileRequest,
};
