//! Unit tests for the bid module.

mod error_tests;
mod fixtures;
mod placement_service_tests;
