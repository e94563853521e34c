//! Persistence adapters for the profile module.
//!
//! - [`memory::InMemoryProfileRepository`]: thread-safe in-memory storage for
//!   unit testing
//! - [`postgres::PostgresProfileRepository`]: production `PostgreSQL`
//!   persistence using Diesel ORM

pub mod memory;
pub mod postgres;
