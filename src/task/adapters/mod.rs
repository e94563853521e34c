//! Persistence adapters for the task module.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage for
//!   unit testing
//! - [`postgres::PostgresTaskRepository`]: production `PostgreSQL`
//!   persistence using Diesel ORM

pub mod memory;
pub mod postgres;
