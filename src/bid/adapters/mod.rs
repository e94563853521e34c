//! Persistence adapters for the bid module.
//!
//! - [`memory`]: thread-safe in-memory storage and resolution for unit
//!   testing
//! - [`postgres`]: production `PostgreSQL` persistence using Diesel ORM,
//!   with resolution committed in a single transaction

pub mod memory;
pub mod postgres;
