//! `PostgreSQL` adapters for bid persistence and resolution.

mod models;
mod repository;
mod resolution;
mod schema;

pub use repository::{BidPgPool, PostgresBidRepository};
pub use resolution::PostgresBidResolution;
