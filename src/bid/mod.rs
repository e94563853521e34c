//! Bid submission and resolution for Campusbid.
//!
//! Freelancers place bids against open tasks; the task's client resolves the
//! bid set by accepting exactly one bid, which assigns the freelancer, moves
//! the task to `in_progress`, and rejects every sibling bid as one atomic
//! unit. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
