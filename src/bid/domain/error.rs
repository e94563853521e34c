//! Error types for bid domain validation and parsing.

use super::{BidId, BidStatus};
use crate::task::domain::InvalidAmountError;
use thiserror::Error;

/// Errors returned while constructing or mutating domain bid values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BidDomainError {
    /// The proposal text is empty after trimming.
    #[error("bid proposal must not be empty")]
    EmptyProposal,

    /// The bid amount is not a positive amount.
    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmountError),

    /// The requested status change is not permitted.
    #[error("invalid bid status transition from {from} to {to} for bid {bid_id}")]
    InvalidStatusTransition {
        /// The bid being mutated.
        bid_id: BidId,
        /// The current status.
        from: BidStatus,
        /// The attempted target status.
        to: BidStatus,
    },
}

/// Error returned while parsing bid statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown bid status: {0}")]
pub struct ParseBidStatusError(pub String);
