//! Port for committing a bid resolution as one atomic unit.
//!
//! Accepting a bid touches three row sets: the task (assigned and moved to
//! `in_progress`), the winning bid (`accepted`), and every sibling pending
//! bid (`rejected`). Implementations must apply the whole write set as a
//! single logical unit, guarded by the stored task still being `open` and
//! the stored bid still being `pending`, so a lost race surfaces as an
//! invalid-state error rather than a double acceptance.

use crate::bid::domain::{Bid, BidId};
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for resolution gateway operations.
pub type ResolutionGatewayResult<T> = Result<T, ResolutionGatewayError>;

/// The write set produced by resolving a bid.
///
/// The task and winning bid carry their post-resolution state, built by the
/// domain mutators before the commit; sibling bids are rejected by the
/// gateway itself with the given timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionWrite {
    /// Task moved to `in_progress` with the winning freelancer assigned.
    pub task: Task,
    /// Winning bid moved to `accepted`.
    pub accepted: Bid,
    /// Timestamp applied to sibling bids rejected by the commit.
    pub rejected_at: DateTime<Utc>,
}

/// The committed result of a bid resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// The task as persisted.
    pub task: Task,
    /// The accepted bid as persisted.
    pub accepted: Bid,
    /// Sibling bids rejected by the commit, in no particular order.
    pub rejected: Vec<Bid>,
}

/// Port for committing bid resolutions.
#[async_trait]
pub trait BidResolutionGateway: Send + Sync {
    /// Commits the resolution write set as one atomic unit.
    ///
    /// The task row is only written if its stored status is still `open` and
    /// the winning bid only if still `pending`; otherwise nothing is written
    /// and the corresponding invalid-state error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionGatewayError`] when a guard fails, persistence
    /// fails, or — for gateways unable to commit atomically — the write set
    /// was only partially applied.
    async fn commit(&self, write: ResolutionWrite) -> ResolutionGatewayResult<ResolutionOutcome>;
}

/// Errors returned by resolution gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum ResolutionGatewayError {
    /// The task row disappeared before the commit.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The stored task is no longer open (a concurrent resolution won).
    #[error("task {0} is no longer open")]
    TaskNotOpen(TaskId),

    /// The winning bid row disappeared before the commit.
    #[error("bid not found: {0}")]
    BidNotFound(BidId),

    /// The stored bid is no longer pending.
    #[error("bid {0} is no longer pending")]
    BidNotPending(BidId),

    /// The write set was only partially applied.
    ///
    /// Only gateways that cannot execute the three updates as one unit
    /// produce this; it tells an operator exactly which steps committed so
    /// the task's bid set can be reconciled by hand.
    #[error(
        "bid resolution left inconsistent state (task assigned: {task_assigned}, \
         bid accepted: {bid_accepted}): {cause}"
    )]
    Partial {
        /// Whether the task update committed.
        task_assigned: bool,
        /// Whether the winning-bid update committed.
        bid_accepted: bool,
        /// The failure that interrupted the sequence.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// Persistence-layer failure before any write was applied.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResolutionGatewayError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when the error describes a partially applied commit.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }
}
