//! Repository port for bid persistence and per-task listings.

use crate::bid::domain::{Bid, BidId};
use crate::profile::domain::ProfileId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for bid repository operations.
pub type BidRepositoryResult<T> = Result<T, BidRepositoryError>;

/// Bid persistence contract.
#[async_trait]
pub trait BidRepository: Send + Sync {
    /// Stores a new bid.
    ///
    /// # Errors
    ///
    /// Returns [`BidRepositoryError::DuplicateBid`] when the bid ID already
    /// exists or [`BidRepositoryError::DuplicateFreelancerBid`] when the
    /// freelancer already has a bid on the task.
    async fn store(&self, bid: &Bid) -> BidRepositoryResult<()>;

    /// Finds a bid by identifier.
    ///
    /// Returns `None` when the bid does not exist.
    async fn find_by_id(&self, id: BidId) -> BidRepositoryResult<Option<Bid>>;

    /// Lists all bids placed against a task, newest first.
    async fn list_for_task(&self, task: TaskId) -> BidRepositoryResult<Vec<Bid>>;
}

/// Errors returned by bid repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BidRepositoryError {
    /// A bid with the same identifier already exists.
    #[error("duplicate bid identifier: {0}")]
    DuplicateBid(BidId),

    /// The freelancer already placed a bid on this task.
    #[error("freelancer {freelancer} already has a bid on task {task_id}")]
    DuplicateFreelancerBid {
        /// The task being bid on.
        task_id: TaskId,
        /// The freelancer with an existing bid.
        freelancer: ProfileId,
    },

    /// The bid was not found.
    #[error("bid not found: {0}")]
    NotFound(BidId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BidRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
