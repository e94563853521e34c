//! Service layer for resolving a task's bid set.
//!
//! Accepting a bid is the one multi-entity transition in the marketplace:
//! the task is assigned and moved to `in_progress`, the winning bid becomes
//! `accepted`, and every sibling pending bid becomes `rejected`. The service
//! authorizes the caller and builds the post-state through the domain
//! mutators, then hands the whole write set to the resolution gateway, which
//! commits it as one atomic unit.

use crate::bid::{
    domain::{BidDomainError, BidId, BidStatus},
    ports::{
        BidRepository, BidRepositoryError, BidResolutionGateway, ResolutionGatewayError,
        ResolutionOutcome, ResolutionWrite,
    },
};
use crate::profile::domain::ProfileId;
use crate::task::{
    domain::{TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for accepting a bid.
///
/// The winning freelancer is derived from the stored bid, never supplied by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptBidRequest {
    /// The task being resolved.
    pub task: TaskId,
    /// The bid the client accepts.
    pub bid: BidId,
    /// The user performing the acceptance.
    pub caller: ProfileId,
}

impl AcceptBidRequest {
    /// Creates a new accept request.
    #[must_use]
    pub const fn new(task: TaskId, bid: BidId, caller: ProfileId) -> Self {
        Self { task, bid, caller }
    }
}

/// Service-level errors for bid resolution.
#[derive(Debug, Error)]
pub enum BidResolutionError {
    /// The task does not exist.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    /// The bid does not exist.
    #[error("unknown bid: {0}")]
    UnknownBid(BidId),
    /// The caller is not the client who posted the task.
    #[error("user {caller} is not the client of task {task_id}")]
    NotTaskClient {
        /// The task being resolved.
        task_id: TaskId,
        /// The rejected caller.
        caller: ProfileId,
    },
    /// The task is not open for resolution.
    #[error("task {task_id} cannot be resolved (status: {status})")]
    TaskNotOpen {
        /// The task being resolved.
        task_id: TaskId,
        /// The task's current status.
        status: TaskStatus,
    },
    /// The bid has already been resolved.
    #[error("bid {bid_id} has already been resolved (status: {status})")]
    BidNotPending {
        /// The bid being accepted.
        bid_id: BidId,
        /// The bid's current status.
        status: BidStatus,
    },
    /// The bid belongs to a different task.
    #[error("bid {bid_id} does not belong to task {task_id}")]
    ForeignBid {
        /// The bid being accepted.
        bid_id: BidId,
        /// The task being resolved.
        task_id: TaskId,
    },
    /// Building the task's post-state failed.
    #[error(transparent)]
    TaskDomain(#[from] TaskDomainError),
    /// Building the bid's post-state failed.
    #[error(transparent)]
    BidDomain(#[from] BidDomainError),
    /// Task lookup failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Bid lookup failed.
    #[error(transparent)]
    BidRepository(#[from] BidRepositoryError),
    /// The commit failed, lost a race, or was only partially applied.
    #[error(transparent)]
    Gateway(#[from] ResolutionGatewayError),
}

/// Result type for bid resolution service operations.
pub type BidResolutionResult<T> = Result<T, BidResolutionError>;

/// Bid resolution orchestration service.
#[derive(Clone)]
pub struct BidResolutionService<T, B, G, C>
where
    T: TaskRepository,
    B: BidRepository,
    G: BidResolutionGateway,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    bids: Arc<B>,
    gateway: Arc<G>,
    clock: Arc<C>,
}

impl<T, B, G, C> BidResolutionService<T, B, G, C>
where
    T: TaskRepository,
    B: BidRepository,
    G: BidResolutionGateway,
    C: Clock + Send + Sync,
{
    /// Creates a new bid resolution service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, bids: Arc<B>, gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            bids,
            gateway,
            clock,
        }
    }

    /// Accepts a bid on behalf of the task's client.
    ///
    /// The caller must be the client who posted the task and the task must
    /// still be open. On success the returned outcome carries the assigned
    /// task, the accepted bid, and every sibling bid rejected by the commit.
    ///
    /// # Errors
    ///
    /// Returns [`BidResolutionError::NotTaskClient`] for a caller who did not
    /// post the task, [`BidResolutionError::TaskNotOpen`] /
    /// [`BidResolutionError::BidNotPending`] for already-resolved state,
    /// lookup errors for missing rows, and a gateway error when the commit
    /// fails or loses a concurrent race.
    pub async fn accept(&self, request: AcceptBidRequest) -> BidResolutionResult<ResolutionOutcome> {
        let mut task = self
            .tasks
            .find_by_id(request.task)
            .await?
            .ok_or(BidResolutionError::UnknownTask(request.task))?;

        if task.client() != request.caller {
            return Err(BidResolutionError::NotTaskClient {
                task_id: task.id(),
                caller: request.caller,
            });
        }
        if task.status() != TaskStatus::Open {
            return Err(BidResolutionError::TaskNotOpen {
                task_id: task.id(),
                status: task.status(),
            });
        }

        let mut bid = self
            .bids
            .find_by_id(request.bid)
            .await?
            .ok_or(BidResolutionError::UnknownBid(request.bid))?;

        if bid.task() != task.id() {
            return Err(BidResolutionError::ForeignBid {
                bid_id: bid.id(),
                task_id: task.id(),
            });
        }
        if bid.status() != BidStatus::Pending {
            return Err(BidResolutionError::BidNotPending {
                bid_id: bid.id(),
                status: bid.status(),
            });
        }

        task.assign(bid.freelancer(), &*self.clock)?;
        bid.accept(&*self.clock)?;

        let write = ResolutionWrite {
            task,
            accepted: bid,
            rejected_at: self.clock.utc(),
        };
        let outcome = self.gateway.commit(write).await?;
        info!(
            task_id = %outcome.task.id(),
            bid_id = %outcome.accepted.id(),
            freelancer = %outcome.accepted.freelancer(),
            rejected = outcome.rejected.len(),
            "bid accepted"
        );
        Ok(outcome)
    }
}
