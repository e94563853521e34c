//! Service layer for submitting bids and listing a task's bid set.

use crate::bid::{
    domain::{Bid, BidDomainError, NewBidParams},
    ports::{BidRepository, BidRepositoryError},
};
use crate::profile::domain::ProfileId;
use crate::profile::ports::{ProfileRepository, ProfileRepositoryError};
use crate::task::{
    domain::{TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for placing a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBidRequest {
    task: TaskId,
    freelancer: ProfileId,
    amount_minor: i64,
    proposal: String,
}

impl SubmitBidRequest {
    /// Creates a request with the required bid fields.
    #[must_use]
    pub fn new(
        task: TaskId,
        freelancer: ProfileId,
        amount_minor: i64,
        proposal: impl Into<String>,
    ) -> Self {
        Self {
            task,
            freelancer,
            amount_minor,
            proposal: proposal.into(),
        }
    }
}

/// A bid joined with its bidder's display name for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidListing {
    /// The stored bid.
    pub bid: Bid,
    /// The bidder's display name; `None` when the profile is missing or
    /// carries no name.
    pub bidder_name: Option<String>,
}

/// Service-level errors for bid placement operations.
#[derive(Debug, Error)]
pub enum BidPlacementError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BidDomainError),
    /// The task does not exist.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    /// The task is no longer accepting bids.
    #[error("task {task_id} is not open for bids (status: {status})")]
    TaskNotOpen {
        /// The task being bid on.
        task_id: TaskId,
        /// The task's current status.
        status: TaskStatus,
    },
    /// The task's own client attempted to bid.
    #[error("client {client} cannot bid on their own task {task_id}")]
    OwnTaskBid {
        /// The task being bid on.
        task_id: TaskId,
        /// The client who posted it.
        client: ProfileId,
    },
    /// Task lookup failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Bid persistence failed.
    #[error(transparent)]
    BidRepository(#[from] BidRepositoryError),
    /// Bidder profile lookup failed.
    #[error(transparent)]
    ProfileRepository(#[from] ProfileRepositoryError),
}

/// Result type for bid placement service operations.
pub type BidPlacementResult<T> = Result<T, BidPlacementError>;

/// Bid submission and listing service.
///
/// Every submission re-validates the task's status and the caller's identity
/// against the task's client before writing; the storage layer is never
/// trusted to authorize.
#[derive(Clone)]
pub struct BidPlacementService<T, B, P, C>
where
    T: TaskRepository,
    B: BidRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    bids: Arc<B>,
    profiles: Arc<P>,
    clock: Arc<C>,
}

impl<T, B, P, C> BidPlacementService<T, B, P, C>
where
    T: TaskRepository,
    B: BidRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new bid placement service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, bids: Arc<B>, profiles: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            bids,
            profiles,
            clock,
        }
    }

    /// Places a pending bid against an open task.
    ///
    /// # Errors
    ///
    /// Returns [`BidPlacementError::UnknownTask`] when the task does not
    /// exist, [`BidPlacementError::TaskNotOpen`] when it no longer accepts
    /// bids, [`BidPlacementError::OwnTaskBid`] when the task's client bids on
    /// their own task, a domain error for a malformed amount or proposal, or
    /// a repository error when persistence fails (including the
    /// one-bid-per-freelancer-per-task constraint).
    pub async fn submit(&self, request: SubmitBidRequest) -> BidPlacementResult<Bid> {
        let task = self
            .tasks
            .find_by_id(request.task)
            .await?
            .ok_or(BidPlacementError::UnknownTask(request.task))?;

        if task.status() != TaskStatus::Open {
            return Err(BidPlacementError::TaskNotOpen {
                task_id: task.id(),
                status: task.status(),
            });
        }
        if request.freelancer == task.client() {
            return Err(BidPlacementError::OwnTaskBid {
                task_id: task.id(),
                client: task.client(),
            });
        }

        let params = NewBidParams::new(
            task.id(),
            request.freelancer,
            request.amount_minor,
            request.proposal,
        );
        let bid = Bid::new(params, &*self.clock)?;
        self.bids.store(&bid).await?;
        info!(bid_id = %bid.id(), task_id = %task.id(), freelancer = %bid.freelancer(), "bid placed");
        Ok(bid)
    }

    /// Lists a task's bids newest first, joined with bidder display names.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the bid listing or a profile lookup
    /// fails.
    pub async fn list_for_task(&self, task: TaskId) -> BidPlacementResult<Vec<BidListing>> {
        let bids = self.bids.list_for_task(task).await?;

        let mut listings = Vec::with_capacity(bids.len());
        for bid in bids {
            let bidder_name = self
                .profiles
                .find_by_id(bid.freelancer())
                .await?
                .and_then(|profile| profile.display_name().map(ToOwned::to_owned));
            listings.push(BidListing { bid, bidder_name });
        }
        Ok(listings)
    }
}
