//! In-memory bid resolution gateway for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::bid::adapters::memory::bid::InMemoryBidState;
use crate::bid::{
    adapters::memory::InMemoryBidRepository,
    domain::{Bid, BidStatus, PersistedBidData},
    ports::{
        BidResolutionGateway, ResolutionGatewayError, ResolutionGatewayResult, ResolutionOutcome,
        ResolutionWrite,
    },
};
use crate::task::adapters::memory::{InMemoryTaskRepository, InMemoryTaskState};
use crate::task::domain::TaskStatus;

/// In-memory resolution gateway operating on the shared repository state.
///
/// The commit holds write locks on both stores (task store first, then bid
/// store) for its whole duration, making the three-part write set atomic
/// with respect to every other adapter operation.
#[derive(Debug, Clone)]
pub struct InMemoryBidResolution {
    tasks: Arc<RwLock<InMemoryTaskState>>,
    bids: Arc<RwLock<InMemoryBidState>>,
}

impl InMemoryBidResolution {
    /// Creates a gateway over the state shared with the given repositories.
    #[must_use]
    pub fn new(tasks: &InMemoryTaskRepository, bids: &InMemoryBidRepository) -> Self {
        Self {
            tasks: tasks.shared_state(),
            bids: bids.shared_state(),
        }
    }
}

#[async_trait]
impl BidResolutionGateway for InMemoryBidResolution {
    async fn commit(&self, write: ResolutionWrite) -> ResolutionGatewayResult<ResolutionOutcome> {
        let task_id = write.task.id();
        let accepted_id = write.accepted.id();

        // Lock ordering is fixed (tasks before bids) across the adapter.
        let mut task_state = self.tasks.write().map_err(|err| {
            ResolutionGatewayError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut bid_state = self.bids.write().map_err(|err| {
            ResolutionGatewayError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let stored_task = task_state
            .tasks
            .get_mut(&task_id)
            .ok_or(ResolutionGatewayError::TaskNotFound(task_id))?;
        if stored_task.status() != TaskStatus::Open {
            return Err(ResolutionGatewayError::TaskNotOpen(task_id));
        }

        let stored_bid = bid_state
            .bids
            .get(&accepted_id)
            .ok_or(ResolutionGatewayError::BidNotFound(accepted_id))?;
        if stored_bid.status() != BidStatus::Pending {
            return Err(ResolutionGatewayError::BidNotPending(accepted_id));
        }

        *stored_task = write.task.clone();
        bid_state.bids.insert(accepted_id, write.accepted.clone());

        let mut rejected = Vec::new();
        for bid in bid_state.bids.values_mut() {
            let is_sibling = bid.task() == task_id
                && bid.id() != accepted_id
                && bid.status() == BidStatus::Pending;
            if is_sibling {
                let replacement = Bid::from_persisted(PersistedBidData {
                    id: bid.id(),
                    task: bid.task(),
                    freelancer: bid.freelancer(),
                    amount: bid.amount(),
                    proposal: bid.proposal().to_owned(),
                    status: BidStatus::Rejected,
                    created_at: bid.created_at(),
                    updated_at: write.rejected_at,
                });
                *bid = replacement.clone();
                rejected.push(replacement);
            }
        }

        Ok(ResolutionOutcome {
            task: write.task,
            accepted: write.accepted,
            rejected,
        })
    }
}
