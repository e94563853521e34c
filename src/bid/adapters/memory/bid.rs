//! In-memory repository for bid tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::bid::{
    domain::{Bid, BidId},
    ports::{BidRepository, BidRepositoryError, BidRepositoryResult},
};
use crate::profile::domain::ProfileId;
use crate::task::domain::TaskId;

/// Thread-safe in-memory bid repository.
///
/// Mirrors the relational constraints: duplicate identifiers are rejected
/// and each freelancer may hold at most one bid per task. Insertion order is
/// recorded so newest-first listings are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBidRepository {
    state: Arc<RwLock<InMemoryBidState>>,
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryBidState {
    pub(crate) bids: HashMap<BidId, Bid>,
    pub(crate) insertion_order: Vec<BidId>,
    pub(crate) placed: HashSet<(TaskId, ProfileId)>,
}

impl InMemoryBidRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared state handle used by the in-memory bid resolution gateway.
    pub(crate) fn shared_state(&self) -> Arc<RwLock<InMemoryBidState>> {
        Arc::clone(&self.state)
    }
}

#[async_trait]
impl BidRepository for InMemoryBidRepository {
    async fn store(&self, bid: &Bid) -> BidRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            BidRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.bids.contains_key(&bid.id()) {
            return Err(BidRepositoryError::DuplicateBid(bid.id()));
        }
        let placement = (bid.task(), bid.freelancer());
        if state.placed.contains(&placement) {
            return Err(BidRepositoryError::DuplicateFreelancerBid {
                task_id: bid.task(),
                freelancer: bid.freelancer(),
            });
        }

        state.placed.insert(placement);
        state.insertion_order.push(bid.id());
        state.bids.insert(bid.id(), bid.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BidId) -> BidRepositoryResult<Option<Bid>> {
        let state = self.state.read().map_err(|err| {
            BidRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.bids.get(&id).cloned())
    }

    async fn list_for_task(&self, task: TaskId) -> BidRepositoryResult<Vec<Bid>> {
        let state = self.state.read().map_err(|err| {
            BidRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let bids = state
            .insertion_order
            .iter()
            .rev()
            .filter_map(|id| state.bids.get(id))
            .filter(|bid| bid.task() == task)
            .cloned()
            .collect();
        Ok(bids)
    }
}
