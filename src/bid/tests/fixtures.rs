//! Shared fixtures for bid service tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;

use crate::bid::adapters::memory::{InMemoryBidRepository, InMemoryBidResolution};
use crate::bid::services::{BidPlacementService, BidResolutionService};
use crate::profile::adapters::memory::InMemoryProfileRepository;
use crate::profile::domain::ProfileId;
use crate::profile::services::{ProfileDirectoryService, RegisterProfileRequest};
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::Task;
use crate::task::services::{CreateTaskRequest, TaskLifecycleService};

pub(super) type Placement = BidPlacementService<
    InMemoryTaskRepository,
    InMemoryBidRepository,
    InMemoryProfileRepository,
    DefaultClock,
>;
pub(super) type Resolution = BidResolutionService<
    InMemoryTaskRepository,
    InMemoryBidRepository,
    InMemoryBidResolution,
    DefaultClock,
>;

/// Marketplace wired onto the in-memory adapters.
pub(super) struct Harness {
    pub(super) tasks: Arc<InMemoryTaskRepository>,
    pub(super) bids: Arc<InMemoryBidRepository>,
    pub(super) clock: Arc<DefaultClock>,
    pub(super) lifecycle: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    pub(super) directory: ProfileDirectoryService<InMemoryProfileRepository, DefaultClock>,
    pub(super) placement: Placement,
    pub(super) resolution: Resolution,
}

impl Harness {
    pub(super) fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let bids = Arc::new(InMemoryBidRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let gateway = Arc::new(InMemoryBidResolution::new(&tasks, &bids));
        let clock = Arc::new(DefaultClock);

        Self {
            tasks: Arc::clone(&tasks),
            bids: Arc::clone(&bids),
            clock: Arc::clone(&clock),
            lifecycle: TaskLifecycleService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            directory: ProfileDirectoryService::new(Arc::clone(&profiles), Arc::clone(&clock)),
            placement: BidPlacementService::new(
                Arc::clone(&tasks),
                Arc::clone(&bids),
                Arc::clone(&profiles),
                Arc::clone(&clock),
            ),
            resolution: BidResolutionService::new(tasks, bids, gateway, clock),
        }
    }

    /// Builds a resolution service over this harness's stores but a caller-
    /// provided gateway, for exercising gateway failure modes.
    pub(super) fn with_gateway<G>(
        &self,
        gateway: Arc<G>,
    ) -> BidResolutionService<InMemoryTaskRepository, InMemoryBidRepository, G, DefaultClock>
    where
        G: crate::bid::ports::BidResolutionGateway,
    {
        BidResolutionService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.bids),
            gateway,
            Arc::clone(&self.clock),
        )
    }

    /// Registers a participant and returns their identifier.
    pub(super) async fn register(&self, email: &str, name: &str) -> ProfileId {
        self.directory
            .register(RegisterProfileRequest::new(email).with_display_name(name))
            .await
            .expect("registration should succeed")
            .id()
    }

    /// Posts an open task on behalf of the given client.
    pub(super) async fn open_task(&self, client: ProfileId) -> Task {
        self.lifecycle
            .create(CreateTaskRequest::new(
                "Essay on Climate Change (2,000 words)",
                "Provide detailed requirements, guidelines, and expectations.",
                200_000,
                Utc::now() + Duration::days(7),
                client,
            ))
            .await
            .expect("task creation should succeed")
    }
}
