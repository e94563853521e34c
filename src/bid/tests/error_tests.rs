//! Display and classification tests for the bid error taxonomy.

use crate::bid::{
    domain::BidId,
    ports::{BidRepositoryError, ResolutionGatewayError},
};
use crate::profile::domain::ProfileId;
use crate::task::domain::TaskId;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn duplicate_freelancer_bid_names_both_parties() {
    let task_id = TaskId::new();
    let freelancer = ProfileId::new();
    let err = BidRepositoryError::DuplicateFreelancerBid {
        task_id,
        freelancer,
    };

    let message = err.to_string();
    assert!(message.contains(&task_id.to_string()));
    assert!(message.contains(&freelancer.to_string()));
}

#[rstest]
fn partial_failures_are_distinguishable_from_plain_persistence_errors() {
    let partial = ResolutionGatewayError::Partial {
        task_assigned: true,
        bid_accepted: false,
        cause: Arc::new(std::io::Error::other("connection dropped")),
    };
    let plain = ResolutionGatewayError::persistence(std::io::Error::other("connection refused"));

    assert!(partial.is_partial());
    assert!(!plain.is_partial());
    assert!(partial.to_string().contains("task assigned: true"));
    assert!(partial.to_string().contains("bid accepted: false"));
}

#[rstest]
fn invalid_state_errors_name_the_stale_entity() {
    let task_id = TaskId::new();
    let bid_id = BidId::new();

    assert!(
        ResolutionGatewayError::TaskNotOpen(task_id)
            .to_string()
            .contains("no longer open")
    );
    assert!(
        ResolutionGatewayError::BidNotPending(bid_id)
            .to_string()
            .contains("no longer pending")
    );
}
