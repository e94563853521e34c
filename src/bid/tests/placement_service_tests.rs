//! Service orchestration tests for bid placement and listings.

use super::fixtures::Harness;
use crate::bid::{
    domain::BidDomainError,
    ports::BidRepositoryError,
    services::{BidPlacementError, SubmitBidRequest},
};
use crate::profile::domain::ProfileId;
use crate::task::domain::{TaskId, TaskStatus};
use rstest::{fixture, rstest};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_creates_pending_bid_listed_with_bidder_name(harness: Harness) {
    let client = harness.register("client@uni.example", "Client").await;
    let freelancer = harness.register("writer@uni.example", "Ada L.").await;
    let task = harness.open_task(client).await;

    let bid = harness
        .placement
        .submit(SubmitBidRequest::new(
            task.id(),
            freelancer,
            180_000,
            "I have written a dozen essays in this field.",
        ))
        .await
        .expect("bid submission should succeed");

    let listings = harness
        .placement
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    assert_eq!(listings.len(), 1);
    let listing = listings.first().expect("one listing");
    assert_eq!(listing.bid, bid);
    assert_eq!(listing.bidder_name.as_deref(), Some("Ada L."));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_lists_newest_first(harness: Harness) {
    let client = harness.register("client@uni.example", "Client").await;
    let first_bidder = harness.register("first@uni.example", "First").await;
    let second_bidder = harness.register("second@uni.example", "Second").await;
    let task = harness.open_task(client).await;

    let first = harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), first_bidder, 180_000, "First in."))
        .await
        .expect("first bid should succeed");
    let second = harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), second_bidder, 170_000, "Second in."))
        .await
        .expect("second bid should succeed");

    let listings = harness
        .placement
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    let ids: Vec<_> = listings.iter().map(|listing| listing.bid.id()).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_cannot_bid_on_own_task(harness: Harness) {
    let client = harness.register("client@uni.example", "Client").await;
    let task = harness.open_task(client).await;

    let result = harness
        .placement
        .submit(SubmitBidRequest::new(
            task.id(),
            client,
            180_000,
            "Bidding on my own work.",
        ))
        .await;

    assert!(matches!(
        result,
        Err(BidPlacementError::OwnTaskBid { client: owner, .. }) if owner == client
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_on_closed_task_creates_no_row(harness: Harness) {
    let client = harness.register("client@uni.example", "Client").await;
    let freelancer = harness.register("writer@uni.example", "Ada L.").await;
    let task = harness.open_task(client).await;
    harness
        .lifecycle
        .cancel(task.id(), client)
        .await
        .expect("cancellation should succeed");

    let result = harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), freelancer, 180_000, "Too late."))
        .await;

    assert!(matches!(
        result,
        Err(BidPlacementError::TaskNotOpen {
            status: TaskStatus::Cancelled,
            ..
        })
    ));
    let listings = harness
        .placement
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    assert!(listings.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_on_unknown_task_fails(harness: Harness) {
    let freelancer = harness.register("writer@uni.example", "Ada L.").await;
    let missing = TaskId::new();

    let result = harness
        .placement
        .submit(SubmitBidRequest::new(missing, freelancer, 180_000, "Hello?"))
        .await;

    assert!(matches!(
        result,
        Err(BidPlacementError::UnknownTask(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_bid_by_same_freelancer_is_rejected(harness: Harness) {
    let client = harness.register("client@uni.example", "Client").await;
    let freelancer = harness.register("writer@uni.example", "Ada L.").await;
    let task = harness.open_task(client).await;

    harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), freelancer, 180_000, "First offer."))
        .await
        .expect("first bid should succeed");
    let result = harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), freelancer, 170_000, "Lower offer."))
        .await;

    assert!(matches!(
        result,
        Err(BidPlacementError::BidRepository(
            BidRepositoryError::DuplicateFreelancerBid { .. }
        ))
    ));
    let listings = harness
        .placement
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    assert_eq!(listings.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_bids_are_rejected_before_any_write(harness: Harness) {
    let client = harness.register("client@uni.example", "Client").await;
    let freelancer = harness.register("writer@uni.example", "Ada L.").await;
    let task = harness.open_task(client).await;

    let blank_proposal = harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), freelancer, 180_000, "   "))
        .await;
    assert!(matches!(
        blank_proposal,
        Err(BidPlacementError::Domain(BidDomainError::EmptyProposal))
    ));

    let zero_amount = harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), freelancer, 0, "Free of charge."))
        .await;
    assert!(matches!(
        zero_amount,
        Err(BidPlacementError::Domain(BidDomainError::InvalidAmount(_)))
    ));

    let listings = harness
        .placement
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    assert!(listings.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_tolerates_missing_bidder_profile(harness: Harness) {
    let client = harness.register("client@uni.example", "Client").await;
    let task = harness.open_task(client).await;
    // A freelancer identifier that was never registered.
    let ghost = ProfileId::new();

    harness
        .placement
        .submit(SubmitBidRequest::new(task.id(), ghost, 180_000, "From nowhere."))
        .await
        .expect("bid submission should succeed");

    let listings = harness
        .placement
        .list_for_task(task.id())
        .await
        .expect("listing should succeed");
    assert_eq!(listings.len(), 1);
    assert!(listings.first().expect("one listing").bidder_name.is_none());
}
