//! Service orchestration tests for the task lifecycle.

use std::sync::Arc;

use crate::profile::domain::ProfileId;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskStatusFilter},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

struct Fixture {
    repository: Arc<InMemoryTaskRepository>,
    service: TestService,
}

#[fixture]
fn fixture() -> Fixture {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    Fixture {
        repository,
        service,
    }
}

fn request(client: ProfileId, title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(
        title,
        "Provide detailed requirements, guidelines, and expectations.",
        200_000,
        Utc::now() + Duration::days(7),
        client,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_and_is_retrievable(fixture: Fixture) {
    let client = ProfileId::new();
    let created = fixture
        .service
        .create(request(client, "Essay"))
        .await
        .expect("task creation should succeed");

    assert_eq!(created.status(), TaskStatus::Open);
    let fetched = fixture
        .service
        .get(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_invalid_input_before_any_write(fixture: Fixture) {
    let client = ProfileId::new();
    let result = fixture
        .service
        .create(CreateTaskRequest::new(
            "",
            "details",
            200_000,
            Utc::now() + Duration::days(7),
            client,
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::EmptyTitle))
    ));
    let listed = fixture
        .service
        .list(TaskStatusFilter::All)
        .await
        .expect("listing should succeed");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_fails(fixture: Fixture) {
    let missing = TaskId::new();
    let result = fixture.service.get(missing).await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::UnknownTask(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_newest_first(fixture: Fixture) {
    let client = ProfileId::new();
    let first = fixture
        .service
        .create(request(client, "First"))
        .await
        .expect("task creation should succeed");
    let second = fixture
        .service
        .create(request(client, "Second"))
        .await
        .expect("task creation should succeed");

    let listed = fixture
        .service
        .list(TaskStatusFilter::All)
        .await
        .expect("listing should succeed");
    let ids: Vec<_> = listed.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_exact_status(fixture: Fixture) {
    let client = ProfileId::new();
    let kept = fixture
        .service
        .create(request(client, "Kept"))
        .await
        .expect("task creation should succeed");
    let withdrawn = fixture
        .service
        .create(request(client, "Withdrawn"))
        .await
        .expect("task creation should succeed");
    fixture
        .service
        .cancel(withdrawn.id(), client)
        .await
        .expect("cancellation should succeed");

    let open_only = fixture
        .service
        .list(TaskStatusFilter::Status(TaskStatus::Open))
        .await
        .expect("listing should succeed");
    let ids: Vec<_> = open_only.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![kept.id()]);

    let cancelled_only = fixture
        .service
        .list(TaskStatusFilter::Status(TaskStatus::Cancelled))
        .await
        .expect("listing should succeed");
    assert_eq!(cancelled_only.len(), 1);
}

#[rstest]
#[case("all", TaskStatusFilter::All)]
#[case("ALL", TaskStatusFilter::All)]
#[case("open", TaskStatusFilter::Status(TaskStatus::Open))]
#[case("in_progress", TaskStatusFilter::Status(TaskStatus::InProgress))]
fn status_filter_parses_presentation_strings(
    #[case] raw: &str,
    #[case] expected: TaskStatusFilter,
) {
    assert_eq!(TaskStatusFilter::try_from(raw), Ok(expected));
}

#[rstest]
fn status_filter_rejects_unknown_strings() {
    assert!(TaskStatusFilter::try_from("everything").is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_by_non_client_mutates_nothing(fixture: Fixture) {
    let client = ProfileId::new();
    let stranger = ProfileId::new();
    let created = fixture
        .service
        .create(request(client, "Essay"))
        .await
        .expect("task creation should succeed");

    let result = fixture.service.cancel(created.id(), stranger).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::NotTaskClient { caller, .. }) if caller == stranger
    ));
    let fetched = fixture
        .service
        .get(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched.status(), TaskStatus::Open);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_requires_work_in_progress(fixture: Fixture) {
    let client = ProfileId::new();
    let created = fixture
        .service
        .create(request(client, "Essay"))
        .await
        .expect("task creation should succeed");

    let premature = fixture.service.complete(created.id(), client).await;
    assert!(matches!(
        premature,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStatusTransition { .. }
        ))
    ));

    let mut assigned = created;
    assigned
        .assign(ProfileId::new(), &DefaultClock)
        .expect("assignment should succeed");
    fixture
        .repository
        .update(&assigned)
        .await
        .expect("update should succeed");

    let completed = fixture
        .service
        .complete(assigned.id(), client)
        .await
        .expect("completion should succeed");
    assert_eq!(completed.status(), TaskStatus::Completed);
    assert!(completed.freelancer().is_some());
}
