//! Unit tests for task status transition validation.

use crate::profile::domain::ProfileId;
use crate::task::domain::{NewTaskParams, Task, TaskDomainError, TaskStatus};
use chrono::{Duration, Utc};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn open_task(clock: DefaultClock) -> Result<Task, TaskDomainError> {
    let params = NewTaskParams::new(
        "Transition test task",
        "Exercise the lifecycle state machine.",
        150_000,
        Utc::now() + Duration::days(3),
        ProfileId::new(),
    );
    Task::new(params, &clock)
}

#[rstest]
#[case(TaskStatus::Open, TaskStatus::Open, false)]
#[case(TaskStatus::Open, TaskStatus::InProgress, true)]
#[case(TaskStatus::Open, TaskStatus::Completed, false)]
#[case(TaskStatus::Open, TaskStatus::Cancelled, true)]
#[case(TaskStatus::InProgress, TaskStatus::Open, false)]
#[case(TaskStatus::InProgress, TaskStatus::InProgress, false)]
#[case(TaskStatus::InProgress, TaskStatus::Completed, true)]
#[case(TaskStatus::InProgress, TaskStatus::Cancelled, false)]
#[case(TaskStatus::Completed, TaskStatus::Open, false)]
#[case(TaskStatus::Completed, TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, TaskStatus::Completed, false)]
#[case(TaskStatus::Completed, TaskStatus::Cancelled, false)]
#[case(TaskStatus::Cancelled, TaskStatus::Open, false)]
#[case(TaskStatus::Cancelled, TaskStatus::InProgress, false)]
#[case(TaskStatus::Cancelled, TaskStatus::Completed, false)]
#[case(TaskStatus::Cancelled, TaskStatus::Cancelled, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(TaskStatus::Open, false)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, true)]
#[case(TaskStatus::Cancelled, true)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
fn assign_sets_freelancer_and_moves_to_in_progress(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    let original_updated_at = task.updated_at();
    let freelancer = ProfileId::new();

    task.assign(freelancer, &clock)?;

    ensure!(task.status() == TaskStatus::InProgress);
    ensure!(task.freelancer() == Some(freelancer));
    ensure!(task.updated_at() >= original_updated_at);
    Ok(())
}

#[rstest]
fn assign_on_cancelled_task_mutates_nothing(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    task.cancel(&clock)?;
    let task_id = task.id();
    let original_updated_at = task.updated_at();

    let result = task.assign(ProfileId::new(), &clock);
    let expected = Err(TaskDomainError::InvalidStatusTransition {
        task_id,
        from: TaskStatus::Cancelled,
        to: TaskStatus::InProgress,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::Cancelled);
    ensure!(task.freelancer().is_none());
    ensure!(task.updated_at() == original_updated_at);
    Ok(())
}

#[rstest]
fn complete_requires_in_progress(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    let task_id = task.id();

    let result = task.complete(&clock);
    let expected = Err(TaskDomainError::InvalidStatusTransition {
        task_id,
        from: TaskStatus::Open,
        to: TaskStatus::Completed,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }

    task.assign(ProfileId::new(), &clock)?;
    task.complete(&clock)?;
    ensure!(task.status() == TaskStatus::Completed);
    ensure!(task.freelancer().is_some());
    Ok(())
}

#[rstest]
fn cancel_is_rejected_once_work_started(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    task.assign(ProfileId::new(), &clock)?;
    let task_id = task.id();

    let result = task.cancel(&clock);
    let expected = Err(TaskDomainError::InvalidStatusTransition {
        task_id,
        from: TaskStatus::InProgress,
        to: TaskStatus::Cancelled,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[case(TaskStatus::Completed)]
#[case(TaskStatus::Cancelled)]
fn terminal_status_rejects_all_transitions(
    #[case] terminal_status: TaskStatus,
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;

    if terminal_status == TaskStatus::Completed {
        task.assign(ProfileId::new(), &clock)?;
        task.complete(&clock)?;
    } else {
        task.cancel(&clock)?;
    }

    ensure!(task.status() == terminal_status);
    ensure!(task.assign(ProfileId::new(), &clock).is_err());
    ensure!(task.complete(&clock).is_err());
    ensure!(task.cancel(&clock).is_err());
    ensure!(task.status() == terminal_status);
    Ok(())
}

#[rstest]
fn assign_rejects_second_freelancer(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    let first = ProfileId::new();
    task.assign(first, &clock)?;

    // Already guarded by the status machine; the freelancer field is
    // untouched either way.
    ensure!(task.assign(ProfileId::new(), &clock).is_err());
    ensure!(task.freelancer() == Some(first));
    Ok(())
}
