//! Task aggregate root and lifecycle status machine.

use super::{Money, ParseTaskStatusError, TaskDomainError, TaskId};
use crate::profile::domain::ProfileId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is posted and accepting bids.
    Open,
    /// A bid has been accepted and the freelancer is working.
    InProgress,
    /// The assigned work has been delivered.
    Completed,
    /// The task was withdrawn before any bid was accepted.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when a task in this status may move to `next`.
    ///
    /// `InProgress` is only reachable through [`Task::assign`], which also
    /// records the freelancer; a cancelled task never had one.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress)
                | (Self::Open, Self::Cancelled)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Returns `true` if this is a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskParams {
    /// Short title of the posted work.
    pub title: String,
    /// Detailed requirements.
    pub description: String,
    /// Offered budget in minor currency units.
    pub budget_minor: i64,
    /// Latest acceptable delivery time.
    pub deadline: DateTime<Utc>,
    /// The client posting the task.
    pub client: ProfileId,
}

impl NewTaskParams {
    /// Creates new task parameters.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        budget_minor: i64,
        deadline: DateTime<Utc>,
        client: ProfileId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            budget_minor,
            deadline,
            client,
        }
    }
}

/// Task aggregate root.
///
/// Invariant: the freelancer is `Some` exactly when the status is
/// `InProgress` or `Completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    budget: Money,
    deadline: DateTime<Utc>,
    status: TaskStatus,
    client: ProfileId,
    freelancer: Option<ProfileId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted budget.
    pub budget: Money,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted client identifier.
    pub client: ProfileId,
    /// Persisted freelancer identifier, if assigned.
    pub freelancer: Option<ProfileId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new open task from validated client input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title or description is empty
    /// after trimming, the budget is not positive, or the deadline is before
    /// the current clock reading.
    pub fn new(params: NewTaskParams, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = params.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let description = params.description.trim();
        if description.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        let budget = Money::new(params.budget_minor)?;

        let timestamp = clock.utc();
        if params.deadline < timestamp {
            return Err(TaskDomainError::DeadlinePassed {
                deadline: params.deadline,
                now: timestamp,
            });
        }

        Ok(Self {
            id: TaskId::new(),
            title: title.to_owned(),
            description: description.to_owned(),
            budget,
            deadline: params.deadline,
            status: TaskStatus::Open,
            client: params.client,
            freelancer: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let coherent = data.freelancer.is_some()
            == matches!(data.status, TaskStatus::InProgress | TaskStatus::Completed);
        debug_assert!(
            coherent,
            "persisted task rows must carry a freelancer exactly when in_progress or completed"
        );

        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            budget: data.budget,
            deadline: data.deadline,
            status: data.status,
            client: data.client,
            freelancer: data.freelancer,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the offered budget.
    #[must_use]
    pub const fn budget(&self) -> Money {
        self.budget
    }

    /// Returns the delivery deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the posting client.
    #[must_use]
    pub const fn client(&self) -> ProfileId {
        self.client
    }

    /// Returns the assigned freelancer, if any.
    #[must_use]
    pub const fn freelancer(&self) -> Option<ProfileId> {
        self.freelancer
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns the winning freelancer and moves the task to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// not open, or [`TaskDomainError::FreelancerAlreadyAssigned`] when a
    /// freelancer is already recorded.
    pub fn assign(
        &mut self,
        freelancer: ProfileId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::InProgress)?;
        if self.freelancer.is_some() {
            return Err(TaskDomainError::FreelancerAlreadyAssigned(self.id));
        }
        self.freelancer = Some(freelancer);
        self.status = TaskStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Marks the assigned work as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// not in progress.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Completed)?;
        self.status = TaskStatus::Completed;
        self.touch(clock);
        Ok(())
    }

    /// Withdraws an open task before any bid was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// not open.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Cancelled)?;
        self.status = TaskStatus::Cancelled;
        self.touch(clock);
        Ok(())
    }

    /// Validates a status change against the transition table.
    const fn ensure_transition(&self, to: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to,
            })
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
