//! Error types for task domain validation and parsing.

use super::{InvalidAmountError, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The budget is not a positive amount.
    #[error(transparent)]
    InvalidBudget(#[from] InvalidAmountError),

    /// The deadline lies in the past.
    #[error("task deadline {deadline} is before the current time {now}")]
    DeadlinePassed {
        /// The rejected deadline.
        deadline: DateTime<Utc>,
        /// The clock reading at validation time.
        now: DateTime<Utc>,
    },

    /// The requested status change is not permitted.
    #[error("invalid task status transition from {from} to {to} for task {task_id}")]
    InvalidStatusTransition {
        /// The task being mutated.
        task_id: TaskId,
        /// The current status.
        from: TaskStatus,
        /// The attempted target status.
        to: TaskStatus,
    },

    /// The task already carries an assigned freelancer.
    #[error("task {0} already has an assigned freelancer")]
    FreelancerAlreadyAssigned(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
