//! Service layer for task creation, retrieval, and client-driven transitions.

use crate::profile::domain::ProfileId;
use crate::task::{
    domain::{NewTaskParams, Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskStatusFilter},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for posting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    budget_minor: i64,
    deadline: DateTime<Utc>,
    client: ProfileId,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
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

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task does not exist.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    /// The caller is not the client who posted the task.
    #[error("user {caller} is not the client of task {task_id}")]
    NotTaskClient {
        /// The task being mutated.
        task_id: TaskId,
        /// The rejected caller.
        caller: ProfileId,
    },
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every mutating operation re-validates caller identity against the task's
/// client before writing; the storage layer is never trusted to authorize.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Posts a new task in status `open`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails or the
    /// repository rejects the write.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let params = NewTaskParams::new(
            request.title,
            request.description,
            request.budget_minor,
            request.deadline,
            request.client,
        );
        let task = Task::new(params, &*self.clock)?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), client = %task.client(), "task posted");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownTask`] when the task does not
    /// exist, or a repository error when the lookup fails.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::UnknownTask(id))
    }

    /// Lists tasks passing the filter, newest creation first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list(&self, filter: TaskStatusFilter) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Marks an in-progress task as completed on behalf of its client.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotTaskClient`] when the caller did not
    /// post the task, a domain error when the task is not in progress, or a
    /// repository error when persistence fails.
    pub async fn complete(&self, id: TaskId, caller: ProfileId) -> TaskLifecycleResult<Task> {
        let mut task = self.authorized_task(id, caller).await?;
        task.complete(&*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), "task completed");
        Ok(task)
    }

    /// Withdraws an open task on behalf of its client.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotTaskClient`] when the caller did not
    /// post the task, a domain error when the task is not open, or a
    /// repository error when persistence fails.
    pub async fn cancel(&self, id: TaskId, caller: ProfileId) -> TaskLifecycleResult<Task> {
        let mut task = self.authorized_task(id, caller).await?;
        task.cancel(&*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), "task cancelled");
        Ok(task)
    }

    /// Loads a task and verifies the caller posted it.
    async fn authorized_task(&self, id: TaskId, caller: ProfileId) -> TaskLifecycleResult<Task> {
        let task = self.get(id).await?;
        if task.client() != caller {
            return Err(TaskLifecycleError::NotTaskClient {
                task_id: id,
                caller,
            });
        }
        Ok(task)
    }
}
