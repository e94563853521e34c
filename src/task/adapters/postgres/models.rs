//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Budget in minor currency units.
    pub budget_minor: i64,
    /// Delivery deadline.
    pub deadline: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Posting client.
    pub client_id: uuid::Uuid,
    /// Assigned freelancer, if any.
    pub freelancer_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Budget in minor currency units.
    pub budget_minor: i64,
    /// Delivery deadline.
    pub deadline: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Posting client.
    pub client_id: uuid::Uuid,
    /// Assigned freelancer, if any.
    pub freelancer_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
