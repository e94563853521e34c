//! Diesel row models for bid persistence.

use super::schema::bids;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for bid records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bids)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BidRow {
    /// Bid identifier.
    pub id: uuid::Uuid,
    /// Task the bid targets.
    pub task_id: uuid::Uuid,
    /// Bidding freelancer.
    pub freelancer_id: uuid::Uuid,
    /// Offered price in minor currency units.
    pub amount_minor: i64,
    /// Proposal text.
    pub proposal: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for bid records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bids)]
pub struct NewBidRow {
    /// Bid identifier.
    pub id: uuid::Uuid,
    /// Task the bid targets.
    pub task_id: uuid::Uuid,
    /// Bidding freelancer.
    pub freelancer_id: uuid::Uuid,
    /// Offered price in minor currency units.
    pub amount_minor: i64,
    /// Proposal text.
    pub proposal: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
