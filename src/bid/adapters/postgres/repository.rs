//! `PostgreSQL` repository implementation for bid storage.

use super::{
    models::{BidRow, NewBidRow},
    schema::bids,
};
use crate::bid::{
    domain::{Bid, BidId, BidStatus, PersistedBidData},
    ports::{BidRepository, BidRepositoryError, BidRepositoryResult},
};
use crate::profile::domain::ProfileId;
use crate::task::domain::{Money, TaskId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by bid adapters.
pub type BidPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed bid repository.
#[derive(Debug, Clone)]
pub struct PostgresBidRepository {
    pool: BidPgPool,
}

impl PostgresBidRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BidPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BidRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BidRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BidRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BidRepositoryError::persistence)?
    }
}

#[async_trait]
impl BidRepository for PostgresBidRepository {
    async fn store(&self, bid: &Bid) -> BidRepositoryResult<()> {
        let bid_id = bid.id();
        let task_id = bid.task();
        let freelancer = bid.freelancer();
        let new_row = to_new_row(bid);

        self.run_blocking(move |connection| {
            diesel::insert_into(bids::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_placement_unique_violation(info.as_ref()) =>
                    {
                        BidRepositoryError::DuplicateFreelancerBid {
                            task_id,
                            freelancer,
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BidRepositoryError::DuplicateBid(bid_id)
                    }
                    _ => BidRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BidId) -> BidRepositoryResult<Option<Bid>> {
        self.run_blocking(move |connection| {
            let row = bids::table
                .filter(bids::id.eq(id.into_inner()))
                .select(BidRow::as_select())
                .first::<BidRow>(connection)
                .optional()
                .map_err(BidRepositoryError::persistence)?;
            row.map(row_to_bid).transpose()
        })
        .await
    }

    async fn list_for_task(&self, task: TaskId) -> BidRepositoryResult<Vec<Bid>> {
        self.run_blocking(move |connection| {
            let rows = bids::table
                .filter(bids::task_id.eq(task.into_inner()))
                .order(bids::created_at.desc())
                .select(BidRow::as_select())
                .load::<BidRow>(connection)
                .map_err(BidRepositoryError::persistence)?;
            rows.into_iter().map(row_to_bid).collect()
        })
        .await
    }
}

fn to_new_row(bid: &Bid) -> NewBidRow {
    NewBidRow {
        id: bid.id().into_inner(),
        task_id: bid.task().into_inner(),
        freelancer_id: bid.freelancer().into_inner(),
        amount_minor: bid.amount().minor_units(),
        proposal: bid.proposal().to_owned(),
        status: bid.status().as_str().to_owned(),
        created_at: bid.created_at(),
        updated_at: bid.updated_at(),
    }
}

pub(super) fn row_to_bid(row: BidRow) -> BidRepositoryResult<Bid> {
    let status =
        BidStatus::try_from(row.status.as_str()).map_err(BidRepositoryError::persistence)?;
    let amount = Money::new(row.amount_minor).map_err(BidRepositoryError::persistence)?;

    Ok(Bid::from_persisted(PersistedBidData {
        id: BidId::from_uuid(row.id),
        task: TaskId::from_uuid(row.task_id),
        freelancer: ProfileId::from_uuid(row.freelancer_id),
        amount,
        proposal: row.proposal,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn is_placement_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_bids_task_freelancer_unique")
}
