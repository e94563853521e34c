//! `PostgreSQL` bid resolution gateway.
//!
//! Commits the accept-one/reject-rest write set inside a single database
//! transaction. The task update is conditional on the stored status still
//! being `open` and the winning-bid update on the stored status still being
//! `pending`, so a concurrent resolution loses the race cleanly: the
//! transaction rolls back and the caller sees an invalid-state error.

use super::{models::BidRow, repository::row_to_bid, schema::bids};
use crate::bid::{
    domain::BidStatus,
    ports::{
        BidResolutionGateway, ResolutionGatewayError, ResolutionGatewayResult, ResolutionOutcome,
        ResolutionWrite,
    },
};
use crate::profile::domain::ProfileId;
use crate::task::adapters::postgres::schema::tasks;
use crate::task::domain::TaskStatus;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by the resolution gateway.
type ResolutionPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed bid resolution gateway.
#[derive(Debug, Clone)]
pub struct PostgresBidResolution {
    pool: ResolutionPgPool,
}

/// Transaction-internal error carrying either a guard failure or a raw
/// database error until the transaction result is mapped.
enum TxError {
    Gateway(ResolutionGatewayError),
    Diesel(DieselError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        Self::Diesel(err)
    }
}

impl PostgresBidResolution {
    /// Creates a new gateway from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ResolutionPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ResolutionGatewayResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ResolutionGatewayResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ResolutionGatewayError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ResolutionGatewayError::persistence)?
    }
}

#[async_trait]
impl BidResolutionGateway for PostgresBidResolution {
    async fn commit(&self, write: ResolutionWrite) -> ResolutionGatewayResult<ResolutionOutcome> {
        let task_id = write.task.id();
        let accepted_id = write.accepted.id();
        let task_status = write.task.status().as_str().to_owned();
        let freelancer_id = write.task.freelancer().map(ProfileId::into_inner);
        let task_updated_at = write.task.updated_at();
        let accepted_updated_at = write.accepted.updated_at();
        let rejected_at = write.rejected_at;

        let rejected_rows = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<Vec<BidRow>, TxError, _>(|conn| {
                        let assigned = diesel::update(
                            tasks::table.filter(
                                tasks::id
                                    .eq(task_id.into_inner())
                                    .and(tasks::status.eq(TaskStatus::Open.as_str())),
                            ),
                        )
                        .set((
                            tasks::status.eq(task_status),
                            tasks::freelancer_id.eq(freelancer_id),
                            tasks::updated_at.eq(task_updated_at),
                        ))
                        .execute(conn)?;
                        if assigned == 0 {
                            return Err(TxError::Gateway(missing_task_error(conn, task_id)?));
                        }

                        let accepted_count = diesel::update(
                            bids::table.filter(
                                bids::id
                                    .eq(accepted_id.into_inner())
                                    .and(bids::status.eq(BidStatus::Pending.as_str())),
                            ),
                        )
                        .set((
                            bids::status.eq(BidStatus::Accepted.as_str()),
                            bids::updated_at.eq(accepted_updated_at),
                        ))
                        .execute(conn)?;
                        if accepted_count == 0 {
                            return Err(TxError::Gateway(missing_bid_error(conn, accepted_id)?));
                        }

                        let rows = diesel::update(
                            bids::table.filter(
                                bids::task_id
                                    .eq(task_id.into_inner())
                                    .and(bids::id.ne(accepted_id.into_inner()))
                                    .and(bids::status.eq(BidStatus::Pending.as_str())),
                            ),
                        )
                        .set((
                            bids::status.eq(BidStatus::Rejected.as_str()),
                            bids::updated_at.eq(rejected_at),
                        ))
                        .get_results::<BidRow>(conn)?;

                        Ok(rows)
                    })
                    .map_err(|err| match err {
                        TxError::Gateway(gateway_err) => gateway_err,
                        TxError::Diesel(diesel_err) => {
                            ResolutionGatewayError::persistence(diesel_err)
                        }
                    })
            })
            .await?;

        let rejected = rejected_rows
            .into_iter()
            .map(|row| row_to_bid(row).map_err(ResolutionGatewayError::persistence))
            .collect::<ResolutionGatewayResult<Vec<_>>>()?;

        Ok(ResolutionOutcome {
            task: write.task,
            accepted: write.accepted,
            rejected,
        })
    }
}

/// Distinguishes a vanished task from one that lost the open-status race.
fn missing_task_error(
    conn: &mut PgConnection,
    task_id: crate::task::domain::TaskId,
) -> Result<ResolutionGatewayError, DieselError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        tasks::table.filter(tasks::id.eq(task_id.into_inner())),
    ))
    .get_result(conn)?;
    Ok(if exists {
        ResolutionGatewayError::TaskNotOpen(task_id)
    } else {
        ResolutionGatewayError::TaskNotFound(task_id)
    })
}

/// Distinguishes a vanished bid from one that was already resolved.
fn missing_bid_error(
    conn: &mut PgConnection,
    bid_id: crate::bid::domain::BidId,
) -> Result<ResolutionGatewayError, DieselError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        bids::table.filter(bids::id.eq(bid_id.into_inner())),
    ))
    .get_result(conn)?;
    Ok(if exists {
        ResolutionGatewayError::BidNotPending(bid_id)
    } else {
        ResolutionGatewayError::BidNotFound(bid_id)
    })
}
