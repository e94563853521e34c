//! Bid aggregate root and status machine.

use super::{BidDomainError, BidId, ParseBidStatusError};
use crate::profile::domain::ProfileId;
use crate::task::domain::{Money, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Bid lifecycle status.
///
/// A bid starts `pending` and is resolved exactly once: the task's client
/// accepts it, or it is rejected when a sibling bid wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    /// Bid is awaiting the client's decision.
    Pending,
    /// The client accepted this bid.
    Accepted,
    /// A sibling bid was accepted instead.
    Rejected,
}

impl BidStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` when a bid in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }

    /// Returns `true` if this is a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for BidStatus {
    type Error = ParseBidStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseBidStatusError(value.to_owned())),
        }
    }
}

/// Validated input for placing a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBidParams {
    /// The task being bid on.
    pub task: TaskId,
    /// The bidding freelancer.
    pub freelancer: ProfileId,
    /// Offered price in minor currency units.
    pub amount_minor: i64,
    /// Why the freelancer is the right fit.
    pub proposal: String,
}

impl NewBidParams {
    /// Creates new bid parameters.
    #[must_use]
    pub fn new(
        task: TaskId,
        freelancer: ProfileId,
        amount_minor: i64,
        proposal: impl Into<String>,
    ) -> Self {
        Self {
            task,
            freelancer,
            amount_minor,
            proposal: proposal.into(),
        }
    }
}

/// Bid aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    id: BidId,
    task: TaskId,
    freelancer: ProfileId,
    amount: Money,
    proposal: String,
    status: BidStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted bid aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBidData {
    /// Persisted bid identifier.
    pub id: BidId,
    /// Persisted task reference.
    pub task: TaskId,
    /// Persisted bidding freelancer.
    pub freelancer: ProfileId,
    /// Persisted offered price.
    pub amount: Money,
    /// Persisted proposal text.
    pub proposal: String,
    /// Persisted lifecycle status.
    pub status: BidStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    /// Creates a new pending bid from validated freelancer input.
    ///
    /// # Errors
    ///
    /// Returns [`BidDomainError`] when the proposal is empty after trimming
    /// or the amount is not positive.
    pub fn new(params: NewBidParams, clock: &impl Clock) -> Result<Self, BidDomainError> {
        let proposal = params.proposal.trim();
        if proposal.is_empty() {
            return Err(BidDomainError::EmptyProposal);
        }
        let amount = Money::new(params.amount_minor)?;

        let timestamp = clock.utc();
        Ok(Self {
            id: BidId::new(),
            task: params.task,
            freelancer: params.freelancer,
            amount,
            proposal: proposal.to_owned(),
            status: BidStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a bid from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBidData) -> Self {
        Self {
            id: data.id,
            task: data.task,
            freelancer: data.freelancer,
            amount: data.amount,
            proposal: data.proposal,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the bid identifier.
    #[must_use]
    pub const fn id(&self) -> BidId {
        self.id
    }

    /// Returns the task this bid targets.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the bidding freelancer.
    #[must_use]
    pub const fn freelancer(&self) -> ProfileId {
        self.freelancer
    }

    /// Returns the offered price.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the proposal text.
    #[must_use]
    pub fn proposal(&self) -> &str {
        &self.proposal
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BidStatus {
        self.status
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

    /// Marks the bid as accepted by the task's client.
    ///
    /// # Errors
    ///
    /// Returns [`BidDomainError::InvalidStatusTransition`] when the bid is
    /// not pending.
    pub fn accept(&mut self, clock: &impl Clock) -> Result<(), BidDomainError> {
        self.ensure_transition(BidStatus::Accepted)?;
        self.status = BidStatus::Accepted;
        self.touch(clock);
        Ok(())
    }

    /// Marks the bid as rejected because a sibling bid won.
    ///
    /// # Errors
    ///
    /// Returns [`BidDomainError::InvalidStatusTransition`] when the bid is
    /// not pending.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), BidDomainError> {
        self.ensure_transition(BidStatus::Rejected)?;
        self.status = BidStatus::Rejected;
        self.touch(clock);
        Ok(())
    }

    /// Validates a status change against the transition table.
    const fn ensure_transition(&self, to: BidStatus) -> Result<(), BidDomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(BidDomainError::InvalidStatusTransition {
                bid_id: self.id,
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
