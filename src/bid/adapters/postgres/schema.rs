//! Diesel schema for bid persistence.

diesel::table! {
    /// Bid records placed against tasks.
    bids (id) {
        /// Bid identifier.
        id -> Uuid,
        /// Task the bid targets.
        task_id -> Uuid,
        /// Bidding freelancer.
        freelancer_id -> Uuid,
        /// Offered price in minor currency units.
        amount_minor -> Int8,
        /// Proposal text.
        proposal -> Text,
        /// Bid lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
