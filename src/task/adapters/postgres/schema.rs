//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Posted task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Short title of the posted work.
        #[max_length = 255]
        title -> Varchar,
        /// Detailed requirements.
        description -> Text,
        /// Offered budget in minor currency units.
        budget_minor -> Int8,
        /// Latest acceptable delivery time.
        deadline -> Timestamptz,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Client who posted the task.
        client_id -> Uuid,
        /// Freelancer assigned once a bid is accepted.
        freelancer_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
