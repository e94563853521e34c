//! Diesel schema for profile persistence.

diesel::table! {
    /// Marketplace participant records.
    profiles (id) {
        /// Profile identifier.
        id -> Uuid,
        /// Unique email address.
        #[max_length = 255]
        email -> Varchar,
        /// Optional display name shown beside bids and tasks.
        #[max_length = 255]
        display_name -> Nullable<Varchar>,
        /// Optional institution.
        #[max_length = 255]
        institution -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
