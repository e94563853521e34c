//! `PostgreSQL` repository implementation for profile storage.

use super::{
    models::{NewProfileRow, ProfileRow},
    schema::profiles,
};
use crate::profile::{
    domain::{PersistedProfileData, Profile, ProfileId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by profile adapters.
pub type ProfilePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: ProfilePgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProfilePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let email = profile.email().to_owned();
        let new_row = to_new_row(profile);

        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        ProfileRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateProfile(profile_id)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let display_name = profile.display_name().map(ToOwned::to_owned);
        let institution = profile.institution().map(ToOwned::to_owned);
        let updated_at = profile.updated_at();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(profiles::table.filter(profiles::id.eq(profile_id.into_inner())))
                    .set((
                        profiles::display_name.eq(display_name),
                        profiles::institution.eq(institution),
                        profiles::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
                    .map_err(ProfileRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(ProfileRepositoryError::NotFound(profile_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::id.eq(id.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(row.map(row_to_profile))
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> ProfileRepositoryResult<Option<Profile>> {
        let lookup_email = email.to_owned();
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::email.eq(lookup_email))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(row.map(row_to_profile))
        })
        .await
    }
}

fn to_new_row(profile: &Profile) -> NewProfileRow {
    NewProfileRow {
        id: profile.id().into_inner(),
        email: profile.email().to_owned(),
        display_name: profile.display_name().map(ToOwned::to_owned),
        institution: profile.institution().map(ToOwned::to_owned),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

fn row_to_profile(row: ProfileRow) -> Profile {
    Profile::from_persisted(PersistedProfileData {
        id: ProfileId::from_uuid(row.id),
        email: row.email,
        display_name: row.display_name,
        institution: row.institution,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_profiles_email_unique")
}
