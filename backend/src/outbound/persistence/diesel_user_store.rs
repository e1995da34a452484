//! PostgreSQL-backed `UserStore` implementation using Diesel.
//!
//! The relational adapter pre-checks identity-number uniqueness at the
//! application level before insert and update so collisions surface as the
//! port's duplicate-identity error. The unique index remains the safety
//! net for the race between the check and the write: `UniqueViolation`
//! failures map to the same error.

use async_trait::async_trait;
use diesel::dsl::{exists, now};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{IdentityNumber, PersonName, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserStore` port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to port errors.
fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to port errors.
fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserStoreError::duplicate_identity()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => UserStoreError::query("database error"),
        DieselError::NotFound => UserStoreError::query("record not found"),
        _ => UserStoreError::query("database error"),
    }
}

/// Convert a database row to a domain record.
fn row_to_user(row: UserRow) -> Result<User, UserStoreError> {
    User::try_from_strings(&row.id, row.name, row.identity_number)
        .map_err(|err| UserStoreError::query(format!("corrupt user row: {err}")))
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn add_user(
        &self,
        name: &PersonName,
        identity_number: &IdentityNumber,
    ) -> Result<UserId, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let already_registered: bool = diesel::select(exists(
            users::table.filter(users::identity_number.eq(identity_number.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if already_registered {
            return Err(UserStoreError::duplicate_identity());
        }

        let id = UserId::random();
        let id_text = id.to_string();
        let row = NewUserRow {
            id: &id_text,
            name: name.as_ref(),
            identity_number: identity_number.as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(id)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.to_string())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(UserStoreError::not_found(id.to_string())),
        }
    }

    async fn update_name(&self, id: &UserId, name: &PersonName) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(users::table.find(id.to_string()))
            .set((users::name.eq(name.as_ref()), users::updated_at.eq(now)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn update_identity_number(
        &self,
        id: &UserId,
        identity_number: &IdentityNumber,
    ) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let held_by_other: bool = diesel::select(exists(
            users::table
                .filter(users::identity_number.eq(identity_number.as_ref()))
                .filter(users::id.ne(id.to_string())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if held_by_other {
            return Err(UserStoreError::duplicate_identity());
        }

        let affected = diesel::update(users::table.find(id.to_string()))
            .set((
                users::identity_number.eq(identity_number.as_ref()),
                users::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
