//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and
//! never cross into the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub identity_number: String,
    #[expect(dead_code, reason = "storage-level bookkeeping, not surfaced in the domain")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "storage-level bookkeeping, not surfaced in the domain")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub identity_number: &'a str,
}
