//! Storage port for user records and its error taxonomy.
//!
//! Each backend adapter implements [`UserStore`] independently; records
//! created through one adapter are invisible to the other. The contract
//! keeps the duplicate-identity check uniform across backends: adapters
//! pre-check at the application level and additionally map their storage
//! engine's uniqueness-constraint violation to the same error, covering
//! the race between the check and the write.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{IdentityNumber, PersonName, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store adapters.
    pub enum UserStoreError {
        /// The identity number is already attached to another record in
        /// this backend.
        DuplicateIdentity => "identity number already registered",
        /// No record with the requested id exists in this backend.
        NotFound { id: String } => "user not found: {id}",
        /// The backend could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
    }
}

/// Uniform storage contract implemented by every backend adapter.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record and return its generated identifier.
    ///
    /// Fails with [`UserStoreError::DuplicateIdentity`] when the identity
    /// number already exists in this backend.
    async fn add_user(
        &self,
        name: &PersonName,
        identity_number: &IdentityNumber,
    ) -> Result<UserId, UserStoreError>;

    /// Fetch a record by identifier.
    ///
    /// Fails with [`UserStoreError::NotFound`] when no record exists.
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError>;

    /// Replace the name of an existing record.
    ///
    /// Returns `false` (not an error) when no record with `id` exists.
    /// Names are not unique, so no uniqueness check applies.
    async fn update_name(&self, id: &UserId, name: &PersonName) -> Result<bool, UserStoreError>;

    /// Replace the identity number of an existing record.
    ///
    /// Returns `false` when no record with `id` exists. Fails with
    /// [`UserStoreError::DuplicateIdentity`] when another record already
    /// holds the value; re-asserting the record's current value is a no-op
    /// returning `true`.
    async fn update_identity_number(
        &self,
        id: &UserId,
        identity_number: &IdentityNumber,
    ) -> Result<bool, UserStoreError>;
}

/// Deterministic in-memory [`UserStore`] used by tests and as the wiring
/// fallback when a backend has no configured database.
#[derive(Debug, Default)]
pub struct FixtureUserStore {
    records: Mutex<HashMap<UserId, User>>,
}

impl FixtureUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut HashMap<UserId, User>) -> T) -> T {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut records)
    }
}

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn add_user(
        &self,
        name: &PersonName,
        identity_number: &IdentityNumber,
    ) -> Result<UserId, UserStoreError> {
        self.with_records(|records| {
            if records
                .values()
                .any(|user| user.identity_number() == identity_number)
            {
                return Err(UserStoreError::duplicate_identity());
            }
            let id = UserId::random();
            records.insert(id, User::new(id, name.clone(), identity_number.clone()));
            Ok(id)
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.with_records(|records| {
            records
                .get(id)
                .cloned()
                .ok_or_else(|| UserStoreError::not_found(id.to_string()))
        })
    }

    async fn update_name(&self, id: &UserId, name: &PersonName) -> Result<bool, UserStoreError> {
        self.with_records(|records| {
            let Some(user) = records.get(id) else {
                return Ok(false);
            };
            let updated = User::new(*user.id(), name.clone(), user.identity_number().clone());
            records.insert(*id, updated);
            Ok(true)
        })
    }

    async fn update_identity_number(
        &self,
        id: &UserId,
        identity_number: &IdentityNumber,
    ) -> Result<bool, UserStoreError> {
        self.with_records(|records| {
            if !records.contains_key(id) {
                return Ok(false);
            }
            if records
                .values()
                .any(|user| user.id() != id && user.identity_number() == identity_number)
            {
                return Err(UserStoreError::duplicate_identity());
            }
            let Some(user) = records.get(id) else {
                return Ok(false);
            };
            let updated = User::new(*user.id(), user.name().clone(), identity_number.clone());
            records.insert(*id, updated);
            Ok(true)
        })
    }
}
