//! MongoDB-backed `UserStore` implementation.
//!
//! The document adapter applies the same application-level uniqueness
//! pre-check as the relational adapter so both backends share one failure
//! taxonomy. The collection's unique index on the identity number is
//! ensured at startup and covers the race between the check and the
//! write: duplicate-key failures (server code 11000) map to the port's
//! duplicate-identity error.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{IdentityNumber, PersonName, User, UserId};

const COLLECTION_NAME: &str = "users";

/// MongoDB server error code for a unique-index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Internal document shape for the users collection.
///
/// An implementation detail of this adapter, never exposed to the domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    identity_number: String,
}

/// MongoDB-backed implementation of the `UserStore` port.
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Create a new store over the given database handle.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Ensure the unique index on the identity number exists.
    ///
    /// Called once at startup; creating an index that already exists is a
    /// no-op on the server.
    pub async fn ensure_indexes(&self) -> Result<(), UserStoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "identityNumber": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Map driver errors to port errors.
fn map_mongo_error(error: mongodb::error::Error) -> UserStoreError {
    debug!(error = %error, "mongodb operation failed");

    if is_duplicate_key(&error) {
        return UserStoreError::duplicate_identity();
    }

    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            UserStoreError::connection(error.to_string())
        }
        _ => UserStoreError::query(error.to_string()),
    }
}

/// Convert a stored document to a domain record.
fn document_to_user(document: UserDocument) -> Result<User, UserStoreError> {
    User::try_from_strings(&document.id, document.name, document.identity_number)
        .map_err(|err| UserStoreError::query(format!("corrupt user document: {err}")))
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn add_user(
        &self,
        name: &PersonName,
        identity_number: &IdentityNumber,
    ) -> Result<UserId, UserStoreError> {
        let existing = self
            .collection
            .find_one(doc! { "identityNumber": identity_number.as_ref() })
            .await
            .map_err(map_mongo_error)?;
        if existing.is_some() {
            return Err(UserStoreError::duplicate_identity());
        }

        let id = UserId::random();
        let document = UserDocument {
            id: id.to_string(),
            name: name.as_ref().to_owned(),
            identity_number: identity_number.as_ref().to_owned(),
        };

        self.collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;

        Ok(id)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_mongo_error)?;

        match document {
            Some(document) => document_to_user(document),
            None => Err(UserStoreError::not_found(id.to_string())),
        }
    }

    async fn update_name(&self, id: &UserId, name: &PersonName) -> Result<bool, UserStoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$set": { "name": name.as_ref() } },
            )
            .await
            .map_err(map_mongo_error)?;

        Ok(result.matched_count > 0)
    }

    async fn update_identity_number(
        &self,
        id: &UserId,
        identity_number: &IdentityNumber,
    ) -> Result<bool, UserStoreError> {
        let held_by_other = self
            .collection
            .find_one(doc! {
                "identityNumber": identity_number.as_ref(),
                "_id": { "$ne": id.to_string() },
            })
            .await
            .map_err(map_mongo_error)?;
        if held_by_other.is_some() {
            return Err(UserStoreError::duplicate_identity());
        }

        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$set": { "identityNumber": identity_number.as_ref() } },
            )
            .await
            .map_err(map_mongo_error)?;

        Ok(result.matched_count > 0)
    }
}
