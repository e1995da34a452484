//! User record API handlers.
//!
//! ```text
//! POST /api/v1/users?db=mongo {"name":"Ada","identityNumber":"4827..."}
//! GET /api/v1/users/{id}
//! PATCH /api/v1/users/{id}/name {"name":"Ada Lovelace"}
//! PATCH /api/v1/users/{id}/identity-number {"identityNumber":"9912..."}
//! ```
//!
//! Every endpoint accepts an optional `db` query parameter selecting the
//! storage backend; requests are validated here before any backend call.

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::UserStoreError;
use crate::domain::{
    Error, IdentityNumber, PersonName, User, UserId, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Free-form name; must be non-empty.
    pub name: String,
    /// National identity number; must be non-empty and unused in the
    /// selected backend.
    pub identity_number: String,
}

/// Response body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    /// Generated record identifier.
    pub id: String,
}

/// Request body for `PATCH /api/v1/users/{id}/name`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserNameRequest {
    /// Replacement name; must be non-empty.
    pub name: String,
}

/// Request body for `PATCH /api/v1/users/{id}/identity-number`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdentityNumberRequest {
    /// Replacement identity number; must be non-empty.
    pub identity_number: String,
}

/// Response body for the update endpoints.
///
/// `updated: false` means no record with the requested id exists; it is a
/// deliberate "did nothing" signal, distinct from an error.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
    /// Whether a record existed and was updated.
    pub updated: bool,
}

/// Backend selector accepted by every endpoint.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BackendQuery {
    /// `mongo` (case-insensitive) selects the document backend; absent,
    /// empty, or unrecognized values select the relational default.
    pub db: Option<String>,
}

fn map_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match &err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => ("id", "invalid_id"),
        UserValidationError::EmptyName => ("name", "empty_name"),
        UserValidationError::NameTooLong { .. } => ("name", "name_too_long"),
        UserValidationError::EmptyIdentityNumber => ("identityNumber", "empty_identity_number"),
        UserValidationError::IdentityNumberTooLong { .. } => {
            ("identityNumber", "identity_number_too_long")
        }
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_store_error(err: UserStoreError) -> Error {
    match err {
        UserStoreError::DuplicateIdentity => {
            Error::conflict("identity number already registered")
        }
        UserStoreError::NotFound { id } => Error::not_found(format!("user not found: {id}")),
        UserStoreError::Connection { message } => Error::service_unavailable(message),
        UserStoreError::Query { message } => Error::internal(message),
    }
}

/// Create a user record in the selected backend.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    params(BackendQuery),
    responses(
        (status = 201, description = "Record created", body = CreateUserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Identity number already registered", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    query: web::Query<BackendQuery>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let CreateUserRequest {
        name,
        identity_number,
    } = payload.into_inner();
    let name = PersonName::new(name).map_err(map_validation_error)?;
    let identity_number = IdentityNumber::new(identity_number).map_err(map_validation_error)?;

    let id = state
        .stores
        .pick(query.db.as_deref())
        .add_user(&name, &identity_number)
        .await
        .map_err(map_store_error)?;

    Ok(HttpResponse::Created().json(CreateUserResponse { id: id.to_string() }))
}

/// Fetch a user record from the selected backend.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        BackendQuery,
        ("id" = String, Path, description = "Record identifier")
    ),
    responses(
        (status = 200, description = "Record found", body = User),
        (status = 404, description = "No record with this id", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    query: web::Query<BackendQuery>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let raw_id = path.into_inner();
    // A malformed id cannot name a stored record, so reads treat it the
    // same as an absent one.
    let id = UserId::parse(&raw_id)
        .map_err(|_| Error::not_found(format!("user not found: {raw_id}")))?;

    let user = state
        .stores
        .pick(query.db.as_deref())
        .get_user(&id)
        .await
        .map_err(map_store_error)?;

    Ok(web::Json(user))
}

/// Replace a record's name in the selected backend.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/name",
    request_body = UpdateUserNameRequest,
    params(
        BackendQuery,
        ("id" = String, Path, description = "Record identifier")
    ),
    responses(
        (status = 200, description = "Update outcome", body = UpdateUserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUserName"
)]
#[patch("/users/{id}/name")]
pub async fn update_user_name(
    state: web::Data<HttpState>,
    query: web::Query<BackendQuery>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserNameRequest>,
) -> ApiResult<web::Json<UpdateUserResponse>> {
    let name = PersonName::new(payload.into_inner().name).map_err(map_validation_error)?;

    // Updates report a missing record as `updated: false`, and an id that
    // cannot parse is a record that cannot exist.
    let Ok(id) = UserId::parse(path.into_inner()) else {
        return Ok(web::Json(UpdateUserResponse { updated: false }));
    };

    let updated = state
        .stores
        .pick(query.db.as_deref())
        .update_name(&id, &name)
        .await
        .map_err(map_store_error)?;

    Ok(web::Json(UpdateUserResponse { updated }))
}

/// Replace a record's identity number in the selected backend.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/identity-number",
    request_body = UpdateIdentityNumberRequest,
    params(
        BackendQuery,
        ("id" = String, Path, description = "Record identifier")
    ),
    responses(
        (status = 200, description = "Update outcome", body = UpdateUserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Identity number already registered", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUserIdentityNumber"
)]
#[patch("/users/{id}/identity-number")]
pub async fn update_identity_number(
    state: web::Data<HttpState>,
    query: web::Query<BackendQuery>,
    path: web::Path<String>,
    payload: web::Json<UpdateIdentityNumberRequest>,
) -> ApiResult<web::Json<UpdateUserResponse>> {
    let identity_number = IdentityNumber::new(payload.into_inner().identity_number)
        .map_err(map_validation_error)?;

    let Ok(id) = UserId::parse(path.into_inner()) else {
        return Ok(web::Json(UpdateUserResponse { updated: false }));
    };

    let updated = state
        .stores
        .pick(query.db.as_deref())
        .update_identity_number(&id, &identity_number)
        .await
        .map_err(map_store_error)?;

    Ok(web::Json(UpdateUserResponse { updated }))
}
