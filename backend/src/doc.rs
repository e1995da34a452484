//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: the user record endpoints, the health probes, and
//! the schemas they exchange. The generated specification backs Swagger
//! UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::users::{
    CreateUserRequest, CreateUserResponse, UpdateIdentityNumberRequest, UpdateUserNameRequest,
    UpdateUserResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User record service API",
        description = "Create, read, and update user records across two \
                       storage backends selected per request."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user_name,
        crate::inbound::http::users::update_identity_number,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        CreateUserRequest,
        CreateUserResponse,
        UpdateUserNameRequest,
        UpdateIdentityNumberRequest,
        UpdateUserResponse,
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/users",
            "/api/v1/users/{id}",
            "/api/v1/users/{id}/name",
            "/api/v1/users/{id}/identity-number",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| *path == expected),
                "missing path {expected}"
            );
        }
    }
}
