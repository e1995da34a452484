//! End-to-end coverage of the user record endpoints over fixture stores.
//!
//! Exercises the full inbound path — routing, validation, store calls,
//! and error mapping — with the two backends represented by independent
//! in-memory stores.

use std::sync::Arc;

use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::domain::StoreRouter;
use backend::domain::ports::FixtureUserStore;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{
    create_user, get_user, update_identity_number, update_user_name,
};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(StoreRouter::new(
        Arc::new(FixtureUserStore::new()),
        Arc::new(FixtureUserStore::new()),
    ));
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(create_user)
            .service(get_user)
            .service(update_user_name)
            .service(update_identity_number),
    )
}

async fn body_json<B>(response: actix_web::dev::ServiceResponse<B>) -> Value
where
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[actix_web::test]
async fn full_record_lifecycle_against_one_backend() {
    let app = actix_test::init_service(test_app()).await;

    // Create.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada", "identityNumber": "111122223333" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created
        .get("id")
        .and_then(Value::as_str)
        .expect("id field")
        .to_owned();

    // Rename, then replace the identity number.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}/name"))
            .set_json(json!({ "name": "Ada Lovelace" }))
            .to_request(),
    )
    .await;
    assert_eq!(
        body_json(response).await.get("updated"),
        Some(&Value::Bool(true))
    );

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}/identity-number"))
            .set_json(json!({ "identityNumber": "999900001111" }))
            .to_request(),
    )
    .await;
    assert_eq!(
        body_json(response).await.get("updated"),
        Some(&Value::Bool(true))
    );

    // Read back the final state.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(
        body_json(response).await,
        json!({
            "id": id,
            "name": "Ada Lovelace",
            "identityNumber": "999900001111",
        })
    );
}

#[actix_web::test]
async fn backends_remain_disjoint_through_the_selector() {
    let app = actix_test::init_service(test_app()).await;

    // The same identity number can live in both backends.
    for uri in ["/api/v1/users", "/api/v1/users?db=mongo"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .set_json(json!({ "name": "Ada", "identityNumber": "111122223333" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    }

    // A record created in the document backend is invisible to the
    // relational backend, and vice versa.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users?db=mongo")
            .set_json(json!({ "name": "Grace", "identityNumber": "444455556666" }))
            .to_request(),
    )
    .await;
    let id = body_json(response)
        .await
        .get("id")
        .and_then(Value::as_str)
        .expect("id field")
        .to_owned();

    let relational_read = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(
        relational_read.status(),
        actix_web::http::StatusCode::NOT_FOUND
    );

    let document_read = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}?db=Mongo"))
            .to_request(),
    )
    .await;
    assert!(document_read.status().is_success());
}

#[actix_web::test]
async fn identity_number_no_op_update_reports_true() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada", "identityNumber": "111122223333" }))
            .to_request(),
    )
    .await;
    let id = body_json(response)
        .await
        .get("id")
        .and_then(Value::as_str)
        .expect("id field")
        .to_owned();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{id}/identity-number"))
            .set_json(json!({ "identityNumber": "111122223333" }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    assert_eq!(
        body_json(response).await.get("updated"),
        Some(&Value::Bool(true))
    );
}

#[actix_web::test]
async fn validation_rejects_blank_fields_with_details() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada", "identityNumber": "" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(
        body.get("details").and_then(|d| d.get("field")),
        Some(&json!("identityNumber"))
    );
}
