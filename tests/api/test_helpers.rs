//! Shared helpers for the HTTP API tests.

use std::sync::Arc;

use actix_web::{App, dev::ServiceResponse, test, web};
use oar_lib::api;
use oar_lib::db::{MemoryStore, TestStore};
use oar_lib::error::ErrorResponse;
use serde_json::Value;

/// Create an app backed by a fresh in-memory store.
pub async fn create_test_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let store: Arc<dyn TestStore> = Arc::new(MemoryStore::new());

    test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .configure(api::configure_routes),
    )
    .await
}

/// POST a flat test body and return the new id.
pub async fn create_test<S>(app: &S, body: Value) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/test")
        .set_json(&body)
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "Failed to create test {}", body);
    test::read_body_json(resp).await
}

/// Exchange a query document for its token.
pub async fn query_token<S>(app: &S, query: Value) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/query")
        .set_json(&query)
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "Failed to encode query {}", query);
    test::read_body_json(resp).await
}

/// Percent-encode the characters of a base64 token that are special in a query string.
pub fn url_encode(token: &str) -> String {
    token
        .replace('+', "%2B")
        .replace('/', "%2F")
        .replace('=', "%3D")
}

/// GET /tests with the given query string and return the ids in order.
pub async fn list_ids<S>(app: &S, query_string: &str) -> Vec<i64>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get()
        .uri(&format!("/tests{}", query_string))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    body["tests"]
        .as_array()
        .expect("tests must be an array")
        .iter()
        .map(|t| t["id"].as_i64().expect("test id"))
        .collect()
}

/// Assert a 400 response carrying the given error kind.
pub async fn assert_bad_request(resp: ServiceResponse, kind: &str) {
    assert_eq!(resp.status(), 400);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.kind, kind, "unexpected error: {}", body.error);
}
