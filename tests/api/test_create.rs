//! POST /test

use actix_web::test;
use serde_json::{Value, json};

use super::test_helpers::{assert_bad_request, create_test, create_test_app, list_ids};

#[actix_rt::test]
async fn test_create_returns_201_with_id() {
    let app = create_test_app().await;

    let first = create_test(&app, json!({"summary": "login", "outcome": "Passed"})).await;
    let second = create_test(&app, json!({"summary": "logout", "outcome": "Failed"})).await;

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(list_ids(&app, "").await, vec![2, 1]);
}

#[actix_rt::test]
async fn test_create_splits_metadata_into_doc() {
    let app = create_test_app().await;
    create_test(
        &app,
        json!({
            "summary": "  checkout  ",
            "outcome": "Failed",
            "browser": "firefox",
            "build": 42,
            "created": "2001-01-01T00:00:00Z"
        }),
    )
    .await;

    let req = test::TestRequest::get().uri("/tests").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stored = &body["tests"][0];

    assert_eq!(stored["summary"], "checkout");
    assert_eq!(stored["analysis"], "NotAnalyzed");
    assert_eq!(stored["resolution"], "Unresolved");
    assert_eq!(stored["doc"], json!({"browser": "firefox", "build": 42}));
    assert_ne!(stored["created"], "2001-01-01T00:00:00Z");
}

#[actix_rt::test]
async fn test_create_rejects_doc_key() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/test")
        .set_json(json!({"summary": "s", "outcome": "Passed", "doc": {"x": 1}}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_bad_request(resp, "RESERVED_FIELD_CONFLICT").await;
}

#[actix_rt::test]
async fn test_create_validation_errors() {
    let app = create_test_app().await;

    let cases = [
        (json!({"summary": "s"}), "INVALID_OUTCOME"),
        (json!({"summary": "s", "outcome": "Skipped"}), "INVALID_OUTCOME"),
        (
            json!({"summary": "s", "outcome": "Passed", "analysis": "TruePositive"}),
            "INVALID_ANALYSIS",
        ),
        (
            json!({"summary": "s", "outcome": "Failed", "resolution": "Later"}),
            "INVALID_RESOLUTION",
        ),
        (json!({"summary": "   ", "outcome": "Passed"}), "BLANK_SUMMARY"),
    ];

    for (body, kind) in cases {
        let req = test::TestRequest::post()
            .uri("/test")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_bad_request(resp, kind).await;
    }

    assert!(list_ids(&app, "").await.is_empty());
}

#[actix_rt::test]
async fn test_create_rejects_malformed_json() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/test")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_bad_request(resp, "INVALID_INPUT").await;
}
