//! GET /tests and POST /query

use actix_web::test;
use serde_json::{Value, json};

use super::test_helpers::{
    assert_bad_request, create_test, create_test_app, list_ids, query_token, url_encode,
};

#[actix_rt::test]
async fn test_query_ands_fields_and_ors_values() {
    let app = create_test_app().await;
    create_test(&app, json!({"summary": "alpha", "outcome": "Passed"})).await;
    create_test(&app, json!({"summary": "beta", "outcome": "Failed"})).await;

    let token = query_token(
        &app,
        json!({"outcomes": ["Passed", "Failed"], "summaries": ["alpha"]}),
    )
    .await;

    let ids = list_ids(&app, &format!("?query={}", url_encode(&token))).await;
    assert_eq!(ids, vec![1]);
}

#[actix_rt::test]
async fn test_query_by_doc_containment() {
    let app = create_test_app().await;
    create_test(
        &app,
        json!({"summary": "a", "outcome": "Passed", "env": {"os": "linux", "arch": "x64"}}),
    )
    .await;
    create_test(
        &app,
        json!({"summary": "b", "outcome": "Passed", "env": {"os": "macos"}}),
    )
    .await;
    create_test(&app, json!({"summary": "c", "outcome": "Passed"})).await;

    let token = query_token(
        &app,
        json!({"docs": [{"env": {"os": "linux"}}, {"env": {"os": "macos"}}]}),
    )
    .await;

    let ids = list_ids(&app, &format!("?query={}", url_encode(&token))).await;
    assert_eq!(ids, vec![2, 1]);
}

#[actix_rt::test]
async fn test_pagination_returns_ranks_two_to_four() {
    let app = create_test_app().await;
    for i in 1..=5 {
        create_test(
            &app,
            json!({"summary": format!("test {}", i), "outcome": "Passed"}),
        )
        .await;
    }

    let req = test::TestRequest::get()
        .uri("/tests?limit=3&offset=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 3);
    let ids: Vec<i64> = body["tests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 3, 2]);
}

#[actix_rt::test]
async fn test_empty_result_shape() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/tests").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({"count": 0, "tests": []}));
}

#[actix_rt::test]
async fn test_limit_above_maximum_is_rejected() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/tests?limit=1001").to_request();
    assert_bad_request(test::call_service(&app, req).await, "LIMIT_EXCEEDED").await;

    let req = test::TestRequest::get().uri("/tests?limit=1000").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get().uri("/tests?limit=many").to_request();
    assert_bad_request(test::call_service(&app, req).await, "INVALID_INPUT").await;
}

#[actix_rt::test]
async fn test_malformed_token_is_rejected() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/tests?query=%25%25not-a-token")
        .to_request();
    assert_bad_request(test::call_service(&app, req).await, "MALFORMED_TOKEN").await;
}

#[actix_rt::test]
async fn test_unescaped_plus_in_token_is_accepted() {
    let app = create_test_app().await;
    create_test(&app, json!({"summary": "~~~> arrow", "outcome": "Passed"})).await;
    create_test(&app, json!({"summary": "other", "outcome": "Passed"})).await;

    let token = query_token(&app, json!({"summaries": ["~~~>"]})).await;
    assert!(token.contains('+'));

    let ids = list_ids(&app, &format!("?query={}", token)).await;
    assert_eq!(ids, vec![1]);
}

#[actix_rt::test]
async fn test_query_endpoint_rejects_unknown_fields() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/query")
        .set_json(json!({"outcome": ["Passed"]}))
        .to_request();
    assert_bad_request(test::call_service(&app, req).await, "INVALID_INPUT").await;
}

#[actix_rt::test]
async fn test_empty_query_token() {
    let app = create_test_app().await;
    assert_eq!(query_token(&app, json!({})).await, "e30=");
}

#[actix_rt::test]
async fn test_invalid_summary_pattern_is_rejected() {
    let app = create_test_app().await;
    let keep = create_test(&app, json!({"summary": "(nightly) run", "outcome": "Passed"})).await;

    let token = query_token(&app, json!({"summaries": ["("]})).await;

    let req = test::TestRequest::get()
        .uri(&format!("/tests?query={}", url_encode(&token)))
        .to_request();
    assert_bad_request(test::call_service(&app, req).await, "INVALID_INPUT").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/tests?query={}", url_encode(&token)))
        .to_request();
    assert_bad_request(test::call_service(&app, req).await, "INVALID_INPUT").await;

    assert_eq!(list_ids(&app, "").await, vec![keep]);
}

#[actix_rt::test]
async fn test_offset_beyond_signed_range_is_rejected() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/tests?offset=9223372036854775808")
        .to_request();
    assert_bad_request(test::call_service(&app, req).await, "INVALID_INPUT").await;

    let req = test::TestRequest::get()
        .uri("/tests?offset=9223372036854775807")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 0);
}
