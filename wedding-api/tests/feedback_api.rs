mod helpers;

use axum::http::StatusCode;
use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_guest_leaves_feedback_admin_reads_and_deletes() {
    let app = test_app();

    let first = send(
        &app,
        with_header(
            json_request("POST", "/api/feedback", json!({ "message": "  Loved the photos " })),
            "user-agent",
            "Mozilla/5.0",
        ),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = json_body(first).await;
    assert_eq!(first["message"], "Loved the photos");
    assert_eq!(first["page"], "direct");
    assert_eq!(first["userAgent"], "Mozilla/5.0");

    let second = send(
        &app,
        json_request(
            "POST",
            "/api/feedback",
            json!({ "message": "Song search is slow", "page": "/songs" }),
        ),
    )
    .await;
    let second = json_body(second).await;

    let listed = json_body(send(&app, as_admin(empty_request("GET", "/api/feedback"))).await).await;
    let ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["id"].as_str())
        .collect();
    assert_eq!(ids, vec![second["id"].as_str().unwrap(), first["id"].as_str().unwrap()]);

    let uri = format!("/api/feedback/{}", first["id"].as_str().unwrap());
    let deleted = send(&app, as_admin(empty_request("DELETE", &uri))).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let again = send(&app, as_admin(empty_request("DELETE", &uri))).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_feedback_is_bad_request() {
    let app = test_app();

    let response = send(&app, json_request("POST", "/api/feedback", json!({ "message": " \n " }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reading_feedback_requires_admin() {
    let app = test_app();

    let response = send(&app, empty_request("GET", "/api/feedback")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let uri = format!("/api/feedback/{}", uuid::Uuid::new_v4());
    let response = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_feedback_is_rate_limited() {
    let app = test_app_with_limits(1, 10);

    let ok = send(&app, json_request("POST", "/api/feedback", json!({ "message": "one" }))).await;
    assert_eq!(ok.status(), StatusCode::CREATED);

    let limited = send(&app, json_request("POST", "/api/feedback", json!({ "message": "two" }))).await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
}
