mod helpers;

use axum::http::StatusCode;
use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_settings_start_from_defaults_and_merge() {
    let app = test_app();

    let defaults = json_body(send(&app, empty_request("GET", "/api/settings")).await).await;
    assert_eq!(defaults["showDates"], false);
    assert!(defaults["timeline"].as_array().unwrap().is_empty());
    let default_quotes = defaults["quotes"].clone();

    let updated = send(
        &app,
        as_admin(json_request(
            "PUT",
            "/api/settings",
            json!({
                "showDates": true,
                "pets": [{ "name": "Luna", "type": "Labradoodle", "emoji": "🐕" }]
            }),
        )),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let current = json_body(send(&app, empty_request("GET", "/api/settings")).await).await;
    assert_eq!(current["showDates"], true);
    assert_eq!(current["pets"][0]["type"], "Labradoodle");
    assert_eq!(current["quotes"], default_quotes);
}

#[tokio::test]
async fn test_settings_update_requires_admin_and_valid_content() {
    let app = test_app();

    let anonymous = send(
        &app,
        json_request("PUT", "/api/settings", json!({ "showDates": true })),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let invalid = send(
        &app,
        as_admin(json_request(
            "PUT",
            "/api/settings",
            json!({ "showDates": true, "timeline": [{ "year": "2025", "title": "   " }] }),
        )),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let current = json_body(send(&app, empty_request("GET", "/api/settings")).await).await;
    assert_eq!(current["showDates"], false);
}
