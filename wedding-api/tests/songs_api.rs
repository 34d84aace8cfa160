mod helpers;

use axum::http::StatusCode;
use helpers::*;
use serde_json::json;

async fn submit(app: &axum::Router, name: &str, title: &str) -> serde_json::Value {
    let response = send(
        app,
        json_request("POST", "/api/songs", json!({ "requesterName": name, "title": title })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn test_submitted_song_appears_in_ranking() {
    let app = test_app();
    let song = submit(&app, "Alex", "Dancing Queen").await;

    assert_eq!(song["title"], "Dancing Queen");
    assert_eq!(song["upvotes"], 0);
    assert_eq!(song["score"], 0);
    assert!(song.get("voters").is_none());

    let response = send(&app, empty_request("GET", "/api/songs")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let songs = json_body(response).await;
    assert_eq!(songs.as_array().map(Vec::len), Some(1));
    assert_eq!(songs[0]["id"], song["id"]);
}

#[tokio::test]
async fn test_blank_title_is_bad_request() {
    let app = test_app();
    let response = send(
        &app,
        json_request("POST", "/api/songs", json!({ "requesterName": "Alex", "title": "  " })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Song title is required");
}

#[tokio::test]
async fn test_vote_toggles_per_session() {
    let app = test_app();
    let song = submit(&app, "Alex", "September").await;
    let uri = format!("/api/songs/{}/vote", song["id"].as_str().unwrap());

    let first = send(&app, json_request("POST", &uri, json!({ "direction": "up" }))).await;
    assert_eq!(first.status(), StatusCode::OK);
    let cookie = session_cookie(&first).expect("session cookie");
    let body = json_body(first).await;
    assert_eq!(body["upvotes"], 1);
    assert_eq!(body["myVote"], "up");

    let again = send(
        &app,
        with_header(
            json_request("POST", &uri, json!({ "direction": "up" })),
            "cookie",
            &cookie,
        ),
    )
    .await;
    let body = json_body(again).await;
    assert_eq!(body["upvotes"], 0);
    assert!(body["myVote"].is_null());

    // No cookie: a different voter.
    let stranger = send(&app, json_request("POST", &uri, json!({ "direction": "down" }))).await;
    let body = json_body(stranger).await;
    assert_eq!(body["upvotes"], 0);
    assert_eq!(body["downvotes"], 1);
}

#[tokio::test]
async fn test_special_vote_requires_couple_role() {
    let app = test_app();
    let song = submit(&app, "Alex", "Shout").await;
    let uri = format!("/api/songs/{}/special-vote", song["id"].as_str().unwrap());
    let body = json!({ "direction": "up" });

    let anonymous = send(&app, json_request("POST", &uri, body.clone())).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let no_role = send(&app, as_admin(json_request("POST", &uri, body.clone()))).await;
    assert_eq!(no_role.status(), StatusCode::FORBIDDEN);

    let bad_role = send(
        &app,
        with_header(as_admin(json_request("POST", &uri, body.clone())), "x-couple-role", "dj"),
    )
    .await;
    assert_eq!(bad_role.status(), StatusCode::FORBIDDEN);

    let bride = send(
        &app,
        with_header(as_admin(json_request("POST", &uri, body)), "x-couple-role", "bride"),
    )
    .await;
    assert_eq!(bride.status(), StatusCode::OK);
    let body = json_body(bride).await;
    assert_eq!(body["brideVote"], "up");
    assert_eq!(body["upvotes"], 0);
    assert_eq!(body["score"], 10);
}

#[tokio::test]
async fn test_couple_vote_reorders_board() {
    let app = test_app();
    let popular = submit(&app, "Sam", "Mr. Brightside").await;
    let favourite = submit(&app, "Alex", "Dancing Queen").await;

    let vote_uri = format!("/api/songs/{}/vote", popular["id"].as_str().unwrap());
    for _ in 0..3 {
        send(&app, json_request("POST", &vote_uri, json!({ "direction": "up" }))).await;
    }

    let special_uri = format!("/api/songs/{}/special-vote", favourite["id"].as_str().unwrap());
    send(
        &app,
        with_header(
            as_admin(json_request("POST", &special_uri, json!({ "direction": "up" }))),
            "x-couple-role",
            "groom",
        ),
    )
    .await;

    let songs = json_body(send(&app, empty_request("GET", "/api/songs")).await).await;
    assert_eq!(songs[0]["id"], favourite["id"]);
    assert_eq!(songs[0]["score"], 10);
    assert_eq!(songs[1]["score"], 3);
}

#[tokio::test]
async fn test_delete_is_admin_only_and_final() {
    let app = test_app();
    let song = submit(&app, "Alex", "Gone").await;
    let id = song["id"].as_str().unwrap();
    let uri = format!("/api/songs/{}", id);

    let anonymous = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let deleted = send(&app, as_admin(empty_request("DELETE", &uri))).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let stale_vote = send(
        &app,
        json_request("POST", &format!("{}/vote", uri), json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(stale_vote.status(), StatusCode::NOT_FOUND);

    let songs = json_body(send(&app, empty_request("GET", "/api/songs")).await).await;
    assert_eq!(songs, json!([]));
}

#[tokio::test]
async fn test_submissions_are_rate_limited() {
    let app = test_app_with_limits(1, 10);
    submit(&app, "Alex", "One").await;

    let response = send(
        &app,
        json_request("POST", "/api/songs", json!({ "requesterName": "Alex", "title": "Two" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_search_without_query_is_bad_request() {
    let app = test_app();
    let response = send(&app, empty_request("GET", "/api/search?q=%20")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Missing query parameter");
}
