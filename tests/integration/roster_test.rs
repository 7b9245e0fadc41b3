//! Integration tests for roster and signup lifecycle endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{seats_of, waitlist_of};

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], true);
}

#[tokio::test]
async fn test_open_roster_uses_default_capacity() {
    let app = helpers::TestApp::new();
    let response = app.request("POST", "/api/rosters", Some(json!({}))).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body["data"]["capacity"],
        app.config.allocation.default_capacity
    );
}

#[tokio::test]
async fn test_open_roster_rejects_bad_capacity() {
    let app = helpers::TestApp::new();

    let zero = app
        .request("POST", "/api/rosters", Some(json!({ "capacity": 0 })))
        .await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);
    assert_eq!(zero.body["error"], "INVALID_ARGUMENT");

    let too_many = app
        .request("POST", "/api/rosters", Some(json!({ "capacity": 1000 })))
        .await;
    assert_eq!(too_many.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = helpers::TestApp::new();
    let response = app
        .request("POST", "/api/rosters", Some(json!({ "capacity": "three" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_unknown_roster_is_not_found() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/rosters/77", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_register_fills_seats_then_waitlist() {
    let app = helpers::TestApp::new();
    let roster_id = app.open_scenario_roster().await;

    let s1 = app.register(roster_id, "tank", false).await;
    let s2 = app.register(roster_id, "healer", false).await;
    let s3 = app.register(roster_id, "dps", false).await;

    let snapshot = app
        .request("GET", &format!("/api/rosters/{roster_id}"), None)
        .await;
    assert_eq!(seats_of(&snapshot.body), vec![Some(s1), Some(s2), None]);
    assert_eq!(waitlist_of(&snapshot.body), vec![s3]);

    let status = app
        .request(
            "GET",
            &format!("/api/rosters/{roster_id}/signups/{s3}/status"),
            None,
        )
        .await;
    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(status.body["data"]["status"], "waitlisted");
    assert_eq!(status.body["data"]["position"], 0);
}

#[tokio::test]
async fn test_cancel_backfills_seat() {
    let app = helpers::TestApp::new();
    let roster_id = app.open_scenario_roster().await;
    let s1 = app.register(roster_id, "tank", false).await;
    let s2 = app.register(roster_id, "tank", false).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/rosters/{roster_id}/signups/{s1}"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(seats_of(&response.body)[0], Some(s2));
    assert!(waitlist_of(&response.body).is_empty());

    let unknown = app
        .request(
            "DELETE",
            &format!("/api/rosters/{roster_id}/signups/999"),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rules_keeps_occupants() {
    let app = helpers::TestApp::new();
    let roster_id = app.open_scenario_roster().await;
    let s1 = app.register(roster_id, "tank", false).await;
    let s2 = app.register(roster_id, "dps", false).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/rosters/{roster_id}/rules"),
            Some(json!({
                "seat_rules": [
                    { "allowedClasses": ["healer"] },
                    { "allowedClasses": ["dps"] },
                    { "allowSponsor": true },
                ]
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(seats_of(&response.body), vec![Some(s1), Some(s2), None]);

    let wrong_length = app
        .request(
            "PUT",
            &format!("/api/rosters/{roster_id}/rules"),
            Some(json!({ "seat_rules": [ { "allowSponsor": true } ] })),
        )
        .await;
    assert_eq!(wrong_length.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reallocate_reports_focus() {
    let app = helpers::TestApp::new();
    let roster_id = app.open_scenario_roster().await;
    app.register(roster_id, "tank", false).await;
    let sponsor = app.register(roster_id, "dps", true).await;

    let response = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/reallocate?signup_id={sponsor}"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["focus"]["signup_id"], sponsor);
    assert_eq!(response.body["data"]["focus"]["status"]["status"], "allocated");
    assert_eq!(response.body["data"]["focus"]["status"]["seat_index"], 2);
}
