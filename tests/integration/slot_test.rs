//! Integration tests for seat lock, unlock, removal, and swap endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{locks_of, seats_of, waitlist_of};

/// Opens the tank / healer / sponsor roster and seats S1..S4 in order.
async fn seeded(app: &helpers::TestApp) -> (i64, [i64; 4]) {
    let roster_id = app.open_scenario_roster().await;
    let s1 = app.register(roster_id, "tank", false).await;
    let s2 = app.register(roster_id, "healer", false).await;
    let s3 = app.register(roster_id, "dps", false).await;
    let s4 = app.register(roster_id, "dps", true).await;
    (roster_id, [s1, s2, s3, s4])
}

#[tokio::test]
async fn test_lock_seat_displaces_occupant() {
    let app = helpers::TestApp::new();
    let (roster_id, [s1, s2, s3, s4]) = seeded(&app).await;
    let s5 = app.register(roster_id, "dps", false).await;

    let response = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/seats/0/lock"),
            Some(json!({ "signup_id": s5 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(seats_of(&response.body), vec![Some(s5), Some(s2), Some(s4)]);
    assert_eq!(locks_of(&response.body), vec![true, false, false]);
    assert_eq!(waitlist_of(&response.body), vec![s3, s1]);
}

#[tokio::test]
async fn test_unlock_keeps_occupant() {
    let app = helpers::TestApp::new();
    let (roster_id, [s1, _s2, s3, _s4]) = seeded(&app).await;
    let s5 = app.register(roster_id, "dps", false).await;
    app.request(
        "POST",
        &format!("/api/rosters/{roster_id}/seats/0/lock"),
        Some(json!({ "signup_id": s5 })),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/seats/0/unlock"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(seats_of(&response.body)[0], Some(s5));
    assert_eq!(locks_of(&response.body)[0], false);
    assert_eq!(waitlist_of(&response.body), vec![s1, s3]);
}

#[tokio::test]
async fn test_swap_then_reallocate_is_stable() {
    let app = helpers::TestApp::new();
    let (roster_id, [s1, s2, s3, s4]) = seeded(&app).await;

    let swapped = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/seats/swap"),
            Some(json!({ "seat_a": 1, "seat_b": 2 })),
        )
        .await;
    assert_eq!(swapped.status, StatusCode::OK);
    assert_eq!(seats_of(&swapped.body), vec![Some(s1), Some(s4), Some(s2)]);
    assert_eq!(swapped.body["data"]["seat_rules"][1]["allowSponsor"], true);

    let reallocated = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/reallocate"),
            None,
        )
        .await;
    assert_eq!(seats_of(&reallocated.body), vec![Some(s1), Some(s4), Some(s2)]);
    assert_eq!(waitlist_of(&reallocated.body), vec![s3]);
}

#[tokio::test]
async fn test_remove_from_seat_modes() {
    let app = helpers::TestApp::new();
    let (roster_id, [s1, _s2, s3, _s4]) = seeded(&app).await;
    let s5 = app.register(roster_id, "tank", false).await;

    // Default mode: S1 still fits the tank seat and arrived first.
    let requeued = app
        .request(
            "DELETE",
            &format!("/api/rosters/{roster_id}/signups/{s1}/seat"),
            None,
        )
        .await;
    assert_eq!(requeued.status, StatusCode::OK);
    assert_eq!(seats_of(&requeued.body)[0], Some(s1));

    let waitlisted = app
        .request(
            "DELETE",
            &format!("/api/rosters/{roster_id}/signups/{s1}/seat?mode=waitlist"),
            None,
        )
        .await;
    assert_eq!(waitlisted.status, StatusCode::OK);
    assert_eq!(seats_of(&waitlisted.body)[0], Some(s5));
    assert_eq!(waitlist_of(&waitlisted.body), vec![s3, s1]);

    let not_seated = app
        .request(
            "DELETE",
            &format!("/api/rosters/{roster_id}/signups/{s1}/seat"),
            None,
        )
        .await;
    assert_eq!(not_seated.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seat_index_out_of_range() {
    let app = helpers::TestApp::new();
    let (roster_id, [s1, ..]) = seeded(&app).await;

    let lock = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/seats/3/lock"),
            Some(json!({ "signup_id": s1 })),
        )
        .await;
    assert_eq!(lock.status, StatusCode::BAD_REQUEST);
    assert_eq!(lock.body["error"], "INVALID_ARGUMENT");

    let swap = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/seats/swap"),
            Some(json!({ "seat_a": 0, "seat_b": 9 })),
        )
        .await;
    assert_eq!(swap.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_swap_malformed_body_is_bad_request() {
    let app = helpers::TestApp::new();
    let (roster_id, _) = seeded(&app).await;

    for body in [json!({ "seat_a": 0 }), json!({ "seat_a": -1, "seat_b": 1 })] {
        let response = app
            .request(
                "POST",
                &format!("/api/rosters/{roster_id}/seats/swap"),
                Some(body),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "INVALID_ARGUMENT");
    }
}

#[tokio::test]
async fn test_lock_rejects_invalid_signup() {
    let app = helpers::TestApp::new();
    let (roster_id, _) = seeded(&app).await;

    let invalid = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/seats/0/lock"),
            Some(json!({ "signup_id": 0 })),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            &format!("/api/rosters/{roster_id}/seats/0/lock"),
            Some(json!({ "signup_id": 4242 })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_unknown_roster() {
    let app = helpers::TestApp::new();
    let response = app
        .request("GET", "/api/rosters/5/signups/1/status", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
