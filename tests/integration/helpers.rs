//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use roster_allocation::MemoryRosterGate;
use roster_api::{AppState, build_router};
use roster_core::config::{AppConfig, StoreBackend};
use roster_database::MemoryRosterStore;
use roster_service::SlotService;

/// Test application context backed by the in-memory store and gate.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store for direct inspection
    pub store: MemoryRosterStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;

        let store = MemoryRosterStore::new();
        let slot_service = Arc::new(SlotService::new(
            Arc::new(store.clone()),
            Arc::new(MemoryRosterGate::new()),
            config.allocation.clone(),
        ));

        let state = AppState {
            config: Arc::new(config.clone()),
            store: Arc::new(store.clone()),
            slot_service,
        };

        Self {
            router: build_router(state),
            store,
            config,
        }
    }

    /// Opens a roster and returns its id.
    pub async fn open_roster(&self, capacity: usize, seat_rules: Value) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/rosters",
                Some(json!({ "capacity": capacity, "seat_rules": seat_rules })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["roster_id"]
            .as_i64()
            .expect("roster_id in response")
    }

    /// The tank / healer / sponsor roster used across tests.
    pub async fn open_scenario_roster(&self) -> i64 {
        self.open_roster(
            3,
            json!([
                { "allowedClasses": ["tank"] },
                { "allowedClasses": ["healer"] },
                { "allowSponsor": true },
            ]),
        )
        .await
    }

    /// Registers a signup and returns its id.
    pub async fn register(&self, roster_id: i64, class_tag: &str, sponsor: bool) -> i64 {
        let response = self
            .request(
                "POST",
                &format!("/api/rosters/{roster_id}/signups"),
                Some(json!({ "class_tag": class_tag, "sponsor": sponsor })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["focus"]["signup_id"]
            .as_i64()
            .expect("signup_id in response")
    }

    /// Signup ids per seat of the current snapshot (`None` for empty seats).
    pub async fn seats(&self, roster_id: i64) -> Vec<Option<i64>> {
        let response = self
            .request("GET", &format!("/api/rosters/{roster_id}"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        seats_of(&response.body)
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Signup ids per seat in a `SlotOutcome` response body.
pub fn seats_of(body: &Value) -> Vec<Option<i64>> {
    body["data"]["allocation"]["assignment"]
        .as_array()
        .expect("assignment array")
        .iter()
        .map(|entry| entry["signupId"].as_i64())
        .collect()
}

/// Lock flags per seat in a `SlotOutcome` response body.
pub fn locks_of(body: &Value) -> Vec<bool> {
    body["data"]["allocation"]["assignment"]
        .as_array()
        .expect("assignment array")
        .iter()
        .map(|entry| entry["locked"].as_bool().unwrap_or(false))
        .collect()
}

/// Waitlist in a `SlotOutcome` response body.
pub fn waitlist_of(body: &Value) -> Vec<i64> {
    body["data"]["allocation"]["waitlist"]
        .as_array()
        .expect("waitlist array")
        .iter()
        .filter_map(Value::as_i64)
        .collect()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
