//! Route definitions for the roster HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to every handler via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(roster_routes())
        .merge(signup_routes())
        .merge(seat_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Roster lifecycle: open, snapshot, rule edits, reallocation
fn roster_routes() -> Router<AppState> {
    Router::new()
        .route("/rosters", post(handlers::roster::open_roster))
        .route("/rosters/{id}", get(handlers::roster::get_roster))
        .route("/rosters/{id}/rules", put(handlers::roster::update_rules))
        .route(
            "/rosters/{id}/reallocate",
            post(handlers::roster::reallocate),
        )
}

/// Signup lifecycle and status
fn signup_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rosters/{id}/signups",
            post(handlers::signup::register_signup),
        )
        .route(
            "/rosters/{id}/signups/{sid}",
            delete(handlers::signup::cancel_signup),
        )
        .route(
            "/rosters/{id}/signups/{sid}/status",
            get(handlers::signup::signup_status),
        )
        .route(
            "/rosters/{id}/signups/{sid}/seat",
            delete(handlers::slot::remove_from_seat),
        )
}

/// Seat mutations
fn seat_routes() -> Router<AppState> {
    Router::new()
        .route("/rosters/{id}/seats/swap", post(handlers::slot::swap_seats))
        .route(
            "/rosters/{id}/seats/{index}/lock",
            post(handlers::slot::lock_seat),
        )
        .route(
            "/rosters/{id}/seats/{index}/unlock",
            post(handlers::slot::unlock_seat),
        )
}
