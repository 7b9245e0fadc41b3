//! Seat mutation handlers: lock, unlock, remove, swap.

use axum::Json;
use axum::extract::{Path, Query, State};

use roster_core::types::{RosterId, SignupId};
use roster_service::SlotOutcome;

use crate::dto::request::{LockSeatRequest, RemovalQuery, SwapSeatsRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/rosters/{id}/seats/{index}/lock
pub async fn lock_seat(
    State(state): State<AppState>,
    Path((roster_id, seat_index)): Path<(RosterId, usize)>,
    ValidatedJson(req): ValidatedJson<LockSeatRequest>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state
        .slot_service
        .lock_seat(roster_id, seat_index, req.signup_id())
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/rosters/{id}/seats/{index}/unlock
pub async fn unlock_seat(
    State(state): State<AppState>,
    Path((roster_id, seat_index)): Path<(RosterId, usize)>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state
        .slot_service
        .unlock_seat(roster_id, seat_index)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// DELETE /api/rosters/{id}/signups/{sid}/seat?mode=requeue|waitlist
///
/// `mode` defaults to `requeue`: the signup re-enters placement in arrival
/// order and, if it still fits the freed seat, takes it again. Pass
/// `mode=waitlist` to move it to the end of the waitlist instead.
pub async fn remove_from_seat(
    State(state): State<AppState>,
    Path((roster_id, signup_id)): Path<(RosterId, SignupId)>,
    Query(query): Query<RemovalQuery>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state
        .slot_service
        .remove_from_seat(roster_id, signup_id, query.mode)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/rosters/{id}/seats/swap
pub async fn swap_seats(
    State(state): State<AppState>,
    Path(roster_id): Path<RosterId>,
    ValidatedJson(req): ValidatedJson<SwapSeatsRequest>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state
        .slot_service
        .swap_seats(roster_id, req.seat_a, req.seat_b)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
