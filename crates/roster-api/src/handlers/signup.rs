//! Signup lifecycle and status handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use roster_core::types::{RosterId, SignupId};
use roster_service::SlotOutcome;

use crate::dto::request::RegisterSignupRequest;
use crate::dto::response::{ApiResponse, StatusResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/rosters/{id}/signups
pub async fn register_signup(
    State(state): State<AppState>,
    Path(roster_id): Path<RosterId>,
    ValidatedJson(req): ValidatedJson<RegisterSignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SlotOutcome>>), ApiError> {
    let outcome = state
        .slot_service
        .register_signup(roster_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(outcome))))
}

/// DELETE /api/rosters/{id}/signups/{sid}
pub async fn cancel_signup(
    State(state): State<AppState>,
    Path((roster_id, signup_id)): Path<(RosterId, SignupId)>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state
        .slot_service
        .cancel_signup(roster_id, signup_id)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/rosters/{id}/signups/{sid}/status
pub async fn signup_status(
    State(state): State<AppState>,
    Path((roster_id, signup_id)): Path<(RosterId, SignupId)>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let status = state
        .slot_service
        .query_status(roster_id, signup_id)
        .await?;
    Ok(Json(ApiResponse::ok(StatusResponse {
        roster_id,
        signup_id,
        status,
    })))
}
