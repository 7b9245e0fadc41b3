//! Roster lifecycle handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use roster_core::types::RosterId;
use roster_service::SlotOutcome;

use crate::dto::request::{OpenRosterRequest, ReallocateQuery, UpdateRulesRequest};
use crate::dto::response::{ApiResponse, RosterCreatedResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/rosters
pub async fn open_roster(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<OpenRosterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RosterCreatedResponse>>), ApiError> {
    let roster = state
        .slot_service
        .open_roster(req.capacity, req.seat_rules)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RosterCreatedResponse::from(&roster))),
    ))
}

/// GET /api/rosters/{id}
pub async fn get_roster(
    State(state): State<AppState>,
    Path(roster_id): Path<RosterId>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state.slot_service.get_roster(roster_id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// PUT /api/rosters/{id}/rules
pub async fn update_rules(
    State(state): State<AppState>,
    Path(roster_id): Path<RosterId>,
    ValidatedJson(req): ValidatedJson<UpdateRulesRequest>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state
        .slot_service
        .update_rules(roster_id, req.seat_rules)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/rosters/{id}/reallocate
pub async fn reallocate(
    State(state): State<AppState>,
    Path(roster_id): Path<RosterId>,
    Query(query): Query<ReallocateQuery>,
) -> Result<Json<ApiResponse<SlotOutcome>>, ApiError> {
    let outcome = state
        .slot_service
        .reallocate(roster_id, query.signup_id)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
