use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use chrono::Duration;

use super::{error_response, AppState};
use crate::api::models::{AdminHintRequest, AdminScheduleRequest};
use crate::database;
use crate::errors::DomainError;

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), DomainError> {
    let expected = format!("Bearer {}", state.config.admin.bearer_token);
    let presented = headers.get("Authorization").and_then(|h| h.to_str().ok());
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}

/// Inserts a schedule row ahead of time. The lazy resolver stays the
/// fallback; this just lets an admin pin a specific player to a day.
pub async fn insert_schedule(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AdminScheduleRequest>,
) -> impl IntoResponse {
    if let Err(err) = require_admin(&state, &headers) {
        return error_response(err);
    }
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let ends_at = request.starts_at + Duration::days(1);
    match database::schedules::try_insert(&mut conn, request.player_id, request.starts_at, ends_at)
    {
        Ok(Some(row)) => {
            log::info!("admin scheduled player {} at {}", row.player_id, row.starts_at);
            (StatusCode::CREATED, Json(row.id)).into_response()
        }
        Ok(None) => (StatusCode::CONFLICT, "schedule slot already taken").into_response(),
        Err(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response()
        }
    }
}

pub async fn insert_hint(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AdminHintRequest>,
) -> impl IntoResponse {
    if let Err(err) = require_admin(&state, &headers) {
        return error_response(err);
    }
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::hints::insert(&mut conn, request.player_id, &request.content) {
        Ok(row) => (StatusCode::CREATED, Json(row.id)).into_response(),
        Err(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response()
        }
    }
}

pub async fn approve_hint(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(hint_id): Path<i64>,
) -> impl IntoResponse {
    if let Err(err) = require_admin(&state, &headers) {
        return error_response(err);
    }
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::hints::approve(&mut conn, hint_id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response()
        }
    }
}
