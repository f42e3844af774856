use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use chrono::Utc;

use super::{error_response, AppState};
use crate::api::models::{NextTargetDto, ScheduleDto};
use crate::database;
use crate::errors::DomainError;
use crate::game::schedule;

/// The schedule row covering now. The target player id never leaves the
/// server; only the window and its difficulty do.
pub async fn get_current(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let row = match schedule::current_target(&mut conn, Utc::now().naive_utc()) {
        Ok(row) => row,
        Err(err) => return error_response(err),
    };
    let difficulty = match database::players::find_by_id(&mut conn, row.player_id) {
        Ok(Some(player)) => player.difficulty.label().to_string(),
        Ok(None) => return (StatusCode::INTERNAL_SERVER_ERROR, "Schedule points at missing player").into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response()
        }
    };

    Json(ScheduleDto {
        id: row.id,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        difficulty,
    })
    .into_response()
}

pub async fn get_next(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let now = Utc::now().naive_utc();
    let current = match schedule::current_target(&mut conn, now) {
        Ok(row) => row,
        Err(err) => return error_response(err),
    };
    let next = match schedule::next_target(&mut conn, current.ends_at) {
        Ok(Some(row)) => row,
        Ok(None) => return error_response(DomainError::NoActiveSchedule),
        Err(err) => return error_response(err),
    };
    let difficulty = match database::players::find_by_id(&mut conn, next.player_id) {
        Ok(Some(player)) => player.difficulty.label().to_string(),
        Ok(None) => return (StatusCode::INTERNAL_SERVER_ERROR, "Schedule points at missing player").into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response()
        }
    };

    Json(NextTargetDto {
        starts_at: next.starts_at,
        difficulty,
    })
    .into_response()
}
