use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};

use super::{error_response, resolve_identity, AppState};
use crate::api::models::AccountFlagsRequest;
use crate::database;
use crate::domain::Identity;
use crate::errors::DomainError;

/// Per-account opt-ins. Only an authenticated user has an account to
/// change; a guest request is rejected outright.
pub async fn update_flags(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<AccountFlagsRequest>,
) -> impl IntoResponse {
    let user_id = match resolve_identity(&headers, &ConnectInfo(addr)) {
        Identity::User(id) => id,
        Identity::Guest(_) => return error_response(DomainError::Unauthorized),
    };
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::users::set_include_very_hard(&mut conn, user_id, request.include_very_hard) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response()
        }
    }
}
