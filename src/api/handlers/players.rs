use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use super::AppState;
use crate::api::models::{PlayerListResponse, PlayerRef};
use crate::database;

/// Id + display-name index for the client's guess autocomplete. The
/// comparable attributes stay server-side; leaking them here would spoil
/// the game.
pub async fn get_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let players = match database::players::list_all(&mut conn) {
        Ok(players) => players,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response()
        }
    };

    let items: Vec<PlayerRef> = players
        .iter()
        .map(|p| PlayerRef {
            id: p.id,
            name: p.full_name(),
        })
        .collect();

    Json(PlayerListResponse {
        total: items.len() as i64,
        items,
    })
    .into_response()
}
