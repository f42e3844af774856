use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    account::update_flags,
    admin::{approve_hint, insert_hint, insert_schedule},
    game::{give_up, reveal_hint, submit_guess},
    players::get_players,
    schedule::{get_current, get_next},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/game/guess", post(submit_guess))
        .route("/api/game/give-up", post(give_up))
        .route("/api/game/hint", post(reveal_hint))
        .route("/api/schedule/current", get(get_current))
        .route("/api/schedule/next", get(get_next))
        .route("/api/players", get(get_players))
        .route("/api/account/flags", put(update_flags))
        .route("/api/admin/schedule", post(insert_schedule))
        .route("/api/admin/hints", post(insert_hint))
        .route("/api/admin/hints/:id/approve", post(approve_hint))
        .with_state(state)
}
