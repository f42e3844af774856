use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use chrono::Utc;

use super::{error_response, resolve_identity, AppState};
use crate::api::models::{
    GiveUpResponse, GuessRequest, GuessResponse, HintResponse, NextTargetDto,
    PlayerRef, SessionTargetRequest,
};
use crate::domain::{GameMode, TargetRef};
use crate::errors::DomainError;
use crate::game::{GameService, GuessOutcome};

fn target_ref(mode: GameMode, schedule_id: Option<i64>) -> TargetRef {
    match (mode, schedule_id) {
        (GameMode::Official, Some(id)) => TargetRef::Schedule(id),
        (GameMode::Official, None) => TargetRef::CurrentOfficial,
        (GameMode::Random, _) => TargetRef::Random,
    }
}

pub async fn submit_guess(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<GuessRequest>,
) -> impl IntoResponse {
    let identity = resolve_identity(&headers, &ConnectInfo(addr));
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let service = GameService::new(&state.config);
    let outcome = service.submit_guess(
        &mut conn,
        &identity,
        target_ref(request.mode, request.schedule_id),
        &request.guess,
        Utc::now().naive_utc(),
    );

    match outcome {
        Ok(GuessOutcome::Correct { target, verdict }) => Json(GuessResponse::Correct {
            target: PlayerRef {
                id: target.player_id,
                name: target.display_name,
            },
            verdict,
        })
        .into_response(),
        Ok(GuessOutcome::Incorrect {
            candidate,
            verdict,
            known_matches,
        }) => Json(GuessResponse::Incorrect {
            candidate: PlayerRef {
                id: candidate.player_id,
                name: candidate.display_name,
            },
            verdict,
            known_matches,
        })
        .into_response(),
        Err(DomainError::NoCandidateFound) => {
            Json(GuessResponse::NoCandidateFound).into_response()
        }
        Err(DomainError::AmbiguousGuess { suggestions }) => {
            Json(GuessResponse::Ambiguous { suggestions }).into_response()
        }
        Err(DomainError::TooManyCandidates) => {
            Json(GuessResponse::TooManyCandidates).into_response()
        }
        Err(DomainError::DuplicateGuess) => {
            Json(GuessResponse::DuplicateGuess).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub async fn give_up(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<SessionTargetRequest>,
) -> impl IntoResponse {
    let identity = resolve_identity(&headers, &ConnectInfo(addr));
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let service = GameService::new(&state.config);
    let outcome = service.give_up(
        &mut conn,
        &identity,
        target_ref(request.mode, request.schedule_id),
        Utc::now().naive_utc(),
    );

    match outcome {
        Ok(result) => Json(GiveUpResponse {
            target: PlayerRef {
                id: result.target.player_id,
                name: result.target.display_name,
            },
            next_target: result.next_official.map(|n| NextTargetDto {
                starts_at: n.starts_at,
                difficulty: n.difficulty.label().to_string(),
            }),
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn reveal_hint(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<SessionTargetRequest>,
) -> impl IntoResponse {
    let identity = resolve_identity(&headers, &ConnectInfo(addr));
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let service = GameService::new(&state.config);
    let outcome = service.reveal_next_hint(
        &mut conn,
        &identity,
        target_ref(request.mode, request.schedule_id),
        Utc::now().naive_utc(),
    );

    match outcome {
        Ok(hint) => Json(HintResponse::Revealed { hint }).into_response(),
        Err(DomainError::HintsExhausted) => Json(HintResponse::Exhausted).into_response(),
        Err(err) => error_response(err),
    }
}
