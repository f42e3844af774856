use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::AppConfig;
use crate::domain::{GuestFingerprint, Identity};
use crate::errors::DomainError;

pub mod account;
pub mod admin;
pub mod game;
pub mod players;
pub mod schedule;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}

/// Resolves the request's identity. Authentication itself is upstream; a
/// verified user id arrives in `X-User-Id`, everything else plays as a
/// guest fingerprinted by socket address + user agent.
pub fn resolve_identity(headers: &HeaderMap, addr: &ConnectInfo<SocketAddr>) -> Identity {
    if let Some(user_id) = headers
        .get("X-User-Id")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
    {
        return Identity::User(user_id);
    }

    let user_agent = headers
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
        .to_string();
    Identity::Guest(GuestFingerprint {
        ip: addr.0.ip().to_string(),
        user_agent,
    })
}

/// Domain errors that are not part of a gameplay envelope map to plain
/// status responses in one place.
pub fn error_response(err: DomainError) -> Response {
    match err {
        DomainError::SessionTerminal => {
            (StatusCode::CONFLICT, "session already finished").into_response()
        }
        DomainError::NoActiveSchedule => {
            (StatusCode::NOT_FOUND, "no active schedule").into_response()
        }
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        DomainError::InvalidInput(msg) => {
            (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response()
        }
        DomainError::Storage(e) => {
            log::error!("storage failure: {e:?}");
            (StatusCode::INTERNAL_SERVER_ERROR, "storage failure").into_response()
        }
        other => {
            // Resolver rejections and exhausted hints are handled inside
            // the gameplay envelopes; reaching here is a routing bug.
            log::error!("unhandled domain outcome at boundary: {other}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
