use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::connection::DbConn;
use super::models::SessionRow;
use crate::domain::{GameStatus, Identity, KnownMatches, Target};

const COLUMNS: &str = "id, user_id, guest_ip, guest_user_agent, schedule_id, \
    random_player_id, status, started_at, ended_at, hints_revealed, known_matches";

/// Shared owner predicate; ?1 = user id, ?2 = guest ip, ?3 = guest agent.
const OWNER_CLAUSE: &str = "((?1 IS NOT NULL AND user_id = ?1) \
    OR (?1 IS NULL AND user_id IS NULL AND guest_ip = ?2 AND guest_user_agent = ?3))";

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<SessionRow>> {
    let sql = format!("SELECT {COLUMNS} FROM sessions WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_session_row)
        .optional()
        .context("Failed to query session by id")
}

pub fn find_official(
    conn: &mut DbConn,
    identity: &Identity,
    schedule_id: i64,
) -> Result<Option<SessionRow>> {
    let (user_id, ip, agent) = owner_params(identity);
    let sql = format!(
        "SELECT {COLUMNS} FROM sessions WHERE schedule_id = ?4 AND {OWNER_CLAUSE}"
    );

    conn.query_row(&sql, params![user_id, ip, agent, schedule_id], parse_session_row)
        .optional()
        .context("Failed to query official session")
}

pub fn find_active_random(
    conn: &mut DbConn,
    identity: &Identity,
) -> Result<Option<SessionRow>> {
    let (user_id, ip, agent) = owner_params(identity);
    let sql = format!(
        "SELECT {COLUMNS} FROM sessions \
         WHERE random_player_id IS NOT NULL AND status = 'in_progress' AND {OWNER_CLAUSE}"
    );

    conn.query_row(&sql, params![user_id, ip, agent], parse_session_row)
        .optional()
        .context("Failed to query active random session")
}

/// The identity's most recently finished random session, used to keep a
/// fresh draw from repeating the previous target.
pub fn find_last_terminal_random(
    conn: &mut DbConn,
    identity: &Identity,
) -> Result<Option<SessionRow>> {
    let (user_id, ip, agent) = owner_params(identity);
    let sql = format!(
        "SELECT {COLUMNS} FROM sessions \
         WHERE random_player_id IS NOT NULL AND status != 'in_progress' AND {OWNER_CLAUSE} \
         ORDER BY ended_at DESC, id DESC LIMIT 1"
    );

    conn.query_row(&sql, params![user_id, ip, agent], parse_session_row)
        .optional()
        .context("Failed to query last terminal random session")
}

/// Returns None when a concurrent request already created the session for
/// this identity and target; the caller re-selects.
pub fn try_insert(
    conn: &mut DbConn,
    identity: &Identity,
    target: &Target,
    started_at: NaiveDateTime,
) -> Result<Option<SessionRow>> {
    let (user_id, guest_ip, guest_user_agent) = owner_params(identity);
    let (schedule_id, random_player_id) = match target {
        Target::Scheduled { schedule_id, .. } => (Some(*schedule_id), None),
        Target::Random { player_id } => (None, Some(*player_id)),
    };

    let sql = format!(
        "INSERT INTO sessions \
         (user_id, guest_ip, guest_user_agent, schedule_id, random_player_id, started_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT DO NOTHING \
         RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            user_id,
            guest_ip,
            guest_user_agent,
            schedule_id,
            random_player_id,
            started_at
        ],
        parse_session_row,
    )
    .optional()
    .context("Failed to insert session")
}

pub fn set_status(
    conn: &mut DbConn,
    session_id: i64,
    status: GameStatus,
    ended_at: NaiveDateTime,
) -> Result<()> {
    let sql = "UPDATE sessions SET status = ?1, ended_at = ?2 WHERE id = ?3";
    conn.execute(sql, params![status.as_str(), ended_at, session_id])
        .context("Failed to update session status")?;
    Ok(())
}

pub fn update_known_matches(
    conn: &mut DbConn,
    session_id: i64,
    known: &KnownMatches,
) -> Result<()> {
    let blob = serde_json::to_string(known).context("Failed to encode known matches")?;
    let sql = "UPDATE sessions SET known_matches = ?1 WHERE id = ?2";
    conn.execute(sql, params![blob, session_id])
        .context("Failed to update known matches")?;
    Ok(())
}

/// Optimistic half of the hint-reveal protocol: bump first, fetch after.
pub fn increment_hints(conn: &mut DbConn, session_id: i64) -> Result<i64> {
    let sql = "UPDATE sessions SET hints_revealed = hints_revealed + 1 \
               WHERE id = ?1 RETURNING hints_revealed";
    conn.query_row(sql, params![session_id], |row| row.get(0))
        .context("Failed to increment hint counter")
}

/// Compensating rollback for a fetch that found no hint at the new offset.
pub fn decrement_hints(conn: &mut DbConn, session_id: i64) -> Result<i64> {
    let sql = "UPDATE sessions SET hints_revealed = hints_revealed - 1 \
               WHERE id = ?1 AND hints_revealed > 0 RETURNING hints_revealed";
    conn.query_row(sql, params![session_id], |row| row.get(0))
        .context("Failed to roll back hint counter")
}

fn owner_params(identity: &Identity) -> (Option<i64>, Option<String>, Option<String>) {
    match identity {
        Identity::User(id) => (Some(*id), None, None),
        Identity::Guest(fp) => (None, Some(fp.ip.clone()), Some(fp.user_agent.clone())),
    }
}

fn parse_session_row(row: &Row) -> rusqlite::Result<SessionRow> {
    let status_raw: String = row.get(6)?;
    let status = GameStatus::parse(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            Type::Text,
            format!("unknown session status: {status_raw}").into(),
        )
    })?;
    let known_raw: String = row.get(10)?;
    let known_matches = serde_json::from_str(&known_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e))
    })?;

    Ok(SessionRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        guest_ip: row.get(2)?,
        guest_user_agent: row.get(3)?,
        schedule_id: row.get(4)?,
        random_player_id: row.get(5)?,
        status,
        started_at: row.get(7)?,
        ended_at: row.get(8)?,
        hints_revealed: row.get(9)?,
        known_matches,
    })
}
