use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row};

use super::connection::DbConn;
use super::models::GuessRow;

/// Appends a guess. Returns None when the (session, player) pair already
/// exists — the authoritative duplicate check, closing the race the
/// resolver's advisory check leaves open.
pub fn try_insert(
    conn: &mut DbConn,
    session_id: i64,
    player_id: i64,
    created_at: NaiveDateTime,
) -> Result<Option<GuessRow>> {
    let sql = "INSERT INTO guesses (session_id, player_id, created_at) \
               VALUES (?1, ?2, ?3) \
               ON CONFLICT (session_id, player_id) DO NOTHING \
               RETURNING id, session_id, player_id, created_at";

    conn.query_row(sql, params![session_id, player_id, created_at], parse_guess_row)
        .optional()
        .context("Failed to insert guess")
}

pub fn list_player_ids(conn: &mut DbConn, session_id: i64) -> Result<Vec<i64>> {
    let sql = "SELECT player_id FROM guesses WHERE session_id = ?1 ORDER BY created_at, id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![session_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_for_session(conn: &mut DbConn, session_id: i64) -> Result<i64> {
    let sql = "SELECT COUNT(*) FROM guesses WHERE session_id = ?1";
    conn.query_row(sql, params![session_id], |row| row.get(0))
        .context("Failed to count guesses for session")
}

fn parse_guess_row(row: &Row) -> rusqlite::Result<GuessRow> {
    Ok(GuessRow {
        id: row.get(0)?,
        session_id: row.get(1)?,
        player_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}
