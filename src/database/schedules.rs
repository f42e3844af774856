use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row};

use super::connection::DbConn;
use super::models::ScheduleRow;

const COLUMNS: &str = "id, player_id, starts_at, ends_at";

pub fn find_covering(
    conn: &mut DbConn,
    instant: NaiveDateTime,
) -> Result<Option<ScheduleRow>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM schedules \
         WHERE starts_at <= ?1 AND ends_at > ?1 \
         ORDER BY starts_at DESC LIMIT 1"
    );

    conn.query_row(&sql, params![instant], parse_schedule_row)
        .optional()
        .context("Failed to query covering schedule")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<ScheduleRow>> {
    let sql = format!("SELECT {COLUMNS} FROM schedules WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_schedule_row)
        .optional()
        .context("Failed to query schedule by id")
}

pub fn find_next(
    conn: &mut DbConn,
    after: NaiveDateTime,
) -> Result<Option<ScheduleRow>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM schedules \
         WHERE starts_at >= ?1 ORDER BY starts_at ASC LIMIT 1"
    );

    conn.query_row(&sql, params![after], parse_schedule_row)
        .optional()
        .context("Failed to query next schedule")
}

/// Returns None when another writer already claimed `starts_at`; the
/// caller re-selects instead of failing, which closes the lazy-creation
/// race on the unique index.
pub fn try_insert(
    conn: &mut DbConn,
    player_id: i64,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
) -> Result<Option<ScheduleRow>> {
    let sql = format!(
        "INSERT INTO schedules (player_id, starts_at, ends_at) \
         VALUES (?1, ?2, ?3) \
         ON CONFLICT (starts_at) DO NOTHING \
         RETURNING {COLUMNS}"
    );

    conn.query_row(&sql, params![player_id, starts_at, ends_at], parse_schedule_row)
        .optional()
        .context("Failed to insert schedule")
}

fn parse_schedule_row(row: &Row) -> rusqlite::Result<ScheduleRow> {
    Ok(ScheduleRow {
        id: row.get(0)?,
        player_id: row.get(1)?,
        starts_at: row.get(2)?,
        ends_at: row.get(3)?,
    })
}
