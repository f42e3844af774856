use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use super::connection::DbConn;
use super::models::HintRow;

const COLUMNS: &str = "id, player_id, content, approved, created_at";

pub fn insert(conn: &mut DbConn, player_id: i64, content: &str) -> Result<HintRow> {
    let sql = format!(
        "INSERT INTO hints (player_id, content) VALUES (?1, ?2) RETURNING {COLUMNS}"
    );

    conn.query_row(&sql, params![player_id, content], parse_hint_row)
        .context("Failed to insert hint")
}

pub fn approve(conn: &mut DbConn, hint_id: i64) -> Result<bool> {
    let sql = "UPDATE hints SET approved = 1 WHERE id = ?1";
    let updated = conn
        .execute(sql, params![hint_id])
        .context("Failed to approve hint")?;
    Ok(updated > 0)
}

/// The nth approved hint for a player, in reveal order.
pub fn find_by_offset(
    conn: &mut DbConn,
    player_id: i64,
    offset: i64,
) -> Result<Option<HintRow>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM hints \
         WHERE player_id = ?1 AND approved = 1 \
         ORDER BY created_at, id LIMIT 1 OFFSET ?2"
    );

    conn.query_row(&sql, params![player_id, offset], parse_hint_row)
        .optional()
        .context("Failed to query hint by offset")
}

fn parse_hint_row(row: &Row) -> rusqlite::Result<HintRow> {
    Ok(HintRow {
        id: row.get(0)?,
        player_id: row.get(1)?,
        content: row.get(2)?,
        approved: row.get(3)?,
        created_at: row.get(4)?,
    })
}
