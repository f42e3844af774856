use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::connection::DbConn;
use crate::domain::{
    BestResult, Difficulty, Gender, Laterality, Organisation, PlayerRecord,
    TournamentResult,
};

const COLUMNS: &str = "id, first_name, last_name, gender, country, laterality, \
    darts_brand, organisation, birth_date, playing_since, elo_rank, pdc_rank, \
    wdf_rank, darts_weight_grams, nine_darters, best_result_pdc, year_best_pdc, \
    best_result_wdf, year_best_wdf, best_result_uk_open, year_best_uk_open, \
    active, tour_card, played_wcod, played_wdf, difficulty";

/// Inserts or refreshes a player keyed on the full name. The record's `id`
/// field is ignored on the way in; the stored id comes back out.
pub fn upsert_player(conn: &mut DbConn, player: &PlayerRecord) -> Result<PlayerRecord> {
    let sql = format!(
        "INSERT INTO players (first_name, last_name, gender, country, laterality, \
         darts_brand, organisation, birth_date, playing_since, elo_rank, pdc_rank, \
         wdf_rank, darts_weight_grams, nine_darters, best_result_pdc, year_best_pdc, \
         best_result_wdf, year_best_wdf, best_result_uk_open, year_best_uk_open, \
         active, tour_card, played_wcod, played_wdf, difficulty) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
         ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25) \
         ON CONFLICT (first_name, last_name) DO UPDATE SET \
         gender = excluded.gender, country = excluded.country, \
         laterality = excluded.laterality, darts_brand = excluded.darts_brand, \
         organisation = excluded.organisation, birth_date = excluded.birth_date, \
         playing_since = excluded.playing_since, elo_rank = excluded.elo_rank, \
         pdc_rank = excluded.pdc_rank, wdf_rank = excluded.wdf_rank, \
         darts_weight_grams = excluded.darts_weight_grams, \
         nine_darters = excluded.nine_darters, \
         best_result_pdc = excluded.best_result_pdc, \
         year_best_pdc = excluded.year_best_pdc, \
         best_result_wdf = excluded.best_result_wdf, \
         year_best_wdf = excluded.year_best_wdf, \
         best_result_uk_open = excluded.best_result_uk_open, \
         year_best_uk_open = excluded.year_best_uk_open, \
         active = excluded.active, tour_card = excluded.tour_card, \
         played_wcod = excluded.played_wcod, played_wdf = excluded.played_wdf, \
         difficulty = excluded.difficulty \
         RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            player.first_name,
            player.last_name,
            player.gender.as_str(),
            player.country,
            player.laterality.as_str(),
            player.darts_brand,
            player.organisation.as_str(),
            player.birth_date,
            player.playing_since,
            player.elo_rank,
            player.pdc_rank,
            player.wdf_rank,
            player.darts_weight_grams,
            player.nine_darters,
            player.best_result_pdc.map(|b| b.result.as_str()),
            player.best_result_pdc.and_then(|b| b.year),
            player.best_result_wdf.map(|b| b.result.as_str()),
            player.best_result_wdf.and_then(|b| b.year),
            player.best_result_uk_open.map(|b| b.result.as_str()),
            player.best_result_uk_open.and_then(|b| b.year),
            player.active,
            player.tour_card,
            player.played_wcod,
            player.played_wdf,
            player.difficulty.as_str(),
        ],
        parse_player_row,
    )
    .context("Failed to upsert player")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<PlayerRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<PlayerRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM players ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_difficulties(
    conn: &mut DbConn,
    difficulties: &[Difficulty],
) -> Result<Vec<PlayerRecord>> {
    if difficulties.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=difficulties.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {COLUMNS} FROM players WHERE difficulty IN ({placeholders}) ORDER BY id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let values: Vec<&str> = difficulties.iter().map(Difficulty::as_str).collect();
    let rows = stmt
        .query_map(rusqlite::params_from_iter(values), parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_player_row(row: &Row) -> rusqlite::Result<PlayerRecord> {
    Ok(PlayerRecord {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        gender: parse_enum(row, 3, Gender::parse)?,
        country: row.get(4)?,
        laterality: parse_enum(row, 5, Laterality::parse)?,
        darts_brand: row.get(6)?,
        organisation: parse_enum(row, 7, Organisation::parse)?,
        birth_date: row.get(8)?,
        playing_since: row.get(9)?,
        elo_rank: row.get(10)?,
        pdc_rank: row.get(11)?,
        wdf_rank: row.get(12)?,
        darts_weight_grams: row.get(13)?,
        nine_darters: row.get(14)?,
        best_result_pdc: parse_best_result(row, 15, 16)?,
        best_result_wdf: parse_best_result(row, 17, 18)?,
        best_result_uk_open: parse_best_result(row, 19, 20)?,
        active: row.get(21)?,
        tour_card: row.get(22)?,
        played_wcod: row.get(23)?,
        played_wdf: row.get(24)?,
        difficulty: parse_enum(row, 25, Difficulty::parse)?,
    })
}

fn parse_enum<T>(
    row: &Row,
    idx: usize,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown enum value: {raw}").into(),
        )
    })
}

fn parse_best_result(
    row: &Row,
    result_idx: usize,
    year_idx: usize,
) -> rusqlite::Result<Option<BestResult>> {
    let raw: Option<String> = row.get(result_idx)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let result = TournamentResult::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            result_idx,
            Type::Text,
            format!("unknown result tier: {raw}").into(),
        )
    })?;
    Ok(Some(BestResult {
        result,
        year: row.get(year_idx)?,
    }))
}
