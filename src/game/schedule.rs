use anyhow::anyhow;
use chrono::{Duration, NaiveDateTime};
use rand::seq::SliceRandom;

use crate::config::settings::GameSettings;
use crate::database::models::ScheduleRow;
use crate::database::{players, schedules, sessions, DbConn};
use crate::domain::{AccountFlags, Difficulty, Identity, PlayerRecord};
use crate::errors::{DomainError, DomainResult};

/// The schedule row covering `now`. When none exists the schedule
/// self-heals: a player is drawn uniformly from the full set and a row
/// starting at `now` is inserted. A lost insert race falls back to the
/// winner's row, so exactly one row ever covers an instant.
pub fn current_target(conn: &mut DbConn, now: NaiveDateTime) -> DomainResult<ScheduleRow> {
    if let Some(row) = schedules::find_covering(conn, now)? {
        return Ok(row);
    }

    let pool = players::list_all(conn)?;
    let pick = pool
        .choose(&mut rand::thread_rng())
        .ok_or_else(|| DomainError::Storage(anyhow!("no players to schedule")))?;

    let ends_at = now + Duration::days(1);
    match schedules::try_insert(conn, pick.id, now, ends_at)? {
        Some(row) => {
            log::info!(
                "Lazily scheduled player {} from {} to {}",
                row.player_id,
                row.starts_at,
                row.ends_at
            );
            Ok(row)
        }
        None => schedules::find_covering(conn, now)?
            .ok_or_else(|| DomainError::Storage(anyhow!("schedule insert lost race but no covering row"))),
    }
}

/// The row immediately after the given end date, if one is scheduled.
pub fn next_target(
    conn: &mut DbConn,
    after_end: NaiveDateTime,
) -> DomainResult<Option<ScheduleRow>> {
    Ok(schedules::find_next(conn, after_end)?)
}

/// A past (or current) official target named explicitly by id.
pub fn target_by_id(conn: &mut DbConn, schedule_id: i64) -> DomainResult<ScheduleRow> {
    schedules::find_by_id(conn, schedule_id)?.ok_or(DomainError::NoActiveSchedule)
}

/// Difficulty tiers the identity may draw from in random mode. Guests get
/// the configured easy subset; authenticated users get the default tiers
/// plus the hardest one behind a per-account opt-in.
pub fn allowed_difficulties(
    identity: &Identity,
    flags: &AccountFlags,
    settings: &GameSettings,
) -> Vec<Difficulty> {
    match identity {
        Identity::Guest(_) => settings.guest_difficulties.clone(),
        Identity::User(_) => {
            let mut tiers = settings.default_difficulties.clone();
            if flags.include_very_hard && !tiers.contains(&Difficulty::VeryHard) {
                tiers.push(Difficulty::VeryHard);
            }
            tiers
        }
    }
}

/// Draws a fresh random-mode target for the identity, excluding the
/// target of its most recently finished random session so back-to-back
/// repeats cannot happen. The exclusion is waived when only one eligible
/// player exists.
pub fn draw_random_target(
    conn: &mut DbConn,
    identity: &Identity,
    flags: &AccountFlags,
    settings: &GameSettings,
) -> DomainResult<PlayerRecord> {
    let tiers = allowed_difficulties(identity, flags, settings);
    let pool = players::list_by_difficulties(conn, &tiers)?;

    let previous = sessions::find_last_terminal_random(conn, identity)?
        .and_then(|s| s.random_player_id);

    let eligible: Vec<&PlayerRecord> = match previous {
        Some(prev) if pool.len() > 1 => pool.iter().filter(|p| p.id != prev).collect(),
        _ => pool.iter().collect(),
    };

    eligible
        .choose(&mut rand::thread_rng())
        .map(|p| (*p).clone())
        .ok_or_else(|| DomainError::Storage(anyhow!("no players eligible for a random draw")))
}
