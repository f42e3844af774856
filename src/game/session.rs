use anyhow::anyhow;
use chrono::NaiveDateTime;
use std::collections::HashSet;

use crate::compare;
use crate::config::AppConfig;
use crate::database::models::SessionRow;
use crate::database::{guesses, players, schedules, sessions, users, DbConn};
use crate::domain::{
    AccountFlags, Difficulty, GameStatus, Identity, KnownMatches, PlayerRecord,
    Target, TargetRef, VerdictMap,
};
use crate::errors::{DomainError, DomainResult};
use crate::game::{hints, schedule};
use crate::resolver::{self, ResolvedPlayer};

/// Outcome of a recorded guess.
#[derive(Debug, Clone)]
pub enum GuessOutcome {
    Correct {
        target: ResolvedPlayer,
        verdict: VerdictMap,
    },
    Incorrect {
        candidate: ResolvedPlayer,
        verdict: VerdictMap,
        known_matches: KnownMatches,
    },
}

/// What a surrendering player gets back: the answer, and for official
/// mode a preview of the next scheduled round.
#[derive(Debug, Clone)]
pub struct GiveUpOutcome {
    pub target: ResolvedPlayer,
    pub next_official: Option<NextTargetPreview>,
}

#[derive(Debug, Clone)]
pub struct NextTargetPreview {
    pub starts_at: NaiveDateTime,
    pub difficulty: Difficulty,
}

/// Orchestrates identity, target resolution, session lifecycle and guess
/// recording. Stateless apart from configuration; all durable state lives
/// behind the connection.
pub struct GameService<'a> {
    config: &'a AppConfig,
}

impl<'a> GameService<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Records one guess against the identity's session for the given
    /// target. Resolver rejections leave every row untouched.
    pub fn submit_guess(
        &self,
        conn: &mut DbConn,
        identity: &Identity,
        target_ref: TargetRef,
        raw_guess: &str,
        now: NaiveDateTime,
    ) -> DomainResult<GuessOutcome> {
        let raw_guess = validate_raw_guess(raw_guess, &self.config.resolver)?;

        let (target, session) =
            self.resolve_target_and_session(conn, identity, target_ref, now)?;
        if session.status.is_terminal() {
            return Err(DomainError::SessionTerminal);
        }

        let index = resolver::build_index(&players::list_all(conn)?);
        let already_guessed: HashSet<i64> = guesses::list_player_ids(conn, session.id)?
            .into_iter()
            .collect();
        let candidate = resolver::resolve(
            raw_guess,
            &index,
            &already_guessed,
            &self.config.resolver,
        )?;

        // Authoritative duplicate check at the storage layer.
        if guesses::try_insert(conn, session.id, candidate.player_id, now)?.is_none() {
            return Err(DomainError::DuplicateGuess);
        }

        let target_player = require_player(conn, target.player_id())?;
        if candidate.player_id == target_player.id {
            sessions::set_status(conn, session.id, GameStatus::Won, now)?;
            log::info!("session {} won after {} guesses", session.id, already_guessed.len() + 1);
            return Ok(GuessOutcome::Correct {
                target: ResolvedPlayer {
                    player_id: target_player.id,
                    display_name: target_player.full_name(),
                },
                verdict: compare::win_verdict(&target_player),
            });
        }

        let candidate_player = require_player(conn, candidate.player_id)?;
        let verdict = compare::compare(&candidate_player, &target_player);
        let mut known_matches = session.known_matches;
        known_matches.absorb(&verdict);
        sessions::update_known_matches(conn, session.id, &known_matches)?;

        Ok(GuessOutcome::Incorrect {
            candidate,
            verdict,
            known_matches,
        })
    }

    /// Marks the identity's session for the target as given up and reveals
    /// the answer. A session that is already terminal — in either
    /// direction — is an invariant violation, never overwritten.
    pub fn give_up(
        &self,
        conn: &mut DbConn,
        identity: &Identity,
        target_ref: TargetRef,
        now: NaiveDateTime,
    ) -> DomainResult<GiveUpOutcome> {
        let (target, session) =
            self.resolve_target_and_session(conn, identity, target_ref, now)?;
        if session.status.is_terminal() {
            return Err(DomainError::SessionTerminal);
        }

        sessions::set_status(conn, session.id, GameStatus::GivenUp, now)?;
        log::info!("session {} given up", session.id);

        let target_player = require_player(conn, target.player_id())?;
        let next_official = match target {
            Target::Scheduled { schedule_id, .. } => {
                let row = schedules::find_by_id(conn, schedule_id)?
                    .ok_or_else(|| {
                        DomainError::Storage(anyhow!("schedule {schedule_id} vanished"))
                    })?;
                self.next_preview(conn, row.ends_at)?
            }
            Target::Random { .. } => None,
        };

        Ok(GiveUpOutcome {
            target: ResolvedPlayer {
                player_id: target_player.id,
                display_name: target_player.full_name(),
            },
            next_official,
        })
    }

    /// Reveals the next hint for the identity's session on the target.
    pub fn reveal_next_hint(
        &self,
        conn: &mut DbConn,
        identity: &Identity,
        target_ref: TargetRef,
        now: NaiveDateTime,
    ) -> DomainResult<String> {
        let (_, session) =
            self.resolve_target_and_session(conn, identity, target_ref, now)?;
        let hint = hints::reveal_next(conn, session.id)?;
        Ok(hint.content)
    }

    fn next_preview(
        &self,
        conn: &mut DbConn,
        after_end: NaiveDateTime,
    ) -> DomainResult<Option<NextTargetPreview>> {
        let Some(next) = schedule::next_target(conn, after_end)? else {
            return Ok(None);
        };
        let player = require_player(conn, next.player_id)?;
        Ok(Some(NextTargetPreview {
            starts_at: next.starts_at,
            difficulty: player.difficulty,
        }))
    }

    /// Resolves the target reference and finds or creates the one session
    /// the identity may hold for it. Creation races resolve to the row the
    /// concurrent winner inserted.
    fn resolve_target_and_session(
        &self,
        conn: &mut DbConn,
        identity: &Identity,
        target_ref: TargetRef,
        now: NaiveDateTime,
    ) -> DomainResult<(Target, SessionRow)> {
        match target_ref {
            TargetRef::CurrentOfficial | TargetRef::Schedule(_) => {
                let row = match target_ref {
                    TargetRef::Schedule(id) => schedule::target_by_id(conn, id)?,
                    _ => schedule::current_target(conn, now)?,
                };
                let target = Target::Scheduled {
                    schedule_id: row.id,
                    player_id: row.player_id,
                };
                let session = match sessions::find_official(conn, identity, row.id)? {
                    Some(existing) => existing,
                    None => match sessions::try_insert(conn, identity, &target, now)? {
                        Some(created) => created,
                        None => sessions::find_official(conn, identity, row.id)?
                            .ok_or_else(|| {
                                DomainError::Storage(anyhow!(
                                    "official session lost race but is missing"
                                ))
                            })?,
                    },
                };
                Ok((target, session))
            }
            TargetRef::Random => {
                if let Some(existing) = sessions::find_active_random(conn, identity)? {
                    let player_id = existing.random_player_id.ok_or_else(|| {
                        DomainError::Storage(anyhow!(
                            "random session {} has no target",
                            existing.id
                        ))
                    })?;
                    return Ok((Target::Random { player_id }, existing));
                }

                let flags = self.account_flags(conn, identity)?;
                let drawn = schedule::draw_random_target(
                    conn,
                    identity,
                    &flags,
                    &self.config.game,
                )?;
                let target = Target::Random { player_id: drawn.id };
                let session = match sessions::try_insert(conn, identity, &target, now)? {
                    Some(created) => {
                        log::info!(
                            "drew random target {} for session {}",
                            drawn.id,
                            created.id
                        );
                        created
                    }
                    None => sessions::find_active_random(conn, identity)?
                        .ok_or_else(|| {
                            DomainError::Storage(anyhow!(
                                "random session lost race but is missing"
                            ))
                        })?,
                };
                let player_id = session.random_player_id.ok_or_else(|| {
                    DomainError::Storage(anyhow!("random session {} has no target", session.id))
                })?;
                Ok((Target::Random { player_id }, session))
            }
        }
    }

    fn account_flags(
        &self,
        conn: &mut DbConn,
        identity: &Identity,
    ) -> DomainResult<AccountFlags> {
        match identity {
            Identity::User(id) => Ok(users::get_flags(conn, *id)?),
            Identity::Guest(_) => Ok(AccountFlags::default()),
        }
    }
}

/// Plain input validation, distinct from the resolver's domain taxonomy.
fn validate_raw_guess<'s>(
    raw: &'s str,
    settings: &crate::config::settings::ResolverSettings,
) -> DomainResult<&'s str> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < settings.min_query_len {
        return Err(DomainError::InvalidInput("guess is too short".to_string()));
    }
    if len > settings.max_query_len {
        return Err(DomainError::InvalidInput("guess is too long".to_string()));
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || matches!(c, '\'' | '-' | '.'));
    if !valid {
        return Err(DomainError::InvalidInput(
            "guess may only contain letters, spaces, apostrophes, hyphens and dots"
                .to_string(),
        ));
    }
    Ok(trimmed)
}

fn require_player(conn: &mut DbConn, player_id: i64) -> DomainResult<PlayerRecord> {
    players::find_by_id(conn, player_id)?
        .ok_or_else(|| DomainError::Storage(anyhow!("player {player_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup, DbPool};
    use crate::domain::GuestFingerprint;
    use crate::testutil::sample_player;
    use chrono::NaiveDate;

    fn setup_pool(names: &[(&str, &str)]) -> DbPool {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();
        for (first, last) in names {
            players::upsert_player(&mut conn, &sample_player(first, last)).unwrap();
        }
        pool
    }

    fn guest(ip: &str) -> Identity {
        Identity::Guest(GuestFingerprint {
            ip: ip.to_string(),
            user_agent: "test-agent".to_string(),
        })
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn malformed_input_is_rejected_before_resolution() {
        let pool = setup_pool(&[("Peter", "Wright")]);
        let mut conn = get_connection(&pool).unwrap();
        let config = AppConfig::new();
        let service = GameService::new(&config);

        for bad in ["", "x", "drop;table"] {
            assert!(matches!(
                service.submit_guess(&mut conn, &guest("1.1.1.1"), TargetRef::Random, bad, noon()),
                Err(DomainError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn official_session_is_created_once_per_identity() {
        let pool = setup_pool(&[("Peter", "Wright"), ("Rob", "Cross")]);
        let mut conn = get_connection(&pool).unwrap();
        let config = AppConfig::new();
        let service = GameService::new(&config);
        let id = guest("1.1.1.1");

        let (target_a, session_a) = service
            .resolve_target_and_session(&mut conn, &id, TargetRef::CurrentOfficial, noon())
            .unwrap();
        let (target_b, session_b) = service
            .resolve_target_and_session(&mut conn, &id, TargetRef::CurrentOfficial, noon())
            .unwrap();
        assert_eq!(session_a.id, session_b.id);
        assert_eq!(target_a, target_b);

        // A different identity gets its own session for the same target.
        let (_, other) = service
            .resolve_target_and_session(&mut conn, &guest("2.2.2.2"), TargetRef::CurrentOfficial, noon())
            .unwrap();
        assert_ne!(other.id, session_a.id);
    }

    #[test]
    fn random_target_persists_until_the_session_ends() {
        let pool = setup_pool(&[("Peter", "Wright"), ("Rob", "Cross"), ("Luke", "Humphries")]);
        let mut conn = get_connection(&pool).unwrap();
        let config = AppConfig::new();
        let service = GameService::new(&config);
        let id = guest("1.1.1.1");

        let (target_a, session_a) = service
            .resolve_target_and_session(&mut conn, &id, TargetRef::Random, noon())
            .unwrap();
        let (target_b, session_b) = service
            .resolve_target_and_session(&mut conn, &id, TargetRef::Random, noon())
            .unwrap();
        assert_eq!(session_a.id, session_b.id);
        assert_eq!(target_a.player_id(), target_b.player_id());
    }

    #[test]
    fn fresh_random_draw_avoids_the_previous_target() {
        let pool = setup_pool(&[("Peter", "Wright"), ("Rob", "Cross")]);
        let mut conn = get_connection(&pool).unwrap();
        let config = AppConfig::new();
        let service = GameService::new(&config);
        let id = guest("1.1.1.1");

        let (first_target, _) = service
            .resolve_target_and_session(&mut conn, &id, TargetRef::Random, noon())
            .unwrap();
        service.give_up(&mut conn, &id, TargetRef::Random, noon()).unwrap();

        // Both players are easy-tier samples, so every fresh draw has
        // exactly one eligible candidate: the one not drawn last time.
        let mut previous = first_target.player_id();
        for _ in 0..5 {
            let (next_target, session) = service
                .resolve_target_and_session(&mut conn, &id, TargetRef::Random, noon())
                .unwrap();
            assert_ne!(next_target.player_id(), previous);
            previous = next_target.player_id();
            sessions::set_status(&mut conn, session.id, GameStatus::GivenUp, noon()).unwrap();
        }
    }
}
