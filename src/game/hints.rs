use anyhow::anyhow;

use crate::database::models::HintRow;
use crate::database::{hints, schedules, sessions, DbConn};
use crate::errors::{DomainError, DomainResult};

/// Reveals the next approved hint for a session's target, strictly in
/// creation order.
///
/// The counter is bumped first and the hint fetched by offset afterwards;
/// when nothing exists at the new offset the bump is compensated in the
/// same request. The rollback is synchronous so a miss never leaves the
/// counter advanced.
pub fn reveal_next(conn: &mut DbConn, session_id: i64) -> DomainResult<HintRow> {
    let session = sessions::find_by_id(conn, session_id)?
        .ok_or_else(|| DomainError::Storage(anyhow!("session {session_id} not found")))?;

    let player_id = match (session.random_player_id, session.schedule_id) {
        (Some(player_id), None) => player_id,
        (None, Some(schedule_id)) => {
            schedules::find_by_id(conn, schedule_id)?
                .ok_or_else(|| {
                    DomainError::Storage(anyhow!("schedule {schedule_id} not found"))
                })?
                .player_id
        }
        _ => {
            return Err(DomainError::Storage(anyhow!(
                "session {session_id} has inconsistent target columns"
            )))
        }
    };

    let revealed = sessions::increment_hints(conn, session_id)?;
    match hints::find_by_offset(conn, player_id, revealed - 1)? {
        Some(hint) => Ok(hint),
        None => {
            sessions::decrement_hints(conn, session_id)?;
            Err(DomainError::HintsExhausted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, players, setup};
    use crate::domain::{GuestFingerprint, Identity, Target};
    use crate::testutil::sample_player;
    use chrono::NaiveDate;

    fn guest() -> Identity {
        Identity::Guest(GuestFingerprint {
            ip: "10.0.0.1".to_string(),
            user_agent: "test".to_string(),
        })
    }

    fn session_with_hints(hint_texts: &[&str]) -> (crate::database::DbPool, i64) {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();

        let player =
            players::upsert_player(&mut conn, &sample_player("Peter", "Wright")).unwrap();
        for text in hint_texts {
            let hint = hints::insert(&mut conn, player.id, text).unwrap();
            hints::approve(&mut conn, hint.id).unwrap();
        }

        let started = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let session = sessions::try_insert(
            &mut conn,
            &guest(),
            &Target::Random {
                player_id: player.id,
            },
            started,
        )
        .unwrap()
        .unwrap();

        (pool, session.id)
    }

    #[test]
    fn hints_come_back_in_creation_order_then_exhaust() {
        let (pool, session_id) = session_with_hints(&["first", "second", "third"]);
        let mut conn = get_connection(&pool).unwrap();

        for expected in ["first", "second", "third"] {
            let hint = reveal_next(&mut conn, session_id).unwrap();
            assert_eq!(hint.content, expected);
        }

        assert!(matches!(
            reveal_next(&mut conn, session_id),
            Err(DomainError::HintsExhausted)
        ));

        // The failed reveal must not have advanced the counter.
        let session = sessions::find_by_id(&mut conn, session_id).unwrap().unwrap();
        assert_eq!(session.hints_revealed, 3);
    }

    #[test]
    fn unapproved_hints_are_never_revealed() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();

        let player =
            players::upsert_player(&mut conn, &sample_player("Rob", "Cross")).unwrap();
        hints::insert(&mut conn, player.id, "pending").unwrap();

        let started = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let session = sessions::try_insert(
            &mut conn,
            &guest(),
            &Target::Random {
                player_id: player.id,
            },
            started,
        )
        .unwrap()
        .unwrap();

        assert!(matches!(
            reveal_next(&mut conn, session.id),
            Err(DomainError::HintsExhausted)
        ));
        let row = sessions::find_by_id(&mut conn, session.id).unwrap().unwrap();
        assert_eq!(row.hints_revealed, 0);
    }
}
