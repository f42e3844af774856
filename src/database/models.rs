use chrono::NaiveDateTime;

use crate::domain::{GameStatus, KnownMatches};

#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub id: i64,
    pub player_id: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct SessionRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub guest_ip: Option<String>,
    pub guest_user_agent: Option<String>,
    pub schedule_id: Option<i64>,
    pub random_player_id: Option<i64>,
    pub status: GameStatus,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
    pub hints_revealed: i64,
    pub known_matches: KnownMatches,
}

#[derive(Debug, Clone)]
pub struct GuessRow {
    pub id: i64,
    pub session_id: i64,
    pub player_id: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct HintRow {
    pub id: i64,
    pub player_id: i64,
    pub content: String,
    pub approved: bool,
    pub created_at: NaiveDateTime,
}
