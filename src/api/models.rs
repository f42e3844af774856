use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{GameMode, KnownMatches, VerdictMap};

// --- Requests ---

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub mode: GameMode,
    /// Official mode may replay a past day by schedule id.
    pub schedule_id: Option<i64>,
    pub guess: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionTargetRequest {
    pub mode: GameMode,
    pub schedule_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AccountFlagsRequest {
    pub include_very_hard: bool,
}

#[derive(Debug, Deserialize)]
pub struct AdminScheduleRequest {
    pub player_id: i64,
    pub starts_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct AdminHintRequest {
    pub player_id: i64,
    pub content: String,
}

// --- Responses ---

#[derive(Debug, Serialize)]
pub struct PlayerRef {
    pub id: i64,
    pub name: String,
}

/// Tagged gameplay outcome; rejections the player must act on travel in
/// the same envelope as results.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuessResponse {
    Correct {
        target: PlayerRef,
        verdict: VerdictMap,
    },
    Incorrect {
        candidate: PlayerRef,
        verdict: VerdictMap,
        known_matches: KnownMatches,
    },
    NoCandidateFound,
    Ambiguous {
        suggestions: Vec<String>,
    },
    TooManyCandidates,
    DuplicateGuess,
}

#[derive(Debug, Serialize)]
pub struct NextTargetDto {
    pub starts_at: NaiveDateTime,
    pub difficulty: String,
}

#[derive(Debug, Serialize)]
pub struct GiveUpResponse {
    pub target: PlayerRef,
    pub next_target: Option<NextTargetDto>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HintResponse {
    Revealed { hint: String },
    Exhausted,
}

#[derive(Debug, Serialize)]
pub struct ScheduleDto {
    pub id: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub difficulty: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub items: Vec<PlayerRef>,
    pub total: i64,
}
