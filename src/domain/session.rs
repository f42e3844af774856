use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Official,
    Random,
}

/// What the caller points the operation at. Official mode may name a past
/// schedule row; `CurrentOfficial` means "whatever covers now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRef {
    CurrentOfficial,
    Schedule(i64),
    Random,
}

/// A fully resolved target. Exactly one of the two shapes exists for a
/// session; the player id is carried in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Scheduled { schedule_id: i64, player_id: i64 },
    Random { player_id: i64 },
}

impl Target {
    pub fn player_id(&self) -> i64 {
        match self {
            Target::Scheduled { player_id, .. } => *player_id,
            Target::Random { player_id } => *player_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    GivenUp,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::GivenUp => "given_up",
        }
    }

    pub fn parse(s: &str) -> Option<GameStatus> {
        match s {
            "in_progress" => Some(GameStatus::InProgress),
            "won" => Some(GameStatus::Won),
            "given_up" => Some(GameStatus::GivenUp),
            _ => None,
        }
    }
}
