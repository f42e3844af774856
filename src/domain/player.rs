use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Throwing hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Laterality {
    RightHanded,
    LeftHanded,
}

impl Laterality {
    pub fn label(&self) -> &'static str {
        match self {
            Laterality::RightHanded => "Right-handed",
            Laterality::LeftHanded => "Left-handed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Laterality::RightHanded => "right_handed",
            Laterality::LeftHanded => "left_handed",
        }
    }

    pub fn parse(s: &str) -> Option<Laterality> {
        match s {
            "right_handed" => Some(Laterality::RightHanded),
            "left_handed" => Some(Laterality::LeftHanded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organisation {
    Pdc,
    Wdf,
    Both,
    None,
}

impl Organisation {
    pub fn label(&self) -> &'static str {
        match self {
            Organisation::Pdc => "PDC",
            Organisation::Wdf => "WDF",
            Organisation::Both => "PDC & WDF",
            Organisation::None => "None",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Organisation::Pdc => "pdc",
            Organisation::Wdf => "wdf",
            Organisation::Both => "both",
            Organisation::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Organisation> {
        match s {
            "pdc" => Some(Organisation::Pdc),
            "wdf" => Some(Organisation::Wdf),
            "both" => Some(Organisation::Both),
            "none" => Some(Organisation::None),
            _ => None,
        }
    }
}

/// Best-result tiers across the tracked tournaments, declared low to high.
/// Ordinal comparison goes through `compare::scale`, not this declaration
/// order directly, because two tiers share a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentResult {
    DidNotParticipate,
    FirstRound,
    SecondRound,
    ThirdRound,
    FourthRound,
    LastSixteen,
    QuarterFinals,
    SemiFinals,
    FourthPlace,
    ThirdPlace,
    RunnerUp,
    Winner,
}

impl TournamentResult {
    pub fn label(&self) -> &'static str {
        match self {
            TournamentResult::DidNotParticipate => "Did not participate",
            TournamentResult::FirstRound => "First Round",
            TournamentResult::SecondRound => "Second Round",
            TournamentResult::ThirdRound => "Third Round",
            TournamentResult::FourthRound => "Fourth Round",
            TournamentResult::LastSixteen => "Last 16",
            TournamentResult::QuarterFinals => "Quarter-Finals",
            TournamentResult::SemiFinals => "Semi-Finals",
            TournamentResult::FourthPlace => "Fourth Place",
            TournamentResult::ThirdPlace => "Third Place",
            TournamentResult::RunnerUp => "Runner-Up",
            TournamentResult::Winner => "Winner",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentResult::DidNotParticipate => "did_not_participate",
            TournamentResult::FirstRound => "first_round",
            TournamentResult::SecondRound => "second_round",
            TournamentResult::ThirdRound => "third_round",
            TournamentResult::FourthRound => "fourth_round",
            TournamentResult::LastSixteen => "last_sixteen",
            TournamentResult::QuarterFinals => "quarter_finals",
            TournamentResult::SemiFinals => "semi_finals",
            TournamentResult::FourthPlace => "fourth_place",
            TournamentResult::ThirdPlace => "third_place",
            TournamentResult::RunnerUp => "runner_up",
            TournamentResult::Winner => "winner",
        }
    }

    pub fn parse(s: &str) -> Option<TournamentResult> {
        match s {
            "did_not_participate" => Some(TournamentResult::DidNotParticipate),
            "first_round" => Some(TournamentResult::FirstRound),
            "second_round" => Some(TournamentResult::SecondRound),
            "third_round" => Some(TournamentResult::ThirdRound),
            "fourth_round" => Some(TournamentResult::FourthRound),
            "last_sixteen" => Some(TournamentResult::LastSixteen),
            "quarter_finals" => Some(TournamentResult::QuarterFinals),
            "semi_finals" => Some(TournamentResult::SemiFinals),
            "fourth_place" => Some(TournamentResult::FourthPlace),
            "third_place" => Some(TournamentResult::ThirdPlace),
            "runner_up" => Some(TournamentResult::RunnerUp),
            "winner" => Some(TournamentResult::Winner),
            _ => None,
        }
    }
}

/// Game configuration tier only; never part of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very_hard",
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "very_hard" => Some(Difficulty::VeryHard),
            _ => None,
        }
    }
}

/// A best result together with the year it was achieved. The pair compares
/// as one ordinal attribute on the result tier; the year rides along as a
/// sub-field shown once the tier matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestResult {
    pub result: TournamentResult,
    pub year: Option<i32>,
}

/// One darts player, as maintained by the external data pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Database-assigned; seed files may omit it.
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,

    // Categorical
    pub gender: Gender,
    pub country: String,
    pub laterality: Laterality,
    pub darts_brand: Option<String>,
    pub organisation: Organisation,

    // Ordinal, nullable. Rank fields store 1 as the top rank.
    pub birth_date: Option<NaiveDate>,
    pub playing_since: Option<i32>,
    pub elo_rank: Option<i32>,
    pub pdc_rank: Option<i32>,
    pub wdf_rank: Option<i32>,
    pub darts_weight_grams: Option<f64>,
    pub nine_darters: Option<i32>,
    pub best_result_pdc: Option<BestResult>,
    pub best_result_wdf: Option<BestResult>,
    pub best_result_uk_open: Option<BestResult>,

    // Boolean
    pub active: bool,
    pub tour_card: bool,
    pub played_wcod: bool,
    pub played_wdf: bool,

    // Derived
    pub difficulty: Difficulty,
}

impl PlayerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
