use chrono::NaiveDate;

use crate::domain::{
    BestResult, Difficulty, Gender, Laterality, Organisation, PlayerRecord,
    TournamentResult,
};

/// Easy-tier player with every attribute populated; ids are assigned by
/// the database on upsert.
pub fn sample_player(first: &str, last: &str) -> PlayerRecord {
    PlayerRecord {
        id: 0,
        first_name: first.to_string(),
        last_name: last.to_string(),
        gender: Gender::Male,
        country: "England".to_string(),
        laterality: Laterality::RightHanded,
        darts_brand: Some("Unicorn".to_string()),
        organisation: Organisation::Pdc,
        birth_date: NaiveDate::from_ymd_opt(1988, 4, 12),
        playing_since: Some(2004),
        elo_rank: Some(25),
        pdc_rank: Some(18),
        wdf_rank: None,
        darts_weight_grams: Some(22.0),
        nine_darters: Some(1),
        best_result_pdc: Some(BestResult {
            result: TournamentResult::QuarterFinals,
            year: Some(2020),
        }),
        best_result_wdf: None,
        best_result_uk_open: None,
        active: true,
        tour_card: true,
        played_wcod: false,
        played_wdf: false,
        difficulty: Difficulty::Easy,
    }
}
