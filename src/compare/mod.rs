pub mod scale;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{
    Attribute, BestResult, FieldVerdict, GuessedValue, OrdinalHint, PlayerRecord,
    VerdictMap,
};
use scale::result_rank;

/// Compares a guessed candidate against the hidden target. Pure and total:
/// every in-scope attribute gets exactly one verdict, an exact hit short
/// circuits into the distinguished win verdict.
pub fn compare(candidate: &PlayerRecord, target: &PlayerRecord) -> VerdictMap {
    if candidate.id == target.id {
        return win_verdict(target);
    }

    let mut fields = BTreeMap::new();
    for attr in Attribute::ALL {
        fields.insert(attr, field_verdict(attr, candidate, target));
    }
    VerdictMap { fields, exact: false }
}

/// The all-match verdict for a correct guess, built straight from the
/// target record instead of re-running the per-field comparison.
pub fn win_verdict(target: &PlayerRecord) -> VerdictMap {
    let mut fields = BTreeMap::new();
    for attr in Attribute::ALL {
        fields.insert(attr, matched_field(attr, target));
    }
    VerdictMap { fields, exact: true }
}

fn field_verdict(
    attr: Attribute,
    candidate: &PlayerRecord,
    target: &PlayerRecord,
) -> FieldVerdict {
    match attr {
        Attribute::Gender => categorical(
            candidate.gender == target.gender,
            Some(text(candidate.gender.label())),
        ),
        Attribute::Country => categorical(
            candidate.country == target.country,
            Some(GuessedValue::Text(candidate.country.clone())),
        ),
        Attribute::Laterality => categorical(
            candidate.laterality == target.laterality,
            Some(text(candidate.laterality.label())),
        ),
        Attribute::DartsBrand => categorical(
            candidate.darts_brand == target.darts_brand,
            candidate.darts_brand.clone().map(GuessedValue::Text),
        ),
        Attribute::Organisation => categorical(
            candidate.organisation == target.organisation,
            Some(text(candidate.organisation.label())),
        ),
        Attribute::BirthDate => ordinal(
            candidate.birth_date,
            target.birth_date,
            candidate
                .birth_date
                .map(|d| GuessedValue::Text(d.to_string())),
            false,
        ),
        Attribute::PlayingSince => ordinal(
            candidate.playing_since,
            target.playing_since,
            candidate.playing_since.map(int),
            false,
        ),
        // Rank scales are inverted: rank 1 is the top, so a numerically
        // smaller target rank is ordinally higher.
        Attribute::EloRank => ordinal(
            candidate.elo_rank,
            target.elo_rank,
            candidate.elo_rank.map(int),
            true,
        ),
        Attribute::PdcRank => ordinal(
            candidate.pdc_rank,
            target.pdc_rank,
            candidate.pdc_rank.map(int),
            true,
        ),
        Attribute::WdfRank => ordinal(
            candidate.wdf_rank,
            target.wdf_rank,
            candidate.wdf_rank.map(int),
            true,
        ),
        Attribute::DartsWeight => ordinal(
            candidate.darts_weight_grams,
            target.darts_weight_grams,
            candidate.darts_weight_grams.map(GuessedValue::Float),
            false,
        ),
        Attribute::NineDarters => ordinal(
            candidate.nine_darters,
            target.nine_darters,
            candidate.nine_darters.map(int),
            false,
        ),
        Attribute::BestResultPdc => {
            best_result(candidate.best_result_pdc, target.best_result_pdc)
        }
        Attribute::BestResultWdf => {
            best_result(candidate.best_result_wdf, target.best_result_wdf)
        }
        Attribute::BestResultUkOpen => {
            best_result(candidate.best_result_uk_open, target.best_result_uk_open)
        }
        Attribute::Active => boolean(candidate.active, target.active),
        Attribute::TourCard => boolean(candidate.tour_card, target.tour_card),
        Attribute::PlayedWcod => boolean(candidate.played_wcod, target.played_wcod),
        Attribute::PlayedWdf => boolean(candidate.played_wdf, target.played_wdf),
    }
}

/// A matched verdict carrying the target's own value, for the win map.
fn matched_field(attr: Attribute, target: &PlayerRecord) -> FieldVerdict {
    match field_verdict(attr, target, target) {
        FieldVerdict::Categorical { guessed, .. } => FieldVerdict::Categorical {
            matched: true,
            guessed,
        },
        FieldVerdict::Ordinal { guessed, .. } => FieldVerdict::Ordinal {
            hint: OrdinalHint::Match,
            guessed,
        },
        FieldVerdict::Boolean { guessed, .. } => FieldVerdict::Boolean {
            matched: true,
            guessed,
        },
    }
}

fn text(s: &str) -> GuessedValue {
    GuessedValue::Text(s.to_string())
}

fn int(v: i32) -> GuessedValue {
    GuessedValue::Int(v as i64)
}

fn categorical(matched: bool, guessed: Option<GuessedValue>) -> FieldVerdict {
    FieldVerdict::Categorical { matched, guessed }
}

fn boolean(candidate: bool, target: bool) -> FieldVerdict {
    FieldVerdict::Boolean {
        matched: candidate == target,
        guessed: candidate,
    }
}

/// Directional comparison with the null policy from the data model: a null
/// target never yields a direction, and a null guess against a value is a
/// plain mismatch.
fn ordinal<T: PartialOrd>(
    candidate: Option<T>,
    target: Option<T>,
    guessed: Option<GuessedValue>,
    inverted: bool,
) -> FieldVerdict {
    let hint = match (candidate, target) {
        (None, None) => OrdinalHint::Match,
        (Some(c), Some(t)) => match t.partial_cmp(&c) {
            Some(Ordering::Equal) => OrdinalHint::Match,
            Some(Ordering::Greater) => direction(OrdinalHint::Higher, inverted),
            Some(Ordering::Less) => direction(OrdinalHint::Lower, inverted),
            None => OrdinalHint::NoMatch,
        },
        _ => OrdinalHint::NoMatch,
    };
    FieldVerdict::Ordinal { hint, guessed }
}

fn direction(natural: OrdinalHint, inverted: bool) -> OrdinalHint {
    if !inverted {
        return natural;
    }
    match natural {
        OrdinalHint::Higher => OrdinalHint::Lower,
        OrdinalHint::Lower => OrdinalHint::Higher,
        other => other,
    }
}

/// Result tiers compare on the tie-break-aware rank scale; the year of the
/// best result rides along for display only.
fn best_result(
    candidate: Option<BestResult>,
    target: Option<BestResult>,
) -> FieldVerdict {
    let guessed = candidate.map(|b| GuessedValue::BestResult {
        tier: b.result.label().to_string(),
        year: b.year,
    });
    ordinal(
        candidate.map(|b| result_rank(b.result)),
        target.map(|b| result_rank(b.result)),
        guessed,
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Difficulty, Gender, KnownMatches, Laterality, Organisation,
        TournamentResult,
    };
    use chrono::NaiveDate;

    fn player(id: i64, first: &str, last: &str) -> PlayerRecord {
        PlayerRecord {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: Gender::Male,
            country: "England".to_string(),
            laterality: Laterality::RightHanded,
            darts_brand: Some("Target".to_string()),
            organisation: Organisation::Pdc,
            birth_date: NaiveDate::from_ymd_opt(1990, 6, 1),
            playing_since: Some(2005),
            elo_rank: Some(12),
            pdc_rank: Some(8),
            wdf_rank: None,
            darts_weight_grams: Some(23.0),
            nine_darters: Some(2),
            best_result_pdc: Some(BestResult {
                result: TournamentResult::SemiFinals,
                year: Some(2021),
            }),
            best_result_wdf: None,
            best_result_uk_open: Some(BestResult {
                result: TournamentResult::QuarterFinals,
                year: Some(2019),
            }),
            active: true,
            tour_card: true,
            played_wcod: false,
            played_wdf: true,
            difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn self_comparison_is_the_win_verdict() {
        let p = player(1, "Luke", "Littler");
        let verdict = compare(&p, &p);
        assert!(verdict.exact);
        assert!(verdict.is_full_match());
        assert_eq!(verdict, win_verdict(&p));
    }

    #[test]
    fn every_field_matches_on_self_comparison() {
        let p = player(1, "Luke", "Littler");
        for (_, field) in &win_verdict(&p).fields {
            assert!(field.is_match());
        }
    }

    #[test]
    fn direction_is_target_relative() {
        let mut candidate = player(1, "A", "B");
        let mut target = player(2, "C", "D");
        candidate.playing_since = Some(2000);
        target.playing_since = Some(2010);

        let verdict = compare(&candidate, &target);
        assert_eq!(
            verdict.fields[&Attribute::PlayingSince],
            FieldVerdict::Ordinal {
                hint: OrdinalHint::Higher,
                guessed: Some(GuessedValue::Int(2000)),
            }
        );

        // Antisymmetric when reversed.
        let reversed = compare(&target, &candidate);
        assert!(matches!(
            reversed.fields[&Attribute::PlayingSince],
            FieldVerdict::Ordinal {
                hint: OrdinalHint::Lower,
                ..
            }
        ));
    }

    #[test]
    fn rank_fields_compare_inverted() {
        let mut candidate = player(1, "A", "B");
        let mut target = player(2, "C", "D");
        candidate.pdc_rank = Some(40);
        target.pdc_rank = Some(3);

        // Target is ranked 3rd, above the candidate's 40th.
        let verdict = compare(&candidate, &target);
        assert!(matches!(
            verdict.fields[&Attribute::PdcRank],
            FieldVerdict::Ordinal {
                hint: OrdinalHint::Higher,
                ..
            }
        ));
    }

    #[test]
    fn null_target_never_yields_a_direction() {
        let mut candidate = player(1, "A", "B");
        let mut target = player(2, "C", "D");
        candidate.nine_darters = Some(5);
        target.nine_darters = None;

        let verdict = compare(&candidate, &target);
        assert!(matches!(
            verdict.fields[&Attribute::NineDarters],
            FieldVerdict::Ordinal {
                hint: OrdinalHint::NoMatch,
                ..
            }
        ));
    }

    #[test]
    fn both_null_is_a_match() {
        let mut candidate = player(1, "A", "B");
        let mut target = player(2, "C", "D");
        candidate.wdf_rank = None;
        target.wdf_rank = None;

        let verdict = compare(&candidate, &target);
        assert!(verdict.fields[&Attribute::WdfRank].is_match());
    }

    #[test]
    fn tie_break_tiers_match_instead_of_hinting() {
        let mut candidate = player(1, "A", "B");
        let mut target = player(2, "C", "D");
        candidate.best_result_pdc = Some(BestResult {
            result: TournamentResult::FourthPlace,
            year: Some(2018),
        });
        target.best_result_pdc = Some(BestResult {
            result: TournamentResult::SemiFinals,
            year: Some(2022),
        });

        let verdict = compare(&candidate, &target);
        assert!(verdict.fields[&Attribute::BestResultPdc].is_match());
    }

    #[test]
    fn boolean_fields_never_hint() {
        let mut candidate = player(1, "A", "B");
        let mut target = player(2, "C", "D");
        candidate.tour_card = false;
        target.tour_card = true;

        let verdict = compare(&candidate, &target);
        assert_eq!(
            verdict.fields[&Attribute::TourCard],
            FieldVerdict::Boolean {
                matched: false,
                guessed: false,
            }
        );
    }

    #[test]
    fn known_matches_accumulate_matches_and_bounds() {
        let mut candidate = player(1, "A", "B");
        let mut target = player(2, "C", "D");
        candidate.playing_since = Some(2000);
        target.playing_since = Some(2010);
        candidate.country = "Scotland".to_string();

        let verdict = compare(&candidate, &target);
        let mut known = KnownMatches::default();
        known.absorb(&verdict);

        // Directional hint recorded as a bound, unresolved mismatch absent.
        assert_eq!(
            known.fields.get(&Attribute::PlayingSince),
            Some(&crate::domain::FieldKnowledge::Bounded)
        );
        assert_eq!(known.fields.get(&Attribute::Country), None);

        // A later match upgrades the bound and is never downgraded back.
        candidate.playing_since = Some(2010);
        known.absorb(&compare(&candidate, &target));
        assert_eq!(
            known.fields.get(&Attribute::PlayingSince),
            Some(&crate::domain::FieldKnowledge::Matched)
        );
        known.absorb(&verdict);
        assert_eq!(
            known.fields.get(&Attribute::PlayingSince),
            Some(&crate::domain::FieldKnowledge::Matched)
        );
    }
}
