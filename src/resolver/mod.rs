pub mod normalize;

use std::collections::HashSet;

use crate::config::settings::ResolverSettings;
use crate::domain::PlayerRecord;
use crate::errors::{DomainError, DomainResult};
pub use normalize::normalize_name;

/// One entry of the precomputed name index the resolver matches against.
#[derive(Debug, Clone)]
pub struct IndexedName {
    pub player_id: i64,
    pub display_name: String,
    pub normalized: String,
}

pub fn build_index(players: &[PlayerRecord]) -> Vec<IndexedName> {
    players
        .iter()
        .map(|p| {
            let display_name = p.full_name();
            IndexedName {
                player_id: p.id,
                normalized: normalize_name(&display_name),
                display_name,
            }
        })
        .collect()
}

/// A successfully disambiguated guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlayer {
    pub player_id: i64,
    pub display_name: String,
}

/// Turns free text into exactly one candidate or a precise rejection.
///
/// Matching is case- and diacritic-insensitive, position-independent and
/// tolerates a bounded edit distance. The duplicate check here is advisory;
/// the storage layer re-checks on insert to close the race between two
/// concurrent submissions.
pub fn resolve(
    raw_input: &str,
    index: &[IndexedName],
    already_guessed: &HashSet<i64>,
    settings: &ResolverSettings,
) -> DomainResult<ResolvedPlayer> {
    let query = normalize_name(raw_input);
    if query.chars().count() < settings.min_query_len {
        return Err(DomainError::NoCandidateFound);
    }

    // An exact full-name hit beats every fuzzy neighbour.
    if let Some(entry) = index.iter().find(|e| e.normalized == query) {
        return finish(entry, already_guessed);
    }

    let max_distance = if query.chars().count() >= settings.long_query_len {
        settings.max_edit_distance_long
    } else {
        settings.max_edit_distance_short
    };

    let mut hits: Vec<(usize, &IndexedName)> = index
        .iter()
        .filter_map(|e| {
            best_window_distance(&e.normalized, &query)
                .filter(|d| *d <= max_distance)
                .map(|d| (d, e))
        })
        .collect();
    hits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.display_name.cmp(&b.1.display_name)));

    match hits.len() {
        0 => Err(DomainError::NoCandidateFound),
        1 => finish(hits[0].1, already_guessed),
        2 => Err(DomainError::AmbiguousGuess {
            suggestions: hits
                .iter()
                .take(settings.suggestion_cap)
                .map(|(_, e)| e.display_name.clone())
                .collect(),
        }),
        _ => Err(DomainError::TooManyCandidates),
    }
}

fn finish(
    entry: &IndexedName,
    already_guessed: &HashSet<i64>,
) -> DomainResult<ResolvedPlayer> {
    if already_guessed.contains(&entry.player_id) {
        return Err(DomainError::DuplicateGuess);
    }
    Ok(ResolvedPlayer {
        player_id: entry.player_id,
        display_name: entry.display_name.clone(),
    })
}

/// Smallest Levenshtein distance between the query and any same-length
/// window of the name, so a partial guess anywhere inside the full name
/// counts. Returns None when the name is shorter than the query by more
/// than the window can absorb.
fn best_window_distance(name: &str, query: &str) -> Option<usize> {
    let name_chars: Vec<char> = name.chars().collect();
    let query_len = query.chars().count();
    if query_len == 0 {
        return None;
    }
    if name_chars.len() < query_len {
        return Some(strsim::levenshtein(name, query));
    }

    name_chars
        .windows(query_len)
        .map(|w| {
            let window: String = w.iter().collect();
            strsim::levenshtein(&window, query)
        })
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(names: &[(i64, &str)]) -> Vec<IndexedName> {
        names
            .iter()
            .map(|(id, name)| IndexedName {
                player_id: *id,
                display_name: name.to_string(),
                normalized: normalize_name(name),
            })
            .collect()
    }

    fn settings() -> ResolverSettings {
        ResolverSettings::default()
    }

    #[test]
    fn single_hit_resolves() {
        let index = index_of(&[(1, "Michael van Gerwen"), (2, "Peter Wright")]);
        let resolved =
            resolve("van gerwen", &index, &HashSet::new(), &settings()).unwrap();
        assert_eq!(resolved.player_id, 1);
        assert_eq!(resolved.display_name, "Michael van Gerwen");
    }

    #[test]
    fn diacritics_and_case_are_ignored() {
        let index = index_of(&[(1, "Mensur Šuljović")]);
        let resolved =
            resolve("SULJOVIC", &index, &HashSet::new(), &settings()).unwrap();
        assert_eq!(resolved.player_id, 1);
    }

    #[test]
    fn typo_within_bound_still_resolves() {
        let index = index_of(&[(1, "Gerwyn Price"), (2, "Peter Wright")]);
        let resolved =
            resolve("gerwin price", &index, &HashSet::new(), &settings()).unwrap();
        assert_eq!(resolved.player_id, 1);
    }

    #[test]
    fn zero_hits_reject() {
        let index = index_of(&[(1, "Peter Wright")]);
        assert!(matches!(
            resolve("zzzzzz", &index, &HashSet::new(), &settings()),
            Err(DomainError::NoCandidateFound)
        ));
    }

    #[test]
    fn two_hits_are_ambiguous_with_both_suggestions() {
        let index = index_of(&[(1, "Michael Smith"), (2, "Michael Smythe")]);
        match resolve("Michael Sm", &index, &HashSet::new(), &settings()) {
            Err(DomainError::AmbiguousGuess { suggestions }) => {
                assert_eq!(suggestions.len(), 2);
                assert!(suggestions.contains(&"Michael Smith".to_string()));
                assert!(suggestions.contains(&"Michael Smythe".to_string()));
            }
            other => panic!("expected ambiguous rejection, got {other:?}"),
        }
    }

    #[test]
    fn more_than_two_hits_is_too_many() {
        let index = index_of(&[
            (1, "Michael Smith"),
            (2, "Michael Smythe"),
            (3, "Michael Smyth"),
        ]);
        assert!(matches!(
            resolve("Michael Sm", &index, &HashSet::new(), &settings()),
            Err(DomainError::TooManyCandidates)
        ));
    }

    #[test]
    fn exact_name_beats_fuzzy_neighbours() {
        let index = index_of(&[(1, "Michael Smith"), (2, "Michael Smythe")]);
        let resolved =
            resolve("Michael Smith", &index, &HashSet::new(), &settings()).unwrap();
        assert_eq!(resolved.player_id, 1);
    }

    #[test]
    fn already_guessed_player_is_a_duplicate() {
        let index = index_of(&[(1, "Peter Wright")]);
        let guessed: HashSet<i64> = [1].into_iter().collect();
        assert!(matches!(
            resolve("Peter Wright", &index, &guessed, &settings()),
            Err(DomainError::DuplicateGuess)
        ));
    }

    #[test]
    fn too_short_queries_never_match() {
        let index = index_of(&[(1, "Peter Wright")]);
        assert!(matches!(
            resolve("P", &index, &HashSet::new(), &settings()),
            Err(DomainError::NoCandidateFound)
        ));
    }
}
