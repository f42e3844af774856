use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Every attribute that takes part in guess comparison. `difficulty` is
/// deliberately absent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Gender,
    Country,
    Laterality,
    DartsBrand,
    Organisation,
    BirthDate,
    PlayingSince,
    EloRank,
    PdcRank,
    WdfRank,
    DartsWeight,
    NineDarters,
    BestResultPdc,
    BestResultWdf,
    BestResultUkOpen,
    Active,
    TourCard,
    PlayedWcod,
    PlayedWdf,
}

impl Attribute {
    pub const ALL: [Attribute; 19] = [
        Attribute::Gender,
        Attribute::Country,
        Attribute::Laterality,
        Attribute::DartsBrand,
        Attribute::Organisation,
        Attribute::BirthDate,
        Attribute::PlayingSince,
        Attribute::EloRank,
        Attribute::PdcRank,
        Attribute::WdfRank,
        Attribute::DartsWeight,
        Attribute::NineDarters,
        Attribute::BestResultPdc,
        Attribute::BestResultWdf,
        Attribute::BestResultUkOpen,
        Attribute::Active,
        Attribute::TourCard,
        Attribute::PlayedWcod,
        Attribute::PlayedWdf,
    ];
}

/// Raw guessed value echoed back with a verdict so the client can render
/// the row without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuessedValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    BestResult { tier: String, year: Option<i32> },
}

/// Direction is target-relative: `Higher` means the target's value lies
/// above the guessed one. A null on either side that does not pair with a
/// null on the other collapses to `NoMatch` — no direction against null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalHint {
    Match,
    Higher,
    Lower,
    NoMatch,
}

/// One attribute's comparison outcome, shaped by attribute kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldVerdict {
    Categorical {
        matched: bool,
        guessed: Option<GuessedValue>,
    },
    Ordinal {
        hint: OrdinalHint,
        guessed: Option<GuessedValue>,
    },
    Boolean {
        matched: bool,
        guessed: bool,
    },
}

impl FieldVerdict {
    pub fn is_match(&self) -> bool {
        match self {
            FieldVerdict::Categorical { matched, .. } => *matched,
            FieldVerdict::Ordinal { hint, .. } => *hint == OrdinalHint::Match,
            FieldVerdict::Boolean { matched, .. } => *matched,
        }
    }
}

/// Per-attribute outcome of comparing one guess against the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictMap {
    pub fields: BTreeMap<Attribute, FieldVerdict>,
    /// Set only on the distinguished all-match verdict for an exact hit.
    pub exact: bool,
}

impl VerdictMap {
    pub fn is_full_match(&self) -> bool {
        self.exact || self.fields.values().all(FieldVerdict::is_match)
    }
}

/// What a session has pinned down so far. `Matched` is terminal for a
/// field; a directional hint records that a bound exists without revealing
/// the target's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKnowledge {
    Matched,
    Bounded,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnownMatches {
    pub fields: BTreeMap<Attribute, FieldKnowledge>,
}

impl KnownMatches {
    /// Folds one verdict into the cumulative state. A `noMatch` on a
    /// categorical or boolean field carries no information and leaves the
    /// field absent; a match always wins over a mere bound.
    pub fn absorb(&mut self, verdict: &VerdictMap) {
        for (attr, field) in &verdict.fields {
            let update = match field {
                FieldVerdict::Categorical { matched: true, .. }
                | FieldVerdict::Boolean { matched: true, .. } => {
                    Some(FieldKnowledge::Matched)
                }
                FieldVerdict::Ordinal { hint, .. } => match hint {
                    OrdinalHint::Match => Some(FieldKnowledge::Matched),
                    OrdinalHint::Higher | OrdinalHint::Lower => {
                        Some(FieldKnowledge::Bounded)
                    }
                    OrdinalHint::NoMatch => None,
                },
                _ => None,
            };
            match update {
                Some(FieldKnowledge::Matched) => {
                    self.fields.insert(*attr, FieldKnowledge::Matched);
                }
                Some(FieldKnowledge::Bounded) => {
                    self.fields
                        .entry(*attr)
                        .or_insert(FieldKnowledge::Bounded);
                }
                None => {}
            }
        }
    }
}
