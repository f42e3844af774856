pub mod identity;
pub mod player;
pub mod session;
pub mod verdict;

pub use identity::{AccountFlags, GuestFingerprint, Identity};
pub use player::{
    BestResult, Difficulty, Gender, Laterality, Organisation, PlayerRecord,
    TournamentResult,
};
pub use session::{GameMode, GameStatus, Target, TargetRef};
pub use verdict::{
    Attribute, FieldKnowledge, FieldVerdict, GuessedValue, KnownMatches,
    OrdinalHint, VerdictMap,
};
