use thiserror::Error;

/// Expected domain outcomes. Every gameplay operation returns these as
/// tagged values; only `Storage` represents an unrecoverable fault.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no player matched the guess")]
    NoCandidateFound,

    #[error("guess is ambiguous between {}", .suggestions.join(" and "))]
    AmbiguousGuess { suggestions: Vec<String> },

    #[error("too many players matched the guess")]
    TooManyCandidates,

    #[error("player already guessed in this session")]
    DuplicateGuess,

    #[error("session is already finished")]
    SessionTerminal,

    #[error("no active schedule")]
    NoActiveSchedule,

    #[error("all hints revealed")]
    HintsExhausted,

    #[error("not authorized")]
    Unauthorized,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage failure")]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
