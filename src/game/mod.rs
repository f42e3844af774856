pub mod hints;
pub mod schedule;
pub mod session;

pub use session::{GameService, GiveUpOutcome, GuessOutcome, NextTargetPreview};
