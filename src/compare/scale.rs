use crate::domain::TournamentResult;

/// Ordinal rank of a result tier on the higher/lower scale.
///
/// Fourth Place and the Semi-Finals share a rank: a fourth-place playoff
/// is only held in some editions, so the two tiers are interchangeable on
/// the scale and must never hint against each other.
pub fn result_rank(result: TournamentResult) -> u8 {
    match result {
        TournamentResult::DidNotParticipate => 0,
        TournamentResult::FirstRound => 1,
        TournamentResult::SecondRound => 2,
        TournamentResult::ThirdRound => 3,
        TournamentResult::FourthRound => 4,
        TournamentResult::LastSixteen => 5,
        TournamentResult::QuarterFinals => 6,
        TournamentResult::SemiFinals | TournamentResult::FourthPlace => 7,
        TournamentResult::ThirdPlace => 8,
        TournamentResult::RunnerUp => 9,
        TournamentResult::Winner => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_pair_shares_a_rank() {
        assert_eq!(
            result_rank(TournamentResult::FourthPlace),
            result_rank(TournamentResult::SemiFinals)
        );
    }

    #[test]
    fn scale_is_strictly_increasing_outside_the_tie_group() {
        let tiers = [
            TournamentResult::DidNotParticipate,
            TournamentResult::FirstRound,
            TournamentResult::SecondRound,
            TournamentResult::ThirdRound,
            TournamentResult::FourthRound,
            TournamentResult::LastSixteen,
            TournamentResult::QuarterFinals,
            TournamentResult::SemiFinals,
            TournamentResult::ThirdPlace,
            TournamentResult::RunnerUp,
            TournamentResult::Winner,
        ];
        for pair in tiers.windows(2) {
            assert!(result_rank(pair[0]) < result_rank(pair[1]));
        }
    }
}
