//! Vote Aggregator - summary statistics over revealed votes.

use serde::Serialize;

use crate::domain::estimation::Participant;

/// Summary of the numeric votes in a revealed round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoteStats {
    /// Mean of the numeric votes, rounded to one decimal place.
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// How many numeric votes went into the figures.
    pub voter_count: usize,
}

impl VoteStats {
    /// Average with exactly one decimal, e.g. `"2.0"`.
    pub fn average_label(&self) -> String {
        format!("{:.1}", self.average)
    }
}

/// Computes vote statistics for a set of participants.
///
/// Only numeric cards count. `?`, `☕` and missing votes are skipped
/// rather than treated as zero, so a table without a single numeric vote
/// yields `None`, never a zero average.
///
/// Callers must only show the result once the round is revealed;
/// `EstimationSession::stats` applies that gate.
pub fn compute_stats(participants: &[Participant]) -> Option<VoteStats> {
    let values: Vec<f64> = participants
        .iter()
        .filter_map(|p| p.vote())
        .filter_map(|card| card.numeric_value())
        .filter(|v| v.is_finite())
        .collect();

    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();
    let mean = sum / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(VoteStats {
        average: round_one_decimal(mean),
        min,
        max,
        voter_count: values.len(),
    })
}

/// Rounds half away from zero at the first decimal.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimation::Card;
    use crate::domain::foundation::ParticipantId;

    fn voters(votes: &[Option<Card>]) -> Vec<Participant> {
        votes
            .iter()
            .enumerate()
            .map(|(i, vote)| {
                Participant::reconstitute(ParticipantId::new(), format!("P{}", i), *vote, i == 0)
            })
            .collect()
    }

    #[test]
    fn no_participants_yields_no_stats() {
        assert_eq!(compute_stats(&[]), None);
    }

    #[test]
    fn only_non_numeric_votes_yields_no_stats() {
        let players = voters(&[None, Some(Card::Unknown), Some(Card::Break)]);
        assert_eq!(compute_stats(&players), None);
    }

    #[test]
    fn one_two_three_averages_to_two() {
        let players = voters(&[Some(Card::One), Some(Card::Two), Some(Card::Three)]);
        let stats = compute_stats(&players).unwrap();

        assert_eq!(stats.average_label(), "2.0");
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.voter_count, 3);
    }

    #[test]
    fn special_and_missing_votes_are_not_zero() {
        let players = voters(&[Some(Card::Eight), None, Some(Card::Unknown), Some(Card::Break)]);
        let stats = compute_stats(&players).unwrap();

        assert_eq!(stats.average, 8.0);
        assert_eq!(stats.min, 8.0);
        assert_eq!(stats.voter_count, 1);
    }

    #[test]
    fn zero_card_counts_as_a_vote() {
        let players = voters(&[Some(Card::Zero), Some(Card::Two)]);
        let stats = compute_stats(&players).unwrap();
        assert_eq!(stats.average, 1.0);
        assert_eq!(stats.min, 0.0);
    }

    #[test]
    fn average_rounds_half_away_from_zero() {
        // (0.5 + 1 + 1 + 3) / 4 = 1.375 -> 1.4
        let players = voters(&[Some(Card::Half), Some(Card::One), Some(Card::One), Some(Card::Three)]);
        assert_eq!(compute_stats(&players).unwrap().average_label(), "1.4");

        // (1 + 2 + 2 + 2 + 5 + 13) / 6 = 4.1666.. -> 4.2
        let players = voters(&[
            Some(Card::One),
            Some(Card::Two),
            Some(Card::Two),
            Some(Card::Two),
            Some(Card::Five),
            Some(Card::Thirteen),
        ]);
        assert_eq!(compute_stats(&players).unwrap().average_label(), "4.2");
    }

    #[test]
    fn exact_half_rounds_up() {
        // (0 + 0.5) / 2 = 0.25 -> 0.3
        let players = voters(&[Some(Card::Zero), Some(Card::Half)]);
        assert_eq!(compute_stats(&players).unwrap().average_label(), "0.3");
    }

    #[test]
    fn min_and_max_are_unrounded() {
        let players = voters(&[Some(Card::Half), Some(Card::EightyNine)]);
        let stats = compute_stats(&players).unwrap();
        assert_eq!(stats.min, 0.5);
        assert_eq!(stats.max, 89.0);
    }
}
