//! Word Chains length-gain policy.
//!
//! Raw win/lose underrepresents quality here: beating a weak opponent in
//! two rounds and grinding out a sixteen-letter chain are very different
//! games. The policy scores against an explicit reference: a perfect game
//! runs 8 rounds and ends on a word 16 letters longer than the start.

use crate::core::{PlayerMap, ScoreError};

use super::{EpisodeOutcome, NormalizedScore, ScoringPolicy, TerminalSignal};

/// Aux key: the word the chain started on. Required.
pub const START_WORD: &str = "start_word";
/// Aux key: the word the chain ended on. Required.
pub const FINAL_WORD: &str = "final_word";
/// Aux key: the loser's last valid word. Optional; defaults to the start
/// word when the loser never produced a valid contribution.
pub const LOSER_LAST_WORD: &str = "loser_last_word";

/// Letter gain of the reference perfect game: 8 rounds, 2 letters each.
const PERFECT_LENGTH_GAIN: f64 = 16.0;

/// Scores players by how far they grew the chain relative to the
/// reference game.
///
/// The winner scores `clamp(gain / 16, 0, 1)` on the final word; the
/// loser scores symmetrically on their own last valid word rather than a
/// flat zero.
pub struct WordChainsPolicy;

impl WordChainsPolicy {
    fn normalized_gain(start: &str, word: &str) -> f64 {
        let gain = word.chars().count() as f64 - start.chars().count() as f64;
        (gain / PERFECT_LENGTH_GAIN).clamp(0.0, 1.0)
    }

    fn require<'a>(outcome: &'a EpisodeOutcome, field: &str) -> Result<&'a str, ScoreError> {
        outcome
            .aux_text(field)
            .ok_or_else(|| ScoreError::UnsupportedOutcomeShape {
                policy: "word-chains".to_string(),
                field: field.to_string(),
            })
    }
}

impl ScoringPolicy for WordChainsPolicy {
    fn id(&self) -> &'static str {
        "word-chains"
    }

    fn score(&self, outcome: &EpisodeOutcome) -> Result<NormalizedScore, ScoreError> {
        let start = Self::require(outcome, START_WORD)?;
        let final_word = Self::require(outcome, FINAL_WORD)?;
        let loser_last = outcome.aux_text(LOSER_LAST_WORD).unwrap_or(start);

        let mut values = PlayerMap::with_value(outcome.signals.player_count(), 0.0);
        for (player, signal) in outcome.signals.iter() {
            values[player] = match signal {
                TerminalSignal::Win | TerminalSignal::Draw => {
                    Self::normalized_gain(start, final_word)
                }
                TerminalSignal::Lose => Self::normalized_gain(start, loser_last),
                TerminalSignal::Score(_) => {
                    return Err(ScoreError::UnsupportedOutcomeShape {
                        policy: self.id().to_string(),
                        field: "signals".to_string(),
                    })
                }
            };
        }

        Ok(NormalizedScore {
            policy: self.id().to_string(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn win_lose_outcome(start: &str, final_word: &str) -> EpisodeOutcome {
        let mut signals = PlayerMap::with_value(2, TerminalSignal::Lose);
        signals[PlayerId::new(0)] = TerminalSignal::Win;
        EpisodeOutcome::new(signals)
            .with_aux(START_WORD, start)
            .with_aux(FINAL_WORD, final_word)
    }

    #[test]
    fn test_perfect_game_scores_one() {
        // 3 letters -> 19 letters: exactly the reference gain of 16.
        let outcome = win_lose_outcome("cat", "incomprehensibility");
        assert_eq!(outcome.aux_text(FINAL_WORD).unwrap().chars().count(), 19);

        let score = WordChainsPolicy.score(&outcome).unwrap();
        assert_eq!(score.values[PlayerId::new(0)], 1.0);
    }

    #[test]
    fn test_zero_gain_scores_zero() {
        let outcome = win_lose_outcome("cat", "dog");
        let score = WordChainsPolicy.score(&outcome).unwrap();
        assert_eq!(score.values[PlayerId::new(0)], 0.0);
    }

    #[test]
    fn test_half_gain_scores_half() {
        // 3 letters -> 11 letters: gain 8 of the reference 16.
        let outcome = win_lose_outcome("cat", "catastrophe");
        let score = WordChainsPolicy.score(&outcome).unwrap();
        assert_eq!(score.values[PlayerId::new(0)], 0.5);
    }

    #[test]
    fn test_loser_scored_from_last_valid_word() {
        let outcome =
            win_lose_outcome("cat", "catastrophe").with_aux(LOSER_LAST_WORD, "catalog");
        let score = WordChainsPolicy.score(&outcome).unwrap();
        // 7 - 3 = 4 letters gained out of 16.
        assert_eq!(score.values[PlayerId::new(1)], 0.25);
    }

    #[test]
    fn test_loser_without_contribution_scores_zero() {
        let outcome = win_lose_outcome("cat", "catastrophe");
        let score = WordChainsPolicy.score(&outcome).unwrap();
        assert_eq!(score.values[PlayerId::new(1)], 0.0);
    }

    #[test]
    fn test_draw_scores_both_from_final_word() {
        let outcome = EpisodeOutcome::new(PlayerMap::with_value(2, TerminalSignal::Draw))
            .with_aux(START_WORD, "cat")
            .with_aux(FINAL_WORD, "catastrophe");
        let score = WordChainsPolicy.score(&outcome).unwrap();
        assert_eq!(score.values[PlayerId::new(0)], 0.5);
        assert_eq!(score.values[PlayerId::new(1)], 0.5);
    }

    #[test]
    fn test_gain_is_clamped() {
        let outcome = win_lose_outcome("cat", "pneumonoultramicroscopicsilicovolcanoconiosis");
        let score = WordChainsPolicy.score(&outcome).unwrap();
        assert_eq!(score.values[PlayerId::new(0)], 1.0);
    }

    #[test]
    fn test_missing_aux_is_reported_not_defaulted() {
        let mut signals = PlayerMap::with_value(2, TerminalSignal::Lose);
        signals[PlayerId::new(0)] = TerminalSignal::Win;
        let outcome = EpisodeOutcome::new(signals).with_aux(START_WORD, "cat");

        let err = WordChainsPolicy.score(&outcome).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::UnsupportedOutcomeShape { field, .. } if field == FINAL_WORD
        ));
    }

    #[test]
    fn test_fractional_signal_rejected() {
        let signals = PlayerMap::with_value(2, TerminalSignal::Score(0.5));
        let outcome = EpisodeOutcome::new(signals)
            .with_aux(START_WORD, "cat")
            .with_aux(FINAL_WORD, "cats");
        assert!(WordChainsPolicy.score(&outcome).is_err());
    }

    #[test]
    fn test_scoring_is_pure() {
        let outcome = win_lose_outcome("cat", "catalog");
        let first = WordChainsPolicy.score(&outcome).unwrap();
        let second = WordChainsPolicy.score(&outcome).unwrap();
        assert_eq!(first, second);
    }
}
