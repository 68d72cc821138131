//! Generic terminal-signal policy.

use crate::core::{PlayerMap, ScoreError};

use super::{EpisodeOutcome, NormalizedScore, ScoringPolicy, TerminalSignal};

/// Maps terminal signals directly to fixed normalized values, independent
/// of how long the episode ran: win 1.0, lose 0.0, draw 0.5. Fractional
/// completion signals from single-player puzzles pass through clamped.
pub struct GenericPolicy;

impl ScoringPolicy for GenericPolicy {
    fn id(&self) -> &'static str {
        "generic"
    }

    fn score(&self, outcome: &EpisodeOutcome) -> Result<NormalizedScore, ScoreError> {
        let values = PlayerMap::new(outcome.signals.player_count(), |player| {
            match outcome.signals[player] {
                TerminalSignal::Win => 1.0,
                TerminalSignal::Lose => 0.0,
                TerminalSignal::Draw => 0.5,
                TerminalSignal::Score(v) => v.clamp(0.0, 1.0),
            }
        });

        Ok(NormalizedScore {
            policy: self.id().to_string(),
            values,
        })
    }
}
