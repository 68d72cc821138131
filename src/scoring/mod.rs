//! Game-master scoring: episode outcomes to normalized benchmark scores.
//!
//! Raw win/lose signals underrepresent model quality for many games, so
//! scoring goes through named policies: pure functions from an episode's
//! terminal outcome to a per-player value in [0, 1]. Policies live in a
//! registry keyed by identifier — integrating a new environment means
//! registering a policy, not threading another branch through a scoring
//! function.
//!
//! Scoring consults nothing but the outcome: no environment, no RNG, no
//! clock. Calling a policy twice with the same outcome returns the same
//! score.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{AttrValue, PlayerId, PlayerMap, ScoreError};

pub mod generic;
pub mod word_chains;

pub use generic::GenericPolicy;
pub use word_chains::WordChainsPolicy;

/// An environment's native terminal signal for one player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TerminalSignal {
    /// The player won.
    Win,
    /// The player lost.
    Lose,
    /// Nobody won.
    Draw,
    /// Fractional completion reported by single-player puzzles.
    Score(f64),
}

/// Raw per-player outcome of one played episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    /// Terminal signal per player.
    pub signals: PlayerMap<TerminalSignal>,
    /// Game-specific auxiliary terminal data (e.g. the final word).
    pub aux: BTreeMap<String, AttrValue>,
}

impl EpisodeOutcome {
    /// Create an outcome with no auxiliary data.
    #[must_use]
    pub fn new(signals: PlayerMap<TerminalSignal>) -> Self {
        Self {
            signals,
            aux: BTreeMap::new(),
        }
    }

    /// Attach one auxiliary field.
    #[must_use]
    pub fn with_aux(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.aux.insert(key.into(), value.into());
        self
    }

    /// Read an auxiliary text field.
    #[must_use]
    pub fn aux_text(&self, key: &str) -> Option<&str> {
        self.aux.get(key).and_then(AttrValue::as_text)
    }

    /// The winning player, if exactly one player won.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let mut winners = self
            .signals
            .iter()
            .filter(|(_, s)| matches!(s, TerminalSignal::Win))
            .map(|(p, _)| p);
        let first = winners.next()?;
        winners.next().is_none().then_some(first)
    }
}

/// Per-player normalized score plus the policy that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedScore {
    /// Identifier of the policy that produced the values.
    pub policy: String,
    /// Per-player value in [0, 1].
    pub values: PlayerMap<f64>,
}

/// A pure scoring policy.
///
/// `Send + Sync` so independent episodes can be scored concurrently
/// without synchronization.
pub trait ScoringPolicy: Send + Sync {
    /// Registry identifier of this policy.
    fn id(&self) -> &'static str;

    /// Score one episode.
    fn score(&self, outcome: &EpisodeOutcome) -> Result<NormalizedScore, ScoreError>;
}

/// Registry of scoring policies, keyed by identifier.
#[derive(Default)]
pub struct PolicyRegistry {
    policies: FxHashMap<String, Box<dyn ScoringPolicy>>,
}

impl PolicyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in policies registered.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GenericPolicy));
        registry.register(Box::new(WordChainsPolicy));
        registry
    }

    /// Register a policy.
    ///
    /// Panics if a policy with the same identifier already exists.
    pub fn register(&mut self, policy: Box<dyn ScoringPolicy>) {
        let id = policy.id().to_string();
        if self.policies.contains_key(&id) {
            panic!("Policy with id {id:?} already registered");
        }
        self.policies.insert(id, policy);
    }

    /// Get a policy by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn ScoringPolicy> {
        self.policies.get(id).map(Box::as_ref)
    }

    /// Score an outcome with the named policy.
    pub fn score(
        &self,
        policy_id: &str,
        outcome: &EpisodeOutcome,
    ) -> Result<NormalizedScore, ScoreError> {
        let policy = self.get(policy_id).ok_or_else(|| ScoreError::UnknownPolicy {
            policy: policy_id.to_string(),
        })?;
        policy.score(outcome)
    }

    /// Registered policy identifiers, sorted.
    #[must_use]
    pub fn policy_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
