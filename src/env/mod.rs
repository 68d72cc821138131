//! Environment capability interface and bundled validation environments.
//!
//! Game rules are owned by the environment, not the harness. The harness
//! consumes environments through a deliberately narrow interface:
//! construct, read attribute, write attribute, begin game. The Override
//! Applier works generically against this interface without knowing
//! concrete game types.
//!
//! Two small environments ship with the crate to validate the pipeline and
//! serve as reference integrations:
//!
//! - `word_chains`: two-player word game whose starting word is sampled
//!   from a construction-time word list
//! - `hanoi`: single-player Tower of Hanoi puzzle
//!
//! Each registers standard and hard difficulty variants.

use std::collections::BTreeMap;

use crate::core::{AttrValue, EnvError};

pub mod hanoi;
pub mod word_chains;

pub use hanoi::HanoiEnv;
pub use word_chains::WordChainsEnv;

/// A constructed-but-not-started game environment.
///
/// ## Lifecycle
///
/// 1. A registry constructor builds the environment with its RNG seeded
///    and its pre-game attributes populated.
/// 2. Overrides patch attributes through `set_attr`.
/// 3. `begin` initializes game state, sampling from the (possibly
///    overridden) attributes. Attributes are frozen from here on.
///
/// The ordering is load-bearing: a write after `begin` must fail with
/// `EnvError::AlreadyStarted`, otherwise overrides could silently miss the
/// state they were declared to pin down.
pub trait Environment {
    /// Declared, documented specification fields of this environment.
    ///
    /// This is what the Instance Serializer snapshots; internal state
    /// (RNG position, board state) never appears here.
    fn spec(&self) -> BTreeMap<String, AttrValue>;

    /// Read the attribute at `path`.
    fn get_attr(&self, path: &str) -> Result<AttrValue, EnvError>;

    /// Replace the attribute at `path`.
    ///
    /// Only legal before `begin`.
    fn set_attr(&mut self, path: &str, value: AttrValue) -> Result<(), EnvError>;

    /// Initialize game state.
    ///
    /// Everything sampled here must be drawn from attributes as they are
    /// *now*, i.e. after any overrides.
    fn begin(&mut self) -> Result<(), EnvError>;

    /// Whether `begin` has run.
    fn started(&self) -> bool;
}

/// Constructor signature stored in registry entries.
///
/// Takes the instance seed and the requested player count; rejects either
/// with an `EnvError` (fatal for that instance, non-retryable).
pub type EnvCtor = fn(seed: u64, num_players: usize) -> Result<Box<dyn Environment>, EnvError>;
