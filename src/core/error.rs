//! Error types for generation and scoring.
//!
//! Every error carries the context a human needs to fix the game
//! specification: the instance index, the attribute path, the offending
//! name. Nothing is retried or silently defaulted.

use thiserror::Error;

use super::value::AttrPath;

/// Errors raised by an environment through the capability interface.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The environment has a fixed arity the specification does not match.
    #[error("environment requires exactly {required} players, got {requested}")]
    ArityMismatch { required: usize, requested: usize },

    /// The environment refused the seed.
    #[error("environment rejected seed {seed}: {reason}")]
    RejectedSeed { seed: u64, reason: String },

    /// No attribute at the given path.
    #[error("no attribute at path `{path}`")]
    UnknownAttribute { path: AttrPath },

    /// The attribute exists but cannot hold the written value kind.
    #[error("attribute `{path}` expects {expected}, got {got}")]
    TypeMismatch {
        path: AttrPath,
        expected: &'static str,
        got: &'static str,
    },

    /// Attribute writes are only legal before game-state initialization.
    #[error("game state already initialized; attributes are frozen")]
    AlreadyStarted,

    /// Game-state initialization failed (e.g. nothing left to sample from).
    #[error("game-state initialization failed: {reason}")]
    InitializationFailed { reason: String },
}

/// Errors raised by the instance-generation pipeline.
///
/// `UnknownEnvironment`, `UnknownTransform`, `UnknownAttribute` and
/// `InvalidSpecification` abort a generation run outright: they recur
/// identically for every instance. `Construction` is fatal only for the
/// instance it names; siblings proceed.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No raw registry entry exists for the requested family.
    #[error("no raw registry entry for environment family `{family}`")]
    UnknownEnvironment { family: String },

    /// The environment rejected construction for one instance.
    #[error("instance {index} of `{entry}`: construction failed")]
    Construction {
        entry: String,
        index: usize,
        #[source]
        source: EnvError,
    },

    /// An override declaration names a path the environment does not have.
    #[error("instance {index}: attribute path `{path}` does not resolve")]
    UnknownAttribute { index: usize, path: AttrPath },

    /// An override declaration names a transform outside the allowlist.
    #[error("unknown override transform `{name}`")]
    UnknownTransform { name: String },

    /// An allowlisted transform cannot operate on the value at the path.
    #[error("instance {index}: transform `{transform}` cannot apply to {kind} at `{path}`")]
    InapplicableTransform {
        index: usize,
        path: AttrPath,
        transform: &'static str,
        kind: &'static str,
    },

    /// The environment refused an override write the applier validated.
    ///
    /// Indicates a pipeline-ordering bug (e.g. a write after `begin`), not
    /// a bad declaration.
    #[error("instance {index}: override at `{path}` rejected by environment")]
    OverrideRejected {
        index: usize,
        path: AttrPath,
        #[source]
        source: EnvError,
    },

    /// The game specification is internally inconsistent.
    #[error("invalid game specification: {reason}")]
    InvalidSpecification { reason: String },
}

impl GenerateError {
    /// Whether the error invalidates the whole generation run rather than
    /// a single instance.
    #[must_use]
    pub fn aborts_run(&self) -> bool {
        !matches!(self, GenerateError::Construction { .. })
    }
}

/// Errors raised by the game-master scorer.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// No scoring policy registered under the identifier.
    #[error("no scoring policy registered under `{policy}`")]
    UnknownPolicy { policy: String },

    /// The outcome is missing an auxiliary field the policy requires.
    ///
    /// Reported rather than defaulted: silently substituting generic
    /// win/lose would misrepresent benchmark quality.
    #[error("policy `{policy}` requires outcome field `{field}`")]
    UnsupportedOutcomeShape { policy: String, field: String },
}
