//! # game-bench
//!
//! Deterministic instance generation and scoring for benchmarking LLM
//! agents on externally-defined game environments.
//!
//! ## Design Principles
//!
//! 1. **Environment-Agnostic**: The harness never learns concrete game
//!    types. Environments expose construct / get-attribute /
//!    set-attribute / begin, nothing more.
//!
//! 2. **Reproducibility First**: A generation run is a pure function of
//!    its specification. Instance seeds derive from the run seed, registry
//!    enumeration is sorted, snapshots are ordered maps, and serialization
//!    is byte-stable.
//!
//! 3. **Closed Override Surface**: Post-construction patches resolve
//!    against a fixed allowlist of pure transforms. No caller-supplied
//!    code, no expression strings, no writes outside the declared path.
//!
//! ## Pipeline
//!
//! For each requested instance: resolve the environment family to its raw
//! entry points → construct with a derived seed → apply declared overrides
//! (strictly before game start) → capture the instance record. After play,
//! a registered scoring policy turns the episode's terminal outcome into
//! per-player values in [0, 1].
//!
//! ## Modules
//!
//! - `core`: Players, deterministic RNG, attribute values, error types
//! - `registry`: Environment registry and resolver
//! - `env`: Capability interface and bundled validation environments
//! - `overrides`: Transform allowlist and override application
//! - `instance`: Instance records, collections, batch generation
//! - `scoring`: Terminal outcomes, policies, normalized scores

pub mod core;
pub mod env;
pub mod instance;
pub mod overrides;
pub mod registry;
pub mod scoring;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    AttrPath, AttrValue, EnvError, EnvRng, EnvRngState, GenerateError, PlayerId, PlayerMap,
    ScoreError,
};

pub use crate::registry::{EnvEntry, EnvRegistry, ResolvedEntry, RAW_SUFFIX};

pub use crate::env::{EnvCtor, Environment, HanoiEnv, WordChainsEnv};

pub use crate::overrides::{
    apply_overrides, value_digest, OverrideDecl, OverrideRecord, OverrideTrail, Transform,
};

pub use crate::instance::{
    generate, Experiment, GameSpecification, GenerationOutput, InstanceCollection,
    InstanceFailure, InstanceRecord, RoleDescriptor,
};

pub use crate::scoring::{
    EpisodeOutcome, GenericPolicy, NormalizedScore, PolicyRegistry, ScoringPolicy,
    TerminalSignal, WordChainsPolicy,
};
