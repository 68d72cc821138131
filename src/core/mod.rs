//! Core harness types: players, RNG, attribute values, errors.
//!
//! This module contains the fundamental building blocks that are
//! environment-agnostic. Environments expose their state through these
//! types rather than the harness learning concrete game shapes.

pub mod error;
pub mod player;
pub mod rng;
pub mod value;

pub use error::{EnvError, GenerateError, ScoreError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{EnvRng, EnvRngState};
pub use value::{AttrPath, AttrValue};
