//! Word Chains validation environment.
//!
//! Two players alternate extending a chain of words; the starting word is
//! sampled at game start from a word list assembled during construction.
//! The construction-time list order is seed-dependent, which is exactly the
//! nondeterminism the override allowlist exists to close: declaring a
//! `sort` override on `word_list` makes the sampled starting word a
//! function of the seed alone.
//!
//! Registered variants:
//!
//! - `WordChains-v0` / `WordChains-v0-raw` (minimum word length 3)
//! - `WordChains-hard-v0` / `WordChains-hard-v0-raw` (minimum word length 5)

use std::collections::BTreeMap;

use crate::core::{AttrValue, EnvError, EnvRng};
use crate::registry::{EnvEntry, EnvRegistry};

use super::Environment;

/// Embedded word pool the construction step draws from.
///
/// Lengths span 3 to 12 letters so the difficulty variants select
/// different subsets.
const WORD_POOL: &[&str] = &[
    "ant", "bee", "cat", "dog", "elk", "fox", "gnu", "hen", "owl", "pig",
    "apple", "bread", "chair", "dream", "eagle", "flame", "grape", "house",
    "island", "jungle", "kitten", "ladder", "meadow", "needle", "orange",
    "painter", "quarrel", "rainbow", "sandwich", "telescope", "umbrella",
    "vagabond", "waterfall", "xylophone", "yesterday", "zookeeper",
    "cartographer", "lighthouse", "marmalade", "periwinkle",
];

/// Player arity is fixed by the game rules.
const REQUIRED_PLAYERS: usize = 2;

/// Word Chains environment: constructed, overridable, then started.
#[derive(Debug)]
pub struct WordChainsEnv {
    rng: EnvRng,
    word_list: Vec<String>,
    min_word_length: i64,
    max_rounds: i64,
    current_word: Option<String>,
    started: bool,
}

impl WordChainsEnv {
    /// Construct with the standard difficulty (minimum word length 3).
    pub fn standard(seed: u64, num_players: usize) -> Result<Self, EnvError> {
        Self::construct(seed, num_players, 3)
    }

    /// Construct with the hard difficulty (minimum word length 5).
    pub fn hard(seed: u64, num_players: usize) -> Result<Self, EnvError> {
        Self::construct(seed, num_players, 5)
    }

    fn construct(seed: u64, num_players: usize, min_word_length: i64) -> Result<Self, EnvError> {
        if num_players != REQUIRED_PLAYERS {
            return Err(EnvError::ArityMismatch {
                required: REQUIRED_PLAYERS,
                requested: num_players,
            });
        }

        let rng = EnvRng::new(seed);

        // The upstream pool is an unordered collection; its materialized
        // order depends on the seed. Overrides exist to pin this down.
        let mut word_list: Vec<String> = WORD_POOL
            .iter()
            .filter(|w| w.chars().count() as i64 >= min_word_length)
            .map(|w| (*w).to_string())
            .collect();
        rng.for_context("construction").shuffle(&mut word_list);

        Ok(Self {
            rng,
            word_list,
            min_word_length,
            max_rounds: 8,
            current_word: None,
            started: false,
        })
    }

    fn ctor_standard(seed: u64, num_players: usize) -> Result<Box<dyn Environment>, EnvError> {
        Ok(Box::new(Self::standard(seed, num_players)?))
    }

    fn ctor_hard(seed: u64, num_players: usize) -> Result<Box<dyn Environment>, EnvError> {
        Ok(Box::new(Self::hard(seed, num_players)?))
    }

    /// The word the chain currently ends on, once the game has started.
    #[must_use]
    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }
}

impl Environment for WordChainsEnv {
    fn spec(&self) -> BTreeMap<String, AttrValue> {
        BTreeMap::from([
            ("env".to_string(), AttrValue::from("WordChains")),
            (
                "num_players".to_string(),
                AttrValue::Int(REQUIRED_PLAYERS as i64),
            ),
            (
                "min_word_length".to_string(),
                AttrValue::Int(self.min_word_length),
            ),
            ("max_rounds".to_string(), AttrValue::Int(self.max_rounds)),
            (
                "word_list".to_string(),
                AttrValue::TextList(self.word_list.clone()),
            ),
        ])
    }

    fn get_attr(&self, path: &str) -> Result<AttrValue, EnvError> {
        match path {
            "word_list" => Ok(AttrValue::TextList(self.word_list.clone())),
            "min_word_length" => Ok(AttrValue::Int(self.min_word_length)),
            "max_rounds" => Ok(AttrValue::Int(self.max_rounds)),
            // Read-only once the game has started.
            "current_word" => self
                .current_word
                .as_deref()
                .map(AttrValue::from)
                .ok_or(EnvError::UnknownAttribute { path: path.into() }),
            _ => Err(EnvError::UnknownAttribute { path: path.into() }),
        }
    }

    fn set_attr(&mut self, path: &str, value: AttrValue) -> Result<(), EnvError> {
        if self.started {
            return Err(EnvError::AlreadyStarted);
        }
        match path {
            "word_list" => match value {
                AttrValue::TextList(words) => {
                    self.word_list = words;
                    Ok(())
                }
                other => Err(EnvError::TypeMismatch {
                    path: path.into(),
                    expected: "text-list",
                    got: other.kind(),
                }),
            },
            "min_word_length" => match value {
                AttrValue::Int(n) if n > 0 => {
                    self.min_word_length = n;
                    Ok(())
                }
                other => Err(EnvError::TypeMismatch {
                    path: path.into(),
                    expected: "positive int",
                    got: other.kind(),
                }),
            },
            "max_rounds" => match value {
                AttrValue::Int(n) if n > 0 => {
                    self.max_rounds = n;
                    Ok(())
                }
                other => Err(EnvError::TypeMismatch {
                    path: path.into(),
                    expected: "positive int",
                    got: other.kind(),
                }),
            },
            _ => Err(EnvError::UnknownAttribute { path: path.into() }),
        }
    }

    fn begin(&mut self) -> Result<(), EnvError> {
        let eligible: Vec<&String> = self
            .word_list
            .iter()
            .filter(|w| w.chars().count() as i64 >= self.min_word_length)
            .collect();

        let mut draw = self.rng.for_context("start-word");
        let start = draw
            .choose(&eligible)
            .ok_or_else(|| EnvError::InitializationFailed {
                reason: format!(
                    "word list has no entry of length >= {}",
                    self.min_word_length
                ),
            })?;

        self.current_word = Some((*start).clone());
        self.started = true;
        Ok(())
    }

    fn started(&self) -> bool {
        self.started
    }
}

/// Register the Word Chains variants, raw and wrapped.
pub(crate) fn register(registry: &mut EnvRegistry) {
    registry.register(EnvEntry::wrapped(
        "WordChains-v0",
        "WordChains",
        None,
        WordChainsEnv::ctor_standard,
    ));
    registry.register(EnvEntry::raw(
        "WordChains-v0-raw",
        "WordChains",
        None,
        WordChainsEnv::ctor_standard,
    ));
    registry.register(EnvEntry::wrapped(
        "WordChains-hard-v0",
        "WordChains",
        Some("hard"),
        WordChainsEnv::ctor_hard,
    ));
    registry.register(EnvEntry::raw(
        "WordChains-hard-v0-raw",
        "WordChains",
        Some("hard"),
        WordChainsEnv::ctor_hard,
    ));
}
