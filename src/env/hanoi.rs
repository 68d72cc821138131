//! Tower of Hanoi validation environment.
//!
//! Single-player puzzle with a fixed arity of one. The standard variant
//! starts with every disk stacked on the first peg; the hard variant deals
//! a larger, seed-scrambled starting position at game start.
//!
//! Registered variants:
//!
//! - `TowerOfHanoi-v0` / `TowerOfHanoi-v0-raw` (3 disks, ordered start)
//! - `TowerOfHanoi-hard-v0` / `TowerOfHanoi-hard-v0-raw` (5 disks,
//!   scrambled start)

use std::collections::BTreeMap;

use crate::core::{AttrValue, EnvError, EnvRng};
use crate::registry::{EnvEntry, EnvRegistry};

use super::Environment;

const REQUIRED_PLAYERS: usize = 1;
const PEG_COUNT: usize = 3;

/// Tower of Hanoi environment.
#[derive(Debug)]
pub struct HanoiEnv {
    rng: EnvRng,
    num_disks: i64,
    scrambled: bool,
    pegs: Vec<Vec<i64>>,
    started: bool,
}

impl HanoiEnv {
    /// Construct the standard variant: 3 disks, ordered start.
    pub fn standard(seed: u64, num_players: usize) -> Result<Self, EnvError> {
        Self::construct(seed, num_players, 3, false)
    }

    /// Construct the hard variant: 5 disks, scrambled start.
    pub fn hard(seed: u64, num_players: usize) -> Result<Self, EnvError> {
        Self::construct(seed, num_players, 5, true)
    }

    fn construct(
        seed: u64,
        num_players: usize,
        num_disks: i64,
        scrambled: bool,
    ) -> Result<Self, EnvError> {
        if num_players != REQUIRED_PLAYERS {
            return Err(EnvError::ArityMismatch {
                required: REQUIRED_PLAYERS,
                requested: num_players,
            });
        }

        Ok(Self {
            rng: EnvRng::new(seed),
            num_disks,
            scrambled,
            pegs: vec![Vec::new(); PEG_COUNT],
            started: false,
        })
    }

    fn ctor_standard(seed: u64, num_players: usize) -> Result<Box<dyn Environment>, EnvError> {
        Ok(Box::new(Self::standard(seed, num_players)?))
    }

    fn ctor_hard(seed: u64, num_players: usize) -> Result<Box<dyn Environment>, EnvError> {
        Ok(Box::new(Self::hard(seed, num_players)?))
    }

    /// Starting position, once the game has started.
    ///
    /// Disks are numbered by size; each peg lists bottom to top.
    #[must_use]
    pub fn pegs(&self) -> &[Vec<i64>] {
        &self.pegs
    }
}

impl Environment for HanoiEnv {
    fn spec(&self) -> BTreeMap<String, AttrValue> {
        BTreeMap::from([
            ("env".to_string(), AttrValue::from("TowerOfHanoi")),
            (
                "num_players".to_string(),
                AttrValue::Int(REQUIRED_PLAYERS as i64),
            ),
            ("num_disks".to_string(), AttrValue::Int(self.num_disks)),
            ("scrambled".to_string(), AttrValue::Bool(self.scrambled)),
        ])
    }

    fn get_attr(&self, path: &str) -> Result<AttrValue, EnvError> {
        match path {
            "num_disks" => Ok(AttrValue::Int(self.num_disks)),
            "scrambled" => Ok(AttrValue::Bool(self.scrambled)),
            _ => Err(EnvError::UnknownAttribute { path: path.into() }),
        }
    }

    fn set_attr(&mut self, path: &str, value: AttrValue) -> Result<(), EnvError> {
        if self.started {
            return Err(EnvError::AlreadyStarted);
        }
        match path {
            "num_disks" => match value {
                AttrValue::Int(n) if n > 0 => {
                    self.num_disks = n;
                    Ok(())
                }
                other => Err(EnvError::TypeMismatch {
                    path: path.into(),
                    expected: "positive int",
                    got: other.kind(),
                }),
            },
            "scrambled" => match value {
                AttrValue::Bool(b) => {
                    self.scrambled = b;
                    Ok(())
                }
                other => Err(EnvError::TypeMismatch {
                    path: path.into(),
                    expected: "bool",
                    got: other.kind(),
                }),
            },
            _ => Err(EnvError::UnknownAttribute { path: path.into() }),
        }
    }

    fn begin(&mut self) -> Result<(), EnvError> {
        let mut deal = self.rng.for_context("deal");

        // Place disks largest-first; any peg is legal for a larger disk
        // as long as placement order is descending, which it is here.
        for disk in (1..=self.num_disks).rev() {
            let peg = if self.scrambled {
                deal.gen_range_usize(0..PEG_COUNT)
            } else {
                0
            };
            self.pegs[peg].push(disk);
        }

        self.started = true;
        Ok(())
    }

    fn started(&self) -> bool {
        self.started
    }
}

/// Register the Tower of Hanoi variants, raw and wrapped.
pub(crate) fn register(registry: &mut EnvRegistry) {
    registry.register(EnvEntry::wrapped(
        "TowerOfHanoi-v0",
        "TowerOfHanoi",
        None,
        HanoiEnv::ctor_standard,
    ));
    registry.register(EnvEntry::raw(
        "TowerOfHanoi-v0-raw",
        "TowerOfHanoi",
        None,
        HanoiEnv::ctor_standard,
    ));
    registry.register(EnvEntry::wrapped(
        "TowerOfHanoi-hard-v0",
        "TowerOfHanoi",
        Some("hard"),
        HanoiEnv::ctor_hard,
    ));
    registry.register(EnvEntry::raw(
        "TowerOfHanoi-hard-v0-raw",
        "TowerOfHanoi",
        Some("hard"),
        HanoiEnv::ctor_hard,
    ));
}
