//! Environment registry and resolver.
//!
//! The registry maps environment ids to construction entry points. Every
//! family registers two entries per difficulty variant: a wrapped id that
//! the external play driver decorates with default observation formatting,
//! and a `-raw` id that constructs the bare environment. Instance
//! generation always resolves to raw entries; wrappers would bake
//! presentation concerns into the persisted instances.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EnvError, GenerateError};
use crate::env::{self, EnvCtor, Environment};

/// Suffix distinguishing unwrapped construction entry points.
pub const RAW_SUFFIX: &str = "-raw";

/// One registered construction entry point.
pub struct EnvEntry {
    /// Full registry id, e.g. `WordChains-hard-v0-raw`.
    pub id: String,
    /// Family name shared by all variants, e.g. `WordChains`.
    pub family: String,
    /// Difficulty-variant label, `None` for the standard variant.
    pub variant: Option<String>,
    /// Whether this is the unwrapped entry point.
    pub raw: bool,
    /// Constructor invoked by the instantiator.
    pub ctor: EnvCtor,
}

impl EnvEntry {
    /// Create a raw (unwrapped) entry.
    ///
    /// Panics if `id` lacks the raw suffix.
    pub fn raw(
        id: impl Into<String>,
        family: impl Into<String>,
        variant: Option<&str>,
        ctor: EnvCtor,
    ) -> Self {
        let id = id.into();
        assert!(
            id.ends_with(RAW_SUFFIX),
            "raw entry id {id:?} must end with {RAW_SUFFIX:?}"
        );
        Self {
            id,
            family: family.into(),
            variant: variant.map(String::from),
            raw: true,
            ctor,
        }
    }

    /// Create a wrapped entry.
    ///
    /// Panics if `id` carries the raw suffix.
    pub fn wrapped(
        id: impl Into<String>,
        family: impl Into<String>,
        variant: Option<&str>,
        ctor: EnvCtor,
    ) -> Self {
        let id = id.into();
        assert!(
            !id.ends_with(RAW_SUFFIX),
            "wrapped entry id {id:?} must not end with {RAW_SUFFIX:?}"
        );
        Self {
            id,
            family: family.into(),
            variant: variant.map(String::from),
            raw: false,
            ctor,
        }
    }
}

/// The resolved identity of one experiment.
///
/// Derived once per generation run and never mutated: the raw entry point
/// to construct from, the experiment name external tooling sees (the entry
/// point minus the raw suffix), and the difficulty-variant label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub entry_point: String,
    pub experiment: String,
    pub variant: Option<String>,
}

/// Registry of environment construction entry points.
#[derive(Default)]
pub struct EnvRegistry {
    entries: FxHashMap<String, EnvEntry>,
}

impl EnvRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the bundled environments registered.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        env::word_chains::register(&mut registry);
        env::hanoi::register(&mut registry);
        registry
    }

    /// Register an entry.
    ///
    /// Panics if an entry with the same id already exists.
    pub fn register(&mut self, entry: EnvEntry) {
        if self.entries.contains_key(&entry.id) {
            panic!("Entry with id {:?} already registered", entry.id);
        }
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Get an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EnvEntry> {
        self.entries.get(id)
    }

    /// Check if an id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Get the number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = &EnvEntry> {
        self.entries.values()
    }

    /// Resolve a family to its raw entry points, one per difficulty
    /// variant.
    ///
    /// Each variant is an independent experiment; when a family has
    /// several, all are returned and the caller decides. Results are
    /// sorted by entry point so enumeration order never depends on map
    /// internals. Fails with `UnknownEnvironment` when the family has no
    /// raw entry.
    pub fn resolve(&self, family: &str) -> Result<Vec<ResolvedEntry>, GenerateError> {
        let mut resolved: Vec<ResolvedEntry> = self
            .entries
            .values()
            .filter(|e| e.raw && e.family == family)
            .map(|e| ResolvedEntry {
                entry_point: e.id.clone(),
                experiment: e
                    .id
                    .strip_suffix(RAW_SUFFIX)
                    .unwrap_or(&e.id)
                    .to_string(),
                variant: e.variant.clone(),
            })
            .collect();

        if resolved.is_empty() {
            return Err(GenerateError::UnknownEnvironment {
                family: family.to_string(),
            });
        }

        resolved.sort_by(|a, b| a.entry_point.cmp(&b.entry_point));
        Ok(resolved)
    }

    /// Construct an environment for a resolved entry.
    ///
    /// The environment seeds its RNG from `seed` and builds its pre-game
    /// attributes; game-state initialization is deferred so overrides can
    /// apply first.
    ///
    /// Panics if `entry` was not resolved from this registry.
    pub fn instantiate(
        &self,
        entry: &ResolvedEntry,
        seed: u64,
        num_players: usize,
    ) -> Result<Box<dyn Environment>, EnvError> {
        let registered = self
            .entries
            .get(&entry.entry_point)
            .unwrap_or_else(|| panic!("entry {:?} not in this registry", entry.entry_point));
        (registered.ctor)(seed, num_players)
    }
}
