//! Batch instance generation.
//!
//! One `GameSpecification` drives one generation run: resolve the family,
//! then for every experiment and instance index run construct → override →
//! capture. Instances never share an environment handle; each index gets a
//! fresh construction with its own seed, so runs parallelize trivially if
//! a caller wants to shard the index range.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GenerateError;
use crate::instance::record::{Experiment, InstanceCollection, InstanceRecord};
use crate::overrides::{self, OverrideDecl};
use crate::registry::EnvRegistry;

fn default_collection_name() -> String {
    "instances".to_string()
}

/// Scripted responses rarely exceed a couple of canned lines.
pub type ScriptedResponses = SmallVec<[String; 2]>;

/// One player role in the game specification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDescriptor {
    /// Role name, e.g. `"Guesser"`.
    pub role: String,
    /// Fixed responses for non-agent play; empty for agent-driven roles.
    #[serde(default)]
    pub scripted_responses: ScriptedResponses,
}

impl RoleDescriptor {
    /// Create an agent-driven role.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            scripted_responses: ScriptedResponses::new(),
        }
    }
}

/// Declarative input of one generation run.
///
/// Read once, validated, then treated as immutable for the whole run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSpecification {
    /// Environment family to resolve, e.g. `"WordChains"`.
    pub family: String,
    /// Number of instances to generate per experiment.
    pub n_instances: usize,
    /// Declared player count; must match the environment's arity.
    pub num_players: usize,
    /// Run-level seed; instance seeds are derived as `base_seed + index`.
    #[serde(default)]
    pub base_seed: u64,
    /// Collection name for the persisted output.
    #[serde(default = "default_collection_name")]
    pub collection: String,
    /// Per-player role descriptors; empty means anonymous agent roles.
    #[serde(default)]
    pub roles: Vec<RoleDescriptor>,
    /// Ordered override declarations; declaration order is application
    /// order.
    #[serde(default)]
    pub overrides: Vec<OverrideDecl>,
}

impl GameSpecification {
    /// Create a specification with no roles and no overrides.
    pub fn new(family: impl Into<String>, n_instances: usize, num_players: usize) -> Self {
        Self {
            family: family.into(),
            n_instances,
            num_players,
            base_seed: 0,
            collection: default_collection_name(),
            roles: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Set the run-level seed.
    #[must_use]
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Append an override declaration.
    #[must_use]
    pub fn with_override(mut self, decl: OverrideDecl) -> Self {
        self.overrides.push(decl);
        self
    }

    /// Append a role descriptor.
    #[must_use]
    pub fn with_role(mut self, role: RoleDescriptor) -> Self {
        self.roles.push(role);
        self
    }

    /// The seed for one instance index.
    #[must_use]
    pub fn instance_seed(&self, index: usize) -> u64 {
        self.base_seed.wrapping_add(index as u64)
    }

    /// Validate everything checkable without constructing an environment.
    ///
    /// Unknown transform names are rejected here, at specification-load
    /// time, so a misconfiguration fails before a long batch run starts.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.n_instances == 0 {
            return Err(GenerateError::InvalidSpecification {
                reason: "n_instances must be at least 1".to_string(),
            });
        }
        if self.num_players == 0 {
            return Err(GenerateError::InvalidSpecification {
                reason: "num_players must be at least 1".to_string(),
            });
        }
        if !self.roles.is_empty() && self.roles.len() != self.num_players {
            return Err(GenerateError::InvalidSpecification {
                reason: format!(
                    "{} roles declared for {} players",
                    self.roles.len(),
                    self.num_players
                ),
            });
        }
        overrides::resolve_transforms(&self.overrides)?;
        Ok(())
    }
}

/// One instance that failed construction while its siblings proceeded.
#[derive(Debug)]
pub struct InstanceFailure {
    /// Experiment the instance belonged to.
    pub experiment: String,
    /// Index of the failed instance.
    pub index: usize,
    /// The construction error.
    pub error: GenerateError,
}

/// Result of a generation run: the collection plus any per-instance
/// failures.
#[derive(Debug)]
pub struct GenerationOutput {
    /// Generated instances, grouped by experiment.
    pub collection: InstanceCollection,
    /// Instances dropped by per-instance construction failures.
    pub failures: Vec<InstanceFailure>,
}

impl GenerationOutput {
    /// Whether every requested instance was generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the full generation pipeline for one specification.
///
/// Error semantics follow the error kinds: unknown family, unknown
/// transform, unknown attribute and invalid specifications abort the run
/// (they would recur for every instance); a construction rejection drops
/// only the instance it names and is reported in the output's failure
/// list.
pub fn generate(
    spec: &GameSpecification,
    registry: &EnvRegistry,
) -> Result<GenerationOutput, GenerateError> {
    spec.validate()?;

    let resolved = registry.resolve(&spec.family)?;
    log::info!(
        "generating {} instance(s) for {} experiment(s) of `{}`",
        spec.n_instances,
        resolved.len(),
        spec.family
    );

    let mut collection = InstanceCollection::new(spec.collection.clone());
    let mut failures = Vec::new();

    for entry in &resolved {
        let mut experiment = Experiment::new(entry.experiment.clone());

        for index in 0..spec.n_instances {
            let seed = spec.instance_seed(index);

            let mut env = match registry.instantiate(entry, seed, spec.num_players) {
                Ok(env) => env,
                Err(source) => {
                    let error = GenerateError::Construction {
                        entry: entry.entry_point.clone(),
                        index,
                        source,
                    };
                    log::warn!("{error}; sibling instances proceed");
                    failures.push(InstanceFailure {
                        experiment: entry.experiment.clone(),
                        index,
                        error,
                    });
                    continue;
                }
            };

            let trail = overrides::apply_overrides(env.as_mut(), &spec.overrides, index)?;

            experiment
                .instances
                .push(InstanceRecord::capture(entry, index, seed, env.as_ref(), trail));
        }

        collection.experiments.push(experiment);
    }

    Ok(GenerationOutput {
        collection,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_unknown_transform() {
        let spec = GameSpecification::new("WordChains", 1, 2)
            .with_override(OverrideDecl::new("word_list", "eval"));
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, GenerateError::UnknownTransform { name } if name == "eval"));
    }

    #[test]
    fn test_validate_rejects_role_count_mismatch() {
        let spec = GameSpecification::new("WordChains", 1, 2)
            .with_role(RoleDescriptor::new("Starter"));
        assert!(matches!(
            spec.validate(),
            Err(GenerateError::InvalidSpecification { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_instances() {
        let spec = GameSpecification::new("WordChains", 0, 2);
        assert!(matches!(
            spec.validate(),
            Err(GenerateError::InvalidSpecification { .. })
        ));
    }

    #[test]
    fn test_instance_seed_derivation() {
        let spec = GameSpecification::new("WordChains", 3, 2).with_base_seed(100);
        assert_eq!(spec.instance_seed(0), 100);
        assert_eq!(spec.instance_seed(2), 102);
    }

    #[test]
    fn test_spec_deserialization_defaults() {
        let spec: GameSpecification = serde_json::from_str(
            r#"{"family": "WordChains", "n_instances": 2, "num_players": 2}"#,
        )
        .unwrap();
        assert_eq!(spec.base_seed, 0);
        assert_eq!(spec.collection, "instances");
        assert!(spec.roles.is_empty());
        assert!(spec.overrides.is_empty());
    }
}
