//! Harness bindings: generation and scoring entry points.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::instance::{generate, GameSpecification, GenerationOutput};
use crate::overrides::Transform;
use crate::registry::EnvRegistry;
use crate::scoring::{EpisodeOutcome, PolicyRegistry};

/// Python wrapper for a generation run's output.
#[pyclass(name = "GenerationOutput")]
pub struct PyGenerationOutput {
    collection_json: String,
    failures: Vec<String>,
}

#[pymethods]
impl PyGenerationOutput {
    /// Canonical JSON encoding of the generated instance collection.
    fn collection_json(&self) -> &str {
        &self.collection_json
    }

    /// Human-readable description of each dropped instance.
    fn failures(&self) -> Vec<String> {
        self.failures.clone()
    }

    /// Whether every requested instance was generated.
    fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn __repr__(&self) -> String {
        format!(
            "GenerationOutput(failures={})",
            self.failures.len()
        )
    }
}

impl From<GenerationOutput> for PyGenerationOutput {
    fn from(output: GenerationOutput) -> Self {
        let collection_json = String::from_utf8(output.collection.to_json_bytes())
            .expect("canonical JSON is valid UTF-8");
        let failures = output
            .failures
            .iter()
            .map(|f| f.error.to_string())
            .collect();
        Self {
            collection_json,
            failures,
        }
    }
}

/// Generate instances from a JSON game specification.
///
/// Uses the registry of bundled environments. Run-aborting errors raise
/// `ValueError`; per-instance construction failures are reported on the
/// returned output.
#[pyfunction]
pub fn generate_instances(spec_json: &str) -> PyResult<PyGenerationOutput> {
    let spec: GameSpecification = serde_json::from_str(spec_json)
        .map_err(|e| PyValueError::new_err(format!("invalid game specification: {e}")))?;

    let registry = EnvRegistry::with_builtin();
    let output = generate(&spec, &registry).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(output.into())
}

/// Score a JSON episode outcome with the named policy.
///
/// Returns the normalized score as JSON.
#[pyfunction]
pub fn score_episode(policy_id: &str, outcome_json: &str) -> PyResult<String> {
    let outcome: EpisodeOutcome = serde_json::from_str(outcome_json)
        .map_err(|e| PyValueError::new_err(format!("invalid episode outcome: {e}")))?;

    let registry = PolicyRegistry::with_builtin();
    let score = registry
        .score(policy_id, &outcome)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    serde_json::to_string(&score).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Wire names of the override transform allowlist.
#[pyfunction]
pub fn list_transforms() -> Vec<&'static str> {
    Transform::ALL.iter().map(|t| t.name()).collect()
}

/// Identifiers of the registered scoring policies.
#[pyfunction]
pub fn list_policies() -> Vec<String> {
    PolicyRegistry::with_builtin()
        .policy_ids()
        .into_iter()
        .map(String::from)
        .collect()
}
