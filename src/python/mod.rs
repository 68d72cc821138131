//! Python bindings for the game-bench harness.
//!
//! This module provides PyO3 bindings for the Python benchmarking
//! framework that drives instance generation and episode scoring.
//!
//! # Quick Start
//!
//! ```python
//! import game_bench as gb
//!
//! spec = '{"family": "WordChains", "n_instances": 3, "num_players": 2,
//!          "overrides": [{"path": "word_list", "transform": "sort"}]}'
//!
//! output = gb.generate_instances(spec)
//! collection = json.loads(output.collection_json())
//!
//! score = gb.score_episode("word-chains", outcome_json)
//! ```

use pyo3::prelude::*;

mod py_harness;

pub use py_harness::*;

/// game-bench: deterministic instance generation and scoring for
/// benchmarking LLM agents on game environments.
///
/// This module provides:
/// - Instance generation from a JSON game specification
/// - Episode scoring through the registered policies
/// - Introspection of the override allowlist and policy registry
#[pymodule]
fn game_bench(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGenerationOutput>()?;
    m.add_function(wrap_pyfunction!(generate_instances, m)?)?;
    m.add_function(wrap_pyfunction!(score_episode, m)?)?;
    m.add_function(wrap_pyfunction!(list_transforms, m)?)?;
    m.add_function(wrap_pyfunction!(list_policies, m)?)?;
    Ok(())
}
