//! Override application: declared, allowlisted patches to pre-game state.
//!
//! An override is a post-construction patch to one environment attribute,
//! declared as an (attribute path, transform name) pair. Application is
//! strictly ordered and strictly before game-state initialization; each
//! applied override leaves an audit record carrying a digest of the value
//! it produced, so two generation runs can be diffed down to the exact
//! attribute bytes.
//!
//! Application is all-or-nothing per instance: the first failure discards
//! the instance. Transform names are validated for the whole declaration
//! list before the environment is touched, so an allowlist miss can never
//! leave a partially-mutated environment behind.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smallvec::SmallVec;

use crate::core::{AttrPath, AttrValue, EnvError, GenerateError};
use crate::env::Environment;

pub mod transform;

pub use transform::Transform;

/// Audit trail of one instance's overrides.
///
/// Instances rarely declare more than a handful; the inline capacity
/// avoids an allocation for the common case.
pub type OverrideTrail = SmallVec<[OverrideRecord; 4]>;

/// One declared override, as read from the game specification.
///
/// The transform is kept as its wire name so that validation against the
/// allowlist is an explicit, reportable step rather than a serde failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideDecl {
    /// Attribute path on the constructed environment.
    pub path: AttrPath,
    /// Wire name of the transform to apply.
    pub transform: String,
}

impl OverrideDecl {
    /// Create a new declaration.
    pub fn new(path: impl Into<AttrPath>, transform: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            transform: transform.into(),
        }
    }
}

/// One applied override, retained in the instance record for audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Attribute path that was patched.
    pub path: AttrPath,
    /// Transform that was applied.
    pub transform: Transform,
    /// SHA-256 hex digest of the canonical encoding of the resulting
    /// value.
    pub digest: String,
}

/// Digest of a value's canonical JSON encoding.
///
/// Stable across runs, platforms and Rust versions, which is what makes
/// the audit trail diffable.
#[must_use]
pub fn value_digest(value: &AttrValue) -> String {
    let bytes = serde_json::to_vec(value).expect("AttrValue serialization is infallible");
    hex::encode(Sha256::digest(&bytes))
}

/// Resolve every declared transform name against the allowlist.
///
/// Used both by specification validation (fail fast, before any
/// environment is constructed) and as the applier's first phase.
pub fn resolve_transforms(decls: &[OverrideDecl]) -> Result<Vec<Transform>, GenerateError> {
    decls
        .iter()
        .map(|decl| {
            Transform::from_name(&decl.transform).ok_or_else(|| GenerateError::UnknownTransform {
                name: decl.transform.clone(),
            })
        })
        .collect()
}

/// Apply the declared overrides to a constructed environment, in order.
///
/// `index` is the instance index, carried into errors so a human can find
/// the failing instance. Returns one audit record per declaration.
pub fn apply_overrides(
    env: &mut dyn Environment,
    decls: &[OverrideDecl],
    index: usize,
) -> Result<OverrideTrail, GenerateError> {
    // Phase one: the whole declaration list must name allowlisted
    // transforms before anything is written.
    let transforms = resolve_transforms(decls)?;

    let mut trail = OverrideTrail::new();

    for (decl, transform) in decls.iter().zip(transforms) {
        let current = env.get_attr(decl.path.as_str()).map_err(|_| {
            GenerateError::UnknownAttribute {
                index,
                path: decl.path.clone(),
            }
        })?;

        let next = transform
            .apply(&current)
            .ok_or_else(|| GenerateError::InapplicableTransform {
                index,
                path: decl.path.clone(),
                transform: transform.name(),
                kind: current.kind(),
            })?;

        env.set_attr(decl.path.as_str(), next.clone())
            .map_err(|source| map_write_error(source, index, &decl.path))?;

        let digest = value_digest(&next);
        log::debug!(
            "instance {index}: applied {transform} at `{}` -> {digest}",
            decl.path
        );

        trail.push(OverrideRecord {
            path: decl.path.clone(),
            transform,
            digest,
        });
    }

    Ok(trail)
}

fn map_write_error(source: EnvError, index: usize, path: &AttrPath) -> GenerateError {
    match source {
        EnvError::UnknownAttribute { .. } => GenerateError::UnknownAttribute {
            index,
            path: path.clone(),
        },
        other => GenerateError::OverrideRejected {
            index,
            path: path.clone(),
            source: other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::WordChainsEnv;

    fn env_with_list(words: Vec<&str>) -> WordChainsEnv {
        let mut env = WordChainsEnv::standard(0, 2).unwrap();
        env.set_attr("word_list", words.into()).unwrap();
        env
    }

    #[test]
    fn test_apply_in_declaration_order() {
        let mut env = env_with_list(vec!["Pear", "apple", "pear"]);
        let decls = vec![
            OverrideDecl::new("word_list", "lowercase"),
            OverrideDecl::new("word_list", "dedupe"),
            OverrideDecl::new("word_list", "sort"),
        ];

        let trail = apply_overrides(&mut env, &decls, 0).unwrap();
        assert_eq!(trail.len(), 3);

        let list = env.get_attr("word_list").unwrap();
        // lowercase first merges "Pear"/"pear", then dedupe keeps one.
        assert_eq!(
            list.as_text_list().unwrap(),
            &["apple".to_string(), "pear".to_string()]
        );
    }

    #[test]
    fn test_order_matters() {
        let mut env = env_with_list(vec!["Pear", "apple", "pear"]);
        let decls = vec![
            OverrideDecl::new("word_list", "dedupe"),
            OverrideDecl::new("word_list", "lowercase"),
            OverrideDecl::new("word_list", "sort"),
        ];

        apply_overrides(&mut env, &decls, 0).unwrap();
        // dedupe before lowercase keeps both spellings of "pear".
        let list = env.get_attr("word_list").unwrap();
        assert_eq!(
            list.as_text_list().unwrap(),
            &["apple".to_string(), "pear".to_string(), "pear".to_string()]
        );
    }

    #[test]
    fn test_unknown_transform_leaves_env_untouched() {
        let mut env = env_with_list(vec!["pear", "apple"]);
        let before = env.get_attr("word_list").unwrap();

        let decls = vec![
            OverrideDecl::new("word_list", "sort"),
            OverrideDecl::new("word_list", "shell-out"),
        ];
        let err = apply_overrides(&mut env, &decls, 5).unwrap_err();

        assert!(matches!(err, GenerateError::UnknownTransform { name } if name == "shell-out"));
        // Even the valid first declaration must not have run.
        assert_eq!(env.get_attr("word_list").unwrap(), before);
    }

    #[test]
    fn test_unknown_attribute_carries_instance_index() {
        let mut env = env_with_list(vec!["pear"]);
        let decls = vec![OverrideDecl::new("board", "sort")];
        let err = apply_overrides(&mut env, &decls, 7).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnknownAttribute { index: 7, path } if path.as_str() == "board"
        ));
    }

    #[test]
    fn test_inapplicable_transform_is_reported() {
        let mut env = env_with_list(vec!["pear"]);
        let decls = vec![OverrideDecl::new("min_word_length", "lowercase")];
        let err = apply_overrides(&mut env, &decls, 0).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::InapplicableTransform {
                transform: "lowercase",
                kind: "int",
                ..
            }
        ));
    }

    #[test]
    fn test_write_after_begin_is_rejected() {
        let mut env = env_with_list(vec!["pear", "apple"]);
        env.begin().unwrap();

        let decls = vec![OverrideDecl::new("word_list", "sort")];
        let err = apply_overrides(&mut env, &decls, 0).unwrap_err();
        assert!(matches!(err, GenerateError::OverrideRejected { .. }));
    }

    #[test]
    fn test_digest_is_stable() {
        let value = AttrValue::TextList(vec!["apple".into(), "pear".into()]);
        assert_eq!(value_digest(&value), value_digest(&value.clone()));

        let other = AttrValue::TextList(vec!["pear".into(), "apple".into()]);
        assert_ne!(value_digest(&value), value_digest(&other));
    }

    #[test]
    fn test_trail_matches_final_value_digest() {
        let mut env = env_with_list(vec!["pear", "apple"]);
        let decls = vec![OverrideDecl::new("word_list", "sort")];
        let trail = apply_overrides(&mut env, &decls, 0).unwrap();

        let current = env.get_attr("word_list").unwrap();
        assert_eq!(trail[0].digest, value_digest(&current));
        assert_eq!(trail[0].transform, Transform::Sort);
    }
}
