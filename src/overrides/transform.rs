//! The closed transform allowlist.
//!
//! Overrides exist because upstream environments may derive values from
//! unordered internal collections, so their default sampling order varies
//! across runs even under a fixed seed. A small set of named, pure
//! operations closes that gap.
//!
//! The allowlist is the security boundary: transform names resolve against
//! this enum and nothing else. No caller-supplied code, no expression
//! strings, no I/O, no writes outside the declared path. Extending the set
//! means adding a variant here, never accepting anything evaluated.

use serde::{Deserialize, Serialize};

use crate::core::AttrValue;

/// An allowlisted, pure transformation of one attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Stable-sort a sequence.
    Sort,
    /// Deduplicate a sequence, preserving first occurrence.
    Dedupe,
    /// Lower-case a string, or all strings in a sequence.
    Lowercase,
    /// Trim surrounding whitespace from a string, or all strings in a
    /// sequence.
    Trim,
}

impl Transform {
    /// Every allowlisted transform.
    pub const ALL: [Transform; 4] = [
        Transform::Sort,
        Transform::Dedupe,
        Transform::Lowercase,
        Transform::Trim,
    ];

    /// The wire name of this transform.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Transform::Sort => "sort",
            Transform::Dedupe => "dedupe",
            Transform::Lowercase => "lowercase",
            Transform::Trim => "trim",
        }
    }

    /// Resolve a wire name against the allowlist.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Transform> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Apply the transform to a value.
    ///
    /// Returns `None` when the value kind is outside the transform's
    /// domain; the caller reports that as a misconfiguration rather than
    /// guessing.
    #[must_use]
    pub fn apply(self, value: &AttrValue) -> Option<AttrValue> {
        match (self, value) {
            (Transform::Sort, AttrValue::TextList(items)) => {
                let mut sorted = items.clone();
                sorted.sort();
                Some(AttrValue::TextList(sorted))
            }
            (Transform::Sort, AttrValue::IntList(items)) => {
                let mut sorted = items.clone();
                sorted.sort_unstable();
                Some(AttrValue::IntList(sorted))
            }
            (Transform::Dedupe, AttrValue::TextList(items)) => {
                Some(AttrValue::TextList(dedupe(items)))
            }
            (Transform::Dedupe, AttrValue::IntList(items)) => {
                Some(AttrValue::IntList(dedupe(items)))
            }
            (Transform::Lowercase, AttrValue::Text(s)) => {
                Some(AttrValue::Text(s.to_lowercase()))
            }
            (Transform::Lowercase, AttrValue::TextList(items)) => Some(AttrValue::TextList(
                items.iter().map(|s| s.to_lowercase()).collect(),
            )),
            (Transform::Trim, AttrValue::Text(s)) => Some(AttrValue::Text(s.trim().to_string())),
            (Transform::Trim, AttrValue::TextList(items)) => Some(AttrValue::TextList(
                items.iter().map(|s| s.trim().to_string()).collect(),
            )),
            _ => None,
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn dedupe<T: Clone + std::hash::Hash + Eq>(items: &[T]) -> Vec<T> {
    let mut seen = rustc_hash::FxHashSet::default();
    items
        .iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for transform in Transform::ALL {
            assert_eq!(Transform::from_name(transform.name()), Some(transform));
        }
        assert_eq!(Transform::from_name("exec"), None);
        assert_eq!(Transform::from_name("SORT"), None);
    }

    #[test]
    fn test_sort_is_stable_on_text() {
        let value = AttrValue::TextList(vec!["pear".into(), "apple".into(), "apple".into()]);
        let sorted = Transform::Sort.apply(&value).unwrap();
        assert_eq!(
            sorted.as_text_list().unwrap(),
            &["apple".to_string(), "apple".to_string(), "pear".to_string()]
        );
    }

    #[test]
    fn test_dedupe_preserves_first_occurrence() {
        let value = AttrValue::TextList(vec![
            "bee".into(),
            "ant".into(),
            "bee".into(),
            "cat".into(),
            "ant".into(),
        ]);
        let deduped = Transform::Dedupe.apply(&value).unwrap();
        assert_eq!(
            deduped.as_text_list().unwrap(),
            &["bee".to_string(), "ant".to_string(), "cat".to_string()]
        );
    }

    #[test]
    fn test_dedupe_int_list() {
        let value = AttrValue::IntList(vec![3, 1, 3, 2, 1]);
        let deduped = Transform::Dedupe.apply(&value).unwrap();
        assert_eq!(deduped.as_int_list().unwrap(), &[3, 1, 2]);
    }

    #[test]
    fn test_lowercase() {
        let value = AttrValue::Text("Apple".into());
        assert_eq!(
            Transform::Lowercase.apply(&value).unwrap(),
            AttrValue::Text("apple".into())
        );

        let list = AttrValue::TextList(vec!["Apple".into(), "BEE".into()]);
        assert_eq!(
            Transform::Lowercase.apply(&list).unwrap().as_text_list().unwrap(),
            &["apple".to_string(), "bee".to_string()]
        );
    }

    #[test]
    fn test_trim() {
        let value = AttrValue::TextList(vec![" apple ".into(), "bee\n".into()]);
        assert_eq!(
            Transform::Trim.apply(&value).unwrap().as_text_list().unwrap(),
            &["apple".to_string(), "bee".to_string()]
        );
    }

    #[test]
    fn test_inapplicable_kinds() {
        assert_eq!(Transform::Sort.apply(&AttrValue::Int(1)), None);
        assert_eq!(Transform::Lowercase.apply(&AttrValue::IntList(vec![1])), None);
        assert_eq!(Transform::Trim.apply(&AttrValue::Bool(true)), None);
        assert_eq!(Transform::Dedupe.apply(&AttrValue::Text("x".into())), None);
    }

    #[test]
    fn test_transforms_are_pure() {
        let value = AttrValue::TextList(vec!["Pear".into(), "apple".into()]);
        let before = value.clone();
        let _ = Transform::Sort.apply(&value);
        let _ = Transform::Lowercase.apply(&value);
        assert_eq!(value, before);
    }

    #[test]
    fn test_serde_names_match_wire_names() {
        for transform in Transform::ALL {
            let json = serde_json::to_string(&transform).unwrap();
            assert_eq!(json, format!("\"{}\"", transform.name()));
        }
    }
}
