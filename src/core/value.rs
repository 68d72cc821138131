//! Generic attribute values for opaque environment state.
//!
//! Environments are capability-polymorphic: different games expose different
//! attribute sets (a word list, a disk count, a board size). The harness
//! never interprets these beyond their value kind.
//!
//! ## AttrValue Types
//!
//! - `Int`: Numbers (disk count, round limit)
//! - `Bool`: Flags (case-sensitive matching)
//! - `Text`: Strings (starting word, variant label)
//! - `IntList`: Number lists (peg sizes)
//! - `TextList`: String lists (word lists)

use serde::{Deserialize, Serialize};

/// Dotted path addressing one attribute on a constructed environment.
///
/// Paths are opaque to the harness; each environment resolves its own.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrPath(pub String);

impl AttrPath {
    /// Create a new attribute path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttrPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttrPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AttrPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of an environment attribute.
///
/// Supports the handful of shapes real environments declare; anything richer
/// stays inside the environment and out of the harness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Integer value (disk count, round limit).
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Text value (starting word, variant label).
    Text(String),
    /// List of integers.
    IntList(Vec<i64>),
    /// List of strings (word lists, role names).
    TextList(Vec<String>),
}

impl AttrValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as int list reference if this is an IntList value.
    #[must_use]
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            AttrValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    /// Get as text list reference if this is a TextList value.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::TextList(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the value kind, for error context.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Int(_) => "int",
            AttrValue::Bool(_) => "bool",
            AttrValue::Text(_) => "text",
            AttrValue::IntList(_) => "int-list",
            AttrValue::TextList(_) => "text-list",
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v as i64)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(v: Vec<i64>) -> Self {
        AttrValue::IntList(v)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(v: Vec<String>) -> Self {
        AttrValue::TextList(v)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(v: Vec<&str>) -> Self {
        AttrValue::TextList(v.into_iter().map(String::from).collect())
    }
}
