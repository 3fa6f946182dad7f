//! Dynamically-typed scalar field values.
//!
//! A [`Value`] is the closed set of scalar kinds a [`Record`](crate::Record) field can
//! hold. Coercions between kinds are **total**: they never fail and never panic.
//! When a conversion makes no sense the accessor returns the zero value of the
//! requested kind (`0`, `""`, `false`).
//!
//! | stored \ requested | int                  | text          | bool    |
//! |--------------------|----------------------|---------------|---------|
//! | `Int(i)`           | `i`                  | `i.to_string()` | `false` |
//! | `Text(s)`          | `s.parse()` or `0`   | `s`           | `false` |
//! | `Bool(b)`          | `0`                  | `""`          | `b`     |
//!
//! Equality and hashing are by kind *and* value, so `Int(1) != Text("1")`.
//! Grouping and joining rely on this.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar field value.
///
/// Serializes untagged, so a record round-trips through JSON as a flat object
/// (`{"id": 1, "name": "x", "active": true}`). Deserialization rejects any JSON
/// kind outside of integers, strings and booleans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Text(String),
}

/// The kind tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Text,
    Bool,
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Text(_) => ValueKind::Text,
            Value::Bool(_) => ValueKind::Bool,
        }
    }

    /// Best-effort integer view. Text is parsed as a base-10 `i64`; a parse
    /// failure yields `0`.
    #[must_use]
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            Value::Text(s) => s.parse().unwrap_or(0),
            Value::Bool(_) => 0,
        }
    }

    /// Best-effort text view. Integers are formatted in base 10.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Bool(_) => String::new(),
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// The integer payload, only if this value is stored as an integer.
    #[must_use]
    pub fn int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The text payload, only if this value is stored as text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, only if this value is stored as a boolean.
    #[must_use]
    pub fn bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Renders the raw payload: text without quotes, integers in base 10,
/// booleans as `true`/`false`. Used by the delimited-text writer.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}
