//! The [`Record`] row type.
//!
//! A record is a mapping from field name to [`Value`]. Records are immutable by
//! convention: [`Record::set`] and [`Record::merge`] return a new record and
//! leave the receiver untouched, so a record handed downstream can never be
//! changed behind an upstream operator's back.
//!
//! Fields are kept in a `BTreeMap`, which gives records a deterministic
//! `Debug`/JSON rendering and lets them be hashed and compared as a whole.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value of `key`, or `None` if the field is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Stored value of `key`, or `default` if the field is absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.fields
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Integer view of `key`, coercing text by parsing it.
    ///
    /// Absent fields, unparsable text and booleans all yield `0`.
    #[must_use]
    pub fn as_int(&self, key: &str) -> i64 {
        self.get(key).map_or(0, Value::as_int)
    }

    /// The stored integer, or `default` when the field is absent or not stored
    /// as an integer. No coercion is attempted.
    #[must_use]
    pub fn as_int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::int).unwrap_or(default)
    }

    /// Text view of `key`, coercing integers by formatting them.
    ///
    /// Absent fields and booleans yield the empty string.
    #[must_use]
    pub fn as_text(&self, key: &str) -> String {
        self.get(key).map(Value::as_text).unwrap_or_default()
    }

    /// The stored text, or `default` when the field is absent or not stored as
    /// text. No coercion is attempted.
    #[must_use]
    pub fn as_text_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(Value::text)
            .unwrap_or(default)
            .to_owned()
    }

    #[must_use]
    pub fn as_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(Value::as_bool)
    }

    #[must_use]
    pub fn as_bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::bool).unwrap_or(default)
    }

    /// A copy of this record with `key` set to `value`.
    #[must_use]
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Record {
        let mut fields = self.fields.clone();
        fields.insert(key.into(), value.into());
        Record { fields }
    }

    /// A copy of this record with every field of `other` written over it.
    ///
    /// `other` wins on name collisions.
    #[must_use]
    pub fn merge(&self, other: &Record) -> Record {
        let mut fields = self.fields.clone();
        for (k, v) in &other.fields {
            fields.insert(k.clone(), v.clone());
        }
        Record { fields }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in ascending name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match v {
                Value::Text(s) => write!(f, "{k}: {s:?}")?,
                other => write!(f, "{k}: {other}")?,
            }
        }
        f.write_str("}")
    }
}

/// Build a [`Record`] from `key => value` pairs.
///
/// ```
/// use rowflow::{record, Value};
///
/// let r = record! { "id" => 7, "name" => "ada", "active" => true };
/// assert_eq!(r.get("id"), Some(&Value::Int(7)));
/// assert_eq!(r.as_text("name"), "ada");
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::Record as ::std::iter::FromIterator<(::std::string::String, $crate::Value)>>::from_iter([
            $((::std::string::String::from($key), $crate::Value::from($value))),+
        ])
    };
}
