//! Namespaced variable storage read by query views.
//!
//! Keys follow the `input:*`, `boost:*` and `admin:<field>:*` conventions,
//! plus the flat `size` and `track_scores` keys. A key is either unset or
//! holds exactly one [`VarValue`]; falsy values such as `0`, `""` or
//! `false` still count as set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A value held by a [`VariableStore`].
///
/// Serializes untagged, so a store renders as a plain JSON/TOML map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// Text value (input strings, analyzer and field names).
    String(String),
    /// Boolean flag.
    Bool(bool),
    /// Integer or floating point number (boosts, sizes).
    Number(Number),
    /// Structured configuration (objects, arrays, null).
    Config(Value),
}

impl VarValue {
    /// Returns the string content for [`VarValue::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content as `f64` for [`VarValue::Number`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Converts into the equivalent JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Config(v) => v.clone(),
        }
    }

    /// Text form used when the value names an object key.
    ///
    /// Strings are used as-is; anything else is rendered as JSON text.
    #[must_use]
    pub fn key_text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_json().to_string(),
        }
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for VarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for VarValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for VarValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for VarValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for VarValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for VarValue {
    /// Non-finite numbers have no JSON representation and become `null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Config(Value::Null), Self::Number)
    }
}

impl From<Value> for VarValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            other => Self::Config(other),
        }
    }
}

impl From<&VarValue> for Value {
    fn from(value: &VarValue) -> Self {
        value.to_json()
    }
}

/// An ordered map from namespaced keys to [`VarValue`]s.
///
/// Views only read from the store; population is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableStore {
    vars: BTreeMap<String, VarValue>,
}

impl VariableStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Sets `key` to `value`, overwriting any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<VarValue>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Returns the current value of `key`, or `None` when unset.
    #[must_use]
    pub fn var(&self, key: &str) -> Option<&VarValue> {
        self.vars.get(key)
    }

    /// Returns whether `key` has been set, regardless of its value.
    #[must_use]
    pub fn isset(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Removes `key`, returning its previous value.
    pub fn unset(&mut self, key: &str) -> Option<VarValue> {
        self.vars.remove(key)
    }

    /// Copies every entry of `other` into this store, overwriting
    /// duplicates.
    pub fn merge(&mut self, other: Self) {
        self.vars.extend(other.vars);
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` when no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
