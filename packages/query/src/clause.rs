//! Builders for the match clauses and named fallback layers that make up
//! the cascade's should-list.

use fallback_query_models::{AdminLevel, VarValue, VariableStore};
use serde_json::{Map, Value, json};

use crate::view::Fragment;

/// A `match_phrase` clause on a single document field.
#[must_use]
pub fn match_phrase(field: &str, value: &VarValue) -> Value {
    json!({ "match_phrase": { field: value.to_json() } })
}

/// A phrase-type `multi_match` clause across several document fields.
#[must_use]
pub fn multi_match(fields: &[&str], value: &VarValue) -> Value {
    json!({
        "multi_match": {
            "query": value.to_json(),
            "type": "phrase",
            "fields": fields,
        }
    })
}

/// A named `bool` clause for one layer of the fallback cascade.
///
/// Renders as the body of a `bool` query: `_name`, `must`, an optional
/// `should`, a `term` filter on the document layer and an optional
/// `boost`. The `should` and `boost` keys are omitted entirely when they
/// have nothing to carry.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackClause {
    name: String,
    must: Vec<Value>,
    should: Vec<Value>,
    filter: Value,
    boost: Option<Value>,
}

impl FallbackClause {
    /// Starts a clause named `fallback.<name>` restricted to documents of
    /// `layer`.
    #[must_use]
    pub fn new(name: &str, layer: &str) -> Self {
        Self {
            name: format!("fallback.{name}"),
            must: Vec::new(),
            should: Vec::new(),
            filter: json!({ "term": { "layer": layer } }),
            boost: None,
        }
    }

    /// Adds a mandatory clause.
    #[must_use]
    pub fn must(mut self, clause: Value) -> Self {
        self.must.push(clause);
        self
    }

    /// Adds an optional clause.
    #[must_use]
    pub fn should(mut self, clause: Value) -> Self {
        self.should.push(clause);
        self
    }

    /// Adds an optional `match_phrase` on `field` when `key` is set.
    #[must_use]
    pub fn should_phrase_if_set(self, vs: &VariableStore, key: &str, field: &str) -> Self {
        match vs.var(key) {
            Some(value) => self.should(match_phrase(field, value)),
            None => self,
        }
    }

    /// Adds a mandatory `multi_match` for each of `levels` whose input is
    /// set, in hierarchy order.
    #[must_use]
    pub fn admin_context(
        mut self,
        vs: &VariableStore,
        levels: impl Iterator<Item = AdminLevel>,
    ) -> Self {
        for level in levels {
            if let Some(value) = vs.var(&level.input_key()) {
                self.must.push(multi_match(level.parent_fields(), value));
            }
        }
        self
    }

    /// Copies the value of `key` into the clause boost when it is set to a
    /// usable value.
    ///
    /// `null`, `false` and the empty string leave the clause unboosted. Zero
    /// is kept.
    #[must_use]
    pub fn boost_from(mut self, vs: &VariableStore, key: &str) -> Self {
        self.boost = vs
            .var(key)
            .map(VarValue::to_json)
            .filter(is_usable_boost);
        self
    }

    /// Wraps the clause as `{ "bool": { ... } }`.
    #[must_use]
    pub fn into_fragment(self) -> Fragment {
        let mut body = Map::new();
        body.insert("_name".to_string(), Value::String(self.name));
        body.insert("must".to_string(), Value::Array(self.must));
        if !self.should.is_empty() {
            body.insert("should".to_string(), Value::Array(self.should));
        }
        body.insert("filter".to_string(), self.filter);
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), boost);
        }
        json!({ "bool": body })
    }
}

fn is_usable_boost(boost: &Value) -> bool {
    match boost {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
