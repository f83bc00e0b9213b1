//! The rendered search request.
//!
//! Mirrors the backend's wire shape:
//!
//! ```text
//! { size, track_scores,
//!   query: { function_score: {
//!     query: { bool: { should: [..], filter: { bool: { must: [..] } } } },
//!     functions: [..] } } }
//! ```
//!
//! `should`, `must` and `functions` are always serialized as arrays, even
//! when empty. `size` and `track_scores` are omitted when unset.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete search request produced by rendering a query layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Number of results to request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    /// Whether the backend tracks scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_scores: Option<Value>,
    /// The query body.
    pub query: QueryBody,
}

/// Top-level `query` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBody {
    /// Scoring wrapper around the boolean query.
    pub function_score: FunctionScore,
}

/// `function_score` wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionScore {
    /// Wrapped boolean query.
    pub query: BoolWrapper,
    /// Scoring functions.
    pub functions: Vec<Value>,
}

/// `{ "bool": ... }` wrapper around the main boolean query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolWrapper {
    /// The boolean query.
    #[serde(rename = "bool")]
    pub bool_query: BoolQuery,
}

/// Main boolean query: alternative matches plus mandatory filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    /// Alternative match clauses.
    pub should: Vec<Value>,
    /// Mandatory filter clauses.
    pub filter: FilterClause,
}

/// `{ "bool": { "must": [...] } }` filter grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    /// The grouped filters.
    #[serde(rename = "bool")]
    pub bool_query: MustClause,
}

/// List of mandatory clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MustClause {
    /// Mandatory clauses.
    pub must: Vec<Value>,
}

impl SearchRequest {
    /// Builds a request from its three clause lists.
    #[must_use]
    pub fn new(should: Vec<Value>, filters: Vec<Value>, functions: Vec<Value>) -> Self {
        Self {
            size: None,
            track_scores: None,
            query: QueryBody {
                function_score: FunctionScore {
                    query: BoolWrapper {
                        bool_query: BoolQuery {
                            should,
                            filter: FilterClause {
                                bool_query: MustClause { must: filters },
                            },
                        },
                    },
                    functions,
                },
            },
        }
    }

    /// Alternative match clauses.
    #[must_use]
    pub fn should(&self) -> &[Value] {
        &self.query.function_score.query.bool_query.should
    }

    /// Mandatory filter clauses.
    #[must_use]
    pub fn filters(&self) -> &[Value] {
        &self.query.function_score.query.bool_query.filter.bool_query.must
    }

    /// Scoring functions.
    #[must_use]
    pub fn functions(&self) -> &[Value] {
        &self.query.function_score.functions
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_request_keeps_empty_arrays() {
        let request = SearchRequest::default();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": {
                    "function_score": {
                        "query": {
                            "bool": {
                                "should": [],
                                "filter": { "bool": { "must": [] } }
                            }
                        },
                        "functions": []
                    }
                }
            })
        );
    }

    #[test]
    fn accessors_return_clause_lists() {
        let request = SearchRequest::new(
            vec![json!({ "should": 1 })],
            vec![json!({ "filter": 1 })],
            vec![json!({ "function": 1 })],
        );
        assert_eq!(request.should(), &[json!({ "should": 1 })]);
        assert_eq!(request.filters(), &[json!({ "filter": 1 })]);
        assert_eq!(request.functions(), &[json!({ "function": 1 })]);
    }

    #[test]
    fn parses_wire_shape() {
        let request: SearchRequest = serde_json::from_value(json!({
            "size": 10,
            "track_scores": true,
            "query": {
                "function_score": {
                    "query": {
                        "bool": {
                            "should": [{ "match": {} }],
                            "filter": { "bool": { "must": [] } }
                        }
                    },
                    "functions": []
                }
            }
        }))
        .unwrap();

        assert_eq!(request.size, Some(json!(10)));
        assert_eq!(request.should().len(), 1);
    }
}
