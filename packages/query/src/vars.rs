//! Loading variables from files and `key=value` assignments.

use std::path::Path;

use fallback_query_models::{VarValue, VariableStore};
use serde_json::Value;

use crate::QueryError;

/// Reads a flat map of variables from `path`.
///
/// Files ending in `.toml` are parsed as TOML; anything else as JSON.
///
/// # Errors
///
/// Returns [`QueryError`] if the file cannot be read or parsed.
pub fn load_variables(path: &Path) -> Result<VariableStore, QueryError> {
    let contents = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    log::debug!("Loading variables from {}", path.display());

    if is_toml {
        Ok(toml::de::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Parses a `key=value` assignment.
///
/// The value is read as `true`/`false`, an integer or float, a JSON object
/// or array when it starts with `{` or `[`, and a plain string otherwise.
/// Only the first `=` splits, so values may contain `=`.
///
/// # Errors
///
/// Returns [`QueryError::InvalidAssignment`] if there is no `=` or the key
/// is empty, and [`QueryError::Json`] for a malformed object or array.
pub fn parse_assignment(assignment: &str) -> Result<(String, VarValue), QueryError> {
    let Some((key, raw)) = assignment.split_once('=') else {
        return Err(QueryError::InvalidAssignment {
            assignment: assignment.to_string(),
        });
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(QueryError::InvalidAssignment {
            assignment: assignment.to_string(),
        });
    }

    Ok((key.to_string(), parse_value(raw)?))
}

fn parse_value(raw: &str) -> Result<VarValue, QueryError> {
    match raw {
        "true" => return Ok(VarValue::Bool(true)),
        "false" => return Ok(VarValue::Bool(false)),
        _ => {}
    }

    if raw.starts_with('{') || raw.starts_with('[') {
        let value: Value = serde_json::from_str(raw)?;
        return Ok(VarValue::from(value));
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Ok(VarValue::from(n));
    }

    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(VarValue::from(f)),
        _ => Ok(VarValue::from(raw)),
    }
}
