//! Generic field-match view for administrative fields.
//!
//! One view is built per admin property and reads four variables:
//!
//! - `input:<property>`: the value to match
//! - `admin:<property>:analyzer`: the analyzer to query with
//! - `admin:<property>:field`: the document field to match against
//! - `admin:<property>:boost`: the clause boost
//!
//! When any of them is unset the view renders nothing.

use fallback_query_models::{AdminLevel, VariableStore};
use serde_json::{Map, Value, json};

use crate::QueryError;
use crate::view::{Fragment, View};

/// Field-match view for one admin property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminView {
    property: String,
    input_key: String,
    analyzer_key: String,
    field_key: String,
    boost_key: String,
}

impl AdminView {
    /// Builds the view for `property`, e.g. `"locality"`.
    #[must_use]
    pub fn new(property: impl Into<String>) -> Self {
        let property = property.into();
        Self {
            input_key: format!("input:{property}"),
            analyzer_key: format!("admin:{property}:analyzer"),
            field_key: format!("admin:{property}:field"),
            boost_key: format!("admin:{property}:boost"),
            property,
        }
    }

    /// The admin property this view matches.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }
}

impl View for AdminView {
    /// Renders `{ "match": { <field>: { "analyzer", "boost", "query" } } }`
    /// where `<field>` is the value of `admin:<property>:field`. An empty
    /// property name never renders.
    fn render(&self, vs: &VariableStore) -> Option<Fragment> {
        if self.property.is_empty() {
            return None;
        }

        let query = vs.var(&self.input_key)?;
        let analyzer = vs.var(&self.analyzer_key)?;
        let field = vs.var(&self.field_key)?;
        let boost = vs.var(&self.boost_key)?;

        let mut section = Map::new();
        section.insert(
            field.key_text(),
            json!({
                "analyzer": analyzer.to_json(),
                "boost": boost.to_json(),
                "query": query.to_json(),
            }),
        );

        Some(json!({ "match": Value::Object(section) }))
    }
}

/// Builds a field-match view for `property`.
#[must_use]
pub fn admin(property: impl Into<String>) -> AdminView {
    AdminView::new(property)
}

/// Builds a field-match view for an [`AdminLevel`].
#[must_use]
pub fn admin_level(level: AdminLevel) -> AdminView {
    AdminView::new(level.as_ref())
}

/// Builds a field-match view for the admin level called `name`.
///
/// # Errors
///
/// Returns [`QueryError::UnknownAdminLevel`] if `name` is not an admin
/// level.
pub fn admin_level_named(name: &str) -> Result<AdminView, QueryError> {
    name.parse::<AdminLevel>()
        .map(admin_level)
        .map_err(|_| QueryError::UnknownAdminLevel(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(property: &str) -> VariableStore {
        let mut vs = VariableStore::new();
        vs.set(format!("input:{property}"), "input value")
            .set(format!("admin:{property}:analyzer"), "analyzer value")
            .set(format!("admin:{property}:field"), "field value")
            .set(format!("admin:{property}:boost"), "boost value");
        vs
    }

    #[test]
    fn renders_match_when_all_variables_set() {
        let view = admin("country");
        assert_eq!(
            view.render(&populated("country")),
            Some(json!({
                "match": {
                    "field value": {
                        "analyzer": "analyzer value",
                        "boost": "boost value",
                        "query": "input value"
                    }
                }
            }))
        );
    }

    #[test]
    fn missing_any_variable_renders_nothing() {
        for key in [
            "input:region",
            "admin:region:analyzer",
            "admin:region:field",
            "admin:region:boost",
        ] {
            let mut vs = populated("region");
            vs.unset(key);
            assert!(admin("region").render(&vs).is_none(), "rendered without {key}");
        }
    }

    #[test]
    fn empty_property_renders_nothing() {
        let mut vs = populated("");
        vs.set("input:", "input value");
        assert!(admin("").render(&vs).is_none());
    }

    #[test]
    fn variables_of_other_properties_are_ignored() {
        assert!(admin("locality").render(&populated("county")).is_none());
    }

    #[test]
    fn numeric_boost_is_kept_as_number() {
        let mut vs = populated("locality");
        vs.set("admin:locality:boost", 3);

        let rendered = admin_level(AdminLevel::Locality).render(&vs).unwrap();
        assert_eq!(rendered["match"]["field value"]["boost"], json!(3));
    }

    #[test]
    fn resolves_admin_levels_by_name() {
        assert_eq!(admin_level_named("county").unwrap().property(), "county");
        assert!(matches!(
            admin_level_named("street"),
            Err(QueryError::UnknownAdminLevel(name)) if name == "street"
        ));
    }

    #[test]
    fn falsy_input_still_renders() {
        let mut vs = populated("county");
        vs.set("input:county", "");

        let rendered = admin("county").render(&vs).unwrap();
        assert_eq!(rendered["match"]["field value"]["query"], json!(""));
    }
}
