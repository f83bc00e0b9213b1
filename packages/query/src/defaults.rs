//! Compile-time embedded default variables.
//!
//! The defaults live in `defaults.toml` at the crate root and are embedded
//! via `include_str!`, so every binary carries the same baseline analyzer,
//! field and boost settings.

use fallback_query_models::{QueryDefaults, VariableStore};

const DEFAULTS_TOML: &str = include_str!("../defaults.toml");

/// Returns the embedded query defaults.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. It is a compile-time constant,
/// so a parse failure is a development error caught by the tests below.
#[must_use]
pub fn defaults() -> QueryDefaults {
    toml::de::from_str(DEFAULTS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded query defaults: {e}"))
}

/// Returns a store seeded with the embedded defaults.
#[must_use]
pub fn default_store() -> VariableStore {
    let mut store = VariableStore::new();
    defaults().apply(&mut store);
    store
}

#[cfg(test)]
mod tests {
    use fallback_query_models::{AdminLevel, VarValue};
    use strum::IntoEnumIterator;

    use super::*;
    use crate::view::View;
    use crate::views::admin_level;

    #[test]
    fn parses_embedded_defaults() {
        let defaults = defaults();
        assert_eq!(defaults.size, Some(10));
        assert_eq!(defaults.track_scores, Some(true));
        assert_eq!(defaults.boost.get("address"), Some(&VarValue::from(10)));
    }

    #[test]
    fn every_admin_level_has_defaults() {
        let defaults = defaults();
        for level in AdminLevel::iter() {
            let config = defaults
                .admin
                .get(level.as_ref())
                .unwrap_or_else(|| panic!("No defaults for admin level {level}"));
            assert!(!config.analyzer.is_empty(), "{level} has empty analyzer");
            assert!(!config.field.is_empty(), "{level} has empty field");
        }
    }

    #[test]
    fn admin_defaults_only_cover_known_levels() {
        for name in defaults().admin.keys() {
            assert!(
                name.parse::<AdminLevel>().is_ok(),
                "Unknown admin level in defaults: {name}"
            );
        }
    }

    #[test]
    fn default_store_enables_admin_views() {
        let mut store = default_store();
        store.set("input:region", "region value");

        let rendered = admin_level(AdminLevel::Region).render(&store).unwrap();
        assert_eq!(
            rendered["match"]["parent.region"]["query"],
            serde_json::json!("region value")
        );
        assert!(admin_level(AdminLevel::Country).render(&store).is_none());
    }
}
