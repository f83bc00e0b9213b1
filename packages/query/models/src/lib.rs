#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for structured fallback queries.
//!
//! This crate contains only data types: the [`VariableStore`] that views
//! read from, the closed [`VarValue`] type it holds, the address fields a
//! structured geocoding request can carry, the [`QueryDefaults`] schema
//! for seeding a store and the rendered [`SearchRequest`]. It has no
//! query-building logic.

pub mod request;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub use request::SearchRequest;
pub use store::{VarValue, VariableStore};

/// Variable holding the number of results to request.
pub const SIZE_KEY: &str = "size";

/// Variable controlling whether the backend tracks scores when sorting.
pub const TRACK_SCORES_KEY: &str = "track_scores";

/// A structured geocoding input field.
///
/// Each field is stored under `input:<field>` in a [`VariableStore`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputField {
    /// Free-text query (venue names, categories).
    Query,
    /// Unit / apartment designator.
    Unit,
    /// House number.
    Housenumber,
    /// Street name.
    Street,
    /// Postal code.
    Postcode,
    /// Neighbourhood name.
    Neighbourhood,
    /// Borough name.
    Borough,
    /// Locality (city) name.
    Locality,
    /// County name.
    County,
    /// Region (state / province) name.
    Region,
    /// Country name or code.
    Country,
}

impl InputField {
    /// Store key for this field, e.g. `input:housenumber`.
    #[must_use]
    pub fn key(self) -> String {
        format!("input:{self}")
    }
}

/// A level of the administrative hierarchy, ordered from most to least
/// specific.
///
/// The derived `Ord` follows hierarchy order, so `a < b` means `a` is more
/// specific than `b`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdminLevel {
    /// Neighbourhood.
    Neighbourhood,
    /// Borough.
    Borough,
    /// Locality (city, town).
    Locality,
    /// County.
    County,
    /// Region (state, province).
    Region,
    /// Country.
    Country,
}

impl AdminLevel {
    /// The input field carrying this level's value.
    #[must_use]
    pub const fn input_field(self) -> InputField {
        match self {
            Self::Neighbourhood => InputField::Neighbourhood,
            Self::Borough => InputField::Borough,
            Self::Locality => InputField::Locality,
            Self::County => InputField::County,
            Self::Region => InputField::Region,
            Self::Country => InputField::Country,
        }
    }

    /// Store key for this level's input value, e.g. `input:locality`.
    #[must_use]
    pub fn input_key(self) -> String {
        self.input_field().key()
    }

    /// Store key for an admin setting of this level, e.g.
    /// `admin:locality:analyzer`.
    #[must_use]
    pub fn admin_key(self, setting: &str) -> String {
        format!("admin:{self}:{setting}")
    }

    /// Document fields that hold this level's names in the search index.
    ///
    /// Localities also match local-admin areas, counties match
    /// macro-counties, regions match macro-regions and countries match
    /// dependencies. The `_a` fields hold abbreviations.
    #[must_use]
    pub const fn parent_fields(self) -> &'static [&'static str] {
        match self {
            Self::Neighbourhood => &["parent.neighbourhood", "parent.neighbourhood_a"],
            Self::Borough => &["parent.borough", "parent.borough_a"],
            Self::Locality => &[
                "parent.locality",
                "parent.locality_a",
                "parent.localadmin",
                "parent.localadmin_a",
            ],
            Self::County => &[
                "parent.county",
                "parent.county_a",
                "parent.macrocounty",
                "parent.macrocounty_a",
            ],
            Self::Region => &[
                "parent.region",
                "parent.region_a",
                "parent.macroregion",
                "parent.macroregion_a",
            ],
            Self::Country => &[
                "parent.country",
                "parent.country_a",
                "parent.dependency",
                "parent.dependency_a",
            ],
        }
    }

    /// Levels strictly less specific than this one, in hierarchy order.
    pub fn less_specific(self) -> impl Iterator<Item = Self> {
        Self::iter().filter(move |level| *level > self)
    }
}

/// Default variables used to seed a [`VariableStore`], deserialized from
/// TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDefaults {
    /// Number of results to request.
    #[serde(default)]
    pub size: Option<u64>,
    /// Whether the backend should track scores.
    #[serde(default)]
    pub track_scores: Option<bool>,
    /// Field-match settings keyed by admin level name.
    #[serde(default)]
    pub admin: BTreeMap<String, AdminMatchConfig>,
    /// Layer boosts keyed by layer name (stored as `boost:<name>`).
    #[serde(default)]
    pub boost: BTreeMap<String, VarValue>,
}

/// Match settings for one admin level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminMatchConfig {
    /// Analyzer name passed to the backend.
    pub analyzer: String,
    /// Document field to match against.
    pub field: String,
    /// Boost applied to the match clause.
    pub boost: VarValue,
}

impl QueryDefaults {
    /// Writes every default into `store`, overwriting existing values.
    pub fn apply(&self, store: &mut VariableStore) {
        if let Some(size) = self.size {
            store.set(SIZE_KEY, size);
        }
        if let Some(track_scores) = self.track_scores {
            store.set(TRACK_SCORES_KEY, track_scores);
        }
        for (level, config) in &self.admin {
            store.set(format!("admin:{level}:analyzer"), config.analyzer.as_str());
            store.set(format!("admin:{level}:field"), config.field.as_str());
            store.set(format!("admin:{level}:boost"), config.boost.clone());
        }
        for (layer, boost) in &self.boost {
            store.set(format!("boost:{layer}"), boost.clone());
        }
    }
}
