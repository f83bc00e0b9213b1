//! The fallback cascade.
//!
//! Each [`Layer`] is a row of a static table: the input fields it requires,
//! the input fields whose presence suppresses it, and the view that renders
//! its clause. Every row is consulted on every render and the surviving
//! fragments keep table order, which runs from most to least specific:
//!
//! 1. free-text query (venue)
//! 2. housenumber + street (address)
//! 3. housenumber without street
//! 4. postcode without housenumber or street
//! 5. street
//! 6. neighbourhood, borough, locality, locality as borough, county,
//!    region, country
//!
//! A postcode given alongside a housenumber or street is not a layer of its
//! own; it is added as an optional clause of the address and street layers.

use fallback_query_models::{AdminLevel, InputField, VarValue, VariableStore};
use strum::IntoEnumIterator;

use crate::clause::{FallbackClause, match_phrase, multi_match};
use crate::view::{Fragment, is_empty_fragment};

/// Fields searched by free-text queries.
const VENUE_FIELDS: &[&str] = &["phrase.default", "category"];

/// Fields holding postal codes of postcode documents.
const POSTCODE_FIELDS: &[&str] = &["parent.postcode"];

const NUMBER_FIELD: &str = "address_parts.number";
const STREET_FIELD: &str = "address_parts.street";
const ZIP_FIELD: &str = "address_parts.zip";
const UNIT_FIELD: &str = "address_parts.unit";

/// One row of the cascade table.
#[derive(Debug, Clone, Copy)]
pub struct Layer {
    /// Identifier of the row, unique within the table.
    pub id: &'static str,
    /// Inputs that must all be set for the layer to apply.
    pub requires: &'static [InputField],
    /// Inputs that must all be unset for the layer to apply.
    pub excludes: &'static [InputField],
    /// Renders the layer's clause.
    pub view: fn(&VariableStore) -> Option<Fragment>,
}

impl Layer {
    /// Returns whether this layer participates for `vs`.
    #[must_use]
    pub fn applies(&self, vs: &VariableStore) -> bool {
        self.requires.iter().all(|field| vs.isset(&field.key()))
            && !self.excludes.iter().any(|field| vs.isset(&field.key()))
    }
}

/// The cascade table, in should-list order.
pub static LAYERS: &[Layer] = &[
    Layer {
        id: "venue",
        requires: &[InputField::Query],
        excludes: &[],
        view: venue,
    },
    Layer {
        id: "address",
        requires: &[InputField::Housenumber, InputField::Street],
        excludes: &[],
        view: address,
    },
    Layer {
        id: "housenumber",
        requires: &[InputField::Housenumber],
        excludes: &[InputField::Street],
        view: housenumber,
    },
    Layer {
        id: "postcode",
        requires: &[InputField::Postcode],
        excludes: &[InputField::Housenumber, InputField::Street],
        view: postcode,
    },
    Layer {
        id: "street",
        requires: &[InputField::Street],
        excludes: &[],
        view: street,
    },
    Layer {
        id: "neighbourhood",
        requires: &[InputField::Neighbourhood],
        excludes: &[],
        view: neighbourhood,
    },
    Layer {
        id: "borough",
        requires: &[InputField::Borough],
        excludes: &[],
        view: borough,
    },
    Layer {
        id: "locality",
        requires: &[InputField::Locality],
        excludes: &[],
        view: locality,
    },
    Layer {
        id: "locality_as_borough",
        requires: &[InputField::Locality],
        excludes: &[InputField::Borough],
        view: locality_as_borough,
    },
    Layer {
        id: "county",
        requires: &[InputField::County],
        excludes: &[],
        view: county,
    },
    Layer {
        id: "region",
        requires: &[InputField::Region],
        excludes: &[],
        view: region,
    },
    Layer {
        id: "country",
        requires: &[InputField::Country],
        excludes: &[],
        view: country,
    },
];

/// Renders every applicable layer of [`LAYERS`] against `vs`, in table
/// order, dropping empty fragments.
#[must_use]
pub fn evaluate(vs: &VariableStore) -> Vec<Fragment> {
    LAYERS
        .iter()
        .filter(|layer| layer.applies(vs))
        .filter_map(|layer| {
            log::trace!("fallback layer '{}' applies", layer.id);
            (layer.view)(vs).filter(|fragment| !is_empty_fragment(fragment))
        })
        .collect()
}

fn input(vs: &VariableStore, field: InputField) -> Option<&VarValue> {
    vs.var(&field.key())
}

fn venue(vs: &VariableStore) -> Option<Fragment> {
    let query = input(vs, InputField::Query)?;

    let fragment = FallbackClause::new("venue", "venue")
        .must(multi_match(VENUE_FIELDS, query))
        .admin_context(vs, AdminLevel::iter())
        .boost_from(vs, "boost:venue")
        .into_fragment();

    Some(fragment)
}

fn address(vs: &VariableStore) -> Option<Fragment> {
    let number = input(vs, InputField::Housenumber)?;
    let street = input(vs, InputField::Street)?;

    let fragment = FallbackClause::new("address", "address")
        .must(match_phrase(NUMBER_FIELD, number))
        .must(match_phrase(STREET_FIELD, street))
        .should_phrase_if_set(vs, &InputField::Unit.key(), UNIT_FIELD)
        .should_phrase_if_set(vs, &InputField::Postcode.key(), ZIP_FIELD)
        .admin_context(vs, AdminLevel::iter())
        .boost_from(vs, "boost:address")
        .into_fragment();

    Some(fragment)
}

fn housenumber(vs: &VariableStore) -> Option<Fragment> {
    let number = input(vs, InputField::Housenumber)?;

    let fragment = FallbackClause::new("housenumber", "address")
        .must(match_phrase(NUMBER_FIELD, number))
        .should_phrase_if_set(vs, &InputField::Postcode.key(), ZIP_FIELD)
        .admin_context(vs, AdminLevel::iter())
        .boost_from(vs, "boost:address")
        .into_fragment();

    Some(fragment)
}

fn postcode(vs: &VariableStore) -> Option<Fragment> {
    let postcode = input(vs, InputField::Postcode)?;

    let fragment = FallbackClause::new("postcode", "postcode")
        .must(multi_match(POSTCODE_FIELDS, postcode))
        .admin_context(vs, AdminLevel::iter())
        .boost_from(vs, "boost:postcode")
        .into_fragment();

    Some(fragment)
}

fn street(vs: &VariableStore) -> Option<Fragment> {
    let street = input(vs, InputField::Street)?;

    let fragment = FallbackClause::new("street", "street")
        .must(match_phrase(STREET_FIELD, street))
        .should_phrase_if_set(vs, &InputField::Postcode.key(), ZIP_FIELD)
        .admin_context(vs, AdminLevel::iter())
        .boost_from(vs, "boost:street")
        .into_fragment();

    Some(fragment)
}

/// Clause for an admin layer: the level's own value against its parent
/// fields plus every less specific level that is set.
fn admin_layer(vs: &VariableStore, level: AdminLevel) -> Option<Fragment> {
    let value = vs.var(&level.input_key())?;

    let fragment = FallbackClause::new(level.as_ref(), level.as_ref())
        .must(multi_match(level.parent_fields(), value))
        .admin_context(vs, level.less_specific())
        .boost_from(vs, &format!("boost:{level}"))
        .into_fragment();

    Some(fragment)
}

fn neighbourhood(vs: &VariableStore) -> Option<Fragment> {
    admin_layer(vs, AdminLevel::Neighbourhood)
}

fn borough(vs: &VariableStore) -> Option<Fragment> {
    admin_layer(vs, AdminLevel::Borough)
}

fn locality(vs: &VariableStore) -> Option<Fragment> {
    admin_layer(vs, AdminLevel::Locality)
}

/// Tries the locality value as a borough, for inputs that name a borough
/// (e.g. "Brooklyn") in the locality position.
fn locality_as_borough(vs: &VariableStore) -> Option<Fragment> {
    let value = input(vs, InputField::Locality)?;

    let fragment = FallbackClause::new("borough", "borough")
        .must(multi_match(AdminLevel::Borough.parent_fields(), value))
        .admin_context(vs, AdminLevel::Locality.less_specific())
        .boost_from(vs, "boost:borough")
        .into_fragment();

    Some(fragment)
}

fn county(vs: &VariableStore) -> Option<Fragment> {
    admin_layer(vs, AdminLevel::County)
}

fn region(vs: &VariableStore) -> Option<Fragment> {
    admin_layer(vs, AdminLevel::Region)
}

fn country(vs: &VariableStore) -> Option<Fragment> {
    admin_layer(vs, AdminLevel::Country)
}
