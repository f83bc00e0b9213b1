#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Structured fallback query builder for geocoding search backends.
//!
//! Turns a sparse set of structured address inputs held in a
//! [`VariableStore`] into a single boolean/scoring search request:
//!
//! 1. The [`cascade`] decides which fallback layers apply (free-text
//!    query, address, housenumber, postcode, street, then each admin level
//!    from neighbourhood to country) and renders one clause per layer.
//! 2. Caller-registered score and filter [`View`]s add scoring functions
//!    and mandatory filters.
//! 3. [`StructuredFallbackQuery::render`] assembles everything into a
//!    [`SearchRequest`], dropping empty fragments without ever skipping a
//!    view.
//!
//! Populating the store from raw user input and sending the request to a
//! backend are left to the caller. The [`defaults`] module provides an
//! embedded baseline of analyzer, field and boost variables.

pub mod cascade;
pub mod clause;
pub mod defaults;
pub mod layout;
pub mod vars;
pub mod view;
pub mod views;

use thiserror::Error;

pub use fallback_query_models::{
    AdminLevel, InputField, QueryDefaults, SearchRequest, VarValue, VariableStore,
};
pub use layout::StructuredFallbackQuery;
pub use view::{Fragment, View, is_empty_fragment};

/// Errors from loading variables and configuration.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Reading a variables file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML variables file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON variables file or value could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `key=value` assignment was malformed.
    #[error("Invalid variable assignment '{assignment}': expected key=value")]
    InvalidAssignment {
        /// The assignment as given.
        assignment: String,
    },

    /// An admin level name was not recognized.
    #[error("Unknown admin level: {0}")]
    UnknownAdminLevel(String),
}
