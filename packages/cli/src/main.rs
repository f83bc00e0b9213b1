#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for rendering structured fallback queries.
//!
//! Builds a variable store from the embedded defaults, an optional
//! variables file and `--var key=value` assignments (applied in that
//! order), renders the structured fallback query and prints the request as
//! JSON on stdout.
//!
//! ```text
//! fallback_query --defaults --var input:housenumber=30 \
//!     --var "input:street=w 26th st" --var input:locality=new\ york
//! ```

use std::path::PathBuf;

use clap::Parser;
use fallback_query::{QueryError, StructuredFallbackQuery, VariableStore, defaults, vars, views};

/// Render a structured fallback query from address variables.
#[derive(Parser)]
#[command(name = "fallback_query")]
#[command(about = "Render a structured fallback query from address variables")]
struct Cli {
    /// Seed the store with the embedded defaults first.
    #[arg(long)]
    defaults: bool,

    /// TOML (`.toml`) or JSON file holding a flat map of variables.
    #[arg(long)]
    vars: Option<PathBuf>,

    /// Variable assignment, e.g. `input:street=main st` (repeatable).
    #[arg(long = "var", value_name = "KEY=VALUE")]
    assignments: Vec<String>,

    /// Register the admin field-match view for this level as a scoring
    /// function (repeatable).
    #[arg(long = "admin-score", value_name = "LEVEL")]
    admin_scores: Vec<String>,

    /// Print compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,
}

fn build_store(cli: &Cli) -> Result<VariableStore, QueryError> {
    let mut store = if cli.defaults {
        defaults::default_store()
    } else {
        VariableStore::new()
    };

    if let Some(path) = &cli.vars {
        store.merge(vars::load_variables(path)?);
    }

    for assignment in &cli.assignments {
        let (key, value) = vars::parse_assignment(assignment)?;
        log::debug!("{key} = {value:?}");
        store.set(key, value);
    }

    Ok(store)
}

fn build_query(cli: &Cli) -> Result<StructuredFallbackQuery, QueryError> {
    let mut query = StructuredFallbackQuery::new();
    for level in &cli.admin_scores {
        query.score(views::admin_level_named(level)?);
    }
    Ok(query)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let store = build_store(&cli)?;
    let query = build_query(&cli)?;

    log::info!("Rendering query for {} variables", store.len());
    let request = query.render(&store);

    let output = if cli.compact {
        serde_json::to_string(&request)?
    } else {
        serde_json::to_string_pretty(&request)?
    };
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fallback_query").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn assignments_override_defaults() {
        let cli = cli(&["--defaults", "--var", "size=3", "--var", "input:street=main st"]);
        let store = build_store(&cli).unwrap();

        assert_eq!(store.var("size"), Some(&3.into()));
        assert!(store.isset("admin:country:field"));
        assert!(store.isset("input:street"));
    }

    #[test]
    fn no_defaults_starts_empty() {
        let store = build_store(&cli(&[])).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_assignment_is_rejected() {
        assert!(matches!(
            build_store(&cli(&["--var", "size"])),
            Err(QueryError::InvalidAssignment { .. })
        ));
    }

    #[test]
    fn admin_scores_become_functions() {
        let cli = cli(&[
            "--defaults",
            "--admin-score",
            "locality",
            "--var",
            "input:locality=locality value",
        ]);
        let store = build_store(&cli).unwrap();
        let request = build_query(&cli).unwrap().render(&store);

        assert_eq!(request.functions().len(), 1);
        assert_eq!(
            request.functions()[0]["match"]["parent.locality"]["query"],
            serde_json::json!("locality value")
        );
        assert_eq!(request.should().len(), 2);
    }

    #[test]
    fn unknown_admin_level_is_rejected() {
        assert!(matches!(
            build_query(&cli(&["--admin-score", "street"])),
            Err(QueryError::UnknownAdminLevel(_))
        ));
    }
}
