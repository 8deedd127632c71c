//! CLI support for aql-lang
//!
//! Provides programmatic access to the `aql` commands so other tools can
//! embed them without spawning the binary.

mod build;
mod docs;
mod suggest;
mod tokenize;
mod validate;

pub use build::{BuildOptions, execute_build};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use suggest::{PickOptions, SuggestOptions, execute_pick, execute_suggest};
pub use tokenize::{TokenizeOptions, execute_tokenize};
pub use validate::{ValidateOptions, ValidateResult, execute_validate};

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::config::{CatalogConfig, ConfigError};
use crate::provider::{Candidate, ProviderError};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Catalog error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Pass the query as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'aql docs' to see available categories.")]
    UnknownCategory(String),

    #[error("No suggestion labelled '{0}' for this input")]
    UnknownSuggestion(String),
}

/// Load the catalog at `path` (if any) and add `extra_fields` to its field list.
pub fn load_catalog(
    path: Option<&Path>,
    extra_fields: &[String],
) -> Result<CatalogConfig, CliError> {
    let mut catalog = match path {
        Some(path) => CatalogConfig::from_path(path)?,
        None => CatalogConfig::default(),
    };
    catalog
        .fields
        .extend(extra_fields.iter().map(|f| Candidate::new(f.as_str())));
    Ok(catalog)
}
