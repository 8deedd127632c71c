//! Check the fields of a query against the catalog

use std::path::PathBuf;

use crate::validator::{ValidationError, Validator};

use super::{CliError, load_catalog};

/// Options for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub input: String,
    pub catalog: Option<PathBuf>,
    /// Allowed fields in addition to the catalog's
    pub fields: Vec<String>,
}

/// Result of a validate operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateResult {
    Valid,
    Invalid(Vec<ValidationError>),
}

pub fn execute_validate(options: &ValidateOptions) -> Result<ValidateResult, CliError> {
    let catalog = load_catalog(options.catalog.as_deref(), &options.fields)?;
    let allowed = catalog.validation_options();

    let errors = Validator::new(&allowed).errors(&options.input);
    if errors.is_empty() {
        Ok(ValidateResult::Valid)
    } else {
        Ok(ValidateResult::Invalid(errors))
    }
}
