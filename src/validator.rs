//! Field allow-list validation.
//!
//! The input is re-scanned with the positional form of the clause pattern and
//! every field that appears is checked against the allowed set. A clause with
//! no field is fine; a field outside the set is reported.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::lexer::clause_pattern;

static CLAUSE_POSITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&clause_pattern(false)).expect("clause pattern compiles"));

/// Capture group of the field slot in the positional pattern.
const FIELD_GROUP: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field {field} is not valid.")]
    UnknownField { field: String },
}

/// Options for [`Validator`]: the set of known field names.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    pub fields: HashSet<String>,
}

impl ValidationOptions {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidationOptions {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

pub struct Validator<'a> {
    options: &'a ValidationOptions,
}

impl<'a> Validator<'a> {
    pub fn new(options: &'a ValidationOptions) -> Self {
        Validator { options }
    }

    /// Every unknown field in `input`, in order of appearance.
    pub fn errors(&self, input: &str) -> Vec<ValidationError> {
        let errors: Vec<_> = CLAUSE_POSITIONAL
            .captures_iter(input)
            .filter_map(|caps| caps.get(FIELD_GROUP))
            .map(|m| m.as_str())
            .filter(|field| !field.is_empty() && !self.options.fields.contains(*field))
            .map(|field| ValidationError::UnknownField {
                field: field.to_string(),
            })
            .collect();

        if !errors.is_empty() {
            debug!(input, failures = errors.len(), "validation failed");
        }
        errors
    }

    pub fn is_valid(&self, input: &str) -> bool {
        self.errors(input).is_empty()
    }
}

/// `true` when every field in `input` is in `options.fields`.
pub fn validate(input: &str, options: &ValidationOptions) -> bool {
    Validator::new(options).is_valid(input)
}
