//! Query output handed to the search action.
//!
//! The executable query is the implicit query, when one is configured,
//! followed directly by the raw input. Nothing is escaped or quoted.
//!
//! # Examples
//!
//! ```
//! use aql_lang::output::{build_output, OutputOptions};
//!
//! let options = OutputOptions::with_implicit_query("agent.id=001;");
//! let output = build_output("rule.level=7", &options);
//!
//! assert_eq!(output.language, "aql");
//! assert_eq!(output.query, "agent.id=001;rule.level=7");
//! ```

use serde::{Deserialize, Serialize};

use crate::language::AQL_ID;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub language: String,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub implicit_query: Option<String>,
}

impl OutputOptions {
    pub fn with_implicit_query(query: impl Into<String>) -> Self {
        OutputOptions {
            implicit_query: Some(query.into()),
        }
    }
}

pub fn build_output(input: &str, options: &OutputOptions) -> Output {
    let implicit = options.implicit_query.as_deref().unwrap_or_default();
    Output {
        language: AQL_ID.to_string(),
        query: format!("{implicit}{input}"),
    }
}

/// Compact JSON for the search action and for CLI results.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
