//! Dump the token sequence of a query

use crate::ast::Tokens;
use crate::lexer::tokenize;
use crate::output::{to_json, to_json_pretty};

use super::CliError;

/// Options for the tokenize command
#[derive(Debug, Clone, Default)]
pub struct TokenizeOptions {
    /// The query to tokenize
    pub input: String,
    /// Keep slots that matched no text
    pub all: bool,
    /// Pretty-print the output
    pub pretty: bool,
}

pub fn execute_tokenize(options: &TokenizeOptions) -> Result<String, CliError> {
    let tokens = tokenize(&options.input);
    let tokens: Tokens = if options.all {
        tokens
    } else {
        tokens.into_iter().filter(|t| t.has_value()).collect()
    };

    let json = if options.pretty {
        to_json_pretty(&tokens)?
    } else {
        to_json(&tokens)?
    };
    Ok(json)
}
