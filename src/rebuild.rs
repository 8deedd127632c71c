//! Applying a selected suggestion to the token sequence.
//!
//! A suggestion of the same kind as the last meaningful token replaces that
//! token's text; any other kind is appended as a new token. The tokens are
//! then serialized back to input text, which the next tokenizer pass starts
//! from. The run-search suggestion never touches the tokens.

use tracing::debug;

use crate::ast::{Token, Tokens};
use crate::output::{Output, OutputOptions, build_output};
use crate::suggest::Suggestion;

/// What the host should do after a suggestion is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemClick {
    /// Run the search with this output.
    Search(Output),
    /// Replace the input text.
    SetInput(String),
}

/// Apply `suggestion` to `tokens` and return the rebuilt input.
///
/// Returns `None` for the run-search suggestion, which is not a token.
pub fn apply_suggestion(tokens: &mut Tokens, suggestion: &Suggestion) -> Option<String> {
    let kind = suggestion.kind.token_kind()?;

    match tokens.last_with_value_mut() {
        Some(last) if last.kind == kind => {
            debug!(kind = %kind, label = %suggestion.label, "replacing last token");
            last.set_value(suggestion.label.as_str());
        }
        _ => {
            debug!(kind = %kind, label = %suggestion.label, "appending token");
            tokens.push(Token::new(kind, suggestion.label.as_str()));
        }
    }
    Some(tokens.to_input())
}

/// Handle a click on `suggestion` for the given `input` and its `tokens`.
pub fn on_item_click(
    input: &str,
    tokens: &mut Tokens,
    suggestion: &Suggestion,
    options: &OutputOptions,
) -> ItemClick {
    match apply_suggestion(tokens, suggestion) {
        Some(new_input) => ItemClick::SetInput(new_input),
        None => ItemClick::Search(build_output(input, options)),
    }
}
