//! Compute suggestions for a query and apply a picked one

use std::path::PathBuf;

use crate::language::{Aql, LanguageConfiguration, QueryLanguage, RunContext, RunResult};
use crate::rebuild::ItemClick;
use crate::suggest::{SuggestionKind, UiSuggestion};

use super::{CliError, load_catalog};

/// Options for the suggest command
#[derive(Debug, Clone, Default)]
pub struct SuggestOptions {
    pub input: String,
    pub catalog: Option<PathBuf>,
}

/// Options for the pick command
#[derive(Debug, Clone)]
pub struct PickOptions {
    pub input: String,
    pub catalog: Option<PathBuf>,
    /// Label of the suggestion to apply
    pub label: String,
    /// Disambiguates labels offered under more than one kind
    pub kind: Option<SuggestionKind>,
}

async fn run(input: &str, catalog: Option<&std::path::Path>) -> Result<RunResult, CliError> {
    let parameters = load_catalog(catalog, &[])?.parameters();
    let configuration = LanguageConfiguration::default();
    let context = RunContext {
        parameters: &parameters,
        configuration: &configuration,
    };
    Ok(Aql.run(input, context).await?)
}

pub async fn execute_suggest(options: &SuggestOptions) -> Result<Vec<UiSuggestion>, CliError> {
    let result = run(&options.input, options.catalog.as_deref()).await?;
    Ok(result.search_bar_props.suggestions)
}

pub async fn execute_pick(options: &PickOptions) -> Result<ItemClick, CliError> {
    let result = run(&options.input, options.catalog.as_deref()).await?;
    let props = &result.search_bar_props;

    let item = props
        .suggestions
        .iter()
        .find(|s| s.label == options.label && options.kind.is_none_or(|k| k == s.kind))
        .ok_or_else(|| CliError::UnknownSuggestion(options.label.clone()))?;

    Ok(props.on_item_click(item))
}
