//! The API Query Language as a search bar sees it.
//!
//! A search bar calls [`QueryLanguage::run`] on every input change. The result
//! carries the decorated suggestions, the implicit-filter badge, a click
//! handler and the output for the search action.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::Tokens;
use crate::lexer::tokenize;
use crate::output::{Output, OutputOptions, build_output};
use crate::provider::{CatalogProvider, FieldProvider, ProviderError, ValueProvider};
use crate::rebuild::{ItemClick, on_item_click};
use crate::suggest::{SuggestionEngine, UiSuggestion, decorate};

pub const AQL_ID: &str = "aql";
pub const AQL_LABEL: &str = "AQL";
pub const AQL_DESCRIPTION: &str = "API Query Language (AQL) allows to do queries.";
pub const AQL_DOCUMENTATION_LINK: &str =
    "https://documentation.wazuh.com/current/user-manual/api/queries.html";

/// Per-language state kept across runs and reset on language switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfiguration {
    pub is_open_popover_implicit_filter: bool,
}

/// A new configuration, or a function of the current one.
pub enum ConfigurationUpdate<T> {
    Value(T),
    Update(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> ConfigurationUpdate<T> {
    pub fn update(f: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        ConfigurationUpdate::Update(Box::new(f))
    }

    pub fn apply(self, current: &T) -> T {
        match self {
            ConfigurationUpdate::Value(value) => value,
            ConfigurationUpdate::Update(f) => f(current),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConfigurationUpdate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationUpdate::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ConfigurationUpdate::Update(_) => f.write_str("Update(..)"),
        }
    }
}

pub fn toggle_implicit_filter_popover() -> ConfigurationUpdate<LanguageConfiguration> {
    ConfigurationUpdate::update(|state: &LanguageConfiguration| LanguageConfiguration {
        is_open_popover_implicit_filter: !state.is_open_popover_implicit_filter,
    })
}

pub fn close_implicit_filter_popover() -> ConfigurationUpdate<LanguageConfiguration> {
    ConfigurationUpdate::update(|_: &LanguageConfiguration| LanguageConfiguration {
        is_open_popover_implicit_filter: false,
    })
}

/// Caller-supplied parameters of a language mode.
#[derive(Clone)]
pub struct LanguageParameters {
    pub implicit_query: Option<String>,
    pub fields: Arc<dyn FieldProvider>,
    pub values: Arc<dyn ValueProvider>,
}

impl LanguageParameters {
    pub fn new(fields: Arc<dyn FieldProvider>, values: Arc<dyn ValueProvider>) -> Self {
        LanguageParameters {
            implicit_query: None,
            fields,
            values,
        }
    }

    /// Both providers backed by the same catalog.
    pub fn from_catalog(catalog: CatalogProvider) -> Self {
        let catalog = Arc::new(catalog);
        LanguageParameters::new(catalog.clone(), catalog)
    }

    pub fn with_implicit_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.implicit_query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            implicit_query: self.implicit_query.clone(),
        }
    }
}

impl fmt::Debug for LanguageParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageParameters")
            .field("implicit_query", &self.implicit_query)
            .finish_non_exhaustive()
    }
}

pub struct RunContext<'a> {
    pub parameters: &'a LanguageParameters,
    pub configuration: &'a LanguageConfiguration,
}

/// Badge shown before the input when an implicit query is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplicitFilter {
    pub query: String,
    pub is_open: bool,
}

#[derive(Debug, Clone)]
pub struct SearchBarProps {
    pub suggestions: Vec<UiSuggestion>,
    pub prepend: Option<ImplicitFilter>,
    input: String,
    tokens: Tokens,
    output_options: OutputOptions,
}

impl SearchBarProps {
    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    /// Handle a click on one of the suggestions of this run.
    pub fn on_item_click(&self, item: &UiSuggestion) -> ItemClick {
        let mut tokens = self.tokens.clone();
        on_item_click(
            &self.input,
            &mut tokens,
            &item.clone().into(),
            &self.output_options,
        )
    }
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub search_bar_props: SearchBarProps,
    pub output: Output,
}

#[async_trait]
pub trait QueryLanguage: Send + Sync {
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn description(&self) -> &'static str;

    fn documentation_link(&self) -> Option<&'static str> {
        None
    }

    /// Initial configuration, used whenever this language is selected.
    fn get_configuration(&self) -> LanguageConfiguration {
        LanguageConfiguration::default()
    }

    /// Map a query from outside the search bar to this language's input.
    fn transform_unified_query(&self, unified_query: &str) -> String;

    async fn run(&self, input: &str, context: RunContext<'_>) -> Result<RunResult, ProviderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Aql;

#[async_trait]
impl QueryLanguage for Aql {
    fn id(&self) -> &'static str {
        AQL_ID
    }

    fn label(&self) -> &'static str {
        AQL_LABEL
    }

    fn description(&self) -> &'static str {
        AQL_DESCRIPTION
    }

    fn documentation_link(&self) -> Option<&'static str> {
        Some(AQL_DOCUMENTATION_LINK)
    }

    fn transform_unified_query(&self, unified_query: &str) -> String {
        unified_query.to_string()
    }

    async fn run(&self, input: &str, context: RunContext<'_>) -> Result<RunResult, ProviderError> {
        let params = context.parameters;
        let tokens = tokenize(input);

        let engine = SuggestionEngine::new(&*params.fields, &*params.values);
        let suggestions = decorate(engine.suggest(&tokens).await?);
        debug!(input, suggestions = suggestions.len(), "aql run");

        let prepend = params.implicit_query.as_ref().map(|query| ImplicitFilter {
            query: query.clone(),
            is_open: context.configuration.is_open_popover_implicit_filter,
        });
        let output_options = params.output_options();
        let output = build_output(input, &output_options);

        Ok(RunResult {
            search_bar_props: SearchBarProps {
                suggestions,
                prepend,
                input: input.to_string(),
                tokens,
                output_options,
            },
            output,
        })
    }
}
