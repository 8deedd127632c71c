pub mod ast;
pub mod config;
pub mod language;
pub mod lexer;
pub mod output;
pub mod provider;
pub mod rebuild;
pub mod search_bar;
pub mod suggest;
pub mod validator;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{CompareOperator, Conjunction, GroupOperator, Token, TokenKind, Tokens};
pub use config::{CatalogConfig, ConfigError};
pub use language::{
    Aql, ConfigurationUpdate, LanguageConfiguration, LanguageParameters, QueryLanguage,
    RunContext, RunResult,
};
pub use lexer::{Lexer, tokenize};
pub use output::{Output, OutputOptions, build_output};
pub use provider::{
    Candidate, CatalogProvider, FieldProvider, ProviderError, ValueContext, ValueProvider,
};
pub use rebuild::{ItemClick, apply_suggestion, on_item_click};
pub use search_bar::{Mode, SearchBar, SearchBarError};
pub use suggest::{Suggestion, SuggestionEngine, SuggestionKind, UiSuggestion, decorate, suggest};
pub use validator::{ValidationError, ValidationOptions, Validator, validate};
