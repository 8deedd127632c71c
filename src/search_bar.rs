//! Host-side state around a query language.
//!
//! [`SearchBar`] owns what the language itself does not: which language is
//! selected, that language's configuration, the input text and the latest run
//! result. Runs are stamped with increasing generations so that a slow run
//! finishing after a newer one cannot overwrite its suggestions.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::language::{
    ConfigurationUpdate, LanguageConfiguration, LanguageParameters, QueryLanguage, RunContext,
    RunResult,
};
use crate::output::Output;
use crate::provider::ProviderError;
use crate::rebuild::ItemClick;
use crate::suggest::UiSuggestion;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchBarError {
    #[error("a search bar needs at least one query language")]
    NoModes,

    #[error("unknown query language: '{0}'")]
    UnknownLanguage(String),
}

/// A language offered by the search bar, with its parameters.
#[derive(Clone)]
pub struct Mode {
    pub language: Arc<dyn QueryLanguage>,
    pub parameters: LanguageParameters,
}

impl Mode {
    pub fn new(language: Arc<dyn QueryLanguage>, parameters: LanguageParameters) -> Self {
        Mode {
            language,
            parameters,
        }
    }
}

/// A run that has been started but not yet applied.
pub struct PendingRun {
    pub generation: u64,
    input: String,
    mode: Mode,
    configuration: LanguageConfiguration,
}

impl PendingRun {
    pub async fn execute(&self) -> Result<RunResult, ProviderError> {
        let context = RunContext {
            parameters: &self.mode.parameters,
            configuration: &self.configuration,
        };
        self.mode.language.run(&self.input, context).await
    }
}

pub struct SearchBar {
    modes: Vec<Mode>,
    selected: usize,
    configuration: LanguageConfiguration,
    input: String,
    issued: u64,
    accepted: u64,
    last_run: Option<RunResult>,
}

impl SearchBar {
    /// Start with `default_mode`, or the first mode when none is given.
    pub fn new(modes: Vec<Mode>, default_mode: Option<&str>) -> Result<Self, SearchBarError> {
        if modes.is_empty() {
            return Err(SearchBarError::NoModes);
        }
        let selected = match default_mode {
            Some(id) => position_of(&modes, id)?,
            None => 0,
        };
        let configuration = modes[selected].language.get_configuration();

        Ok(SearchBar {
            modes,
            selected,
            configuration,
            input: String::new(),
            issued: 0,
            accepted: 0,
            last_run: None,
        })
    }

    pub fn language(&self) -> &dyn QueryLanguage {
        &*self.modes[self.selected].language
    }

    pub fn configuration(&self) -> &LanguageConfiguration {
        &self.configuration
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Take a query from outside the search bar, translated by the selected language.
    pub fn set_external_input(&mut self, unified_query: &str) {
        self.input = self.language().transform_unified_query(unified_query);
    }

    /// Switch language. Configuration is reset, the input is cleared and
    /// runs already in flight are invalidated.
    pub fn select_language(&mut self, id: &str) -> Result<(), SearchBarError> {
        self.selected = position_of(&self.modes, id)?;
        self.configuration = self.language().get_configuration();
        self.input.clear();
        self.accepted = self.issued;
        self.last_run = None;
        debug!(language = id, "selected query language");
        Ok(())
    }

    pub fn set_query_language_configuration(
        &mut self,
        update: ConfigurationUpdate<LanguageConfiguration>,
    ) {
        self.configuration = update.apply(&self.configuration);
        debug!(configuration = ?self.configuration, "updated language configuration");
    }

    /// Snapshot the current state into a run with a fresh generation.
    pub fn begin_run(&mut self) -> PendingRun {
        self.issued += 1;
        PendingRun {
            generation: self.issued,
            input: self.input.clone(),
            mode: self.modes[self.selected].clone(),
            configuration: self.configuration.clone(),
        }
    }

    /// Store a finished run unless a newer one was already applied.
    ///
    /// Returns whether the result was kept.
    pub fn apply(&mut self, generation: u64, result: RunResult) -> bool {
        if generation <= self.accepted {
            debug!(generation, accepted = self.accepted, "discarding stale run");
            return false;
        }
        self.accepted = generation;
        self.last_run = Some(result);
        true
    }

    /// Run the selected language on the current input and apply the result.
    pub async fn run(&mut self) -> Result<(), ProviderError> {
        let pending = self.begin_run();
        let result = pending.execute().await?;
        self.apply(pending.generation, result);
        Ok(())
    }

    pub fn last_run(&self) -> Option<&RunResult> {
        self.last_run.as_ref()
    }

    pub fn suggestions(&self) -> &[UiSuggestion] {
        self.last_run
            .as_ref()
            .map(|run| run.search_bar_props.suggestions.as_slice())
            .unwrap_or_default()
    }

    /// Output of the latest run, for the search action on enter.
    pub fn output(&self) -> Option<&Output> {
        self.last_run.as_ref().map(|run| &run.output)
    }

    /// Apply a click on `item`. A new input replaces the current one.
    pub fn click(&mut self, item: &UiSuggestion) -> Option<ItemClick> {
        let click = self.last_run.as_ref()?.search_bar_props.on_item_click(item);
        if let ItemClick::SetInput(input) = &click {
            self.input = input.clone();
        }
        Some(click)
    }
}

fn position_of(modes: &[Mode], id: &str) -> Result<usize, SearchBarError> {
    modes
        .iter()
        .position(|m| m.language.id() == id)
        .ok_or_else(|| SearchBarError::UnknownLanguage(id.to_string()))
}
