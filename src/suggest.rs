//! Suggestion engine.
//!
//! Looks at the last token that carries text and proposes what may come next:
//! completions of the fragment being typed, then the tokens that can follow it
//! once it is complete. Field and value candidates come from the providers;
//! operators, conjunctions and groups come from the literal tables.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{CompareOperator, Conjunction, GroupOperator, Token, TokenKind, Tokens};
use crate::provider::{Candidate, FieldProvider, ProviderError, ValueContext, ValueProvider};

const SEARCH_LABEL: &str = "Search";
const SEARCH_DESCRIPTION: &str = "Run the search query";

/// What a suggestion stands for: a token kind, or running the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Field,
    OperatorCompare,
    Value,
    Conjunction,
    OperatorGroup,
    FunctionSearch,
}

impl SuggestionKind {
    /// The token kind a selected suggestion becomes; `None` for the search action.
    pub fn token_kind(&self) -> Option<TokenKind> {
        match self {
            SuggestionKind::Field => Some(TokenKind::Field),
            SuggestionKind::OperatorCompare => Some(TokenKind::OperatorCompare),
            SuggestionKind::Value => Some(TokenKind::Value),
            SuggestionKind::Conjunction => Some(TokenKind::Conjunction),
            SuggestionKind::OperatorGroup => Some(TokenKind::OperatorGroup),
            SuggestionKind::FunctionSearch => None,
        }
    }

    pub fn presentation(&self) -> Presentation {
        let (icon_type, color) = match self {
            SuggestionKind::Field => ("kqlField", "tint4"),
            SuggestionKind::OperatorCompare => ("kqlOperand", "tint1"),
            SuggestionKind::Value => ("kqlValue", "tint0"),
            SuggestionKind::Conjunction => ("kqlSelector", "tint3"),
            SuggestionKind::OperatorGroup => ("tokenDenseVector", "tint3"),
            SuggestionKind::FunctionSearch => ("search", "tint5"),
        };
        Presentation { icon_type, color }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "field" => Some(SuggestionKind::Field),
            "operator_compare" => Some(SuggestionKind::OperatorCompare),
            "value" => Some(SuggestionKind::Value),
            "conjunction" => Some(SuggestionKind::Conjunction),
            "operator_group" => Some(SuggestionKind::OperatorGroup),
            "function_search" => Some(SuggestionKind::FunctionSearch),
            _ => None,
        }
    }
}

impl From<TokenKind> for SuggestionKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Field => SuggestionKind::Field,
            TokenKind::OperatorCompare => SuggestionKind::OperatorCompare,
            TokenKind::Value => SuggestionKind::Value,
            TokenKind::Conjunction => SuggestionKind::Conjunction,
            TokenKind::OperatorGroup => SuggestionKind::OperatorGroup,
        }
    }
}

/// Icon and color the view layer shows for a suggestion kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub icon_type: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Suggestion {
    pub fn new(
        kind: SuggestionKind,
        label: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Suggestion {
            kind,
            label: label.into(),
            description,
        }
    }

    fn from_candidate(kind: SuggestionKind, candidate: Candidate) -> Self {
        Suggestion::new(kind, candidate.label, candidate.description)
    }

    pub fn operator(op: CompareOperator) -> Self {
        Suggestion::new(
            SuggestionKind::OperatorCompare,
            op.literal(),
            Some(op.description().to_string()),
        )
    }

    pub fn conjunction(conjunction: Conjunction) -> Self {
        Suggestion::new(
            SuggestionKind::Conjunction,
            conjunction.literal(),
            Some(conjunction.description().to_string()),
        )
    }

    pub fn group(group: GroupOperator) -> Self {
        Suggestion::new(
            SuggestionKind::OperatorGroup,
            group.literal(),
            Some(group.description().to_string()),
        )
    }

    pub fn search() -> Self {
        Suggestion::new(
            SuggestionKind::FunctionSearch,
            SEARCH_LABEL,
            Some(SEARCH_DESCRIPTION.to_string()),
        )
    }
}

/// A suggestion decorated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiSuggestion {
    pub kind: SuggestionKind,
    #[serde(rename = "type")]
    pub presentation: Presentation,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Suggestion> for UiSuggestion {
    fn from(s: Suggestion) -> Self {
        UiSuggestion {
            kind: s.kind,
            presentation: s.kind.presentation(),
            label: s.label,
            description: s.description,
        }
    }
}

impl From<UiSuggestion> for Suggestion {
    fn from(s: UiSuggestion) -> Self {
        Suggestion::new(s.kind, s.label, s.description)
    }
}

pub fn decorate(suggestions: Vec<Suggestion>) -> Vec<UiSuggestion> {
    suggestions.into_iter().map(UiSuggestion::from).collect()
}

/// Computes suggestions for a token sequence.
pub struct SuggestionEngine<'a> {
    fields: &'a dyn FieldProvider,
    values: &'a dyn ValueProvider,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(fields: &'a dyn FieldProvider, values: &'a dyn ValueProvider) -> Self {
        SuggestionEngine { fields, values }
    }

    /// Suggestions for the next step after `tokens`, in display order.
    ///
    /// A provider failure aborts the whole computation.
    pub async fn suggest(&self, tokens: &Tokens) -> Result<Vec<Suggestion>, ProviderError> {
        let Some(last) = tokens.last_with_value() else {
            return Ok(Vec::new());
        };
        let current = last.value().unwrap_or_default();
        debug!(kind = %last.kind, current, "computing suggestions");

        match last.kind {
            TokenKind::Field => self.after_field(current).await,
            TokenKind::OperatorCompare => self.after_operator(tokens, current).await,
            TokenKind::Value => self.after_value(tokens, current).await,
            TokenKind::Conjunction => self.after_conjunction(current).await,
            TokenKind::OperatorGroup => self.after_group(last).await,
        }
    }

    async fn after_field(&self, current: &str) -> Result<Vec<Suggestion>, ProviderError> {
        let fields = self.fields.fields().await?;
        let exact = fields.iter().any(|c| c.label == current);

        let mut suggestions: Vec<_> = fields
            .into_iter()
            .filter(|c| c.label.starts_with(current) && c.label != current)
            .map(|c| Suggestion::from_candidate(SuggestionKind::Field, c))
            .collect();

        if exact {
            suggestions.extend(CompareOperator::ALL.into_iter().map(Suggestion::operator));
        }
        Ok(suggestions)
    }

    async fn after_operator(
        &self,
        tokens: &Tokens,
        current: &str,
    ) -> Result<Vec<Suggestion>, ProviderError> {
        let mut suggestions: Vec<_> = CompareOperator::ALL
            .into_iter()
            .filter(|op| op.literal().starts_with(current) && op.literal() != current)
            .map(Suggestion::operator)
            .collect();

        if CompareOperator::from_literal(current).is_some() {
            let values = self.values.values(None, &value_context(tokens)).await?;
            suggestions.extend(
                values
                    .into_iter()
                    .map(|c| Suggestion::from_candidate(SuggestionKind::Value, c)),
            );
        }
        Ok(suggestions)
    }

    async fn after_value(
        &self,
        tokens: &Tokens,
        current: &str,
    ) -> Result<Vec<Suggestion>, ProviderError> {
        let mut suggestions = Vec::new();
        if !current.is_empty() {
            suggestions.push(Suggestion::search());
        }

        let values = self
            .values
            .values(Some(current), &value_context(tokens))
            .await?;
        suggestions.extend(
            values
                .into_iter()
                .map(|c| Suggestion::from_candidate(SuggestionKind::Value, c)),
        );
        suggestions.extend(Conjunction::ALL.into_iter().map(Suggestion::conjunction));
        suggestions.push(Suggestion::group(GroupOperator::Close));
        Ok(suggestions)
    }

    async fn after_conjunction(&self, current: &str) -> Result<Vec<Suggestion>, ProviderError> {
        let mut suggestions: Vec<_> = Conjunction::ALL
            .into_iter()
            .filter(|c| c.literal().starts_with(current) && c.literal() != current)
            .map(Suggestion::conjunction)
            .collect();

        if Conjunction::from_literal(current).is_some() {
            let fields = self.fields.fields().await?;
            suggestions.extend(
                fields
                    .into_iter()
                    .map(|c| Suggestion::from_candidate(SuggestionKind::Field, c)),
            );
        }
        suggestions.push(Suggestion::group(GroupOperator::Open));
        Ok(suggestions)
    }

    async fn after_group(&self, last: &Token) -> Result<Vec<Suggestion>, ProviderError> {
        match last.value().and_then(GroupOperator::from_literal) {
            Some(GroupOperator::Open) => Ok(self
                .fields
                .fields()
                .await?
                .into_iter()
                .map(|c| Suggestion::from_candidate(SuggestionKind::Field, c))
                .collect()),
            Some(GroupOperator::Close) => Ok(Conjunction::ALL
                .into_iter()
                .map(Suggestion::conjunction)
                .collect()),
            None => Ok(Vec::new()),
        }
    }
}

fn value_context(tokens: &Tokens) -> ValueContext {
    ValueContext {
        previous_field: tokens.last_value_of(TokenKind::Field).map(str::to_string),
        previous_operator_compare: tokens
            .last_value_of(TokenKind::OperatorCompare)
            .map(str::to_string),
    }
}

/// Shorthand for `SuggestionEngine::new(fields, values).suggest(tokens)`.
pub async fn suggest(
    tokens: &Tokens,
    fields: &dyn FieldProvider,
    values: &dyn ValueProvider,
) -> Result<Vec<Suggestion>, ProviderError> {
    SuggestionEngine::new(fields, values).suggest(tokens).await
}
