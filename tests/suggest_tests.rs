// tests/suggest_tests.rs

use std::collections::HashMap;
use std::sync::Mutex;

use aql_lang::ast::{Token, TokenKind, Tokens};
use aql_lang::lexer::tokenize;
use aql_lang::provider::{
    Candidate, CatalogProvider, FieldProvider, ProviderError, ValueContext, ValueProvider,
};
use aql_lang::suggest::{Suggestion, SuggestionKind, suggest};
use async_trait::async_trait;
use pretty_assertions::assert_eq;

use SuggestionKind::*;

/// Fixed candidates; records every call so tests can check what was asked.
#[derive(Default)]
struct Fixed {
    fields: Vec<&'static str>,
    values: Vec<&'static str>,
    field_calls: Mutex<usize>,
    value_calls: Mutex<Vec<(Option<String>, ValueContext)>>,
}

impl Fixed {
    fn new(fields: &[&'static str], values: &[&'static str]) -> Self {
        Fixed {
            fields: fields.to_vec(),
            values: values.to_vec(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl FieldProvider for Fixed {
    async fn fields(&self) -> Result<Vec<Candidate>, ProviderError> {
        *self.field_calls.lock().unwrap() += 1;
        Ok(self.fields.iter().map(|f| Candidate::new(*f)).collect())
    }
}

#[async_trait]
impl ValueProvider for Fixed {
    async fn values(
        &self,
        current: Option<&str>,
        context: &ValueContext,
    ) -> Result<Vec<Candidate>, ProviderError> {
        self.value_calls
            .lock()
            .unwrap()
            .push((current.map(str::to_string), context.clone()));
        Ok(self.values.iter().map(|v| Candidate::new(*v)).collect())
    }
}

struct Failing;

#[async_trait]
impl FieldProvider for Failing {
    async fn fields(&self) -> Result<Vec<Candidate>, ProviderError> {
        Err(ProviderError::Unavailable("fields endpoint down".to_string()))
    }
}

#[async_trait]
impl ValueProvider for Failing {
    async fn values(
        &self,
        _current: Option<&str>,
        _context: &ValueContext,
    ) -> Result<Vec<Candidate>, ProviderError> {
        Err(ProviderError::Unavailable("values endpoint down".to_string()))
    }
}

async fn run(input: &str, provider: &Fixed) -> Vec<(SuggestionKind, String)> {
    pairs(suggest(&tokenize(input), provider, provider).await.unwrap())
}

fn pairs(suggestions: Vec<Suggestion>) -> Vec<(SuggestionKind, String)> {
    suggestions.into_iter().map(|s| (s.kind, s.label)).collect()
}

fn expected(items: &[(SuggestionKind, &str)]) -> Vec<(SuggestionKind, String)> {
    items.iter().map(|(k, l)| (*k, l.to_string())).collect()
}

// ============================================================================
// Nothing To Suggest
// ============================================================================

#[tokio::test]
async fn test_empty_input_has_no_suggestions() {
    let provider = Fixed::new(&["agent.id"], &[]);
    assert!(run("", &provider).await.is_empty());
}

#[tokio::test]
async fn test_all_empty_tokens_have_no_suggestions() {
    let provider = Fixed::new(&["agent.id"], &[]);
    let tokens = Tokens::from(vec![
        Token::empty(TokenKind::Field),
        Token::new(TokenKind::Value, ""),
    ]);
    assert!(suggest(&tokens, &provider, &provider).await.unwrap().is_empty());
}

// ============================================================================
// After A Field
// ============================================================================

#[tokio::test]
async fn test_field_prefix_completion_excludes_exact_match() {
    let provider = Fixed::new(&["agent.id", "agent.ip", "agent."], &[]);
    assert_eq!(
        run("agent.", &provider).await,
        expected(&[
            (Field, "agent.id"),
            (Field, "agent.ip"),
            (OperatorCompare, "="),
            (OperatorCompare, "!="),
            (OperatorCompare, ">"),
            (OperatorCompare, "<"),
            (OperatorCompare, "~"),
        ])
    );

    let provider = Fixed::new(&["agent.id", "agent.ip"], &[]);
    assert_eq!(
        run("agent.", &provider).await,
        expected(&[(Field, "agent.id"), (Field, "agent.ip")])
    );
}

#[tokio::test]
async fn test_exact_field_suggests_operators_only() {
    let provider = Fixed::new(&["agent.id", "rule.level"], &[]);
    let suggestions = suggest(&tokenize("agent.id"), &provider, &provider)
        .await
        .unwrap();

    assert_eq!(
        pairs(suggestions.clone()),
        expected(&[
            (OperatorCompare, "="),
            (OperatorCompare, "!="),
            (OperatorCompare, ">"),
            (OperatorCompare, "<"),
            (OperatorCompare, "~"),
        ])
    );
    assert_eq!(suggestions[1].description.as_deref(), Some("not equality"));
}

#[tokio::test]
async fn test_field_prefix_is_case_sensitive() {
    let provider = Fixed::new(&["Agent.id"], &[]);
    assert!(run("agent", &provider).await.is_empty());
}

// ============================================================================
// After An Operator
// ============================================================================

#[tokio::test]
async fn test_partial_operator_completes() {
    let provider = Fixed::new(&["agent.id"], &["001"]);
    assert_eq!(
        run("agent.id!", &provider).await,
        expected(&[(OperatorCompare, "!=")])
    );
    assert!(provider.value_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_operator_asks_for_values() {
    let provider = Fixed::new(&["agent.id"], &["001", "002"]);
    assert_eq!(
        run("agent.id=", &provider).await,
        expected(&[(Value, "001"), (Value, "002")])
    );

    let calls = provider.value_calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(
            None,
            ValueContext {
                previous_field: Some("agent.id".to_string()),
                previous_operator_compare: Some("=".to_string()),
            }
        )]
    );
}

#[tokio::test]
async fn test_operator_without_field_passes_no_field() {
    let provider = Fixed::new(&["agent.id"], &[]);
    assert!(run("=", &provider).await.is_empty());

    let calls = provider.value_calls.lock().unwrap();
    assert_eq!(calls[0].1.previous_field, None);
    assert_eq!(calls[0].1.previous_operator_compare.as_deref(), Some("="));
}

#[tokio::test]
async fn test_unrecognized_two_char_operator_offers_nothing() {
    let provider = Fixed::new(&["rule.level"], &["7"]);
    assert!(run("rule.level>=", &provider).await.is_empty());
}

// ============================================================================
// After A Value
// ============================================================================

#[tokio::test]
async fn test_value_stage_order() {
    let provider = Fixed::new(&["rule.level"], &["70", "75"]);
    assert_eq!(
        run("rule.level=7", &provider).await,
        expected(&[
            (FunctionSearch, "Search"),
            (Value, "70"),
            (Value, "75"),
            (Conjunction, ";"),
            (Conjunction, ","),
            (OperatorGroup, ")"),
        ])
    );

    let calls = provider.value_calls.lock().unwrap();
    assert_eq!(calls[0].0.as_deref(), Some("7"));
    assert_eq!(calls[0].1.previous_field.as_deref(), Some("rule.level"));
}

#[tokio::test]
async fn test_value_context_uses_latest_clause() {
    let provider = Fixed::new(&[], &[]);
    run("agent.id=001;rule.level>3", &provider).await;

    let calls = provider.value_calls.lock().unwrap();
    assert_eq!(
        calls[0].1,
        ValueContext {
            previous_field: Some("rule.level".to_string()),
            previous_operator_compare: Some(">".to_string()),
        }
    );
}

// ============================================================================
// After A Conjunction
// ============================================================================

#[tokio::test]
async fn test_exact_conjunction_suggests_fields_then_open_group() {
    let provider = Fixed::new(&["agent.id", "rule.level"], &[]);
    assert_eq!(
        run("agent.id=001;", &provider).await,
        expected(&[
            (Field, "agent.id"),
            (Field, "rule.level"),
            (OperatorGroup, "("),
        ])
    );
}

#[tokio::test]
async fn test_unknown_conjunction_only_offers_open_group() {
    let provider = Fixed::new(&["agent.id"], &[]);
    let tokens = Tokens::from(vec![Token::new(TokenKind::Conjunction, ";X")]);
    let suggestions = suggest(&tokens, &provider, &provider).await.unwrap();

    assert_eq!(pairs(suggestions), expected(&[(OperatorGroup, "(")]));
    assert_eq!(*provider.field_calls.lock().unwrap(), 0);
}

// ============================================================================
// After A Group
// ============================================================================

#[tokio::test]
async fn test_open_group_suggests_fields() {
    let provider = Fixed::new(&["agent.id", "rule.level"], &[]);
    assert_eq!(
        run("agent.id=001;(", &provider).await,
        expected(&[(Field, "agent.id"), (Field, "rule.level")])
    );
}

#[tokio::test]
async fn test_close_group_suggests_conjunctions() {
    let provider = Fixed::new(&["agent.id"], &[]);
    assert_eq!(
        run("(agent.id=001)", &provider).await,
        expected(&[(Conjunction, ";"), (Conjunction, ",")])
    );
}

// ============================================================================
// Providers
// ============================================================================

#[tokio::test]
async fn test_provider_failure_propagates() {
    let err = suggest(&tokenize("agent"), &Failing, &Failing).await.unwrap_err();
    assert_eq!(err, ProviderError::Unavailable("fields endpoint down".to_string()));

    let err = suggest(&tokenize("agent.id=1"), &Failing, &Failing).await.unwrap_err();
    assert_eq!(err, ProviderError::Unavailable("values endpoint down".to_string()));
}

#[tokio::test]
async fn test_literal_branches_do_not_touch_providers() {
    let suggestions = suggest(&tokenize("(agent.id=001)"), &Failing, &Failing)
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 2);
}

#[tokio::test]
async fn test_catalog_provider_refines_values() {
    let mut values = HashMap::new();
    values.insert(
        "rule.level".to_string(),
        vec![Candidate::new("1"), Candidate::new("10"), Candidate::new("12"), Candidate::new("3")],
    );
    let catalog = CatalogProvider::new(vec![Candidate::new("rule.level")], values);

    let suggestions = pairs(suggest(&tokenize("rule.level=1"), &catalog, &catalog).await.unwrap());
    assert_eq!(
        suggestions,
        expected(&[
            (FunctionSearch, "Search"),
            (Value, "10"),
            (Value, "12"),
            (Conjunction, ";"),
            (Conjunction, ","),
            (OperatorGroup, ")"),
        ])
    );

    let suggestions = pairs(suggest(&tokenize("rule.level<"), &catalog, &catalog).await.unwrap());
    assert_eq!(suggestions.len(), 4);
}

#[tokio::test]
async fn test_catalog_provider_unknown_field_has_no_values() {
    let mut values = HashMap::new();
    values.insert("agent.id".to_string(), vec![Candidate::new("001")]);
    let catalog = CatalogProvider::new(vec![Candidate::new("agent.id")], values);

    let context = ValueContext {
        previous_field: Some("os.name".to_string()),
        previous_operator_compare: Some("=".to_string()),
    };
    assert_eq!(catalog.values(None, &context).await, Ok(vec![]));
    assert_eq!(catalog.values(Some("0"), &ValueContext::default()).await, Ok(vec![]));
}
