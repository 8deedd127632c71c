// tests/language_tests.rs

use std::collections::HashMap;
use std::sync::Arc;

use aql_lang::language::{
    Aql, ConfigurationUpdate, ImplicitFilter, LanguageConfiguration, LanguageParameters,
    QueryLanguage, RunContext, close_implicit_filter_popover, toggle_implicit_filter_popover,
};
use aql_lang::output::{OutputOptions, build_output, to_json, to_json_pretty};
use aql_lang::provider::{Candidate, CatalogProvider};
use aql_lang::rebuild::ItemClick;
use aql_lang::search_bar::{Mode, SearchBar, SearchBarError};
use aql_lang::suggest::{Suggestion, SuggestionKind};
use pretty_assertions::assert_eq;

fn catalog() -> CatalogProvider {
    let mut values = HashMap::new();
    values.insert(
        "agent.id".to_string(),
        vec![Candidate::new("001"), Candidate::new("002")],
    );
    CatalogProvider::new(
        vec![
            Candidate::with_description("agent.id", "Agent ID"),
            Candidate::new("agent.ip"),
            Candidate::new("rule.level"),
        ],
        values,
    )
}

fn search_bar(implicit_query: Option<&str>) -> SearchBar {
    let mut parameters = LanguageParameters::from_catalog(catalog());
    if let Some(query) = implicit_query {
        parameters = parameters.with_implicit_query(query);
    }
    SearchBar::new(vec![Mode::new(Arc::new(Aql), parameters)], None).unwrap()
}

fn labels(bar: &SearchBar) -> Vec<String> {
    bar.suggestions().iter().map(|s| s.label.clone()).collect()
}

// ============================================================================
// Query Builder
// ============================================================================

#[test]
fn test_build_output_prepends_implicit_query() {
    let output = build_output(
        "rule.level=7",
        &OutputOptions::with_implicit_query("agent.id=001;"),
    );
    assert_eq!(output.language, "aql");
    assert_eq!(output.query, "agent.id=001;rule.level=7");
}

#[test]
fn test_build_output_without_implicit_query() {
    let output = build_output("rule.level=7", &OutputOptions::default());
    assert_eq!(output.query, "rule.level=7");
    assert_eq!(
        to_json(&output).unwrap(),
        r#"{"language":"aql","query":"rule.level=7"}"#
    );
}

#[test]
fn test_json_helpers_serialize_suggestions() {
    let suggestions = vec![
        Suggestion::new(SuggestionKind::Field, "agent.id", None),
        Suggestion::search(),
    ];
    assert_eq!(
        to_json(&suggestions).unwrap(),
        r#"[{"type":"field","label":"agent.id"},{"type":"function_search","label":"Search","description":"Run the search query"}]"#
    );

    let pretty = to_json_pretty(&suggestions[..1]).unwrap();
    assert_eq!(
        pretty,
        "[\n  {\n    \"type\": \"field\",\n    \"label\": \"agent.id\"\n  }\n]"
    );
}

#[test]
fn test_build_output_joins_without_escaping() {
    let output = build_output("", &OutputOptions::with_implicit_query("id!=000;"));
    assert_eq!(output.query, "id!=000;");
}

// ============================================================================
// Language Metadata And Run
// ============================================================================

#[test]
fn test_metadata() {
    assert_eq!(Aql.id(), "aql");
    assert_eq!(Aql.label(), "AQL");
    assert_eq!(
        Aql.description(),
        "API Query Language (AQL) allows to do queries."
    );
    assert!(Aql.documentation_link().unwrap().ends_with("queries.html"));
    assert_eq!(Aql.transform_unified_query("agent.id=001"), "agent.id=001");
    assert!(!Aql.get_configuration().is_open_popover_implicit_filter);
}

#[tokio::test]
async fn test_run_decorates_suggestions_and_builds_output() {
    let parameters =
        LanguageParameters::from_catalog(catalog()).with_implicit_query("id!=000;");
    let configuration = LanguageConfiguration::default();
    let result = Aql
        .run(
            "agent.id=001",
            RunContext {
                parameters: &parameters,
                configuration: &configuration,
            },
        )
        .await
        .unwrap();

    let props = &result.search_bar_props;
    assert_eq!(props.suggestions[0].kind, SuggestionKind::FunctionSearch);
    assert_eq!(props.suggestions[0].presentation.icon_type, "search");
    assert_eq!(props.suggestions[0].presentation.color, "tint5");
    assert_eq!(
        props.prepend,
        Some(ImplicitFilter {
            query: "id!=000;".to_string(),
            is_open: false,
        })
    );
    assert_eq!(result.output.query, "id!=000;agent.id=001");
}

#[tokio::test]
async fn test_run_without_implicit_query_has_no_prepend() {
    let parameters = LanguageParameters::from_catalog(catalog()).with_implicit_query("");
    let configuration = LanguageConfiguration::default();
    let result = Aql
        .run(
            "agent",
            RunContext {
                parameters: &parameters,
                configuration: &configuration,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.search_bar_props.prepend, None);
    let field = &result.search_bar_props.suggestions[0];
    assert_eq!(field.label, "agent.id");
    assert_eq!(field.description.as_deref(), Some("Agent ID"));
    assert_eq!(field.presentation.icon_type, "kqlField");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_configuration_value_and_update() {
    let current = LanguageConfiguration::default();

    let opened = ConfigurationUpdate::Value(LanguageConfiguration {
        is_open_popover_implicit_filter: true,
    })
    .apply(&current);
    assert!(opened.is_open_popover_implicit_filter);

    let toggled = toggle_implicit_filter_popover().apply(&opened);
    assert!(!toggled.is_open_popover_implicit_filter);

    let closed = close_implicit_filter_popover().apply(&opened);
    assert!(!closed.is_open_popover_implicit_filter);
}

// ============================================================================
// Search Bar
// ============================================================================

#[tokio::test]
async fn test_search_bar_typing_loop() {
    let mut bar = search_bar(None);

    bar.set_input("agent.");
    bar.run().await.unwrap();
    assert_eq!(labels(&bar), vec!["agent.id", "agent.ip"]);

    let item = bar.suggestions()[0].clone();
    assert_eq!(
        bar.click(&item),
        Some(ItemClick::SetInput("agent.id".to_string()))
    );
    assert_eq!(bar.input(), "agent.id");

    bar.run().await.unwrap();
    assert_eq!(labels(&bar), vec!["=", "!=", ">", "<", "~"]);

    let item = bar.suggestions()[0].clone();
    bar.click(&item);
    bar.run().await.unwrap();
    assert_eq!(labels(&bar), vec!["001", "002"]);

    let item = bar.suggestions()[1].clone();
    bar.click(&item);
    assert_eq!(bar.input(), "agent.id=002");
}

#[tokio::test]
async fn test_search_bar_search_click_and_enter() {
    let mut bar = search_bar(Some("id!=000;"));
    bar.set_input("rule.level=7");
    bar.run().await.unwrap();

    let search = bar.suggestions()[0].clone();
    match bar.click(&search) {
        Some(ItemClick::Search(output)) => assert_eq!(output.query, "id!=000;rule.level=7"),
        other => panic!("expected search, got {:?}", other),
    }
    assert_eq!(bar.input(), "rule.level=7");
    assert_eq!(bar.output().unwrap().query, "id!=000;rule.level=7");
}

#[tokio::test]
async fn test_stale_run_is_discarded() {
    let mut bar = search_bar(None);

    bar.set_input("agent.");
    let slow = bar.begin_run();
    bar.set_input("agent.id=001;");
    let fast = bar.begin_run();

    let fast_result = fast.execute().await.unwrap();
    let slow_result = slow.execute().await.unwrap();

    assert!(bar.apply(fast.generation, fast_result));
    assert!(!bar.apply(slow.generation, slow_result));
    assert_eq!(labels(&bar), vec!["agent.id", "agent.ip", "rule.level", "("]);
}

#[tokio::test]
async fn test_select_language_resets_state() {
    let mut bar = search_bar(Some("id!=000;"));
    bar.set_input("agent.id=001");
    bar.set_query_language_configuration(toggle_implicit_filter_popover());
    assert!(bar.configuration().is_open_popover_implicit_filter);

    let in_flight = bar.begin_run();
    bar.select_language("aql").unwrap();

    assert_eq!(bar.input(), "");
    assert!(!bar.configuration().is_open_popover_implicit_filter);
    let result = in_flight.execute().await.unwrap();
    assert!(!bar.apply(in_flight.generation, result));
    assert!(bar.suggestions().is_empty());
}

#[tokio::test]
async fn test_prepend_reflects_configuration() {
    let mut bar = search_bar(Some("id!=000;"));
    bar.set_query_language_configuration(toggle_implicit_filter_popover());
    bar.run().await.unwrap();

    let prepend = bar.last_run().unwrap().search_bar_props.prepend.clone();
    assert_eq!(prepend.map(|p| p.is_open), Some(true));
}

#[test]
fn test_search_bar_errors() {
    assert_eq!(SearchBar::new(vec![], None).err(), Some(SearchBarError::NoModes));

    let mode = Mode::new(Arc::new(Aql), LanguageParameters::from_catalog(catalog()));
    assert_eq!(
        SearchBar::new(vec![mode.clone()], Some("kql")).err(),
        Some(SearchBarError::UnknownLanguage("kql".to_string()))
    );

    let mut bar = SearchBar::new(vec![mode], Some("aql")).unwrap();
    assert_eq!(
        bar.select_language("dql"),
        Err(SearchBarError::UnknownLanguage("dql".to_string()))
    );
}

#[test]
fn test_external_input_goes_through_language() {
    let mut bar = search_bar(None);
    bar.set_external_input("rule.level>7");
    assert_eq!(bar.input(), "rule.level>7");
}
