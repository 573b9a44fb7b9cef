//! Behavior of CompetitorAnalyzer against in-process fake clients

mod common;

use common::{sample_analysis, FakeModel, FakeSearch};
use insights::analysis::fallback::{outer_fallback, parse_fallback};
use insights::analysis::{
    AnalysisOutcome, AnalyzerError, CompetitorAnalyzer, CompetitorRecord, CountryFilter,
    FallbackTier,
};
use insights::llm::{Completion, LlmError};
use insights::search::{SearchError, SearchResponse};
use serde_json::json;
use std::sync::Arc;

fn analyzer(search: &Arc<FakeSearch>, model: &Arc<FakeModel>) -> CompetitorAnalyzer {
    CompetitorAnalyzer::with_clients(search.clone(), model.clone())
}

fn german_competitors() -> Vec<CompetitorRecord> {
    CompetitorRecord::from_urls(
        &["https://rival-one.de".to_string(), "https://rival-two.de".to_string()],
        CountryFilter::Germany,
    )
}

// =============================================================================
// get_competitor_urls
// =============================================================================

#[tokio::test]
async fn search_request_is_neural_company_search_for_three() {
    let search = Arc::new(FakeSearch::with_urls(&["https://a.example"]));
    let model = Arc::new(FakeModel::replying("{}"));

    analyzer(&search, &model)
        .get_competitor_urls("Accounting software for freelancers", Some("Canada"))
        .await
        .unwrap();

    let request = search.last_request();
    assert_eq!(request.query, "Accounting software for freelancers companies in Canada");
    assert_eq!(request.num_results, 3);
    assert_eq!(request.search_type, "neural");
    assert_eq!(request.category.as_deref(), Some("company"));
}

#[tokio::test]
async fn global_country_leaves_query_unchanged() {
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::replying("{}"));

    analyzer(&search, &model)
        .get_competitor_urls("Accounting software", Some("Global"))
        .await
        .unwrap();

    assert_eq!(search.last_request().query, "Accounting software");
}

#[tokio::test]
async fn at_most_three_urls_are_returned_in_order() {
    let search = Arc::new(FakeSearch::with_urls(&[
        "https://1.example",
        "https://2.example",
        "https://3.example",
        "https://4.example",
        "https://5.example",
    ]));
    let model = Arc::new(FakeModel::replying("{}"));

    let urls = analyzer(&search, &model)
        .get_competitor_urls("anything", None)
        .await
        .unwrap();

    assert_eq!(urls, vec!["https://1.example", "https://2.example", "https://3.example"]);
}

#[tokio::test]
async fn missing_results_yield_empty_list() {
    let search = Arc::new(FakeSearch::with_response(SearchResponse { results: None }));
    let model = Arc::new(FakeModel::replying("{}"));

    let urls = analyzer(&search, &model)
        .get_competitor_urls("anything", None)
        .await
        .unwrap();

    assert!(urls.is_empty());
}

#[tokio::test]
async fn search_failure_is_fatal_with_message() {
    let search = Arc::new(FakeSearch::failing(SearchError::ApiError(
        "HTTP 500: upstream down".to_string(),
    )));
    let model = Arc::new(FakeModel::replying("{}"));

    let err = analyzer(&search, &model)
        .get_competitor_urls("anything", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::Search(SearchError::ApiError(_))));
    assert_eq!(
        err.to_string(),
        "Failed to fetch competitor URLs: API error: HTTP 500: upstream down"
    );
}

#[tokio::test]
async fn blank_description_never_reaches_search() {
    let search = Arc::new(FakeSearch::with_urls(&["https://a.example"]));
    let model = Arc::new(FakeModel::replying("{}"));

    let err = analyzer(&search, &model)
        .get_competitor_urls("   ", Some("Japan"))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::EmptyDescription));
    assert_eq!(search.request_count(), 0);
}

// =============================================================================
// analyze_competitors
// =============================================================================

#[tokio::test]
async fn well_formed_completion_is_returned_verbatim() {
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::replying(&sample_analysis().to_string()));

    let outcome = analyzer(&search, &model)
        .analyze_competitors(&german_competitors())
        .await;

    assert!(outcome.is_success());
    assert_eq!(outcome.tier(), None);
    assert_eq!(outcome.into_result().into_value(), sample_analysis());
}

#[tokio::test]
async fn fenced_completion_is_unwrapped() {
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let text = format!(
        "Sure! Here is the analysis:\n```json\n{}\n```\nHope this helps.",
        serde_json::to_string_pretty(&sample_analysis()).unwrap()
    );
    let model = Arc::new(FakeModel::replying(&text));

    let outcome = analyzer(&search, &model)
        .analyze_competitors(&german_competitors())
        .await;

    assert!(outcome.is_success());
    assert_eq!(outcome.result().clone().into_value(), sample_analysis());
}

#[tokio::test]
async fn missing_key_triggers_parse_fallback() {
    let mut partial = sample_analysis();
    partial.as_object_mut().unwrap().remove("pricing_strategy");

    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::replying(&partial.to_string()));

    let outcome = analyzer(&search, &model)
        .analyze_competitors(&german_competitors())
        .await;

    assert_eq!(outcome.tier(), Some(FallbackTier::Parse));
    assert_eq!(outcome.result(), &parse_fallback());
}

#[tokio::test]
async fn invalid_json_triggers_parse_fallback() {
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::replying("I'm sorry, I can't analyze these companies."));

    let outcome = analyzer(&search, &model)
        .analyze_competitors(&german_competitors())
        .await;

    assert!(matches!(outcome, AnalysisOutcome::ParseFallback { .. }));
    assert_eq!(outcome.into_result(), parse_fallback());
}

#[tokio::test]
async fn model_failure_triggers_outer_fallback() {
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::failing(LlmError::ApiError {
        status: 503,
        message: "model overloaded".to_string(),
    }));

    let outcome = analyzer(&search, &model)
        .analyze_competitors(&german_competitors())
        .await;

    assert_eq!(outcome.tier(), Some(FallbackTier::Outer));
    assert_eq!(outcome.result(), &outer_fallback());
    assert_ne!(outcome.result(), &parse_fallback());
    assert!(outcome.reason().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn completion_without_content_uses_raw_response_text() {
    // Raw response is itself a complete analysis object.
    let completion = Completion {
        content: None,
        raw: sample_analysis(),
    };
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::with_completion(completion));

    let outcome = analyzer(&search, &model)
        .analyze_competitors(&german_competitors())
        .await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn empty_competitor_list_uses_global_context() {
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::replying(&sample_analysis().to_string()));

    let outcome = analyzer(&search, &model).analyze_competitors(&[]).await;

    assert!(outcome.is_success());
    let prompt = model.only_prompt();
    assert!(prompt.contains("competitors in the Global market:\n[]"));
    assert!(prompt.contains("Growth opportunities in Global"));
}

#[tokio::test]
async fn prompt_carries_first_record_country_and_records() {
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::replying(&sample_analysis().to_string()));

    analyzer(&search, &model)
        .analyze_competitors(&german_competitors())
        .await;

    let prompt = model.only_prompt();
    assert!(prompt.contains("competitors in the Germany market"));
    assert!(prompt.contains("\"url\": \"https://rival-two.de\""));
    assert!(prompt.contains("\"company_name\": \"Competitor 2\""));

    let conversations = model.conversations.lock().unwrap();
    assert_eq!(conversations[0][0].role, insights::llm::Role::Human);
}

#[tokio::test]
async fn non_string_items_are_not_validated() {
    let odd = json!({
        "market_gaps": [1, 2],
        "competitor_weaknesses": [],
        "recommended_features": [null],
        "pricing_strategy": "",
        "growth_opportunities": {"not": "a list"}
    });
    let search = Arc::new(FakeSearch::with_urls(&[]));
    let model = Arc::new(FakeModel::replying(&odd.to_string()));

    let outcome = analyzer(&search, &model).analyze_competitors(&[]).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.into_result().into_value(), odd);
}
